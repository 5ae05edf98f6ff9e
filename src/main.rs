use clap::Parser;
use user_import::domain::model::RunTally;
use user_import::domain::ports::ImportConfig;
use user_import::utils::{logger, validation::Validate};
use user_import::{CliConfig, HttpUserGateway, TomlConfig, UserImportPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting user-import");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = if let Some(path) = cli.config.clone() {
        let config = TomlConfig::from_file(&path)?;
        if let Err(e) = config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        run(config).await
    } else {
        if let Err(e) = cli.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        run(cli).await
    };

    match result {
        Ok(tally) => {
            tracing::info!(
                "✅ Import run completed: {} attempted, {} created, {} failed",
                tally.total,
                tally.succeeded,
                tally.failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Import run aborted: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

async fn run<C: ImportConfig>(config: C) -> user_import::Result<RunTally> {
    let gateway = HttpUserGateway::new(config.api_endpoint().to_string());
    let pipeline = UserImportPipeline::new(config, gateway);
    pipeline.run().await
}
