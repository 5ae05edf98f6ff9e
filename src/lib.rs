pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{CliConfig, TomlConfig};
pub use core::gateway::HttpUserGateway;
pub use core::pipeline::UserImportPipeline;
pub use utils::error::{ImportError, Result};
