use crate::domain::model::{AttemptOutcome, NewUser};
use crate::domain::ports::UserGateway;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Submits create-user requests as JSON POSTs. 201 is the only status that
/// counts as created; everything else is a per-attempt rejection.
pub struct HttpUserGateway {
    client: Client,
    endpoint: String,
}

impl HttpUserGateway {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl UserGateway for HttpUserGateway {
    async fn create_user(&self, user: &NewUser) -> AttemptOutcome {
        tracing::debug!("POST {} for {}", self.endpoint, user.email);
        match self.client.post(&self.endpoint).json(user).send().await {
            Ok(response) if response.status() == StatusCode::CREATED => AttemptOutcome::Created,
            Ok(response) => AttemptOutcome::Rejected(response.status().as_u16()),
            Err(e) => AttemptOutcome::Transport(e.to_string()),
        }
    }
}
