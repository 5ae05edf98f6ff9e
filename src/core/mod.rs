pub mod dedupe;
pub mod gateway;
pub mod pipeline;
pub mod reporter;
pub mod submitter;
pub mod validator;

pub use crate::domain::model::{AttemptOutcome, NewUser, RawRow, RunTally, ValidationOutcome};
pub use crate::domain::ports::{ImportConfig, UserGateway};
pub use crate::utils::error::Result;
