pub mod api;
pub mod config;
pub mod files;
pub mod report;
pub mod routes;

pub use api::{ClientError, PredictionClient};
pub use config::{Command, Config};
