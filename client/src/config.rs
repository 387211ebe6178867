use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use shared::Category;

use crate::api::{ClientError, PredictionClient};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Paddy plant disease, variety and age predictions", long_about = None)]
pub struct Config {
    /// Base URL of the inference service
    #[arg(long, env = "PREDICT_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Per-request timeout in seconds; unset waits indefinitely
    #[arg(long, env = "PREDICT_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run one prediction batch over the given images
    Predict(PredictArgs),
    /// Check that the inference service is up
    Health,
    /// Host the built single-page app
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// disease, variety, age or all
    #[arg(long, short, default_value = "disease")]
    pub category: Category,

    /// Print the batch as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8081")]
    pub port: u16,

    /// Directory holding the built frontend
    #[arg(long, env = "FRONTEND_DIST")]
    pub dist: Option<PathBuf>,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn client(&self) -> Result<PredictionClient, ClientError> {
        PredictionClient::new(&self.base_url, self.timeout())
    }
}

impl ServeArgs {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn frontend_dir(&self) -> PathBuf {
        if let Some(dist) = &self.dist {
            return dist.clone();
        }
        match std::env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest_dir) => PathBuf::from(format!("{}/../frontend/dist", manifest_dir)),
            Err(_) => PathBuf::from("/usr/src/app/frontend/dist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_defaults_to_disease_without_timeout() {
        let config = Config::try_parse_from(["paddy", "predict", "leaf.jpg"]).unwrap();

        assert_eq!(config.timeout(), None);
        match config.command {
            Command::Predict(args) => {
                assert_eq!(args.category, Category::Disease);
                assert!(!args.json);
                assert_eq!(args.files, [PathBuf::from("leaf.jpg")]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_category_and_timeout() {
        let config = Config::try_parse_from([
            "paddy",
            "--timeout-secs",
            "5",
            "--base-url",
            "http://inference:8000",
            "predict",
            "-c",
            "all",
            "a.jpg",
            "b.png",
        ])
        .unwrap();

        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.client().unwrap().base_url().as_str(), "http://inference:8000/");
        let Command::Predict(args) = config.command else {
            panic!("expected predict");
        };
        assert_eq!(args.category, Category::All);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn predict_needs_files_and_a_known_category() {
        assert!(Config::try_parse_from(["paddy", "predict"]).is_err());
        assert!(Config::try_parse_from(["paddy", "predict", "-c", "colour", "a.jpg"]).is_err());
    }

    #[test]
    fn serve_uses_explicit_dist() {
        let config = Config::try_parse_from([
            "paddy", "serve", "--host", "127.0.0.1", "--port", "9000", "--dist", "/srv/app",
        ])
        .unwrap();
        let Command::Serve(args) = config.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind_address(), "127.0.0.1:9000");
        assert_eq!(args.frontend_dir(), PathBuf::from("/srv/app"));
    }
}
