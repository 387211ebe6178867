use std::process::ExitCode;

use clap::Parser;
use client::config::{Command, Config, PredictArgs, ServeArgs};
use client::{files, report, routes};
use shared::PredictionFlow;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();
    log::debug!("Starting with config: {:?}", config);

    match &config.command {
        Command::Predict(args) => predict(&config, args).await,
        Command::Health => health(&config).await,
        Command::Serve(args) => serve(args).await,
    }
}

async fn predict(config: &Config, args: &PredictArgs) -> ExitCode {
    let client = match config.client() {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let selection = match files::load_selection(&args.files).await {
        Ok(selection) => selection,
        Err(e) => {
            log::error!("Failed to read images: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if selection.is_empty() {
        log::error!("No images to analyze");
        return ExitCode::FAILURE;
    }

    log::info!(
        "Analyzing {} image(s) against {} ({})",
        selection.len(),
        client.base_url(),
        args.category
    );

    let mut flow = PredictionFlow::new(client).with_category(args.category);
    match flow.submit(selection.images()).await {
        Ok(batch) if args.json => match serde_json::to_string_pretty(&batch) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode batch: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(batch) => {
            print!("{}", report::render_batch(&batch));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn health(config: &Config) -> ExitCode {
    let client = match config.client() {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.health().await {
        Ok(status) => {
            println!("{}", report::render_health(&status));
            if status.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("Inference service at {} is unreachable: {}", client.base_url(), e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: &ServeArgs) -> ExitCode {
    match routes::serve(&args.bind_address(), args.frontend_dir()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
