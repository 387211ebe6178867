use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    cfg.service(web::resource("/healthz").route(web::get().to(healthz)))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::ACCEPT,
            actix_web::http::header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

/// Hosts the built single-page app until the process is stopped.
pub async fn serve(bind_address: &str, frontend_dir: PathBuf) -> std::io::Result<()> {
    if !frontend_dir.join("index.html").is_file() {
        log::warn!(
            "No index.html under {}; build the frontend first",
            frontend_dir.display()
        );
    }

    log::info!("Serving {} on {}", frontend_dir.display(), bind_address);

    HttpServer::new(move || {
        let frontend_dir = frontend_dir.clone();
        App::new()
            .wrap(cors())
            .configure(move |cfg| configure_routes(cfg, frontend_dir))
    })
    .bind(bind_address)?
    .run()
    .await
}
