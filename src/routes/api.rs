use crate::handlers;
use actix_web::{web, Scope};

pub fn config() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/logs")
                .route("/analyze-text", web::post().to(handlers::analyze_text))
                .route("/analyze-file", web::post().to(handlers::analyze_file)),
        )
}
