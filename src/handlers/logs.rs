use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};
use futures_util::StreamExt;
use validator::Validate;

use crate::models::{ErrorResponse, LogAnalysisRequest, LogAnalysisResponse};
use crate::AppState;

pub async fn analyze_text(
    state: web::Data<AppState>,
    req: web::Json<LogAnalysisRequest>,
) -> Result<HttpResponse> {
    // Validate request
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let analysis = state.ai_service.analyze_log_text(&req.log_content).await;
    Ok(HttpResponse::Ok().json(analysis))
}

pub async fn analyze_file(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    // Read the uploaded file fully into memory before analysis
    let mut content = Vec::new();

    while let Some(field) = payload.next().await {
        let mut field = field?;
        if field.content_disposition().get_name() != Some("file") {
            continue;
        }

        while let Some(chunk) = field.next().await {
            content.extend_from_slice(&chunk?);
        }
        break;
    }

    if content.is_empty() {
        return Ok(
            HttpResponse::BadRequest().json(LogAnalysisResponse::degraded("Error: File is empty"))
        );
    }

    // Invalid UTF-8 sequences are replaced rather than rejected
    let text = String::from_utf8_lossy(&content);
    let analysis = state.ai_service.analyze_log_file(&text).await;
    Ok(HttpResponse::Ok().json(analysis))
}
