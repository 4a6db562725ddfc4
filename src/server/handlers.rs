use actix_files::NamedFile;
use actix_web::{
    dev::{ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse,
};
use serde_json::{json, Value};
use std::path::Path;
use uuid::Uuid;

use super::ProxyState;
use crate::logger;

pub const MISSING_KEY_ERROR: &str = "API key not configured";
pub const UPSTREAM_FAILURE_ERROR: &str = "Failed to generate image";

pub async fn health(state: web::Data<ProxyState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": state.upstream.name(),
        "configured": state.upstream.is_configured(),
        "uptime_ms": state.started_at.elapsed().as_millis() as u64,
    }))
}

/// Forwards the body untouched and mirrors whatever comes back.
pub async fn generate(state: web::Data<ProxyState>, body: web::Json<Value>) -> HttpResponse {
    let request_id = Uuid::new_v4();

    if !state.upstream.is_configured() {
        log::error!("[{}] rejected: {}", request_id, MISSING_KEY_ERROR);
        return HttpResponse::InternalServerError().json(json!({ "error": MISSING_KEY_ERROR }));
    }

    let payload = body.into_inner();
    let timer = logger::timer(&format!("[{}] {} request", request_id, state.upstream.name()));

    match state.upstream.send(&payload).await {
        Ok(response) => {
            let elapsed = timer.stop();
            log::info!(
                "[{}] upstream answered {} after {}ms",
                request_id,
                response.status,
                elapsed.as_millis()
            );
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(response.body)
        }
        Err(e) => {
            log::error!("[{}] upstream call failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(json!({ "error": UPSTREAM_FAILURE_ERROR }))
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let message = err.to_string();
    log::warn!("Rejected {} body: {}", req.path(), message);
    InternalError::from_response(err, HttpResponse::build(status).json(json!({ "error": message })))
        .into()
}

/// Unknown paths get `index.html` so client-side routes survive a reload.
pub async fn spa_index(index: &Path, req: ServiceRequest) -> actix_web::Result<ServiceResponse> {
    let (req, _) = req.into_parts();
    let file = NamedFile::open_async(index).await?;
    let res = file.into_response(&req);
    Ok(ServiceResponse::new(req, res))
}
