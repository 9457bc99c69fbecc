use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse};

use crate::error::RelayError;

pub mod chat;
pub mod health;
pub mod lab_reports;
pub mod sessions;

/// Register every relay route and the JSON extractor config
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(chat::relay_chat)
        .service(chat::chat_preflight)
        .service(sessions::get_session_messages)
        .service(lab_reports::submit_lab_report)
        .service(lab_reports::lab_report_preflight)
        .service(health::health_check)
        .service(health::version_info);
}

/// Malformed bodies are reported like any other invalid request
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| RelayError::InvalidRequest(err.to_string()).into())
}

/// Browsers call the relay straight from the portfolio site
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
}

pub(crate) fn preflight_response() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, "86400"))
        .finish()
}
