use actix_cors::Cors;
use actix_multipart::MultipartError;
use actix_multipart::form::MultipartFormConfig;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod catalog;
pub mod chat;
pub mod recipes;
pub mod stats;

/// Register every endpoint on `cfg`, with extractor failures reported in the
/// same JSON shape as service errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(MultipartFormConfig::default().error_handler(multipart_error_handler))
        .service(catalog::upload_data)
        .service(catalog::show_products)
        .service(chat::chat)
        .service(recipes::download_recipe)
        .service(stats::show_stats);
}

/// CORS policy for browser clients served from `allowed_origin`.
pub fn cors(allowed_origin: &str) -> Cors {
    let cors = if allowed_origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(allowed_origin)
    };
    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(
        "read chat request",
        &ServiceError::Validation(err.to_string()),
    );
    InternalError::from_response(err, response).into()
}

fn multipart_error_handler(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(
        "read catalog upload",
        &ServiceError::Validation(err.to_string()),
    );
    InternalError::from_response(err, response).into()
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

/// Map a service failure to a JSON `{"detail": ...}` response.
pub(crate) fn error_response(action: &str, err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            log::warn!("Failed to {action}: {err}");
            HttpResponse::BadRequest().json(ErrorBody { detail: message })
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody {
            detail: "Not found",
        }),
        ServiceError::Provider(_) | ServiceError::MalformedResponse(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::BadGateway().json(ErrorBody {
                detail: &err.to_string(),
            })
        }
        ServiceError::Internal(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody {
                detail: "Internal server error",
            })
        }
    }
}
