use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::recipes;

#[get("/recipe/{product_code}/download")]
/// Latest recipe generated for a product as a CSV attachment.
pub async fn download_recipe(
    product_code: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match recipes::export_recipe(repo.get_ref(), &product_code) {
        Ok(export) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(export.filename)],
            })
            .body(export.bytes),
        Err(err) => error_response("export recipe", &err),
    }
}
