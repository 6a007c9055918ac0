use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::forms::upload::UploadCatalogForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::catalog;

#[post("/upload-data")]
/// Replace the whole catalog with the three uploaded CSV files.
pub async fn upload_data(
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadCatalogForm>,
) -> impl Responder {
    match catalog::upload_catalog(repo.get_ref(), &mut form) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => error_response("upload catalog", &err),
    }
}

#[get("/products")]
pub async fn show_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match catalog::list_products(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response("list products", &err),
    }
}
