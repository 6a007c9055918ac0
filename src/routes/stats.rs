use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::stats;

#[get("/stats")]
pub async fn show_stats(repo: web::Data<DieselRepository>) -> impl Responder {
    match stats::load_stats(repo.get_ref()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response("load stats", &err),
    }
}
