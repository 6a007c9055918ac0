use actix_web::{HttpResponse, Responder, post, web};

use crate::ai::AiProviders;
use crate::forms::chat::ChatRequest;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::chat as chat_service;

#[post("/chat")]
/// Generate, store and return a recipe for the user's request.
pub async fn chat(
    repo: web::Data<DieselRepository>,
    providers: web::Data<AiProviders>,
    request: web::Json<ChatRequest>,
) -> impl Responder {
    match chat_service::generate_recipe(repo.get_ref(), providers.get_ref(), request.into_inner())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response("generate recipe", &err),
    }
}
