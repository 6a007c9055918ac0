//! Chat turn workflow: prompt the selected provider, validate its answer and
//! store the resulting recipe.

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::ai::AiProviders;
use crate::ai::prompt::build_prompt;
use crate::domain::catalog::SampleLimits;
use crate::domain::chat_session::NewChatSession;
use crate::domain::recipe::{GeneratedRecipe, NewRecipeLine, ProductMatch};
use crate::forms::chat::ChatRequest;
use crate::repository::{CatalogReader, ChatSessionWriter, RecipeWriter};
use crate::services::{ServiceError, ServiceResult};

/// A stored generation as returned to the client.
#[derive(Debug, Serialize)]
pub struct RecipeResult {
    pub product: ProductMatch,
    pub recipe: Vec<NewRecipeLine>,
    pub total_materials: usize,
    pub total_processes: usize,
    pub generation_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub recipe: RecipeResult,
    pub session_id: String,
}

/// Identifies the chat turn a provider response belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ChatTurn<'a> {
    pub session_id: &'a str,
    pub user_message: &'a str,
    /// Product code used when the provider leaves `product_code` blank.
    pub product_code_fallback: Option<&'a str>,
}

/// Validate `raw_text` as a recipe document and store it.
///
/// Malformed text writes nothing. A document that parses but fails
/// validation is recorded as a rejected chat turn. A valid recipe is stored
/// under a fresh generation id together with its chat turn.
pub fn parse_and_persist<R>(
    repo: &R,
    raw_text: &str,
    turn: &ChatTurn<'_>,
) -> ServiceResult<RecipeResult>
where
    R: RecipeWriter + ChatSessionWriter + ?Sized,
{
    let recipe = match GeneratedRecipe::parse(raw_text, turn.product_code_fallback) {
        Ok(recipe) => recipe,
        Err(err) if err.is_malformed() => {
            log::warn!("Discarding malformed provider response: {err}");
            return Err(err.into());
        }
        Err(err) => {
            let reason = err.to_string();
            let rejected = NewChatSession::rejected(turn.session_id, turn.user_message, &reason);
            if let Err(audit_err) = repo.create_chat_session(&rejected) {
                log::error!("Failed to record rejected chat turn: {audit_err}");
            }
            log::warn!("Rejected generated recipe: {reason}");
            return Err(err.into());
        }
    };

    for anomaly in recipe.sequence_anomalies() {
        log::warn!(
            "Recipe for {}: {anomaly}",
            recipe.product_match.product_code
        );
    }

    let generation_id = Uuid::new_v4().to_string();
    let lines = recipe.to_new_lines(&generation_id);
    let session = NewChatSession::generated(
        turn.session_id,
        turn.user_message,
        &recipe.product_match.product_name,
    );

    let stored = repo.save_generation(&lines, &session)?;
    log::info!(
        "Stored {stored} recipe lines for {} (generation {generation_id})",
        recipe.product_match.product_code
    );

    Ok(RecipeResult {
        total_materials: recipe.total_materials(),
        total_processes: recipe.total_processes(),
        product: recipe.product_match,
        recipe: lines,
        generation_id,
    })
}

/// Run one chat turn end to end.
pub async fn generate_recipe<R>(
    repo: &R,
    providers: &AiProviders,
    request: ChatRequest,
) -> ServiceResult<ChatResponse>
where
    R: CatalogReader + RecipeWriter + ChatSessionWriter + ?Sized,
{
    request.validate()?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ServiceError::Validation(
            "message must not be blank".to_string(),
        ));
    }

    let session_id = request
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_session_id);

    let counts = repo.count_catalog()?;
    let sample = repo.sample_catalog(SampleLimits::default())?;
    let prompt = build_prompt(message, &counts, &sample)
        .map_err(|err| ServiceError::Internal(err.to_string()))?;

    let provider = providers.get(request.provider);
    log::info!(
        "Requesting recipe from {} ({}) for session {session_id}",
        provider.provider_name(),
        provider.model_name()
    );
    let raw_text = provider.generate(&prompt).await?;

    let turn = ChatTurn {
        session_id: &session_id,
        user_message: message,
        product_code_fallback: request.product_code.as_deref(),
    };
    let recipe = parse_and_persist(repo, &raw_text, &turn)?;

    let response = format!(
        "I've generated a complete manufacturing recipe for **{}**. \
         The recipe includes {} materials and {} processes. \
         You can download it as CSV using the download button.",
        recipe.product.product_name, recipe.total_materials, recipe.total_processes
    );

    Ok(ChatResponse {
        response,
        recipe,
        session_id,
    })
}

fn new_session_id() -> String {
    format!("session_{}", Uuid::new_v4())
}
