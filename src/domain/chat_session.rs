use chrono::NaiveDateTime;
use serde::Serialize;

/// Audit record of one chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    pub id: i32,
    /// Conversation identifier shared by every turn of one session.
    pub session_id: String,
    pub user_message: String,
    /// Short summary of the outcome.
    pub ai_response: String,
    pub recipe_generated: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChatSession {
    pub session_id: String,
    pub user_message: String,
    pub ai_response: String,
    pub recipe_generated: bool,
}

impl NewChatSession {
    /// Record a turn that produced and persisted a recipe.
    pub fn generated(
        session_id: impl Into<String>,
        user_message: impl Into<String>,
        product_name: &str,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_message: user_message.into(),
            ai_response: format!("Generated recipe for {product_name}"),
            recipe_generated: true,
        }
    }

    /// Record a turn whose provider output was rejected.
    pub fn rejected(
        session_id: impl Into<String>,
        user_message: impl Into<String>,
        reason: &str,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_message: user_message.into(),
            ai_response: format!("Recipe rejected: {reason}"),
            recipe_generated: false,
        }
    }
}
