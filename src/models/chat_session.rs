use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::chat_session::{
    ChatSession as DomainChatSession, NewChatSession as DomainNewChatSession,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::chat_sessions)]
pub struct ChatSession {
    pub id: i32,
    pub session_id: String,
    pub user_message: String,
    pub ai_response: String,
    pub recipe_generated: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_sessions)]
pub struct NewChatSession<'a> {
    pub session_id: &'a str,
    pub user_message: &'a str,
    pub ai_response: &'a str,
    pub recipe_generated: bool,
}

impl From<ChatSession> for DomainChatSession {
    fn from(value: ChatSession) -> Self {
        Self {
            id: value.id,
            session_id: value.session_id,
            user_message: value.user_message,
            ai_response: value.ai_response,
            recipe_generated: value.recipe_generated,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewChatSession> for NewChatSession<'a> {
    fn from(value: &'a DomainNewChatSession) -> Self {
        Self {
            session_id: value.session_id.as_str(),
            user_message: value.user_message.as_str(),
            ai_response: value.ai_response.as_str(),
            recipe_generated: value.recipe_generated,
        }
    }
}
