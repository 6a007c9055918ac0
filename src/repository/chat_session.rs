use diesel::prelude::*;

use crate::{
    domain::chat_session::{ChatSession, NewChatSession},
    models::chat_session::{ChatSession as DbChatSession, NewChatSession as DbNewChatSession},
    repository::{ChatSessionReader, ChatSessionWriter, DieselRepository, RepositoryResult},
};

impl ChatSessionReader for DieselRepository {
    fn list_chat_sessions(&self, session_id: &str) -> RepositoryResult<Vec<ChatSession>> {
        use crate::schema::chat_sessions;

        let mut conn = self.conn()?;
        let rows = chat_sessions::table
            .filter(chat_sessions::session_id.eq(session_id))
            .order(chat_sessions::id.asc())
            .load::<DbChatSession>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ChatSessionWriter for DieselRepository {
    fn create_chat_session(&self, session: &NewChatSession) -> RepositoryResult<()> {
        use crate::schema::chat_sessions;

        let mut conn = self.conn()?;
        let db_new: DbNewChatSession = session.into();

        diesel::insert_into(chat_sessions::table)
            .values(&db_new)
            .execute(&mut conn)?;

        Ok(())
    }
}
