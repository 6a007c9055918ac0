use diesel::prelude::*;

use crate::{
    domain::chat_session::NewChatSession,
    domain::recipe::{NewRecipeLine, RecipeLine},
    models::chat_session::NewChatSession as DbNewChatSession,
    models::recipe::{NewRecipeLine as DbNewRecipeLine, RecipeLine as DbRecipeLine},
    repository::{DieselRepository, RecipeReader, RecipeWriter, RepositoryError, RepositoryResult},
};

impl RecipeReader for DieselRepository {
    fn list_latest_recipe(&self, product_code: &str) -> RepositoryResult<Vec<RecipeLine>> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let latest_generation = recipes::table
            .filter(recipes::product_code.eq(product_code))
            .order(recipes::id.desc())
            .select(recipes::generation_id)
            .first::<String>(&mut conn)
            .optional()?;

        let Some(generation_id) = latest_generation else {
            return Ok(Vec::new());
        };

        let rows = recipes::table
            .filter(recipes::product_code.eq(product_code))
            .filter(recipes::generation_id.eq(generation_id.as_str()))
            .order((recipes::sequence.asc(), recipes::id.asc()))
            .load::<DbRecipeLine>(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                RecipeLine::try_from(row).map_err(|err| RepositoryError::InvalidData(err.to_string()))
            })
            .collect()
    }
}

impl RecipeWriter for DieselRepository {
    fn save_generation(
        &self,
        lines: &[NewRecipeLine],
        session: &NewChatSession,
    ) -> RepositoryResult<usize> {
        use crate::schema::{chat_sessions, recipes};

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut count_inserted: usize = 0;

            for line in lines {
                let db_new: DbNewRecipeLine = line.into();
                diesel::insert_into(recipes::table)
                    .values(&db_new)
                    .execute(conn)?;
                count_inserted += 1;
            }

            let db_session: DbNewChatSession = session.into();
            diesel::insert_into(chat_sessions::table)
                .values(&db_session)
                .execute(conn)?;

            Ok(count_inserted)
        })
    }
}
