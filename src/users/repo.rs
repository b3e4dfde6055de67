use anyhow::Context;
use async_trait::async_trait;

use crate::{
    db::PgStore,
    store::UserStore,
    users::repo_types::{User, UserRow},
};

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, birthday, marital_status
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("select user by id")?;

        row.map(User::try_from).transpose()
    }
}
