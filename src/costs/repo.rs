use anyhow::Context;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    costs::repo_types::{Cost, CostRow, NewCost},
    db::PgStore,
    store::CostStore,
};

#[async_trait]
impl CostStore for PgStore {
    async fn insert(&self, cost: NewCost) -> anyhow::Result<Cost> {
        let row = sqlx::query_as::<_, CostRow>(
            r#"
            INSERT INTO costs (id, userid, description, category, amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, userid, description, category, amount, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(cost.userid)
        .bind(&cost.description)
        .bind(cost.category.as_str())
        .bind(cost.sum)
        .bind(cost.created_at)
        .fetch_one(&self.pool)
        .await
        .context("insert cost")?;

        Ok(Cost::try_from(row)?)
    }

    async fn list_between(
        &self,
        userid: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> anyhow::Result<Vec<Cost>> {
        let rows = sqlx::query_as::<_, CostRow>(
            r#"
            SELECT id, userid, description, category, amount, created_at
            FROM costs
            WHERE userid = $1 AND created_at >= $2 AND created_at < $3
            "#,
        )
        .bind(userid)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .context("list costs in range")?;

        rows.into_iter()
            .map(|r| Cost::try_from(r).map_err(anyhow::Error::from))
            .collect()
    }

    async fn total_for_user(&self, userid: i64) -> anyhow::Result<f64> {
        let total = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION
            FROM costs
            WHERE userid = $1
            "#,
        )
        .bind(userid)
        .fetch_one(&self.pool)
        .await
        .context("sum costs for user")?;

        Ok(total)
    }
}
