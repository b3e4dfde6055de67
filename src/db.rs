use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::AppConfig;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id             BIGINT PRIMARY KEY,
        first_name     TEXT NOT NULL,
        last_name      TEXT NOT NULL,
        birthday       DATE NOT NULL,
        marital_status TEXT NOT NULL DEFAULT 'single'
            CHECK (marital_status IN ('single', 'married', 'divorced', 'widowed'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS costs (
        id          UUID PRIMARY KEY,
        userid      BIGINT NOT NULL,
        description TEXT NOT NULL,
        category    TEXT NOT NULL
            CHECK (category IN ('food', 'health', 'housing', 'sport', 'education')),
        amount      DOUBLE PRECISION NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS costs_userid_created_at_idx
        ON costs (userid, created_at)
    "#,
];

/// Postgres-backed user and cost store.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    /// Creates the tables when they are missing. Existing tables are left alone.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .context("apply schema statement")?;
        }
        info!("database schema ready");
        Ok(())
    }
}
