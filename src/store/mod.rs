use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    costs::repo_types::{Cost, NewCost},
    users::repo_types::User,
};

#[cfg(test)]
mod memory;

#[cfg(test)]
pub use memory::MemoryStore;

/// Resolves user ids to profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
}

/// Create and query cost records.
#[async_trait]
pub trait CostStore: Send + Sync {
    /// Persists a cost and returns it with its store-assigned id.
    async fn insert(&self, cost: NewCost) -> anyhow::Result<Cost>;

    /// Costs of `userid` with `start <= created_at < end`.
    async fn list_between(
        &self,
        userid: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> anyhow::Result<Vec<Cost>>;

    /// Sum of every cost of `userid`, 0 when there are none.
    async fn total_for_user(&self, userid: i64) -> anyhow::Result<f64>;
}
