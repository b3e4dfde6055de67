use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CostStore, UserStore};
use crate::{
    costs::repo_types::{Cost, NewCost},
    users::repo_types::User,
};

/// Process-local store. Costs keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<i64, User>>,
    costs: RwLock<Vec<Cost>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
            costs: RwLock::default(),
        }
    }

    pub async fn cost_count(&self) -> usize {
        self.costs.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl CostStore for MemoryStore {
    async fn insert(&self, cost: NewCost) -> anyhow::Result<Cost> {
        let cost = cost.into_cost(Uuid::new_v4());
        self.costs.write().await.push(cost.clone());
        Ok(cost)
    }

    async fn list_between(
        &self,
        userid: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> anyhow::Result<Vec<Cost>> {
        let costs = self.costs.read().await;
        Ok(costs
            .iter()
            .filter(|c| c.userid == userid && c.created_at >= start && c.created_at < end)
            .cloned()
            .collect())
    }

    async fn total_for_user(&self, userid: i64) -> anyhow::Result<f64> {
        let costs = self.costs.read().await;
        Ok(costs.iter().filter(|c| c.userid == userid).map(|c| c.sum).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::repo_types::Category;
    use time::macros::datetime;

    fn new_cost(userid: i64, sum: f64, at: OffsetDateTime) -> NewCost {
        NewCost {
            userid,
            description: "item".into(),
            category: Category::Sport,
            sum,
            created_at: at,
        }
    }

    #[tokio::test]
    async fn list_between_is_half_open() {
        let store = MemoryStore::new();
        let start = datetime!(2024-03-01 0:00 UTC);
        let end = datetime!(2024-04-01 0:00 UTC);
        store.insert(new_cost(1, 1.0, start)).await.unwrap();
        store.insert(new_cost(1, 2.0, end)).await.unwrap();
        store
            .insert(new_cost(1, 3.0, datetime!(2024-02-29 23:59:59 UTC)))
            .await
            .unwrap();
        store
            .insert(new_cost(2, 4.0, datetime!(2024-03-10 12:00 UTC)))
            .await
            .unwrap();

        let found = store.list_between(1, start, end).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sum, 1.0);
    }

    #[tokio::test]
    async fn total_ignores_other_users() {
        let store = MemoryStore::new();
        let at = datetime!(2023-07-04 10:00 UTC);
        store.insert(new_cost(7, 10.5, at)).await.unwrap();
        store.insert(new_cost(7, 4.5, at)).await.unwrap();
        store.insert(new_cost(8, 100.0, at)).await.unwrap();

        assert_eq!(store.total_for_user(7).await.unwrap(), 15.0);
        assert_eq!(store.total_for_user(9).await.unwrap(), 0.0);
    }
}
