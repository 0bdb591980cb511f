use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    crud::{
        crud_create_match, crud_delete_match, crud_get_match, crud_get_matches,
        crud_increment_stat, crud_set_extra_time, crud_update_match,
    },
    model::MatchModel,
    schema::{CreateMatchSchema, Stat, UpdateMatchSchema},
};

/// Everything the handlers need from persistent storage.
///
/// Mutations report how many rows they touched; every call must be atomic on its own,
/// since no locking happens above this trait.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn list_matches(&self) -> Result<Vec<MatchModel>>;

    async fn create_match(&self, new: &CreateMatchSchema) -> Result<MatchModel>;

    async fn get_match(&self, id: i32) -> Result<Option<MatchModel>>;

    async fn update_match(&self, id: i32, m: &UpdateMatchSchema) -> Result<u64>;

    async fn delete_match(&self, id: i32) -> Result<u64>;

    async fn increment_stat(&self, id: i32, stat: Stat) -> Result<u64>;

    async fn set_extra_time(&self, id: i32, extra_time: &str) -> Result<u64>;
}

#[async_trait]
impl MatchStore for Pool<Postgres> {
    async fn list_matches(&self) -> Result<Vec<MatchModel>> {
        crud_get_matches(self).await
    }

    async fn create_match(&self, new: &CreateMatchSchema) -> Result<MatchModel> {
        crud_create_match(self, new).await
    }

    async fn get_match(&self, id: i32) -> Result<Option<MatchModel>> {
        crud_get_match(self, id).await
    }

    async fn update_match(&self, id: i32, m: &UpdateMatchSchema) -> Result<u64> {
        crud_update_match(self, id, m).await
    }

    async fn delete_match(&self, id: i32) -> Result<u64> {
        crud_delete_match(self, id).await
    }

    async fn increment_stat(&self, id: i32, stat: Stat) -> Result<u64> {
        crud_increment_stat(self, id, stat).await
    }

    async fn set_extra_time(&self, id: i32, extra_time: &str) -> Result<u64> {
        crud_set_extra_time(self, id, extra_time).await
    }
}
