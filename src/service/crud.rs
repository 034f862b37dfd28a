//! Pass-through service over an entity store.

use crate::entity::EntityDef;
use crate::error::{ServiceError, StoreError};
use crate::model::{Pagination, Person, SearchResult, SortBy};
use crate::store::{EntityStore, OpContext};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Seam between the HTTP layer and a store. Holds no state of its own; the
/// store behind it can be swapped for a test double.
#[derive(Clone)]
pub struct EntityService {
    store: Arc<dyn EntityStore>,
}

impl EntityService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        EntityService { store }
    }

    pub fn entity(&self) -> &EntityDef {
        self.store.entity()
    }

    #[instrument(name = "service.list_all", skip_all, fields(entity = self.entity().name))]
    pub async fn list_all(&self, ctx: &OpContext) -> Result<Vec<Person>, ServiceError> {
        self.store.list_all(ctx).await.map_err(|e| self.failed("list_all", e))
    }

    #[instrument(name = "service.get", skip_all, fields(entity = self.entity().name, id = id))]
    pub async fn get(&self, ctx: &OpContext, id: i64) -> Result<Person, ServiceError> {
        self.store.get(ctx, id).await.map_err(|e| self.failed("get", e))
    }

    #[instrument(name = "service.create", skip_all, fields(entity = self.entity().name))]
    pub async fn create(&self, ctx: &OpContext, person: Person) -> Result<Person, ServiceError> {
        self.store.create(ctx, person).await.map_err(|e| self.failed("create", e))
    }

    #[instrument(name = "service.update", skip_all, fields(entity = self.entity().name, id = person.id))]
    pub async fn update(&self, ctx: &OpContext, person: Person) -> Result<Person, ServiceError> {
        self.store.update(ctx, person).await.map_err(|e| self.failed("update", e))
    }

    #[instrument(name = "service.delete", skip_all, fields(entity = self.entity().name, id = id))]
    pub async fn delete(&self, ctx: &OpContext, id: i64) -> Result<Person, ServiceError> {
        self.store.delete(ctx, id).await.map_err(|e| self.failed("delete", e))
    }

    #[instrument(name = "service.search", skip_all, fields(entity = self.entity().name))]
    pub async fn search(
        &self,
        ctx: &OpContext,
        search: &str,
        pagination: Pagination,
        sort_by: SortBy,
    ) -> Result<SearchResult, ServiceError> {
        self.store
            .search(ctx, search, pagination, sort_by)
            .await
            .map_err(|e| self.failed("search", e))
    }

    fn failed(&self, op: &'static str, e: StoreError) -> ServiceError {
        debug!(entity = self.entity().name, op, error = %e, "store call failed");
        e.into()
    }
}
