//! In-memory store doubles for driving the HTTP layer without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use campus_api::{
    EntityDef, EntityService, EntityState, EntityStore, OpContext, Pagination, Person, RequestPolicy,
    SearchResult, SortBy, SortColumn, SortDirection, StoreError,
};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

pub struct MemoryStore {
    entity: EntityDef,
    rows: Mutex<Vec<Person>>,
}

impl MemoryStore {
    pub fn new(entity: EntityDef, rows: Vec<Person>) -> Arc<Self> {
        Arc::new(MemoryStore {
            entity,
            rows: Mutex::new(rows),
        })
    }

    pub fn rows(&self) -> Vec<Person> {
        self.rows.lock().unwrap().clone()
    }
}

fn compare(a: &Person, b: &Person, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::FirstName => a.first_name.cmp(&b.first_name),
        SortColumn::LastName => a.last_name.cmp(&b.last_name),
        SortColumn::Year => a.year.cmp(&b.year),
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn entity(&self) -> &EntityDef {
        &self.entity
    }

    async fn list_all(&self, ctx: &OpContext) -> Result<Vec<Person>, StoreError> {
        ctx.run(async { Ok(self.rows()) }).await
    }

    async fn get(&self, ctx: &OpContext, id: i64) -> Result<Person, StoreError> {
        ctx.run(async {
            self.rows()
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::not_found(self.entity.name, id))
        })
        .await
    }

    async fn create(&self, ctx: &OpContext, person: Person) -> Result<Person, StoreError> {
        ctx.run(async {
            let mut rows = self.rows.lock().unwrap();
            let next = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let created = person.with_id(next);
            rows.push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn update(&self, ctx: &OpContext, person: Person) -> Result<Person, StoreError> {
        ctx.run(async {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|p| p.id == person.id) {
                *row = person.clone();
            }
            Ok(person)
        })
        .await
    }

    async fn delete(&self, ctx: &OpContext, id: i64) -> Result<Person, StoreError> {
        ctx.run(async {
            self.rows.lock().unwrap().retain(|p| p.id != id);
            Ok(Person::default())
        })
        .await
    }

    async fn search(
        &self,
        ctx: &OpContext,
        search: &str,
        pagination: Pagination,
        sort_by: SortBy,
    ) -> Result<SearchResult, StoreError> {
        ctx.run(async {
            let needle = search.to_lowercase();
            let mut hits: Vec<Person> = self
                .rows()
                .into_iter()
                .filter(|p| {
                    p.first_name.to_lowercase().contains(&needle)
                        || p.last_name.to_lowercase().contains(&needle)
                })
                .collect();
            hits.sort_by(|a, b| {
                let primary = match sort_by.direction {
                    SortDirection::Asc => compare(a, b, sort_by.column),
                    SortDirection::Desc => compare(b, a, sort_by.column),
                };
                primary.then(a.id.cmp(&b.id))
            });
            let total_elements = hits.len() as i64;
            let data = hits
                .into_iter()
                .skip(pagination.offset().max(0) as usize)
                .take(pagination.limit().max(0) as usize)
                .collect();
            Ok(SearchResult { total_elements, data })
        })
        .await
    }
}

/// Every call fails as if the pool were exhausted.
pub struct FailingStore(pub EntityDef);

impl FailingStore {
    fn err() -> StoreError {
        StoreError::Db(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl EntityStore for FailingStore {
    fn entity(&self) -> &EntityDef {
        &self.0
    }

    async fn list_all(&self, _ctx: &OpContext) -> Result<Vec<Person>, StoreError> {
        Err(Self::err())
    }

    async fn get(&self, _ctx: &OpContext, _id: i64) -> Result<Person, StoreError> {
        Err(Self::err())
    }

    async fn create(&self, _ctx: &OpContext, _person: Person) -> Result<Person, StoreError> {
        Err(Self::err())
    }

    async fn update(&self, _ctx: &OpContext, _person: Person) -> Result<Person, StoreError> {
        Err(Self::err())
    }

    async fn delete(&self, _ctx: &OpContext, _id: i64) -> Result<Person, StoreError> {
        Err(Self::err())
    }

    async fn search(
        &self,
        _ctx: &OpContext,
        _search: &str,
        _pagination: Pagination,
        _sort_by: SortBy,
    ) -> Result<SearchResult, StoreError> {
        Err(Self::err())
    }
}

/// Every call waits until its context is cancelled or times out.
pub struct HangingStore(pub EntityDef);

async fn hang<T>(ctx: &OpContext) -> Result<T, StoreError> {
    ctx.run(std::future::pending()).await
}

#[async_trait]
impl EntityStore for HangingStore {
    fn entity(&self) -> &EntityDef {
        &self.0
    }

    async fn list_all(&self, ctx: &OpContext) -> Result<Vec<Person>, StoreError> {
        hang(ctx).await
    }

    async fn get(&self, ctx: &OpContext, _id: i64) -> Result<Person, StoreError> {
        hang(ctx).await
    }

    async fn create(&self, ctx: &OpContext, _person: Person) -> Result<Person, StoreError> {
        hang(ctx).await
    }

    async fn update(&self, ctx: &OpContext, _person: Person) -> Result<Person, StoreError> {
        hang(ctx).await
    }

    async fn delete(&self, ctx: &OpContext, _id: i64) -> Result<Person, StoreError> {
        hang(ctx).await
    }

    async fn search(
        &self,
        ctx: &OpContext,
        _search: &str,
        _pagination: Pagination,
        _sort_by: SortBy,
    ) -> Result<SearchResult, StoreError> {
        hang(ctx).await
    }
}

pub fn state_for(store: Arc<dyn EntityStore>) -> EntityState {
    EntityState::new(EntityService::new(store), RequestPolicy::default())
}

pub fn racers() -> Vec<Person> {
    vec![
        Person::new("Charles", "Leclerc", 3).with_id(1),
        Person::new("Carlos", "Sainz", 1).with_id(2),
    ]
}
