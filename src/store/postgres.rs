//! PostgreSQL-backed entity store.

use super::{EntityStore, OpContext};
use crate::entity::EntityDef;
use crate::error::StoreError;
use crate::model::{Pagination, Person, SearchResult, SortBy};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgPool, Postgres};

/// Search row: the record plus the windowed count of all matches, selected
/// as `total_count` by `sql::search`.
#[derive(FromRow)]
struct SearchRow {
    #[sqlx(flatten)]
    person: Person,
    total_count: i64,
}

#[derive(Clone)]
pub struct PgEntityStore {
    pool: PgPool,
    entity: EntityDef,
}

impl PgEntityStore {
    pub fn new(pool: PgPool, entity: EntityDef) -> Self {
        PgEntityStore { pool, entity }
    }

    fn bound(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
    }

    fn bound_as<O>(q: &QueryBuf) -> QueryAs<'_, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, O>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    fn entity(&self) -> &EntityDef {
        &self.entity
    }

    async fn list_all(&self, ctx: &OpContext) -> Result<Vec<Person>, StoreError> {
        let q = sql::select_all(&self.entity);
        let rows = ctx
            .run(async {
                Ok::<_, StoreError>(Self::bound_as::<Person>(&q).fetch_all(&self.pool).await?)
            })
            .await?;
        tracing::debug!(entity = self.entity.name, count = rows.len(), "list_all");
        Ok(rows)
    }

    async fn get(&self, ctx: &OpContext, id: i64) -> Result<Person, StoreError> {
        let q = sql::select_by_id(&self.entity, id);
        let row = ctx
            .run(async {
                Ok::<_, StoreError>(Self::bound_as::<Person>(&q).fetch_optional(&self.pool).await?)
            })
            .await?;
        row.ok_or_else(|| StoreError::not_found(self.entity.name, id))
    }

    async fn create(&self, ctx: &OpContext, mut person: Person) -> Result<Person, StoreError> {
        let q = sql::insert(&self.entity, &person);
        let (id,) = ctx
            .run(async {
                Ok::<_, StoreError>(Self::bound_as::<(i64,)>(&q).fetch_one(&self.pool).await?)
            })
            .await?;
        person.id = id;
        tracing::debug!(entity = self.entity.name, id, "created");
        Ok(person)
    }

    async fn update(&self, ctx: &OpContext, person: Person) -> Result<Person, StoreError> {
        let q = sql::update(&self.entity, &person);
        let done = ctx
            .run(async {
                Ok::<_, StoreError>(Self::bound(&q).execute(&self.pool).await?)
            })
            .await?;
        if done.rows_affected() == 0 {
            tracing::debug!(entity = self.entity.name, id = person.id, "update matched no rows");
        }
        Ok(person)
    }

    async fn delete(&self, ctx: &OpContext, id: i64) -> Result<Person, StoreError> {
        let q = sql::delete(&self.entity, id);
        let done = ctx
            .run(async {
                Ok::<_, StoreError>(Self::bound(&q).execute(&self.pool).await?)
            })
            .await?;
        if done.rows_affected() == 0 {
            tracing::debug!(entity = self.entity.name, id, "delete matched no rows");
        }
        Ok(Person::default())
    }

    async fn search(
        &self,
        ctx: &OpContext,
        search: &str,
        pagination: Pagination,
        sort_by: SortBy,
    ) -> Result<SearchResult, StoreError> {
        let q = sql::search(&self.entity, search, &pagination, &sort_by);
        let rows = ctx
            .run(async {
                Ok::<_, StoreError>(Self::bound_as::<SearchRow>(&q).fetch_all(&self.pool).await?)
            })
            .await?;
        // No rows means no window to count over: report zero.
        let total_elements = rows.first().map(|r| r.total_count).unwrap_or(0);
        let data = rows.into_iter().map(|r| r.person).collect();
        Ok(SearchResult { total_elements, data })
    }
}
