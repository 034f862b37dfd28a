//! Entity store contract and the per-call operation context.

mod postgres;

pub use postgres::PgEntityStore;

use crate::entity::EntityDef;
use crate::error::StoreError;
use crate::model::{Pagination, Person, SearchResult, SortBy};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation token and optional deadline carried into every store call.
///
/// A default context never cancels and has no deadline, so the wrapped
/// operation behaves exactly like the bare query.
#[derive(Clone, Debug, Default)]
pub struct OpContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl OpContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the token fires or the deadline passes first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(StoreError::Cancelled),
                res = fut => res,
            }
        };
        match self.deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, guarded).await {
                Ok(res) => res,
                Err(_) => Err(StoreError::DeadlineExceeded),
            },
            None => guarded.await,
        }
    }
}

/// Durable CRUD and search for one entity table.
///
/// Each method performs a single database round trip. `update` and `delete`
/// succeed even when no row matches the id.
#[async_trait]
pub trait EntityStore: Send + Sync {
    fn entity(&self) -> &EntityDef;

    /// Every row, in unspecified order.
    async fn list_all(&self, ctx: &OpContext) -> Result<Vec<Person>, StoreError>;

    /// One row by id; `StoreError::NotFound` when absent.
    async fn get(&self, ctx: &OpContext, id: i64) -> Result<Person, StoreError>;

    /// Insert ignoring `person.id`; returns the input with the assigned id.
    async fn create(&self, ctx: &OpContext, person: Person) -> Result<Person, StoreError>;

    /// Overwrite every field of the row with `person.id`; returns the input as given.
    async fn update(&self, ctx: &OpContext, person: Person) -> Result<Person, StoreError>;

    /// Remove the row; returns an empty record, not the deleted data.
    async fn delete(&self, ctx: &OpContext, id: i64) -> Result<Person, StoreError>;

    async fn search(
        &self,
        ctx: &OpContext,
        search: &str,
        pagination: Pagination,
        sort_by: SortBy,
    ) -> Result<SearchResult, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_context_runs_to_completion() {
        let ctx = OpContext::new();
        let out = ctx.run(async { Ok::<_, StoreError>(5) }).await.unwrap();
        assert_eq!(out, 5);
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = OpContext::new().with_cancel(token);
        let res = ctx.run(async { Ok::<_, StoreError>(()) }).await;
        assert!(matches!(res, Err(StoreError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_while_pending() {
        let token = CancellationToken::new();
        let ctx = OpContext::new().with_cancel(token.clone());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });
        let res = ctx.run(std::future::pending::<Result<(), StoreError>>()).await;
        assert!(matches!(res, Err(StoreError::Cancelled)));
    }

    #[tokio::test]
    async fn deadline_expires() {
        let ctx = OpContext::new().with_timeout(Duration::from_millis(20));
        let res = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, StoreError>(())
            })
            .await;
        assert!(matches!(res, Err(StoreError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn inner_errors_pass_through() {
        let ctx = OpContext::new().with_timeout(Duration::from_secs(5));
        let res = ctx
            .run(async { Err::<(), _>(StoreError::not_found("student", 3)) })
            .await;
        assert!(matches!(res, Err(StoreError::NotFound { id: 3, .. })));
    }
}
