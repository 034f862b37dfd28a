//! Shared state for routes. Services are built once at startup and injected here.

use crate::service::EntityService;
use crate::store::OpContext;
use sqlx::PgPool;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-request knobs shared by every entity router.
#[derive(Clone, Debug, Default)]
pub struct RequestPolicy {
    /// Fired when graceful shutdown gives up waiting; aborts outstanding database work.
    pub abort: CancellationToken,
    /// Deadline applied to each store call, if any.
    pub statement_timeout: Option<Duration>,
    /// Overall bound on a request. Each request makes one store call, so this
    /// also lands on the `OpContext`; the shorter of the two wins.
    pub request_timeout: Option<Duration>,
}

impl RequestPolicy {
    pub fn op_context(&self) -> OpContext {
        let ctx = OpContext::new().with_cancel(self.abort.child_token());
        match self.effective_timeout() {
            Some(t) => ctx.with_timeout(t),
            None => ctx,
        }
    }

    fn effective_timeout(&self) -> Option<Duration> {
        match (self.statement_timeout, self.request_timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// State of one entity's router.
#[derive(Clone)]
pub struct EntityState {
    pub service: EntityService,
    pub policy: RequestPolicy,
}

impl EntityState {
    pub fn new(service: EntityService, policy: RequestPolicy) -> Self {
        EntityState { service, policy }
    }
}

/// State of the operational routes.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
