//! Router assembly: one router per entity plus the operational routes.

mod common;
mod entity;

pub use common::{common_routes, common_routes_with_ready};
pub use entity::entity_routes;

use crate::entity::ALL;
use crate::service::EntityService;
use crate::state::{AppState, EntityState, RequestPolicy};
use crate::store::PgEntityStore;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Request bodies above this size fail extraction and get the operation's error envelope.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Wraps `router` in the standard layers: request tracing and the body size limit.
/// Timeouts are carried by each request's `OpContext` instead of a layer.
pub fn with_layers(router: Router) -> Router {
    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}

/// Full application: student and lecturer routers backed by `state.pool`, the
/// operational routes, and the standard layers.
pub fn app_router(state: AppState, policy: RequestPolicy) -> Router {
    let mut router = common_routes_with_ready(state.clone());
    for def in ALL.iter() {
        let store = Arc::new(PgEntityStore::new(state.pool.clone(), *def));
        let entity_state = EntityState::new(EntityService::new(store), policy.clone());
        router = router.merge(entity_routes(def, entity_state));
    }
    with_layers(router)
}
