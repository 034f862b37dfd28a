//! Per-entity routes. Each entity gets its own router and state, mounted under
//! its path prefix; the prefix answers with or without a trailing slash.

use crate::entity::EntityDef;
use crate::handlers::entity::{create, delete as delete_handler, list, read, search, update};
use crate::state::EntityState;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn entity_routes(def: &EntityDef, state: EntityState) -> Router {
    let prefix = def.path_prefix;
    Router::new()
        .route(&format!("{prefix}/"), get(list).post(create).put(update))
        .route(prefix, get(list).post(create).put(update))
        .route(&format!("{prefix}{}", def.read_route()), get(read))
        .route(&format!("{prefix}/search"), get(search))
        .route(&format!("{prefix}/:id"), delete(delete_handler))
        .with_state(state)
}
