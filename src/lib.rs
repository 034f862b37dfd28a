//! Campus API: student and lecturer records over HTTP, stored in PostgreSQL.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, DbConfig, Network};
pub use entity::{EntityDef, LECTURERS, STUDENTS};
pub use error::{AppError, ConfigError, ServerError, ServiceError, StoreError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use model::{Pagination, Person, SearchRequest, SearchResult, SortBy, SortColumn, SortDirection};
pub use routes::{app_router, common_routes, common_routes_with_ready, entity_routes, with_layers};
pub use server::{run_until, serve, wait_for_shutdown};
pub use service::EntityService;
pub use state::{AppState, EntityState, RequestPolicy};
pub use store::{EntityStore, OpContext, PgEntityStore};
