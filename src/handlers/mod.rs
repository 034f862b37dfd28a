//! HTTP handlers for person CRUD and search.

pub mod entity;
pub use entity::*;
