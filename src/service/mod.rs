//! EntityService: the layer between handlers and stores.

mod crud;
pub use crud::EntityService;
