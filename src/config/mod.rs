//! Configuration: environment variables parsed into `AppConfig`.

pub mod types;
pub mod loader;
pub mod validator;

pub use types::*;
