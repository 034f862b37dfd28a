//! Typed errors for each layer: store, service, handler, config.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Failures raised by an entity store. `NotFound` is only produced by single-row reads.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("operation cancelled")]
    Cancelled,
    #[error("operation deadline exceeded")]
    DeadlineExceeded,
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            other => ServiceError::Store(other),
        }
    }
}

/// Handler-level failure. Every variant is reported to the client as HTTP 500
/// inside the error envelope; the variant only drives logging.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl AppError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Stable tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MalformedInput(_) => "malformed_input",
            AppError::Service(ServiceError::NotFound { .. }) => "not_found",
            AppError::Service(ServiceError::Store(StoreError::Cancelled)) => "cancelled",
            AppError::Service(ServiceError::Store(StoreError::DeadlineExceeded)) => "deadline_exceeded",
            AppError::Service(ServiceError::Store(_)) => "store_error",
        }
    }
}

/// Failures that stop the server from starting or running.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("server task: {0}")]
    Join(#[from] tokio::task::JoinError),
}
