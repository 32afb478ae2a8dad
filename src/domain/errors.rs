// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Notifier error: {0}")]
    Notifier(#[from] NotifierError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Admin session is not authenticated")]
    NotAuthenticated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Implement From for common error types
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Unknown(s)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Read error for '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Write error for '{key}': {message}")]
    Write { key: String, message: String },
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Checkout is not at the delivery details step")]
    WrongStep,

    #[error("Customer details are incomplete")]
    MissingCustomerDetails,

    #[error("No items with a positive quantity are selected")]
    EmptySelection,

    #[error("Selected product '{0}' is not in the catalog")]
    UnknownProduct(String),
}

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Email API returned status {0}")]
    Status(u16),
}

pub type AppResult<T> = Result<T, AppError>;
pub type StoreResult<T> = Result<T, StoreError>;
pub type CheckoutResult<T> = Result<T, CheckoutError>;
pub type NotifierResult<T> = Result<T, NotifierError>;
