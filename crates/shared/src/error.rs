use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Storage,
    Biometric,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error("failed to clear store: {0}")]
    Clear(String),
    #[error("no record stored under key '{0}'")]
    Missing(String),
    #[error("malformed record under key '{key}': {reason}")]
    Malformed { key: String, reason: String },
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Storage
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiometricError {
    #[error("biometric hardware unavailable: {0}")]
    Unavailable(String),
    #[error("biometric prompt failed: {0}")]
    PromptFailed(String),
}

impl BiometricError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Biometric
    }
}
