//! Worker thread owning the form controller and the platform capabilities.

pub mod biometric;
pub mod commands;
pub mod runtime;
