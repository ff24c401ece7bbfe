//! # Stagehand Kernel Errors
//!
//! Defines the error type shared by the kernel, the provider model and the
//! configuration loader.
//!
//! [`Error`] covers invalid provider registrations, failures raised while a
//! provider is advanced through a lifecycle stage, failures reported by
//! provider code itself, and configuration problems.
use std::result::Result as StdResult;

use crate::config::error::ConfigError;
use crate::provider::stage::Stage;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The registered value is neither a known provider type nor a provider instance.
    #[error("Invalid provider '{provider}': {reason}")]
    InvalidProviderKind { provider: String, reason: String },

    /// A provider failed while being advanced through a lifecycle stage.
    #[error("Kernel lifecycle error during {stage} of provider '{provider}': {source}")]
    KernelLifecycle {
        stage: Stage,
        provider: String,
        #[source]
        source: Box<Error>,
    },

    /// Failure reported by provider code from a constructor or hook.
    #[error("Provider '{provider}' failed: {message}")]
    ProviderFailed { provider: String, message: String },

    /// Typed configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

impl Error {
    pub fn invalid_provider(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidProviderKind {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn provider_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProviderFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Wraps `source` with the stage and provider it was raised for.
    pub fn lifecycle(stage: Stage, provider: impl Into<String>, source: Error) -> Self {
        Error::KernelLifecycle {
            stage,
            provider: provider.into(),
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, unwrapping any lifecycle context.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::KernelLifecycle { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
