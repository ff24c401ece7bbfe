//! # Stagehand Kernel
//!
//! The `kernel` module is the heart of `stagehand-core`. It owns the provider
//! registry and drives every registered provider through the bootstrap
//! lifecycle.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Lifecycle Driving**: The [`Kernel`](bootstrap::Kernel) struct from the
//!   `bootstrap` submodule advances providers through
//!   create → configure → initialize → boot → shutdown. Each provider tracks
//!   its own completed stages, so every lifecycle operation is idempotent and
//!   completes the lower stages first.
//! - **Status Reporting**: [`KernelStatus`](bootstrap::KernelStatus) is derived
//!   from the stage tags of the whole registry.
//! - **Core Constants**: System-wide constants live in the `constants` submodule.
//! - **Error Handling**: Kernel error types ([`Error`](error::Error)) and the
//!   `Result` alias live in the `error` submodule.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::{Kernel, KernelStatus};
pub use error::{Error, Result};
