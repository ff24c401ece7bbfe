//! # Stagehand Provider Model
//!
//! Providers are the units of setup and teardown logic driven by the
//! [`Kernel`](crate::kernel::Kernel).
//!
//! - [`Provider`] is the trait every provider implements; all lifecycle
//!   hooks are optional.
//! - [`ProviderType`] marks providers that can be registered by type
//!   identifier and constructed on demand from the shared context.
//! - [`ProviderCatalog`] resolves type identifiers to constructors.
//! - [`ProviderInvoker`] performs construction and hook calls;
//!   [`DefaultProviderInvoker`] is the standard implementation.
//! - [`ProviderEntry`] and [`ProviderId`] describe one registry slot.
//! - [`Stage`] enumerates the lifecycle stages.
pub mod catalog;
pub mod entry;
pub mod invoker;
pub mod stage;
pub mod traits;

pub use catalog::{ProviderCatalog, ProviderFactory};
pub use entry::{ProviderEntry, ProviderId, ProviderSource};
pub use invoker::{DefaultProviderInvoker, ProviderInvoker};
pub use stage::Stage;
pub use traits::{AsAny, Provider, ProviderType};
