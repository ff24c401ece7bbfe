pub mod config;
pub mod context;
pub mod kernel;
pub mod provider;

// Re-export key public types/traits for easier use by the binary and providers
pub use config::{ConfigFormat, KernelConfig};
pub use context::SharedContext;
pub use kernel::{Kernel, KernelStatus};
pub use kernel::error::{Error as KernelError, Result as KernelResult};
pub use provider::{
    DefaultProviderInvoker, Provider, ProviderCatalog, ProviderEntry, ProviderId, ProviderInvoker,
    ProviderSource, ProviderType, Stage,
};

#[cfg(test)]
mod tests;
