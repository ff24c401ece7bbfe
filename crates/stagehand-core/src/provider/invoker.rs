use crate::context::SharedContext;
use crate::kernel::error::{Error, Result};
use crate::provider::catalog::ProviderCatalog;
use crate::provider::stage::Stage;
use crate::provider::traits::Provider;

/// Performs provider construction and hook calls on behalf of the kernel.
///
/// The invoker never looks at the kernel's registry. Replacing it changes
/// how providers are built or called (decoration, instrumentation,
/// injection) without touching the lifecycle bookkeeping. The kernel checks
/// [`Provider::exposes`] before delegating a hook.
pub trait ProviderInvoker {
    /// Construct a new instance of `type_name`.
    fn create(
        &self,
        catalog: &ProviderCatalog,
        type_name: &str,
        shared: &mut SharedContext,
    ) -> Result<Box<dyn Provider>>;

    fn configure(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()>;

    fn initialize(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()>;

    fn boot(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()>;

    fn shutdown(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()>;

    /// Dispatch the hook belonging to `stage`.
    fn invoke(
        &self,
        stage: Stage,
        provider: &mut dyn Provider,
        shared: &mut SharedContext,
    ) -> Result<()> {
        match stage {
            Stage::Configure => self.configure(provider, shared),
            Stage::Initialize => self.initialize(provider, shared),
            Stage::Boot => self.boot(provider, shared),
            Stage::Shutdown => self.shutdown(provider, shared),
            Stage::Create => Err(Error::Other(format!(
                "Stage '{}' has no hook to invoke on provider '{}'",
                stage,
                provider.name()
            ))),
        }
    }
}

/// Standard invoker: builds through the catalog and calls hooks directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProviderInvoker;

impl DefaultProviderInvoker {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderInvoker for DefaultProviderInvoker {
    fn create(
        &self,
        catalog: &ProviderCatalog,
        type_name: &str,
        shared: &mut SharedContext,
    ) -> Result<Box<dyn Provider>> {
        catalog.construct(type_name, shared)
    }

    fn configure(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()> {
        provider.configure(shared)
    }

    fn initialize(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()> {
        provider.initialize(shared)
    }

    fn boot(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()> {
        provider.boot(shared)
    }

    fn shutdown(&self, provider: &mut dyn Provider, shared: &mut SharedContext) -> Result<()> {
        provider.shutdown(shared)
    }
}
