use std::any::Any;

use crate::context::SharedContext;
use crate::kernel::error::Result;
use crate::provider::stage::Stage;

/// Object-safe access to [`Any`] for provider trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Core trait that all providers implement.
///
/// Every hook is optional: the default implementations do nothing. A
/// provider that wants the kernel to skip a hook entirely (no call at all)
/// reports it through [`Provider::exposes`]; the stage is still recorded as
/// completed for that provider.
pub trait Provider: AsAny {
    /// Human readable name used in logs and error messages
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether the provider implements the hook for `stage`.
    fn exposes(&self, stage: Stage) -> bool {
        stage.is_hook()
    }

    fn configure(&mut self, _shared: &mut SharedContext) -> Result<()> {
        Ok(())
    }

    fn initialize(&mut self, _shared: &mut SharedContext) -> Result<()> {
        Ok(())
    }

    fn boot(&mut self, _shared: &mut SharedContext) -> Result<()> {
        Ok(())
    }

    fn shutdown(&mut self, _shared: &mut SharedContext) -> Result<()> {
        Ok(())
    }
}

impl dyn Provider {
    /// Attempt to view the provider as its concrete type.
    pub fn downcast_ref<T: Provider>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Provider>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Provider>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

/// A provider that can be registered by type identifier.
///
/// The catalog constructs it on demand, handing the shared context to the
/// constructor.
pub trait ProviderType: Provider + Sized {
    /// Stable identifier the provider is registered under
    const TYPE_NAME: &'static str;

    fn construct(shared: &mut SharedContext) -> Result<Self>;
}
