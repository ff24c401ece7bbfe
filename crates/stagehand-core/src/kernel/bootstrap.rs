use std::collections::HashMap;
use std::fmt;
use std::mem;

use serde_json::Value;

use crate::config::KernelConfig;
use crate::context::SharedContext;
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::provider::{
    DefaultProviderInvoker, Provider, ProviderCatalog, ProviderEntry, ProviderId, ProviderInvoker,
    ProviderSource, Stage,
};

/// Overall kernel phase, derived from the stage tags of every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelStatus {
    /// Rest state: no pass in progress, or providers are not all configured yet
    Shutdown,
    /// Every provider carries the configure tag, but not all carry the
    /// initialize tag
    Configured,
    /// Every provider has run (or skipped) its initialize hook in this pass;
    /// at least one has not booted
    Initialized,
    /// Every provider carries the boot tag. Lasts until `shutdown` clears
    /// the tags.
    Booted,
}

impl fmt::Display for KernelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KernelStatus::Shutdown => "shutdown",
            KernelStatus::Configured => "configured",
            KernelStatus::Initialized => "initialized",
            KernelStatus::Booted => "booted",
        };
        f.write_str(name)
    }
}

/// Owns the provider registry and drives it through the lifecycle.
///
/// Every provider keeps its own set of completed stages. Asking for a stage
/// first completes all lower stages for the whole registry, then performs
/// the requested stage once per provider, in registration order. Stages a
/// provider already completed are skipped, so each lifecycle operation is
/// idempotent. `shutdown` ends the pass by clearing every provider's tags,
/// leaving the registry ready for another pass with the same instances.
pub struct Kernel {
    entries: Vec<ProviderEntry>,
    index: HashMap<ProviderId, usize>,
    next_instance: u64,
    shared: SharedContext,
    catalog: ProviderCatalog,
    invoker: Box<dyn ProviderInvoker>,
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel {
    /// Creates a kernel with an empty catalog and the default invoker.
    pub fn new() -> Self {
        Self::with_catalog(ProviderCatalog::new())
    }

    /// Creates a kernel resolving type identifiers through `catalog`.
    pub fn with_catalog(catalog: ProviderCatalog) -> Self {
        log::debug!("Creating {} kernel v{}", constants::APP_NAME, constants::APP_VERSION);
        Kernel {
            entries: Vec::new(),
            index: HashMap::new(),
            next_instance: 0,
            shared: SharedContext::new(),
            catalog,
            invoker: Box::new(DefaultProviderInvoker::new()),
        }
    }

    /// Creates a kernel with a seeded shared context and the configured providers.
    ///
    /// Registration stops at the first invalid provider entry.
    pub fn from_config(config: &KernelConfig, catalog: ProviderCatalog) -> Result<Self> {
        let mut kernel = Self::with_catalog(catalog);
        kernel.shared.extend_values(config.shared.clone());
        for value in &config.providers {
            kernel.add_provider_value(value)?;
        }
        log::info!(
            "Kernel configured with {} provider(s) and {} shared value(s)",
            kernel.len(),
            kernel.shared.len()
        );
        Ok(kernel)
    }

    // --- Registry ---

    /// Registers a provider by type identifier or as a ready instance.
    ///
    /// Type identifiers must be known to the catalog; registering the same
    /// identifier again is a no-op returning the existing identity. The
    /// registry is unchanged when validation fails.
    pub fn add_provider(&mut self, source: impl Into<ProviderSource>) -> Result<ProviderId> {
        match source.into() {
            ProviderSource::Type(type_name) => {
                let id = ProviderId::Type(type_name.clone());
                if self.index.contains_key(&id) {
                    log::debug!("Provider '{}' already registered", id);
                    return Ok(id);
                }
                self.validate_type(&type_name)?;
                Ok(self.push_entry(ProviderEntry::from_type(type_name)))
            }
            ProviderSource::Instance(instance) => {
                let seq = self.next_instance;
                self.next_instance += 1;
                Ok(self.push_entry(ProviderEntry::from_instance(seq, instance)))
            }
        }
    }

    /// Registers a provider described by loosely typed data, such as a
    /// configuration file entry. Only strings (type identifiers) are accepted.
    pub fn add_provider_value(&mut self, value: &Value) -> Result<ProviderId> {
        match value {
            Value::String(type_name) => self.add_provider(type_name.as_str()),
            other => Err(Error::invalid_provider(
                other.to_string(),
                "expected a provider type identifier or a provider instance",
            )),
        }
    }

    /// Registers each provider in order, stopping at the first failure.
    /// Providers registered before the failure stay registered.
    pub fn add_providers<I, S>(&mut self, providers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<ProviderSource>,
    {
        for provider in providers {
            self.add_provider(provider)?;
        }
        Ok(())
    }

    /// Replaces the whole registry. Nothing changes unless every provider is valid.
    pub fn set_providers<I, S>(&mut self, providers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<ProviderSource>,
    {
        let sources: Vec<ProviderSource> = providers.into_iter().map(Into::into).collect();
        for source in &sources {
            if let ProviderSource::Type(type_name) = source {
                self.validate_type(type_name)?;
            }
        }
        self.entries.clear();
        self.index.clear();
        self.add_providers(sources)
    }

    /// Identities in registration order
    pub fn providers(&self) -> Vec<ProviderId> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// Constructed instances in registration order
    pub fn provider_instances(&self) -> Vec<&(dyn Provider + 'static)> {
        self.entries.iter().filter_map(ProviderEntry::instance).collect()
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &ProviderId) -> Option<&ProviderEntry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    /// First constructed instance of concrete type `T`.
    pub fn find_instance<T: Provider>(&self) -> Option<&T> {
        self.entries
            .iter()
            .filter_map(ProviderEntry::instance)
            .find_map(|instance| instance.downcast_ref::<T>())
    }

    pub fn has_provider(&self, id: &ProviderId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // --- Collaborators ---

    pub fn shared_context(&self) -> &SharedContext {
        &self.shared
    }

    pub fn shared_context_mut(&mut self) -> &mut SharedContext {
        &mut self.shared
    }

    /// Replaces the shared context, returning the previous one. Providers
    /// that are already constructed are not affected.
    pub fn set_shared_context(&mut self, shared: SharedContext) -> SharedContext {
        mem::replace(&mut self.shared, shared)
    }

    pub fn invoker(&self) -> &dyn ProviderInvoker {
        self.invoker.as_ref()
    }

    pub fn set_invoker(&mut self, invoker: Box<dyn ProviderInvoker>) {
        self.invoker = invoker;
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ProviderCatalog {
        &mut self.catalog
    }

    /// Phase shared by every provider; an empty registry is always `Shutdown`.
    pub fn status(&self) -> KernelStatus {
        let all_have = |stage: Stage| {
            !self.entries.is_empty() && self.entries.iter().all(|entry| entry.has_tag(stage))
        };
        if all_have(Stage::Boot) {
            KernelStatus::Booted
        } else if all_have(Stage::Initialize) {
            KernelStatus::Initialized
        } else if all_have(Stage::Configure) {
            KernelStatus::Configured
        } else {
            KernelStatus::Shutdown
        }
    }

    // --- Lifecycle ---

    /// Instantiate every provider not constructed yet.
    pub fn create(&mut self) -> Result<()> {
        self.advance(Stage::Create)
    }

    /// Configure every provider, creating them first.
    pub fn configure(&mut self) -> Result<()> {
        self.advance(Stage::Configure)
    }

    /// Initialize every provider, configuring them first.
    pub fn initialize(&mut self) -> Result<()> {
        self.advance(Stage::Initialize)
    }

    /// Boot every provider, initializing them first.
    pub fn boot(&mut self) -> Result<()> {
        self.advance(Stage::Boot)
    }

    /// Shut every provider down, booting them first, then reset all stage
    /// tags so the registry can run another pass.
    pub fn shutdown(&mut self) -> Result<()> {
        self.advance(Stage::Shutdown)?;
        for entry in &mut self.entries {
            entry.clear_tags();
        }
        log::info!("Lifecycle pass complete; {} provider(s) reset", self.entries.len());
        Ok(())
    }

    fn advance(&mut self, target: Stage) -> Result<()> {
        for stage in target.through() {
            self.run_stage(stage)?;
        }
        Ok(())
    }

    /// One forward pass over the registry for a single stage.
    fn run_stage(&mut self, stage: Stage) -> Result<()> {
        let Kernel {
            entries,
            shared,
            catalog,
            invoker,
            ..
        } = self;

        let pending = entries
            .iter()
            .filter(|entry| match stage {
                Stage::Create => !entry.is_created(),
                _ => !entry.has_tag(stage),
            })
            .count();
        if pending == 0 {
            log::trace!("Stage '{}' already complete for all providers", stage);
            return Ok(());
        }
        log::info!("Running stage '{}' for {} provider(s)...", stage, pending);

        for entry in entries.iter_mut() {
            if stage == Stage::Create {
                if entry.is_created() {
                    continue;
                }
                let ProviderId::Type(type_name) = &entry.id else {
                    continue;
                };
                log::debug!("Creating provider '{}'", type_name);
                let instance = invoker
                    .create(catalog, type_name, shared)
                    .map_err(|e| Error::lifecycle(stage, type_name.as_str(), e))?;
                entry.instance = Some(instance);
                continue;
            }

            if entry.has_tag(stage) {
                continue;
            }
            let label = entry.label();
            let Some(instance) = entry.instance.as_deref_mut() else {
                return Err(Error::lifecycle(
                    stage,
                    label,
                    Error::Other("provider has not been created".to_string()),
                ));
            };
            if instance.exposes(stage) {
                log::debug!("Invoking '{}' on provider '{}'", stage, label);
                invoker
                    .invoke(stage, instance, shared)
                    .map_err(|e| Error::lifecycle(stage, label.as_str(), e))?;
            } else {
                log::trace!("Provider '{}' has no '{}' hook", label, stage);
            }
            entry.mark(stage);
        }

        log::info!("Stage '{}' complete.", stage);
        Ok(())
    }

    fn validate_type(&self, type_name: &str) -> Result<()> {
        if self.catalog.contains(type_name) {
            Ok(())
        } else {
            Err(Error::invalid_provider(
                type_name,
                "provider type is not registered in the catalog",
            ))
        }
    }

    fn push_entry(&mut self, entry: ProviderEntry) -> ProviderId {
        let id = entry.id.clone();
        log::debug!("Registered provider '{}'", id);
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(entry);
        id
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("status", &self.status())
            .field("entries", &self.entries)
            .field("shared", &self.shared)
            .field("catalog", &self.catalog)
            .finish()
    }
}
