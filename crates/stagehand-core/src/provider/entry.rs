use std::collections::HashSet;
use std::fmt;

use crate::provider::stage::Stage;
use crate::provider::traits::Provider;

/// Identity of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Registered by type identifier; repeated registrations collapse to one entry.
    Type(String),
    /// Registered as a pre-built instance, numbered in registration order.
    Instance(u64),
}

impl ProviderId {
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ProviderId::Type(name) => Some(name),
            ProviderId::Instance(_) => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::Type(name) => f.write_str(name),
            ProviderId::Instance(seq) => write!(f, "instance#{}", seq),
        }
    }
}

/// What a caller hands to [`Kernel::add_provider`](crate::kernel::Kernel::add_provider).
pub enum ProviderSource {
    /// Resolved through the provider catalog when the create stage runs
    Type(String),
    /// Already constructed; the create stage is a no-op for it
    Instance(Box<dyn Provider>),
}

impl ProviderSource {
    pub fn instance<P: Provider>(provider: P) -> Self {
        ProviderSource::Instance(Box::new(provider))
    }

    /// Description used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            ProviderSource::Type(name) => name.clone(),
            ProviderSource::Instance(provider) => provider.name().to_string(),
        }
    }
}

impl fmt::Debug for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSource::Type(name) => f.debug_tuple("Type").field(name).finish(),
            ProviderSource::Instance(provider) => {
                f.debug_tuple("Instance").field(&provider.name()).finish()
            }
        }
    }
}

impl From<&str> for ProviderSource {
    fn from(name: &str) -> Self {
        ProviderSource::Type(name.to_string())
    }
}

impl From<String> for ProviderSource {
    fn from(name: String) -> Self {
        ProviderSource::Type(name)
    }
}

impl From<Box<dyn Provider>> for ProviderSource {
    fn from(provider: Box<dyn Provider>) -> Self {
        ProviderSource::Instance(provider)
    }
}

/// One registered provider and its lifecycle bookkeeping.
pub struct ProviderEntry {
    pub(crate) id: ProviderId,
    pub(crate) instance: Option<Box<dyn Provider>>,
    pub(crate) tags: HashSet<Stage>,
}

impl ProviderEntry {
    pub(crate) fn from_type(name: String) -> Self {
        Self {
            id: ProviderId::Type(name),
            instance: None,
            tags: HashSet::new(),
        }
    }

    pub(crate) fn from_instance(seq: u64, instance: Box<dyn Provider>) -> Self {
        Self {
            id: ProviderId::Instance(seq),
            instance: Some(instance),
            tags: HashSet::new(),
        }
    }

    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    pub fn instance(&self) -> Option<&(dyn Provider + 'static)> {
        self.instance.as_deref()
    }

    pub fn is_created(&self) -> bool {
        self.instance.is_some()
    }

    pub fn has_tag(&self, stage: Stage) -> bool {
        self.tags.contains(&stage)
    }

    /// Completed stages in execution order.
    pub fn tags(&self) -> Vec<Stage> {
        let mut tags: Vec<Stage> = self.tags.iter().copied().collect();
        tags.sort();
        tags
    }

    /// Most advanced completed stage, if any.
    pub fn current_stage(&self) -> Option<Stage> {
        self.tags.iter().copied().max()
    }

    /// Name used in logs: the instance name once constructed, the identity otherwise.
    pub fn label(&self) -> String {
        match (&self.id, &self.instance) {
            (ProviderId::Type(name), _) => name.clone(),
            (ProviderId::Instance(_), Some(instance)) => {
                format!("{} ({})", instance.name(), self.id)
            }
            (ProviderId::Instance(_), None) => self.id.to_string(),
        }
    }

    /// Records `stage` as completed; returns false if it already was.
    pub(crate) fn mark(&mut self, stage: Stage) -> bool {
        self.tags.insert(stage)
    }

    pub(crate) fn clear_tags(&mut self) {
        self.tags.clear();
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("id", &self.id)
            .field("created", &self.is_created())
            .field("tags", &self.tags())
            .finish()
    }
}
