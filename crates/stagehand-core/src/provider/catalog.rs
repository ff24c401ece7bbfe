use std::collections::HashMap;
use std::fmt;

use crate::context::SharedContext;
use crate::kernel::error::{Error, Result};
use crate::provider::traits::{Provider, ProviderType};

/// Constructor stored in the catalog for one type identifier
pub type ProviderFactory = Box<dyn Fn(&mut SharedContext) -> Result<Box<dyn Provider>>>;

/// Resolves provider type identifiers to constructors.
#[derive(Default)]
pub struct ProviderCatalog {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `P` under its [`ProviderType::TYPE_NAME`].
    pub fn register<P: ProviderType>(&mut self) -> &mut Self {
        self.register_fn(P::TYPE_NAME, |shared| {
            let provider = P::construct(shared)?;
            Ok(Box::new(provider) as Box<dyn Provider>)
        })
    }

    /// Register an arbitrary constructor. An existing constructor for the
    /// same name is replaced.
    pub fn register_fn<F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&mut SharedContext) -> Result<Box<dyn Provider>> + 'static,
    {
        let type_name = type_name.into();
        if self.factories.insert(type_name.clone(), Box::new(factory)).is_some() {
            log::debug!("Replaced constructor for provider type '{}'", type_name);
        }
        self
    }

    /// Check if a type identifier can be resolved
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Build a new instance of `type_name`, handing `shared` to its constructor.
    pub fn construct(&self, type_name: &str, shared: &mut SharedContext) -> Result<Box<dyn Provider>> {
        let factory = self.factories.get(type_name).ok_or_else(|| {
            Error::invalid_provider(type_name, "provider type is not registered in the catalog")
        })?;
        factory(shared)
    }

    /// Registered type identifiers, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ProviderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCatalog")
            .field("types", &self.type_names())
            .finish()
    }
}
