#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::SharedContext;
use crate::kernel::error::{Error, Result};
use crate::provider::{Provider, ProviderCatalog, ProviderType, Stage};

// ===== MOCK PROVIDERS =====

/// Records the last hook that ran.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub status: Option<String>,
}

impl Provider for FakeProvider {
    fn name(&self) -> &str {
        "FakeProvider"
    }

    fn configure(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.status = Some("configured".to_string());
        Ok(())
    }

    fn initialize(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.status = Some("initialized".to_string());
        Ok(())
    }

    fn boot(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.status = Some("booted".to_string());
        Ok(())
    }

    fn shutdown(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.status = Some("shutdown".to_string());
        Ok(())
    }
}

impl ProviderType for FakeProvider {
    const TYPE_NAME: &'static str = "FakeProvider";

    fn construct(_shared: &mut SharedContext) -> Result<Self> {
        Ok(Self::default())
    }
}

/// Copies the shared `status` value into its own status on every hook.
#[derive(Debug, Default)]
pub struct SharedFakeProvider {
    pub status: Option<String>,
}

impl SharedFakeProvider {
    fn read_status(&mut self, shared: &SharedContext) {
        self.status = shared.get_str("status").map(str::to_string);
    }
}

impl Provider for SharedFakeProvider {
    fn exposes(&self, stage: Stage) -> bool {
        matches!(stage, Stage::Initialize | Stage::Boot | Stage::Shutdown)
    }

    fn initialize(&mut self, shared: &mut SharedContext) -> Result<()> {
        self.read_status(shared);
        Ok(())
    }

    fn boot(&mut self, shared: &mut SharedContext) -> Result<()> {
        self.read_status(shared);
        Ok(())
    }

    fn shutdown(&mut self, shared: &mut SharedContext) -> Result<()> {
        self.read_status(shared);
        Ok(())
    }
}

impl ProviderType for SharedFakeProvider {
    const TYPE_NAME: &'static str = "SharedFakeProvider";

    fn construct(_shared: &mut SharedContext) -> Result<Self> {
        Ok(Self::default())
    }
}

/// Exposes no hooks; any call is a test failure.
#[derive(Debug, Default)]
pub struct EmptyProvider;

impl Provider for EmptyProvider {
    fn exposes(&self, _stage: Stage) -> bool {
        false
    }

    fn configure(&mut self, _shared: &mut SharedContext) -> Result<()> {
        panic!("configure must not be called on EmptyProvider");
    }

    fn initialize(&mut self, _shared: &mut SharedContext) -> Result<()> {
        panic!("initialize must not be called on EmptyProvider");
    }

    fn boot(&mut self, _shared: &mut SharedContext) -> Result<()> {
        panic!("boot must not be called on EmptyProvider");
    }

    fn shutdown(&mut self, _shared: &mut SharedContext) -> Result<()> {
        panic!("shutdown must not be called on EmptyProvider");
    }
}

impl ProviderType for EmptyProvider {
    const TYPE_NAME: &'static str = "EmptyProvider";

    fn construct(_shared: &mut SharedContext) -> Result<Self> {
        Ok(Self)
    }
}

/// Relies entirely on the default hooks.
#[derive(Debug, Default)]
pub struct BareProvider;

impl Provider for BareProvider {}

/// Shared call journal, entries look like `"alpha:boot"`.
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Appends `name:stage` to a journal for every hook call; optionally fails
/// at one stage.
pub struct RecordingProvider {
    name: String,
    log: CallLog,
    fail_at: Option<Stage>,
}

impl RecordingProvider {
    pub fn new(name: &str, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            fail_at: None,
        }
    }

    pub fn failing_at(name: &str, log: CallLog, stage: Stage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::new(name, log)
        }
    }

    fn record(&mut self, stage: Stage) -> Result<()> {
        self.log.borrow_mut().push(format!("{}:{}", self.name, stage));
        if self.fail_at == Some(stage) {
            return Err(Error::provider_failed(&self.name, format!("{} failed", stage)));
        }
        Ok(())
    }
}

impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.record(Stage::Configure)
    }

    fn initialize(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.record(Stage::Initialize)
    }

    fn boot(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.record(Stage::Boot)
    }

    fn shutdown(&mut self, _shared: &mut SharedContext) -> Result<()> {
        self.record(Stage::Shutdown)
    }
}

/// Registers a recording provider type under `name`; construction is
/// journaled as `name:create`.
pub fn register_recording(catalog: &mut ProviderCatalog, name: &str, log: &CallLog) {
    let type_name = name.to_string();
    let log = log.clone();
    catalog.register_fn(name, move |_shared| {
        log.borrow_mut().push(format!("{}:create", type_name));
        Ok(Box::new(RecordingProvider::new(&type_name, log.clone())) as Box<dyn Provider>)
    });
}

/// Catalog with the fake provider types registered.
pub fn fake_catalog() -> ProviderCatalog {
    let mut catalog = ProviderCatalog::new();
    catalog
        .register::<FakeProvider>()
        .register::<SharedFakeProvider>()
        .register::<EmptyProvider>();
    catalog
}

pub fn entries_of(log: &CallLog) -> Vec<String> {
    log.borrow().clone()
}
