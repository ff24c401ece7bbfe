use crate::kernel::error::Result;
use crate::kernel::{Kernel, KernelStatus};
use crate::provider::{ProviderCatalog, ProviderSource, Stage};
use crate::tests::common::*;

fn recording_kernel(names: &[&str], log: &CallLog) -> Kernel {
    let mut catalog = ProviderCatalog::new();
    for name in names {
        register_recording(&mut catalog, name, log);
    }
    Kernel::with_catalog(catalog)
}

#[test]
fn test_repeated_passes_produce_identical_hook_sequences() -> Result<()> {
    let names = ["logging", "routing", "database"];
    let log = call_log();
    let mut kernel = recording_kernel(&names, &log);

    kernel.add_providers(names)?;
    kernel.initialize()?;
    kernel.boot()?;
    kernel.shutdown()?;
    let first = entries_of(&log);

    // Registering the same providers again changes nothing
    log.borrow_mut().clear();
    kernel.add_providers(names)?;
    assert_eq!(kernel.len(), names.len());
    kernel.initialize()?;
    kernel.boot()?;
    kernel.shutdown()?;
    let second = entries_of(&log);

    let hooks_only: Vec<String> = first.iter().filter(|call| !call.ends_with(":create")).cloned().collect();
    assert_eq!(second, hooks_only);
    assert_eq!(
        hooks_only.iter().filter(|call| call.starts_with("routing:")).count(),
        Stage::HOOKS.len()
    );
    Ok(())
}

#[test]
fn test_fresh_kernels_replay_the_same_sequence() -> Result<()> {
    let names = ["a", "b"];
    let mut runs = Vec::new();
    for _ in 0..2 {
        let log = call_log();
        let mut kernel = recording_kernel(&names, &log);
        kernel.add_providers(names)?;
        kernel.shutdown()?;
        runs.push(entries_of(&log));
    }
    assert_eq!(runs[0], runs[1]);
    Ok(())
}

#[test]
fn test_hooks_follow_registration_order_within_each_stage() -> Result<()> {
    let log = call_log();
    let mut kernel = recording_kernel(&["typed"], &log);
    kernel.add_provider(ProviderSource::instance(RecordingProvider::new("first", log.clone())))?;
    kernel.add_provider("typed")?;
    kernel.add_provider(ProviderSource::instance(RecordingProvider::new("last", log.clone())))?;

    kernel.boot()?;

    let calls = entries_of(&log);
    assert_eq!(calls[0], "typed:create");
    for stage in [Stage::Configure, Stage::Initialize, Stage::Boot] {
        let order: Vec<&str> = calls
            .iter()
            .filter(|call| call.ends_with(&format!(":{}", stage)))
            .map(|call| call.split(':').next().unwrap_or_default())
            .collect();
        assert_eq!(order, vec!["first", "typed", "last"], "order for stage {}", stage);
    }
    Ok(())
}

#[test]
fn test_concrete_status_scenario() -> Result<()> {
    let mut kernel = Kernel::with_catalog(fake_catalog());
    kernel.add_provider("FakeProvider")?;

    kernel.initialize()?;
    kernel.boot()?;
    kernel.shutdown()?;

    let provider = kernel.find_instance::<FakeProvider>().expect("FakeProvider should be constructed");
    assert_eq!(provider.status.as_deref(), Some("shutdown"));
    assert_eq!(kernel.status(), KernelStatus::Shutdown);
    Ok(())
}

#[test]
fn test_mixed_registry_with_missing_hooks() -> Result<()> {
    let mut kernel = Kernel::with_catalog(fake_catalog());
    kernel.add_providers(["EmptyProvider", "FakeProvider"])?;
    kernel.add_provider(ProviderSource::instance(BareProvider))?;

    for _ in 0..3 {
        kernel.shutdown()?;
    }
    let provider = kernel.find_instance::<FakeProvider>().expect("FakeProvider should be constructed");
    assert_eq!(provider.status.as_deref(), Some("shutdown"));
    assert_eq!(kernel.provider_instances().len(), 3);
    Ok(())
}
