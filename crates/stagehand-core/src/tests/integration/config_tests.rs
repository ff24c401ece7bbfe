use std::fs;

use tempfile::tempdir;

use crate::config::KernelConfig;
use crate::kernel::error::{Error, Result};
use crate::kernel::Kernel;
use crate::tests::common::*;

#[test]
fn test_kernel_from_config_file() -> Result<()> {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("stagehand.json");
    fs::write(
        &path,
        r#"{
            "providers": ["SharedFakeProvider", "FakeProvider", "SharedFakeProvider"],
            "shared": { "status": "X" }
        }"#,
    )
    .expect("Failed to write config");

    let config = KernelConfig::load(&path)?;
    let mut kernel = Kernel::from_config(&config, fake_catalog())?;
    assert_eq!(kernel.len(), 2);

    kernel.initialize()?;
    let provider = kernel
        .find_instance::<SharedFakeProvider>()
        .expect("SharedFakeProvider should be constructed");
    assert_eq!(provider.status.as_deref(), Some("X"));
    Ok(())
}

#[test]
fn test_invalid_provider_entry_in_config() {
    let config: KernelConfig = serde_json::from_str(r#"{ "providers": ["FakeProvider", []] }"#)
        .expect("config should deserialize");

    match Kernel::from_config(&config, fake_catalog()) {
        Err(Error::InvalidProviderKind { provider, .. }) => assert_eq!(provider, "[]"),
        Err(other) => panic!("Expected InvalidProviderKind, got {:?}", other),
        Ok(_) => panic!("Config with an array provider should be rejected"),
    }
}

#[test]
fn test_unknown_provider_in_config() {
    let config = KernelConfig::new().with_provider("NoSuchType");
    let err = Kernel::from_config(&config, fake_catalog()).unwrap_err();
    assert!(err.to_string().contains("NoSuchType"));
}
