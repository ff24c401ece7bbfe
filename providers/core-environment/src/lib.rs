use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use stagehand_core::kernel::error::Result as KernelResult;
use stagehand_core::{Provider, ProviderType, SharedContext};

/// Shared key overriding where OS release information is read from
pub const OS_RELEASE_PATH_KEY: &str = "env.os_release_path";
pub const OS_KEY: &str = "env.os";
pub const ARCH_KEY: &str = "env.arch";
pub const FAMILY_KEY: &str = "env.family";
pub const OS_INFO_KEY: &str = "env.os_info";
pub const READY_KEY: &str = "env.ready";

/// Keys written by the initialize hook
const PUBLISHED_KEYS: [&str; 4] = [OS_KEY, ARCH_KEY, FAMILY_KEY, OS_INFO_KEY];

const DEFAULT_OS_RELEASE_PATH: &str = "/etc/os-release";

/// The os-release fields Stagehand reports. Absent fields stay `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OsInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version_id: Option<String>,
    pub pretty_name: Option<String>,
}

/// Publishes host environment facts into the shared context.
#[derive(Debug, Default)]
pub struct EnvironmentProvider {
    os_info: Option<OsInfo>,
}

impl EnvironmentProvider {
    pub fn os_info(&self) -> Option<&OsInfo> {
        self.os_info.as_ref()
    }

    /// JSON summary of what was detected, for host reporting.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "family": std::env::consts::FAMILY,
            "release": self.os_info,
        })
    }
}

impl Provider for EnvironmentProvider {
    fn name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn initialize(&mut self, shared: &mut SharedContext) -> KernelResult<()> {
        shared.set(OS_KEY, std::env::consts::OS.to_string());
        shared.set(ARCH_KEY, std::env::consts::ARCH.to_string());
        shared.set(FAMILY_KEY, std::env::consts::FAMILY.to_string());

        let path = shared
            .get_str(OS_RELEASE_PATH_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OS_RELEASE_PATH));
        let os_info = read_os_release(&path);
        info!("Detected OS: {:?}", os_info);
        shared.set(OS_INFO_KEY, os_info.clone());
        self.os_info = Some(os_info);
        Ok(())
    }

    fn boot(&mut self, shared: &mut SharedContext) -> KernelResult<()> {
        let published = PUBLISHED_KEYS
            .iter()
            .filter(|key| shared.contains_key(key))
            .count();
        shared.set(READY_KEY, published);
        Ok(())
    }

    fn shutdown(&mut self, shared: &mut SharedContext) -> KernelResult<()> {
        for key in PUBLISHED_KEYS.into_iter().chain([READY_KEY]) {
            shared.remove(key);
        }
        info!("Shutting down core environment provider");
        Ok(())
    }
}

impl ProviderType for EnvironmentProvider {
    const TYPE_NAME: &'static str = "core-environment";

    fn construct(_shared: &mut SharedContext) -> KernelResult<Self> {
        Ok(Self::default())
    }
}

/// Reads an os-release file. The host may not have one, in which case every
/// field is left empty.
pub fn read_os_release(file_path: &Path) -> OsInfo {
    match fs::read_to_string(file_path) {
        Ok(text) => parse_os_release(&text),
        Err(e) => {
            log::warn!("No OS release data at {}: {}", file_path.display(), e);
            OsInfo::default()
        }
    }
}

/// Picks the reported fields out of `KEY=value` lines; comments, unknown
/// keys and lines without `=` are skipped.
pub fn parse_os_release(text: &str) -> OsInfo {
    let mut info = OsInfo::default();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, raw)) = line.split_once('=') else {
            log::debug!("Skipping os-release line without '=': {}", line);
            continue;
        };
        let field = match key.trim_end() {
            "ID" => &mut info.id,
            "NAME" => &mut info.name,
            "VERSION_ID" => &mut info.version_id,
            "PRETTY_NAME" => &mut info.pretty_name,
            _ => continue,
        };
        *field = Some(unquote(raw.trim()).to_string());
    }
    info
}

/// os-release values may be wrapped in double or single quotes.
fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value)
}
