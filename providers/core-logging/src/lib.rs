//! Core logging provider.
//!
//! Installs `env_logger` as the process logger during the configure stage,
//! so every provider configured after it can log. The level comes from the
//! `log.level` shared value; `RUST_LOG` still takes precedence.
use log::{LevelFilter, info};
use stagehand_core::kernel::constants::{DEFAULT_LOG_LEVEL, LOG_LEVEL_KEY};
use stagehand_core::kernel::error::{Error as KernelError, Result as KernelResult};
use stagehand_core::{Provider, ProviderType, SharedContext, Stage};

/// Shared key set once a logger is active
pub const LOG_INSTALLED_KEY: &str = "log.installed";

#[derive(Debug, Default)]
pub struct LoggingProvider {
    level: Option<LevelFilter>,
}

impl LoggingProvider {
    /// Level applied by the last configure stage
    pub fn level(&self) -> Option<LevelFilter> {
        self.level
    }
}

/// Parse a level name such as `"debug"`; case-insensitive.
pub fn parse_level(level: &str) -> KernelResult<LevelFilter> {
    level.parse::<LevelFilter>().map_err(|e| {
        KernelError::provider_failed(
            LoggingProvider::TYPE_NAME,
            format!("invalid log level '{}': {}", level, e),
        )
    })
}

impl Provider for LoggingProvider {
    fn name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn exposes(&self, stage: Stage) -> bool {
        matches!(stage, Stage::Configure | Stage::Shutdown)
    }

    fn configure(&mut self, shared: &mut SharedContext) -> KernelResult<()> {
        let level = parse_level(shared.get_str(LOG_LEVEL_KEY).unwrap_or(DEFAULT_LOG_LEVEL))?;
        self.level = Some(level);

        // A logger may already be installed by an earlier pass or by the host.
        match env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init()
        {
            Ok(()) => info!("Logger installed at level {}", level),
            Err(_) => {
                log::set_max_level(level);
                log::debug!("Logger already installed; max level set to {}", level);
            }
        }
        shared.set(LOG_INSTALLED_KEY, true);
        Ok(())
    }

    fn shutdown(&mut self, shared: &mut SharedContext) -> KernelResult<()> {
        info!("Shutting down core logging provider");
        log::logger().flush();
        shared.remove(LOG_INSTALLED_KEY);
        Ok(())
    }
}

impl ProviderType for LoggingProvider {
    const TYPE_NAME: &'static str = "core-logging";

    fn construct(_shared: &mut SharedContext) -> KernelResult<Self> {
        Ok(Self::default())
    }
}
