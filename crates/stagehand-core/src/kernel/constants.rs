/// Application name
pub const APP_NAME: &str = "Stagehand";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file looked up by the CLI host
pub const DEFAULT_CONFIG_FILE: &str = "stagehand.toml";

/// Shared context key holding the configured log level
pub const LOG_LEVEL_KEY: &str = "log.level";

/// Log level used when the shared context does not configure one
pub const DEFAULT_LOG_LEVEL: &str = "info";
