// Integration tests spanning config, kernel and providers
#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod lifecycle_tests;
