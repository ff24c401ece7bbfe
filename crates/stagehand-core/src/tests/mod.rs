// Shared mocks and cross-module integration tests
pub mod common;
mod integration;
