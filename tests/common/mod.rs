//! Common test utilities and helpers
//!
//! Fixtures for integration tests: stand-in driver and plugin executables.
