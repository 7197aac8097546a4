//! Helper Integration Test Modules

pub mod auto_init;
pub mod upgrade;
