//! Greenthumb firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod config;
pub mod controller;
pub mod pins;
pub mod ports;

// Hardware-facing modules. The actual register access is guarded by cfg
// attributes inside; on host targets the adapters run an in-memory
// simulation so the whole crate builds and tests off-device.
pub mod adapters;
pub mod drivers;
