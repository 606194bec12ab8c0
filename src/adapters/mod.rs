//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements  | Connects to                      |
//! |------------|-------------|----------------------------------|
//! | `gpio`     | `GpioPort`  | ESP32 GPIO / in-memory registers |
//! | `drain`    | `DrainPort` | LCG pseudo-random source         |
//! | `log_sink` | `ReportSink`| Serial log output                |
//!
//! The tick timer implements `DelayPort` directly in
//! [`drivers::tick_timer`](crate::drivers::tick_timer).

pub mod drain;
pub mod gpio;
pub mod log_sink;
