//! Device drivers: the LED output device and the tick timer.

pub mod led;
pub mod tick_timer;
