//! Tick timer: monotonic counter driven by a periodic hardware interrupt.
//!
//! The counter is the only state shared between the interrupt context and
//! the control flow — single writer (the timer callback), single reader
//! (the spin-wait). An `AtomicU32` matches the platform's atomic read
//! width, so reads are never torn; the counter wraps at u32 width.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: a 1 kHz `esp_timer` periodic callback increments the
//! counter. On host: `start()` spawns a dedicated 1 kHz feeder thread (the
//! hosted stand-in for the interrupt), and tests can drive the counter
//! manually through [`sim_tick`].

use core::sync::atomic::{AtomicU32, Ordering};

use log::info;

use crate::pins::TICK_FREQUENCY_HZ;
use crate::ports::DelayPort;

static TICK_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_idf_svc::sys::esp_timer_handle_t = core::ptr::null_mut();

/// Advance the tick counter by one. Host-only test hook standing in for
/// the timer interrupt; safe to call from any thread (lock-free).
#[cfg(not(target_os = "espidf"))]
pub fn sim_tick() {
    TICK_COUNT.fetch_add(1, Ordering::Release);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    // Interrupt-context body: one atomic increment, nothing else.
    TICK_COUNT.fetch_add(1, Ordering::Release);
}

/// The system tick timer.
///
/// State machine: {Uninitialized} → [`TickTimer::start`] → {Running}.
/// There is no stop — the timer runs until power-off.
pub struct TickTimer;

impl TickTimer {
    /// Ticks per second, fixed at compile time.
    pub const FREQUENCY_HZ: u32 = TICK_FREQUENCY_HZ;

    pub const fn new() -> Self {
        Self
    }

    /// Configure the periodic interrupt source and zero the counter.
    ///
    /// Calling twice resets the counter. Must not be called from the timer
    /// callback itself.
    #[cfg(target_os = "espidf")]
    pub fn start(&mut self) {
        use esp_idf_svc::sys::*;

        // SAFETY: TICK_TIMER is written once here from the single main
        // task before the control loop starts; the callback only touches
        // the atomic counter.
        unsafe {
            if TICK_TIMER.is_null() {
                let args = esp_timer_create_args_t {
                    callback: Some(tick_cb),
                    arg: core::ptr::null_mut(),
                    dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                    name: c"tick".as_ptr(),
                    skip_unhandled_events: false,
                };
                let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
                if ret != ESP_OK {
                    log::error!(
                        "tick_timer: create failed (rc={}) — sleep() will never return",
                        ret
                    );
                    return;
                }
                let period_us = 1_000_000 / u64::from(Self::FREQUENCY_HZ);
                let ret = esp_timer_start_periodic(TICK_TIMER, period_us);
                if ret != ESP_OK {
                    log::error!("tick_timer: start failed (rc={})", ret);
                    return;
                }
            }
        }
        TICK_COUNT.store(0, Ordering::Release);
        info!("tick_timer: running at {} Hz", Self::FREQUENCY_HZ);
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn start(&mut self) {
        use std::sync::atomic::AtomicBool;

        static FEEDER_RUNNING: AtomicBool = AtomicBool::new(false);

        TICK_COUNT.store(0, Ordering::Release);
        if !FEEDER_RUNNING.swap(true, Ordering::AcqRel) {
            let period = std::time::Duration::from_micros(
                1_000_000 / u64::from(Self::FREQUENCY_HZ),
            );
            std::thread::spawn(move || loop {
                std::thread::sleep(period);
                TICK_COUNT.fetch_add(1, Ordering::Release);
            });
        }
        info!("tick_timer(sim): feeder thread at {} Hz", Self::FREQUENCY_HZ);
    }

    /// Current tick counter value.
    pub fn ticks(&self) -> u32 {
        TICK_COUNT.load(Ordering::Acquire)
    }

    /// Block until at least `ticks` counter increments have elapsed since
    /// the call began.
    ///
    /// This is a cooperative spin-wait — no other work proceeds in the
    /// calling context. The achieved delay is within `[ticks, ticks + 1)`
    /// interrupt periods depending on phase alignment.
    pub fn sleep(&self, ticks: u32) {
        let start = self.ticks();
        while self.ticks().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayPort for TickTimer {
    fn ticks(&self) -> u32 {
        TickTimer::ticks(self)
    }

    fn sleep(&self, ticks: u32) {
        TickTimer::sleep(self, ticks);
    }
}
