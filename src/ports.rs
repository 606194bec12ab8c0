//! Port traits — the boundary between the control core and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ WateringController (domain)
//! ```
//!
//! Driven adapters (GPIO registers, the tick timer, the drain source, the
//! report sink) implement these traits. The controller and the LED driver
//! consume them via generics, so the core never touches platform registers
//! directly and every scenario runs against mocks on the host.

// ───────────────────────────────────────────────────────────────
// GPIO port (register-level bank capability)
// ───────────────────────────────────────────────────────────────

/// Register-level access to a GPIO bank: a group of up to 16 lines sharing
/// one set of control registers, addressed by a 16-bit line mask.
///
/// None of these operations report errors. An out-of-range bank or a mask
/// for an unconfigured line is undefined behaviour at the adapter boundary
/// — the fixed board map in [`pins`](crate::pins) is the validity contract,
/// not runtime checks.
pub trait GpioPort {
    /// Enable the clock domain feeding `bank`. Idempotent.
    fn enable_bank_clock(&mut self, bank: usize);

    /// Configure every line in `mask` as a push-pull digital output.
    fn configure_output(&mut self, bank: usize, mask: u16);

    /// Configure every line in `mask` for its alternate (peripheral)
    /// function instead of plain output. Last configuration call wins.
    fn configure_alternate(&mut self, bank: usize, mask: u16);

    /// Configure every line in `mask` as a plain digital input.
    fn configure_input(&mut self, bank: usize, mask: u16);

    /// Drive every line in `mask` high via a single atomic set write.
    /// No read-modify-write — safe to interleave with other masks on the
    /// same bank from another context.
    fn set_bits(&mut self, bank: usize, mask: u16);

    /// Drive every line in `mask` low via a single atomic reset write.
    fn reset_bits(&mut self, bank: usize, mask: u16);

    /// Read the bank's input register.
    fn read_input(&self, bank: usize) -> u16;

    /// Read the bank's output register.
    fn read_output(&self, bank: usize) -> u16;

    /// Overwrite the bank's output register. This is the read-modify-write
    /// path (used by toggle) and is not atomic with respect to concurrent
    /// writers on the same bank.
    fn write_output(&mut self, bank: usize, value: u16);
}

// ───────────────────────────────────────────────────────────────
// Delay port (tick timer)
// ───────────────────────────────────────────────────────────────

/// Blocking tick-based delay.
///
/// `sleep` is a cooperative spin-wait, not a scheduler yield: the calling
/// context makes no progress until at least `ticks` counter increments have
/// elapsed. The achieved delay lands in `[ticks, ticks + 1)` interrupt
/// periods depending on phase alignment.
pub trait DelayPort {
    /// Current value of the monotonic tick counter (wraps at u32 width).
    fn ticks(&self) -> u32;

    /// Block until at least `ticks` increments have elapsed.
    fn sleep(&self, ticks: u32);
}

// ───────────────────────────────────────────────────────────────
// Drain port (daily level decrement source)
// ───────────────────────────────────────────────────────────────

/// Source of the bounded pseudo-random daily drain amount.
///
/// Implementations return a value in `0..=max_daily_drain`; the controller
/// subtracts it from the level without clamping (unsigned wrap preserved —
/// see DESIGN.md).
pub trait DrainPort {
    fn next_drain(&mut self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Report sink (diagnostic output)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`ControllerEvent`]s through this port.
/// Adapters decide where they go (serial log in production, a Vec in
/// tests). Reporting is observability only — never part of control-flow
/// correctness.
pub trait ReportSink {
    fn emit(&mut self, event: &ControllerEvent);
}

/// Structured events emitted by the watering controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The daily drain was applied; carries the post-drain level.
    LevelSampled { level: u32 },

    /// The motor switched on; carries the level after the simulated
    /// refill increment.
    MotorOn { level: u32 },

    /// The motor switched off (level returned exactly to the set-point).
    MotorOff { level: u32 },
}
