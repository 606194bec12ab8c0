//! GPIO line assignments for the Greenthumb main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding bank/bit pairs. Lines are addressed as (bank, bit): a bank
//! is a group of up to 16 lines sharing one set of control registers, and
//! the hardware adapter maps the pair onto the platform's flat pin space.

/// Number of GPIO banks the adapter exposes.
pub const GPIO_BANKS: usize = 3;

// ---------------------------------------------------------------------------
// Status LEDs (discrete, push-pull, active high)
// ---------------------------------------------------------------------------

/// Bank shared by all four status LEDs.
pub const LED_BANK: usize = 0;

/// Bit index of each LED within [`LED_BANK`], in array order.
/// Index 0 doubles as the motor-running indicator, index 2 as the
/// level-OK indicator; 1 and 3 are spares driven only at bring-up.
pub const LED_BITS: [u8; 4] = [11, 12, 13, 14];

/// All board LEDs are wired anode-to-pin (drive high to light).
pub const LED_ACTIVE_LOW: bool = false;

/// LED array index of the motor-running indicator.
pub const MOTOR_LED: usize = 0;
/// LED array index of the level-OK indicator.
pub const OK_LED: usize = 2;

// ---------------------------------------------------------------------------
// User button (input, no internal pull — external resistor on the board)
// ---------------------------------------------------------------------------

pub const BUTTON_BANK: usize = 0;
pub const BUTTON_BIT: u8 = 0;

// ---------------------------------------------------------------------------
// Tick timer
// ---------------------------------------------------------------------------

/// Periodic-interrupt rate of the tick timer, in ticks per second.
pub const TICK_FREQUENCY_HZ: u32 = 1_000;
