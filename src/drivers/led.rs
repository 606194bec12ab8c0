//! Digital output device (LED) with polarity semantics.
//!
//! Each LED is one line of a GPIO bank, identified by (bank, bit) with an
//! active-low flag. Construction is pure; the device only touches hardware
//! once [`Led::power_up`] maps it. All register access goes through the
//! [`GpioPort`] capability, so the driver is identical on device and host.
//!
//! ## Concurrency contract
//!
//! `turn_on`/`turn_off` use the bank's atomic set/reset write, so distinct
//! devices on the same bank may be driven from different contexts. They are
//! not reentrant-safe for the *same* device. `toggle` is a read-modify-write
//! on the output register and can race with any concurrent writer on the
//! bank.

use crate::ports::GpioPort;

pub struct Led {
    bank: usize,
    bit: u8,
    active_low: bool,
    mask: u16,
}

impl Led {
    /// Pure value initialisation — no hardware access. `bit` must be in
    /// `0..16`; out-of-range values are not validated here and produce
    /// undefined behaviour at the adapter boundary.
    pub const fn new(bank: usize, bit: u8, active_low: bool) -> Self {
        Self {
            bank,
            bit,
            active_low,
            mask: 1 << bit,
        }
    }

    /// Map the device to hardware: enable the bank clock, configure the
    /// line as a push-pull output, and force the logical off state.
    ///
    /// Call exactly once per device before any other operation. Operating
    /// an un-powered device is undefined behaviour (not guarded).
    pub fn power_up(&self, gpio: &mut impl GpioPort) {
        gpio.enable_bank_clock(self.bank);
        gpio.configure_output(self.bank, self.mask);
        self.turn_off(gpio);
    }

    /// Alternate configuration path: route the line to its PWM-capable
    /// peripheral function instead of plain output. Mutually exclusive
    /// with [`Led::power_up`] on the same device — last call wins.
    pub fn pwm_up(&self, gpio: &mut impl GpioPort) {
        gpio.enable_bank_clock(self.bank);
        gpio.configure_alternate(self.bank, self.mask);
    }

    /// Drive the line to the logical on level (atomic set/reset write).
    pub fn turn_on(&self, gpio: &mut impl GpioPort) {
        if self.active_low {
            gpio.reset_bits(self.bank, self.mask);
        } else {
            gpio.set_bits(self.bank, self.mask);
        }
    }

    /// Drive the line to the logical off level (atomic set/reset write).
    pub fn turn_off(&self, gpio: &mut impl GpioPort) {
        if self.active_low {
            gpio.set_bits(self.bank, self.mask);
        } else {
            gpio.reset_bits(self.bank, self.mask);
        }
    }

    /// Invert the physical line: read the input register, rewrite the
    /// output register. Not atomic — see the module concurrency contract.
    pub fn toggle(&self, gpio: &mut impl GpioPort) {
        let odr = gpio.read_output(self.bank);
        if gpio.read_input(self.bank) & self.mask != 0 {
            gpio.write_output(self.bank, odr & !self.mask);
        } else {
            gpio.write_output(self.bank, odr | self.mask);
        }
    }

    /// Logical on/off state, read back from the input register with the
    /// polarity flag reapplied.
    pub fn is_on(&self, gpio: &impl GpioPort) -> bool {
        let lit = gpio.read_input(self.bank) & self.mask != 0;
        if self.active_low { !lit } else { lit }
    }

    pub fn bank(&self) -> usize {
        self.bank
    }

    pub fn bit(&self) -> u8 {
        self.bit
    }

    pub fn mask(&self) -> u16 {
        self.mask
    }
}
