//! GPIO adapter — the only module that touches pin hardware.
//!
//! Implements the register-level [`GpioPort`] capability over banks of 16
//! lines. The core addresses lines as (bank, bit-mask); this adapter owns
//! the platform mapping.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: maps `bank * 16 + bit` onto the flat GPIO number space and
//! drives real pins through raw sys calls (`gpio_set_level` compiles down
//! to the W1TS/W1TC set/clear registers, so `set_bits`/`reset_bits` keep
//! their atomic no-RMW contract). On host: a register-accurate in-memory
//! simulation — output writes loop back into the input register for
//! configured output lines, which is what lets `is_on`/`toggle` behave as
//! they do on silicon.
//!
//! Out-of-range banks or masks touching unconfigured lines are undefined
//! behaviour by contract; nothing here validates them.

use crate::pins::GPIO_BANKS;
use crate::ports::GpioPort;

/// Lines per bank.
const BANK_WIDTH: u8 = 16;

/// Shadow state for one bank. On the device target this mirrors what was
/// written (the sys API has no bank-wide output read-back); on host it *is*
/// the register file.
#[derive(Debug, Clone, Copy, Default)]
struct BankState {
    clock_enabled: bool,
    /// Lines configured as push-pull outputs.
    output_mask: u16,
    /// Lines handed to their alternate (peripheral) function.
    alternate_mask: u16,
    /// Lines configured as plain inputs.
    input_mask: u16,
    /// Output data register.
    odr: u16,
    /// Input data register.
    idr: u16,
}

pub struct GpioAdapter {
    banks: [BankState; GPIO_BANKS],
}

impl GpioAdapter {
    pub fn new() -> Self {
        Self {
            banks: [BankState::default(); GPIO_BANKS],
        }
    }

    #[cfg(target_os = "espidf")]
    fn pin_number(bank: usize, bit: u8) -> i32 {
        (bank * BANK_WIDTH as usize) as i32 + i32::from(bit)
    }

    /// Apply `f` to every set bit of `mask`.
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    fn for_each_bit(mask: u16, mut f: impl FnMut(u8)) {
        for bit in 0..BANK_WIDTH {
            if mask & (1 << bit) != 0 {
                f(bit);
            }
        }
    }

    /// Mirror output-register state into the input register for lines
    /// configured as outputs (push-pull lines read back what they drive).
    fn loopback(bank: &mut BankState) {
        bank.idr = (bank.idr & !bank.output_mask) | (bank.odr & bank.output_mask);
    }

    /// Force an input line's level. Host-only test hook standing in for
    /// the external circuit.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_input(&mut self, bank: usize, mask: u16, high: bool) {
        if high {
            self.banks[bank].idr |= mask;
        } else {
            self.banks[bank].idr &= !mask;
        }
    }

    #[cfg(target_os = "espidf")]
    fn configure(bank: usize, mask: u16, mode: u32) {
        use esp_idf_svc::sys::*;

        let mut pin_bit_mask: u64 = 0;
        Self::for_each_bit(mask, |bit| {
            pin_bit_mask |= 1u64 << Self::pin_number(bank, bit);
        });
        let cfg = gpio_config_t {
            pin_bit_mask,
            mode,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: gpio_config validates the pin mask internally; called
        // from the single main task during bring-up.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            // Per the device contract there is no error path upward; a
            // misconfigured line is logged and left dead.
            log::error!("gpio: config failed for bank {} mask {:#06x} (rc={})", bank, mask, ret);
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_input_hw(&self, bank: usize) -> u16 {
        let mut idr: u16 = 0;
        Self::for_each_bit(
            self.banks[bank].output_mask | self.banks[bank].input_mask,
            |bit| {
                // SAFETY: gpio_get_level is a read-only register access.
                let high =
                    unsafe { esp_idf_svc::sys::gpio_get_level(Self::pin_number(bank, bit)) };
                if high != 0 {
                    idr |= 1 << bit;
                }
            },
        );
        idr
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_input_hw(&self, bank: usize) -> u16 {
        self.banks[bank].idr
    }

    /// Whether the bank's clock domain has been enabled.
    pub fn bank_clock_enabled(&self, bank: usize) -> bool {
        self.banks[bank].clock_enabled
    }

    /// Whether every line in `mask` is configured as a push-pull output.
    pub fn is_output(&self, bank: usize, mask: u16) -> bool {
        self.banks[bank].output_mask & mask == mask
    }

    /// Whether every line in `mask` is routed to its alternate function.
    pub fn is_alternate(&self, bank: usize, mask: u16) -> bool {
        self.banks[bank].alternate_mask & mask == mask
    }

    /// Whether every line in `mask` is configured as a plain input.
    pub fn is_input(&self, bank: usize, mask: u16) -> bool {
        self.banks[bank].input_mask & mask == mask
    }

    #[cfg(target_os = "espidf")]
    fn write_level(bank: usize, bit: u8, high: bool) {
        // SAFETY: gpio_set_level on a configured output pin is a single
        // W1TS/W1TC register write; safe from any context.
        unsafe {
            esp_idf_svc::sys::gpio_set_level(
                Self::pin_number(bank, bit),
                u32::from(high),
            );
        }
    }
}

impl Default for GpioAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioPort for GpioAdapter {
    fn enable_bank_clock(&mut self, bank: usize) {
        // ESP32 GPIO banks have no gateable clock (the IO MUX is always
        // powered); the shadow flag keeps the bring-up sequence honest.
        self.banks[bank].clock_enabled = true;
    }

    fn configure_output(&mut self, bank: usize, mask: u16) {
        let b = &mut self.banks[bank];
        b.output_mask |= mask;
        b.alternate_mask &= !mask;
        b.input_mask &= !mask;

        #[cfg(target_os = "espidf")]
        Self::configure(bank, mask, esp_idf_svc::sys::gpio_mode_t_GPIO_MODE_OUTPUT);

        Self::loopback(&mut self.banks[bank]);
    }

    fn configure_alternate(&mut self, bank: usize, mask: u16) {
        let b = &mut self.banks[bank];
        b.alternate_mask |= mask;
        b.output_mask &= !mask;
        b.input_mask &= !mask;
        b.idr &= !mask;

        // On ESP-IDF the peripheral claims the line through the GPIO
        // matrix when its driver attaches; configuring plain output here
        // leaves the line parked until then.
        #[cfg(target_os = "espidf")]
        Self::configure(bank, mask, esp_idf_svc::sys::gpio_mode_t_GPIO_MODE_OUTPUT);
    }

    fn configure_input(&mut self, bank: usize, mask: u16) {
        let b = &mut self.banks[bank];
        b.input_mask |= mask;
        b.output_mask &= !mask;
        b.alternate_mask &= !mask;

        #[cfg(target_os = "espidf")]
        Self::configure(bank, mask, esp_idf_svc::sys::gpio_mode_t_GPIO_MODE_INPUT);
    }

    fn set_bits(&mut self, bank: usize, mask: u16) {
        self.banks[bank].odr |= mask;

        #[cfg(target_os = "espidf")]
        Self::for_each_bit(mask, |bit| Self::write_level(bank, bit, true));

        #[cfg(not(target_os = "espidf"))]
        Self::loopback(&mut self.banks[bank]);
    }

    fn reset_bits(&mut self, bank: usize, mask: u16) {
        self.banks[bank].odr &= !mask;

        #[cfg(target_os = "espidf")]
        Self::for_each_bit(mask, |bit| Self::write_level(bank, bit, false));

        #[cfg(not(target_os = "espidf"))]
        Self::loopback(&mut self.banks[bank]);
    }

    fn read_input(&self, bank: usize) -> u16 {
        self.read_input_hw(bank)
    }

    fn read_output(&self, bank: usize) -> u16 {
        self.banks[bank].odr
    }

    fn write_output(&mut self, bank: usize, value: u16) {
        self.banks[bank].odr = value;

        #[cfg(target_os = "espidf")]
        Self::for_each_bit(self.banks[bank].output_mask, |bit| {
            Self::write_level(bank, bit, value & (1 << bit) != 0);
        });

        #[cfg(not(target_os = "espidf"))]
        Self::loopback(&mut self.banks[bank]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_clock_tracks_enable() {
        let mut gpio = GpioAdapter::new();
        assert!(!gpio.bank_clock_enabled(2));
        gpio.enable_bank_clock(2);
        assert!(gpio.bank_clock_enabled(2));
    }

    #[test]
    fn outputs_loop_back_into_input_register() {
        let mut gpio = GpioAdapter::new();
        gpio.enable_bank_clock(0);
        gpio.configure_output(0, 0b1010);
        gpio.set_bits(0, 0b1000);
        assert_eq!(gpio.read_input(0), 0b1000);
        assert_eq!(gpio.read_output(0), 0b1000);
        gpio.reset_bits(0, 0b1000);
        assert_eq!(gpio.read_input(0), 0);
    }

    #[test]
    fn set_and_reset_touch_only_their_mask() {
        let mut gpio = GpioAdapter::new();
        gpio.configure_output(1, 0b0110);
        gpio.set_bits(1, 0b0110);
        gpio.reset_bits(1, 0b0010);
        assert_eq!(gpio.read_output(1), 0b0100);
    }

    #[test]
    #[cfg(not(target_os = "espidf"))]
    fn input_lines_ignore_output_writes() {
        let mut gpio = GpioAdapter::new();
        gpio.configure_input(0, 0b0001);
        gpio.configure_output(0, 0b0010);
        gpio.sim_set_input(0, 0b0001, true);
        gpio.write_output(0, 0b0011);
        // Only the output line follows the output register.
        assert_eq!(gpio.read_input(0), 0b0011);
        gpio.sim_set_input(0, 0b0001, false);
        assert_eq!(gpio.read_input(0), 0b0010);
    }

    #[test]
    fn alternate_reconfiguration_wins_over_output() {
        let mut gpio = GpioAdapter::new();
        gpio.configure_output(0, 0b0100);
        gpio.set_bits(0, 0b0100);
        assert!(gpio.is_output(0, 0b0100));
        gpio.configure_alternate(0, 0b0100);
        assert!(gpio.is_alternate(0, 0b0100));
        assert!(!gpio.is_output(0, 0b0100));
        // The line no longer reads back as a driven output.
        assert_eq!(gpio.read_input(0), 0);
    }

    #[test]
    fn input_configuration_is_tracked() {
        let mut gpio = GpioAdapter::new();
        gpio.configure_input(0, 0b0001);
        assert!(gpio.is_input(0, 0b0001));
        assert!(!gpio.is_output(0, 0b0001));
    }
}
