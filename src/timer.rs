//! Divider and timer unit.
//!
//! A 16-bit counter increments once per clock tick; DIV is its high byte.
//! TIMA increments on falling edges of a counter bit selected by TAC's
//! frequency field, gated by the TAC enable bit. When TIMA overflows it
//! reads zero for one tick and the reload from TMA (plus the timer
//! interrupt) lands on the following tick, matching the hardware's delayed
//! reload that games probe for.

use crate::bus::{self, Bus, Interrupt};

const TAC_ENABLE: u8 = 0x04;
const TAC_FREQUENCY: u8 = 0x03;

/// Counter bit watched for falling edges, per TAC frequency selection.
/// 00 = 4096 Hz, 01 = 262144 Hz, 10 = 65536 Hz, 11 = 16384 Hz.
const fn frequency_bit(tac: u8) -> u16 {
    match tac & TAC_FREQUENCY {
        0 => 9,
        1 => 3,
        2 => 5,
        _ => 7,
    }
}

pub struct Timer {
    counter: u16,
    prev_bit: bool,
    reload_pending: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            counter: 0,
            prev_bit: false,
            reload_pending: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance one clock tick.
    pub fn tick(&mut self, bus: &mut Bus) {
        // A reload latched on the previous tick resolves before anything
        // else, so TIMA reads 0 for exactly one tick after overflow.
        if self.reload_pending {
            self.reload_pending = false;
            bus.write(bus::TIMA, bus.read(bus::TMA));
            bus.request_interrupt(Interrupt::Timer);
        }

        self.counter = self.counter.wrapping_add(1);
        bus.write(bus::DIV, (self.counter >> 8) as u8);

        let tac = bus.read(bus::TAC);
        let bit = tac & TAC_ENABLE != 0
            && self.counter & (1 << frequency_bit(tac)) != 0;
        if self.prev_bit && !bit {
            self.increment_tima(bus);
        }
        self.prev_bit = bit;
    }

    fn increment_tima(&mut self, bus: &mut Bus) {
        let tima = bus.read(bus::TIMA);
        if tima == 0xFF {
            bus.write(bus::TIMA, 0);
            self.reload_pending = true;
        } else {
            bus.write(bus::TIMA, tima + 1);
        }
    }

    /// Writing any value to DIV zeroes the whole internal counter.
    pub fn reset_divider(&mut self, bus: &mut Bus) {
        self.counter = 0;
        bus.write(bus::DIV, 0);
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
