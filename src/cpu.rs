//! SM83 CPU core.
//!
//! [`Cpu::step`] runs one instruction (or one interrupt dispatch, or one
//! idle HALT cycle) and returns its cost in machine cycles. One machine
//! cycle is four clock ticks; the driver converts before stepping the
//! peripherals.

use log::{debug, warn};

use crate::bus::{Bus, Interrupt};
use crate::decoder::{self, Decoded};
use crate::instructions;
use crate::Error;

pub const FLAG_Z: u8 = 0x80;
pub const FLAG_N: u8 = 0x40;
pub const FLAG_H: u8 = 0x20;
pub const FLAG_C: u8 = 0x10;

/// 3-bit register selector values as encoded in opcodes.
pub const REG_B: u8 = 0;
pub const REG_C: u8 = 1;
pub const REG_D: u8 = 2;
pub const REG_E: u8 = 3;
pub const REG_H: u8 = 4;
pub const REG_L: u8 = 5;
/// Selector 6 addresses memory at HL rather than a register.
pub const REG_HL_MEM: u8 = 6;

/// Machine cycles consumed by an interrupt dispatch.
const INTERRUPT_DISPATCH_CYCLES: u8 = 5;

pub struct Cpu {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    /// Interrupt master enable.
    pub ime: bool,
    /// Countdown for EI's one-instruction enable delay. Set to 2 by EI,
    /// decremented after each instruction; IME turns on when it expires.
    ime_enable_delay: u8,
    pub halted: bool,
}

impl Cpu {
    /// Post-boot-ROM register state. Execution starts at the cartridge
    /// entry point with the stack at the top of HRAM.
    pub fn new() -> Self {
        Self {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
            ime: false,
            ime_enable_delay: 0,
            halted: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // 16-bit register pair views.

    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f])
    }

    pub fn set_af(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        // Low nibble of F does not exist in hardware.
        self.f = value as u8 & 0xF0;
    }

    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    /// Read a 16-bit pair by its 2-bit opcode selector (3 = SP).
    pub fn pair(&self, selector: u8) -> u16 {
        match selector & 3 {
            0 => self.bc(),
            1 => self.de(),
            2 => self.hl(),
            _ => self.sp,
        }
    }

    /// Write a 16-bit pair by its 2-bit opcode selector (3 = SP).
    pub fn set_pair(&mut self, selector: u8, value: u16) {
        match selector & 3 {
            0 => self.set_bc(value),
            1 => self.set_de(value),
            2 => self.set_hl(value),
            _ => self.sp = value,
        }
    }

    /// Read an 8-bit operand by its 3-bit opcode selector. Selector 6 reads
    /// memory at HL, which is why the bus is threaded through.
    pub fn read_reg(&self, bus: &Bus, selector: u8) -> u8 {
        match selector & 7 {
            REG_B => self.b,
            REG_C => self.c,
            REG_D => self.d,
            REG_E => self.e,
            REG_H => self.h,
            REG_L => self.l,
            REG_HL_MEM => bus.read(self.hl()),
            // 7 selects A.
            _ => self.a,
        }
    }

    /// Write an 8-bit operand by its 3-bit opcode selector.
    pub fn write_reg(&mut self, bus: &mut Bus, selector: u8, value: u8) {
        match selector & 7 {
            REG_B => self.b = value,
            REG_C => self.c = value,
            REG_D => self.d = value,
            REG_E => self.e = value,
            REG_H => self.h = value,
            REG_L => self.l = value,
            REG_HL_MEM => bus.write(self.hl(), value),
            // 7 selects A.
            _ => self.a = value,
        }
    }

    // Flags.

    pub fn flag(&self, mask: u8) -> bool {
        self.f & mask != 0
    }

    pub fn set_flag(&mut self, mask: u8, set: bool) {
        if set {
            self.f |= mask;
        } else {
            self.f &= !mask;
        }
    }

    /// Evaluate a 2-bit condition code: 0 = NZ, 1 = Z, 2 = NC, 3 = C.
    pub fn condition(&self, code: u8) -> bool {
        match code & 3 {
            0 => !self.flag(FLAG_Z),
            1 => self.flag(FLAG_Z),
            2 => !self.flag(FLAG_C),
            _ => self.flag(FLAG_C),
        }
    }

    // Stack.

    pub fn push16(&mut self, bus: &mut Bus, value: u16) {
        self.sp = self.sp.wrapping_sub(1);
        bus.write(self.sp, (value >> 8) as u8);
        self.sp = self.sp.wrapping_sub(1);
        bus.write(self.sp, value as u8);
    }

    pub fn pop16(&mut self, bus: &Bus) -> u16 {
        let lo = bus.read(self.sp);
        self.sp = self.sp.wrapping_add(1);
        let hi = bus.read(self.sp);
        self.sp = self.sp.wrapping_add(1);
        u16::from_be_bytes([hi, lo])
    }

    // Fetch.

    fn fetch8(&mut self, bus: &Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Arm the one-instruction delay after EI.
    pub fn schedule_ime_enable(&mut self) {
        self.ime_enable_delay = 2;
    }

    /// Discard an armed EI delay (DI between EI and its taking effect).
    pub fn cancel_ime_enable(&mut self) {
        self.ime_enable_delay = 0;
    }

    /// Run one step: service a pending interrupt, execute one instruction,
    /// or burn one idle cycle while halted. Returns the cost in machine
    /// cycles.
    pub fn step(&mut self, bus: &mut Bus) -> Result<u8, Error> {
        if let Some(cycles) = self.service_interrupts(bus) {
            return Ok(cycles);
        }
        if self.halted {
            return Ok(1);
        }

        // IME turns on after the instruction following EI completes, so
        // sample the countdown before executing.
        let enable_after = self.ime_enable_delay == 1;

        let decoded = self.fetch_and_decode(bus)?;
        let cycles = instructions::execute(self, bus, &decoded);

        if self.ime_enable_delay > 0 {
            self.ime_enable_delay -= 1;
            if enable_after {
                self.ime = true;
            }
        }
        Ok(cycles)
    }

    fn fetch_and_decode(&mut self, bus: &Bus) -> Result<Decoded, Error> {
        let pc = self.pc;
        let opcode = self.fetch8(bus);
        let mut decoded = if opcode == 0xCB {
            let cb_opcode = self.fetch8(bus);
            decoder::decode_cb(cb_opcode, pc)?
        } else {
            match decoder::decode(opcode, pc) {
                Ok(decoded) => decoded,
                Err(err) => {
                    warn!("undefined opcode {opcode:#04X} at {pc:#06X}");
                    return Err(err);
                }
            }
        };
        for i in 0..decoded.operand_count as usize {
            decoded.operands[i] = self.fetch8(bus);
        }
        Ok(decoded)
    }

    /// If IME is set and an enabled interrupt is pending, dispatch the
    /// highest-priority one: clear its IF bit, disable IME, push PC and jump
    /// to the fixed vector. A pending interrupt also wakes a halted CPU
    /// whether or not IME is set.
    fn service_interrupts(&mut self, bus: &mut Bus) -> Option<u8> {
        let pending = bus.pending_interrupts();
        if pending == 0 {
            return None;
        }
        self.halted = false;
        if !self.ime {
            return None;
        }

        let interrupt = Self::next_interrupt(pending);
        debug!("dispatching {interrupt:?} to {:#06X}", interrupt.vector());
        self.ime = false;
        self.ime_enable_delay = 0;
        bus.clear_interrupt(interrupt);
        self.push16(bus, self.pc);
        self.pc = interrupt.vector();
        Some(INTERRUPT_DISPATCH_CYCLES)
    }

    fn next_interrupt(pending: u8) -> Interrupt {
        // Priority order, VBlank first. `pending` is nonzero here.
        if pending & Interrupt::VBlank.mask() != 0 {
            Interrupt::VBlank
        } else if pending & Interrupt::Stat.mask() != 0 {
            Interrupt::Stat
        } else if pending & Interrupt::Timer.mask() != 0 {
            Interrupt::Timer
        } else if pending & Interrupt::Serial.mask() != 0 {
            Interrupt::Serial
        } else {
            Interrupt::Joypad
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
