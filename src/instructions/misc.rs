//! Control executors: NOP, HALT, STOP and interrupt-enable handling.

use log::debug;

use crate::cpu::Cpu;

pub fn nop() -> u8 {
    1
}

/// Sleep until an enabled interrupt becomes pending. The wake-up itself
/// happens in the CPU's interrupt check.
pub fn halt(cpu: &mut Cpu) -> u8 {
    cpu.halted = true;
    1
}

/// STOP is modeled as HALT. Its padding byte has already been fetched.
pub fn stop(cpu: &mut Cpu) -> u8 {
    debug!("STOP at {:#06X}, treating as HALT", cpu.pc.wrapping_sub(2));
    cpu.halted = true;
    1
}

/// DI takes effect immediately and cancels a pending EI delay.
pub fn di(cpu: &mut Cpu) -> u8 {
    cpu.ime = false;
    cpu.cancel_ime_enable();
    1
}

/// EI takes effect after the next instruction completes.
pub fn ei(cpu: &mut Cpu) -> u8 {
    cpu.schedule_ime_enable();
    1
}
