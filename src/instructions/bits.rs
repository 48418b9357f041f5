//! Rotate, shift, swap and single-bit executors.
//!
//! The CB-prefixed forms operate on any 3-bit selector target including
//! memory at HL; the four unprefixed accumulator rotates share the same
//! cores but always clear Z and cost a single cycle.

use crate::bus::Bus;
use crate::cpu::{Cpu, FLAG_C, FLAG_H, FLAG_N, FLAG_Z, REG_HL_MEM};
use crate::decoder::Decoded;

fn set_rotate_flags(cpu: &mut Cpu, result: u8, carry: bool) {
    cpu.set_flag(FLAG_Z, result == 0);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, false);
    cpu.set_flag(FLAG_C, carry);
}

fn rlc(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value.rotate_left(1);
    set_rotate_flags(cpu, result, value & 0x80 != 0);
    result
}

fn rrc(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value.rotate_right(1);
    set_rotate_flags(cpu, result, value & 0x01 != 0);
    result
}

fn rl(cpu: &mut Cpu, value: u8) -> u8 {
    let result = (value << 1) | cpu.flag(FLAG_C) as u8;
    set_rotate_flags(cpu, result, value & 0x80 != 0);
    result
}

fn rr(cpu: &mut Cpu, value: u8) -> u8 {
    let result = (value >> 1) | ((cpu.flag(FLAG_C) as u8) << 7);
    set_rotate_flags(cpu, result, value & 0x01 != 0);
    result
}

fn sla(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value << 1;
    set_rotate_flags(cpu, result, value & 0x80 != 0);
    result
}

/// Arithmetic right shift: bit 7 is preserved.
fn sra(cpu: &mut Cpu, value: u8) -> u8 {
    let result = (value >> 1) | (value & 0x80);
    set_rotate_flags(cpu, result, value & 0x01 != 0);
    result
}

fn swap(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value.rotate_left(4);
    set_rotate_flags(cpu, result, false);
    result
}

fn srl(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value >> 1;
    set_rotate_flags(cpu, result, value & 0x01 != 0);
    result
}

fn apply(
    cpu: &mut Cpu,
    bus: &mut Bus,
    ins: &Decoded,
    op: fn(&mut Cpu, u8) -> u8,
) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.a);
    let result = op(cpu, value);
    cpu.write_reg(bus, ins.fields.a, result);
    if ins.fields.a == REG_HL_MEM { 4 } else { 2 }
}

pub fn rlc_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, rlc)
}

pub fn rrc_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, rrc)
}

pub fn rl_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, rl)
}

pub fn rr_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, rr)
}

pub fn sla_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, sla)
}

pub fn sra_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, sra)
}

pub fn swap_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, swap)
}

pub fn srl_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    apply(cpu, bus, ins, srl)
}

/// BIT b,r: Z reflects the complement of the tested bit; carry is kept.
pub fn bit_test(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.b);
    cpu.set_flag(FLAG_Z, value & (1 << ins.fields.a) == 0);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, true);
    if ins.fields.b == REG_HL_MEM { 3 } else { 2 }
}

/// RES b,r: no flags.
pub fn bit_res(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.b);
    cpu.write_reg(bus, ins.fields.b, value & !(1 << ins.fields.a));
    if ins.fields.b == REG_HL_MEM { 4 } else { 2 }
}

/// SET b,r: no flags.
pub fn bit_set(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.b);
    cpu.write_reg(bus, ins.fields.b, value | (1 << ins.fields.a));
    if ins.fields.b == REG_HL_MEM { 4 } else { 2 }
}

// The unprefixed accumulator rotates always clear Z, even on a zero
// result, which is the one place they differ from their CB twins.

pub fn rlca(cpu: &mut Cpu) -> u8 {
    let a = cpu.a;
    cpu.a = rlc(cpu, a);
    cpu.set_flag(FLAG_Z, false);
    1
}

pub fn rrca(cpu: &mut Cpu) -> u8 {
    let a = cpu.a;
    cpu.a = rrc(cpu, a);
    cpu.set_flag(FLAG_Z, false);
    1
}

pub fn rla(cpu: &mut Cpu) -> u8 {
    let a = cpu.a;
    cpu.a = rl(cpu, a);
    cpu.set_flag(FLAG_Z, false);
    1
}

pub fn rra(cpu: &mut Cpu) -> u8 {
    let a = cpu.a;
    cpu.a = rr(cpu, a);
    cpu.set_flag(FLAG_Z, false);
    1
}
