//! Arithmetic and logic executors.
//!
//! The 8-bit operations all funnel through a handful of flag-computing
//! helpers so the register and immediate forms share semantics and only
//! differ in where the operand comes from and what the access costs.

use crate::bus::Bus;
use crate::cpu::{Cpu, FLAG_C, FLAG_H, FLAG_N, FLAG_Z, REG_HL_MEM};
use crate::decoder::Decoded;

fn add8(cpu: &mut Cpu, value: u8, carry_in: bool) {
    let carry = carry_in as u8;
    let result = cpu.a.wrapping_add(value).wrapping_add(carry);
    cpu.set_flag(FLAG_Z, result == 0);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, (cpu.a & 0x0F) + (value & 0x0F) + carry > 0x0F);
    cpu.set_flag(
        FLAG_C,
        cpu.a as u16 + value as u16 + carry as u16 > 0xFF,
    );
    cpu.a = result;
}

fn sub8(cpu: &mut Cpu, value: u8, carry_in: bool, store: bool) {
    let carry = carry_in as u8;
    let result = cpu.a.wrapping_sub(value).wrapping_sub(carry);
    cpu.set_flag(FLAG_Z, result == 0);
    cpu.set_flag(FLAG_N, true);
    cpu.set_flag(FLAG_H, (cpu.a & 0x0F) < (value & 0x0F) + carry);
    cpu.set_flag(FLAG_C, (cpu.a as u16) < value as u16 + carry as u16);
    if store {
        cpu.a = result;
    }
}

fn and8(cpu: &mut Cpu, value: u8) {
    cpu.a &= value;
    cpu.f = if cpu.a == 0 { FLAG_Z | FLAG_H } else { FLAG_H };
}

fn xor8(cpu: &mut Cpu, value: u8) {
    cpu.a ^= value;
    cpu.f = if cpu.a == 0 { FLAG_Z } else { 0 };
}

fn or8(cpu: &mut Cpu, value: u8) {
    cpu.a |= value;
    cpu.f = if cpu.a == 0 { FLAG_Z } else { 0 };
}

fn reg_operand(cpu: &Cpu, bus: &Bus, ins: &Decoded) -> (u8, u8) {
    let value = cpu.read_reg(bus, ins.fields.a);
    let cycles = if ins.fields.a == REG_HL_MEM { 2 } else { 1 };
    (value, cycles)
}

pub fn add_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    add8(cpu, value, false);
    cycles
}

pub fn adc_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    let carry = cpu.flag(FLAG_C);
    add8(cpu, value, carry);
    cycles
}

pub fn sub_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    sub8(cpu, value, false, true);
    cycles
}

pub fn sbc_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    let carry = cpu.flag(FLAG_C);
    sub8(cpu, value, carry, true);
    cycles
}

pub fn and_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    and8(cpu, value);
    cycles
}

pub fn xor_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    xor8(cpu, value);
    cycles
}

pub fn or_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    or8(cpu, value);
    cycles
}

pub fn cp_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let (value, cycles) = reg_operand(cpu, bus, ins);
    sub8(cpu, value, false, false);
    cycles
}

pub fn add_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    add8(cpu, ins.operands[0], false);
    2
}

pub fn adc_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    let carry = cpu.flag(FLAG_C);
    add8(cpu, ins.operands[0], carry);
    2
}

pub fn sub_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    sub8(cpu, ins.operands[0], false, true);
    2
}

pub fn sbc_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    let carry = cpu.flag(FLAG_C);
    sub8(cpu, ins.operands[0], carry, true);
    2
}

pub fn and_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    and8(cpu, ins.operands[0]);
    2
}

pub fn xor_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    xor8(cpu, ins.operands[0]);
    2
}

pub fn or_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    or8(cpu, ins.operands[0]);
    2
}

pub fn cp_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    sub8(cpu, ins.operands[0], false, false);
    2
}

/// INC r leaves carry alone.
pub fn inc_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.a);
    let result = value.wrapping_add(1);
    cpu.write_reg(bus, ins.fields.a, result);
    cpu.set_flag(FLAG_Z, result == 0);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, value & 0x0F == 0x0F);
    if ins.fields.a == REG_HL_MEM { 3 } else { 1 }
}

/// DEC r leaves carry alone.
pub fn dec_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.a);
    let result = value.wrapping_sub(1);
    cpu.write_reg(bus, ins.fields.a, result);
    cpu.set_flag(FLAG_Z, result == 0);
    cpu.set_flag(FLAG_N, true);
    cpu.set_flag(FLAG_H, value & 0x0F == 0);
    if ins.fields.a == REG_HL_MEM { 3 } else { 1 }
}

/// 16-bit INC touches no flags.
pub fn inc_pair(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    let value = cpu.pair(ins.fields.a).wrapping_add(1);
    cpu.set_pair(ins.fields.a, value);
    2
}

/// 16-bit DEC touches no flags.
pub fn dec_pair(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    let value = cpu.pair(ins.fields.a).wrapping_sub(1);
    cpu.set_pair(ins.fields.a, value);
    2
}

/// ADD HL,rr. Z is untouched; H and C come from bits 11 and 15.
pub fn add_hl_pair(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    let hl = cpu.hl();
    let value = cpu.pair(ins.fields.a);
    let (result, carry) = hl.overflowing_add(value);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    cpu.set_flag(FLAG_C, carry);
    cpu.set_hl(result);
    2
}

/// SP plus a signed byte. H and C reflect the unsigned addition of the
/// operand byte to SP's low byte; Z and N are always clear.
pub fn sp_plus_offset(cpu: &mut Cpu, offset: u8) -> u16 {
    let sp = cpu.sp;
    cpu.set_flag(FLAG_Z, false);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, (sp & 0x0F) + (offset as u16 & 0x0F) > 0x0F);
    cpu.set_flag(FLAG_C, (sp & 0xFF) + offset as u16 > 0xFF);
    sp.wrapping_add(offset as i8 as u16)
}

pub fn add_sp_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    cpu.sp = sp_plus_offset(cpu, ins.operands[0]);
    4
}

/// Decimal-adjust A after a BCD add or subtract, steered by N/H/C.
pub fn daa(cpu: &mut Cpu) -> u8 {
    let mut adjust = 0u8;
    let mut carry = cpu.flag(FLAG_C);
    if cpu.flag(FLAG_N) {
        if cpu.flag(FLAG_H) {
            adjust |= 0x06;
        }
        if carry {
            adjust |= 0x60;
        }
        cpu.a = cpu.a.wrapping_sub(adjust);
    } else {
        if cpu.flag(FLAG_H) || cpu.a & 0x0F > 0x09 {
            adjust |= 0x06;
        }
        if carry || cpu.a > 0x99 {
            adjust |= 0x60;
            carry = true;
        }
        cpu.a = cpu.a.wrapping_add(adjust);
    }
    cpu.set_flag(FLAG_Z, cpu.a == 0);
    cpu.set_flag(FLAG_H, false);
    cpu.set_flag(FLAG_C, carry);
    1
}

pub fn cpl(cpu: &mut Cpu) -> u8 {
    cpu.a = !cpu.a;
    cpu.set_flag(FLAG_N, true);
    cpu.set_flag(FLAG_H, true);
    1
}

pub fn scf(cpu: &mut Cpu) -> u8 {
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, false);
    cpu.set_flag(FLAG_C, true);
    1
}

pub fn ccf(cpu: &mut Cpu) -> u8 {
    let carry = cpu.flag(FLAG_C);
    cpu.set_flag(FLAG_N, false);
    cpu.set_flag(FLAG_H, false);
    cpu.set_flag(FLAG_C, !carry);
    1
}
