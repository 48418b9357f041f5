//! Jump, call and return executors.
//!
//! Conditional forms evaluate the 2-bit condition code from the opcode's
//! `a` field (0 = NZ, 1 = Z, 2 = NC, 3 = C) and report the taken or
//! not-taken cycle cost accordingly.

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::decoder::Decoded;

pub fn jp_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    cpu.pc = ins.operand_u16();
    4
}

pub fn jp_cond(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    if cpu.condition(ins.fields.a) {
        cpu.pc = ins.operand_u16();
        4
    } else {
        3
    }
}

fn relative_jump(cpu: &mut Cpu, offset: u8) {
    // PC already points past the operand; the offset is signed.
    cpu.pc = cpu.pc.wrapping_add(offset as i8 as u16);
}

pub fn jr_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    relative_jump(cpu, ins.operands[0]);
    3
}

pub fn jr_cond(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    if cpu.condition(ins.fields.a) {
        relative_jump(cpu, ins.operands[0]);
        3
    } else {
        2
    }
}

pub fn jp_hl(cpu: &mut Cpu) -> u8 {
    cpu.pc = cpu.hl();
    1
}

pub fn call_imm(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    cpu.push16(bus, cpu.pc);
    cpu.pc = ins.operand_u16();
    6
}

pub fn call_cond(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    if cpu.condition(ins.fields.a) {
        cpu.push16(bus, cpu.pc);
        cpu.pc = ins.operand_u16();
        6
    } else {
        3
    }
}

pub fn ret(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.pc = cpu.pop16(bus);
    4
}

pub fn ret_cond(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    if cpu.condition(ins.fields.a) {
        cpu.pc = cpu.pop16(bus);
        5
    } else {
        2
    }
}

/// RETI re-enables IME immediately, without EI's one-instruction delay.
pub fn reti(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.pc = cpu.pop16(bus);
    cpu.ime = true;
    4
}

/// RST jumps to one of the eight fixed handlers at `a * 8`.
pub fn rst(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    cpu.push16(bus, cpu.pc);
    cpu.pc = ins.fields.a as u16 * 8;
    4
}
