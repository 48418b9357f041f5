//! Load, store and stack executors.

use crate::bus::Bus;
use crate::cpu::{Cpu, REG_HL_MEM};
use crate::decoder::Decoded;
use crate::instructions::alu;

pub fn ld_reg_reg(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.read_reg(bus, ins.fields.b);
    cpu.write_reg(bus, ins.fields.a, value);
    // Both selectors being 6 would be HALT, so at most one memory access.
    if ins.fields.a == REG_HL_MEM || ins.fields.b == REG_HL_MEM {
        2
    } else {
        1
    }
}

pub fn ld_reg_imm(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    cpu.write_reg(bus, ins.fields.a, ins.operands[0]);
    if ins.fields.a == REG_HL_MEM { 3 } else { 2 }
}

pub fn ld_a_from_bc(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.a = bus.read(cpu.bc());
    2
}

pub fn ld_a_from_de(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.a = bus.read(cpu.de());
    2
}

pub fn ld_bc_from_a(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    bus.write(cpu.bc(), cpu.a);
    2
}

pub fn ld_de_from_a(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    bus.write(cpu.de(), cpu.a);
    2
}

pub fn ld_a_from_addr(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    cpu.a = bus.read(ins.operand_u16());
    4
}

pub fn ld_addr_from_a(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    bus.write(ins.operand_u16(), cpu.a);
    4
}

// High-page (0xFF00 + offset) forms.

pub fn ldh_a_from_c(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.a = bus.read(0xFF00 | cpu.c as u16);
    2
}

pub fn ldh_c_from_a(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    bus.write(0xFF00 | cpu.c as u16, cpu.a);
    2
}

pub fn ldh_a_from_imm(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    cpu.a = bus.read(0xFF00 | ins.operands[0] as u16);
    3
}

pub fn ldh_imm_from_a(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    bus.write(0xFF00 | ins.operands[0] as u16, cpu.a);
    3
}

// Post-increment / post-decrement HL forms.

pub fn ld_a_from_hl_dec(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    let hl = cpu.hl();
    cpu.a = bus.read(hl);
    cpu.set_hl(hl.wrapping_sub(1));
    2
}

pub fn ld_hl_dec_from_a(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    let hl = cpu.hl();
    bus.write(hl, cpu.a);
    cpu.set_hl(hl.wrapping_sub(1));
    2
}

pub fn ld_a_from_hl_inc(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    let hl = cpu.hl();
    cpu.a = bus.read(hl);
    cpu.set_hl(hl.wrapping_add(1));
    2
}

pub fn ld_hl_inc_from_a(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    let hl = cpu.hl();
    bus.write(hl, cpu.a);
    cpu.set_hl(hl.wrapping_add(1));
    2
}

pub fn ld_pair_imm(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    cpu.set_pair(ins.fields.a, ins.operand_u16());
    3
}

pub fn ld_addr_from_sp(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let addr = ins.operand_u16();
    bus.write(addr, cpu.sp as u8);
    bus.write(addr.wrapping_add(1), (cpu.sp >> 8) as u8);
    5
}

pub fn ld_sp_from_hl(cpu: &mut Cpu) -> u8 {
    cpu.sp = cpu.hl();
    2
}

pub fn ld_hl_from_sp_offset(cpu: &mut Cpu, ins: &Decoded) -> u8 {
    let value = alu::sp_plus_offset(cpu, ins.operands[0]);
    cpu.set_hl(value);
    3
}

// PUSH/POP use a pair selector where 3 means AF instead of SP.

fn stack_pair(cpu: &Cpu, selector: u8) -> u16 {
    match selector & 3 {
        0 => cpu.bc(),
        1 => cpu.de(),
        2 => cpu.hl(),
        _ => cpu.af(),
    }
}

fn set_stack_pair(cpu: &mut Cpu, selector: u8, value: u16) {
    match selector & 3 {
        0 => cpu.set_bc(value),
        1 => cpu.set_de(value),
        2 => cpu.set_hl(value),
        // Popping into AF drops the low nibble of F.
        _ => cpu.set_af(value),
    }
}

pub fn push(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = stack_pair(cpu, ins.fields.a);
    cpu.push16(bus, value);
    4
}

pub fn pop(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    let value = cpu.pop16(bus);
    set_stack_pair(cpu, ins.fields.a, value);
    3
}
