//! Instruction executors.
//!
//! Each decoded category maps to one executor function grouped by family.
//! Executors receive the CPU, the bus and the decoded instruction, apply
//! the semantics and return the cost in machine cycles. Instructions whose
//! cost depends on the operand form (memory via selector 6, condition
//! taken or not) report the cost they actually incurred.

mod alu;
mod bits;
mod flow;
mod load;
mod misc;

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::decoder::{Category, Decoded};

/// Dispatch a decoded instruction to its executor. Returns machine cycles.
pub fn execute(cpu: &mut Cpu, bus: &mut Bus, ins: &Decoded) -> u8 {
    match ins.category {
        Category::Nop => misc::nop(),
        Category::Halt => misc::halt(cpu),
        Category::Stop => misc::stop(cpu),
        Category::Di => misc::di(cpu),
        Category::Ei => misc::ei(cpu),
        // 0xCB is resolved during fetch and never dispatched.
        Category::Prefix => misc::nop(),

        Category::LdRegReg => load::ld_reg_reg(cpu, bus, ins),
        Category::LdRegImm => load::ld_reg_imm(cpu, bus, ins),
        Category::LdAFromBc => load::ld_a_from_bc(cpu, bus),
        Category::LdAFromDe => load::ld_a_from_de(cpu, bus),
        Category::LdBcFromA => load::ld_bc_from_a(cpu, bus),
        Category::LdDeFromA => load::ld_de_from_a(cpu, bus),
        Category::LdAFromAddr => load::ld_a_from_addr(cpu, bus, ins),
        Category::LdAddrFromA => load::ld_addr_from_a(cpu, bus, ins),
        Category::LdhAFromC => load::ldh_a_from_c(cpu, bus),
        Category::LdhCFromA => load::ldh_c_from_a(cpu, bus),
        Category::LdhAFromImm => load::ldh_a_from_imm(cpu, bus, ins),
        Category::LdhImmFromA => load::ldh_imm_from_a(cpu, bus, ins),
        Category::LdAFromHlDec => load::ld_a_from_hl_dec(cpu, bus),
        Category::LdHlDecFromA => load::ld_hl_dec_from_a(cpu, bus),
        Category::LdAFromHlInc => load::ld_a_from_hl_inc(cpu, bus),
        Category::LdHlIncFromA => load::ld_hl_inc_from_a(cpu, bus),
        Category::LdPairImm => load::ld_pair_imm(cpu, ins),
        Category::LdAddrFromSp => load::ld_addr_from_sp(cpu, bus, ins),
        Category::LdSpFromHl => load::ld_sp_from_hl(cpu),
        Category::LdHlFromSpOffset => load::ld_hl_from_sp_offset(cpu, ins),
        Category::Push => load::push(cpu, bus, ins),
        Category::Pop => load::pop(cpu, bus, ins),

        Category::AddReg => alu::add_reg(cpu, bus, ins),
        Category::AdcReg => alu::adc_reg(cpu, bus, ins),
        Category::SubReg => alu::sub_reg(cpu, bus, ins),
        Category::SbcReg => alu::sbc_reg(cpu, bus, ins),
        Category::AndReg => alu::and_reg(cpu, bus, ins),
        Category::XorReg => alu::xor_reg(cpu, bus, ins),
        Category::OrReg => alu::or_reg(cpu, bus, ins),
        Category::CpReg => alu::cp_reg(cpu, bus, ins),
        Category::AddImm => alu::add_imm(cpu, ins),
        Category::AdcImm => alu::adc_imm(cpu, ins),
        Category::SubImm => alu::sub_imm(cpu, ins),
        Category::SbcImm => alu::sbc_imm(cpu, ins),
        Category::AndImm => alu::and_imm(cpu, ins),
        Category::XorImm => alu::xor_imm(cpu, ins),
        Category::OrImm => alu::or_imm(cpu, ins),
        Category::CpImm => alu::cp_imm(cpu, ins),
        Category::IncReg => alu::inc_reg(cpu, bus, ins),
        Category::DecReg => alu::dec_reg(cpu, bus, ins),
        Category::IncPair => alu::inc_pair(cpu, ins),
        Category::DecPair => alu::dec_pair(cpu, ins),
        Category::AddHlPair => alu::add_hl_pair(cpu, ins),
        Category::AddSpImm => alu::add_sp_imm(cpu, ins),
        Category::Daa => alu::daa(cpu),
        Category::Cpl => alu::cpl(cpu),
        Category::Scf => alu::scf(cpu),
        Category::Ccf => alu::ccf(cpu),

        Category::Rlca => bits::rlca(cpu),
        Category::Rrca => bits::rrca(cpu),
        Category::Rla => bits::rla(cpu),
        Category::Rra => bits::rra(cpu),

        Category::JpImm => flow::jp_imm(cpu, ins),
        Category::JpCond => flow::jp_cond(cpu, ins),
        Category::JrImm => flow::jr_imm(cpu, ins),
        Category::JrCond => flow::jr_cond(cpu, ins),
        Category::JpHl => flow::jp_hl(cpu),
        Category::CallImm => flow::call_imm(cpu, bus, ins),
        Category::CallCond => flow::call_cond(cpu, bus, ins),
        Category::Ret => flow::ret(cpu, bus),
        Category::RetCond => flow::ret_cond(cpu, bus, ins),
        Category::Reti => flow::reti(cpu, bus),
        Category::Rst => flow::rst(cpu, bus, ins),

        Category::RlcReg => bits::rlc_reg(cpu, bus, ins),
        Category::RrcReg => bits::rrc_reg(cpu, bus, ins),
        Category::RlReg => bits::rl_reg(cpu, bus, ins),
        Category::RrReg => bits::rr_reg(cpu, bus, ins),
        Category::SlaReg => bits::sla_reg(cpu, bus, ins),
        Category::SraReg => bits::sra_reg(cpu, bus, ins),
        Category::SwapReg => bits::swap_reg(cpu, bus, ins),
        Category::SrlReg => bits::srl_reg(cpu, bus, ins),
        Category::BitTest => bits::bit_test(cpu, bus, ins),
        Category::BitRes => bits::bit_res(cpu, bus, ins),
        Category::BitSet => bits::bit_set(cpu, bus, ins),
    }
}
