use pocketgb_core::cpu::{FLAG_C, FLAG_H, FLAG_N, FLAG_Z};
use pocketgb_core::{Bus, Cpu};

const BASE: u16 = 0xC000;

/// Place a program in work RAM and point PC at it.
fn setup(program: &[u8]) -> (Cpu, Bus) {
    let mut bus = Bus::new();
    for (i, byte) in program.iter().enumerate() {
        bus.write(BASE + i as u16, *byte);
    }
    let mut cpu = Cpu::new();
    cpu.pc = BASE;
    cpu.f = 0;
    (cpu, bus)
}

fn step(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.step(bus).unwrap()
}

#[test]
fn add_wraps_and_sets_zero_half_and_carry() {
    // ADD A,B
    let (mut cpu, mut bus) = setup(&[0x80]);
    cpu.a = 0xFF;
    cpu.b = 0x01;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x00);
    assert_eq!(cpu.f, FLAG_Z | FLAG_H | FLAG_C);
    assert_eq!(cycles, 1);
}

#[test]
fn adc_folds_in_the_carry() {
    // ADC A,0x00
    let (mut cpu, mut bus) = setup(&[0xCE, 0x00]);
    cpu.a = 0x0F;
    cpu.f = FLAG_C;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x10);
    assert_eq!(cpu.f, FLAG_H);
    assert_eq!(cycles, 2);
}

#[test]
fn sub_sets_negative_and_half_borrow() {
    // SUB 0x01
    let (mut cpu, mut bus) = setup(&[0xD6, 0x01]);
    cpu.a = 0x10;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x0F);
    assert_eq!(cpu.f, FLAG_N | FLAG_H);
}

#[test]
fn sbc_borrows_through_carry() {
    // SBC A,0x00 with carry set behaves like subtracting one.
    let (mut cpu, mut bus) = setup(&[0xDE, 0x00]);
    cpu.a = 0x00;
    cpu.f = FLAG_C;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0xFF);
    assert_eq!(cpu.f, FLAG_N | FLAG_H | FLAG_C);
}

#[test]
fn cp_sets_flags_without_touching_a() {
    // CP 0x42
    let (mut cpu, mut bus) = setup(&[0xFE, 0x42]);
    cpu.a = 0x42;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.f, FLAG_Z | FLAG_N);
}

#[test]
fn and_always_sets_half_carry() {
    // AND 0x0F
    let (mut cpu, mut bus) = setup(&[0xE6, 0x0F]);
    cpu.a = 0xF0;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x00);
    assert_eq!(cpu.f, FLAG_Z | FLAG_H);
}

#[test]
fn xor_clears_everything_but_zero() {
    // XOR A
    let (mut cpu, mut bus) = setup(&[0xAF]);
    cpu.a = 0x5A;
    cpu.f = FLAG_N | FLAG_H | FLAG_C;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x00);
    assert_eq!(cpu.f, FLAG_Z);
}

#[test]
fn or_with_register_operand() {
    // OR C
    let (mut cpu, mut bus) = setup(&[0xB1]);
    cpu.a = 0xF0;
    cpu.c = 0x0F;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0xFF);
    assert_eq!(cpu.f, 0);
}

#[test]
fn alu_memory_operand_costs_an_extra_cycle() {
    // ADD A,(HL)
    let (mut cpu, mut bus) = setup(&[0x86]);
    cpu.set_hl(0xC100);
    bus.write(0xC100, 0x05);
    cpu.a = 0x01;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x06);
    assert_eq!(cycles, 2);
}

#[test]
fn inc_memory_writes_back_and_preserves_carry() {
    // INC (HL)
    let (mut cpu, mut bus) = setup(&[0x34]);
    cpu.set_hl(0xC100);
    bus.write(0xC100, 0x0F);
    cpu.f = FLAG_C;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(bus.read(0xC100), 0x10);
    assert_eq!(cpu.f, FLAG_H | FLAG_C);
    assert_eq!(cycles, 3);
}

#[test]
fn dec_to_zero() {
    // DEC B
    let (mut cpu, mut bus) = setup(&[0x05]);
    cpu.b = 0x01;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.b, 0x00);
    assert_eq!(cpu.f, FLAG_Z | FLAG_N);
    assert_eq!(cycles, 1);
}

#[test]
fn sixteen_bit_inc_and_dec_touch_no_flags() {
    // INC DE / DEC BC
    let (mut cpu, mut bus) = setup(&[0x13, 0x0B]);
    cpu.set_de(0x00FF);
    cpu.set_bc(0x0000);
    cpu.f = FLAG_Z | FLAG_C;
    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.de(), 0x0100);
    assert_eq!(cpu.bc(), 0xFFFF);
    assert_eq!(cpu.f, FLAG_Z | FLAG_C);
}

#[test]
fn add_hl_carries_from_bit_eleven_and_keeps_zero() {
    // ADD HL,DE
    let (mut cpu, mut bus) = setup(&[0x19]);
    cpu.set_hl(0x0FFF);
    cpu.set_de(0x0001);
    cpu.f = FLAG_Z;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.hl(), 0x1000);
    assert_eq!(cpu.f, FLAG_Z | FLAG_H);
    assert_eq!(cycles, 2);
}

#[test]
fn add_sp_flags_come_from_the_low_byte() {
    // ADD SP,0x08
    let (mut cpu, mut bus) = setup(&[0xE8, 0x08]);
    cpu.sp = 0xFFF8;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.sp, 0x0000);
    assert_eq!(cpu.f, FLAG_H | FLAG_C);
    assert_eq!(cycles, 4);
}

#[test]
fn add_sp_negative_offset() {
    // ADD SP,-2
    let (mut cpu, mut bus) = setup(&[0xE8, 0xFE]);
    cpu.sp = 0xFFFE;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.sp, 0xFFFC);
}

#[test]
fn daa_corrects_bcd_addition() {
    // ADD A,B then DAA: 0x45 + 0x38 = BCD 83.
    let (mut cpu, mut bus) = setup(&[0x80, 0x27]);
    cpu.a = 0x45;
    cpu.b = 0x38;
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x83);
    assert!(cpu.f & FLAG_C == 0);
}

#[test]
fn daa_corrects_bcd_subtraction() {
    // SUB B then DAA: 0x42 - 0x09 = BCD 33.
    let (mut cpu, mut bus) = setup(&[0x90, 0x27]);
    cpu.a = 0x42;
    cpu.b = 0x09;
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x33);
}

#[test]
fn cpl_scf_ccf() {
    let (mut cpu, mut bus) = setup(&[0x2F, 0x37, 0x3F]);
    cpu.a = 0x35;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0xCA);
    assert_eq!(cpu.f, FLAG_N | FLAG_H);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.f, FLAG_C);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.f, 0);
}
