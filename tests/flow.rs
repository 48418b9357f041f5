use pocketgb_core::bus::{IE, IF};
use pocketgb_core::cpu::{FLAG_C, FLAG_Z};
use pocketgb_core::{Bus, Cpu, Interrupt};

const BASE: u16 = 0xC000;

fn setup(program: &[u8]) -> (Cpu, Bus) {
    let mut bus = Bus::new();
    for (i, byte) in program.iter().enumerate() {
        bus.write(BASE + i as u16, *byte);
    }
    let mut cpu = Cpu::new();
    cpu.pc = BASE;
    cpu.f = 0;
    cpu.sp = 0xDFFE;
    (cpu, bus)
}

fn step(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    cpu.step(bus).unwrap()
}

#[test]
fn jp_sets_pc() {
    let (mut cpu, mut bus) = setup(&[0xC3, 0x34, 0x12]);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x1234);
    assert_eq!(cycles, 4);
}

#[test]
fn jp_hl_is_a_single_cycle() {
    let (mut cpu, mut bus) = setup(&[0xE9]);
    cpu.set_hl(0x8000);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cycles, 1);
}

#[test]
fn jr_offset_is_relative_to_the_next_instruction() {
    // JR +3 from BASE lands at BASE + 2 + 3.
    let (mut cpu, mut bus) = setup(&[0x18, 0x03]);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, BASE + 5);
    assert_eq!(cycles, 3);
}

#[test]
fn jr_backwards() {
    // JR -2 loops onto itself.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, BASE);
}

#[test]
fn jr_condition_cycles_differ_when_not_taken() {
    // JR NZ,+5
    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    cpu.f = FLAG_Z;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, BASE + 2);
    assert_eq!(cycles, 2);

    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, BASE + 7);
    assert_eq!(cycles, 3);
}

#[test]
fn jp_carry_condition() {
    // JP C,0x1234
    let (mut cpu, mut bus) = setup(&[0xDA, 0x34, 0x12]);
    cpu.f = FLAG_C;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x1234);
    assert_eq!(cycles, 4);
}

#[test]
fn call_pushes_the_return_address() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x80]);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0xDFFC);
    let ret_lo = bus.read(0xDFFC);
    let ret_hi = bus.read(0xDFFD);
    assert_eq!(u16::from_le_bytes([ret_lo, ret_hi]), BASE + 3);
    assert_eq!(cycles, 6);
}

#[test]
fn ret_pops_back() {
    // CALL a subroutine holding a single RET.
    let (mut cpu, mut bus) = setup(&[0xCD, 0x10, 0xC0]);
    bus.write(0xC010, 0xC9);
    step(&mut cpu, &mut bus);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, BASE + 3);
    assert_eq!(cpu.sp, 0xDFFE);
    assert_eq!(cycles, 4);
}

#[test]
fn conditional_ret_cycle_costs() {
    // RET Z, not taken then taken.
    let (mut cpu, mut bus) = setup(&[0xC8, 0xC8]);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 2);
    assert_eq!(cpu.pc, BASE + 1);
    cpu.f = FLAG_Z;
    cpu.push16(&mut bus, 0x9000);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 5);
    assert_eq!(cpu.pc, 0x9000);
}

#[test]
fn rst_jumps_to_the_fixed_handler() {
    let (mut cpu, mut bus) = setup(&[0xFF]);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x0038);
    assert_eq!(cpu.sp, 0xDFFC);
    assert_eq!(cycles, 4);
}

#[test]
fn push_and_pop_round_trip() {
    // PUSH BC / POP DE
    let (mut cpu, mut bus) = setup(&[0xC5, 0xD1]);
    cpu.set_bc(0xBEEF);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.de(), 0xBEEF);
    assert_eq!(cpu.sp, 0xDFFE);
}

#[test]
fn pop_af_drops_the_low_nibble_of_f() {
    // POP AF from a hand-built stack frame.
    let (mut cpu, mut bus) = setup(&[0xF1]);
    cpu.push16(&mut bus, 0x12FF);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x12);
    assert_eq!(cpu.f, 0xF0);
}

#[test]
fn interrupt_dispatch_jumps_to_the_vector() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.write(IE, 0x01);
    bus.request_interrupt(Interrupt::VBlank);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 5);
    assert_eq!(cpu.pc, 0x0040);
    assert!(!cpu.ime);
    assert_eq!(bus.read(IF) & 0x01, 0);
    // Return address points at the interrupted instruction.
    let lo = bus.read(cpu.sp);
    let hi = bus.read(cpu.sp.wrapping_add(1));
    assert_eq!(u16::from_le_bytes([lo, hi]), BASE);
}

#[test]
fn vblank_outranks_timer() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.write(IE, 0x1F);
    bus.request_interrupt(Interrupt::Timer);
    bus.request_interrupt(Interrupt::VBlank);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x0040);
    // The timer request stays latched for the next dispatch.
    assert_eq!(bus.read(IF) & 0x04, 0x04);
}

#[test]
fn masked_interrupts_are_not_dispatched() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.write(IE, 0x00);
    bus.request_interrupt(Interrupt::VBlank);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, BASE + 1);
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    // EI / NOP / NOP with a pending, enabled interrupt throughout.
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.write(IE, 0x01);
    bus.request_interrupt(Interrupt::VBlank);
    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    step(&mut cpu, &mut bus);
    assert!(cpu.ime);
    assert_eq!(cpu.pc, BASE + 2);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 5);
    assert_eq!(cpu.pc, 0x0040);
}

#[test]
fn di_cancels_a_scheduled_enable() {
    // EI / DI / NOP: IME must never turn on.
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00]);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
}

#[test]
fn reti_enables_ime_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.push16(&mut bus, 0x8000);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x8000);
    assert!(cpu.ime);
    assert_eq!(cycles, 4);
}

#[test]
fn halt_idles_until_an_interrupt_pends() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    step(&mut cpu, &mut bus);
    assert!(cpu.halted);
    // No pending interrupt: PC stays put and time passes one cycle at a
    // time.
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 1);
    assert_eq!(cpu.pc, BASE + 1);
    assert!(cpu.halted);
    // A pending interrupt wakes the CPU even with IME off; execution
    // resumes instead of dispatching.
    bus.write(IE, 0x04);
    bus.request_interrupt(Interrupt::Timer);
    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.pc, BASE + 2);
}
