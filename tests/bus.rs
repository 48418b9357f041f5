use pocketgb_core::bus::{IE, IF};
use pocketgb_core::{Bus, Interrupt};

#[test]
fn rom_region_ignores_writes() {
    let mut bus = Bus::new();
    bus.load_rom(&[0xAA, 0xBB, 0xCC]);
    bus.write(0x0000, 0x00);
    bus.write(0x7FFF, 0x55);
    assert_eq!(bus.read(0x0000), 0xAA);
    assert_eq!(bus.read(0x7FFF), 0x00);
}

#[test]
fn unusable_region_ignores_writes() {
    let mut bus = Bus::new();
    bus.write(0xFEA0, 0x12);
    bus.write(0xFEFF, 0x34);
    assert_eq!(bus.read(0xFEA0), 0x00);
    assert_eq!(bus.read(0xFEFF), 0x00);
}

#[test]
fn ram_vram_and_hram_are_writable() {
    let mut bus = Bus::new();
    for addr in [0x8000u16, 0xA000, 0xC000, 0xFE00, 0xFF80, 0xFFFE] {
        bus.write(addr, 0x5A);
        assert_eq!(bus.read(addr), 0x5A, "{addr:#06X}");
    }
}

#[test]
fn oversized_rom_is_truncated() {
    let rom = vec![0x42u8; 0x9000];
    let mut bus = Bus::new();
    bus.load_rom(&rom);
    assert_eq!(bus.read(0x7FFF), 0x42);
    // Nothing past the ROM window.
    assert_eq!(bus.read(0x8000), 0x00);
}

#[test]
fn pending_interrupts_is_the_intersection_of_if_and_ie() {
    let mut bus = Bus::new();
    bus.request_interrupt(Interrupt::VBlank);
    bus.request_interrupt(Interrupt::Timer);
    assert_eq!(bus.pending_interrupts(), 0);
    bus.write(IE, 0x04);
    assert_eq!(bus.pending_interrupts(), 0x04);
    bus.clear_interrupt(Interrupt::Timer);
    assert_eq!(bus.pending_interrupts(), 0);
    assert_eq!(bus.read(IF) & 0x01, 0x01);
}

#[test]
fn interrupt_vectors_and_masks() {
    assert_eq!(Interrupt::VBlank.vector(), 0x40);
    assert_eq!(Interrupt::Joypad.vector(), 0x60);
    assert_eq!(Interrupt::Stat.mask(), 0x02);
    assert_eq!(Interrupt::ALL[0], Interrupt::VBlank);
}

#[test]
fn reset_preserves_the_loaded_rom() {
    let mut bus = Bus::new();
    bus.load_rom(&[0x11, 0x22]);
    bus.write(0xC000, 0x99);
    bus.reset();
    assert_eq!(bus.read(0x0000), 0x11);
    assert_eq!(bus.read(0xC000), 0x00);
}
