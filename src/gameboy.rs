//! Emulation session facade.
//!
//! [`GameBoy`] owns the bus, CPU, timer, PPU and the display sink and
//! drives them in lockstep: after each CPU step the timer and PPU each
//! receive four clock ticks per machine cycle, one tick at a time, so a
//! peripheral interrupt raised mid-instruction is visible to the very next
//! interrupt check.

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::ppu::Ppu;
use crate::screen::{FrameBuffer, Screen};
use crate::timer::Timer;
use crate::Error;

pub struct GameBoy<S: Screen> {
    pub bus: Bus,
    pub cpu: Cpu,
    pub timer: Timer,
    pub ppu: Ppu,
    pub screen: S,
}

impl GameBoy<FrameBuffer> {
    /// A machine rendering into an in-memory frame buffer.
    pub fn new() -> Self {
        Self::with_screen(FrameBuffer::new())
    }
}

impl Default for GameBoy<FrameBuffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Screen> GameBoy<S> {
    pub fn with_screen(screen: S) -> Self {
        let mut bus = Bus::new();
        let mut ppu = Ppu::new();
        // STAT and LY reflect the PPU state from the first cycle.
        ppu.sync_registers(&mut bus);
        Self {
            bus,
            cpu: Cpu::new(),
            timer: Timer::new(),
            ppu,
            screen,
        }
    }

    pub fn load_rom(&mut self, rom: &[u8]) {
        self.bus.load_rom(rom);
    }

    /// Run one CPU step and bring the peripherals up to date. Returns the
    /// machine cycles the step consumed.
    pub fn step(&mut self) -> Result<u8, Error> {
        let cycles = self.cpu.step(&mut self.bus)?;
        for _ in 0..cycles as u32 * 4 {
            self.timer.tick(&mut self.bus);
            self.ppu.step(&mut self.bus, &mut self.screen);
        }
        Ok(cycles)
    }

    /// Step until the PPU completes the current frame.
    pub fn run_frame(&mut self) -> Result<(), Error> {
        while !self.ppu.take_frame() {
            self.step()?;
        }
        Ok(())
    }

    /// Power-cycle everything except the loaded ROM.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset();
        self.timer.reset();
        self.ppu.reset();
        self.ppu.sync_registers(&mut self.bus);
        self.screen.clear();
    }
}
