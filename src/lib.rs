//! Cycle-accurate Game Boy (DMG) emulation core.
//!
//! This crate contains the platform-agnostic emulator logic: the CPU
//! fetch/decode/execute pipeline, the PPU mode state machine and scanline
//! renderer, the edge-triggered timer and the shared memory bus. Frontends
//! supply a [`screen::Screen`] sink and drive the core via the [`gameboy`]
//! facade.

/// Shared memory bus and interrupt-request API.
pub mod bus;

/// SM83 CPU core.
pub mod cpu;

/// Opcode classification via bit-pattern templates.
pub mod decoder;

/// High-level facade that wires the CPU, bus, PPU and timer into a single
/// machine.
pub mod gameboy;

/// Instruction executors, one family per decoded category.
pub mod instructions;

/// Pixel Processing Unit (PPU) emulation.
pub mod ppu;

/// Display sink trait and in-memory implementations.
pub mod screen;

/// Divider/timer unit.
pub mod timer;

pub use bus::{Bus, Interrupt};
pub use cpu::Cpu;
pub use gameboy::GameBoy;
pub use ppu::Ppu;
pub use screen::{FrameBuffer, NullScreen, Rgb, Screen};
pub use timer::Timer;

/// Errors surfaced by the emulation core.
///
/// Emulation is deterministic, so none of these are retryable: an unknown
/// opcode aborts the faulting instruction and is reported to the caller
/// rather than silently skipped, since skipping would desynchronize timing.
/// Invalid bus addresses are unrepresentable by construction (all addresses
/// are `u16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No template in the primary opcode table matched this byte.
    #[error("unknown opcode {opcode:#04X} at PC {pc:#06X}")]
    UnknownOpcode { opcode: u8, pc: u16 },

    /// No template in the CB-prefixed table matched this byte. The shipped
    /// table is total over all 256 values, so this only fires if the table
    /// is edited into an incomplete state.
    #[error("unknown CB-prefixed opcode {opcode:#04X} at PC {pc:#06X}")]
    UnknownCbOpcode { opcode: u8, pc: u16 },
}
