//! Flat 64 KiB memory bus.
//!
//! Every component reads and writes through this bus exclusively. The address
//! space is a single byte array with named regions; cartridge banking is not
//! modeled, so the ROM region is a plain read-only window over the loaded
//! image. Writes to read-only regions are silent no-ops, mirroring hardware
//! where ROM writes do nothing. The bus itself performs no side effects
//! beyond mutating the backing store; peripherals poll the mapped registers
//! they care about.

pub const MEMORY_SIZE: usize = 0x1_0000;

pub const ROM_BANK_0_START: u16 = 0x0000;
pub const ROM_BANK_N_END: u16 = 0x7FFF;
pub const VRAM_START: u16 = 0x8000;
pub const VRAM_END: u16 = 0x9FFF;
pub const EXTERNAL_RAM_START: u16 = 0xA000;
pub const EXTERNAL_RAM_END: u16 = 0xBFFF;
pub const WORK_RAM_START: u16 = 0xC000;
pub const WORK_RAM_END: u16 = 0xDFFF;
pub const ECHO_RAM_START: u16 = 0xE000;
pub const ECHO_RAM_END: u16 = 0xFDFF;
pub const OAM_START: u16 = 0xFE00;
pub const OAM_END: u16 = 0xFE9F;
pub const NOT_USABLE_START: u16 = 0xFEA0;
pub const NOT_USABLE_END: u16 = 0xFEFF;
pub const IO_REGISTERS_START: u16 = 0xFF00;
pub const IO_REGISTERS_END: u16 = 0xFF7F;
pub const HRAM_START: u16 = 0xFF80;
pub const HRAM_END: u16 = 0xFFFE;

// Memory-mapped register addresses (gbdev.io/pandocs/Memory_Map.html)
pub const DIV: u16 = 0xFF04;
pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;
pub const IF: u16 = 0xFF0F;
pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const BGP: u16 = 0xFF47;
pub const IE: u16 = 0xFFFF;

/// Interrupt sources in hardware priority order (VBLANK highest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// All sources, highest priority first.
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit in the IF/IE registers.
    pub const fn mask(self) -> u8 {
        match self {
            Interrupt::VBlank => 0x01,
            Interrupt::Stat => 0x02,
            Interrupt::Timer => 0x04,
            Interrupt::Serial => 0x08,
            Interrupt::Joypad => 0x10,
        }
    }

    /// Fixed service vector jumped to when this interrupt is dispatched.
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x40,
            Interrupt::Stat => 0x48,
            Interrupt::Timer => 0x50,
            Interrupt::Serial => 0x58,
            Interrupt::Joypad => 0x60,
        }
    }
}

/// The shared memory bus. Owned by the emulation session; the CPU, PPU and
/// timer borrow it for the duration of each step. Stepping is strictly
/// sequential and single-threaded, so there is never more than one writer at
/// a time.
pub struct Bus {
    mem: Box<[u8; MEMORY_SIZE]>,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            mem: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Copy a ROM image into 0x0000-0x7FFF. This is the session-start
    /// hand-off from the loader and the only path that stores into the
    /// read-only region. Images longer than 32 KiB are truncated (banking is
    /// out of scope).
    pub fn load_rom(&mut self, rom: &[u8]) {
        let len = rom.len().min(ROM_BANK_N_END as usize + 1);
        self.mem[..len].copy_from_slice(&rom[..len]);
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if Self::is_read_only(addr) {
            return;
        }
        self.mem[addr as usize] = value;
    }

    /// Latch an interrupt request into IF. This is the narrow API the PPU
    /// and timer use to signal the CPU; the CPU alone decides service order
    /// and timing.
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.mem[IF as usize] |= interrupt.mask();
    }

    /// IF & IE, masked to the five defined sources.
    pub fn pending_interrupts(&self) -> u8 {
        self.mem[IF as usize] & self.mem[IE as usize] & 0x1F
    }

    /// Acknowledge a dispatched interrupt by clearing its IF bit.
    pub fn clear_interrupt(&mut self, interrupt: Interrupt) {
        self.mem[IF as usize] &= !interrupt.mask();
    }

    fn is_read_only(addr: u16) -> bool {
        addr <= ROM_BANK_N_END || (NOT_USABLE_START..=NOT_USABLE_END).contains(&addr)
    }

    /// Clear all writable memory. ROM contents are preserved so a
    /// power-cycle keeps the loaded cartridge.
    pub fn reset(&mut self) {
        for addr in (ROM_BANK_N_END as usize + 1)..MEMORY_SIZE {
            self.mem[addr] = 0;
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
