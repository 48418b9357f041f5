//! Pixel Processing Unit.
//!
//! The PPU is stepped one dot (one 4 MiHz clock tick) at a time and walks
//! the hardware mode sequence: 80 dots of OAM scan, 172 of pixel transfer
//! and 204 of HBlank per visible scanline, then ten 456-dot VBlank lines.
//! Scanlines are rendered whole at the HBlank transition, which is
//! equivalent to the per-pixel fetcher for the background-only feature set
//! modeled here. LY, the STAT mode bits and the coincidence bit are
//! mirrored into the bus so programs polling those registers see the same
//! sequence as on hardware.

use log::trace;

use crate::bus::{self, Bus, Interrupt};
use crate::screen::{Rgb, Screen, SCREEN_HEIGHT, SCREEN_WIDTH};

const OAM_SCAN_DOTS: u16 = 80;
const PIXEL_TRANSFER_DOTS: u16 = 172;
const LINE_DOTS: u16 = 456;
const LINES_PER_FRAME: u8 = 154;

// LCDC bits.
const LCDC_BG_ENABLE: u8 = 0x01;
const LCDC_BG_TILE_DATA: u8 = 0x10;
const LCDC_BG_TILE_MAP: u8 = 0x08;

// STAT bits.
const STAT_LYC_EQUAL: u8 = 0x04;
const STAT_HBLANK_IRQ: u8 = 0x08;
const STAT_VBLANK_IRQ: u8 = 0x10;
const STAT_OAM_IRQ: u8 = 0x20;
const STAT_LYC_IRQ: u8 = 0x40;

/// The four DMG shades, indexed by palette color number.
const SHADES: [Rgb; 4] = [
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xAA, 0xAA, 0xAA),
    Rgb::new(0x55, 0x55, 0x55),
    Rgb::new(0x00, 0x00, 0x00),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank,
    VBlank,
    OamScan,
    PixelTransfer,
}

impl Mode {
    /// Value of the STAT mode bits for this mode.
    pub const fn stat_bits(self) -> u8 {
        match self {
            Mode::HBlank => 0,
            Mode::VBlank => 1,
            Mode::OamScan => 2,
            Mode::PixelTransfer => 3,
        }
    }

    /// STAT interrupt-enable bit gating this mode's entry, if it has one.
    /// Pixel transfer has no STAT interrupt on hardware.
    const fn irq_enable_bit(self) -> u8 {
        match self {
            Mode::HBlank => STAT_HBLANK_IRQ,
            Mode::VBlank => STAT_VBLANK_IRQ,
            Mode::OamScan => STAT_OAM_IRQ,
            Mode::PixelTransfer => 0,
        }
    }
}

pub struct Ppu {
    mode: Mode,
    /// Dot position within the current scanline, 0..456.
    dot: u16,
    line: u8,
    frame_complete: bool,
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            mode: Mode::OamScan,
            dot: 0,
            line: 0,
            frame_complete: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    /// True exactly once per frame, from VBlank entry until taken.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }

    /// Advance one dot.
    pub fn step(&mut self, bus: &mut Bus, screen: &mut impl Screen) {
        self.dot += 1;
        match self.mode {
            Mode::OamScan => {
                if self.dot == OAM_SCAN_DOTS {
                    self.enter_mode(bus, Mode::PixelTransfer);
                }
            }
            Mode::PixelTransfer => {
                if self.dot == OAM_SCAN_DOTS + PIXEL_TRANSFER_DOTS {
                    self.render_scanline(bus, screen);
                    self.enter_mode(bus, Mode::HBlank);
                }
            }
            Mode::HBlank => {
                if self.dot == LINE_DOTS {
                    self.advance_line();
                    if self.line == SCREEN_HEIGHT as u8 {
                        self.enter_mode(bus, Mode::VBlank);
                        bus.request_interrupt(Interrupt::VBlank);
                        screen.present();
                        self.frame_complete = true;
                    } else {
                        self.enter_mode(bus, Mode::OamScan);
                    }
                }
            }
            Mode::VBlank => {
                if self.dot == LINE_DOTS {
                    self.advance_line();
                    if self.line == 0 {
                        self.enter_mode(bus, Mode::OamScan);
                    }
                }
            }
        }
        self.sync_registers(bus);
    }

    /// Mirror LY, the STAT mode bits and the LY==LYC comparison into the
    /// bus. Runs every dot, so a mid-scanline LYC write is picked up
    /// immediately; the STAT interrupt still fires only on the rising edge
    /// of the comparison. Also called once at power-on so the registers
    /// never read stale.
    pub fn sync_registers(&mut self, bus: &mut Bus) {
        bus.write(bus::LY, self.line);
        let equal = self.line == bus.read(bus::LYC);
        let stat = bus.read(bus::STAT);
        let mut new_stat = (stat & !0x07) | self.mode.stat_bits();
        if equal {
            new_stat |= STAT_LYC_EQUAL;
        }
        bus.write(bus::STAT, new_stat);
        if equal && stat & STAT_LYC_EQUAL == 0 && stat & STAT_LYC_IRQ != 0 {
            bus.request_interrupt(Interrupt::Stat);
        }
    }

    fn enter_mode(&mut self, bus: &mut Bus, mode: Mode) {
        trace!("mode {:?} at line {}", mode, self.line);
        self.mode = mode;
        if bus.read(bus::STAT) & mode.irq_enable_bit() != 0 {
            bus.request_interrupt(Interrupt::Stat);
        }
    }

    fn advance_line(&mut self) {
        self.dot = 0;
        self.line = (self.line + 1) % LINES_PER_FRAME;
    }

    fn render_scanline(&self, bus: &Bus, screen: &mut impl Screen) {
        let y = self.line as usize;
        let lcdc = bus.read(bus::LCDC);
        if lcdc & LCDC_BG_ENABLE == 0 {
            for x in 0..SCREEN_WIDTH {
                screen.set_pixel(x, y, SHADES[0]);
            }
            return;
        }

        let scy = bus.read(bus::SCY);
        let scx = bus.read(bus::SCX);
        let bgp = bus.read(bus::BGP);
        let map_base: u16 = if lcdc & LCDC_BG_TILE_MAP != 0 {
            0x9C00
        } else {
            0x9800
        };

        let map_y = self.line.wrapping_add(scy);
        for x in 0..SCREEN_WIDTH {
            let map_x = (x as u8).wrapping_add(scx);
            let tile_index =
                bus.read(map_base + (map_y as u16 / 8) * 32 + map_x as u16 / 8);
            let tile_addr = if lcdc & LCDC_BG_TILE_DATA != 0 {
                0x8000 + tile_index as u16 * 16
            } else {
                // Signed indexing around 0x9000.
                0x9000u16.wrapping_add((tile_index as i8 as u16).wrapping_mul(16))
            };
            let row = (map_y % 8) as u16;
            let lo = bus.read(tile_addr + row * 2);
            let hi = bus.read(tile_addr + row * 2 + 1);
            let bit = 7 - map_x % 8;
            let color = ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1);
            let shade = (bgp >> (color * 2)) & 3;
            screen.set_pixel(x, y, SHADES[shade as usize]);
        }
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}
