//! Opcode classification.
//!
//! A raw opcode byte is matched against an ordered table of 8-character
//! bit-pattern templates over `{'0','1','a','b'}`, where `'a'` and `'b'`
//! mark wildcard positions. The leftmost template character is bit 7.
//! Matching compares literal positions and skips wildcards; the first
//! matching template wins, so exact templates are listed ahead of the
//! wildcard ones they overlap with. Wildcard bits are collected MSB-first
//! into the `a`/`b` sub-fields, which downstream executors use as register
//! selectors (3-bit), pair selectors (2-bit), condition codes (2-bit) or
//! bit indices.

use crate::Error;

/// Structural instruction category. One executor per category family lives
/// under [`crate::instructions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    // Control
    Nop,
    Halt,
    Stop,
    Di,
    Ei,
    /// 0xCB. The CPU fetches a second byte and decodes it against the
    /// CB-prefixed table; this category never reaches an executor.
    Prefix,

    // Loads
    LdRegReg,
    LdRegImm,
    LdAFromBc,
    LdAFromDe,
    LdBcFromA,
    LdDeFromA,
    LdAFromAddr,
    LdAddrFromA,
    LdhAFromC,
    LdhCFromA,
    LdhAFromImm,
    LdhImmFromA,
    LdAFromHlDec,
    LdHlDecFromA,
    LdAFromHlInc,
    LdHlIncFromA,
    LdPairImm,
    LdAddrFromSp,
    LdSpFromHl,
    LdHlFromSpOffset,

    // Stack
    Push,
    Pop,

    // Arithmetic and logic
    AddReg,
    AdcReg,
    SubReg,
    SbcReg,
    AndReg,
    XorReg,
    OrReg,
    CpReg,
    AddImm,
    AdcImm,
    SubImm,
    SbcImm,
    AndImm,
    XorImm,
    OrImm,
    CpImm,
    IncReg,
    DecReg,
    IncPair,
    DecPair,
    AddHlPair,
    AddSpImm,

    // Accumulator rotates and flag ops
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    // Flow
    JpImm,
    JpCond,
    JrImm,
    JrCond,
    JpHl,
    CallImm,
    CallCond,
    Ret,
    RetCond,
    Reti,
    Rst,

    // CB-prefixed
    RlcReg,
    RrcReg,
    RlReg,
    RrReg,
    SlaReg,
    SraReg,
    SwapReg,
    SrlReg,
    BitTest,
    BitRes,
    BitSet,
}

/// One entry of a decode table.
pub struct Pattern {
    pub template: &'static str,
    pub category: Category,
    /// Number of operand bytes fetched after the opcode.
    pub operands: u8,
}

const fn pat(template: &'static str, category: Category, operands: u8) -> Pattern {
    Pattern {
        template,
        category,
        operands,
    }
}

/// Primary opcode table. Exact templates come before the wildcard templates
/// that structurally overlap them (HALT before LD r,r; the exact load and
/// flow opcodes before their conditional/selector-carrying relatives), so
/// first-match-wins resolves every defined opcode to exactly one category.
/// The 11 unused SM83 opcodes match nothing.
pub static PATTERNS: &[Pattern] = &[
    // Control
    pat("00000000", Category::Nop, 0),
    pat("01110110", Category::Halt, 0),
    pat("00010000", Category::Stop, 1),
    pat("11110011", Category::Di, 0),
    pat("11111011", Category::Ei, 0),
    pat("11001011", Category::Prefix, 0),
    // Accumulator rotates / flag ops
    pat("00000111", Category::Rlca, 0),
    pat("00001111", Category::Rrca, 0),
    pat("00010111", Category::Rla, 0),
    pat("00011111", Category::Rra, 0),
    pat("00100111", Category::Daa, 0),
    pat("00101111", Category::Cpl, 0),
    pat("00110111", Category::Scf, 0),
    pat("00111111", Category::Ccf, 0),
    // Exact loads
    pat("00001010", Category::LdAFromBc, 0),
    pat("00011010", Category::LdAFromDe, 0),
    pat("00000010", Category::LdBcFromA, 0),
    pat("00010010", Category::LdDeFromA, 0),
    pat("11111010", Category::LdAFromAddr, 2),
    pat("11101010", Category::LdAddrFromA, 2),
    pat("11110010", Category::LdhAFromC, 0),
    pat("11100010", Category::LdhCFromA, 0),
    pat("11110000", Category::LdhAFromImm, 1),
    pat("11100000", Category::LdhImmFromA, 1),
    pat("00111010", Category::LdAFromHlDec, 0),
    pat("00110010", Category::LdHlDecFromA, 0),
    pat("00101010", Category::LdAFromHlInc, 0),
    pat("00100010", Category::LdHlIncFromA, 0),
    pat("00001000", Category::LdAddrFromSp, 2),
    pat("11111001", Category::LdSpFromHl, 0),
    pat("11111000", Category::LdHlFromSpOffset, 1),
    // Exact arithmetic
    pat("11101000", Category::AddSpImm, 1),
    pat("11000110", Category::AddImm, 1),
    pat("11001110", Category::AdcImm, 1),
    pat("11010110", Category::SubImm, 1),
    pat("11011110", Category::SbcImm, 1),
    pat("11100110", Category::AndImm, 1),
    pat("11101110", Category::XorImm, 1),
    pat("11110110", Category::OrImm, 1),
    pat("11111110", Category::CpImm, 1),
    // Exact flow
    pat("11000011", Category::JpImm, 2),
    pat("00011000", Category::JrImm, 1),
    pat("11101001", Category::JpHl, 0),
    pat("11001101", Category::CallImm, 2),
    pat("11001001", Category::Ret, 0),
    pat("11011001", Category::Reti, 0),
    // Selector-carrying loads and stack ops
    pat("01aaabbb", Category::LdRegReg, 0),
    pat("00aaa110", Category::LdRegImm, 1),
    pat("00aa0001", Category::LdPairImm, 2),
    pat("11aa0101", Category::Push, 0),
    pat("11aa0001", Category::Pop, 0),
    // Selector-carrying arithmetic
    pat("10000aaa", Category::AddReg, 0),
    pat("10001aaa", Category::AdcReg, 0),
    pat("10010aaa", Category::SubReg, 0),
    pat("10011aaa", Category::SbcReg, 0),
    pat("10100aaa", Category::AndReg, 0),
    pat("10101aaa", Category::XorReg, 0),
    pat("10110aaa", Category::OrReg, 0),
    pat("10111aaa", Category::CpReg, 0),
    pat("00aaa100", Category::IncReg, 0),
    pat("00aaa101", Category::DecReg, 0),
    pat("00aa0011", Category::IncPair, 0),
    pat("00aa1011", Category::DecPair, 0),
    pat("00aa1001", Category::AddHlPair, 0),
    // Conditional flow and restarts
    pat("110aa010", Category::JpCond, 2),
    pat("001aa000", Category::JrCond, 1),
    pat("110aa100", Category::CallCond, 2),
    pat("110aa000", Category::RetCond, 0),
    pat("11aaa111", Category::Rst, 0),
];

/// CB-prefixed table. Total over all 256 values.
pub static CB_PATTERNS: &[Pattern] = &[
    pat("00000aaa", Category::RlcReg, 0),
    pat("00001aaa", Category::RrcReg, 0),
    pat("00010aaa", Category::RlReg, 0),
    pat("00011aaa", Category::RrReg, 0),
    pat("00100aaa", Category::SlaReg, 0),
    pat("00101aaa", Category::SraReg, 0),
    pat("00110aaa", Category::SwapReg, 0),
    pat("00111aaa", Category::SrlReg, 0),
    pat("01aaabbb", Category::BitTest, 0),
    pat("10aaabbb", Category::BitRes, 0),
    pat("11aaabbb", Category::BitSet, 0),
];

/// Sub-fields extracted from a template's wildcard positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fields {
    pub a: u8,
    pub b: u8,
}

/// A classified instruction with its fetched operand bytes. Created at
/// fetch time, consumed once by its executor and then discarded.
#[derive(Clone, Copy, Debug)]
pub struct Decoded {
    pub category: Category,
    pub opcode: u8,
    pub fields: Fields,
    pub operands: [u8; 2],
    pub operand_count: u8,
}

impl Decoded {
    /// The two operand bytes as a little-endian 16-bit value.
    pub fn operand_u16(&self) -> u16 {
        u16::from_le_bytes([self.operands[0], self.operands[1]])
    }
}

fn matches(template: &str, opcode: u8) -> bool {
    for (i, ch) in template.bytes().enumerate() {
        if ch == b'a' || ch == b'b' {
            continue;
        }
        let bit = opcode & (1 << (7 - i)) != 0;
        if (ch == b'0' && bit) || (ch == b'1' && !bit) {
            return false;
        }
    }
    true
}

fn extract(template: &str, opcode: u8) -> Fields {
    let mut fields = Fields::default();
    for (i, ch) in template.bytes().enumerate() {
        let bit = (opcode >> (7 - i)) & 1;
        match ch {
            b'a' => fields.a = (fields.a << 1) | bit,
            b'b' => fields.b = (fields.b << 1) | bit,
            _ => {}
        }
    }
    fields
}

fn classify<'t>(table: &'t [Pattern], opcode: u8) -> Option<&'t Pattern> {
    table.iter().find(|p| matches(p.template, opcode))
}

fn decode_with(table: &'static [Pattern], opcode: u8) -> Option<Decoded> {
    let pattern = classify(table, opcode)?;
    Some(Decoded {
        category: pattern.category,
        opcode,
        fields: extract(pattern.template, opcode),
        operands: [0; 2],
        operand_count: pattern.operands,
    })
}

/// Classify an opcode against the primary table.
pub fn decode(opcode: u8, pc: u16) -> Result<Decoded, Error> {
    decode_with(PATTERNS, opcode).ok_or(Error::UnknownOpcode { opcode, pc })
}

/// Classify the byte following a 0xCB prefix.
pub fn decode_cb(opcode: u8, pc: u16) -> Result<Decoded, Error> {
    decode_with(CB_PATTERNS, opcode).ok_or(Error::UnknownCbOpcode { opcode, pc })
}
