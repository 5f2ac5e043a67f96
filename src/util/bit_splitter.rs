/// A 16-bit instruction word, split into the fields
/// that CHIP-8 opcodes are built from.
///
/// Using the usual notation for an opcode `_XYN`:
/// - `X` and `Y` are register indices (second and third nibble)
/// - `N` is the low nibble, `KK` the low byte and `NNN` the low 12 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    /// Combine two bytes in big-endian order, as they appear in memory.
    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    pub fn kk(&self) -> u8 {
        self.1
    }

    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}
