use std::fmt;

const ADDRESS_MASK: u16 = 0x3FFF;

pub const PATTERN_TABLE_END: u16 = 0x1FFF;

// A 14-bit address on the PPU's own bus.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct PpuAddress(u16);

impl PpuAddress {
    pub const ZERO: PpuAddress = PpuAddress(0);

    // The top two bits don't exist on the PPU bus.
    pub const fn from_u16(value: u16) -> PpuAddress {
        PpuAddress(value & ADDRESS_MASK)
    }

    pub fn to_u16(self) -> u16 {
        self.0
    }

    pub fn to_usize(self) -> usize {
        usize::from(self.0)
    }

    pub fn is_in_pattern_tables(self) -> bool {
        self.0 <= PATTERN_TABLE_END
    }

    pub fn set_high_byte(&mut self, high: u8) {
        self.0 = ((u16::from(high) << 8) | (self.0 & 0x00FF)) & ADDRESS_MASK;
    }

    pub fn set_low_byte(&mut self, low: u8) {
        self.0 = (self.0 & 0xFF00) | u16::from(low);
    }

    pub fn advance(&mut self, increment: u16) {
        self.0 = self.0.wrapping_add(increment) & ADDRESS_MASK;
    }
}

impl fmt::Display for PpuAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04X}", self.0)
    }
}
