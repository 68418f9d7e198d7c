use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::memory::cpu::region::Region;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct CpuAddress(u16);

impl CpuAddress {
    pub const fn new(value: u16) -> CpuAddress {
        CpuAddress(value)
    }

    pub fn from_low_high(low: u8, high: u8) -> CpuAddress {
        CpuAddress::new((u16::from(high) << 8) | u16::from(low))
    }

    pub fn to_raw(self) -> u16 {
        self.0
    }

    pub fn to_usize(self) -> usize {
        usize::from(self.0)
    }

    pub fn region(self) -> Region {
        Region::from_address(self)
    }

    // The CPU's 16-bit address arithmetic wraps from $FFFF to $0000.
    pub fn advance(self, value: u16) -> CpuAddress {
        CpuAddress::new(self.0.wrapping_add(value))
    }

    pub fn inc(&mut self) -> CpuAddress {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    // Offset within a repeating window of the given size, starting at `base`.
    pub fn mirror_index(self, base: u16, size: u16) -> usize {
        usize::from((self.0 - base) % size)
    }
}

impl fmt::Display for CpuAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04X}", self.0)
    }
}

impl From<u16> for CpuAddress {
    fn from(value: u16) -> Self {
        CpuAddress(value)
    }
}

// Accepts "C000", "$C000" and "0xC000".
impl FromStr for CpuAddress {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<CpuAddress, ParseIntError> {
        let digits = value
            .strip_prefix('$')
            .or_else(|| value.strip_prefix("0x"))
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        u16::from_str_radix(digits, 16).map(CpuAddress)
    }
}
