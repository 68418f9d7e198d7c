use std::fmt;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum BankIndex {
    IndexFromStart(u16),
    IndexFromEnd(u16),
}

impl BankIndex {
    pub const FIRST: BankIndex = BankIndex::IndexFromStart(0);
    pub const LAST: BankIndex = BankIndex::IndexFromEnd(0);

    pub fn from_u8(value: u8) -> BankIndex {
        BankIndex::IndexFromStart(value.into())
    }

    // Out-of-range selections wrap around, the same as the unconnected high bank lines on a
    // real board. bank_count must be non-zero.
    pub fn to_u16(self, bank_count: u16) -> u16 {
        match self {
            BankIndex::IndexFromStart(index) => index % bank_count,
            BankIndex::IndexFromEnd(index) => bank_count - 1 - (index % bank_count),
        }
    }

    pub fn to_usize(self, bank_count: u16) -> usize {
        self.to_u16(bank_count).into()
    }
}

impl From<u8> for BankIndex {
    fn from(value: u8) -> Self {
        BankIndex::IndexFromStart(value.into())
    }
}

impl fmt::Display for BankIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankIndex::IndexFromStart(index) => write!(f, "{index}"),
            BankIndex::IndexFromEnd(0) => write!(f, "LAST"),
            BankIndex::IndexFromEnd(index) => write!(f, "LAST-{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_start_reduces_modulo_bank_count() {
        assert_eq!(BankIndex::from_u8(3).to_u16(8), 3);
        assert_eq!(BankIndex::from_u8(11).to_u16(8), 3);
        assert_eq!(BankIndex::from_u8(1).to_u16(1), 0);
    }

    #[test]
    fn from_end() {
        assert_eq!(BankIndex::LAST.to_u16(8), 7);
        assert_eq!(BankIndex::IndexFromEnd(1).to_u16(8), 6);
        assert_eq!(BankIndex::LAST.to_u16(1), 0);
    }
}
