use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::memory::cpu::cpu_address::CpuAddress;
use crate::memory::cpu::region::{PPU_REGISTERS_START, PPU_REGISTER_COUNT};

#[derive(PartialEq, Eq, Clone, Copy, Debug, FromPrimitive)]
pub enum RegisterType {
    Ctrl,
    Mask,
    Status,
    OamAddr,
    OamData,
    Scroll,
    PpuAddr,
    PpuData,
}

impl RegisterType {
    // Only the eight canonical addresses are accepted. Mirrors must be folded by the caller.
    pub fn from_address(address: CpuAddress) -> Option<RegisterType> {
        let offset = address.to_raw().checked_sub(PPU_REGISTERS_START)?;
        if offset >= PPU_REGISTER_COUNT {
            return None;
        }

        FromPrimitive::from_u16(offset)
    }

    pub fn address(self) -> CpuAddress {
        CpuAddress::new(PPU_REGISTERS_START + self as u16)
    }
}
