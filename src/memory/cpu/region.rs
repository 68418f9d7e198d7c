use std::fmt;

use enum_iterator::Sequence;

use crate::memory::cpu::cpu_address::CpuAddress;

pub const WORK_RAM_SIZE: u16 = 0x0800;
pub const PPU_REGISTERS_START: u16 = 0x2000;
pub const PPU_REGISTER_COUNT: u16 = 8;

// The CPU memory map. See https://www.nesdev.org/wiki/CPU_memory_map
// Declared in address order; the ranges partition $0000-$FFFF.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Sequence)]
pub enum Region {
    WorkingMemory,
    WorkingMemoryMirror,
    PictureUnitRegisters,
    PictureUnitRegistersMirror,
    // APU and I/O registers.
    ExpansionIORegisters,
    // Normally disabled APU and I/O functionality (CPU Test Mode).
    ExpansionIOTest,
    CartridgeSpace,
}

impl Region {
    #[inline]
    #[rustfmt::skip]
    pub fn from_address(address: CpuAddress) -> Region {
        use Region::*;
        match address.to_raw() {
            0x0000..=0x07FF => WorkingMemory,
            0x0800..=0x1FFF => WorkingMemoryMirror,
            0x2000..=0x2007 => PictureUnitRegisters,
            0x2008..=0x3FFF => PictureUnitRegistersMirror,
            0x4000..=0x4017 => ExpansionIORegisters,
            0x4018..=0x401F => ExpansionIOTest,
            0x4020..=0xFFFF => CartridgeSpace,
        }
    }

    // Inclusive start of the region.
    #[rustfmt::skip]
    pub fn start(self) -> u32 {
        use Region::*;
        match self {
            WorkingMemory              => 0x0000,
            WorkingMemoryMirror        => 0x0800,
            PictureUnitRegisters       => 0x2000,
            PictureUnitRegistersMirror => 0x2008,
            ExpansionIORegisters       => 0x4000,
            ExpansionIOTest            => 0x4018,
            CartridgeSpace             => 0x4020,
        }
    }

    // Exclusive end of the region. The last region ends past the 16-bit range.
    pub fn end(self) -> u32 {
        enum_iterator::next(&self).map_or(0x1_0000, Region::start)
    }

    pub fn contains(self, address: CpuAddress) -> bool {
        (self.start()..self.end()).contains(&u32::from(address.to_raw()))
    }

    pub fn is_handled(self) -> bool {
        !matches!(self, Region::ExpansionIORegisters | Region::ExpansionIOTest)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::WorkingMemory => "Working RAM",
            Region::WorkingMemoryMirror => "Working RAM mirror",
            Region::PictureUnitRegisters => "PPU registers",
            Region::PictureUnitRegistersMirror => "PPU registers mirror",
            Region::ExpansionIORegisters => "APU/IO registers",
            Region::ExpansionIOTest => "APU/IO test registers",
            Region::CartridgeSpace => "Cartridge space",
        };

        write!(f, "{name} [${:04X}, ${:05X})", self.start(), self.end())
    }
}
