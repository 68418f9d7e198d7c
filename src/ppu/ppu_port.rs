use std::cell::RefCell;
use std::rc::Rc;

use crate::error::BusError;
use crate::memory::cpu::cpu_address::CpuAddress;
use crate::ppu::name_table_mirroring::NameTableMirroring;

// Shared between the address space and the mapper, neither of which owns the PPU.
pub type PpuHandle = Rc<RefCell<dyn PpuPort>>;

// The CPU-facing side of the picture unit. Addresses are always in $2000-$2007.
pub trait PpuPort {
    fn read_from_cpu(&mut self, address: CpuAddress) -> Result<u8, BusError>;
    fn write_from_cpu(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError>;
    // The register latch backing an address, for direct inspection.
    fn location_from_cpu(&mut self, address: CpuAddress) -> Result<&mut u8, BusError>;

    // Mappers that control mirroring announce every change here.
    fn set_name_table_mirroring(&mut self, mirroring: NameTableMirroring);
}
