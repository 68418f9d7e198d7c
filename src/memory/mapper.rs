pub use crate::cartridge::cartridge::Cartridge;
pub use crate::error::{BusError, CartridgeError};
pub use crate::memory::bank_index::BankIndex;
pub use crate::memory::cpu::cpu_address::CpuAddress;
pub use crate::memory::cpu::prg_memory::{PrgMemory, PRG_BANK_SIZE};
pub use crate::memory::location::Location;
pub use crate::memory::ppu::chr_memory::{ChrMemory, CHR_BANK_SIZE};
pub use crate::memory::ppu::ppu_address::PpuAddress;
pub use crate::ppu::name_table_mirroring::NameTableMirroring;
pub use crate::ppu::ppu_port::PpuHandle;
pub use crate::util::unit::KIBIBYTE;

// Cartridge hardware, as seen from the CPU at $4020-$FFFF and from the PPU at $0000-$1FFF.
//
// Implementors supply their memory and their register write handling. Reads and locations
// follow whatever bank configuration the writes have set up.
pub trait Mapper {
    fn prg_memory(&self) -> &PrgMemory;
    fn prg_memory_mut(&mut self) -> &mut PrgMemory;
    fn chr_memory(&self) -> &ChrMemory;
    fn chr_memory_mut(&mut self) -> &mut ChrMemory;
    fn name_table_mirroring(&self) -> NameTableMirroring;

    // Register writes land here as well as work RAM writes.
    fn write(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError>;

    #[inline]
    fn read(&mut self, address: CpuAddress) -> Result<u8, BusError> {
        self.prg_memory().read(address)
    }

    fn location(&mut self, address: CpuAddress) -> Result<Location<'_>, BusError> {
        self.prg_memory_mut().location(address)
    }

    #[inline]
    fn ppu_read(&self, address: PpuAddress) -> Result<u8, BusError> {
        self.chr_memory().read(address)
    }

    fn ppu_write(&mut self, address: PpuAddress, value: u8) -> Result<(), BusError> {
        self.chr_memory_mut().write(address, value)
    }

    fn bank_summary(&self) -> String {
        format!(
            "PRG: {}, CHR: {}, Mirroring: {}",
            self.prg_memory().bank_string(),
            self.chr_memory().bank_string(),
            self.name_table_mirroring(),
        )
    }
}
