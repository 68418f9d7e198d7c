use crate::memory::mapper::*;

// NROM. No registers: 16KiB or 32KiB of PRG ROM and 8KiB of CHR.
pub struct Mapper000 {
    prg_memory: PrgMemory,
    chr_memory: ChrMemory,
    name_table_mirroring: NameTableMirroring,
}

impl Mapper for Mapper000 {
    fn prg_memory(&self) -> &PrgMemory {
        &self.prg_memory
    }

    fn prg_memory_mut(&mut self) -> &mut PrgMemory {
        &mut self.prg_memory
    }

    fn chr_memory(&self) -> &ChrMemory {
        &self.chr_memory
    }

    fn chr_memory_mut(&mut self) -> &mut ChrMemory {
        &mut self.chr_memory
    }

    fn name_table_mirroring(&self) -> NameTableMirroring {
        self.name_table_mirroring
    }

    fn write(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError> {
        match address.to_raw() {
            0x0000..=0x5FFF => Err(BusError::AddressOutOfBounds),
            // Work RAM if present. ROM writes are dropped.
            0x6000..=0xFFFF => self.prg_memory.write(address, value),
        }
    }
}

impl Mapper000 {
    pub fn new(cartridge: &Cartridge, ppu: PpuHandle) -> Result<Mapper000, BusError> {
        let prg_rom_size = cartridge.prg_rom().len();
        if prg_rom_size != 16 * KIBIBYTE && prg_rom_size != 32 * KIBIBYTE {
            return Err(CartridgeError::BadPrgRomSize {
                mapper_number: 0,
                expected: "16KiB or 32KiB",
                actual: prg_rom_size,
            }.into());
        }

        let name_table_mirroring = cartridge.name_table_mirroring();
        ppu.borrow_mut().set_name_table_mirroring(name_table_mirroring);

        Ok(Mapper000 {
            prg_memory: PrgMemory::new(cartridge.prg_rom().to_vec(), cartridge.prg_ram_size()),
            chr_memory: ChrMemory::new(cartridge.chr_rom().to_vec()),
            name_table_mirroring,
        })
    }
}

pub fn create(cartridge: &Cartridge, ppu: PpuHandle) -> Result<Box<dyn Mapper>, BusError> {
    Ok(Box::new(Mapper000::new(cartridge, ppu)?))
}
