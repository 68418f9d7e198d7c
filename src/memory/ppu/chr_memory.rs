use itertools::Itertools;
use log::debug;

use crate::error::BusError;
use crate::memory::bank_index::BankIndex;
use crate::memory::ppu::ppu_address::PpuAddress;
use crate::memory::writability::Writability;
use crate::util::unit::KIBIBYTE;

pub const CHR_BANK_SIZE: usize = 4 * KIBIBYTE;
const CHR_RAM_SIZE: usize = 8 * KIBIBYTE;

// Pattern storage seen by the PPU at $0000-$1FFF, as two 4KiB windows.
pub struct ChrMemory {
    memory: Box<[u8]>,
    writability: Writability,
    windows: [BankIndex; 2],
}

impl ChrMemory {
    pub fn new(chr_rom: Vec<u8>) -> ChrMemory {
        // If no CHR data is provided, the board has 8KiB of CHR RAM instead.
        let (memory, writability) = if chr_rom.is_empty() {
            (vec![0; CHR_RAM_SIZE], Writability::Ram)
        } else {
            (chr_rom, Writability::Rom)
        };

        ChrMemory {
            memory: memory.into_boxed_slice(),
            writability,
            windows: [BankIndex::from_u8(0), BankIndex::from_u8(1)],
        }
    }

    pub fn writability(&self) -> Writability {
        self.writability
    }

    pub fn size(&self) -> usize {
        self.memory.len()
    }

    pub fn bank_count(&self) -> u16 {
        u16::try_from(self.memory.len() / CHR_BANK_SIZE)
            .unwrap_or(u16::MAX)
            .max(1)
    }

    pub fn set_windows(&mut self, windows: [BankIndex; 2]) {
        self.windows = windows;
    }

    pub fn resolve_selected_bank_indexes(&self) -> [u16; 2] {
        self.windows.map(|window| window.to_u16(self.bank_count()))
    }

    pub fn bank_string(&self) -> String {
        format!(
            "{} ({} banks total, {:?})",
            self.resolve_selected_bank_indexes().iter().join(", "),
            self.bank_count(),
            self.writability,
        )
    }

    pub fn read(&self, address: PpuAddress) -> Result<u8, BusError> {
        let index = self.address_to_chr_index(address)?;
        Ok(self.memory[index])
    }

    pub fn write(&mut self, address: PpuAddress, value: u8) -> Result<(), BusError> {
        let index = self.address_to_chr_index(address)?;
        if self.writability.is_writable() {
            self.memory[index] = value;
        } else {
            debug!(target: "mapperregisters", "Ignored write of ${value:02X} to CHR ROM at {address}.");
        }

        Ok(())
    }

    fn address_to_chr_index(&self, address: PpuAddress) -> Result<usize, BusError> {
        if !address.is_in_pattern_tables() {
            return Err(BusError::AddressOutOfBounds);
        }

        let window = address.to_usize() / CHR_BANK_SIZE;
        let offset = address.to_usize() % CHR_BANK_SIZE;
        let bank = self.windows[window].to_usize(self.bank_count());
        Ok((bank * CHR_BANK_SIZE + offset) % self.memory.len())
    }
}
