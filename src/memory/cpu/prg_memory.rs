use itertools::Itertools;
use log::debug;

use crate::error::BusError;
use crate::memory::bank_index::BankIndex;
use crate::memory::cpu::cpu_address::CpuAddress;
use crate::memory::location::{Location, Storage};
use crate::util::unit::KIBIBYTE;

pub const PRG_BANK_SIZE: usize = 16 * KIBIBYTE;

const WORK_RAM_START: u16 = 0x6000;
const ROM_START: u16 = 0x8000;

// PRG ROM viewed through two 16KiB windows ($8000-$BFFF and $C000-$FFFF), plus optional work RAM
// at $6000-$7FFF. Mappers bank-switch by changing which bank each window selects.
pub struct PrgMemory {
    rom: Box<[u8]>,
    windows: [BankIndex; 2],
    work_ram: Box<[u8]>,
    work_ram_enabled: bool,
}

impl PrgMemory {
    pub fn new(rom: Vec<u8>, work_ram_size: usize) -> PrgMemory {
        PrgMemory {
            rom: rom.into_boxed_slice(),
            windows: [BankIndex::FIRST, BankIndex::LAST],
            work_ram: vec![0; work_ram_size].into_boxed_slice(),
            work_ram_enabled: true,
        }
    }

    pub fn bank_count(&self) -> u16 {
        u16::try_from(self.rom.len() / PRG_BANK_SIZE)
            .unwrap_or(u16::MAX)
            .max(1)
    }

    pub fn rom_size(&self) -> usize {
        self.rom.len()
    }

    pub fn work_ram_size(&self) -> usize {
        self.work_ram.len()
    }

    pub fn work_ram_enabled(&self) -> bool {
        self.work_ram_enabled
    }

    pub fn windows(&self) -> [BankIndex; 2] {
        self.windows
    }

    pub fn set_windows(&mut self, windows: [BankIndex; 2]) {
        self.windows = windows;
    }

    pub fn set_work_ram_enabled(&mut self, enabled: bool) {
        self.work_ram_enabled = enabled;
    }

    pub fn resolve_selected_bank_indexes(&self) -> [u16; 2] {
        self.windows.map(|window| window.to_u16(self.bank_count()))
    }

    pub fn bank_string(&self) -> String {
        format!(
            "{} ({} banks total)",
            self.resolve_selected_bank_indexes().iter().join(", "),
            self.bank_count(),
        )
    }

    pub fn read(&self, address: CpuAddress) -> Result<u8, BusError> {
        match self.address_to_prg_index(address)? {
            PrgIndex::Rom(index) => Ok(self.rom[index]),
            PrgIndex::WorkRam(index) => Ok(self.work_ram[index]),
        }
    }

    pub fn write(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError> {
        match self.address_to_prg_index(address)? {
            PrgIndex::Rom(index) => {
                debug!(target: "mapperregisters", "Ignored write of ${value:02X} to PRG ROM ${index:05X} at {address}.");
            }
            PrgIndex::WorkRam(index) => self.work_ram[index] = value,
        }

        Ok(())
    }

    pub fn location(&mut self, address: CpuAddress) -> Result<Location<'_>, BusError> {
        Ok(match self.address_to_prg_index(address)? {
            PrgIndex::Rom(index) =>
                Location::read_only(&self.rom[index], Storage::PrgRom { index }),
            PrgIndex::WorkRam(index) =>
                Location::writable(&mut self.work_ram[index], Storage::PrgWorkRam { index }),
        })
    }

    fn address_to_prg_index(&self, address: CpuAddress) -> Result<PrgIndex, BusError> {
        let raw = address.to_raw();
        match raw {
            0x6000..=0x7FFF if self.work_ram_enabled && !self.work_ram.is_empty() => {
                Ok(PrgIndex::WorkRam(address.mirror_index(WORK_RAM_START, 0x2000) % self.work_ram.len()))
            }
            0x8000..=0xFFFF if !self.rom.is_empty() => {
                let window = usize::from((raw - ROM_START) / 0x4000);
                let offset = address.mirror_index(ROM_START, 0x4000);
                let bank = self.windows[window].to_usize(self.bank_count());
                // A ROM smaller than one bank is mirrored across the window.
                Ok(PrgIndex::Rom((bank * PRG_BANK_SIZE + offset) % self.rom.len()))
            }
            _ => Err(BusError::AddressOutOfBounds),
        }
    }
}

enum PrgIndex {
    Rom(usize),
    WorkRam(usize),
}
