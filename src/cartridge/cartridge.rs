use std::fmt;

use log::{info, warn};

use crate::cartridge::cartridge_header::{CartridgeHeader, HEADER_LENGTH, TRAINER_LENGTH};
use crate::error::CartridgeError;
use crate::ppu::name_table_mirroring::NameTableMirroring;
use crate::util::unit::KIBIBYTE;

// The contents of a cartridge, as needed to build its mapper.
#[derive(Clone, Debug)]
pub struct Cartridge {
    mapper_number: u16,
    name_table_mirroring: NameTableMirroring,
    has_persistent_memory: bool,

    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    prg_ram_size: usize,
}

impl Cartridge {
    pub fn new(
        mapper_number: u16,
        name_table_mirroring: NameTableMirroring,
        prg_rom: Vec<u8>,
        chr_rom: Vec<u8>,
    ) -> Cartridge {
        Cartridge {
            mapper_number,
            name_table_mirroring,
            has_persistent_memory: false,
            prg_rom,
            chr_rom,
            prg_ram_size: 0,
        }
    }

    pub fn with_prg_ram_size(mut self, prg_ram_size: usize) -> Cartridge {
        self.prg_ram_size = prg_ram_size;
        self
    }

    // Parse an iNES file. See https://www.nesdev.org/wiki/INES
    pub fn load(rom: &[u8]) -> Result<Cartridge, CartridgeError> {
        let raw_header: [u8; HEADER_LENGTH] = rom.get(..HEADER_LENGTH)
            .and_then(|header| header.try_into().ok())
            .ok_or(CartridgeError::MissingHeader(rom.len()))?;
        let header = CartridgeHeader::parse(raw_header)?;

        let mut prg_rom_start = HEADER_LENGTH;
        if header.trainer_present() {
            info!(target: "cartridge", "Skipping {TRAINER_LENGTH} byte trainer.");
            prg_rom_start += TRAINER_LENGTH;
        }

        let prg_rom_end = prg_rom_start + header.prg_rom_size();
        let prg_rom = section(rom, "PRG ROM", prg_rom_start, prg_rom_end)?;
        let chr_rom_end = prg_rom_end + header.chr_rom_size();
        let chr_rom = section(rom, "CHR ROM", prg_rom_end, chr_rom_end)?;

        if rom.len() > chr_rom_end {
            warn!(target: "cartridge", "Ignoring {} trailing bytes after CHR ROM.", rom.len() - chr_rom_end);
        }

        let cartridge = Cartridge {
            mapper_number: header.mapper_number(),
            name_table_mirroring: header.name_table_mirroring(),
            has_persistent_memory: header.has_persistent_memory(),
            prg_rom: prg_rom.to_vec(),
            chr_rom: chr_rom.to_vec(),
            prg_ram_size: header.prg_ram_size(),
        };
        info!(target: "cartridge", "Loaded cartridge (CRC32 {:08X}). {cartridge}", crc32fast::hash(rom));
        Ok(cartridge)
    }

    pub fn mapper_number(&self) -> u16 {
        self.mapper_number
    }

    pub fn name_table_mirroring(&self) -> NameTableMirroring {
        self.name_table_mirroring
    }

    pub fn has_persistent_memory(&self) -> bool {
        self.has_persistent_memory
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn prg_ram_size(&self) -> usize {
        self.prg_ram_size
    }
}

impl fmt::Display for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mapper: {}, PRG ROM: {}KiB, CHR ROM: {}KiB, PRG RAM: {}KiB, Mirroring: {}, Battery: {}",
            self.mapper_number,
            self.prg_rom.len() / KIBIBYTE,
            self.chr_rom.len() / KIBIBYTE,
            self.prg_ram_size / KIBIBYTE,
            self.name_table_mirroring,
            self.has_persistent_memory,
        )
    }
}

fn section<'a>(rom: &'a [u8], name: &'static str, start: usize, end: usize) -> Result<&'a [u8], CartridgeError> {
    rom.get(start..end).ok_or(CartridgeError::Truncated {
        section: name,
        claimed: end - start,
        actual: rom.len().saturating_sub(start),
    })
}

#[cfg(test)]
pub mod test_data {
    use super::*;

    // Distinct enough that a read from the wrong offset won't go unnoticed.
    pub fn nrom_prg_byte(index: usize) -> u8 {
        (index ^ (index >> 8) ^ (index >> 13)) as u8
    }

    pub fn nrom_chr_byte(index: usize) -> u8 {
        (index.wrapping_mul(31) >> 3) as u8
    }

    pub fn nrom_cartridge() -> Cartridge {
        let prg_rom = (0..32 * KIBIBYTE).map(nrom_prg_byte).collect();
        let chr_rom = (0..8 * KIBIBYTE).map(nrom_chr_byte).collect();
        Cartridge::new(0, NameTableMirroring::Vertical, prg_rom, chr_rom)
    }

    // 128KiB of PRG ROM where every byte holds its bank number, and no CHR ROM.
    pub fn mmc1_cartridge() -> Cartridge {
        let prg_rom = (0..8u8)
            .flat_map(|bank| std::iter::repeat_n(bank, 16 * KIBIBYTE))
            .collect();
        Cartridge::new(1, NameTableMirroring::Horizontal, prg_rom, Vec::new())
    }

    pub fn cartridge_with_mapper(mapper_number: u16) -> Cartridge {
        Cartridge::new(mapper_number, NameTableMirroring::Horizontal, vec![0; 32 * KIBIBYTE], Vec::new())
    }

    pub fn ines_file(flags6: u8, prg_chunks: u8, chr_chunks: u8) -> Vec<u8> {
        let mut rom = vec![b'N', b'E', b'S', 0x1A, prg_chunks, chr_chunks, flags6];
        rom.resize(HEADER_LENGTH, 0);
        if flags6 & 0b0100 != 0 {
            rom.extend(std::iter::repeat_n(0xEE, TRAINER_LENGTH));
        }

        rom.extend((0..usize::from(prg_chunks) * 16 * KIBIBYTE).map(nrom_prg_byte));
        rom.extend((0..usize::from(chr_chunks) * 8 * KIBIBYTE).map(nrom_chr_byte));
        rom
    }
}
