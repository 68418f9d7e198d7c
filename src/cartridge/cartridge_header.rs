use splitbits::splitbits_named;

use crate::error::CartridgeError;
use crate::ppu::name_table_mirroring::NameTableMirroring;
use crate::util::unit::KIBIBYTE;

pub const HEADER_LENGTH: usize = 0x10;
pub const TRAINER_LENGTH: usize = 0x200;
pub const PRG_ROM_CHUNK_LENGTH: usize = 16 * KIBIBYTE;
pub const CHR_ROM_CHUNK_LENGTH: usize = 8 * KIBIBYTE;
const PRG_RAM_CHUNK_LENGTH: usize = 8 * KIBIBYTE;
const INES_HEADER_CONSTANT: [u8; 4] = [b'N', b'E', b'S', 0x1A];

// See https://www.nesdev.org/wiki/INES and https://www.nesdev.org/wiki/NES_2.0
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CartridgeHeader {
    mapper_number: u16,
    name_table_mirroring: NameTableMirroring,
    has_persistent_memory: bool,
    trainer_present: bool,
    ines2: bool,

    prg_rom_size: usize,
    chr_rom_size: usize,
    prg_ram_size: usize,
}

impl CartridgeHeader {
    pub fn parse(header: [u8; HEADER_LENGTH]) -> Result<CartridgeHeader, CartridgeError> {
        let magic = [header[0], header[1], header[2], header[3]];
        if magic != INES_HEADER_CONSTANT {
            return Err(CartridgeError::NotINes { found: magic });
        }

        let (low_mapper_number, four_screen, trainer, persistent, vertical) =
            splitbits_named!(min=u8, header[6], "llllftpv");
        let (mid_mapper_number, version) = splitbits_named!(min=u8, header[7], "mmmmii..");

        let ines2 = version == 0b10;
        let (high_mapper_number, prg_ram_size) = if ines2 {
            let prg_ram_shift = header[10] & 0b1111;
            let prg_ram_size = if prg_ram_shift > 0 { 64usize << prg_ram_shift } else { 0 };
            (header[8] & 0b1111, prg_ram_size)
        } else {
            // A zero here means 8KiB, for compatibility with older dumps.
            (0, usize::from(header[8].max(1)) * PRG_RAM_CHUNK_LENGTH)
        };

        let mapper_number = (u16::from(high_mapper_number) << 8)
            | (u16::from(mid_mapper_number) << 4)
            | u16::from(low_mapper_number);

        let name_table_mirroring = if u8::from(four_screen) != 0 {
            NameTableMirroring::FourScreen
        } else if u8::from(vertical) != 0 {
            NameTableMirroring::Vertical
        } else {
            NameTableMirroring::Horizontal
        };

        Ok(CartridgeHeader {
            mapper_number,
            name_table_mirroring,
            has_persistent_memory: u8::from(persistent) != 0,
            trainer_present: u8::from(trainer) != 0,
            ines2,

            prg_rom_size: usize::from(header[4]) * PRG_ROM_CHUNK_LENGTH,
            chr_rom_size: usize::from(header[5]) * CHR_ROM_CHUNK_LENGTH,
            prg_ram_size,
        })
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

    pub fn trainer_present(&self) -> bool {
        self.trainer_present
    }

    pub fn is_ines2(&self) -> bool {
        self.ines2
    }

    pub fn prg_rom_size(&self) -> usize {
        self.prg_rom_size
    }

    pub fn chr_rom_size(&self) -> usize {
        self.chr_rom_size
    }

    pub fn prg_ram_size(&self) -> usize {
        self.prg_ram_size
    }
}
