use log::{debug, info};
use splitbits::{splitbits, splitbits_named};

use crate::memory::mapper::*;
use crate::memory::mappers::mmc1::shift_register::{ShiftRegister, ShiftStatus};

const WORK_RAM_SIZE: usize = 8 * KIBIBYTE;
// PRG mode 3, 8KiB CHR mode, one-screen mirroring bits cleared.
const POWER_ON_CONTROL: u8 = 0b0_1100;

// SxROM (MMC1)
pub struct Mapper001 {
    shift_register: ShiftRegister,
    prg_mode: PrgMode,
    chr_mode: ChrMode,
    prg_bank: u8,
    chr_banks: [u8; 2],
    prg_memory: PrgMemory,
    chr_memory: ChrMemory,
    name_table_mirroring: NameTableMirroring,
    ppu: PpuHandle,
}

impl Mapper for Mapper001 {
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
            0x0000..=0x5FFF => return Err(BusError::AddressOutOfBounds),
            // Work RAM writes don't trigger any of the shifter logic.
            0x6000..=0x7FFF => return self.prg_memory.write(address, value),
            0x8000..=0xFFFF => {}
        }

        match self.shift_register.shift(value) {
            ShiftStatus::Clear => {
                debug!(target: "mapperregisters", "MMC1 shift register reset by write to {address}.");
                self.prg_mode = PrgMode::FixLast;
                self.update_windows();
            }
            ShiftStatus::Continue => { /* Do nothing additional. */ }
            ShiftStatus::Done { finished_value } => self.commit(address, finished_value),
        }

        Ok(())
    }
}

impl Mapper001 {
    pub fn new(cartridge: &Cartridge, ppu: PpuHandle) -> Result<Mapper001, BusError> {
        let prg_rom_size = cartridge.prg_rom().len();
        if prg_rom_size == 0 || prg_rom_size % PRG_BANK_SIZE != 0 {
            return Err(CartridgeError::BadPrgRomSize {
                mapper_number: 1,
                expected: "a non-zero multiple of 16KiB",
                actual: prg_rom_size,
            }.into());
        }

        let name_table_mirroring = cartridge.name_table_mirroring();
        ppu.borrow_mut().set_name_table_mirroring(name_table_mirroring);

        let control = splitbits!(min=u8, POWER_ON_CONTROL, "...cpp..");
        let mut mapper = Mapper001 {
            shift_register: ShiftRegister::default(),
            prg_mode: PrgMode::from_bits(control.p),
            chr_mode: ChrMode::from_bit(u8::from(control.c)),
            prg_bank: 0,
            chr_banks: [0, 1],
            prg_memory: PrgMemory::new(cartridge.prg_rom().to_vec(), WORK_RAM_SIZE),
            chr_memory: ChrMemory::new(cartridge.chr_rom().to_vec()),
            name_table_mirroring,
            ppu,
        };
        mapper.update_windows();
        Ok(mapper)
    }

    pub fn prg_mode(&self) -> PrgMode {
        self.prg_mode
    }

    pub fn chr_mode(&self) -> ChrMode {
        self.chr_mode
    }

    pub fn pending_bit_count(&self) -> u32 {
        self.shift_register.pending_bit_count()
    }

    fn commit(&mut self, address: CpuAddress, value: u8) {
        match address.to_raw() {
            0x0000..=0x7FFF => unreachable!(),
            0x8000..=0x9FFF => {
                let fields = splitbits!(min=u8, value, "...cppmm");
                self.chr_mode = ChrMode::from_bit(u8::from(fields.c));
                self.prg_mode = PrgMode::from_bits(fields.p);
                self.name_table_mirroring = mirroring_from_bits(fields.m);
                self.ppu.borrow_mut().set_name_table_mirroring(self.name_table_mirroring);
                info!(target: "mapperregisters", "MMC1 control: {:?}, {:?}, {}.",
                    self.prg_mode, self.chr_mode, self.name_table_mirroring);
            }
            0xA000..=0xBFFF => {
                self.chr_banks[0] = value;
                info!(target: "mapperregisters", "MMC1 CHR bank 0: {value}.");
            }
            0xC000..=0xDFFF => {
                self.chr_banks[1] = value;
                info!(target: "mapperregisters", "MMC1 CHR bank 1: {value}.");
            }
            0xE000..=0xFFFF => {
                let (ram_disabled, prg_bank) = splitbits_named!(min=u8, value, "...dpppp");
                let work_ram_enabled = u8::from(ram_disabled) == 0;
                self.prg_bank = prg_bank;
                self.prg_memory.set_work_ram_enabled(work_ram_enabled);
                info!(target: "mapperregisters", "MMC1 PRG bank: {prg_bank}, work RAM enabled: {work_ram_enabled}.");
            }
        }

        self.update_windows();
    }

    fn update_windows(&mut self) {
        let prg_bank = self.prg_bank;
        let prg_windows = match self.prg_mode {
            // The low bit is ignored in 32KiB mode.
            PrgMode::Switch32 => [BankIndex::from_u8(prg_bank & !1), BankIndex::from_u8(prg_bank | 1)],
            PrgMode::FixFirst => [BankIndex::FIRST, BankIndex::from_u8(prg_bank)],
            PrgMode::FixLast => [BankIndex::from_u8(prg_bank), BankIndex::LAST],
        };
        self.prg_memory.set_windows(prg_windows);

        let [chr0, chr1] = self.chr_banks;
        let chr_windows = match self.chr_mode {
            ChrMode::Switch8 => [BankIndex::from_u8(chr0 & !1), BankIndex::from_u8(chr0 | 1)],
            ChrMode::Switch4 => [BankIndex::from_u8(chr0), BankIndex::from_u8(chr1)],
        };
        self.chr_memory.set_windows(chr_windows);
    }
}

pub fn create(cartridge: &Cartridge, ppu: PpuHandle) -> Result<Box<dyn Mapper>, BusError> {
    Ok(Box::new(Mapper001::new(cartridge, ppu)?))
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PrgMode {
    // Both windows switch together as one 32KiB bank.
    Switch32,
    // $8000 is fixed to the first bank, $C000 switches.
    FixFirst,
    // $8000 switches, $C000 is fixed to the last bank.
    FixLast,
}

impl PrgMode {
    fn from_bits(bits: u8) -> PrgMode {
        match bits & 0b11 {
            0b00 | 0b01 => PrgMode::Switch32,
            0b10 => PrgMode::FixFirst,
            _ => PrgMode::FixLast,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChrMode {
    Switch8,
    Switch4,
}

impl ChrMode {
    fn from_bit(bit: u8) -> ChrMode {
        if bit & 1 == 0 { ChrMode::Switch8 } else { ChrMode::Switch4 }
    }
}

fn mirroring_from_bits(bits: u8) -> NameTableMirroring {
    match bits & 0b11 {
        0b00 => NameTableMirroring::OneScreenLeftBank,
        0b01 => NameTableMirroring::OneScreenRightBank,
        0b10 => NameTableMirroring::Vertical,
        _ => NameTableMirroring::Horizontal,
    }
}
