use thiserror::Error;

use crate::memory::cpu::cpu_address::CpuAddress;
use crate::memory::cpu::region::Region;

#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum BusError {
    #[error("Address out of bounds.")]
    AddressOutOfBounds,
    // The address is architecturally valid, but nothing handles it yet.
    #[error("{region} is not implemented (accessed at {address}).")]
    Unimplemented { region: Region, address: CpuAddress },
    #[error("Mapper {0} is not supported.")]
    MapperUnsupported(u16),
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
}

#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum CartridgeError {
    #[error("Cannot load non-iNES ROM. Found {found:02X?} but need [4E, 45, 53, 1A].")]
    NotINes { found: [u8; 4] },
    #[error("ROM must have a 16 byte header, but was only {0} bytes long.")]
    MissingHeader(usize),
    #[error("ROM was too short: claimed to have {claimed} bytes of {section}, but only {actual} were present.")]
    Truncated { section: &'static str, claimed: usize, actual: usize },
    #[error("PRG ROM size must be {expected} for mapper {mapper_number}, but was {actual} bytes.")]
    BadPrgRomSize { mapper_number: u16, expected: &'static str, actual: usize },
}
