use log::info;

use crate::memory::mapper::*;
use crate::memory::mappers as m;

pub type MapperConstructor = fn(&Cartridge, PpuHandle) -> Result<Box<dyn Mapper>, BusError>;

pub struct MapperEntry {
    pub number: u16,
    pub name: &'static str,
    pub construct: MapperConstructor,
}

static MAPPERS: &[MapperEntry] = &[
    MapperEntry { number: 0, name: "NROM", construct: m::mapper000::create },
    MapperEntry { number: 1, name: "SxROM (MMC1)", construct: m::mapper001::create },
];

pub fn create(number: u16, cartridge: &Cartridge, ppu: PpuHandle) -> Result<Box<dyn Mapper>, BusError> {
    let entry = lookup(number).ok_or(BusError::MapperUnsupported(number))?;
    info!(target: "cartridge", "Using mapper {} ({}).", entry.number, entry.name);
    (entry.construct)(cartridge, ppu)
}

pub fn mapper_name(number: u16) -> Option<&'static str> {
    lookup(number).map(|entry| entry.name)
}

pub fn supported_mapper_numbers() -> impl Iterator<Item = u16> {
    MAPPERS.iter().map(|entry| entry.number)
}

fn lookup(number: u16) -> Option<&'static MapperEntry> {
    MAPPERS.iter().find(|entry| entry.number == number)
}
