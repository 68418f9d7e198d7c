use std::cell::RefMut;
use std::fmt;

use log::debug;

use crate::ppu::register::register_type::RegisterType;

// A direct handle to the byte of storage that a bus read or write at some address would touch.
//
// A Location borrows whatever produced it, so it can't be held across any further call into the
// address space or mapper. In particular a bank switch can never leave a Location pointing at a
// bank that is no longer mapped in.
pub struct Location<'a> {
    slot: Slot<'a>,
    storage: Storage,
}

enum Slot<'a> {
    Writable(&'a mut u8),
    ReadOnly(&'a u8),
    // Storage owned by a shared device (the PPU), borrowed for as long as the Location lives.
    Shared(RefMut<'a, u8>),
}

impl<'a> Location<'a> {
    pub fn writable(value: &'a mut u8, storage: Storage) -> Location<'a> {
        Location { slot: Slot::Writable(value), storage }
    }

    pub fn read_only(value: &'a u8, storage: Storage) -> Location<'a> {
        Location { slot: Slot::ReadOnly(value), storage }
    }

    pub fn shared(value: RefMut<'a, u8>, storage: Storage) -> Location<'a> {
        Location { slot: Slot::Shared(value), storage }
    }

    pub fn get(&self) -> u8 {
        match &self.slot {
            Slot::Writable(value) => **value,
            Slot::ReadOnly(value) => **value,
            Slot::Shared(value) => **value,
        }
    }

    // Writes to ROM are ignored, the same as writes through the bus.
    pub fn set(&mut self, new_value: u8) {
        match &mut self.slot {
            Slot::Writable(value) => **value = new_value,
            Slot::Shared(value) => **value = new_value,
            Slot::ReadOnly(_) => {
                debug!(target: "mapperregisters", "Ignored write of ${new_value:02X} to {}.", self.storage);
            }
        }
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self.slot, Slot::ReadOnly(_))
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }
}

impl fmt::Debug for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("storage", &self.storage)
            .field("value", &self.get())
            .field("writable", &self.is_writable())
            .finish()
    }
}

// Which buffer a Location points into, and where.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Storage {
    WorkRam { index: usize },
    PpuRegister(RegisterType),
    PrgRom { index: usize },
    PrgWorkRam { index: usize },
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::WorkRam { index } => write!(f, "work RAM ${index:03X}"),
            Storage::PpuRegister(register_type) => write!(f, "PPU register {register_type:?}"),
            Storage::PrgRom { index } => write!(f, "PRG ROM ${index:05X}"),
            Storage::PrgWorkRam { index } => write!(f, "PRG work RAM ${index:04X}"),
        }
    }
}
