pub mod cartridge;
pub mod config;
pub mod error;
pub mod inspector;
pub mod logging;
pub mod memory;
pub mod ppu;
pub mod util;
