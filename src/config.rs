use std::fs;
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use crate::cartridge::cartridge::Cartridge;
use crate::logging::logger::Logger;

pub struct Config {
    cartridge: Cartridge,
    script_path: Option<PathBuf>,
}

impl Config {
    pub fn new(opt: &Opt) -> Result<Config, String> {
        info!(target: "cartridge", "Loading ROM '{}'.", opt.rom_path.display());
        let rom = fs::read(&opt.rom_path)
            .map_err(|err| format!("Failed to read ROM '{}'. {err}", opt.rom_path.display()))?;
        let cartridge = Cartridge::load(&rom)
            .map_err(|err| format!("Failed to load ROM '{}'. {err}", opt.rom_path.display()))?;

        Ok(Config {
            cartridge,
            script_path: opt.script_path.clone(),
        })
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn script_path(&self) -> Option<&PathBuf> {
        self.script_path.as_ref()
    }

    pub fn logger(opt: &Opt) -> Logger {
        Logger {
            log_bus_accesses: opt.log_bus_accesses,
            log_mapper_registers: opt.log_mapper_registers,
            log_ppu_flags: opt.log_ppu_flags,
            log_cartridge: !opt.quiet,
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "nesbus", about = "Inspect the CPU address space of an NES cartridge.")]
pub struct Opt {
    #[structopt(name = "ROM", parse(from_os_str))]
    pub rom_path: PathBuf,

    // Commands are read from stdin if no script is given.
    #[structopt(long = "script", parse(from_os_str))]
    pub script_path: Option<PathBuf>,

    #[structopt(long = "logbusaccesses")]
    pub log_bus_accesses: bool,

    #[structopt(long = "logmapperregisters")]
    pub log_mapper_registers: bool,

    #[structopt(long = "logppuflags")]
    pub log_ppu_flags: bool,

    #[structopt(short, long)]
    pub quiet: bool,
}
