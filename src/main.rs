use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::rc::Rc;

use structopt::StructOpt;

use nesbus::config::{Config, Opt};
use nesbus::inspector::Inspector;
use nesbus::logging::logger;
use nesbus::memory::address_space::AddressSpace;
use nesbus::ppu::register::ppu_registers::PpuRegisters;

fn main() -> ExitCode {
    let opt = Opt::from_args();
    if let Err(err) = logger::init(Config::logger(&opt)) {
        eprintln!("Failed to initialize logger. {err}");
        return ExitCode::FAILURE;
    }

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<(), String> {
    let config = Config::new(opt)?;
    let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
    let mut address_space = AddressSpace::new(config.cartridge(), ppu)
        .map_err(|err| err.to_string())?;

    let mut inspector = Inspector::new(&mut address_space);
    let result = if let Some(script_path) = config.script_path() {
        let script = File::open(script_path)
            .map_err(|err| format!("Failed to open script '{}'. {err}", script_path.display()))?;
        inspector.run(BufReader::new(script), io::stdout(), false)
    } else {
        inspector.run(io::stdin().lock(), io::stdout(), true)
    };

    result.map_err(|err| err.to_string())
}
