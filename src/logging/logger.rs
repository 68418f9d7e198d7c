use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub fn init(logger: Logger) -> Result<(), SetLoggerError> {
    // Bus accesses are logged at trace level, so nothing can be filtered out up front.
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(LevelFilter::Trace))
}

pub struct Logger {
    pub log_bus_accesses: bool,
    pub log_mapper_registers: bool,
    pub log_ppu_flags: bool,
    pub log_cartridge: bool,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match metadata.target() {
            "" => true,
            "busaccess" => self.log_bus_accesses,
            "mapperregisters" => self.log_mapper_registers,
            "ppuflags" => self.log_ppu_flags,
            "cartridge" => self.log_cartridge,
            target => {
                let chunks: Vec<&str> = target.split("::").collect();
                match chunks[..] {
                    ["nesbus", ..] => metadata.level() <= Level::Info,
                    _ => false,
                }
            }
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() < Level::Info {
                print!("{} - ", record.level());
            }

            match record.target() {
                "busaccess" => print!("BUS "),
                "mapperregisters" => print!("MAPPER "),
                "ppuflags" => print!("PPU FLAGS "),
                _ => {}
            }

            println!("{}", record.args());
        }
    }

    fn flush(&self) {}
}
