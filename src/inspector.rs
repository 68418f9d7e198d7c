use std::io::{self, BufRead, Write};
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::error::BusError;
use crate::memory::address_space::AddressSpace;
use crate::memory::cpu::cpu_address::CpuAddress;

const PROMPT: &str = "nesbus > ";

#[derive(PartialEq, Eq, Clone, Copy, Debug, Display, EnumIter, EnumString)]
pub enum Command {
    #[strum(serialize = "h")]
    Help,
    #[strum(serialize = "q")]
    Quit,
    #[strum(serialize = "rs")]
    ReadSingle,
    #[strum(serialize = "rn")]
    ReadN,
    #[strum(serialize = "rw")]
    ReadWord,
    #[strum(serialize = "ws")]
    WriteSingle,
    #[strum(serialize = "loc")]
    Location,
    #[strum(serialize = "region")]
    Region,
    #[strum(serialize = "banks")]
    Banks,
    #[strum(serialize = "vec")]
    Vectors,
}

impl Command {
    pub fn description(self) -> &'static str {
        use Command::*;
        match self {
            Help => "Display this help message",
            Quit => "Quit the inspector",
            ReadSingle => "Read single memory address 'addr' (rs addr)",
            ReadN => "Read n memory addresses starting from 'addr' (rn addr n)",
            ReadWord => "Read the little endian word at 'addr' (rw addr)",
            WriteSingle => "Write 'value' to memory address 'addr' (ws addr value)",
            Location => "Show which storage backs 'addr' (loc addr)",
            Region => "Show which region 'addr' belongs to (region addr)",
            Banks => "Show the cartridge's current bank configuration",
            Vectors => "Show the NMI, RESET and IRQ vectors",
        }
    }

    fn argument_count(self) -> usize {
        use Command::*;
        match self {
            Help | Quit | Banks | Vectors => 0,
            ReadSingle | ReadWord | Location | Region => 1,
            ReadN | WriteSingle => 2,
        }
    }
}

#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("Invalid command. Enter '{}' for a list of valid commands.", Command::Help)]
    InvalidCommand,
    #[error("Command '{command}' takes {expected} argument(s). {}", .command.description())]
    WrongArgumentCount { command: Command, expected: usize },
    #[error("Argument '{0}' must be hexadecimal.")]
    NotHexadecimal(String),
    #[error("Argument '{0}' must be an integer.")]
    NotInteger(String),
    #[error(transparent)]
    Bus(#[from] BusError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

// A line-oriented memory inspector. Command failures are reported and the loop carries on.
pub struct Inspector<'a> {
    address_space: &'a mut AddressSpace,
    running: bool,
}

impl<'a> Inspector<'a> {
    pub fn new(address_space: &'a mut AddressSpace) -> Inspector<'a> {
        Inspector { address_space, running: true }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // Only I/O failures end the session early.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write, show_prompt: bool) -> io::Result<()> {
        let mut lines = input.lines();
        while self.running {
            if show_prompt {
                write!(output, "{PROMPT}")?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };

            match self.execute(&line?, &mut output) {
                Ok(()) => {}
                Err(InspectorError::Io(err)) => return Err(err),
                Err(err) => writeln!(output, "{err}")?,
            }
        }

        Ok(())
    }

    pub fn execute(&mut self, line: &str, output: &mut impl Write) -> Result<(), InspectorError> {
        let mut words = line.split_whitespace();
        let command = words.next()
            .and_then(|word| Command::from_str(word).ok())
            .ok_or(InspectorError::InvalidCommand)?;
        let args: Vec<&str> = words.collect();
        if args.len() != command.argument_count() {
            return Err(InspectorError::WrongArgumentCount { command, expected: command.argument_count() });
        }

        use Command::*;
        match command {
            Help => {
                for command in Command::iter() {
                    writeln!(output, "{command}: {}", command.description())?;
                }
            }
            Quit => self.running = false,
            ReadSingle => {
                let address = parse_address(args[0])?;
                let value = self.address_space.read(address)?;
                writeln!(output, "    [{address}]: (${value:02X})")?;
            }
            ReadN => {
                let start = parse_address(args[0])?;
                let count: u16 = args[1].parse()
                    .map_err(|_| InspectorError::NotInteger(args[1].to_string()))?;
                for offset in 0..count {
                    let address = start.advance(offset);
                    let value = self.address_space.read(address)?;
                    writeln!(output, "    [{address}]: (${value:02X})")?;
                }
            }
            ReadWord => {
                let address = parse_address(args[0])?;
                let value = self.address_space.read16(address)?;
                writeln!(output, "    [{address}]: (${value:04X})")?;
            }
            WriteSingle => {
                let address = parse_address(args[0])?;
                let value = parse_byte(args[1])?;
                self.address_space.write(address, value)?;
            }
            Location => {
                let address = parse_address(args[0])?;
                let location = self.address_space.location(address)?;
                let access = if location.is_writable() { "read-write" } else { "read-only" };
                writeln!(output, "    [{address}]: {} (${:02X}, {access})", location.storage(), location.get())?;
            }
            Region => {
                let address = parse_address(args[0])?;
                let region = address.region();
                let handled = if region.is_handled() { "" } else { " (unhandled)" };
                writeln!(output, "    [{address}]: {region}{handled}")?;
            }
            Banks => writeln!(output, "    {}", self.address_space.mapper().bank_summary())?,
            Vectors => {
                writeln!(output, "    NMI:   {}", self.address_space.nmi_vector()?)?;
                writeln!(output, "    RESET: {}", self.address_space.reset_vector()?)?;
                writeln!(output, "    IRQ:   {}", self.address_space.irq_vector()?)?;
            }
        }

        Ok(())
    }
}

fn parse_address(text: &str) -> Result<CpuAddress, InspectorError> {
    CpuAddress::from_str(text).map_err(|_| InspectorError::NotHexadecimal(text.to_string()))
}

fn parse_byte(text: &str) -> Result<u8, InspectorError> {
    let digits = text.strip_prefix('$')
        .or_else(|| text.strip_prefix("0x"))
        .unwrap_or(text);
    u8::from_str_radix(digits, 16).map_err(|_| InspectorError::NotHexadecimal(text.to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::cartridge::test_data;
    use crate::ppu::register::ppu_registers::PpuRegisters;

    fn address_space() -> AddressSpace {
        let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
        AddressSpace::new(&test_data::nrom_cartridge(), ppu).unwrap()
    }

    fn run_script(address_space: &mut AddressSpace, script: &str) -> String {
        let mut output = Vec::new();
        Inspector::new(address_space).run(script.as_bytes(), &mut output, false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn write_then_read() {
        let mut address_space = address_space();
        let output = run_script(&mut address_space, "ws 10 ab\nrs 0810\nrn $0010 2\n");
        assert_eq!(output, "    [$0810]: ($AB)\n    [$0010]: ($AB)\n    [$0011]: ($00)\n");
    }

    #[test]
    fn read_word() {
        let mut address_space = address_space();
        let output = run_script(&mut address_space, "ws 0 34\nws 1 12\nrw 0\n");
        assert_eq!(output, "    [$0000]: ($1234)\n");
    }

    #[test]
    fn errors_are_reported_and_the_loop_continues() {
        let mut address_space = address_space();
        let output = run_script(&mut address_space, "bogus\nrs 4000\nrs zz\nrs\nws 0 1\nrs 0\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Invalid command. Enter 'h' for a list of valid commands.");
        assert_eq!(lines[1], BusError::Unimplemented {
            region: crate::memory::cpu::region::Region::ExpansionIORegisters,
            address: CpuAddress::new(0x4000),
        }.to_string());
        assert_eq!(lines[2], "Argument 'zz' must be hexadecimal.");
        assert!(lines[3].starts_with("Command 'rs' takes 1 argument(s)."));
        assert_eq!(lines[4], "    [$0000]: ($01)");
    }

    #[test]
    fn quit_stops_reading() {
        let mut address_space = address_space();
        let output = run_script(&mut address_space, "q\nws 0 1\n");
        assert!(output.is_empty());
        assert_eq!(address_space.read(CpuAddress::new(0x0000)), Ok(0));
    }

    #[test]
    fn location_and_region() {
        let mut address_space = address_space();
        let output = run_script(&mut address_space, "loc 1801\nregion 4018\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "    [$1801]: work RAM $001 ($00, read-write)");
        assert!(lines[1].ends_with("(unhandled)"));
    }

    #[test]
    fn help_lists_every_command() {
        let mut address_space = address_space();
        let output = run_script(&mut address_space, "h\n");
        assert_eq!(output.lines().count(), Command::iter().count());
        assert!(output.contains("rn: Read n memory addresses"));
    }

    #[test]
    fn commands_parse_from_short_names() {
        assert_eq!(Command::from_str("loc"), Ok(Command::Location));
        assert_eq!(Command::Vectors.to_string(), "vec");
        assert!(Command::from_str("step").is_err());
    }
}
