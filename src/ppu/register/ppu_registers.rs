use log::{debug, info};

use crate::error::BusError;
use crate::memory::cpu::cpu_address::CpuAddress;
use crate::memory::ppu::ppu_address::PpuAddress;
use crate::ppu::name_table_mirroring::NameTableMirroring;
use crate::ppu::ppu_port::PpuPort;
use crate::ppu::register::register_type::RegisterType;

const VBLANK_FLAG: u8 = 0b1000_0000;
// The low five bits of PPUSTATUS aren't driven, so they read back whatever was last on the bus.
const STATUS_DRIVEN_BITS: u8 = 0b1110_0000;
const CTRL_INCREMENT_DOWN: u8 = 0b0000_0100;

// The register file of the picture unit, without any rendering behind it.
#[derive(Clone, Debug)]
pub struct PpuRegisters {
    registers: [u8; 8],
    ppu_io_bus: u8,
    // Shared by PPUSCROLL and PPUADDR. Cleared by reading PPUSTATUS.
    write_toggle: bool,
    current_address: PpuAddress,
    name_table_mirroring: NameTableMirroring,
}

impl PpuRegisters {
    pub fn new() -> PpuRegisters {
        PpuRegisters {
            registers: [0; 8],
            ppu_io_bus: 0,
            write_toggle: false,
            current_address: PpuAddress::ZERO,
            name_table_mirroring: NameTableMirroring::Horizontal,
        }
    }

    pub fn peek(&self, register_type: RegisterType) -> u8 {
        self.registers[register_type as usize]
    }

    pub fn ppu_io_bus(&self) -> u8 {
        self.ppu_io_bus
    }

    pub fn write_toggle(&self) -> bool {
        self.write_toggle
    }

    pub fn current_address(&self) -> PpuAddress {
        self.current_address
    }

    pub fn name_table_mirroring(&self) -> NameTableMirroring {
        self.name_table_mirroring
    }

    pub fn set_vblank(&mut self, active: bool) {
        let status = &mut self.registers[RegisterType::Status as usize];
        if active {
            info!(target: "ppuflags", "Starting vblank.");
            *status |= VBLANK_FLAG;
        } else {
            *status &= !VBLANK_FLAG;
        }
    }

    pub fn read(&mut self, register_type: RegisterType) -> u8 {
        use RegisterType::*;
        match register_type {
            Status => {
                let status = self.registers[Status as usize];
                self.ppu_io_bus = (status & STATUS_DRIVEN_BITS) | (self.ppu_io_bus & !STATUS_DRIVEN_BITS);
                self.registers[Status as usize] = status & !VBLANK_FLAG;
                self.write_toggle = false;
            }
            OamData => self.ppu_io_bus = self.registers[OamData as usize],
            PpuData => {
                self.ppu_io_bus = self.registers[PpuData as usize];
                self.advance_current_address();
            }
            // Write-only registers return the stale bus value.
            Ctrl | Mask | OamAddr | Scroll | PpuAddr => {}
        }

        self.ppu_io_bus
    }

    pub fn write(&mut self, register_type: RegisterType, value: u8) {
        self.ppu_io_bus = value;

        use RegisterType::*;
        match register_type {
            Status => { /* Read-only. */ }
            Ctrl | Mask | OamAddr | OamData => self.registers[register_type as usize] = value,
            Scroll => {
                self.registers[Scroll as usize] = value;
                self.write_toggle = !self.write_toggle;
            }
            PpuAddr => {
                self.registers[PpuAddr as usize] = value;
                if self.write_toggle {
                    self.current_address.set_low_byte(value);
                } else {
                    self.current_address.set_high_byte(value);
                }

                self.write_toggle = !self.write_toggle;
            }
            PpuData => {
                self.registers[PpuData as usize] = value;
                self.advance_current_address();
            }
        }
    }

    fn advance_current_address(&mut self) {
        let increment = if self.registers[RegisterType::Ctrl as usize] & CTRL_INCREMENT_DOWN == 0 {
            1
        } else {
            32
        };
        self.current_address.advance(increment);
    }
}

impl Default for PpuRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl PpuPort for PpuRegisters {
    fn read_from_cpu(&mut self, address: CpuAddress) -> Result<u8, BusError> {
        let register_type = RegisterType::from_address(address).ok_or(BusError::AddressOutOfBounds)?;
        Ok(self.read(register_type))
    }

    fn write_from_cpu(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError> {
        let register_type = RegisterType::from_address(address).ok_or(BusError::AddressOutOfBounds)?;
        self.write(register_type, value);
        Ok(())
    }

    fn location_from_cpu(&mut self, address: CpuAddress) -> Result<&mut u8, BusError> {
        let register_type = RegisterType::from_address(address).ok_or(BusError::AddressOutOfBounds)?;
        Ok(&mut self.registers[register_type as usize])
    }

    fn set_name_table_mirroring(&mut self, mirroring: NameTableMirroring) {
        if mirroring != self.name_table_mirroring {
            debug!("Name table mirroring changed from {} to {mirroring}.", self.name_table_mirroring);
        }

        self.name_table_mirroring = mirroring;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(raw: u16) -> CpuAddress {
        CpuAddress::new(raw)
    }

    #[test]
    fn status_read_clears_vblank_and_toggle() {
        let mut registers = PpuRegisters::new();
        registers.write(RegisterType::PpuAddr, 0x21);
        assert!(registers.write_toggle());
        registers.set_vblank(true);

        assert_eq!(registers.read(RegisterType::Status) & VBLANK_FLAG, VBLANK_FLAG);
        assert!(!registers.write_toggle());
        assert_eq!(registers.read(RegisterType::Status) & VBLANK_FLAG, 0);
    }

    #[test]
    fn status_low_bits_come_from_the_bus() {
        let mut registers = PpuRegisters::new();
        registers.set_vblank(true);
        registers.write(RegisterType::Mask, 0x1F);
        assert_eq!(registers.read(RegisterType::Status), 0x9F);
    }

    #[test]
    fn write_only_registers_read_the_bus() {
        let mut registers = PpuRegisters::new();
        registers.write(RegisterType::Ctrl, 0x80);
        registers.write(RegisterType::OamAddr, 0x3C);
        assert_eq!(registers.read(RegisterType::Ctrl), 0x3C);
        assert_eq!(registers.peek(RegisterType::Ctrl), 0x80);
    }

    #[test]
    fn ppu_address_latches_high_then_low() {
        let mut registers = PpuRegisters::new();
        registers.write(RegisterType::PpuAddr, 0x23);
        registers.write(RegisterType::PpuAddr, 0xC0);
        assert_eq!(registers.current_address(), PpuAddress::from_u16(0x23C0));

        registers.write(RegisterType::PpuData, 0x00);
        assert_eq!(registers.current_address(), PpuAddress::from_u16(0x23C1));

        registers.write(RegisterType::Ctrl, CTRL_INCREMENT_DOWN);
        registers.read(RegisterType::PpuData);
        assert_eq!(registers.current_address(), PpuAddress::from_u16(0x23E1));
    }

    #[test]
    fn status_writes_are_ignored() {
        let mut registers = PpuRegisters::new();
        registers.write(RegisterType::Status, 0xFF);
        assert_eq!(registers.peek(RegisterType::Status), 0x00);
    }

    #[test]
    fn port_rejects_mirrored_addresses() {
        let mut registers = PpuRegisters::new();
        assert_eq!(registers.read_from_cpu(address(0x2008)), Err(BusError::AddressOutOfBounds));
        assert_eq!(registers.write_from_cpu(address(0x4000), 0), Err(BusError::AddressOutOfBounds));
        assert!(registers.location_from_cpu(address(0x3FFF)).is_err());
    }

    #[test]
    fn location_points_at_the_latch() {
        let mut registers = PpuRegisters::new();
        *registers.location_from_cpu(address(0x2001)).unwrap() = 0x1E;
        assert_eq!(registers.peek(RegisterType::Mask), 0x1E);
    }
}
