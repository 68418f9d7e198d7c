pub mod ppu_registers;
pub mod register_type;
