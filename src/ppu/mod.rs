pub mod name_table_mirroring;
pub mod ppu_port;
pub mod register;
