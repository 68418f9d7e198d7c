pub mod cpu_address;
pub mod cpu_internal_ram;
pub mod prg_memory;
pub mod region;
