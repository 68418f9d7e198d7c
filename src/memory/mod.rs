pub mod address_space;
pub mod bank_index;
pub mod cpu;
pub mod location;
pub mod mapper;
pub mod mapper_list;
pub mod mappers;
pub mod ppu;
pub mod writability;
