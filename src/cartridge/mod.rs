pub mod cartridge;
pub mod cartridge_header;

#[cfg(test)]
pub use cartridge::test_data;
