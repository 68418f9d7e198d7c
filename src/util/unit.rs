pub const KIBIBYTE: usize = 0x400;
