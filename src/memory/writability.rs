#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Writability {
    Rom,
    Ram,
}

impl Writability {
    pub fn is_writable(self) -> bool {
        match self {
            Writability::Rom => false,
            Writability::Ram => true,
        }
    }
}
