use std::fmt;

// How the four logical name tables at $2000-$2FFF map onto the console's 2KiB of CIRAM.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NameTableMirroring {
    Horizontal,
    Vertical,
    OneScreenLeftBank,
    OneScreenRightBank,
    // The cartridge supplies the extra 2KiB itself.
    FourScreen,
}

impl fmt::Display for NameTableMirroring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NameTableMirroring::Horizontal => "Horizontal",
            NameTableMirroring::Vertical => "Vertical",
            NameTableMirroring::OneScreenLeftBank => "OneScreenLeftBank",
            NameTableMirroring::OneScreenRightBank => "OneScreenRightBank",
            NameTableMirroring::FourScreen => "FourScreen",
        };
        write!(f, "{text}")
    }
}
