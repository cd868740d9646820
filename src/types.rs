// src/types.rs
use std::fmt;

/// Codestream marker enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Marker {
    /// Start of codestream
    Soc = 0xFF4F,
    /// Image and tile size
    Siz = 0xFF51,
    /// Coding style default
    Cod = 0xFF52,
    /// Tile-part lengths
    Tlm = 0xFF55,
    /// Quantization default
    Qcd = 0xFF5C,
    /// Progression order change
    Poc = 0xFF5F,
    /// Comment
    Com = 0xFF64,
    /// Start of tile-part
    Sot = 0xFF90,
    /// Start of packet
    Sop = 0xFF91,
    /// End of packet header
    Eph = 0xFF92,
    /// Start of data
    Sod = 0xFF93,
    /// End of codestream
    Eoc = 0xFFD9,
}

impl Marker {
    /// Every recognized marker, in code order
    pub const ALL: [Marker; 12] = [
        Marker::Soc,
        Marker::Siz,
        Marker::Cod,
        Marker::Tlm,
        Marker::Qcd,
        Marker::Poc,
        Marker::Com,
        Marker::Sot,
        Marker::Sop,
        Marker::Eph,
        Marker::Sod,
        Marker::Eoc,
    ];

    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0xFF4F => Some(Marker::Soc),
            0xFF51 => Some(Marker::Siz),
            0xFF52 => Some(Marker::Cod),
            0xFF55 => Some(Marker::Tlm),
            0xFF5C => Some(Marker::Qcd),
            0xFF5F => Some(Marker::Poc),
            0xFF64 => Some(Marker::Com),
            0xFF90 => Some(Marker::Sot),
            0xFF91 => Some(Marker::Sop),
            0xFF92 => Some(Marker::Eph),
            0xFF93 => Some(Marker::Sod),
            0xFFD9 => Some(Marker::Eoc),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    /// Whether a 2-byte length field (counting itself) follows the marker code
    pub fn has_length_field(self) -> bool {
        !matches!(self, Marker::Soc | Marker::Eph | Marker::Sod | Marker::Eoc)
    }

    /// Short mnemonic used in the codestream syntax
    pub fn mnemonic(self) -> &'static str {
        match self {
            Marker::Soc => "SOC",
            Marker::Siz => "SIZ",
            Marker::Cod => "COD",
            Marker::Tlm => "TLM",
            Marker::Qcd => "QCD",
            Marker::Poc => "POC",
            Marker::Com => "COM",
            Marker::Sot => "SOT",
            Marker::Sop => "SOP",
            Marker::Eph => "EPH",
            Marker::Sod => "SOD",
            Marker::Eoc => "EOC",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Marker::Soc => "start of codestream",
            Marker::Siz => "image and tile size",
            Marker::Cod => "coding style default",
            Marker::Tlm => "tile-part lengths",
            Marker::Qcd => "quantization default",
            Marker::Poc => "progression order change",
            Marker::Com => "comment",
            Marker::Sot => "start of tile-part",
            Marker::Sop => "start of packet",
            Marker::Eph => "end of packet header",
            Marker::Sod => "start of data",
            Marker::Eoc => "end of codestream",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.mnemonic(), self.code())
    }
}

impl TryFrom<u16> for Marker {
    type Error = u16;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        Marker::from_u16(value).ok_or(value)
    }
}
