//! Operating mode and band code tables shared by the log container and the INI.
//!
//! Both enums are closed over the codes the logging application knows about and
//! carry an `Unknown` variant for anything else, so a file written by a newer
//! build still decodes. Unknown codes render as `#<code>`.

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Contest ruleset selector stored in the trailer.
pub type ContestKind = u16;

/// Reverse lookup of a label that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0:?}")]
pub struct UnknownLabel(pub String);

/// Emission mode code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Code 0.
    Cw,
    /// Code 1.
    Rtty,
    /// Code 2.
    Ssb,
    /// Code 3.
    Fm,
    /// Code 4.
    Am,
    /// Code 5.
    Atv,
    /// Code 6.
    Sstv,
    /// Code 7.
    Psk,
    /// Code 8.
    Gmsk,
    /// Code 9.
    Mfsk,
    /// Code 10.
    Qpsk,
    /// Code 11.
    Fsk,
    /// Code 12.
    DStar,
    /// Code 13.
    C4fm,
    /// Code 14.
    Jt65,
    /// Code 15.
    Jt9,
    /// Code 16.
    Iscat,
    /// Code 17.
    Ft8,
    /// Code 18.
    Jt4,
    /// Code 19.
    Qra64,
    /// Code 20.
    Msk144,
    /// Code 21.
    Wspr,
    /// Code 22.
    Jtms,
    /// Code 23.
    Ft4,
    /// Code 24.
    Fst4,
    /// Any code outside the table.
    Unknown(u16),
}

impl Mode {
    /// Known modes in code order.
    pub const ALL: [Mode; 25] = [
        Mode::Cw,
        Mode::Rtty,
        Mode::Ssb,
        Mode::Fm,
        Mode::Am,
        Mode::Atv,
        Mode::Sstv,
        Mode::Psk,
        Mode::Gmsk,
        Mode::Mfsk,
        Mode::Qpsk,
        Mode::Fsk,
        Mode::DStar,
        Mode::C4fm,
        Mode::Jt65,
        Mode::Jt9,
        Mode::Iscat,
        Mode::Ft8,
        Mode::Jt4,
        Mode::Qra64,
        Mode::Msk144,
        Mode::Wspr,
        Mode::Jtms,
        Mode::Ft4,
        Mode::Fst4,
    ];

    /// Maps a raw code; codes outside the table become [`Mode::Unknown`].
    pub fn from_code(code: u16) -> Self {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .unwrap_or(Mode::Unknown(code))
    }

    /// Raw code written to the trailer.
    pub fn code(self) -> u16 {
        match self {
            Mode::Cw => 0,
            Mode::Rtty => 1,
            Mode::Ssb => 2,
            Mode::Fm => 3,
            Mode::Am => 4,
            Mode::Atv => 5,
            Mode::Sstv => 6,
            Mode::Psk => 7,
            Mode::Gmsk => 8,
            Mode::Mfsk => 9,
            Mode::Qpsk => 10,
            Mode::Fsk => 11,
            Mode::DStar => 12,
            Mode::C4fm => 13,
            Mode::Jt65 => 14,
            Mode::Jt9 => 15,
            Mode::Iscat => 16,
            Mode::Ft8 => 17,
            Mode::Jt4 => 18,
            Mode::Qra64 => 19,
            Mode::Msk144 => 20,
            Mode::Wspr => 21,
            Mode::Jtms => 22,
            Mode::Ft4 => 23,
            Mode::Fst4 => 24,
            Mode::Unknown(code) => code,
        }
    }

    /// Display label, e.g. `SSB`, or `#<code>` for unknown codes.
    pub fn label(self) -> Cow<'static, str> {
        let known = match self {
            Mode::Cw => "CW",
            Mode::Rtty => "RTTY",
            Mode::Ssb => "SSB",
            Mode::Fm => "FM",
            Mode::Am => "AM",
            Mode::Atv => "ATV",
            Mode::Sstv => "SSTV",
            Mode::Psk => "PSK",
            Mode::Gmsk => "GMSK",
            Mode::Mfsk => "MFSK",
            Mode::Qpsk => "QPSK",
            Mode::Fsk => "FSK",
            Mode::DStar => "D-STAR",
            Mode::C4fm => "C4FM",
            Mode::Jt65 => "JT65",
            Mode::Jt9 => "JT9",
            Mode::Iscat => "ISCAT",
            Mode::Ft8 => "FT8",
            Mode::Jt4 => "JT4",
            Mode::Qra64 => "QRA64",
            Mode::Msk144 => "MSK144",
            Mode::Wspr => "WSPR",
            Mode::Jtms => "JTMS",
            Mode::Ft4 => "FT4",
            Mode::Fst4 => "FST4",
            Mode::Unknown(code) => {
                return match Self::from_code(code) {
                    Mode::Unknown(code) => Cow::Owned(format!("#{code}")),
                    known => known.label(),
                };
            }
        };
        Cow::Borrowed(known)
    }

    /// Exact inverse of [`Mode::label`].
    pub fn from_label(label: &str) -> Result<Self, UnknownLabel> {
        if let Some(mode) = Self::ALL.into_iter().find(|m| m.label() == label) {
            return Ok(mode);
        }
        match parse_unknown(label) {
            Some(code) if matches!(Self::from_code(code), Mode::Unknown(_)) => {
                Ok(Mode::Unknown(code))
            }
            _ => Err(UnknownLabel(label.to_string())),
        }
    }

    /// True for codes inside the table.
    pub fn is_known(self) -> bool {
        !matches!(Self::from_code(self.code()), Mode::Unknown(_))
    }
}

// `Unknown(c)` for a code inside the table is the same value as the named variant.
impl PartialEq for Mode {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Mode {}

impl Hash for Mode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

/// Band code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Band {
    /// 1.9 MHz, code 0.
    B1_9MHz,
    /// 3.5 MHz, code 1.
    B3_5MHz,
    /// 7 MHz, code 2.
    B7MHz,
    /// 10 MHz, code 3.
    B10MHz,
    /// 14 MHz, code 4.
    B14MHz,
    /// 18 MHz, code 5.
    B18MHz,
    /// 21 MHz, code 6.
    B21MHz,
    /// 24 MHz, code 7.
    B24MHz,
    /// 28 MHz, code 8.
    B28MHz,
    /// 50 MHz, code 9.
    B50MHz,
    /// 144 MHz, code 10.
    B144MHz,
    /// 430 MHz, code 11.
    B430MHz,
    /// 1200 MHz, code 12.
    B1200MHz,
    /// 2400 MHz, code 13.
    B2400MHz,
    /// 5600 MHz, code 14.
    B5600MHz,
    /// 10 GHz, code 15.
    B10GHz,
    /// 24 GHz, code 16.
    B24GHz,
    /// 47 GHz, code 17.
    B47GHz,
    /// 75 GHz, code 18.
    B75GHz,
    /// 77 GHz, code 19.
    B77GHz,
    /// 135 GHz, code 20.
    B135GHz,
    /// 248 GHz, code 21.
    B248GHz,
    /// 136 kHz, code 22.
    B136kHz,
    /// Any code outside the table.
    Unknown(u16),
}

/// Number of known bands; also the length of the per-band point tables.
pub const BAND_COUNT: usize = 23;

impl Band {
    /// Known bands in code order.
    pub const ALL: [Band; BAND_COUNT] = [
        Band::B1_9MHz,
        Band::B3_5MHz,
        Band::B7MHz,
        Band::B10MHz,
        Band::B14MHz,
        Band::B18MHz,
        Band::B21MHz,
        Band::B24MHz,
        Band::B28MHz,
        Band::B50MHz,
        Band::B144MHz,
        Band::B430MHz,
        Band::B1200MHz,
        Band::B2400MHz,
        Band::B5600MHz,
        Band::B10GHz,
        Band::B24GHz,
        Band::B47GHz,
        Band::B75GHz,
        Band::B77GHz,
        Band::B135GHz,
        Band::B248GHz,
        Band::B136kHz,
    ];

    /// Maps a raw code; codes outside the table become [`Band::Unknown`].
    pub fn from_code(code: u16) -> Self {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .unwrap_or(Band::Unknown(code))
    }

    /// Raw code written to the trailer.
    pub fn code(self) -> u16 {
        match self {
            Band::B1_9MHz => 0,
            Band::B3_5MHz => 1,
            Band::B7MHz => 2,
            Band::B10MHz => 3,
            Band::B14MHz => 4,
            Band::B18MHz => 5,
            Band::B21MHz => 6,
            Band::B24MHz => 7,
            Band::B28MHz => 8,
            Band::B50MHz => 9,
            Band::B144MHz => 10,
            Band::B430MHz => 11,
            Band::B1200MHz => 12,
            Band::B2400MHz => 13,
            Band::B5600MHz => 14,
            Band::B10GHz => 15,
            Band::B24GHz => 16,
            Band::B47GHz => 17,
            Band::B75GHz => 18,
            Band::B77GHz => 19,
            Band::B135GHz => 20,
            Band::B248GHz => 21,
            Band::B136kHz => 22,
            Band::Unknown(code) => code,
        }
    }

    /// Display label, e.g. `7MHz`, or `#<code>` for unknown codes.
    ///
    /// The label doubles as the key of the per-band `[UrCnum]` INI entries.
    pub fn label(self) -> Cow<'static, str> {
        let known = match self {
            Band::B1_9MHz => "1.9MHz",
            Band::B3_5MHz => "3.5MHz",
            Band::B7MHz => "7MHz",
            Band::B10MHz => "10MHz",
            Band::B14MHz => "14MHz",
            Band::B18MHz => "18MHz",
            Band::B21MHz => "21MHz",
            Band::B24MHz => "24MHz",
            Band::B28MHz => "28MHz",
            Band::B50MHz => "50MHz",
            Band::B144MHz => "144MHz",
            Band::B430MHz => "430MHz",
            Band::B1200MHz => "1200MHz",
            Band::B2400MHz => "2400MHz",
            Band::B5600MHz => "5600MHz",
            Band::B10GHz => "10GHz",
            Band::B24GHz => "24GHz",
            Band::B47GHz => "47GHz",
            Band::B75GHz => "75GHz",
            Band::B77GHz => "77GHz",
            Band::B135GHz => "135GHz",
            Band::B248GHz => "248GHz",
            Band::B136kHz => "136kHz",
            Band::Unknown(code) => {
                return match Self::from_code(code) {
                    Band::Unknown(code) => Cow::Owned(format!("#{code}")),
                    known => known.label(),
                };
            }
        };
        Cow::Borrowed(known)
    }

    /// Exact inverse of [`Band::label`].
    pub fn from_label(label: &str) -> Result<Self, UnknownLabel> {
        if let Some(band) = Self::ALL.into_iter().find(|b| b.label() == label) {
            return Ok(band);
        }
        match parse_unknown(label) {
            Some(code) if matches!(Self::from_code(code), Band::Unknown(_)) => {
                Ok(Band::Unknown(code))
            }
            _ => Err(UnknownLabel(label.to_string())),
        }
    }

    /// True for codes inside the table.
    pub fn is_known(self) -> bool {
        !matches!(Self::from_code(self.code()), Band::Unknown(_))
    }
}

// `Unknown(c)` for a code inside the table is the same value as the named variant.
impl PartialEq for Band {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Band {}

impl Hash for Band {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

/// Label for a raw mode code; never fails.
pub fn mode_label_of(code: u16) -> Cow<'static, str> {
    Mode::from_code(code).label()
}

/// Code for a mode label.
pub fn mode_code_of(label: &str) -> Result<u16, UnknownLabel> {
    Mode::from_label(label).map(Mode::code)
}

/// Label for a raw band code; never fails.
pub fn band_label_of(code: u16) -> Cow<'static, str> {
    Band::from_code(code).label()
}

/// Code for a band label.
pub fn band_code_of(label: &str) -> Result<u16, UnknownLabel> {
    Band::from_label(label).map(Band::code)
}

fn parse_unknown(label: &str) -> Option<u16> {
    let digits = label.strip_prefix('#')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Mode {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl FromStr for Band {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for Mode {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value)
    }
}

impl TryFrom<String> for Band {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value)
    }
}

impl From<Mode> for String {
    fn from(value: Mode) -> Self {
        value.label().into_owned()
    }
}

impl From<Band> for String {
    fn from(value: Band) -> Self {
        value.label().into_owned()
    }
}
