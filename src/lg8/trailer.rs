//! Trailer record appended after the QSO records.
//!
//! ```text
//! [mode][legacy][dupe][band][kind][scoring]        6 x u16 LE
//! [phone points]                                    23 x u16 LE
//! [cw points]                                       23 x u16 LE
//! [operator name]                                   30 x 20 bytes, NUL-padded
//! [user multiplier path, NUL-terminated]            optional, open-ended
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    codepage::{Cp932, LegacyEncoding, encode_fixed},
    types::{BAND_COUNT, Band, ContestKind, Mode},
};

use super::{Lg8Error, Lg8Result};

/// Bytes occupied by the six leading scalars.
pub const LEADING_BYTES: usize = 12;
/// Operator roster slots.
pub const ROSTER_SLOTS: usize = 30;
/// Width of one roster slot, terminator included.
pub const NAME_WIDTH: usize = 20;
/// Trailer size when no user multiplier path is present.
pub const FIXED_TRAILER_BYTES: usize =
    LEADING_BYTES + 2 * BAND_COUNT * 2 + ROSTER_SLOTS * NAME_WIDTH;

/// Full trailer contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    /// Mode selected when the log opens.
    pub mode: Mode,
    /// Non-zero selects the old single-operator entry style.
    pub legacy_style: u16,
    /// How the logger treats duplicate contacts.
    pub dupe_policy: u16,
    /// Band selected when the log opens.
    pub band: Band,
    /// Scoring ruleset.
    pub contest_kind: ContestKind,
    /// Alters the point arithmetic for some rulesets.
    pub scoring_flag: u16,
    /// Phone points per band code.
    pub points_phone: [u16; BAND_COUNT],
    /// CW points per band code.
    pub points_cw: [u16; BAND_COUNT],
    /// Club station operator names; empty string for unused slots.
    pub club_operators: [String; ROSTER_SLOTS],
    /// Path to a user-defined multiplier description.
    pub user_multi_path: Option<String>,
}

impl Default for Trailer {
    fn default() -> Self {
        Self {
            mode: Mode::Cw,
            legacy_style: 0,
            dupe_policy: 0,
            band: Band::B1_9MHz,
            contest_kind: 0,
            scoring_flag: 0,
            points_phone: [1; BAND_COUNT],
            points_cw: [1; BAND_COUNT],
            club_operators: Default::default(),
            user_multi_path: None,
        }
    }
}

impl Trailer {
    /// Fills the roster from `names`, padding with empty slots and dropping
    /// anything past [`ROSTER_SLOTS`].
    pub fn set_roster<S: AsRef<str>>(&mut self, names: &[S]) {
        if names.len() > ROSTER_SLOTS {
            tracing::debug!(
                supplied = names.len(),
                kept = ROSTER_SLOTS,
                "truncating operator roster"
            );
        }
        self.club_operators = std::array::from_fn(|i| {
            names
                .get(i)
                .map(|n| n.as_ref().to_string())
                .unwrap_or_default()
        });
    }

    /// Path field, treating an empty string as absent.
    fn present_path(&self) -> Option<&str> {
        self.user_multi_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Encoded length in bytes under `encoding`.
    pub fn encoded_len_with<E: LegacyEncoding + ?Sized>(&self, encoding: &E) -> Lg8Result<usize> {
        let path = match self.present_path() {
            Some(path) => encoding.encode(path)?.len() + 1,
            None => 0,
        };
        Ok(FIXED_TRAILER_BYTES + path)
    }

    /// Encodes with the default cp932 encoding.
    pub fn encode(&self) -> Lg8Result<Vec<u8>> {
        self.encode_with(&Cp932)
    }

    /// Encodes every field in on-disk order.
    pub fn encode_with<E: LegacyEncoding + ?Sized>(&self, encoding: &E) -> Lg8Result<Vec<u8>> {
        let mut out = Vec::with_capacity(FIXED_TRAILER_BYTES);

        for v in [
            self.mode.code(),
            self.legacy_style,
            self.dupe_policy,
            self.band.code(),
            self.contest_kind,
            self.scoring_flag,
        ] {
            out.write_u16::<LittleEndian>(v)?;
        }
        for v in self.points_phone.iter().chain(self.points_cw.iter()) {
            out.write_u16::<LittleEndian>(*v)?;
        }
        for name in &self.club_operators {
            out.extend_from_slice(&encode_fixed(encoding, name, Some(NAME_WIDTH))?);
        }
        if let Some(path) = self.present_path() {
            out.extend_from_slice(&encode_fixed(encoding, path, None)?);
        }

        Ok(out)
    }
}

/// The six scalars at the start of a trailer, as raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailerHead {
    /// Mode code.
    pub mode_code: u16,
    /// Legacy-style flag.
    pub legacy_style: u16,
    /// Dupe policy.
    pub dupe_policy: u16,
    /// Band code.
    pub band_code: u16,
    /// Contest ruleset.
    pub contest_kind: ContestKind,
    /// Scoring flag.
    pub scoring_flag: u16,
}

/// Decodes the six leading scalars of a trailer starting at `offset`.
pub fn decode_leading(bytes: &[u8], offset: usize) -> Lg8Result<TrailerHead> {
    let end = offset.checked_add(LEADING_BYTES);
    let Some(mut cur) = end.and_then(|end| bytes.get(offset..end)) else {
        return Err(Lg8Error::TruncatedTrailer {
            offset,
            needed: LEADING_BYTES,
            len: bytes.len(),
        });
    };

    Ok(TrailerHead {
        mode_code: cur.read_u16::<LittleEndian>()?,
        legacy_style: cur.read_u16::<LittleEndian>()?,
        dupe_policy: cur.read_u16::<LittleEndian>()?,
        band_code: cur.read_u16::<LittleEndian>()?,
        contest_kind: cur.read_u16::<LittleEndian>()?,
        scoring_flag: cur.read_u16::<LittleEndian>()?,
    })
}
