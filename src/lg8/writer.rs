//! Builds zero-record log containers.

use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    atomic,
    codepage::{Cp932, LegacyEncoding},
    types::{Band, ContestKind, Mode},
};

use super::{HEADER_EXTRA, HeaderVariant, Lg8Error, Lg8Result, trailer::Trailer};

/// Parameters for a blank log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankLog {
    /// Mode selected when the log opens.
    pub mode: Mode,
    /// Band selected when the log opens.
    pub band: Band,
    /// Scoring ruleset.
    pub contest_kind: ContestKind,
    /// Legacy entry-style flag.
    pub legacy_style: u16,
    /// Duplicate handling policy.
    pub dupe_policy: u16,
    /// Scoring arithmetic flag.
    pub scoring_flag: u16,
    /// Club operator roster; at most 30 names are kept.
    pub club_operators: Vec<String>,
    /// User-defined multiplier description path.
    pub user_multi_path: Option<String>,
    /// Header layout to write.
    pub header: HeaderVariant,
}

impl BlankLog {
    /// Blank log with every optional field at its default.
    pub fn new(mode: Mode, band: Band, contest_kind: ContestKind) -> Self {
        Self {
            mode,
            band,
            contest_kind,
            legacy_style: 0,
            dupe_policy: 0,
            scoring_flag: 0,
            club_operators: Vec::new(),
            user_multi_path: None,
            header: HeaderVariant::Extended,
        }
    }

    /// Trailer described by these parameters.
    pub fn trailer(&self) -> Trailer {
        let mut trailer = Trailer {
            mode: self.mode,
            legacy_style: self.legacy_style,
            dupe_policy: self.dupe_policy,
            band: self.band,
            contest_kind: self.contest_kind,
            scoring_flag: self.scoring_flag,
            user_multi_path: self.user_multi_path.clone(),
            ..Trailer::default()
        };
        trailer.set_roster(&self.club_operators);
        trailer
    }
}

/// Builds a blank log using cp932 for trailer strings.
pub fn create_blank(blank: &BlankLog) -> Lg8Result<Vec<u8>> {
    create_blank_with(blank, &Cp932)
}

/// Builds a complete zero-record log in memory.
pub fn create_blank_with<E: LegacyEncoding + ?Sized>(
    blank: &BlankLog,
    encoding: &E,
) -> Lg8Result<Vec<u8>> {
    let trailer = blank.trailer().encode_with(encoding)?;

    let mut out = Vec::with_capacity(blank.header.size() + trailer.len());
    out.write_u16::<LittleEndian>(0)?;
    if blank.header == HeaderVariant::Extended {
        out.extend_from_slice(&[0u8; HEADER_EXTRA]);
    }
    out.extend_from_slice(&trailer);

    tracing::debug!(
        mode = %blank.mode,
        band = %blank.band,
        contest_kind = blank.contest_kind,
        header = ?blank.header,
        len = out.len(),
        "built blank log"
    );
    Ok(out)
}

/// Builds a blank log and writes it to `path`.
///
/// The file is replaced atomically; an existing file is only replaced when
/// `overwrite` is set. Returns the number of bytes written.
pub fn write_blank(path: impl AsRef<Path>, blank: &BlankLog, overwrite: bool) -> Lg8Result<usize> {
    let path = path.as_ref();
    if !overwrite && path.exists() {
        return Err(Lg8Error::AlreadyExists(path.to_path_buf()));
    }

    let bytes = create_blank(blank)?;
    atomic::write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote blank log");
    Ok(bytes.len())
}
