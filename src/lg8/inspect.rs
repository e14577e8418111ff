//! Locating the trailer in an existing log and reading its leading fields.

use std::{fmt, fs, path::Path};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::types::{Band, ContestKind, Mode};

use super::{
    COUNT_BYTES, HeaderVariant, Lg8Error, Lg8Result,
    trailer::{LEADING_BYTES, decode_leading},
};

/// What [`inspect`] found in a log container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inspection {
    /// Number of QSO records in the header.
    pub qso_count: u16,
    /// Mode stored in the trailer.
    pub mode: Mode,
    /// Band stored in the trailer.
    pub band: Band,
    /// Contest ruleset stored in the trailer.
    pub contest_kind: ContestKind,
    /// Byte offset the trailer was decoded from.
    pub trailer_offset: usize,
    /// Header layout the offset corresponds to.
    pub header: HeaderVariant,
}

/// Picks the header layout for a buffer of `len` bytes holding `qso_count`
/// records.
///
/// The legacy layout is chosen only when the trailer's leading fields fit at
/// the legacy offset but not at the extended one; in every other case the
/// extended layout wins, even when both would fit.
pub fn select_header(len: usize, qso_count: u16) -> HeaderVariant {
    let off_ext = HeaderVariant::Extended.trailer_offset(qso_count);
    let off_legacy = HeaderVariant::Legacy.trailer_offset(qso_count);

    if len >= off_legacy + LEADING_BYTES && len < off_ext + LEADING_BYTES {
        HeaderVariant::Legacy
    } else {
        HeaderVariant::Extended
    }
}

/// Locates the trailer in `bytes` and decodes its leading fields.
pub fn inspect(bytes: &[u8]) -> Lg8Result<Inspection> {
    let Some(mut count) = bytes.get(..COUNT_BYTES) else {
        return Err(Lg8Error::TruncatedTrailer {
            offset: 0,
            needed: COUNT_BYTES,
            len: bytes.len(),
        });
    };
    let qso_count = count.read_u16::<LittleEndian>()?;

    let header = select_header(bytes.len(), qso_count);
    let trailer_offset = header.trailer_offset(qso_count);
    tracing::debug!(qso_count, ?header, trailer_offset, len = bytes.len(), "selected trailer offset");

    let head = decode_leading(bytes, trailer_offset)?;
    Ok(Inspection {
        qso_count,
        mode: Mode::from_code(head.mode_code),
        band: Band::from_code(head.band_code),
        contest_kind: head.contest_kind,
        trailer_offset,
        header,
    })
}

/// Reads `path` and inspects its contents.
pub fn inspect_file(path: impl AsRef<Path>) -> Lg8Result<Inspection> {
    let bytes = fs::read(path)?;
    inspect(&bytes)
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "QSO count: {}", self.qso_count)?;
        writeln!(f, "Mode={} ({})", self.mode.code(), self.mode)?;
        writeln!(f, "Band={} ({})", self.band.code(), self.band)?;
        writeln!(f, "ContestKind={}", self.contest_kind)?;
        write!(
            f,
            "Trailer@{} (0x{:02X})",
            self.trailer_offset, self.trailer_offset
        )
    }
}
