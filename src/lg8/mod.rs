//! `.lg8` log container: record-count header, opaque QSO records, trailer.
//!
//! ```text
//! [count: u16 LE][padding: 0 or 14 bytes][count x 170-byte QSO][trailer]
//! ```
//!
//! Nothing on disk says which header variant was used; see [`inspect::inspect`].

use std::{io, path::PathBuf};

use crate::codepage::EncodeError;

/// Heuristic trailer lookup and display.
pub mod inspect;
/// Trailer record codec.
pub mod trailer;
/// Blank log construction.
pub mod writer;

/// Size of one opaque QSO record.
pub const QSO_SIZE: usize = 170;
/// Size of the record-count field.
pub const COUNT_BYTES: usize = 2;
/// Zero padding that follows the count in the extended header.
pub const HEADER_EXTRA: usize = 14;

/// Header layout of a log container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeaderVariant {
    /// Count only; 2-byte header written by older builds.
    Legacy,
    /// Count plus 14 zero bytes; 16-byte header.
    #[default]
    Extended,
}

impl HeaderVariant {
    /// Header length in bytes.
    pub fn size(self) -> usize {
        match self {
            HeaderVariant::Legacy => COUNT_BYTES,
            HeaderVariant::Extended => COUNT_BYTES + HEADER_EXTRA,
        }
    }

    /// Byte offset of the trailer for a file holding `qso_count` records.
    pub fn trailer_offset(self, qso_count: u16) -> usize {
        self.size() + usize::from(qso_count) * QSO_SIZE
    }
}

/// Errors raised while building or reading a log container.
#[derive(Debug, thiserror::Error)]
pub enum Lg8Error {
    /// A trailer string could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The buffer ends before the trailer's leading fields.
    #[error("trailer truncated: need {needed} bytes at offset {offset}, buffer has {len}")]
    TruncatedTrailer {
        /// Offset the trailer was expected at.
        offset: usize,
        /// Bytes required from `offset`.
        needed: usize,
        /// Total buffer length.
        len: usize,
    },
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Refused to replace an existing log.
    #[error("log file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Result alias for log container operations.
pub type Lg8Result<T> = Result<T, Lg8Error>;
