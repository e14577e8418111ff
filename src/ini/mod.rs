//! `Ctestwin.ini` handling: an ordered, case-sensitive section/key store, the
//! additive merge applied to it, and its cp932 text persistence.

use std::io;

use crate::codepage::EncodeError;

use self::store::EntryError;

/// Upsert plans and the merge that applies them.
pub mod merge;
/// Text parsing and serialization.
pub mod persist;
/// Ordered section/key store.
pub mod store;

/// Errors raised while loading or saving an INI file.
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    /// A section, key or value has no legacy representation.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// A section name or key the text format cannot hold.
    #[error(transparent)]
    Entry(#[from] EntryError),
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for INI operations.
pub type IniResult<T> = Result<T, IniError>;
