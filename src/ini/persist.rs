//! INI text format.
//!
//! Reading accepts `key=value` and `key: value` (first delimiter wins), skips
//! blank lines and `#`/`;` comments, and joins indented lines onto the previous
//! value. Writing always produces `key=value` with CRLF line endings and a
//! blank line after each section.

use std::{fs, io, path::Path};

use crate::{
    atomic,
    codepage::{Cp932, LegacyEncoding},
};

use super::{IniResult, store::ConfigStore};

const EOL: &[u8] = b"\r\n";

/// Loads `path` as cp932; a missing file is an empty store.
pub fn load(path: impl AsRef<Path>) -> IniResult<ConfigStore> {
    load_with(path, &Cp932)
}

/// Loads `path` using `encoding`; a missing file is an empty store.
pub fn load_with<E: LegacyEncoding + ?Sized>(
    path: impl AsRef<Path>,
    encoding: &E,
) -> IniResult<ConfigStore> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "ini not found, starting empty");
            return Ok(ConfigStore::new());
        }
        Err(err) => return Err(err.into()),
    };

    let store = parse(&encoding.decode(&bytes));
    tracing::debug!(path = %path.display(), sections = store.len(), "loaded ini");
    Ok(store)
}

/// Saves `store` to `path` as cp932.
pub fn save(store: &ConfigStore, path: impl AsRef<Path>) -> IniResult<()> {
    save_with(store, path, &Cp932)
}

/// Saves `store` to `path` using `encoding`.
///
/// Everything is encoded before the file is touched, and the file is replaced
/// by rename, so a failure leaves the previous contents in place.
pub fn save_with<E: LegacyEncoding + ?Sized>(
    store: &ConfigStore,
    path: impl AsRef<Path>,
    encoding: &E,
) -> IniResult<()> {
    let path = path.as_ref();
    let bytes = render(store, encoding)?;
    atomic::write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), sections = store.len(), bytes = bytes.len(), "saved ini");
    Ok(())
}

/// Parses INI text into a store.
pub fn parse(text: &str) -> ConfigStore {
    let mut store = ConfigStore::new();
    let mut section: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let indented = raw.starts_with([' ', '\t']);
        if indented {
            if let (Some(name), Some(key)) = (section.as_deref(), last_key.as_deref()) {
                let joined = match store.get(name, key) {
                    Some(prev) => format!("{prev}\n{line}"),
                    None => line.to_string(),
                };
                if let Err(err) = store.set(name, key, &joined) {
                    tracing::warn!(line = line_no, %err, "skipping ini continuation line");
                }
                continue;
            }
        }

        if let Some(name) = section_header(line) {
            section = match store.ensure_section(name) {
                Ok(_) => Some(name.to_string()),
                Err(err) => {
                    tracing::warn!(line = line_no, %err, "skipping ini section");
                    None
                }
            };
            last_key = None;
            continue;
        }

        let Some((key, value)) = split_entry(line) else {
            tracing::warn!(line = line_no, "skipping unparseable ini line");
            continue;
        };
        let Some(name) = section.as_deref() else {
            tracing::warn!(line = line_no, key, "skipping ini entry outside any section");
            continue;
        };
        last_key = match store.set(name, key, value) {
            Ok(_) => Some(key.to_string()),
            Err(err) => {
                tracing::warn!(line = line_no, %err, "skipping ini entry");
                None
            }
        };
    }

    store
}

/// Serializes `store` in order, encoding each name, key and value.
///
/// The store only holds normalized entries, so `parse` of the decoded output
/// yields the same store.
pub fn render<E: LegacyEncoding + ?Sized>(store: &ConfigStore, encoding: &E) -> IniResult<Vec<u8>> {
    let mut out = Vec::new();

    for section in store.sections() {
        out.push(b'[');
        out.extend_from_slice(&encoding.encode(section.name())?);
        out.push(b']');
        out.extend_from_slice(EOL);

        for (key, value) in section.iter() {
            out.extend_from_slice(&encoding.encode(key)?);
            out.push(b'=');
            for (i, part) in value.split('\n').enumerate() {
                if i > 0 {
                    out.extend_from_slice(EOL);
                    out.push(b'\t');
                }
                out.extend_from_slice(&encoding.encode(part)?);
            }
            out.extend_from_slice(EOL);
        }
        out.extend_from_slice(EOL);
    }

    Ok(out)
}

fn section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    (!inner.is_empty()).then_some(inner)
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    let key = line[..at].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[at + 1..].trim()))
}
