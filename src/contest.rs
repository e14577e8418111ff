//! Contest presets and log file naming.

use crate::types::{Band, ContestKind};

/// Ruleset used when nothing else names one: user-defined multipliers.
pub const DEFAULT_CONTEST_KIND: ContestKind = 14;

/// Key used when neither the preset nor the metadata yield one.
pub const FALLBACK_KEY: &str = "custom";

/// A contest offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestPreset {
    /// Display name.
    pub name: &'static str,
    /// File-name key; empty when the contest takes it from metadata.
    pub key: &'static str,
    /// Ruleset; `None` when the contest takes it from metadata.
    pub kind: Option<ContestKind>,
    /// The operator types the key and kind by hand.
    pub manual: bool,
}

/// Built-in contests.
pub const PRESETS: &[ContestPreset] = &[
    ContestPreset { name: "All JA", key: "allja", kind: Some(1), manual: false },
    ContestPreset { name: "6m and down", key: "6md", kind: Some(2), manual: false },
    ContestPreset { name: "ACAG", key: "acag", kind: Some(4), manual: false },
    ContestPreset { name: "Field Day", key: "fd", kind: Some(64), manual: false },
    ContestPreset { name: "All Asian DX", key: "aa", kind: Some(8), manual: false },
    ContestPreset { name: "CQ WW DX", key: "cqww", kind: Some(7), manual: false },
    ContestPreset { name: "All Tohoku", key: "", kind: None, manual: false },
    ContestPreset { name: "All Miyagi", key: "", kind: None, manual: false },
    ContestPreset { name: "Other", key: "", kind: None, manual: true },
];

/// Looks up a preset by display name.
pub fn preset(name: &str) -> Option<&'static ContestPreset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Fields an external reader extracted from a contest description document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestMeta {
    /// Ruleset.
    pub kind: Option<ContestKind>,
    /// File-name key.
    pub key: Option<String>,
    /// Human-readable contest name.
    pub name: Option<String>,
}

/// Key and kind typed by the operator for the manual preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualContest {
    /// File-name key.
    pub key: Option<String>,
    /// Ruleset.
    pub kind: Option<ContestKind>,
}

/// Contest resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContestError {
    /// The manual preset was chosen without a ruleset number.
    #[error("contest kind must be given as a number for {0:?}")]
    MissingKind(&'static str),
}

/// Final key and ruleset for a new log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContest {
    /// File-name key.
    pub key: String,
    /// Ruleset.
    pub kind: ContestKind,
}

/// Combines a preset with document metadata and manual input.
///
/// Metadata overrides the preset; for the manual preset the typed values
/// override both and a kind is required. A missing kind falls back to
/// [`DEFAULT_CONTEST_KIND`] and a missing key is derived from the contest name.
pub fn resolve_contest(
    preset: &ContestPreset,
    meta: &ContestMeta,
    manual: &ManualContest,
) -> Result<ResolvedContest, ContestError> {
    let mut key = preset.key.to_string();
    let mut kind = preset.kind;

    if let Some(meta_key) = meta.key.as_deref().map(sanitize_key).filter(|k| !k.is_empty()) {
        key = meta_key;
    }
    if meta.kind.is_some() {
        kind = meta.kind;
    }

    if preset.manual {
        if let Some(manual_key) = manual.key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            key = manual_key.to_string();
        }
        kind = Some(manual.kind.ok_or(ContestError::MissingKind(preset.name))?);
    }

    if key.is_empty() {
        let base = meta.name.as_deref().unwrap_or(preset.name);
        key = sanitize_key(&base.to_lowercase());
        if key.is_empty() {
            key = FALLBACK_KEY.to_string();
        }
    }

    let resolved = ResolvedContest {
        key,
        kind: kind.unwrap_or(DEFAULT_CONTEST_KIND),
    };
    tracing::debug!(preset = preset.name, key = %resolved.key, kind = resolved.kind, "resolved contest");
    Ok(resolved)
}

/// Keeps only `[A-Za-z0-9_-]`.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// `{year}_{key}_{band}.lg8`
pub fn log_file_name(year: i32, key: &str, band: Band) -> String {
    format!("{year}_{key}_{}.lg8", band.label())
}
