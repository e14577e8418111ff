use hashbrown::HashMap;

/// A section name or key the INI text format cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// Empty, or spans more than one line.
    #[error("invalid section name: {0:?}")]
    InvalidSection(String),
    /// Empty after trimming, contains a delimiter or line break, or would be
    /// read back as a comment or section header.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// Checks that `name` can be written between brackets and read back.
pub fn check_section_name(name: &str) -> Result<&str, EntryError> {
    if name.is_empty() || name.contains(['\r', '\n']) {
        return Err(EntryError::InvalidSection(name.to_string()));
    }
    Ok(name)
}

/// Trims `key` and checks that a `key=value` line reads it back unchanged.
pub fn normalize_key(key: &str) -> Result<&str, EntryError> {
    let trimmed = key.trim();
    let bad = trimmed.is_empty()
        || trimmed.starts_with(['#', ';', '['])
        || trimmed.contains(['=', ':', '\r', '\n']);
    if bad {
        return Err(EntryError::InvalidKey(key.to_string()));
    }
    Ok(trimmed)
}

/// Brings `value` to the form the reader produces: every line trimmed, and
/// continuation lines that are blank or start with `#`/`;` dropped.
pub fn normalize_value(value: &str) -> String {
    let mut lines = value.split('\n').map(str::trim);
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines.filter(|l| !l.is_empty() && !l.starts_with(['#', ';'])) {
        out.push('\n');
        out.push_str(line);
    }
    out
}

/// One `[section]` with its keys in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
    pos: HashMap<String, usize>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Section name as written between the brackets.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value stored under `key`; keys compare exactly.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pos.get(key).map(|idx| self.entries[*idx].1.as_str())
    }

    /// True when `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pos.contains_key(key)
    }

    /// Sets `key` to `value`, keeping its position if it already exists.
    /// Both are normalized first (see [`normalize_key`], [`normalize_value`]).
    /// Returns the previous value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<Option<String>, EntryError> {
        let key = normalize_key(key)?;
        let value = normalize_value(value);
        if let Some(idx) = self.pos.get(key) {
            return Ok(Some(std::mem::replace(&mut self.entries[*idx].1, value)));
        }
        self.pos.insert(key.to_string(), self.entries.len());
        self.entries.push((key.to_string(), value));
        Ok(None)
    }

    /// Key/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the section has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered mapping of section name to [`Section`].
///
/// Only content that survives a write and re-read is accepted, so saving a
/// loaded store reproduces the bytes it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    sections: Vec<Section>,
    pos: HashMap<String, usize>,
}

impl ConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Section called `name`, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.pos.get(name).map(|idx| &self.sections[*idx])
    }

    /// Value of `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// True when `name` is present.
    pub fn has_section(&self, name: &str) -> bool {
        self.pos.contains_key(name)
    }

    /// Returns the section called `name`, appending it if absent. The flag is
    /// true when the section was created.
    pub fn ensure_section(&mut self, name: &str) -> Result<(&mut Section, bool), EntryError> {
        if let Some(idx) = self.pos.get(name).copied() {
            return Ok((&mut self.sections[idx], false));
        }
        let name = check_section_name(name)?;
        let idx = self.sections.len();
        self.pos.insert(name.to_string(), idx);
        self.sections.push(Section::new(name));
        Ok((&mut self.sections[idx], true))
    }

    /// Sets `key` in `section`, creating the section if needed. Returns the
    /// previous value.
    pub fn set(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<String>, EntryError> {
        normalize_key(key)?;
        self.ensure_section(section)?.0.set(key, value)
    }

    /// Sections in order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the store has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
