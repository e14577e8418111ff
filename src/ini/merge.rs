//! Additive merge of targeted key updates into a [`ConfigStore`].
//!
//! Every write to the INI goes through [`apply_upserts`]: a present, non-blank
//! value replaces the stored one, anything else leaves the file as it was.
//! Repeated partial runs therefore only ever add or change keys.

use super::store::{
    ConfigStore, EntryError, check_section_name, normalize_key, normalize_value,
};

/// One key update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsert {
    /// Key, compared exactly.
    pub key: String,
    /// New value; `None`, empty or whitespace-only keeps the stored value.
    pub value: Option<String>,
    /// Create the key with an empty value when it is missing.
    pub reserve: bool,
}

impl Upsert {
    /// Value that is only written when present and non-empty.
    pub fn new(key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            key: key.into(),
            value: value.map(str::to_string),
            reserve: false,
        }
    }

    /// Like [`Upsert::new`], but guarantees the key exists afterwards.
    pub fn reserved(key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            reserve: true,
            ..Self::new(key, value)
        }
    }

    fn effective_value(&self) -> Option<String> {
        self.value
            .as_deref()
            .map(normalize_value)
            .filter(|v| !v.is_empty())
    }
}

/// Upserts targeting one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionUpserts {
    name: String,
    upserts: Vec<Upsert>,
}

impl SectionUpserts {
    /// Section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upserts in application order.
    pub fn upserts(&self) -> &[Upsert] {
        &self.upserts
    }

    /// Queues an optional value for `key`.
    pub fn upsert(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.upserts.push(Upsert::new(key, value));
        self
    }

    /// Queues an optional value for `key` and keeps the key present.
    pub fn reserve(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.upserts.push(Upsert::reserved(key, value));
        self
    }
}

/// Ordered per-section upserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertPlan {
    sections: Vec<SectionUpserts>,
}

impl UpsertPlan {
    /// Empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts for `name`, appended to the plan if not yet targeted.
    pub fn section(&mut self, name: &str) -> &mut SectionUpserts {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(SectionUpserts {
                    name: name.to_string(),
                    upserts: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    /// Targeted sections in order.
    pub fn sections(&self) -> &[SectionUpserts] {
        &self.sections
    }

    /// True when no section is targeted.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// What [`apply_upserts`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Sections that did not exist before.
    pub sections_created: Vec<String>,
    /// Keys whose value was written.
    pub keys_set: usize,
    /// Keys skipped because the update was empty.
    pub keys_kept: usize,
}

/// Applies `plan` to `store` without removing or blanking anything.
///
/// Target sections are created when absent. A key is written only when its
/// value is present and non-empty after normalization; reserved keys that are
/// missing are added with an empty value. A plan naming a section or key the
/// file cannot hold is rejected before anything is changed.
pub fn apply_upserts(
    store: &mut ConfigStore,
    plan: &UpsertPlan,
) -> Result<MergeReport, EntryError> {
    for target in plan.sections() {
        check_section_name(target.name())?;
        for upsert in target.upserts() {
            normalize_key(&upsert.key)?;
        }
    }

    let mut report = MergeReport::default();

    for target in plan.sections() {
        let (section, created) = store.ensure_section(target.name())?;
        if created {
            report.sections_created.push(target.name().to_string());
        }

        for upsert in target.upserts() {
            match upsert.effective_value() {
                Some(value) => {
                    section.set(&upsert.key, &value)?;
                    report.keys_set += 1;
                }
                None => {
                    let key = normalize_key(&upsert.key)?;
                    if upsert.reserve && !section.contains_key(key) {
                        section.set(key, "")?;
                    }
                    report.keys_kept += 1;
                }
            }
        }
    }

    tracing::debug!(
        sections_created = report.sections_created.len(),
        keys_set = report.keys_set,
        keys_kept = report.keys_kept,
        "applied ini upserts"
    );
    Ok(report)
}
