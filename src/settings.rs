//! Setup profile written into `Ctestwin.ini`.
//!
//! A profile is usually loaded from JSON:
//!
//! ```
//! use lg8setup::{settings::IniSettings, types::Band};
//!
//! let profile = r#"{
//!     "urcnum": { "7MHz": "1001M", "144MHz": "1001L" },
//!     "club_operators": ["JA1AAA", "JA1BBB"],
//!     "cw_cq": "CQ TEST",
//!     "cw_wpm": 22,
//!     "startup_band": "7MHz",
//!     "startup_mode": "CW"
//! }"#;
//! let settings: IniSettings = serde_json::from_str(profile).unwrap();
//! assert_eq!(settings.urcnum.get(&Band::B7MHz).map(String::as_str), Some("1001M"));
//! ```

use std::{fs, io, path::Path};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{
    ini::{
        IniResult,
        merge::{MergeReport, UpsertPlan, apply_upserts},
        persist,
    },
    lg8::trailer::ROSTER_SLOTS,
    types::{Band, Mode},
};

/// Per-band exchange numbers.
pub const SECTION_URCNUM: &str = "UrCnum";
/// Club operator roster, `OP1`..`OP30`.
pub const SECTION_CLUB: &str = "CLUB";
/// Partial-callsign database.
pub const SECTION_PARTIAL: &str = "Partial";
/// CW keyer defaults.
pub const SECTION_CW: &str = "CW";
/// State restored at startup by current builds.
pub const SECTION_CURRENT_DATA: &str = "CurrentData";
/// Startup band/mode read by some older builds.
pub const SECTION_STARTUP: &str = "Startup";
/// Contest definition.
pub const SECTION_CONTEST: &str = "Contest";

/// Failure reading a JSON profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The profile could not be read.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The profile is not valid JSON for [`IniSettings`].
    #[error("invalid profile: {0}")]
    Json(#[from] serde_json::Error),
}

/// Values to merge into the INI. Every field is optional; unset fields leave
/// the file untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IniSettings {
    /// Exchange number sent on each band.
    pub urcnum: HashMap<Band, String>,
    /// Club station operator names.
    pub club_operators: Vec<String>,
    /// Partial-callsign file.
    pub partial_file: Option<String>,
    /// CW CQ message.
    pub cw_cq: Option<String>,
    /// Default CW speed.
    pub cw_wpm: Option<u32>,
    /// Log opened at startup.
    pub open_log: Option<String>,
    /// User-defined multiplier description.
    pub user_contest_md: Option<String>,
    /// Band selected at startup.
    pub startup_band: Option<Band>,
    /// Mode selected at startup.
    pub startup_mode: Option<Mode>,
}

impl IniSettings {
    /// Reads a JSON profile.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sets the same exchange number on every known band. An empty value is
    /// ignored.
    pub fn fill_urcnum(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            tracing::warn!("no exchange number given, leaving per-band numbers as they are");
            return;
        }
        for band in Band::ALL {
            self.urcnum.insert(band, value.to_string());
        }
    }

    /// Builds the upserts for every INI entry this profile covers.
    pub fn upsert_plan(&self) -> UpsertPlan {
        let mut plan = UpsertPlan::new();

        let urcnum = plan.section(SECTION_URCNUM);
        for band in Band::ALL {
            let value = self.urcnum.get(&band).map(|v| v.trim());
            urcnum.upsert(band.label(), value);
        }

        push_roster(&mut plan, &self.club_operators);

        if let Some(partial) = non_empty(&self.partial_file) {
            plan.section(SECTION_PARTIAL).upsert("Filename", Some(partial));
        }

        let wpm = self.cw_wpm.filter(|w| *w > 0).map(|w| w.to_string());
        let cq = non_empty(&self.cw_cq);
        if cq.is_some() || wpm.is_some() {
            plan.section(SECTION_CW)
                .upsert("CQ", cq)
                .upsert("WPM_DEF", wpm.as_deref());
        }

        push_startup(&mut plan, self.startup_band, self.startup_mode);

        if let Some(log) = non_empty(&self.open_log) {
            plan.section(SECTION_CURRENT_DATA).upsert("CloseFname", Some(log));
        }

        if let Some(md) = non_empty(&self.user_contest_md) {
            plan.section(SECTION_CONTEST).upsert("UserContestMD", Some(md));
        }

        plan
    }
}

/// Upserts that make the logger open `log` on `band`/`mode` at startup.
pub fn startup_plan(log: &str, band: Band, mode: Mode) -> UpsertPlan {
    let mut plan = UpsertPlan::new();
    push_startup(&mut plan, Some(band), Some(mode));
    plan.section(SECTION_CURRENT_DATA).upsert("CloseFname", Some(log));
    plan
}

/// Upserts touching only the `[CLUB]` roster.
pub fn roster_plan<S: AsRef<str>>(operators: &[S]) -> UpsertPlan {
    let mut plan = UpsertPlan::new();
    push_roster(&mut plan, operators);
    plan
}

/// Splits free text into roster names: one per line, trimmed, blank lines
/// dropped, at most [`ROSTER_SLOTS`].
pub fn parse_roster(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(ROSTER_SLOTS)
        .map(str::to_string)
        .collect()
}

/// Loads `path`, merges `plan` and saves it back.
pub fn update_ini(path: impl AsRef<Path>, plan: &UpsertPlan) -> IniResult<MergeReport> {
    let path = path.as_ref();
    let mut store = persist::load(path)?;
    let report = apply_upserts(&mut store, plan)?;
    persist::save(&store, path)?;
    tracing::info!(
        path = %path.display(),
        keys_set = report.keys_set,
        sections_created = ?report.sections_created,
        "updated ini"
    );
    Ok(report)
}

fn push_roster<S: AsRef<str>>(plan: &mut UpsertPlan, operators: &[S]) {
    let club = plan.section(SECTION_CLUB);
    for slot in 0..ROSTER_SLOTS {
        let name = operators.get(slot).map(|n| n.as_ref().trim());
        club.reserve(format!("OP{}", slot + 1), name);
    }
}

// Startup band/mode go to both sections; which one is read depends on the
// logger build.
fn push_startup(plan: &mut UpsertPlan, band: Option<Band>, mode: Option<Mode>) {
    let band = band.map(Band::label);
    let mode = mode.map(Mode::label);
    if band.is_none() && mode.is_none() {
        return;
    }
    plan.section(SECTION_CURRENT_DATA)
        .upsert("BandLabel", band.as_deref())
        .upsert("ModeLabel", mode.as_deref());
    plan.section(SECTION_STARTUP)
        .upsert("Band", band.as_deref())
        .upsert("Mode", mode.as_deref());
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
