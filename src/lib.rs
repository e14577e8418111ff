//! Setup artifacts for the CTESTWIN contest logger: blank `.lg8` log
//! containers and additive `Ctestwin.ini` updates.
//!
//! # Examples
//!
//! Creating and inspecting a blank log:
//! ```
//! use lg8setup::{
//!     lg8::{inspect::inspect, writer::{create_blank, BlankLog}},
//!     types::{Band, Mode},
//! };
//!
//! let bytes = create_blank(&BlankLog::new(Mode::Fm, Band::B7MHz, 1)).expect("create");
//! let found = inspect(&bytes).expect("inspect");
//! assert_eq!(found.qso_count, 0);
//! assert_eq!(found.mode, Mode::Fm);
//! assert_eq!(found.band, Band::B7MHz);
//! assert_eq!(found.contest_kind, 1);
//! ```
//!
//! Merging settings into an INI without dropping existing keys:
//! ```no_run
//! use lg8setup::{
//!     ini::merge::UpsertPlan,
//!     settings::update_ini,
//! };
//!
//! let mut plan = UpsertPlan::new();
//! plan.section("CW").upsert("CQ", Some("CQ TEST")).upsert("WPM_DEF", None);
//! update_ini("Ctestwin.ini", &plan).expect("update ini");
//! ```
#![deny(missing_docs)]

mod atomic;

/// Legacy 8-bit text encoding.
pub mod codepage;
/// Contest presets and log file naming.
pub mod contest;
/// INI store, merge and persistence.
pub mod ini;
/// `.lg8` log container format.
pub mod lg8;
/// Setup profile mapped onto INI entries.
pub mod settings;
/// Mode and band code tables.
pub mod types;
