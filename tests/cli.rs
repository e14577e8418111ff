use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

use lg8setup::{
    ini::persist::load,
    lg8::inspect::inspect_file,
    types::{Band, Mode},
};

fn lg8setup(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lg8setup"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run lg8setup")
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn create_writes_log_and_points_ini_at_it() {
    let tmp = TempDir::new().expect("tmp");
    let ini = tmp.path().join("Ctestwin.ini");
    fs::write(&ini, "[Window]\r\nLeft=10\r\n").expect("seed");

    let out = lg8setup(&[
        "create",
        "--mode",
        "SSB",
        "--band",
        "7MHz",
        "--contest",
        "Field Day",
        "--year",
        "2025",
        "--out-dir",
        arg(tmp.path()),
        "--ini",
        arg(&ini),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let log = tmp.path().join("2025_fd_7MHz.lg8");
    let found = inspect_file(&log).expect("inspect");
    assert_eq!(found.mode, Mode::Ssb);
    assert_eq!(found.band, Band::B7MHz);
    assert_eq!(found.contest_kind, 64);

    let store = load(&ini).expect("load");
    assert_eq!(store.get("Window", "Left"), Some("10"));
    assert_eq!(store.get("CurrentData", "CloseFname"), Some(arg(&log)));
    assert_eq!(store.get("CurrentData", "BandLabel"), Some("7MHz"));
    assert_eq!(store.get("Startup", "Mode"), Some("SSB"));
}

#[test]
fn create_refuses_to_replace_without_force() {
    let tmp = TempDir::new().expect("tmp");
    let base = [
        "create", "--contest", "All JA", "--year", "2024", "--out-dir", arg(tmp.path()),
    ];

    assert!(lg8setup(&base).status.success());
    assert!(!lg8setup(&base).status.success());

    let mut forced = base.to_vec();
    forced.extend(["--force", "--mode", "CW"]);
    assert!(lg8setup(&forced).status.success());
    let found = inspect_file(tmp.path().join("2024_allja_7MHz.lg8")).expect("inspect");
    assert_eq!(found.mode, Mode::Cw);
    assert_eq!(found.contest_kind, 1);
}

#[test]
fn create_rejects_unknown_labels_and_manual_contest_without_kind() {
    let tmp = TempDir::new().expect("tmp");
    let dir = arg(tmp.path());
    assert!(!lg8setup(&["create", "--band", "8MHz", "--out-dir", dir]).status.success());
    assert!(!lg8setup(&["create", "--contest", "Other", "--out-dir", dir]).status.success());
    let manual = lg8setup(&[
        "create", "--contest", "Other", "--key", "myrun", "--kind", "3", "--year", "2025",
        "--out-dir", dir,
    ]);
    assert!(manual.status.success());
    assert!(tmp.path().join("2025_myrun_7MHz.lg8").exists());
}

#[test]
fn inspect_prints_the_report() {
    let tmp = TempDir::new().expect("tmp");
    let created = lg8setup(&[
        "create", "--mode", "FM", "--contest", "All JA", "--year", "2025", "--out-dir",
        arg(tmp.path()),
    ]);
    assert!(created.status.success());

    let out = lg8setup(&["inspect", arg(&tmp.path().join("2025_allja_7MHz.lg8"))]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).expect("utf-8");
    assert!(stdout.contains("QSO count: 0"));
    assert!(stdout.contains("Mode=3 (FM)"));
    assert!(stdout.contains("Trailer@16 (0x10)"));
}

#[test]
fn write_ini_merges_profile_and_exchange_number() {
    let tmp = TempDir::new().expect("tmp");
    let ini = tmp.path().join("Ctestwin.ini");
    let profile = tmp.path().join("profile.json");
    fs::write(&ini, "[CW]\r\nCQ=CQ OLD\r\n").expect("seed");
    fs::write(&profile, r#"{"cw_wpm": 25, "startup_band": "14MHz"}"#).expect("profile");

    let out = lg8setup(&[
        "write-ini",
        "--ini",
        arg(&ini),
        "--profile",
        arg(&profile),
        "--urcnum-all",
        "1001M",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let store = load(&ini).expect("load");
    assert_eq!(store.get("CW", "CQ"), Some("CQ OLD"));
    assert_eq!(store.get("CW", "WPM_DEF"), Some("25"));
    assert_eq!(store.get("Startup", "Band"), Some("14MHz"));
    let urcnum = store.section("UrCnum").expect("urcnum");
    assert_eq!(urcnum.len(), 23);
    assert!(urcnum.iter().all(|(_, v)| v == "1001M"));
    assert_eq!(store.section("CLUB").expect("club").len(), 30);
}

#[test]
fn roster_updates_club_from_a_text_file() {
    let tmp = TempDir::new().expect("tmp");
    let ini = tmp.path().join("Ctestwin.ini");
    let roster = tmp.path().join("ops.txt");
    fs::write(&roster, "JA1AAA\n\nJA1BBB\n").expect("roster");

    let out = lg8setup(&["roster", "--ini", arg(&ini), arg(&roster)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let store = load(&ini).expect("load");
    assert_eq!(store.get("CLUB", "OP1"), Some("JA1AAA"));
    assert_eq!(store.get("CLUB", "OP2"), Some("JA1BBB"));
    assert_eq!(store.get("CLUB", "OP3"), Some(""));
    assert_eq!(store.len(), 1);
}
