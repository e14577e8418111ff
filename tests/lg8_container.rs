use std::borrow::Cow;

use tempfile::TempDir;

use lg8setup::{
    codepage::{EncodeError, LegacyEncoding, encode_fixed},
    lg8::{
        HeaderVariant, Lg8Error, QSO_SIZE,
        inspect::{inspect, inspect_file, select_header},
        trailer::{FIXED_TRAILER_BYTES, NAME_WIDTH, Trailer, decode_leading},
        writer::{BlankLog, create_blank, create_blank_with, write_blank},
    },
    types::{Band, Mode},
};

/// Offset of the first roster slot inside a trailer.
const ROSTER_AT: usize = 12 + 23 * 2 * 2;

struct AsciiOnly;

impl LegacyEncoding for AsciiOnly {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        if !text.is_ascii() {
            return Err(EncodeError::UnencodableText {
                text: text.to_string(),
                encoding: self.name(),
            });
        }
        Ok(Cow::Borrowed(text.as_bytes()))
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        String::from_utf8_lossy(bytes)
    }
}

fn with_records(header: HeaderVariant, count: u16, trailer: &[u8]) -> Vec<u8> {
    let mut out = count.to_le_bytes().to_vec();
    out.resize(header.size(), 0);
    out.resize(out.len() + usize::from(count) * QSO_SIZE, 0xAA);
    out.extend_from_slice(trailer);
    out
}

#[test]
fn fm_7mhz_blank_log_inspects_back() {
    let bytes = create_blank(&BlankLog::new(Mode::Fm, Band::B7MHz, 1)).expect("create");
    assert_eq!(bytes.len(), 16 + FIXED_TRAILER_BYTES);
    assert_eq!(&bytes[..16], &[0u8; 16]);

    let found = inspect(&bytes).expect("inspect");
    assert_eq!(found.qso_count, 0);
    assert_eq!(found.mode.code(), 3);
    assert_eq!(found.band.code(), 2);
    assert_eq!(found.contest_kind, 1);
    assert_eq!(found.trailer_offset, 16);
    assert_eq!(found.header, HeaderVariant::Extended);
}

#[test]
fn trailer_layout_is_fixed() {
    let mut trailer = Trailer {
        mode: Mode::Ssb,
        legacy_style: 1,
        dupe_policy: 2,
        band: Band::B144MHz,
        contest_kind: 64,
        scoring_flag: 1,
        ..Trailer::default()
    };
    trailer.set_roster(&["JA1AAA", "JA1BBB"]);
    let bytes = trailer.encode().expect("encode");

    assert_eq!(bytes.len(), 12 + 2 * 23 * 2 + 30 * 20);
    assert_eq!(&bytes[..12], &[2, 0, 1, 0, 2, 0, 10, 0, 64, 0, 1, 0]);
    assert!(bytes[12..ROSTER_AT].chunks(2).all(|c| c == [1, 0]));
    assert_eq!(&bytes[ROSTER_AT..ROSTER_AT + 7], b"JA1AAA\0");
    assert!(bytes[ROSTER_AT + 7..ROSTER_AT + NAME_WIDTH].iter().all(|b| *b == 0));
    assert_eq!(&bytes[ROSTER_AT + NAME_WIDTH..ROSTER_AT + NAME_WIDTH + 6], b"JA1BBB");
    assert!(bytes[ROSTER_AT + 2 * NAME_WIDTH..].iter().all(|b| *b == 0));
}

#[test]
fn user_multi_path_is_appended_only_when_present() {
    let path = r"C:\CTESTWIN\alltohoku.md";
    let trailer = Trailer {
        user_multi_path: Some(path.to_string()),
        ..Trailer::default()
    };
    let bytes = trailer.encode().expect("encode");
    assert_eq!(bytes.len(), FIXED_TRAILER_BYTES + path.len() + 1);
    assert_eq!(&bytes[FIXED_TRAILER_BYTES..bytes.len() - 1], path.as_bytes());
    assert_eq!(bytes.last(), Some(&0));
    assert_eq!(trailer.encoded_len_with(&AsciiOnly).expect("len"), bytes.len());

    let empty = Trailer {
        user_multi_path: Some(String::new()),
        ..Trailer::default()
    };
    assert_eq!(empty.encode().expect("encode").len(), FIXED_TRAILER_BYTES);
}

#[test]
fn operator_name_width_boundary() {
    let fits = "A".repeat(19);
    let slot = encode_fixed(&lg8setup::codepage::Cp932, &fits, Some(NAME_WIDTH)).expect("fits");
    assert_eq!(slot.len(), 20);
    assert_eq!(slot[19], 0);

    let mut blank = BlankLog::new(Mode::Cw, Band::B14MHz, 7);
    blank.club_operators = vec![fits, "B".repeat(20)];
    let err = create_blank(&blank).expect_err("too long");
    assert!(matches!(
        err,
        Lg8Error::Encode(EncodeError::StringTooLong { len: 21, width: 20, .. })
    ));
}

#[test]
fn multibyte_names_count_encoded_bytes() {
    // Nine two-byte kana plus one ASCII letter plus the terminator: 20 bytes.
    let name = format!("{}A", "あ".repeat(9));
    let slot = encode_fixed(&lg8setup::codepage::Cp932, &name, Some(NAME_WIDTH)).expect("fits");
    assert_eq!(slot.len(), 20);
    assert_eq!(&slot[..2], &[0x82, 0xA0]);

    let too_long = "あ".repeat(10);
    assert!(matches!(
        encode_fixed(&lg8setup::codepage::Cp932, &too_long, Some(NAME_WIDTH)),
        Err(EncodeError::StringTooLong { len: 21, .. })
    ));
}

#[test]
fn unencodable_names_are_rejected() {
    let mut blank = BlankLog::new(Mode::Cw, Band::B14MHz, 7);
    blank.club_operators = vec!["\u{1F4FB}".to_string()];
    let err = create_blank(&blank).expect_err("emoji");
    assert!(matches!(err, Lg8Error::Encode(EncodeError::UnencodableText { .. })));

    blank.club_operators = vec!["東北".to_string()];
    assert!(create_blank(&blank).is_ok());
    assert!(matches!(
        create_blank_with(&blank, &AsciiOnly),
        Err(Lg8Error::Encode(EncodeError::UnencodableText { encoding: "ascii", .. }))
    ));
}

#[test]
fn roster_is_padded_and_truncated_to_thirty_slots() {
    let names: Vec<String> = (0..35).map(|i| format!("OP{i}")).collect();
    let mut blank = BlankLog::new(Mode::Ssb, Band::B21MHz, 1);
    blank.club_operators = names;
    let trailer = blank.trailer();
    assert_eq!(trailer.club_operators[29], "OP29");

    let bytes = create_blank(&blank).expect("create");
    assert_eq!(bytes.len(), 16 + FIXED_TRAILER_BYTES);

    blank.club_operators = vec!["JA7ZZZ".to_string()];
    let trailer = blank.trailer();
    assert_eq!(trailer.club_operators[0], "JA7ZZZ");
    assert!(trailer.club_operators[1..].iter().all(String::is_empty));
}

#[test]
fn legacy_header_is_two_bytes() {
    let blank = BlankLog {
        header: HeaderVariant::Legacy,
        ..BlankLog::new(Mode::Cw, Band::B3_5MHz, 2)
    };
    let bytes = create_blank(&blank).expect("create");
    assert_eq!(bytes.len(), 2 + FIXED_TRAILER_BYTES);

    let head = decode_leading(&bytes, 2).expect("decode");
    assert_eq!(head.mode_code, 0);
    assert_eq!(head.band_code, 1);
    assert_eq!(head.contest_kind, 2);
}

#[test]
fn legacy_offset_selected_only_when_extended_does_not_fit() {
    assert_eq!(select_header(14, 0), HeaderVariant::Legacy);
    assert_eq!(select_header(27, 0), HeaderVariant::Legacy);
    assert_eq!(select_header(28, 0), HeaderVariant::Extended);
    assert_eq!(select_header(13, 0), HeaderVariant::Extended);

    // Both offsets satisfiable: the extended one wins.
    assert_eq!(select_header(2 + FIXED_TRAILER_BYTES, 0), HeaderVariant::Extended);
}

#[test]
fn legacy_trailer_head_is_found_in_a_short_buffer() {
    let trailer = Trailer {
        mode: Mode::Ft8,
        band: Band::B50MHz,
        contest_kind: 8,
        ..Trailer::default()
    }
    .encode()
    .expect("encode");

    let bytes = with_records(HeaderVariant::Legacy, 2, &trailer[..12]);
    let found = inspect(&bytes).expect("inspect");
    assert_eq!(found.header, HeaderVariant::Legacy);
    assert_eq!(found.trailer_offset, 2 + 2 * QSO_SIZE);
    assert_eq!(found.qso_count, 2);
    assert_eq!(found.mode, Mode::Ft8);
    assert_eq!(found.band, Band::B50MHz);
    assert_eq!(found.contest_kind, 8);
}

#[test]
fn extended_trailer_found_after_records() {
    let trailer = Trailer {
        mode: Mode::Rtty,
        band: Band::B28MHz,
        contest_kind: 7,
        ..Trailer::default()
    }
    .encode()
    .expect("encode");

    let bytes = with_records(HeaderVariant::Extended, 3, &trailer);
    let found = inspect(&bytes).expect("inspect");
    assert_eq!(found.header, HeaderVariant::Extended);
    assert_eq!(found.trailer_offset, 16 + 3 * QSO_SIZE);
    assert_eq!(found.mode, Mode::Rtty);
    assert_eq!(found.band, Band::B28MHz);
}

#[test]
fn unknown_codes_survive_inspection() {
    let trailer = Trailer {
        mode: Mode::Unknown(40),
        band: Band::Unknown(30),
        ..Trailer::default()
    }
    .encode()
    .expect("encode");
    let bytes = with_records(HeaderVariant::Extended, 0, &trailer);
    let found = inspect(&bytes).expect("inspect");
    assert_eq!(found.mode.label(), "#40");
    assert_eq!(found.band.label(), "#30");
}

#[test]
fn truncated_buffers_fail() {
    assert!(matches!(
        inspect(&[]),
        Err(Lg8Error::TruncatedTrailer { offset: 0, .. })
    ));
    assert!(matches!(inspect(&[0]), Err(Lg8Error::TruncatedTrailer { .. })));
    // Count only, no trailer under either layout.
    assert!(matches!(
        inspect(&[0, 0, 0, 0]),
        Err(Lg8Error::TruncatedTrailer { offset: 16, needed: 12, len: 4 })
    ));
    // Count claims more records than the file holds.
    let mut bytes = create_blank(&BlankLog::new(Mode::Cw, Band::B7MHz, 1)).expect("create");
    bytes[..2].copy_from_slice(&100u16.to_le_bytes());
    assert!(matches!(inspect(&bytes), Err(Lg8Error::TruncatedTrailer { .. })));

    assert!(matches!(
        decode_leading(&[0; 11], 0),
        Err(Lg8Error::TruncatedTrailer { .. })
    ));
    assert!(decode_leading(&[0; 12], usize::MAX).is_err());
}

#[test]
fn inspection_report_lists_codes_and_labels() {
    let bytes = create_blank(&BlankLog::new(Mode::Ssb, Band::B7MHz, 64)).expect("create");
    let report = inspect(&bytes).expect("inspect").to_string();
    assert_eq!(
        report,
        "QSO count: 0\nMode=2 (SSB)\nBand=2 (7MHz)\nContestKind=64\nTrailer@16 (0x10)"
    );
}

#[test]
fn write_blank_replaces_only_when_asked() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("2025_fd_7MHz.lg8");

    let blank = BlankLog::new(Mode::Cw, Band::B7MHz, 64);
    let written = write_blank(&path, &blank, false).expect("write");
    assert_eq!(written, 16 + FIXED_TRAILER_BYTES);
    assert!(!tmp.path().join("2025_fd_7MHz.lg8.tmp").exists());

    let err = write_blank(&path, &blank, false).expect_err("exists");
    assert!(matches!(err, Lg8Error::AlreadyExists(_)));

    let blank = BlankLog::new(Mode::Ssb, Band::B7MHz, 64);
    write_blank(&path, &blank, true).expect("overwrite");
    let found = inspect_file(&path).expect("inspect");
    assert_eq!(found.mode, Mode::Ssb);
    assert_eq!(found.contest_kind, 64);
}

#[test]
fn failed_write_leaves_no_file() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("bad.lg8");
    let mut blank = BlankLog::new(Mode::Cw, Band::B7MHz, 1);
    blank.user_multi_path = Some("\u{1F4C1}.md".to_string());
    assert!(write_blank(&path, &blank, false).is_err());
    assert!(!path.exists());
}
