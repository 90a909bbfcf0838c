//! Integration tests for the Outlook message conversion.

use std::collections::BTreeMap;
use std::error::Error as _;
use std::path::{Path, PathBuf};

use msgshell::builder::EmailStartingBuilder;
use msgshell::config::Config;
use msgshell::convert::{self, populate};
use msgshell::error::ConvertError;
use msgshell::export::{attachment, text};
use msgshell::model::address::EmailAddress;
use msgshell::model::attachment::FileAttachment;
use msgshell::model::message::ParsedMessage;
use msgshell::parser::dump::DumpParser;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn convert_fixture(name: &str) -> Result<msgshell::model::email::Email, ConvertError> {
    convert::convert_file(&fixture(name), &DumpParser::new(), EmailStartingBuilder::new())
        .map(|b| b.build())
}

// ─── Synthetic message straight into the adapter ────────────────────

#[test]
fn test_synthetic_message_round_trip() {
    let message = ParsedMessage {
        to: vec![EmailAddress::new("Alice", "alice@x.com")],
        subject: "Hi".into(),
        body_text: Some("Hello".into()),
        cid_map: BTreeMap::from([(
            "<img1>".to_string(),
            FileAttachment {
                data: vec![1, 2, 3],
                mime_tag: "image/png".into(),
                filename: "IMG1.PNG".into(),
                long_filename: None,
            },
        )]),
        attachments: vec![FileAttachment {
            data: b"hello".to_vec(),
            mime_tag: "text/plain".into(),
            filename: "a.txt".into(),
            long_filename: None,
        }],
        ..Default::default()
    };

    let mut builder = EmailStartingBuilder::new().starting_blank();
    populate(&mut builder, &message).unwrap();
    let email = builder.build();

    assert_eq!(email.to(), &[EmailAddress::new("Alice", "alice@x.com")]);
    assert!(email.cc().is_empty());
    assert!(email.bcc().is_empty());
    assert_eq!(email.subject(), Some("Hi"));
    assert_eq!(email.plain_text(), Some("Hello"));
    assert_eq!(email.html_text(), None);
    assert_eq!(email.reply_to(), None);
    assert_eq!(email.embedded_images().len(), 1);
    assert_eq!(email.embedded_images()[0].name, "img1");
    assert_eq!(email.attachments().len(), 1);
    assert_eq!(email.attachments()[0].name, "a.txt");
}

// ─── Full message through the dump parser ───────────────────────────

#[test]
fn test_full_fixture_fields() {
    let email = convert_fixture("full.json").unwrap();

    assert_eq!(
        email.from(),
        Some(&EmailAddress::new("Finance Team", "finance@example.com"))
    );
    assert_eq!(
        email.reply_to(),
        Some(&EmailAddress::new("Accounts Desk", "accounts@example.com"))
    );
    assert_eq!(email.subject(), Some("Q1 numbers"));
    assert_eq!(email.plain_text(), Some("Figures attached."));
    assert_eq!(
        email.html_text(),
        Some("<p>Figures attached.</p><img src=\"cid:logo123\">")
    );
}

#[test]
fn test_full_fixture_recipient_order() {
    let email = convert_fixture("full.json").unwrap();

    let to: Vec<_> = email.to().iter().map(|a| a.address.as_str()).collect();
    assert_eq!(to, vec!["zoe@example.com", "alice@example.com"]);
    assert_eq!(email.cc(), &[EmailAddress::new("Carl", "carl@example.com")]);
    assert_eq!(
        email.bcc(),
        &[
            EmailAddress::new("", "audit@example.com"),
            EmailAddress::new("Archive", "archive@example.com"),
        ]
    );
}

#[test]
fn test_full_fixture_resources() {
    let email = convert_fixture("full.json").unwrap();

    let logo = email.embedded_image("logo123").expect("logo is inline");
    assert_eq!(logo.mime_type, "image/png");
    assert_eq!(logo.data, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

    let names: Vec<_> = email.attachments().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Quarterly Report.pdf", "NOTES.TXT"]);
    assert_eq!(email.attachments()[1].data, b"hello");
}

#[test]
fn test_converted_html_fallback_and_empty_reply_to() {
    let email = convert_fixture("converted_html.json").unwrap();

    assert_eq!(
        email.html_text(),
        Some("<p>See chart</p><img src=\"cid:chart\">")
    );
    assert_eq!(email.reply_to(), None);
    assert!(email.embedded_image("chart").is_some());
    assert!(email.attachments().is_empty());
}

#[test]
fn test_conversion_ignores_configured_defaults() {
    let config: Config = toml::from_str(
        "[defaults]\nfrom = \"Default <default@example.com>\"\nbcc = [\"always@example.com\"]\n",
    )
    .unwrap();
    let starting = config.starting_builder();
    let email = convert::convert_file(&fixture("converted_html.json"), &DumpParser::new(), starting)
        .unwrap()
        .build();

    assert_eq!(email.from().map(|a| a.address.as_str()), Some("bob@example.com"));
    assert!(email.bcc().is_empty());
}

#[test]
fn test_convert_from_reader_and_bytes() {
    let data = std::fs::read(fixture("full.json")).unwrap();

    let from_bytes = convert::convert_bytes(&data, &DumpParser::new(), EmailStartingBuilder::new())
        .unwrap()
        .build();
    let mut reader = std::io::Cursor::new(data.clone());
    let from_reader =
        convert::convert_reader(&mut reader, &DumpParser::new(), EmailStartingBuilder::new())
            .unwrap()
            .build();

    assert_eq!(from_bytes, from_reader);
    assert_eq!(from_bytes, convert_fixture("full.json").unwrap());
}

// ─── Failures ───────────────────────────────────────────────────────

#[test]
fn test_empty_cid_part_becomes_attachment() {
    let email = convert_fixture("empty_cid.json").unwrap();
    assert!(email.embedded_images().is_empty());
    let names: Vec<_> = email.attachments().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["X.PNG"]);
}

#[test]
fn test_empty_cid_key_fails_with_invalid_state() {
    let message = ParsedMessage {
        cid_map: BTreeMap::from([(
            "<>".to_string(),
            FileAttachment {
                data: Vec::new(),
                mime_tag: "image/png".into(),
                filename: "X.PNG".into(),
                long_filename: None,
            },
        )]),
        ..Default::default()
    };
    let mut builder = EmailStartingBuilder::new().starting_blank();
    let err = populate(&mut builder, &message).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidState(_)), "got {err:?}");
}

#[test]
fn test_truncated_input_is_parse_failure() {
    let err = convert_fixture("truncated.json").unwrap_err();
    match &err {
        ConvertError::ParseFailure { source } => {
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_missing_file_is_parse_failure() {
    let err = convert_fixture("does-not-exist.json").unwrap_err();
    match err {
        ConvertError::ParseFailure { source } => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ─── Export ─────────────────────────────────────────────────────────

#[test]
fn test_export_full_fixture() {
    let email = convert_fixture("full.json").unwrap();
    let dir = tempfile::tempdir().unwrap();

    let text_path = text::export_text(&email, dir.path(), "full").unwrap();
    let rendered = std::fs::read_to_string(&text_path).unwrap();
    assert!(rendered.contains("Reply-To: Accounts Desk <accounts@example.com>"));
    assert!(rendered.contains("Quarterly Report.pdf (application/pdf"));

    let paths = attachment::export_resources(&email, dir.path(), true).unwrap();
    assert_eq!(
        paths,
        vec![
            dir.path().join("Quarterly_Report.pdf"),
            dir.path().join("NOTES.TXT"),
            dir.path().join("inline").join("logo123"),
        ]
    );
}
