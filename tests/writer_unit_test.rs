//! File-sink tests for the script writer.

use sql_seeder::sql::SqlValue;
use sql_seeder::writer::ScriptWriter;
use std::fs;

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.sql");

    let mut writer = ScriptWriter::to_file(&path).unwrap();
    writer.write_comment("INSERT INTO addresses").unwrap();
    writer
        .write_insert(
            "addresses",
            &["address_id", "province", "city", "street"],
            &[
                SqlValue::Int(1),
                SqlValue::Str("West Java".to_string()),
                SqlValue::Str("Bandung".to_string()),
                SqlValue::Str("12 Asia Afrika".to_string()),
            ],
        )
        .unwrap();
    let stats = writer.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("-- INSERT INTO addresses\n"));
    assert!(content.contains(
        "INSERT INTO addresses (address_id, province, city, street) \
         VALUES (1, 'West Java', 'Bandung', '12 Asia Afrika');"
    ));
    assert_eq!(stats.rows_for("addresses"), 1);
}

#[test]
fn test_escaped_text_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("escaped.sql");

    let mut writer = ScriptWriter::to_file(&path).unwrap();
    writer
        .write_insert(
            "reviews",
            &["buyer_email", "order_id", "content", "rating"],
            &[
                SqlValue::Str("a@x.com".to_string()),
                SqlValue::Int(1),
                SqlValue::Str("Wasn't bad, isn't great".to_string()),
                SqlValue::Float(3.5),
            ],
        )
        .unwrap();
    writer.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("'Wasn''t bad, isn''t great'"));
    assert!(content.contains("3.50"));
}
