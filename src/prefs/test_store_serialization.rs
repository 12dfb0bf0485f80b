#![cfg(test)]

use std::collections::HashMap;
use std::io::{Cursor, Write};

use anyhow::Result;
use byteorder::{WriteBytesExt, LE};

use crate::prefs::store::FileStore;

#[test]
fn entries_from_read_happy_flow() {
    let raw_file = create_raw_test_file().unwrap();
    let mut cursor = Cursor::new(raw_file);

    let entries = FileStore::entries_from_read(&mut cursor).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries.get("startColorData").map(Vec::as_slice),
        Some(TEST_START_COLOR_JSON.as_bytes())
    );
    assert_eq!(
        entries.get("endColorData").map(Vec::as_slice),
        Some(TEST_END_COLOR_JSON.as_bytes())
    );
}

#[test]
fn entries_read_write_read_equivalence_check() {
    let raw_file = create_raw_test_file().unwrap();
    let mut cursor = Cursor::new(raw_file);

    let entries = FileStore::entries_from_read(&mut cursor).unwrap();

    let mut written = vec![];
    FileStore::entries_to_write(&entries, &mut written).unwrap();

    let mut re_read_cursor = Cursor::new(written);
    let re_read_entries = FileStore::entries_from_read(&mut re_read_cursor).unwrap();

    assert_eq!(entries, re_read_entries);
}

#[test]
fn entries_to_write_is_deterministic() {
    let mut entries = HashMap::new();
    entries.insert("b".to_string(), vec![2]);
    entries.insert("a".to_string(), vec![1]);
    entries.insert("c".to_string(), vec![3]);

    let mut first = vec![];
    FileStore::entries_to_write(&entries, &mut first).unwrap();
    let mut second = vec![];
    FileStore::entries_to_write(&entries, &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn entries_from_read_rejects_a_wrong_magic_number() {
    let mut raw_file = create_raw_test_file().unwrap();
    raw_file[0] = b'X';
    let mut cursor = Cursor::new(raw_file);

    assert!(FileStore::entries_from_read(&mut cursor).is_err());
}

#[test]
fn entries_from_read_rejects_an_unknown_version() {
    let data: Vec<u8> = vec![];
    let mut cursor = Cursor::new(data);

    // Magic number indicating a preference file
    // "GPRF"
    cursor.write_all(&[0x47, 0x50, 0x52, 0x46]).unwrap();
    cursor.write_i32::<LE>(99).unwrap();
    cursor.write_i32::<LE>(0).unwrap();

    let mut read_cursor = Cursor::new(cursor.into_inner());

    assert!(FileStore::entries_from_read(&mut read_cursor).is_err());
}

#[test]
fn entries_from_read_rejects_a_truncated_file() {
    let raw_file = create_raw_test_file().unwrap();
    let truncated = raw_file[..raw_file.len() - 5].to_vec();
    let mut cursor = Cursor::new(truncated);

    assert!(FileStore::entries_from_read(&mut cursor).is_err());
}

fn create_raw_test_file() -> Result<Vec<u8>> {
    let data: Vec<u8> = vec![];
    let mut cursor = Cursor::new(data);

    // Magic number indicating a preference file
    // "GPRF"
    let magic_num = [0x47, 0x50, 0x52, 0x46];
    cursor.write_all(&magic_num)?;

    // Format version
    cursor.write_i32::<LE>(1)?;

    // Number of entries
    cursor.write_i32::<LE>(2)?;

    write_entry(&mut cursor, "startColorData", TEST_START_COLOR_JSON.as_bytes())?;
    write_entry(&mut cursor, "endColorData", TEST_END_COLOR_JSON.as_bytes())?;

    Ok(cursor.into_inner())
}

fn write_entry(cursor: &mut Cursor<Vec<u8>>, key: &str, value: &[u8]) -> Result<()> {
    cursor.write_i32::<LE>(key.len() as i32)?;
    cursor.write_all(key.as_bytes())?;
    cursor.write_i64::<LE>(value.len() as i64)?;
    cursor.write_all(value)?;

    Ok(())
}

const TEST_START_COLOR_JSON: &str =
    r#"{"red":1.0,"green":0.6039215686274509,"blue":0.6196078431372549,"opacity":1.0}"#;

const TEST_END_COLOR_JSON: &str =
    r#"{"red":0.9803921568627451,"green":0.8156862745098039,"blue":0.7686274509803922,"opacity":1.0}"#;
