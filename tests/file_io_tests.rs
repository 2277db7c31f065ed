//! File-backed encode/decode tests

use std::fs::{self, File};

use huffman_coding::{CodecConfig, HuffmanCodec, HuffmanError};

const SAMPLE: &str = "It was the best of times, it was the worst of times,\n\
                      it was the age of wisdom, it was the age of foolishness.\n";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_train_on_file_and_round_trip() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let encoded_path = dir.path().join("input.hc");
    let output = dir.path().join("output.txt");
    fs::write(&input, SAMPLE).unwrap();

    let codec = HuffmanCodec::from_file(&input).unwrap();

    codec
        .encode_to_writer(File::open(&input).unwrap(), File::create(&encoded_path).unwrap())
        .unwrap();
    codec
        .decode_to_writer(File::open(&encoded_path).unwrap(), File::create(&output).unwrap())
        .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE);
    assert!(fs::metadata(&encoded_path).unwrap().len() < SAMPLE.len() as u64);
}

#[test]
fn test_archive_files_round_trip() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("sample.huff");
    let output = dir.path().join("sample.out");

    HuffmanCodec::encode_from_file(SAMPLE.as_bytes(), File::create(&archive).unwrap()).unwrap();
    HuffmanCodec::decode_from_file(File::open(&archive).unwrap(), File::create(&output).unwrap())
        .unwrap();

    assert_eq!(fs::read(&output).unwrap(), SAMPLE.as_bytes());
}

#[test]
fn test_empty_file() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();

    let codec = HuffmanCodec::from_file(&input).unwrap();
    let mut encoded = Vec::new();
    codec
        .encode_to_writer(File::open(&input).unwrap(), &mut encoded)
        .unwrap();
    assert_eq!(encoded, vec![0x01]);

    let mut decoded = Vec::new();
    codec.decode_to_writer(&encoded[..], &mut decoded).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = HuffmanCodec::from_file(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, HuffmanError::Io(_)));
}

#[test]
fn test_truncated_archive() {
    let mut archive = Vec::new();
    HuffmanCodec::encode_from_file(SAMPLE.as_bytes(), &mut archive).unwrap();
    archive.truncate(archive.len() - 1);

    let mut decoded = Vec::new();
    let err = HuffmanCodec::decode_from_file_with_config(
        &archive[..],
        &mut decoded,
        CodecConfig::strict(),
    )
    .unwrap_err();
    assert!(err.is_corruption());
}
