// Tests for reading source files

use std::fs;
use stepscope::errors::SourceError;
use stepscope::source::{prepare_code, read_source};

#[test]
fn test_reads_and_trims_python_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example.py");
    fs::write(&path, "\n\ndef example():\n    a = 5\n\nexample()\n\n").unwrap();

    let code = read_source(&path).unwrap();
    assert_eq!(code, "def example():\n    a = 5\n\nexample()");
}

#[test]
fn test_rejects_other_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example.c");
    fs::write(&path, "int main() { return 0; }").unwrap();

    assert!(matches!(
        read_source(&path),
        Err(SourceError::InvalidExtension { expected: "py" })
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_source(&dir.path().join("nope.py")).unwrap_err();
    assert!(matches!(err, SourceError::Read { .. }));
}

#[test]
fn test_rejects_blank_code() {
    assert!(matches!(prepare_code("  \n\t\n"), Err(SourceError::Empty)));
}

#[test]
fn test_size_limit() {
    let at_limit = "x".repeat(10_000);
    assert!(prepare_code(&at_limit).is_ok());

    let over = "x".repeat(10_001);
    assert!(matches!(
        prepare_code(&over),
        Err(SourceError::TooLong { len: 10_001, limit: 10_000 })
    ));
}
