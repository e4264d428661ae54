use crate::error::{ParseFailure, Result, SessionError};
use crate::statics;
use serde::Serialize;
use serde_json::Value;
use std::{
    fs,
    io::{self, Write},
    path::Path,
    time::SystemTime,
};

/// Read and parse a JSON file. Both an unreadable file and malformed text are parse errors.
pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).map_err(|e| SessionError::parse(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::parse(path, e))
}

/// Like [`read_json`], but a missing file is `Ok(None)` rather than an error.
pub(crate) fn read_json_if_exists(path: &Path) -> Result<Option<Value>> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| SessionError::parse(path, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SessionError::parse(path, ParseFailure::Read(e))),
    }
}

/// Pretty-print with 4-space indentation. Non-ASCII text is written as UTF-8, not escaped.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(statics::JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser).map_err(io::Error::other)?;
    Ok(out)
}

/// Serialize fully in memory, then replace `path` atomically.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_pretty_json(value).map_err(|e| SessionError::io(path, e))?;
    atomic_write(path, &bytes).map_err(|e| SessionError::io(path, e))
}

fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path is missing a file name")
    })?;

    let file_name = file_name.to_string_lossy();
    let pid = u128::from(std::process::id());
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());

    for attempt in 0..10u128 {
        let suffix = pid ^ nanos ^ attempt;
        let tmp_path = dir.join(format!(".quest-ledger-tmp-{file_name}-{suffix}"));

        let open = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path);
        let mut file = match open {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        };

        let result = file
            .write_all(contents)
            .and_then(|()| file.sync_all())
            .and_then(|()| fs::rename(&tmp_path, path));

        if let Err(err) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
        return Ok(());
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        "failed to create a temporary file",
    ))
}

#[cfg(test)]
mod tests {
    use super::{read_json, read_json_if_exists, to_pretty_json, write_json};
    use crate::SessionError;
    use serde_json::json;

    #[test]
    fn pretty_json_uses_four_spaces_and_keeps_unicode() {
        let bytes = to_pretty_json(&json!([{ "chefões": "Dragão" }])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "[\n    {\n        \"chefões\": \"Dragão\"\n    }\n]");
    }

    #[test]
    fn write_json_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, b"old contents that are longer than the new ones").unwrap();

        write_json(&path, &json!([])).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"[]");

        // No temp files left behind.
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn write_json_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let err = write_json(&path, &json!([])).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(read_json_if_exists(&missing).unwrap().is_none());
        assert!(matches!(
            read_json(&missing),
            Err(SessionError::Parse { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, b"[{").unwrap();
        assert!(matches!(
            read_json_if_exists(&bad),
            Err(SessionError::Parse { .. })
        ));
    }
}
