use crate::disk;
use crate::error::Result;
use crate::record::titled_records;
use crate::store::RecordStore;
use serde_json::Value;
use std::path::Path;

/// Load the campaign history. A missing file, or one that is not an array, is an empty history.
pub fn load_history(path: &Path) -> Result<RecordStore> {
    match disk::read_json_if_exists(path)? {
        Some(Value::Array(items)) => Ok(RecordStore::from_records(titled_records(items))),
        Some(_) | None => Ok(RecordStore::new()),
    }
}

/// Fold this session's added campaigns into history and overwrite the history file.
///
/// Added campaigns replace historic ones with the same title; everything else in
/// `historic` is written exactly as it is held. On a write failure `historic` is
/// left unchanged.
pub fn persist(historic: &mut RecordStore, added: &RecordStore, path: &Path) -> Result<()> {
    let mut merged = historic.clone();
    for (title, record) in added.iter() {
        merged.put_keyed(title.to_string(), record.clone());
    }

    let values: Vec<_> = merged.records().collect();
    disk::write_json(path, &values)?;

    tracing::info!(
        path = %path.display(),
        campaigns = merged.len(),
        added = added.len(),
        "history saved"
    );
    *historic = merged;
    Ok(())
}
