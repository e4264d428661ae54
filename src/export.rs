use crate::disk;
use crate::error::Result;
use crate::record::{normalize_campaign_list, title_of};
use crate::statics;
use crate::store::{DirtySet, RecordStore};
use serde_json::Value;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub elements: usize,
    pub substituted: usize,
    pub appended: usize,
    /// Added campaigns left out because the source already has their title.
    pub dropped: Vec<String>,
}

/// `dir/foo.json` -> `dir/foo_novo.json`.
pub fn export_path(source: &Path) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = source.file_stem() {
        name.push(stem);
    }
    name.push(statics::EXPORT_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

/// Merge edits and additions into a fresh read of `source` and write the result next to it.
///
/// Edited file campaigns replace their element in place; added campaigns are appended
/// unless the source already has their title. The source file itself is never written,
/// and nothing is written at all if it cannot be read or parsed.
pub fn reconcile(
    source: &Path,
    file_campaigns: &RecordStore,
    dirty: &DirtySet,
    added: &RecordStore,
) -> Result<ExportReport> {
    let original = disk::read_json(source)?;
    let mut list = normalize_campaign_list(source, original)?;

    let mut substituted = 0;
    for element in &mut list {
        let Some(title) = title_of(element).filter(|t| dirty.contains(t)) else {
            continue;
        };
        match file_campaigns.get(title) {
            Some(record) => {
                *element = record.clone().into_value();
                substituted += 1;
            }
            None => tracing::warn!(title, "edited campaign is no longer loaded; keeping source"),
        }
    }

    let mut appended = 0;
    let mut dropped = Vec::new();
    for (title, record) in added.iter() {
        if list.iter().any(|element| title_of(element) == Some(title)) {
            dropped.push(title.to_string());
        } else {
            list.push(record.clone().into_value());
            appended += 1;
        }
    }

    let path = export_path(source);
    let elements = list.len();
    disk::write_json(&path, &Value::Array(list))?;

    tracing::info!(
        path = %path.display(),
        elements,
        substituted,
        appended,
        dropped = dropped.len(),
        "export written"
    );
    Ok(ExportReport {
        path,
        elements,
        substituted,
        appended,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::export_path;
    use std::path::{Path, PathBuf};

    #[test]
    fn export_path_inserts_suffix_before_extension() {
        assert_eq!(
            export_path(Path::new("data/campanhas.json")),
            PathBuf::from("data/campanhas_novo.json")
        );
        assert_eq!(export_path(Path::new("quests")), PathBuf::from("quests_novo"));
        assert_eq!(
            export_path(Path::new("a.tar.json")),
            PathBuf::from("a.tar_novo.json")
        );
    }
}
