use crate::error::{ParseFailure, Result, SessionError};
use crate::field::{CampaignDraft, Field};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One campaign (quest) as stored in a file.
///
/// The eleven known fields are text, but records loaded from disk keep every key and
/// value of their source object, in source order, so unknown keys survive edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignRecord(Map<String, Value>);

impl CampaignRecord {
    /// Build a new record from a staged form. Fails if the title is empty or unset.
    pub fn from_draft(draft: &CampaignDraft) -> Result<Self> {
        let mut record = Self::default();
        record.apply_draft(draft)?;
        Ok(record)
    }

    pub fn from_object(object: Map<String, Value>) -> Self {
        Self(object)
    }

    /// Overwrite the known fields from a staged form, leaving other keys alone.
    /// Nothing is written when the draft's title is invalid.
    pub fn apply_draft(&mut self, draft: &CampaignDraft) -> Result<()> {
        validate_title(&draft.resolve(Field::Title))?;
        for field in Field::ALL {
            self.set(field, draft.resolve(field));
        }
        Ok(())
    }

    pub fn to_draft(&self) -> CampaignDraft {
        CampaignDraft::from_stored(|field| self.text(field))
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get(Field::Title.key()).and_then(Value::as_str)
    }

    /// Field text for display and editing. Non-string values render as JSON text.
    pub fn text(&self, field: Field) -> Option<String> {
        match self.0.get(field.key())? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        self.0
            .insert(field.key().to_string(), Value::String(text.into()));
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Reject titles that are empty or the unset sentinel.
pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() || !Field::Title.is_present(title) {
        return Err(SessionError::Validation(format!(
            "the '{}' field is required",
            Field::Title.key()
        )));
    }
    Ok(())
}

/// The string title of a JSON element, if it is an object that has one.
pub fn title_of(value: &Value) -> Option<&str> {
    value.get(Field::Title.key()).and_then(Value::as_str)
}

/// A campaign file holds either one object or an array of them; always hand back a list.
pub fn normalize_campaign_list(path: &Path, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        _ => Err(SessionError::parse(
            path,
            ParseFailure::Shape("expected an object or an array of objects"),
        )),
    }
}

/// Titled objects of a list, in order. Elements without a string title are skipped.
pub fn titled_records(
    items: impl IntoIterator<Item = Value>,
) -> impl Iterator<Item = CampaignRecord> {
    items.into_iter().filter_map(|item| match item {
        Value::Object(object) if object.get(Field::Title.key()).is_some_and(Value::is_string) => {
            Some(CampaignRecord::from_object(object))
        }
        _ => None,
    })
}
