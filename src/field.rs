//! Campaign fields and their "unset" semantics.
//!
//! Every field has a sentinel that stands for "this campaign has none": `"0"` for the
//! numeric group size and `"none"` for everything else. The form stages text for each
//! field together with an unset flag; when the flag is on, the sentinel wins no matter
//! what text is still staged.

use crate::statics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    Image,
    Difficulty,
    MinGroupSize,
    Location,
    Body,
    Monsters,
    Bosses,
    Rewards,
    Npcs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Numeric,
    /// Free text, one logical item per line.
    List,
}

impl Field {
    /// Form and file order.
    pub const ALL: [Field; 11] = [
        Field::Id,
        Field::Title,
        Field::Image,
        Field::Difficulty,
        Field::MinGroupSize,
        Field::Location,
        Field::Body,
        Field::Monsters,
        Field::Bosses,
        Field::Rewards,
        Field::Npcs,
    ];

    /// JSON object key used in every campaign file.
    pub fn key(self) -> &'static str {
        match self {
            Field::Id => statics::KEY_ID,
            Field::Title => statics::KEY_TITLE,
            Field::Image => statics::KEY_IMAGE,
            Field::Difficulty => statics::KEY_DIFFICULTY,
            Field::MinGroupSize => statics::KEY_MIN_GROUP_SIZE,
            Field::Location => statics::KEY_LOCATION,
            Field::Body => statics::KEY_BODY,
            Field::Monsters => statics::KEY_MONSTERS,
            Field::Bosses => statics::KEY_BOSSES,
            Field::Rewards => statics::KEY_REWARDS,
            Field::Npcs => statics::KEY_NPCS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Image => "image",
            Field::Difficulty => "difficulty",
            Field::MinGroupSize => "minGroupSize",
            Field::Location => "location",
            Field::Body => "body",
            Field::Monsters => "monsters",
            Field::Bosses => "bosses",
            Field::Rewards => "rewards",
            Field::Npcs => "npcs",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::MinGroupSize => FieldKind::Numeric,
            Field::Body | Field::Monsters | Field::Bosses | Field::Rewards | Field::Npcs => {
                FieldKind::List
            }
            Field::Id | Field::Title | Field::Image | Field::Difficulty | Field::Location => {
                FieldKind::Scalar
            }
        }
    }

    pub fn is_list(self) -> bool {
        self.kind() == FieldKind::List
    }

    pub fn sentinel(self) -> &'static str {
        match self.kind() {
            FieldKind::Numeric => statics::SENTINEL_NUMERIC,
            FieldKind::Scalar | FieldKind::List => statics::SENTINEL_TEXT,
        }
    }

    /// A field is present iff its value differs from its own sentinel.
    pub fn is_present(self, text: &str) -> bool {
        text != self.sentinel()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Collapse a staged field to the text that gets stored.
pub fn apply_sentinel(field: Field, is_unset: bool, staged: &str) -> String {
    if is_unset {
        field.sentinel().to_string()
    } else {
        staged.trim().to_string()
    }
}

/// A field's value independent of any widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Unset,
    Present(String),
}

impl FieldValue {
    /// Interpret stored text: the field's sentinel reads back as `Unset`.
    pub fn from_stored(field: Field, text: &str) -> Self {
        if field.is_present(text) {
            FieldValue::Present(text.to_string())
        } else {
            FieldValue::Unset
        }
    }

    pub fn resolve(&self, field: Field) -> String {
        match self {
            FieldValue::Unset => apply_sentinel(field, true, ""),
            FieldValue::Present(text) => apply_sentinel(field, false, text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Staged {
    text: String,
    unset: bool,
}

/// The staging area behind the add and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignDraft {
    staged: [Staged; 11],
}

impl CampaignDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from stored field texts; sentinel values start out unset.
    pub fn from_stored(mut text_of: impl FnMut(Field) -> Option<String>) -> Self {
        let mut draft = Self::new();
        for field in Field::ALL {
            let stored = text_of(field).unwrap_or_default();
            match FieldValue::from_stored(field, &stored) {
                FieldValue::Unset => draft.set_unset(field, true),
                FieldValue::Present(text) => *draft.text_mut(field) = text,
            }
        }
        draft
    }

    pub fn text(&self, field: Field) -> &str {
        &self.staged[field.index()].text
    }

    pub fn text_mut(&mut self, field: Field) -> &mut String {
        &mut self.staged[field.index()].text
    }

    pub fn set_text(&mut self, field: Field, text: impl Into<String>) {
        *self.text_mut(field) = text.into();
    }

    pub fn is_unset(&self, field: Field) -> bool {
        self.staged[field.index()].unset
    }

    /// Toggling a field back on starts it from an empty text box.
    pub fn set_unset(&mut self, field: Field, unset: bool) {
        let staged = &mut self.staged[field.index()];
        if staged.unset && !unset {
            staged.text.clear();
        }
        staged.unset = unset;
    }

    pub fn value(&self, field: Field) -> FieldValue {
        if self.is_unset(field) {
            FieldValue::Unset
        } else {
            FieldValue::Present(self.text(field).to_string())
        }
    }

    pub fn resolve(&self, field: Field) -> String {
        self.value(field).resolve(field)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
