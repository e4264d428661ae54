// Central place for UI strings, file names and JSON keys.
// Keep these out of gui.rs and the engine modules to reduce duplication and make tweaks safer.

// Well-known files, resolved against the data directory.
pub const FILE_HISTORY: &str = "campanhas_historico.json";
pub const FILE_MONSTERS: &str = "monstros.json";
pub const FILE_ITEMS: &str = "itens.json";

// Inserted before the extension of the source file to name the export.
pub const EXPORT_SUFFIX: &str = "_novo";

// Campaign record keys (KEY_ prefix), in form order.
pub const KEY_ID: &str = "id";
pub const KEY_TITLE: &str = "titulo";
pub const KEY_IMAGE: &str = "imagem";
pub const KEY_DIFFICULTY: &str = "dificuldade";
pub const KEY_MIN_GROUP_SIZE: &str = "grupoMinimo";
pub const KEY_LOCATION: &str = "localidade";
pub const KEY_BODY: &str = "corpo";
pub const KEY_MONSTERS: &str = "monstros";
pub const KEY_BOSSES: &str = "chefões";
pub const KEY_REWARDS: &str = "recompensas";
pub const KEY_NPCS: &str = "npcs";

// Catalog entity name keys, tried in order.
pub const KEY_CATALOG_NAME: &str = "name";
pub const KEY_CATALOG_NAME_ALT: &str = "nome";

// Unset sentinels.
pub const SENTINEL_TEXT: &str = "none";
pub const SENTINEL_NUMERIC: &str = "0";

// Pretty-print indentation for every file we write.
pub const JSON_INDENT: &[u8] = b"    ";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Quest Ledger";

pub const EN_BTN_SELECT_SOURCE: &str = "Select Campaign File...";
pub const EN_BTN_GENERATE: &str = "Generate File";
pub const EN_BTN_ADD_CAMPAIGN: &str = "Add Campaign";
pub const EN_BTN_CLEAR_FORM: &str = "Clear Form";
pub const EN_BTN_EDIT: &str = "Edit";
pub const EN_BTN_DELETE: &str = "Delete";
pub const EN_BTN_DETAILS: &str = "Details";
pub const EN_BTN_IMPORT: &str = "Import to Campaign";
pub const EN_BTN_IMPORT_ALL: &str = "Import All";
pub const EN_BTN_SAVE_CHANGES: &str = "Save Changes";
pub const EN_BTN_CONFIRM: &str = "Generate";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_RETRY_CLOSE: &str = "Retry and Close";
pub const EN_BTN_DISCARD_CLOSE: &str = "Close Without Saving";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_CHECKBOX_UNSET: &str = "None";

pub const EN_HEADING_FORM: &str = "Campaign Data";

pub const EN_TAB_FILE: &str = "File Campaigns";
pub const EN_TAB_ADDED: &str = "Added Campaigns";
pub const EN_TAB_HISTORY: &str = "Campaign History";
pub const EN_TAB_MONSTERS: &str = "Monsters";
pub const EN_TAB_ITEMS: &str = "Items";

pub const EN_WINDOW_EDIT: &str = "Edit Campaign";
pub const EN_WINDOW_DETAILS: &str = "Details";
pub const EN_WINDOW_CONFIRM_EXPORT: &str = "Confirm File Generation";
pub const EN_WINDOW_CONFIRM_DELETE: &str = "Confirm Deletion";
pub const EN_WINDOW_HISTORY_FAILED: &str = "History Not Saved";

pub const EN_NO_SOURCE: &str = "No file selected";
pub const EN_EMPTY_LIST: &str = "Nothing here yet.";

pub const EN_SUMMARY_MODIFIED: &str = "Modified campaigns (from the file):";
pub const EN_SUMMARY_ADDED: &str = "Added campaigns:";
pub const EN_SUMMARY_NONE: &str = "No pending changes.";
pub const EN_SUMMARY_NOTE: &str =
    "The original file is not changed; edits and additions go to a new file next to it.";

pub const EN_HISTORY_FAILED_NOTE: &str =
    "Added campaigns could not be written to the history file.";

pub const EN_COL_KEY: &str = "Key";
pub const EN_COL_VALUE: &str = "Value";

pub const EN_LABEL_TARGET_MONSTERS: &str = "Imports into the form's monsters field.";
pub const EN_LABEL_TARGET_REWARDS: &str = "Imports into the form's rewards field.";

pub const EN_SELECT_CAMPAIGN: &str = "Select a campaign first.";
pub const EN_SELECT_MONSTER: &str = "Select a monster to import.";
pub const EN_SELECT_ITEM: &str = "Select an item to import.";

pub const EN_BADGE_DIRTY: &str = "edited";
