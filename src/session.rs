//! The editing session: the three campaign collections, the dirty set and the two
//! catalogs, plus the commands the front-end issues against them.
//!
//! Every command either applies its whole mutation or returns an error and leaves
//! the session exactly as it was.

use crate::catalog::{Catalog, CatalogKind};
use crate::config::Config;
use crate::disk;
use crate::error::{Result, SessionError};
use crate::export::{self, ExportReport};
use crate::field::CampaignDraft;
use crate::history;
use crate::record::{CampaignRecord, normalize_campaign_list, titled_records};
use crate::statics;
use crate::store::{DirtySet, RecordStore};
use std::path::{Path, PathBuf};

/// Which collection a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    File,
    Added,
    History,
}

/// One user action.
#[derive(Debug, Clone)]
pub enum Command {
    SelectSource(PathBuf),
    Add(CampaignDraft),
    Edit {
        origin: Origin,
        title: Option<String>,
        draft: CampaignDraft,
    },
    Delete {
        origin: Origin,
        title: Option<String>,
    },
    Export,
    SaveHistory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    SourceLoaded { path: PathBuf, campaigns: usize },
    Added(String),
    Edited(String),
    Deleted(String),
    Exported(ExportReport),
    HistorySaved(PathBuf),
}

/// Titles an export would touch, for the confirmation summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub modified: Vec<String>,
    pub added: Vec<String>,
}

impl PendingChanges {
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.added.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    source_path: Option<PathBuf>,
    file_campaigns: RecordStore,
    added: RecordStore,
    historic: RecordStore,
    dirty: DirtySet,
    monsters: Catalog,
    items: Catalog,
    startup_warnings: Vec<String>,
}

impl Session {
    /// Load history and catalogs from the data directory. A store whose file is
    /// missing starts empty; one whose file cannot be parsed starts empty and
    /// leaves a warning in [`Session::startup_warnings`].
    pub fn open(config: Config) -> Self {
        let mut startup_warnings = Vec::new();
        let mut degrade = |what: &str, err: SessionError| {
            push_startup_warning(&mut startup_warnings, what, err);
        };

        let historic = history::load_history(&config.history_path()).unwrap_or_else(|e| {
            degrade("campaign history", e);
            RecordStore::new()
        });
        let monsters = Catalog::load(&config.catalog_path(CatalogKind::Monsters))
            .unwrap_or_else(|e| {
                degrade("monsters", e);
                Catalog::default()
            });
        let items = Catalog::load(&config.catalog_path(CatalogKind::Items)).unwrap_or_else(|e| {
            degrade("items", e);
            Catalog::default()
        });

        tracing::info!(
            data_dir = %config.data_dir.display(),
            history = historic.len(),
            monsters = monsters.len(),
            items = items.len(),
            "session opened"
        );

        Self {
            config,
            source_path: None,
            file_campaigns: RecordStore::new(),
            added: RecordStore::new(),
            historic,
            dirty: DirtySet::new(),
            monsters,
            items,
            startup_warnings,
        }
    }

    /// Open the session and load `source` as a dialog selection would. A source that
    /// cannot be loaded becomes a startup warning and leaves no source selected.
    pub fn open_with_source(config: Config, source: Option<PathBuf>) -> Self {
        let mut session = Self::open(config);
        let Some(path) = source else {
            return session;
        };
        if let Err(err) = session.select_source(path.clone()) {
            let what = format!("campaign file {}", path.display());
            push_startup_warning(&mut session.startup_warnings, &what, err);
        }
        session
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::SelectSource(path) => self.select_source(path),
            Command::Add(draft) => self.add(&draft),
            Command::Edit {
                origin,
                title,
                draft,
            } => self.edit(origin, title.as_deref(), &draft),
            Command::Delete { origin, title } => self.delete(origin, title.as_deref()),
            Command::Export => self.export().map(Outcome::Exported),
            Command::SaveHistory => self.save_history(),
        }
    }

    /// Replace the file collection with the campaigns of `path`.
    pub fn select_source(&mut self, path: PathBuf) -> Result<Outcome> {
        let value = disk::read_json(&path)?;
        let list = normalize_campaign_list(&path, value)?;
        let campaigns = RecordStore::from_records(titled_records(list));

        tracing::info!(path = %path.display(), campaigns = campaigns.len(), "source loaded");
        let count = campaigns.len();
        self.file_campaigns = campaigns;
        self.dirty.clear();
        self.source_path = Some(path.clone());
        Ok(Outcome::SourceLoaded {
            path,
            campaigns: count,
        })
    }

    pub fn add(&mut self, draft: &CampaignDraft) -> Result<Outcome> {
        let record = CampaignRecord::from_draft(draft)?;
        let title = record.title().unwrap_or_default().to_string();
        self.added.put(record);
        tracing::info!(title = %title, "campaign added");
        Ok(Outcome::Added(title))
    }

    /// Rewrite a stored campaign from a draft. The campaign stays under its key.
    pub fn edit(
        &mut self,
        origin: Origin,
        title: Option<&str>,
        draft: &CampaignDraft,
    ) -> Result<Outcome> {
        let title = title.ok_or(SessionError::Selection("select a campaign to edit"))?;
        let record = self
            .store_mut(origin)
            .get_mut(title)
            .ok_or(SessionError::Selection("the selected campaign no longer exists"))?;
        record.apply_draft(draft)?;
        if origin == Origin::File {
            self.dirty.mark(title);
        }
        tracing::info!(title, ?origin, "campaign edited");
        Ok(Outcome::Edited(title.to_string()))
    }

    pub fn delete(&mut self, origin: Origin, title: Option<&str>) -> Result<Outcome> {
        let title = title.ok_or(SessionError::Selection("select a campaign to delete"))?;
        if !self.store_mut(origin).delete(title) {
            return Err(SessionError::Selection(
                "the selected campaign no longer exists",
            ));
        }
        if origin == Origin::File {
            self.dirty.unmark(title);
        }
        tracing::info!(title, ?origin, "campaign deleted");
        Ok(Outcome::Deleted(title.to_string()))
    }

    pub fn export(&self) -> Result<ExportReport> {
        let source = self
            .source_path
            .as_deref()
            .ok_or(SessionError::Selection("select a campaign file first"))?;
        export::reconcile(source, &self.file_campaigns, &self.dirty, &self.added)
    }

    /// Merge added campaigns into history and write the history file.
    pub fn save_history(&mut self) -> Result<Outcome> {
        let path = self.config.history_path();
        history::persist(&mut self.historic, &self.added, &path)?;
        Ok(Outcome::HistorySaved(path))
    }

    /// Append the selected catalog entry to `target`.
    pub fn import(&self, kind: CatalogKind, name: Option<&str>, target: &str) -> Result<String> {
        let catalog = self.catalog(kind);
        let name = name
            .filter(|n| catalog.contains(n))
            .ok_or(SessionError::Selection(match kind {
                CatalogKind::Monsters => statics::EN_SELECT_MONSTER,
                CatalogKind::Items => statics::EN_SELECT_ITEM,
            }))?;
        Ok(catalog.import_one(name, target))
    }

    pub fn import_all(&self, kind: CatalogKind, target: &str) -> String {
        self.catalog(kind).import_all(target)
    }

    pub fn pending_changes(&self) -> PendingChanges {
        PendingChanges {
            modified: self.dirty.titles().map(str::to_string).collect(),
            added: self.added.titles().map(str::to_string).collect(),
        }
    }

    pub fn store(&self, origin: Origin) -> &RecordStore {
        match origin {
            Origin::File => &self.file_campaigns,
            Origin::Added => &self.added,
            Origin::History => &self.historic,
        }
    }

    fn store_mut(&mut self, origin: Origin) -> &mut RecordStore {
        match origin {
            Origin::File => &mut self.file_campaigns,
            Origin::Added => &mut self.added,
            Origin::History => &mut self.historic,
        }
    }

    pub fn catalog(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Monsters => &self.monsters,
            CatalogKind::Items => &self.items,
        }
    }

    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn startup_warnings(&self) -> &[String] {
        &self.startup_warnings
    }
}

fn push_startup_warning(warnings: &mut Vec<String>, what: &str, err: SessionError) {
    let err = anyhow::Error::from(err);
    tracing::warn!(error = %format_args!("{err:#}"), "{what} unavailable; starting without it");
    warnings.push(format!("Failed to load {what}: {err:#}"));
}
