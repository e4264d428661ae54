use pretty_assertions::assert_eq;
use quest_ledger::{
    CampaignDraft, CatalogKind, Command, Config, Field, Origin, Outcome, Session, SessionError,
};
use serde_json::{Value, json};
use std::path::Path;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn read(path: &Path) -> Result<Value> {
    Ok(serde_json::from_slice(&std::fs::read(path)?)?)
}

fn draft_titled(title: &str) -> CampaignDraft {
    let mut draft = CampaignDraft::new();
    for field in Field::ALL {
        draft.set_unset(field, true);
    }
    draft.set_unset(Field::Title, false);
    draft.set_text(Field::Title, title);
    draft
}

fn write_catalogs(dir: &Path) -> Result<()> {
    std::fs::write(
        dir.join("monstros.json"),
        r#"[{"nome":"Goblin","hp":7},{"nome":"Troll","hp":84}]"#,
    )?;
    std::fs::write(dir.join("itens.json"), r#"[{"name":"Potion"},{"name":"Rope"}]"#)?;
    Ok(())
}

#[test]
fn open_with_empty_data_dir_starts_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let session = Session::open(Config::in_dir(dir.path()));

    assert!(session.store(Origin::History).is_empty());
    assert!(session.catalog(CatalogKind::Monsters).is_empty());
    assert!(session.startup_warnings().is_empty());
    assert!(session.source_path().is_none());
    Ok(())
}

#[test]
fn malformed_startup_files_degrade_to_empty_with_warnings() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("campanhas_historico.json"), b"[{oops")?;
    std::fs::write(dir.path().join("monstros.json"), b"not json")?;
    std::fs::write(dir.path().join("itens.json"), r#"[{"nome":"Rope"}]"#)?;

    let session = Session::open(Config::in_dir(dir.path()));
    assert!(session.store(Origin::History).is_empty());
    assert!(session.catalog(CatalogKind::Monsters).is_empty());
    assert_eq!(session.catalog(CatalogKind::Items).len(), 1);
    assert_eq!(session.startup_warnings().len(), 2);
    Ok(())
}

#[test]
fn full_editing_session_exports_and_saves_history() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_catalogs(dir.path())?;
    std::fs::write(
        dir.path().join("campanhas_historico.json"),
        r#"[{"titulo":"Old","corpo":"done"}]"#,
    )?;
    let source = dir.path().join("campanhas.json");
    std::fs::write(
        &source,
        r#"[{"titulo":"Q1","corpo":"intro"},{"titulo":"Q0","corpo":"drop me"}]"#,
    )?;

    let mut session = Session::open(Config::in_dir(dir.path()));
    let loaded = session.dispatch(Command::SelectSource(source.clone()))?;
    assert_eq!(
        loaded,
        Outcome::SourceLoaded {
            path: source.clone(),
            campaigns: 2
        }
    );

    // Edit Q1 through a draft seeded from the stored record.
    let mut draft = session
        .store(Origin::File)
        .get("Q1")
        .ok_or("Q1 loaded")?
        .to_draft();
    draft.set_text(Field::Body, "revised");
    session.dispatch(Command::Edit {
        origin: Origin::File,
        title: Some("Q1".to_string()),
        draft,
    })?;
    assert!(session.dirty().contains("Q1"));

    // Add Q2 with monsters imported from the catalog.
    let mut q2 = draft_titled("Q2");
    q2.set_unset(Field::Monsters, false);
    let monsters =
        session.import(CatalogKind::Monsters, Some("Goblin"), q2.text(Field::Monsters))?;
    let monsters = session.import(CatalogKind::Monsters, Some("Goblin"), &monsters)?;
    q2.set_text(Field::Monsters, monsters);
    q2.set_unset(Field::Rewards, false);
    let rewards = session.import_all(CatalogKind::Items, q2.text(Field::Rewards));
    q2.set_text(Field::Rewards, rewards);
    assert_eq!(session.dispatch(Command::Add(q2))?, Outcome::Added("Q2".to_string()));

    let pending = session.pending_changes();
    assert_eq!(pending.modified, vec!["Q1".to_string()]);
    assert_eq!(pending.added, vec!["Q2".to_string()]);

    let Outcome::Exported(report) = session.dispatch(Command::Export)? else {
        return Err("expected an export".into());
    };
    let exported = read(&report.path)?;
    assert_eq!(exported[0]["corpo"], json!("revised"));
    assert_eq!(exported[1], json!({ "titulo": "Q0", "corpo": "drop me" }));
    assert_eq!(exported[2]["titulo"], json!("Q2"));
    assert_eq!(exported[2]["monstros"], json!("Goblin\nGoblin"));
    assert_eq!(exported[2]["recompensas"], json!("Potion\nRope"));
    assert_eq!(exported[2]["grupoMinimo"], json!("0"));
    assert_eq!(exported[2]["npcs"], json!("none"));

    session.dispatch(Command::SaveHistory)?;
    let history = read(&dir.path().join("campanhas_historico.json"))?;
    let titles: Vec<_> = history
        .as_array()
        .ok_or("history is an array")?
        .iter()
        .map(|c| c["titulo"].clone())
        .collect();
    assert_eq!(titles, vec![json!("Old"), json!("Q2")]);
    Ok(())
}

#[test]
fn deleting_a_file_campaign_clears_its_dirty_flag() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("c.json");
    std::fs::write(&source, r#"[{"titulo":"Q1","corpo":"intro"}]"#)?;

    let mut session = Session::open(Config::in_dir(dir.path()));
    session.dispatch(Command::SelectSource(source.clone()))?;
    let mut draft = draft_titled("Q1");
    draft.set_unset(Field::Body, false);
    draft.set_text(Field::Body, "edited");
    session.dispatch(Command::Edit {
        origin: Origin::File,
        title: Some("Q1".to_string()),
        draft,
    })?;
    session.dispatch(Command::Delete {
        origin: Origin::File,
        title: Some("Q1".to_string()),
    })?;
    assert!(session.dirty().is_empty());

    // With no dirty title the source element passes through unchanged.
    let report = session.export()?;
    assert_eq!(read(&report.path)?, json!([{ "titulo": "Q1", "corpo": "intro" }]));
    Ok(())
}

#[test]
fn edits_outside_the_file_collection_are_not_dirty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut session = Session::open(Config::in_dir(dir.path()));
    session.dispatch(Command::Add(draft_titled("Q2")))?;

    let mut draft = draft_titled("Q2");
    draft.set_unset(Field::Location, false);
    draft.set_text(Field::Location, "Harbor");
    session.dispatch(Command::Edit {
        origin: Origin::Added,
        title: Some("Q2".to_string()),
        draft,
    })?;

    assert!(session.dirty().is_empty());
    let stored = session.store(Origin::Added).get("Q2").ok_or("Q2 added")?;
    assert_eq!(stored.text(Field::Location).as_deref(), Some("Harbor"));
    Ok(())
}

#[test]
fn rejected_commands_leave_the_session_unchanged() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("c.json");
    std::fs::write(&source, r#"[{"titulo":"Q1"}]"#)?;
    let mut session = Session::open(Config::in_dir(dir.path()));

    // Export before any source is selected.
    assert!(matches!(
        session.dispatch(Command::Export),
        Err(SessionError::Selection(_))
    ));

    session.dispatch(Command::SelectSource(source.clone()))?;

    // Creation without a title.
    let mut untitled = draft_titled("");
    assert!(matches!(
        session.dispatch(Command::Add(untitled.clone())),
        Err(SessionError::Validation(_))
    ));
    untitled.set_unset(Field::Title, true);
    assert!(session.dispatch(Command::Add(untitled)).is_err());
    assert!(session.store(Origin::Added).is_empty());

    // Nothing selected.
    assert!(matches!(
        session.dispatch(Command::Delete {
            origin: Origin::History,
            title: None
        }),
        Err(SessionError::Selection(_))
    ));
    assert!(matches!(
        session.import(CatalogKind::Items, None, ""),
        Err(SessionError::Selection(_))
    ));

    // Edit that would blank the title.
    let result = session.dispatch(Command::Edit {
        origin: Origin::File,
        title: Some("Q1".to_string()),
        draft: draft_titled(" "),
    });
    assert!(matches!(result, Err(SessionError::Validation(_))));
    assert!(session.dirty().is_empty());

    // A broken replacement source keeps the current one.
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, b"{")?;
    assert!(matches!(
        session.dispatch(Command::SelectSource(broken)),
        Err(SessionError::Parse { .. })
    ));
    assert_eq!(session.source_path(), Some(source.as_path()));
    assert!(session.store(Origin::File).contains("Q1"));
    Ok(())
}

#[test]
fn selecting_a_new_source_resets_dirty_titles() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    std::fs::write(&first, r#"[{"titulo":"Q1"}]"#)?;
    std::fs::write(&second, r#"{"titulo":"Q1","corpo":"other file"}"#)?;

    let mut session = Session::open(Config::in_dir(dir.path()));
    session.dispatch(Command::SelectSource(first))?;
    session.dispatch(Command::Edit {
        origin: Origin::File,
        title: Some("Q1".to_string()),
        draft: draft_titled("Q1"),
    })?;
    session.dispatch(Command::SelectSource(second.clone()))?;

    assert!(session.dirty().is_empty());
    let report = session.export()?;
    assert_eq!(
        read(&report.path)?,
        json!([{ "titulo": "Q1", "corpo": "other file" }])
    );
    Ok(())
}

#[test]
fn unreadable_startup_source_opens_without_a_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, b"[{")?;

    let session = Session::open_with_source(Config::in_dir(dir.path()), Some(broken));
    assert!(session.source_path().is_none());
    assert!(session.store(Origin::File).is_empty());
    let warnings = session.startup_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("broken.json"), "{}", warnings[0]);
    assert_eq!(warnings[0].matches("EOF while parsing").count(), 1);

    let good = dir.path().join("c.json");
    std::fs::write(&good, r#"[{"titulo":"Q1"}]"#)?;
    let session = Session::open_with_source(Config::in_dir(dir.path()), Some(good.clone()));
    assert_eq!(session.source_path(), Some(good.as_path()));
    assert!(session.startup_warnings().is_empty());
    Ok(())
}
