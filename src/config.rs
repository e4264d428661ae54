use crate::catalog::CatalogKind;
use crate::statics;
use std::path::{Path, PathBuf};

/// Where the well-known files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub history_file: String,
    pub monsters_file: String,
    pub items_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl Config {
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            history_file: statics::FILE_HISTORY.to_string(),
            monsters_file: CatalogKind::Monsters.file_name().to_string(),
            items_file: CatalogKind::Items.file_name().to_string(),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    pub fn catalog_path(&self, kind: CatalogKind) -> PathBuf {
        let name = match kind {
            CatalogKind::Monsters => &self.monsters_file,
            CatalogKind::Items => &self.items_file,
        };
        self.data_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::catalog::CatalogKind;
    use std::path::PathBuf;

    #[test]
    fn paths_resolve_against_data_dir() {
        let config = Config::in_dir("/srv/quests");
        assert_eq!(
            config.history_path(),
            PathBuf::from("/srv/quests/campanhas_historico.json")
        );
        assert_eq!(
            config.catalog_path(CatalogKind::Items),
            PathBuf::from("/srv/quests/itens.json")
        );
        assert_eq!(Config::default().data_dir, PathBuf::from("."));
    }
}
