use clap::Parser;
use quest_ledger::{Config, Session};
use std::path::PathBuf;

/// Campaign record editor: edit a campaign file, export the changes to a new file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding the monster, item and history files.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Campaign file to load at startup.
    source: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    quest_ledger::logging::init();
    let cli = Cli::parse();

    let session = Session::open_with_source(Config::in_dir(&cli.data_dir), cli.source);
    quest_ledger::run_gui(session).map_err(|e| anyhow::anyhow!("gui: {e}"))
}
