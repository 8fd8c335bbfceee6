use anyhow::Result;
use std::path::PathBuf;
use taskboard::{
    config::GlobalConfig,
    logging,
    storage::{FileStore, Persistence},
    tui,
};

const USAGE: &str = "\
Usage: taskboard [STORE_FILE]

Terminal task board. Tasks are kept in STORE_FILE, or in the path set by
`storage.path` in ~/.config/taskboard/config.toml, or in the data directory.

Options:
  -h, --help    Print this help";

fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let store_override = match args.get(1).map(|s| s.as_str()) {
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(path) => Some(PathBuf::from(path)),
        None => None,
    };

    let config = GlobalConfig::load()?;
    let _log_guard = logging::init(&config.log, &config.log_dir()?)?;

    let store_path = config.store_path(store_override.as_deref())?;
    tracing::info!(store = ?store_path, "starting taskboard");

    let store_label = store_path.display().to_string();
    let persistence = Persistence::new(Box::new(FileStore::new(store_path)));

    let mut app = tui::App::new(persistence, config.theme, store_label)?;
    let result = app.run();
    drop(app);

    if let Err(e) = &result {
        tracing::error!(error = %e, "taskboard exited with an error");
    }
    result
}
