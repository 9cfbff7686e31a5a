mod app;
mod error;
mod events;
mod logger;
mod state;
mod storage;
mod store;
mod ui;
mod utils;

use crate::app::App;
use crate::storage::Storage;
use anyhow::Result;
use clap::{App as ClapApp, Arg};
use std::path::Path;

fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("data-dir")
                .short("D")
                .long("data-dir")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory holding the state document"),
        )
        .arg(
            Arg::with_name("import")
                .long("import")
                .value_name("FILE")
                .takes_value(true)
                .help("Parse a backup file and report its contents, then exit"),
        )
        .arg(
            Arg::with_name("export")
                .long("export")
                .value_name("FILE")
                .takes_value(true)
                .help("Write a backup of the current state to FILE, then exit"),
        )
        .get_matches();

    let data_dir = matches.value_of("data-dir");

    if let Some(path) = matches.value_of("import") {
        Storage::import(Path::new(path))?;
        println!("Parsed backup at {} (import/merge not implemented)", path);
        return Ok(());
    }

    if let Some(target) = matches.value_of("export") {
        let mut storage = Storage::new();
        let store = storage.load(data_dir)?;
        let written = storage.export(&store, Some(Path::new(target)))?;
        println!("Backup written to {}", written.display());
        return Ok(());
    }

    App::start(data_dir)
}
