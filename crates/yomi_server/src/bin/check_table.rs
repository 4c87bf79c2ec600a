//! Validates a kanji table file before it is deployed.
//! Takes the path as the first argument, falling back to KANJI_TABLE_PATH and then the built-in table.

use eyre::WrapErr;
use std::{env, fs::File, io::BufReader};
use yomi::KanjiTable;

pub fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let path = env::args().nth(1).or_else(|| env::var("KANJI_TABLE_PATH").ok());
    let table = match &path {
        Some(path) => {
            let file = File::open(path).wrap_err_with(|| format!("Failed to open {path}"))?;
            KanjiTable::from_reader(BufReader::new(file))
                .wrap_err_with(|| format!("Invalid kanji table at {path}"))?
        }
        None => KanjiTable::builtin().wrap_err("Invalid built-in kanji table")?,
    };

    let readings = table
        .entries()
        .iter()
        .map(|entry| entry.readings().len())
        .sum::<usize>();
    tracing::info!(
        "{} is valid: {} kanji with {readings} readings",
        path.as_deref().unwrap_or("built-in table"),
        table.len()
    );
    Ok(())
}
