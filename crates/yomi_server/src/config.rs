//! Server configuration, read from environment variables.

use eyre::WrapErr;
use std::{
    env,
    fs::File,
    io::BufReader,
    net::SocketAddr,
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
    str::FromStr,
};
use tower_cookies::Key;
use yomi::{
    normalize::{self, NormalizeOptions},
    romaji::Transliterator,
    EmptyAttempts, KanjiTable, Quiz,
};

const DEFAULT_KANJI_RANGE_END: u32 = 0x9FFF;
const DEFAULT_HISTORY_LIMIT: usize = 30;
const DEFAULT_SESSION_EXPIRATION_DAYS: u32 = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: SocketAddr,
    pub private_cookie_password: String,
    /// Uses the built-in table if unset.
    pub kanji_table_path: Option<PathBuf>,
    pub kanji_range_end: u32,
    pub romaji_conversion: bool,
    pub record_empty_attempts: bool,
    pub history_limit: usize,
    pub session_expiration_days: u32,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let server_url = lookup("SERVER_URL")
            .ok_or_else(|| eyre::eyre!("Missing SERVER_URL"))?
            .parse::<SocketAddr>()
            .wrap_err("Invalid SERVER_URL")?;
        let private_cookie_password = lookup("PRIVATE_COOKIE_PASSWORD")
            .ok_or_else(|| eyre::eyre!("Missing PRIVATE_COOKIE_PASSWORD"))?;
        let kanji_table_path = lookup("KANJI_TABLE_PATH").map(PathBuf::from);
        let kanji_range_end = match lookup("KANJI_RANGE_END") {
            Some(end) => parse_code_point(&end)
                .wrap_err_with(|| format!("Invalid KANJI_RANGE_END '{end}'"))?,
            None => DEFAULT_KANJI_RANGE_END,
        };
        Ok(Self {
            server_url,
            private_cookie_password,
            kanji_table_path,
            kanji_range_end,
            romaji_conversion: optional(&lookup, "ROMAJI_CONVERSION")?.unwrap_or(true),
            record_empty_attempts: optional(&lookup, "RECORD_EMPTY_ATTEMPTS")?.unwrap_or(false),
            history_limit: optional(&lookup, "HISTORY_LIMIT")?
                .map_or(DEFAULT_HISTORY_LIMIT, NonZeroUsize::get),
            session_expiration_days: optional(&lookup, "SESSION_EXPIRATION_DAYS")?
                .map_or(DEFAULT_SESSION_EXPIRATION_DAYS, NonZeroU32::get),
        })
    }

    pub fn kanji_table(&self) -> eyre::Result<KanjiTable> {
        match &self.kanji_table_path {
            Some(path) => {
                tracing::info!("Loading kanji table from {}", path.display());
                let file = File::open(path).wrap_err_with(|| {
                    format!("Failed to open kanji table at '{}'", path.display())
                })?;
                KanjiTable::from_reader(BufReader::new(file)).wrap_err_with(|| {
                    format!("Invalid kanji table at '{}'", path.display())
                })
            }
            None => KanjiTable::builtin().wrap_err("Invalid built-in kanji table"),
        }
    }

    pub fn quiz(&self) -> eyre::Result<Quiz> {
        let table = self.kanji_table()?;
        let kanji_range = normalize::ideograph_range_ending_at(self.kanji_range_end)
            .wrap_err("Invalid KANJI_RANGE_END")?;
        let options = NormalizeOptions {
            kanji_range,
            transliterator: Transliterator::new(self.romaji_conversion),
        };
        let empty_attempts = if self.record_empty_attempts {
            EmptyAttempts::Record
        } else {
            EmptyAttempts::Skip
        };
        Ok(Quiz::new(table, options, empty_attempts))
    }

    pub fn private_cookie_key(&self) -> eyre::Result<Key> {
        Key::try_from(self.private_cookie_password.as_bytes())
            .map_err(|_| eyre::eyre!("PRIVATE_COOKIE_PASSWORD must be at least 64 bytes long"))
    }
}

fn optional<T>(lookup: impl Fn(&str) -> Option<String>, name: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .wrap_err_with(|| format!("Invalid {name} '{value}'"))
        })
        .transpose()
}

// accepts 9FAF, 0x9FAF and U+9FAF
fn parse_code_point(s: &str) -> eyre::Result<u32> {
    let s = s.trim();
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("U+"))
        .unwrap_or(s);
    Ok(u32::from_str_radix(hex, 16)?)
}
