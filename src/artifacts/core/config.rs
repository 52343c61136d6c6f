use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";
pub const NO_PAGER_ENV: &str = "NO_PAGER";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Settings read from the environment once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Fixed timestamp stamped on every new commit
    pub commit_date: Option<DateTime<FixedOffset>>,
    pub no_pager: bool,
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let commit_date = lookup(COMMIT_DATE_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_commit_date(&value))
            .transpose()?;

        Ok(Config {
            commit_date,
            no_pager: lookup(NO_PAGER_ENV).is_some(),
        })
    }
}

fn parse_commit_date(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let value = value.trim();

    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_str(value, COMMIT_DATE_FORMAT))
        .with_context(|| format!("Invalid {COMMIT_DATE_ENV} value: {value}"))
}
