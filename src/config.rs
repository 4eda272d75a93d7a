//! Runtime settings (environment, `JLPT_` prefix) and the fixed level list.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://jlptsensei.com/";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root; level index pages are resolved against it.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("jlpt-grammar-deck/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load from `JLPT_BASE_URL`, `JLPT_USER_AGENT`, `JLPT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("JLPT"))
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load JLPT_* settings")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Category index page of `level`, e.g. `https://jlptsensei.com/jlpt-n5-grammar-list/`.
    pub fn level_index_url(&self, level: JlptLevel) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base url `{}`", self.base_url))?;
        let url = base.join(&format!("jlpt-{}-grammar-list/", level.slug()))?;
        Ok(url)
    }
}

/// Proficiency levels, in traversal order (easiest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [Self::N5, Self::N4, Self::N3, Self::N2, Self::N1];

    pub fn slug(self) -> &'static str {
        match self {
            Self::N5 => "n5",
            Self::N4 => "n4",
            Self::N3 => "n3",
            Self::N2 => "n2",
            Self::N1 => "n1",
        }
    }

    /// Levels to visit: `only` filtered, always in [`JlptLevel::ALL`] order.
    /// An empty filter means every level.
    pub fn selection(only: &[JlptLevel]) -> Vec<JlptLevel> {
        Self::ALL
            .into_iter()
            .filter(|l| only.is_empty() || only.contains(l))
            .collect()
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_urls() {
        let s = Settings::default();
        assert_eq!(
            s.level_index_url(JlptLevel::N5).unwrap().as_str(),
            "https://jlptsensei.com/jlpt-n5-grammar-list/"
        );
        assert_eq!(
            s.level_index_url(JlptLevel::N1).unwrap().as_str(),
            "https://jlptsensei.com/jlpt-n1-grammar-list/"
        );
    }

    #[test]
    fn base_url_with_path() {
        let s = Settings {
            base_url: "http://localhost:8080/mirror/".into(),
            ..Settings::default()
        };
        assert_eq!(
            s.level_index_url(JlptLevel::N3).unwrap().as_str(),
            "http://localhost:8080/mirror/jlpt-n3-grammar-list/"
        );
    }

    #[test]
    fn invalid_base_url() {
        let s = Settings {
            base_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(s.level_index_url(JlptLevel::N5).is_err());
    }

    #[test]
    fn selection_keeps_fixed_order() {
        assert_eq!(JlptLevel::selection(&[]), JlptLevel::ALL.to_vec());
        assert_eq!(
            JlptLevel::selection(&[JlptLevel::N1, JlptLevel::N4]),
            vec![JlptLevel::N4, JlptLevel::N1]
        );
    }

    #[test]
    fn display_is_upper_case() {
        assert_eq!(JlptLevel::N2.to_string(), "N2");
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert!(s.user_agent.starts_with("jlpt-grammar-deck/"));
    }

    #[test]
    fn settings_from_environment() {
        // Only this test touches the JLPT_* variables.
        std::env::set_var("JLPT_BASE_URL", "http://127.0.0.1:8080/mirror/");
        std::env::set_var("JLPT_USER_AGENT", "grammar-test/1.0");
        std::env::set_var("JLPT_TIMEOUT_SECS", "7");
        let loaded = Settings::from_env();
        std::env::remove_var("JLPT_BASE_URL");
        std::env::remove_var("JLPT_USER_AGENT");
        std::env::remove_var("JLPT_TIMEOUT_SECS");

        let s = loaded.unwrap();
        assert_eq!(s.base_url, "http://127.0.0.1:8080/mirror/");
        assert_eq!(s.user_agent, "grammar-test/1.0");
        assert_eq!(s.timeout(), Duration::from_secs(7));
        assert_eq!(
            s.level_index_url(JlptLevel::N2).unwrap().as_str(),
            "http://127.0.0.1:8080/mirror/jlpt-n2-grammar-list/"
        );
    }
}
