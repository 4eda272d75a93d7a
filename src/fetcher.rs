use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::config::{JlptLevel, Settings};
use crate::example::GrammarExample;
use crate::parser::{self, ExtractError};
use crate::utils::elapsed_label;

/// Where page markup comes from.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Blocking HTTP page source. No retries: any failure is returned as is.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        self.client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .with_context(|| format!("Failed to fetch {}", url))
    }
}

/// Counters gathered during a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchStats {
    pub levels: usize,
    pub pages: usize,
    pub rules: usize,
    /// Rules whose page had no examples container.
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Harvest {
    pub examples: Vec<GrammarExample>,
    pub stats: FetchStats,
}

/// Walks level index → listing pages → rule pages, one request at a time.
pub struct Fetcher<S> {
    source: S,
    settings: Settings,
    progress: MultiProgress,
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(source: S, settings: Settings) -> Self {
        Self {
            source,
            settings,
            progress: MultiProgress::new(),
        }
    }

    pub fn with_progress(mut self, progress: MultiProgress) -> Self {
        self.progress = progress;
        self
    }

    /// All examples of `levels`, in level → page → rule → example order.
    /// Duplicated rule links produce duplicated examples.
    pub fn fetch_all(&self, levels: &[JlptLevel]) -> Result<Harvest> {
        let t0 = Instant::now();
        info!("Fetching all grammar examples from `{}`", self.settings.base_url);

        let mut examples = Vec::new();
        let mut stats = FetchStats::default();

        let pb = self.bar(levels.len(), "Fetching levels")?;
        for &level in levels {
            pb.set_message(format!("Fetching {} pages", level));
            self.fetch_level(level, &mut examples, &mut stats)?;
            stats.levels += 1;
            pb.inc(1);
        }
        self.done(pb);

        info!(
            "Fetched {} grammar examples from `{}` in {} ({} rules, {} skipped)",
            examples.len(),
            self.settings.base_url,
            elapsed_label(t0.elapsed()),
            stats.rules,
            stats.skipped,
        );
        Ok(Harvest { examples, stats })
    }

    fn fetch_level(
        &self,
        level: JlptLevel,
        out: &mut Vec<GrammarExample>,
        stats: &mut FetchStats,
    ) -> Result<()> {
        let index_url = self.settings.level_index_url(level)?;
        let html = self.source.fetch(&index_url)?;
        let pages = parser::listing_pages(&html, &index_url)
            .with_context(|| format!("Failed to read pagination of {}", index_url))?;
        debug!("{}: {} listing pages", level, pages.len());

        let pb = self.bar(pages.len(), "Fetching pages")?;
        for page_url in &pages {
            self.fetch_listing_page(page_url, out, stats)?;
            stats.pages += 1;
            pb.inc(1);
        }
        self.done(pb);
        Ok(())
    }

    fn fetch_listing_page(
        &self,
        page_url: &Url,
        out: &mut Vec<GrammarExample>,
        stats: &mut FetchStats,
    ) -> Result<()> {
        let html = self.source.fetch(page_url)?;
        let rules = parser::rule_links(&html, page_url)
            .with_context(|| format!("Failed to read grammar table of {}", page_url))?;

        let pb = self.bar(rules.len(), "Fetching grammar rules")?;
        for rule_url in &rules {
            out.extend(self.fetch_rule(rule_url, stats)?);
            stats.rules += 1;
            pb.inc(1);
        }
        self.done(pb);
        Ok(())
    }

    fn fetch_rule(&self, rule_url: &Url, stats: &mut FetchStats) -> Result<Vec<GrammarExample>> {
        let html = self.source.fetch(rule_url)?;
        match parser::parse_rule_page(&html) {
            Ok(examples) => Ok(examples),
            Err(ExtractError::MissingExamples) => {
                warn!("Could not fetch grammar examples from url `{}`", rule_url);
                stats.skipped += 1;
                Ok(Vec::new())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to parse rule page {}", rule_url)),
        }
    }

    fn bar(&self, len: usize, msg: &'static str) -> Result<ProgressBar> {
        let pb = self.progress.add(ProgressBar::new(len as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:<24} [{elapsed_precise}] {bar:40} {pos}/{len}")?
                .progress_chars("=> "),
        );
        pb.set_message(msg);
        Ok(pb)
    }

    fn done(&self, pb: ProgressBar) {
        pb.finish_and_clear();
        self.progress.remove(&pb);
    }
}
