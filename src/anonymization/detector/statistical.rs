//! Statistical entity providers
//!
//! `fast` mode uses [`PatternOnlyProvider`], which contributes nothing.
//! `balanced` and `accurate` load a [`LexiconModelProvider`] from the
//! configured model resource: a given-name lexicon, one name per line, `#`
//! starting a comment. A name run starting with a known given name is
//! reported as a person.
//!
//! A resource that cannot be loaded never fails initialization; the engine
//! degrades to `fast` and records [`RecoverableError::ProviderUnavailable`].

use super::EntityProvider;
use crate::anonymization::cached_regex;
use crate::config::RecognitionMode;
use crate::domain::{AnonymifyError, Candidate, EntityType, RecoverableError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Capitalized word, optionally hyphenated ("Anna-Lena")
const NAME_TOKEN_PATTERN: &str = r"\b[A-ZÄÖÜ][a-zäöüß]+(?:-[A-ZÄÖÜ][a-zäöüß]+)?\b";

static NAME_TOKEN: OnceLock<Option<Regex>> = OnceLock::new();

/// Provider used in `fast` mode
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternOnlyProvider;

impl EntityProvider for PatternOnlyProvider {
    fn name(&self) -> &str {
        "pattern_only"
    }

    fn detect(&self, _text: &str) -> Vec<Candidate> {
        Vec::new()
    }
}

/// Given-name lexicon provider
#[derive(Debug, Clone)]
pub struct LexiconModelProvider {
    given_names: HashSet<String>,
    max_tokens: usize,
    confidence: f32,
}

impl LexiconModelProvider {
    /// Load the lexicon from a model resource file
    pub fn from_file(path: impl AsRef<Path>, mode: RecognitionMode) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnonymifyError::Configuration(format!(
                "Failed to read model resource {}: {}",
                path.display(),
                e
            ))
        })?;

        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_names(names, mode)
    }

    /// Build the provider from an in-memory name list
    ///
    /// `accurate` reports runs of up to four tokens at 0.8, every other mode
    /// runs of two tokens at 0.75.
    pub fn from_names<I, S>(names: I, mode: RecognitionMode) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let given_names: HashSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        if given_names.is_empty() {
            return Err(AnonymifyError::Configuration(
                "Model resource contains no names".to_string(),
            ));
        }

        let (max_tokens, confidence) = match mode {
            RecognitionMode::Accurate => (4, 0.8),
            RecognitionMode::Fast | RecognitionMode::Balanced => (2, 0.75),
        };

        Ok(Self {
            given_names,
            max_tokens,
            confidence,
        })
    }

    pub fn lexicon_size(&self) -> usize {
        self.given_names.len()
    }

    fn is_given_name(&self, token: &str) -> bool {
        let head = token.split('-').next().unwrap_or(token);
        self.given_names.contains(&head.to_lowercase())
    }
}

impl EntityProvider for LexiconModelProvider {
    fn name(&self) -> &str {
        "lexicon_model"
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        let Some(token_re) = cached_regex(&NAME_TOKEN, NAME_TOKEN_PATTERN) else {
            return Vec::new();
        };

        // Runs of capitalized tokens separated only by spaces or tabs.
        let mut runs: Vec<Vec<(usize, usize)>> = Vec::new();
        for m in token_re.find_iter(text) {
            let joined = runs.last().and_then(|run| run.last()).is_some_and(|&(_, end)| {
                let gap = &text[end..m.start()];
                !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t')
            });
            if joined {
                if let Some(run) = runs.last_mut() {
                    run.push((m.start(), m.end()));
                }
            } else {
                runs.push(vec![(m.start(), m.end())]);
            }
        }

        let mut found = Vec::new();
        for run in runs.iter().filter(|run| run.len() >= 2) {
            let mut i = 0;
            while i + 1 < run.len() {
                let (start, end) = run[i];
                if !self.is_given_name(&text[start..end]) {
                    i += 1;
                    continue;
                }
                let last = (i + self.max_tokens).min(run.len()) - 1;
                let span_end = run[last].1;
                found.push(Candidate::new(
                    EntityType::Person,
                    start,
                    span_end,
                    self.confidence,
                    &text[start..span_end],
                    self.name(),
                ));
                i = last + 1;
            }
        }
        found
    }
}

/// Outcome of provider selection for a requested mode
pub struct ProviderSelection {
    pub provider: Arc<dyn EntityProvider>,
    /// Mode actually in effect after any downgrade
    pub effective_mode: RecognitionMode,
    pub warning: Option<RecoverableError>,
}

/// Pick the provider for `mode`, degrading to `fast` when the model
/// resource is missing or unusable
pub fn select_provider(mode: RecognitionMode, model_path: Option<&Path>) -> ProviderSelection {
    if !mode.needs_provider() {
        return ProviderSelection {
            provider: Arc::new(PatternOnlyProvider),
            effective_mode: RecognitionMode::Fast,
            warning: None,
        };
    }

    let loaded = match model_path {
        Some(path) => LexiconModelProvider::from_file(path, mode).map_err(|e| e.to_string()),
        None => Err("no model_path configured".to_string()),
    };

    match loaded {
        Ok(provider) => {
            tracing::info!(
                mode = %mode,
                lexicon_size = provider.lexicon_size(),
                "Statistical provider loaded"
            );
            ProviderSelection {
                provider: Arc::new(provider),
                effective_mode: mode,
                warning: None,
            }
        }
        Err(reason) => {
            let warning = RecoverableError::ProviderUnavailable { mode, reason };
            crate::log_recoverable!(&warning);
            ProviderSelection {
                provider: Arc::new(PatternOnlyProvider),
                effective_mode: RecognitionMode::Fast,
                warning: Some(warning),
            }
        }
    }
}
