//! Pattern rule catalog
//!
//! Rules are loaded from TOML of the form
//!
//! ```toml
//! [patterns.phone_national]
//! category = "PHONE"
//! confidence = 0.75
//! patterns = ['(?<![\w/.])\(?0\d{2,4}\)?[ \t\-/]?\d{3,4}[ \t\-/]?\d{2,5}\b']
//! ```
//!
//! Entries are processed in name order, so rule order (and therefore
//! recognition output order) does not depend on hash seeds. Any malformed
//! entry rejects the whole catalog.

use crate::domain::{AnonymifyError, EntityType, Result};
use fancy_regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Upper bound on backtracking steps for a single match attempt
pub const BACKTRACK_LIMIT: usize = 200_000;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PatternDefinition {
    patterns: Vec<String>,
    confidence: f32,
    category: String,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// One uncompiled pattern rule
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRule {
    /// Stable identifier, `<entry>` or `<entry>#<index>`
    pub id: String,
    pub entity_type: EntityType,
    pub pattern: String,
    /// Confidence assigned to every match of this rule
    pub base_confidence: f32,
}

impl PatternRule {
    pub fn new(
        id: impl Into<String>,
        entity_type: EntityType,
        pattern: impl Into<String>,
        base_confidence: f32,
    ) -> Self {
        Self {
            id: id.into(),
            entity_type,
            pattern: pattern.into(),
            base_confidence,
        }
    }
}

/// Compiled rule ready for matching
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    pub entity_type: EntityType,
    pub base_confidence: f32,
    pub regex: Regex,
}

/// Immutable, validated rule catalog
#[derive(Debug, Clone)]
pub struct PatternRuleSet {
    rules: Vec<CompiledRule>,
}

impl PatternRuleSet {
    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnonymifyError::Configuration(format!(
                "Failed to read pattern library {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and compile a catalog from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            AnonymifyError::Configuration(format!("Failed to parse pattern library: {e}"))
        })?;

        let mut rules = Vec::new();
        for (name, def) in library.patterns {
            let entity_type: EntityType = def.category.parse().map_err(|e| {
                AnonymifyError::Configuration(format!("Invalid category in pattern '{name}': {e}"))
            })?;

            if def.patterns.is_empty() {
                return Err(AnonymifyError::Configuration(format!(
                    "Pattern '{name}' lists no patterns"
                )));
            }

            let single = def.patterns.len() == 1;
            for (index, pattern) in def.patterns.into_iter().enumerate() {
                let id = if single {
                    name.clone()
                } else {
                    format!("{name}#{index}")
                };
                rules.push(PatternRule::new(id, entity_type, pattern, def.confidence));
            }
        }

        Self::from_rules(rules)
    }

    /// Validate and compile an explicit list of rules
    pub fn from_rules(rules: Vec<PatternRule>) -> Result<Self> {
        Self::compile_all(rules, BACKTRACK_LIMIT)
    }

    /// The built-in German legal catalog
    pub fn default_rules() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/default_rules.toml");
        Self::from_toml(default_toml)
    }

    fn compile_all(rules: Vec<PatternRule>, backtrack_limit: usize) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if compiled.iter().any(|c: &CompiledRule| c.id == rule.id) {
                return Err(AnonymifyError::Configuration(format!(
                    "Duplicate rule id '{}'",
                    rule.id
                )));
            }
            compiled.push(compile_rule(rule, backtrack_limit)?);
        }
        Ok(Self { rules: compiled })
    }

    /// All rules in catalog order
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Rules producing a given entity type
    pub fn rules_for(&self, entity_type: EntityType) -> impl Iterator<Item = &CompiledRule> {
        self.rules
            .iter()
            .filter(move |rule| rule.entity_type == entity_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_rule(rule: PatternRule, backtrack_limit: usize) -> Result<CompiledRule> {
    if !rule.base_confidence.is_finite() || !(0.0..=1.0).contains(&rule.base_confidence) {
        return Err(AnonymifyError::Configuration(format!(
            "Rule '{}' has confidence {} outside 0.0-1.0",
            rule.id, rule.base_confidence
        )));
    }
    if rule.pattern.trim().is_empty() {
        return Err(AnonymifyError::Configuration(format!(
            "Rule '{}' has an empty pattern",
            rule.id
        )));
    }

    let regex = RegexBuilder::new(&rule.pattern)
        .backtrack_limit(backtrack_limit)
        .build()
        .map_err(|e| {
            AnonymifyError::Configuration(format!("Invalid regex in rule '{}': {e}", rule.id))
        })?;

    // A rule that can match nothing would produce zero-width spans everywhere.
    if regex.is_match("").unwrap_or(false) {
        return Err(AnonymifyError::Configuration(format!(
            "Rule '{}' matches the empty string",
            rule.id
        )));
    }

    Ok(CompiledRule {
        id: rule.id,
        entity_type: rule.entity_type,
        base_confidence: rule.base_confidence,
        regex,
    })
}
