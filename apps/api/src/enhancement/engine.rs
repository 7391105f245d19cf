//! Enhancement engine — composes backend enhancement, alternatives,
//! quantification suggestions and a heuristic confidence score into one
//! `EnhancementResult`.
//!
//! The engine never fails: if the backend call returns an error it rewrites the
//! text with its own reduced verb table and carries on.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::enhancement::ai_manager::AiServiceManager;
use crate::enhancement::context::{EnhancementContext, Industry, RoleLevel};
use crate::enhancement::quantify::added_metric_tokens;
use crate::enhancement::rule_based::{
    apply_phrase_table, capitalize_first, compile_phrase_table, lowercase_first,
    starts_with_strong_verb, strip_leading_pronoun, tidy,
};
use crate::enhancement::templates::{
    industry_template, percentage_options, role_level_verb, team_size_options, volume_options,
    FREQUENCY_OPTIONS,
};

const MAX_ALTERNATIVES: usize = 3;
const MAX_SUGGESTIONS: usize = 2;
const MAX_STRENGTHENED_WORDS: usize = 3;
const MAX_ADDED_METRICS: usize = 2;

const BASE_CONFIDENCE: f64 = 0.6;
const MAX_CONFIDENCE: f64 = 0.95;

/// Verbs that earn the strong-verb confidence bonus.
const CONFIDENCE_VERBS: &[&str] = &[
    "achieved",
    "implemented",
    "optimized",
    "streamlined",
    "accelerated",
    "enhanced",
];

/// Engine-local fallback table. Smaller than the rule-based enhancer's and
/// maintained separately.
const FALLBACK_VERB_REPLACEMENTS: &[(&str, &str)] = &[
    ("was responsible for", "managed"),
    ("responsible for", "managed"),
    ("worked on", "developed"),
    ("helped", "assisted"),
    ("handled", "managed"),
    ("made", "created"),
    ("did", "completed"),
    ("used", "leveraged"),
];

static FALLBACK_VERB_PATTERNS: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| compile_phrase_table(FALLBACK_VERB_REPLACEMENTS));

/// Phrases swapped out when building verb-driven alternatives.
static WEAK_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:was responsible for|responsible for|worked on|took care of|helped(?: with)?|assisted with|handled|managed|did|made)\b",
    )
    .expect("weak verb pattern is valid")
});

// ── Result types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantificationCategory {
    Size,
    Volume,
    Percentage,
    Time,
    Money,
    Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantificationSuggestion {
    pub question: String,
    /// Fill-in text with exactly one `{size}`, `{volume}`, `{percentage}` or
    /// `{frequency}` placeholder.
    pub template: String,
    pub options: Vec<String>,
    pub category: QuantificationCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementImprovements {
    pub confidence: f64,
    pub quantification_suggestions: Vec<QuantificationSuggestion>,
    pub strengthened_words: Vec<String>,
    pub added_metrics: Vec<String>,
}

/// Which path produced the primary enhanced text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementSource {
    Ai,
    RuleBased,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    pub enhanced_text: String,
    pub alternatives: Vec<String>,
    pub improvements: EnhancementImprovements,
    pub original_text: String,
    pub source: EnhancementSource,
}

// ── Quantification triggers ───────────────────────────────────────────────

type SuggestionBuilder = fn(RoleLevel, Option<Industry>) -> QuantificationSuggestion;

/// Ordered (trigger words, builder) pairs. Every rule whose words appear in
/// the original text fires; the output is capped afterwards.
const QUANTIFICATION_TRIGGERS: &[(&[&str], SuggestionBuilder)] = &[
    (&["team", "group", "people"], size_suggestion),
    (&["customer", "client", "user"], volume_suggestion),
    (&["improve", "increase", "better"], percentage_suggestion),
    (&["daily", "weekly", "regular"], frequency_suggestion),
];

fn size_suggestion(level: RoleLevel, _: Option<Industry>) -> QuantificationSuggestion {
    QuantificationSuggestion {
        question: "How many people were on the team?".to_string(),
        template: "as part of a team of {size} people".to_string(),
        options: to_owned_list(team_size_options(level)),
        category: QuantificationCategory::Size,
    }
}

fn volume_suggestion(_: RoleLevel, industry: Option<Industry>) -> QuantificationSuggestion {
    QuantificationSuggestion {
        question: "How many customers, clients or users did this reach?".to_string(),
        template: "serving {volume}".to_string(),
        options: to_owned_list(volume_options(industry)),
        category: QuantificationCategory::Volume,
    }
}

fn percentage_suggestion(level: RoleLevel, _: Option<Industry>) -> QuantificationSuggestion {
    QuantificationSuggestion {
        question: "By roughly what percentage did things improve?".to_string(),
        template: "resulting in a {percentage} improvement".to_string(),
        options: to_owned_list(percentage_options(level)),
        category: QuantificationCategory::Percentage,
    }
}

fn frequency_suggestion(_: RoleLevel, _: Option<Industry>) -> QuantificationSuggestion {
    QuantificationSuggestion {
        question: "How often did you do this?".to_string(),
        template: "on a {frequency} basis".to_string(),
        options: to_owned_list(FREQUENCY_OPTIONS),
        category: QuantificationCategory::Frequency,
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Suggestions for every trigger found in `original`, first two only.
pub fn quantification_suggestions(
    original: &str,
    level: RoleLevel,
    industry: Option<Industry>,
) -> Vec<QuantificationSuggestion> {
    let lower = original.to_lowercase();
    QUANTIFICATION_TRIGGERS
        .iter()
        .filter(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map(|(_, build)| build(level, industry))
        .take(MAX_SUGGESTIONS)
        .collect()
}

// ── Engine ────────────────────────────────────────────────────────────────

pub struct EnhancementEngine<'a> {
    ai: &'a AiServiceManager,
}

impl<'a> EnhancementEngine<'a> {
    pub fn new(ai: &'a AiServiceManager) -> Self {
        Self { ai }
    }

    pub async fn enhance(
        &self,
        original: &str,
        industry: Option<Industry>,
        role_level: RoleLevel,
        context: &EnhancementContext,
    ) -> EnhancementResult {
        let original = original.trim();
        let ai_context = EnhancementContext {
            industry: industry.or(context.industry),
            role_level: Some(role_level),
            ..context.clone()
        };

        let (enhanced, source) = match self.ai.enhance_text(original, &ai_context).await {
            Ok(text) => (text, EnhancementSource::Ai),
            Err(e) => {
                warn!("Backend enhancement failed, using engine fallback: {e}");
                (fallback_rewrite(original, industry), EnhancementSource::RuleBased)
            }
        };

        let alternatives = generate_alternatives(original, &enhanced, industry, role_level);
        let suggestions = quantification_suggestions(original, role_level, industry);
        let confidence = confidence_score(original, &enhanced, !suggestions.is_empty());
        debug!(
            "Enhanced via {:?}: confidence {confidence:.2}, {} alternatives",
            source,
            alternatives.len()
        );

        EnhancementResult {
            improvements: EnhancementImprovements {
                confidence,
                quantification_suggestions: suggestions,
                strengthened_words: strengthened_words(original, &enhanced),
                added_metrics: added_metric_tokens(original, &enhanced, MAX_ADDED_METRICS),
            },
            alternatives,
            enhanced_text: enhanced,
            original_text: original.to_string(),
            source,
        }
    }
}

/// Reduced verb substitution used when no backend answers.
fn fallback_rewrite(original: &str, industry: Option<Industry>) -> String {
    let (rewritten, _) =
        apply_phrase_table(&strip_leading_pronoun(original), &FALLBACK_VERB_PATTERNS);
    if starts_with_strong_verb(&rewritten) {
        return capitalize_first(&rewritten);
    }
    let verb = industry_template(industry).verbs[0];
    capitalize_first(&format!("{verb} {}", lowercase_first(&rewritten)))
}

/// Builds an alternative that opens with `verb`. A weak verb opening the original
/// (after any pronoun) is replaced; otherwise the opening verb of the enhanced text is swapped.
fn with_lead_verb(original: &str, enhanced: &str, verb: &str) -> String {
    let subjectless = strip_leading_pronoun(original);
    if let Some(weak) = WEAK_VERB.find(&subjectless).filter(|m| m.start() == 0) {
        let replaced = format!("{verb}{}", &subjectless[weak.end()..]);
        return capitalize_first(&tidy(&replaced));
    }

    let rest = if starts_with_strong_verb(enhanced) {
        enhanced
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest)
            .unwrap_or("")
    } else {
        enhanced
    };
    capitalize_first(&tidy(&format!("{verb} {}", lowercase_first(rest))))
}

fn generate_alternatives(
    original: &str,
    enhanced: &str,
    industry: Option<Industry>,
    role_level: RoleLevel,
) -> Vec<String> {
    let template = industry_template(industry);
    let mut candidates = vec![
        with_lead_verb(original, enhanced, template.verbs[0]),
        with_lead_verb(original, enhanced, role_level_verb(role_level)),
    ];

    let buzzword = template.buzzwords[0];
    if !enhanced.to_lowercase().contains(&buzzword.to_lowercase()) {
        let body = enhanced.trim_end().trim_end_matches('.');
        candidates.push(format!("{body}, with a focus on {buzzword}"));
    }

    let mut seen: HashSet<String> = [original, enhanced]
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    candidates
        .into_iter()
        .filter(|c| !c.trim().is_empty() && seen.insert(c.trim().to_lowercase()))
        .take(MAX_ALTERNATIVES)
        .collect()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Heuristic score in [0, 0.95]; see the constants above for the weights.
fn confidence_score(original: &str, enhanced: &str, has_suggestions: bool) -> f64 {
    let mut score = BASE_CONFIDENCE;

    if !added_metric_tokens(original, enhanced, 1).is_empty() {
        score += 0.15;
    }

    let lower = enhanced.to_lowercase();
    if CONFIDENCE_VERBS.iter().any(|v| lower.contains(v)) {
        score += 0.10;
    }

    if has_suggestions {
        score += 0.10;
    }

    let original_words = word_count(original);
    if original_words > 0 {
        let ratio = word_count(enhanced) as f64 / original_words as f64;
        if (1.2..=2.0).contains(&ratio) {
            score += 0.05;
        }
    }

    score.clamp(0.0, MAX_CONFIDENCE)
}

/// Alphabetic words longer than three letters that appear only in `enhanced`.
fn strengthened_words(original: &str, enhanced: &str) -> Vec<String> {
    let normalize = |w: &str| {
        w.trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase()
    };
    let before: HashSet<String> = original.split_whitespace().map(normalize).collect();

    let mut words = Vec::new();
    for word in enhanced.split_whitespace().map(normalize) {
        if word.chars().count() > 3
            && word.chars().all(char::is_alphabetic)
            && !before.contains(&word)
            && !words.contains(&word)
        {
            words.push(word);
            if words.len() == MAX_STRENGTHENED_WORDS {
                break;
            }
        }
    }
    words
}
