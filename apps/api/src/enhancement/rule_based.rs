//! Rule-based enhancer — deterministic, dependency-free rewriting.
//!
//! Pipeline, in order:
//! 1. weak verb → strong verb
//! 2. casual language cleanup
//! 3. metric clause, only when `has_quantification` is false
//! 4. strong action-verb start
//! 5. capitalization + summary/achievement polish
//!
//! Used standalone and as the boundary-layer fallback when no backend answers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::enhancement::context::{ContentType, EnhancementContext, RoleLevel};
use crate::enhancement::quantify::has_quantification;

/// Weak phrase → strong verb. Multi-word phrases come first so they win over
/// their single-word suffixes.
const WEAK_VERB_REPLACEMENTS: &[(&str, &str)] = &[
    ("was responsible for", "managed"),
    ("was in charge of", "led"),
    ("responsible for", "managed"),
    ("took care of", "oversaw"),
    ("worked on", "developed"),
    ("worked with", "collaborated with"),
    ("dealt with", "resolved"),
    ("talked to", "communicated with"),
    ("looked after", "supervised"),
    ("set up", "established"),
    ("helped", "assisted"),
    ("handled", "managed"),
    ("fixed", "resolved"),
    ("made", "created"),
    ("did", "executed"),
    ("used", "utilized"),
    ("ran", "directed"),
    ("showed", "demonstrated"),
    ("changed", "transformed"),
    ("gave", "delivered"),
];

const CASUAL_REPLACEMENTS: &[(&str, &str)] = &[
    ("a lot of", "numerous"),
    ("lots of", "numerous"),
    ("a bunch of", "multiple"),
    ("tons of", "extensive"),
    ("stuff", "materials"),
    ("things", "items"),
    ("got to", "had the opportunity to"),
    ("kind of", ""),
    ("sort of", ""),
    ("pretty much", ""),
    ("basically", ""),
    ("really", ""),
    ("okay", "satisfactory"),
    ("big", "significant"),
];

/// Keyword triggers → metric clause. First matching rule wins.
const METRIC_RULES: &[(&[&str], &str)] = &[
    (
        &["team", "staff", "people", "colleagues"],
        ", coordinating a team of 8+ members",
    ),
    (
        &["customer", "client", "guest", "patient"],
        ", maintaining a 95% satisfaction rating",
    ),
    (
        &["improve", "increase", "enhance", "boost", "optimiz"],
        ", resulting in a 25% improvement in efficiency",
    ),
    (
        &["sales", "revenue", "profit"],
        ", generating $50K+ in additional revenue",
    ),
    (
        &["project", "initiative"],
        ", delivering 10+ projects on schedule and within budget",
    ),
    (
        &["process", "system", "workflow"],
        ", reducing processing time by 30%",
    ),
];

const DEFAULT_METRIC_CLAUSE: &str = ", contributing to a 20% increase in team productivity";

/// Irregular or non-"-ed" verbs accepted as a strong opening word.
const STRONG_START_VERBS: &[&str] = &[
    "led", "built", "oversaw", "drove", "won", "grew", "taught", "wrote", "sold", "spearheaded",
    "directed", "ran", "began", "made", "shipped", "launched", "developed", "managed",
];

static LEADING_PRONOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:i|we)\s+").expect("pronoun pattern is valid"));
static EXTRA_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.;])").expect("punctuation pattern is valid"));

static WEAK_VERB_PATTERNS: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| compile_phrase_table(WEAK_VERB_REPLACEMENTS));
static CASUAL_PATTERNS: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| compile_phrase_table(CASUAL_REPLACEMENTS));

/// Compiles a phrase table into case-insensitive whole-word patterns.
pub(crate) fn compile_phrase_table(
    table: &'static [(&'static str, &'static str)],
) -> Vec<(Regex, &'static str)> {
    table
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(from));
            (
                Regex::new(&pattern).expect("escaped phrase is a valid pattern"),
                *to,
            )
        })
        .collect()
}

/// Applies every pattern in order, keeping the capitalization of the first
/// letter of each match. Returns the rewritten text and the phrases that changed.
pub(crate) fn apply_phrase_table(
    text: &str,
    table: &[(Regex, &'static str)],
) -> (String, Vec<String>) {
    let mut out = text.to_string();
    let mut changed = Vec::new();
    for (re, replacement) in table {
        if let Some(m) = re.find(&out) {
            let matched = m.as_str().to_lowercase();
            if matched != *replacement {
                changed.push(format!("{matched} → {replacement}"));
            }
            out = re
                .replace_all(&out, |caps: &Captures| match_case(&caps[0], replacement))
                .into_owned();
        }
    }
    (tidy(&out), changed)
}

/// Removes bullet markers plus wrapping quotes and brackets pasted in with the text.
pub(crate) fn strip_wrapping(text: &str) -> &str {
    text.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '"' | '\'' | '“' | '‘' | '(' | '[' | '{' | '-' | '•' | '*')
    })
    .trim_end_matches(|c: char| {
        c.is_whitespace() || matches!(c, '"' | '\'' | '”' | '’' | ')' | ']' | '}')
    })
}

/// Drops a leading "I" or "We"; resume bullets are written without a subject.
pub(crate) fn strip_leading_pronoun(text: &str) -> String {
    LEADING_PRONOUN.replace(text.trim(), "").into_owned()
}

/// Replaces casual phrasing with professional equivalents.
pub(crate) fn clean_casual_language(text: &str) -> (String, Vec<String>) {
    apply_phrase_table(text, &CASUAL_PATTERNS)
}

/// Copies the leading capitalization of `matched` onto `replacement`.
fn match_case(matched: &str, replacement: &str) -> String {
    if matched.chars().next().is_some_and(char::is_uppercase) {
        capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

/// Collapses doubled whitespace and stray spaces before punctuation.
pub(crate) fn tidy(text: &str) -> String {
    let collapsed = EXTRA_SPACES.replace_all(text.trim(), " ");
    SPACE_BEFORE_PUNCT
        .replace_all(&collapsed, "$1")
        .trim()
        .to_string()
}

pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercases the first letter unless the first word looks like an acronym.
pub(crate) fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(_), Some(second)) if second.is_uppercase() => text.to_string(),
        (Some(first), _) => {
            first.to_lowercase().collect::<String>() + &text[first.len_utf8()..]
        }
        (None, _) => String::new(),
    }
}

/// Appends a clause before any terminal punctuation, keeping a final period.
pub(crate) fn append_clause(text: &str, clause: &str) -> String {
    let ends_with_period = text.trim_end().ends_with('.');
    let body = text.trim_end().trim_end_matches(['.', ',', ';']);
    let mut out = format!("{body}{clause}");
    if ends_with_period {
        out.push('.');
    }
    out
}

pub(crate) fn first_word(text: &str) -> String {
    text.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase()
}

/// True if the first word reads as a past-tense action verb.
pub(crate) fn starts_with_strong_verb(text: &str) -> bool {
    let word = first_word(text);
    (word.len() > 3 && word.ends_with("ed")) || STRONG_START_VERBS.contains(&word.as_str())
}

/// Deterministic resume-text enhancer with no external calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedEnhancer;

impl RuleBasedEnhancer {
    /// Rewrites `text` into stronger resume language. Callers reject empty input
    /// before reaching this; an all-whitespace string comes back empty.
    pub fn enhance_text(&self, text: &str, context: &EnhancementContext) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        let unwrapped = strip_wrapping(trimmed);
        if unwrapped.is_empty() {
            return trimmed.to_string();
        }

        // (a) weak verbs
        let without_pronoun = strip_leading_pronoun(unwrapped);
        let (mut enhanced, _) = apply_phrase_table(&without_pronoun, &WEAK_VERB_PATTERNS);

        // (b) casual language
        (enhanced, _) = clean_casual_language(&enhanced);

        // Verb choice for (d) looks at the text before a metric clause is added.
        let lead_verb = opening_verb_for(&enhanced);

        // (c) metric clause
        if !has_quantification(&enhanced) {
            enhanced = append_clause(&enhanced, metric_clause_for(&enhanced));
        }

        // (d) strong start
        if !starts_with_strong_verb(&enhanced) {
            enhanced = format!("{lead_verb} {}", lowercase_first(&enhanced));
        }

        // (e) capitalization + polish
        let enhanced = capitalize_first(&tidy(&enhanced));
        apply_polish(&enhanced, context)
    }

    /// Convenience over `has_quantification` so callers can check the gate directly.
    pub fn has_quantification(&self, text: &str) -> bool {
        has_quantification(text)
    }
}

/// Picks the metric clause whose trigger words appear in the text.
fn metric_clause_for(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    METRIC_RULES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(_, clause)| *clause)
        .unwrap_or(DEFAULT_METRIC_CLAUSE)
}

fn opening_verb_for(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("team") || lower.contains("people") {
        "Collaborated with"
    } else if lower.contains("project") || lower.contains("develop") {
        "Spearheaded"
    } else if lower.contains("system") || lower.contains("process") {
        "Optimized"
    } else {
        "Executed"
    }
}

fn apply_polish(text: &str, context: &EnhancementContext) -> String {
    let lower = text.to_lowercase();
    let level = context.role_level_or_default();

    match context.content_type {
        ContentType::Summary if !lower.contains("professional") => {
            let descriptor = match level {
                RoleLevel::Entry => "motivated",
                RoleLevel::Mid => "results-driven",
                RoleLevel::Senior => "seasoned",
                RoleLevel::Executive => "visionary",
            };
            let field = context
                .industry
                .map(|i| format!("{} ", i.label()))
                .unwrap_or_default();
            let experience = match &context.experience_level {
                Some(years) if !lower.contains("experience") => {
                    format!(" with {} of experience", years.trim())
                }
                _ => String::new(),
            };
            let base = if text.ends_with('.') {
                text.to_string()
            } else {
                format!("{text}.")
            };
            format!("{base} Recognized as a {descriptor} {field}professional{experience}.")
        }
        ContentType::Achievement if !lower.contains("demonstrating") => {
            let phrase = match level {
                RoleLevel::Entry => "strong initiative and eagerness to learn",
                RoleLevel::Mid => "consistent ownership and reliable execution",
                RoleLevel::Senior => "technical leadership and strategic impact",
                RoleLevel::Executive => "enterprise-level vision and leadership",
            };
            append_clause(text, &format!(", demonstrating {phrase}"))
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancement::context::Industry;

    fn ctx() -> EnhancementContext {
        EnhancementContext::default()
    }

    fn metric_clause_count(text: &str) -> usize {
        METRIC_RULES
            .iter()
            .map(|(_, clause)| *clause)
            .chain(std::iter::once(DEFAULT_METRIC_CLAUSE))
            .filter(|clause| text.contains(clause.trim_start_matches(", ")))
            .count()
    }

    #[test]
    fn test_store_complaints_scenario() {
        let context = EnhancementContext {
            industry: Some(Industry::CustomerService),
            role_level: Some(RoleLevel::Mid),
            ..Default::default()
        };
        let out = RuleBasedEnhancer.enhance_text(
            "I helped customers at the store and handled their complaints",
            &context,
        );
        let lower = out.to_lowercase();
        assert!(lower.contains("assisted"), "got: {out}");
        assert!(!lower.contains("helped"), "got: {out}");
        let percent = Regex::new(r"\d+%").unwrap();
        assert!(percent.is_match(&out), "expected a satisfaction metric, got: {out}");
    }

    #[test]
    fn test_short_phrase_gets_strong_capitalized_start() {
        let input = "Handled customer complaints";
        let out = RuleBasedEnhancer.enhance_text(input, &ctx());
        assert!(!out.is_empty());
        assert_ne!(out, input);
        assert!(out.starts_with("Managed"), "got: {out}");
        assert!(starts_with_strong_verb(&out));
    }

    #[test]
    fn test_output_starts_uppercase_for_varied_inputs() {
        let inputs = [
            "worked on the billing system",
            "we did a lot of stuff for the team",
            "customer complaints",
            "x",
            "really big project for the company",
            "\"helped customers with returns\"",
            "(worked on the billing system)",
            "- did inventory counts",
            "• helped the team",
            "'really big project'",
        ];
        for input in inputs {
            let out = RuleBasedEnhancer.enhance_text(input, &ctx());
            assert!(!out.is_empty(), "empty output for {input:?}");
            assert!(
                out.chars().next().unwrap().is_uppercase(),
                "{input:?} -> {out:?}"
            );
        }
    }

    #[test]
    fn test_quoted_input_is_unwrapped_before_rewriting() {
        let out = RuleBasedEnhancer.enhance_text("\"helped customers with returns\"", &ctx());
        assert!(out.starts_with("Assisted customers with returns"), "got: {out}");
        assert!(!out.contains('"'), "got: {out}");
        assert_eq!(strip_wrapping("(fixed the printer)"), "fixed the printer");
        assert_eq!(strip_wrapping("•  led audits."), "led audits.");
    }

    #[test]
    fn test_quantified_text_gets_no_metric_clause() {
        let input = "Resolved 40 tickets per day for enterprise customers";
        let out = RuleBasedEnhancer.enhance_text(input, &ctx());
        assert_eq!(metric_clause_count(&out), metric_clause_count(input));
        assert_eq!(metric_clause_count(&out), 0, "got: {out}");
    }

    #[test]
    fn test_reenhancing_does_not_stack_metrics() {
        let once = RuleBasedEnhancer.enhance_text("Handled customer complaints", &ctx());
        let twice = RuleBasedEnhancer.enhance_text(&once, &ctx());
        assert_eq!(metric_clause_count(&once), 1);
        assert_eq!(metric_clause_count(&twice), 1, "got: {twice}");
        assert_eq!(twice.matches("95%").count(), 1);
    }

    #[test]
    fn test_casual_language_cleanup() {
        let out = RuleBasedEnhancer.enhance_text("Organized a lot of stuff for events", &ctx());
        assert!(out.contains("numerous materials"), "got: {out}");
    }

    #[test]
    fn test_prepends_verb_by_keyword() {
        let out = RuleBasedEnhancer.enhance_text("the new onboarding process", &ctx());
        assert!(out.starts_with("Optimized the new onboarding process"), "got: {out}");

        let out = RuleBasedEnhancer.enhance_text("people across three offices", &ctx());
        assert!(out.starts_with("Collaborated with people"), "got: {out}");

        let out = RuleBasedEnhancer.enhance_text("quarterly inventory audits", &ctx());
        assert!(out.starts_with("Executed quarterly"), "got: {out}");
    }

    #[test]
    fn test_summary_polish_by_level_and_once_only() {
        let context = EnhancementContext {
            content_type: ContentType::Summary,
            role_level: Some(RoleLevel::Senior),
            industry: Some(Industry::Finance),
            experience_level: Some("8 years".to_string()),
            ..Default::default()
        };
        let once = RuleBasedEnhancer.enhance_text("Managed client portfolios", &context);
        assert!(
            once.contains("Recognized as a seasoned finance professional with 8 years of experience."),
            "got: {once}"
        );
        let twice = RuleBasedEnhancer.enhance_text(&once, &context);
        assert_eq!(twice.matches("Recognized as").count(), 1, "got: {twice}");
    }

    #[test]
    fn test_achievement_polish() {
        let context = EnhancementContext {
            content_type: ContentType::Achievement,
            role_level: Some(RoleLevel::Entry),
            ..Default::default()
        };
        let out = RuleBasedEnhancer.enhance_text("Won the regional hackathon.", &context);
        assert!(
            out.ends_with("demonstrating strong initiative and eagerness to learn."),
            "got: {out}"
        );
    }

    #[test]
    fn test_whitespace_only_input_returns_empty() {
        assert_eq!(RuleBasedEnhancer.enhance_text("   ", &ctx()), "");
    }

    #[test]
    fn test_append_clause_keeps_period() {
        assert_eq!(append_clause("Did it.", ", fast"), "Did it, fast.");
        assert_eq!(append_clause("Did it", ", fast"), "Did it, fast");
    }

    #[test]
    fn test_lowercase_first_preserves_acronyms() {
        assert_eq!(lowercase_first("AWS migration"), "AWS migration");
        assert_eq!(lowercase_first("Customer calls"), "customer calls");
    }
}
