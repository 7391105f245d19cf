//! Keyword bank — static industry dictionaries, realistic metric defaults and a
//! level-aware rewrite entry point.
//!
//! Search is plain case-insensitive substring matching in dictionary order.
//! There is no ranking; the dictionaries are ordered by importance instead.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::enhancement::context::{Industry, RoleLevel};
use crate::enhancement::quantify::has_quantification;
use crate::enhancement::rule_based::{
    append_clause, capitalize_first, clean_casual_language, lowercase_first,
    starts_with_strong_verb, strip_leading_pronoun, tidy,
};

/// Fallback industry when a request names none or an unknown one.
pub const DEFAULT_INDUSTRY: Industry = Industry::ProjectManagement;

/// Industry keywords, most important first.
fn industry_keywords(industry: Industry) -> &'static [&'static str] {
    match industry {
        Industry::SoftwareEngineering => &[
            "software development",
            "agile",
            "scrum",
            "microservices",
            "cloud infrastructure",
            "AWS",
            "CI/CD",
            "REST APIs",
            "code review",
            "system design",
            "automated testing",
            "performance optimization",
            "scalability",
            "technical debt",
            "DevOps",
        ],
        Industry::Sales => &[
            "pipeline management",
            "quota attainment",
            "lead generation",
            "account management",
            "client relationships",
            "CRM",
            "Salesforce",
            "negotiation",
            "closing deals",
            "revenue growth",
            "prospecting",
            "territory management",
            "upselling",
            "B2B sales",
        ],
        Industry::Marketing => &[
            "digital marketing",
            "brand strategy",
            "content marketing",
            "SEO",
            "SEM",
            "social media",
            "campaign management",
            "marketing automation",
            "conversion rate optimization",
            "market research",
            "email marketing",
            "Google Analytics",
            "lead nurturing",
            "brand awareness",
        ],
        Industry::CustomerService => &[
            "customer service",
            "customer satisfaction",
            "customer retention",
            "client relations",
            "issue resolution",
            "conflict resolution",
            "first-call resolution",
            "escalation management",
            "ticket management",
            "CRM",
            "Zendesk",
            "net promoter score",
            "service excellence",
            "active listening",
            "customer experience",
        ],
        Industry::ProjectManagement => &[
            "project management",
            "stakeholder management",
            "cross-functional teams",
            "risk management",
            "budget management",
            "resource allocation",
            "timeline management",
            "agile",
            "waterfall",
            "PMP",
            "scope management",
            "vendor management",
            "process improvement",
            "change management",
        ],
        Industry::Finance => &[
            "financial analysis",
            "financial modeling",
            "forecasting",
            "budgeting",
            "variance analysis",
            "risk assessment",
            "GAAP",
            "financial reporting",
            "portfolio management",
            "cost reduction",
            "audit",
            "compliance",
            "Excel",
            "cash flow",
        ],
        Industry::Healthcare => &[
            "patient care",
            "patient safety",
            "clinical documentation",
            "HIPAA",
            "EHR",
            "care coordination",
            "treatment plans",
            "patient education",
            "infection control",
            "quality improvement",
            "medication administration",
            "patient outcomes",
            "interdisciplinary teams",
        ],
        Industry::Education => &[
            "curriculum development",
            "lesson planning",
            "classroom management",
            "differentiated instruction",
            "student engagement",
            "student assessment",
            "learning outcomes",
            "educational technology",
            "parent communication",
            "mentoring",
            "IEP",
            "student performance",
        ],
        Industry::Retail => &[
            "customer service",
            "visual merchandising",
            "inventory management",
            "point of sale",
            "loss prevention",
            "sales targets",
            "store operations",
            "upselling",
            "cash handling",
            "stock replenishment",
            "customer experience",
            "team scheduling",
        ],
    }
}

/// Realistic numeric ranges per industry, before role-level scaling.
#[derive(Debug, Clone)]
pub struct IndustryDefaults {
    pub industry: Industry,
    pub team_size: Option<(u32, u32)>,
    pub improvement_pct: Option<(u32, u32)>,
    pub satisfaction_pct: Option<u32>,
    /// Typical count of the people or items the work touches.
    pub volume: (u32, u32),
    pub volume_noun: &'static str,
    /// Typical budget or revenue scope, in thousands of dollars.
    pub money_scope_k: u32,
    pub cadence: &'static str,
    /// Metric clause with `{pct}`, `{volume}`, `{team}`, `{sat}`, `{money}` placeholders.
    pub clause_template: &'static str,
}

const INDUSTRY_DEFAULTS: &[IndustryDefaults] = &[
    IndustryDefaults {
        industry: Industry::SoftwareEngineering,
        team_size: Some((5, 8)),
        improvement_pct: Some((15, 25)),
        satisfaction_pct: None,
        volume: (10_000, 50_000),
        volume_noun: "users",
        money_scope_k: 200,
        cadence: "quarterly",
        clause_template: ", improving system performance by {pct}% for {volume}+ users",
    },
    IndustryDefaults {
        industry: Industry::Sales,
        team_size: None,
        improvement_pct: Some((20, 30)),
        satisfaction_pct: None,
        volume: (25, 50),
        volume_noun: "client accounts",
        money_scope_k: 500,
        cadence: "monthly",
        clause_template: ", increasing sales by {pct}% across {volume}+ client accounts",
    },
    IndustryDefaults {
        industry: Industry::Marketing,
        team_size: None,
        improvement_pct: Some((25, 40)),
        satisfaction_pct: None,
        volume: (50_000, 100_000),
        volume_noun: "prospects",
        money_scope_k: 250,
        cadence: "monthly",
        clause_template: ", boosting campaign engagement by {pct}% and reaching {volume}+ prospects",
    },
    IndustryDefaults {
        industry: Industry::CustomerService,
        team_size: None,
        improvement_pct: None,
        satisfaction_pct: Some(95),
        volume: (50, 80),
        volume_noun: "customer interactions",
        money_scope_k: 50,
        cadence: "daily",
        clause_template: ", maintaining {sat}% customer satisfaction across {volume}+ daily interactions",
    },
    IndustryDefaults {
        industry: Industry::ProjectManagement,
        team_size: Some((8, 15)),
        improvement_pct: None,
        satisfaction_pct: None,
        volume: (10, 20),
        volume_noun: "stakeholders",
        money_scope_k: 1_000,
        cadence: "project lifecycle",
        clause_template: ", leading {team}-member cross-functional teams to deliver a {money} portfolio on schedule",
    },
    IndustryDefaults {
        industry: Industry::Finance,
        team_size: None,
        improvement_pct: Some((8, 15)),
        satisfaction_pct: None,
        volume: (50, 200),
        volume_noun: "accounts",
        money_scope_k: 10_000,
        cadence: "quarterly",
        clause_template: ", managing a {money} portfolio and reducing costs by {pct}%",
    },
    IndustryDefaults {
        industry: Industry::Healthcare,
        team_size: None,
        improvement_pct: Some((20, 30)),
        satisfaction_pct: None,
        volume: (20, 40),
        volume_noun: "patients",
        money_scope_k: 100,
        cadence: "monthly",
        clause_template: ", caring for {volume}+ patients monthly and improving outcomes by {pct}%",
    },
    IndustryDefaults {
        industry: Industry::Education,
        team_size: None,
        improvement_pct: Some((15, 25)),
        satisfaction_pct: None,
        volume: (25, 150),
        volume_noun: "students",
        money_scope_k: 20,
        cadence: "semester",
        clause_template: ", teaching {volume}+ students per semester and raising performance by {pct}%",
    },
    IndustryDefaults {
        industry: Industry::Retail,
        team_size: Some((4, 10)),
        improvement_pct: Some((10, 20)),
        satisfaction_pct: None,
        volume: (100, 300),
        volume_noun: "customers",
        money_scope_k: 100,
        cadence: "weekly",
        clause_template: ", serving {volume}+ customers weekly and growing sales by {pct}%",
    },
];

/// Weak phrase → [entry, mid, senior, executive] replacement.
const LEVEL_VERB_REPLACEMENTS: &[(&str, [&str; 4])] = &[
    (
        "was responsible for",
        ["handled", "managed", "directed", "oversaw"],
    ),
    ("responsible for", ["handled", "managed", "directed", "oversaw"]),
    (
        "worked on",
        ["contributed to", "developed", "led development of", "directed"],
    ),
    (
        "worked with",
        [
            "collaborated with",
            "collaborated with",
            "partnered with",
            "forged partnerships with",
        ],
    ),
    ("helped", ["assisted", "assisted", "facilitated", "championed"]),
    ("handled", ["managed", "managed", "directed", "oversaw"]),
    ("did", ["completed", "executed", "executed", "orchestrated"]),
    ("made", ["created", "created", "designed", "pioneered"]),
    ("fixed", ["resolved", "resolved", "troubleshot", "remediated"]),
    ("used", ["utilized", "leveraged", "leveraged", "capitalized on"]),
    ("set up", ["established", "established", "architected", "instituted"]),
    ("ran", ["operated", "directed", "directed", "steered"]),
    ("improved", ["improved", "enhanced", "optimized", "transformed"]),
];

static LEVEL_VERB_PATTERNS: Lazy<Vec<(Regex, [&'static str; 4])>> = Lazy::new(|| {
    LEVEL_VERB_REPLACEMENTS
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(from));
            (
                Regex::new(&pattern).expect("escaped phrase is a valid pattern"),
                *to,
            )
        })
        .collect()
});

/// Opening verb prepended when a bullet lacks one.
fn level_lead_verb(level: RoleLevel) -> &'static str {
    match level {
        RoleLevel::Entry => "Supported",
        RoleLevel::Mid => "Delivered",
        RoleLevel::Senior => "Led",
        RoleLevel::Executive => "Directed",
    }
}

fn level_index(level: RoleLevel) -> usize {
    match level {
        RoleLevel::Entry => 0,
        RoleLevel::Mid => 1,
        RoleLevel::Senior => 2,
        RoleLevel::Executive => 3,
    }
}

/// Keywords that mark a category as relevant to the text.
const CATEGORY_TRIGGERS: &[(&str, &[&str])] = &[
    ("size", &["team", "staff", "people", "group", "employees", "members"]),
    (
        "volume",
        &["customer", "client", "user", "patient", "student", "account", "order"],
    ),
    (
        "percentage",
        &["improve", "increase", "reduce", "decrease", "grow", "boost", "efficien"],
    ),
    ("money", &["revenue", "budget", "cost", "sales", "saving", "profit"]),
    ("time", &["deadline", "time", "faster", "schedule", "turnaround"]),
    ("frequency", &["daily", "weekly", "monthly", "regular", "routine"]),
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordImprovements {
    /// "weak → strong" pairs, in the order they were applied.
    pub strengthened_verbs: Vec<String>,
    pub language_cleanups: Vec<String>,
    pub quantification_added: bool,
    pub strong_start_added: bool,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordEnhancement {
    pub enhanced: String,
    pub improvements: KeywordImprovements,
    pub suggestions: Vec<String>,
}

/// Static, read-only keyword and metric bank.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordBank;

impl KeywordBank {
    pub fn keywords(&self, industry: Industry) -> &'static [&'static str] {
        industry_keywords(industry)
    }

    pub fn defaults(&self, industry: Industry) -> &'static IndustryDefaults {
        INDUSTRY_DEFAULTS
            .iter()
            .find(|d| d.industry == industry)
            .unwrap_or(&INDUSTRY_DEFAULTS[4])
    }

    /// Case-insensitive substring search over one industry's dictionary.
    /// A keyword matches if it contains the whole query or any query word of 3+ letters.
    /// An empty query returns the whole dictionary.
    pub fn search_keywords(&self, query: &str, industry: Industry) -> Vec<String> {
        let query = query.trim().to_lowercase();
        let terms: Vec<&str> = query
            .split_whitespace()
            .filter(|t| t.chars().count() >= 3)
            .collect();

        industry_keywords(industry)
            .iter()
            .filter(|kw| {
                let kw_lower = kw.to_lowercase();
                query.is_empty()
                    || kw_lower.contains(&query)
                    || terms.iter().any(|t| kw_lower.contains(t))
            })
            .map(|kw| kw.to_string())
            .collect()
    }

    /// Picks the industry whose dictionary has the most hits in `text`.
    pub fn detect_industry(&self, text: &str) -> Industry {
        let lower = text.to_lowercase();
        let mut best = (DEFAULT_INDUSTRY, 0usize);
        for industry in Industry::ALL {
            let hits = industry_keywords(industry)
                .iter()
                .filter(|kw| lower.contains(&kw.to_lowercase()))
                .count();
            if hits > best.1 {
                best = (industry, hits);
            }
        }
        best.0
    }

    /// Candidate fill-ins per detected category, using the industry's mid-level ranges.
    /// With no trigger words the percentage and volume categories are offered.
    pub fn get_quantification_suggestions(
        &self,
        industry: Industry,
        text: &str,
    ) -> BTreeMap<&'static str, Vec<String>> {
        let lower = text.to_lowercase();
        let defaults = self.defaults(industry);

        let mut categories: Vec<&'static str> = CATEGORY_TRIGGERS
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
            .map(|(category, _)| *category)
            .collect();
        if categories.is_empty() {
            categories = vec!["percentage", "volume"];
        }

        categories
            .into_iter()
            .map(|category| (category, category_options(defaults, category)))
            .collect()
    }

    /// Level-aware rewrite: pronoun strip, casual cleanup, level-tailored verbs,
    /// an industry metric clause sized by level, and a strong opening verb.
    pub fn enhance_text(&self, text: &str, industry: Industry, level: RoleLevel) -> KeywordEnhancement {
        let defaults = self.defaults(industry);
        let original = text.trim();

        let without_pronoun = strip_leading_pronoun(original);
        let (cleaned, language_cleanups) = clean_casual_language(&without_pronoun);
        let (mut enhanced, strengthened_verbs) = apply_level_verbs(&cleaned, level);

        let quantification_added = !enhanced.is_empty() && !has_quantification(&enhanced);
        if quantification_added {
            enhanced = append_clause(&enhanced, &metric_clause(defaults, level));
        }

        let strong_start_added = !enhanced.is_empty() && !starts_with_strong_verb(&enhanced);
        if strong_start_added {
            enhanced = format!("{} {}", level_lead_verb(level), lowercase_first(&enhanced));
        }
        let enhanced = capitalize_first(&tidy(&enhanced));

        let keyword_present = industry_keywords(industry)
            .iter()
            .any(|kw| enhanced.to_lowercase().contains(&kw.to_lowercase()));

        let mut confidence = 0.5_f32;
        confidence += 0.1 * strengthened_verbs.len().min(2) as f32;
        if !language_cleanups.is_empty() {
            confidence += 0.05;
        }
        if quantification_added {
            confidence += 0.15;
        }
        if strong_start_added {
            confidence += 0.05;
        }
        if keyword_present {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 0.95);

        let suggestions = self.writing_suggestions(original, &enhanced, industry);

        KeywordEnhancement {
            enhanced,
            improvements: KeywordImprovements {
                strengthened_verbs,
                language_cleanups,
                quantification_added,
                strong_start_added,
                confidence,
            },
            suggestions,
        }
    }

    fn writing_suggestions(&self, original: &str, enhanced: &str, industry: Industry) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !has_quantification(original) {
            suggestions.push(
                "Add a specific number, percentage or timeframe to show the scale of your impact."
                    .to_string(),
            );
        }

        if original.split_whitespace().count() < 6 {
            suggestions.push(
                "Expand this bullet with the context and the result of your work.".to_string(),
            );
        }

        let lower = enhanced.to_lowercase();
        let missing: Vec<&str> = industry_keywords(industry)
            .iter()
            .filter(|kw| !lower.contains(&kw.to_lowercase()))
            .take(3)
            .copied()
            .collect();
        if !missing.is_empty() {
            suggestions.push(format!(
                "Consider mentioning relevant {} keywords: {}.",
                industry.label(),
                missing.join(", ")
            ));
        }

        suggestions
    }
}

fn apply_level_verbs(text: &str, level: RoleLevel) -> (String, Vec<String>) {
    let idx = level_index(level);
    let mut out = text.to_string();
    let mut changed = Vec::new();

    for (re, variants) in LEVEL_VERB_PATTERNS.iter() {
        let replacement = variants[idx];
        if let Some(m) = re.find(&out) {
            let matched = m.as_str().to_lowercase();
            if matched != replacement {
                changed.push(format!("{matched} → {replacement}"));
            }
            out = re
                .replace_all(&out, |caps: &Captures| {
                    if caps[0].starts_with(char::is_uppercase) {
                        capitalize_first(replacement)
                    } else {
                        replacement.to_string()
                    }
                })
                .into_owned();
        }
    }
    (out, changed)
}

/// Role-level multiplier for counts and budgets.
fn level_factor(level: RoleLevel) -> f64 {
    match level {
        RoleLevel::Entry => 0.5,
        RoleLevel::Mid => 1.0,
        RoleLevel::Senior => 2.0,
        RoleLevel::Executive => 5.0,
    }
}

/// Percentage within an industry range: low end for entry, above the range for executives.
fn level_pct((lo, hi): (u32, u32), level: RoleLevel) -> u32 {
    match level {
        RoleLevel::Entry => lo,
        RoleLevel::Mid => (lo + hi) / 2,
        RoleLevel::Senior => hi,
        RoleLevel::Executive => hi + (hi - lo) / 2,
    }
}

fn level_satisfaction(base: u32, level: RoleLevel) -> u32 {
    match level {
        RoleLevel::Entry => base - 3,
        RoleLevel::Mid => base,
        RoleLevel::Senior => (base + 2).min(99),
        RoleLevel::Executive => (base + 3).min(99),
    }
}

fn scale(n: u32, level: RoleLevel) -> u32 {
    ((n as f64) * level_factor(level)).round().max(1.0) as u32
}

fn metric_clause(defaults: &IndustryDefaults, level: RoleLevel) -> String {
    let pct = level_pct(defaults.improvement_pct.unwrap_or((10, 20)), level);
    let (team_lo, team_hi) = defaults.team_size.unwrap_or((3, 5));
    let team = format!("{}-{}", scale(team_lo, level), scale(team_hi, level));
    let sat = level_satisfaction(defaults.satisfaction_pct.unwrap_or(95), level);
    let volume = format_count(scale(defaults.volume.0, level));
    let money = format_money_k(scale(defaults.money_scope_k, level));

    defaults
        .clause_template
        .replace("{pct}", &pct.to_string())
        .replace("{team}", &team)
        .replace("{sat}", &sat.to_string())
        .replace("{volume}", &volume)
        .replace("{money}", &money)
}

fn category_options(defaults: &IndustryDefaults, category: &str) -> Vec<String> {
    match category {
        "size" => {
            let (lo, hi) = defaults.team_size.unwrap_or((3, 5));
            vec![
                format!("{lo}-{hi}"),
                format!("{hi}+"),
                format!("{}+", hi * 2),
            ]
        }
        "volume" => {
            let (lo, hi) = defaults.volume;
            [lo, (lo + hi) / 2, hi, hi * 2]
                .iter()
                .map(|n| format!("{}+ {}", format_count(*n), defaults.volume_noun))
                .collect()
        }
        "percentage" => match (defaults.satisfaction_pct, defaults.improvement_pct) {
            (Some(sat), _) => vec![
                format!("{}%", sat - 5),
                format!("{sat}%"),
                format!("{}%", (sat + 3).min(99)),
            ],
            (None, range) => {
                let (lo, hi) = range.unwrap_or((10, 20));
                vec![
                    format!("{lo}%"),
                    format!("{}%", (lo + hi) / 2),
                    format!("{hi}%"),
                    format!("{}%", hi + 10),
                ]
            }
        },
        "money" => {
            let base = defaults.money_scope_k;
            [base, base * 2, base * 5]
                .iter()
                .map(|k| format_money_k(*k))
                .collect()
        }
        "time" => ["2 weeks", "1 month", "3 months", "6 months"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        _ => {
            let mut options = vec![defaults.cadence.to_string()];
            for cadence in ["daily", "weekly", "monthly"] {
                if cadence != defaults.cadence {
                    options.push(cadence.to_string());
                }
            }
            options
        }
    }
}

/// 12500 → "12,500".
fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Thousands of dollars → "$250K" or "$1.5M".
fn format_money_k(k: u32) -> String {
    if k >= 1_000 {
        let millions = k as f64 / 1_000.0;
        if (millions.fract()).abs() < f64::EPSILON {
            format!("${}M", millions as u32)
        } else {
            format!("${millions:.1}M")
        }
    } else {
        format!("${k}K")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_customer_service_returns_dictionary_hits() {
        let industry = Industry::parse("customer-service").unwrap();
        let results = KeywordBank.search_keywords("customer service", industry);
        assert!(!results.is_empty());
        assert!(results.contains(&"customer service".to_string()));
        for r in &results {
            assert!(industry_keywords(Industry::CustomerService).contains(&r.as_str()));
        }
    }

    #[test]
    fn test_search_is_case_insensitive_and_in_dictionary_order() {
        let results = KeywordBank.search_keywords("AGILE", Industry::SoftwareEngineering);
        assert_eq!(results, vec!["agile".to_string()]);

        let results = KeywordBank.search_keywords("management", Industry::ProjectManagement);
        assert_eq!(results[0], "project management");
        assert_eq!(results[1], "stakeholder management");
    }

    #[test]
    fn test_search_without_match_is_empty() {
        assert!(KeywordBank
            .search_keywords("kubernetes", Industry::Healthcare)
            .is_empty());
    }

    #[test]
    fn test_every_industry_has_defaults_and_keywords() {
        for industry in Industry::ALL {
            assert_eq!(KeywordBank.defaults(industry).industry, industry);
            assert!(!KeywordBank.keywords(industry).is_empty());
        }
    }

    #[test]
    fn test_detect_industry() {
        assert_eq!(
            KeywordBank.detect_industry("Improved patient care and patient safety on a busy ward"),
            Industry::Healthcare
        );
        assert_eq!(
            KeywordBank.detect_industry("Did some stuff"),
            Industry::ProjectManagement
        );
    }

    #[test]
    fn test_quantification_suggestions_by_category() {
        let suggestions = KeywordBank.get_quantification_suggestions(
            Industry::SoftwareEngineering,
            "Led a team that improved the deployment pipeline",
        );
        assert_eq!(suggestions["size"], vec!["5-8", "8+", "16+"]);
        assert_eq!(suggestions["percentage"], vec!["15%", "20%", "25%", "35%"]);
        assert!(!suggestions.contains_key("frequency"));
    }

    #[test]
    fn test_quantification_suggestions_default_categories() {
        let suggestions =
            KeywordBank.get_quantification_suggestions(Industry::Education, "Wrote lesson plans");
        let keys: Vec<&str> = suggestions.keys().copied().collect();
        assert_eq!(keys, vec!["percentage", "volume"]);
        assert_eq!(suggestions["volume"][0], "25+ students");
    }

    #[test]
    fn test_customer_service_percentages_use_satisfaction() {
        let suggestions = KeywordBank
            .get_quantification_suggestions(Industry::CustomerService, "Improved response quality");
        assert_eq!(suggestions["percentage"], vec!["90%", "95%", "98%"]);
    }

    #[test]
    fn test_enhance_text_customer_service_mid_level() {
        let result = KeywordBank.enhance_text(
            "I helped customers at the store and handled their complaints",
            Industry::CustomerService,
            RoleLevel::Mid,
        );
        let lower = result.enhanced.to_lowercase();
        assert!(lower.contains("assisted"), "got: {}", result.enhanced);
        assert!(!lower.contains("helped"));
        assert!(result.enhanced.contains("95% customer satisfaction"), "got: {}", result.enhanced);
        assert!(result.improvements.quantification_added);
        assert!(result.improvements.confidence <= 0.95);
    }

    #[test]
    fn test_enhance_text_scales_with_level() {
        let entry = KeywordBank.enhance_text(
            "Worked on the checkout service",
            Industry::SoftwareEngineering,
            RoleLevel::Entry,
        );
        let executive = KeywordBank.enhance_text(
            "Worked on the checkout service",
            Industry::SoftwareEngineering,
            RoleLevel::Executive,
        );
        assert!(entry.enhanced.starts_with("Contributed to"), "got: {}", entry.enhanced);
        assert!(entry.enhanced.contains("15%"), "got: {}", entry.enhanced);
        assert!(entry.enhanced.contains("5,000+ users"), "got: {}", entry.enhanced);
        assert!(executive.enhanced.starts_with("Directed"), "got: {}", executive.enhanced);
        assert!(executive.enhanced.contains("30%"), "got: {}", executive.enhanced);
        assert!(executive.enhanced.contains("50,000+ users"), "got: {}", executive.enhanced);
    }

    #[test]
    fn test_enhance_text_keeps_existing_metrics() {
        let result = KeywordBank.enhance_text(
            "Managed a $2M budget across 12 projects",
            Industry::ProjectManagement,
            RoleLevel::Senior,
        );
        assert!(!result.improvements.quantification_added);
        assert_eq!(result.enhanced, "Managed a $2M budget across 12 projects");
    }

    #[test]
    fn test_enhance_text_suggests_missing_keywords() {
        let result = KeywordBank.enhance_text("Fixed bugs", Industry::SoftwareEngineering, RoleLevel::Mid);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.starts_with("Consider mentioning relevant software engineering keywords")));
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_count(12_500), "12,500");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_money_k(250), "$250K");
        assert_eq!(format_money_k(1_000), "$1M");
        assert_eq!(format_money_k(1_500), "$1.5M");
    }
}
