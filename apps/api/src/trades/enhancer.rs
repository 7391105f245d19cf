//! Trades enhancer — rule-based rewriting for skilled-trade work descriptions.
//!
//! Pipeline: customer-interaction rewrite (once), customer → client wording,
//! weak → trade verb, then at most one specialty clause. Every step is guarded
//! so running the enhancer on its own output changes nothing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::enhancement::rule_based::{
    append_clause, apply_phrase_table, capitalize_first, compile_phrase_table, tidy,
};

const CLIENT_SERVICE_PHRASE: &str = "provided professional service to clients";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trade {
    Plumbing,
    Hvac,
    Electrical,
    Construction,
}

impl Trade {
    pub const ALL: [Trade; 4] = [
        Trade::Plumbing,
        Trade::Hvac,
        Trade::Electrical,
        Trade::Construction,
    ];

    /// Accepts trade keys and common job names ("plumber", "electrician", "heating" …).
    pub fn parse(raw: &str) -> Option<Trade> {
        let key = raw.trim().to_lowercase().replace(['-', '_'], " ");
        let trade = match key.as_str() {
            "plumbing" | "plumber" | "pipefitter" | "pipefitting" => Trade::Plumbing,
            "hvac" | "heating" | "cooling" | "air conditioning" | "refrigeration"
            | "hvac technician" => Trade::Hvac,
            "electrical" | "electrician" | "electric" | "lineman" => Trade::Electrical,
            "construction" | "carpentry" | "carpenter" | "general contractor" | "contractor"
            | "builder" | "laborer" => Trade::Construction,
            _ => return None,
        };
        Some(trade)
    }

    /// Unknown or absent trades use the construction tables.
    pub fn parse_or_default(raw: Option<&str>) -> Trade {
        raw.and_then(Trade::parse).unwrap_or(Trade::Construction)
    }
}

/// Realistic values substituted into a trade's metric templates.
#[derive(Debug)]
pub struct MetricRanges {
    pub efficiency: &'static str,
    pub jobs: &'static str,
    pub savings: &'static str,
}

#[derive(Debug)]
pub struct TradeTemplate {
    pub verbs: &'static [(&'static str, &'static str)],
    pub skills: &'static [&'static str],
    pub certifications: &'static [&'static str],
    /// (topic words, template). Templates use `{efficiency}`, `{jobs}` and `{savings}`.
    pub metric_templates: &'static [(&'static [&'static str], &'static str)],
    pub ranges: MetricRanges,
    /// (trigger words, clause). Only the first matching specialty is applied.
    pub specialties: &'static [(&'static [&'static str], &'static str)],
}

static PLUMBING: TradeTemplate = TradeTemplate {
    verbs: &[
        ("fixed", "repaired"),
        ("put in", "installed"),
        ("checked", "inspected"),
        ("cleaned out", "cleared"),
        ("worked on", "serviced"),
        ("helped", "assisted"),
        ("did", "performed"),
    ],
    skills: &[
        "Pipe fitting",
        "Leak detection",
        "Water heater installation",
        "Drain cleaning",
        "Backflow prevention",
        "Blueprint reading",
    ],
    certifications: &[
        "Journeyman Plumber License",
        "Master Plumber License",
        "Backflow Prevention Certification",
        "OSHA 10-Hour Construction",
    ],
    metric_templates: &[
        (&["repair", "fix", "leak"], "Maintained a {efficiency} first-time fix rate"),
        (&["call", "service", "job"], "Completed {jobs} service calls per week"),
        (&["water", "conserv", "efficien"], "Reduced client water usage by {savings}"),
    ],
    ranges: MetricRanges {
        efficiency: "95%",
        jobs: "15-20",
        savings: "20-30%",
    },
    specialties: &[
        (
            &["pipe", "piping"],
            ", specialized in residential and commercial plumbing systems",
        ),
        (
            &["water heater", "boiler"],
            ", including water heater and boiler installation",
        ),
    ],
};

static HVAC: TradeTemplate = TradeTemplate {
    verbs: &[
        ("fixed", "diagnosed and repaired"),
        ("put in", "installed"),
        ("checked", "inspected"),
        ("cleaned", "serviced"),
        ("worked on", "maintained"),
        ("helped", "assisted"),
        ("did", "performed"),
    ],
    skills: &[
        "Refrigerant handling",
        "System diagnostics",
        "Ductwork installation",
        "Preventive maintenance",
        "Thermostat and controls",
        "Load calculations",
    ],
    certifications: &[
        "EPA Section 608 Certification",
        "NATE Certification",
        "HVAC Excellence Certification",
        "OSHA 10-Hour Construction",
    ],
    metric_templates: &[
        (&["efficien", "energy", "system"], "Improved system energy efficiency by {efficiency}"),
        (&["call", "service", "maintenance"], "Serviced {jobs} residential and commercial units per week"),
        (&["cost", "bill", "saving"], "Lowered client energy costs by {savings}"),
    ],
    ranges: MetricRanges {
        efficiency: "15-25%",
        jobs: "10-15",
        savings: "10-20%",
    },
    specialties: &[(
        &["furnace", "air condition", "heat pump", "duct"],
        ", specializing in energy-efficient heating and cooling systems",
    )],
};

static ELECTRICAL: TradeTemplate = TradeTemplate {
    verbs: &[
        ("fixed", "troubleshot"),
        ("put in", "installed"),
        ("hooked up", "wired"),
        ("checked", "tested"),
        ("worked on", "serviced"),
        ("helped", "assisted"),
        ("did", "performed"),
    ],
    skills: &[
        "Wiring and circuitry",
        "Panel upgrades",
        "Troubleshooting",
        "NEC code compliance",
        "Conduit bending",
        "Lighting systems",
    ],
    certifications: &[
        "Journeyman Electrician License",
        "Master Electrician License",
        "NFPA 70E Electrical Safety",
        "OSHA 10-Hour Construction",
    ],
    metric_templates: &[
        (&["inspect", "code", "test"], "Passed {efficiency} of inspections on first review"),
        (&["install", "wire", "wiring", "job"], "Completed {jobs} installations per month"),
        (&["energy", "lighting", "cost"], "Cut client energy consumption by {savings}"),
    ],
    ranges: MetricRanges {
        efficiency: "98%",
        jobs: "20-30",
        savings: "15-25%",
    },
    specialties: &[(
        &["wire", "wiring", "panel", "circuit"],
        ", ensuring full compliance with National Electrical Code standards",
    )],
};

static CONSTRUCTION: TradeTemplate = TradeTemplate {
    verbs: &[
        ("built", "constructed"),
        ("made", "fabricated"),
        ("fixed", "repaired"),
        ("put up", "erected"),
        ("worked on", "executed"),
        ("helped", "supported"),
        ("did", "completed"),
    ],
    skills: &[
        "Framing",
        "Concrete work",
        "Blueprint reading",
        "Power tool operation",
        "Site safety",
        "Finish carpentry",
    ],
    certifications: &[
        "OSHA 30-Hour Construction",
        "First Aid/CPR",
        "Forklift Operator Certification",
        "NCCER Core Curriculum",
    ],
    metric_templates: &[
        (&["safety", "site"], "Maintained {efficiency} safety compliance across job sites"),
        (&["project", "build", "job"], "Delivered {jobs} projects on schedule"),
        (&["material", "waste", "budget", "cost"], "Reduced material waste by {savings}"),
    ],
    ranges: MetricRanges {
        efficiency: "100%",
        jobs: "10+",
        savings: "10-15%",
    },
    specialties: &[(
        &["frame", "framing", "concrete", "foundation", "drywall"],
        ", adhering to strict safety and quality standards",
    )],
};

pub fn trade_template(trade: Trade) -> &'static TradeTemplate {
    match trade {
        Trade::Plumbing => &PLUMBING,
        Trade::Hvac => &HVAC,
        Trade::Electrical => &ELECTRICAL,
        Trade::Construction => &CONSTRUCTION,
    }
}

static VERB_PATTERNS: Lazy<Vec<(Trade, Vec<(Regex, &'static str)>)>> = Lazy::new(|| {
    Trade::ALL
        .iter()
        .map(|t| (*t, compile_phrase_table(trade_template(*t).verbs)))
        .collect()
});

static CUSTOMER_INTERACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:helped|served|assisted|worked with|dealt with|took care of|talked to)\s+(?:the\s+|our\s+)?customers?\b",
    )
    .expect("customer interaction pattern is valid")
});

static CUSTOMER_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcustomer(s?)\b").expect("customer pattern is valid"));

/// "client"/"clients" cased like the matched word: all caps, leading capital or lowercase.
fn client_word(caps: &Captures) -> String {
    let matched = &caps[0];
    let word = if caps[1].is_empty() { "client" } else { "clients" };
    if matched.chars().all(|c| c.is_uppercase()) {
        word.to_uppercase()
    } else if matched.starts_with(char::is_uppercase) {
        capitalize_first(word)
    } else {
        word.to_string()
    }
}

fn verb_patterns(trade: Trade) -> &'static [(Regex, &'static str)] {
    VERB_PATTERNS
        .iter()
        .find(|(t, _)| *t == trade)
        .map(|(_, patterns)| patterns.as_slice())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeEnhancement {
    pub original: String,
    pub enhanced: String,
    pub improvements: Vec<String>,
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TradesEnhancer;

impl TradesEnhancer {
    /// Rewrites a trade work description. Unrecognized trade keys use construction.
    pub fn enhance_trade_description(&self, text: &str, trade: &str) -> TradeEnhancement {
        let trade = Trade::parse_or_default(Some(trade));
        let template = trade_template(trade);
        let original = text.trim();
        let mut improvements = Vec::new();

        let mut enhanced = original.to_string();
        if !enhanced.to_lowercase().contains(CLIENT_SERVICE_PHRASE)
            && CUSTOMER_INTERACTION.is_match(&enhanced)
        {
            enhanced = CUSTOMER_INTERACTION
                .replace(&enhanced, CLIENT_SERVICE_PHRASE)
                .into_owned();
            improvements.push("Reframed customer interaction as professional client service".to_string());
        }

        if CUSTOMER_WORD.is_match(&enhanced) {
            enhanced = CUSTOMER_WORD
                .replace_all(&enhanced, client_word)
                .into_owned();
            improvements.push("Used client-focused terminology".to_string());
        }

        let (rewritten, swaps) = apply_phrase_table(&enhanced, verb_patterns(trade));
        enhanced = rewritten;
        improvements.extend(swaps.into_iter().map(|s| format!("Strengthened verb: {s}")));

        let lower = enhanced.to_lowercase();
        let specialty = template.specialties.iter().find(|(triggers, clause)| {
            triggers.iter().any(|t| lower.contains(t))
                && !lower.contains(clause.trim_start_matches(", "))
        });
        let already_specialized = template
            .specialties
            .iter()
            .any(|(_, clause)| lower.contains(clause.trim_start_matches(", ")));
        if let (Some((_, clause)), false) = (specialty, already_specialized) {
            enhanced = append_clause(&enhanced, clause);
            improvements.push("Highlighted trade specialty".to_string());
        }

        TradeEnhancement {
            original: original.to_string(),
            enhanced: capitalize_first(&tidy(&enhanced)),
            improvements,
            metrics: self.generate_metrics_options(trade, original),
        }
    }

    /// Fills the trade's metric templates with its realistic ranges. Templates
    /// whose topic appears in `text` come first.
    pub fn generate_metrics_options(&self, trade: Trade, text: &str) -> Vec<String> {
        let template = trade_template(trade);
        let lower = text.to_lowercase();
        let (mut relevant, other): (Vec<_>, Vec<_>) = template
            .metric_templates
            .iter()
            .partition(|(topics, _)| topics.iter().any(|t| lower.contains(t)));
        relevant.extend(other);

        relevant
            .into_iter()
            .map(|(_, metric)| {
                metric
                    .replace("{efficiency}", template.ranges.efficiency)
                    .replace("{jobs}", template.ranges.jobs)
                    .replace("{savings}", template.ranges.savings)
            })
            .collect()
    }

    pub fn skills(&self, trade: Trade) -> &'static [&'static str] {
        trade_template(trade).skills
    }

    pub fn certifications(&self, trade: Trade) -> &'static [&'static str] {
        trade_template(trade).certifications
    }
}
