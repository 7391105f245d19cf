//! Metric detection shared by every enhancer.
//!
//! `has_quantification` gates metric insertion: text that already carries a number
//! of the recognized shapes never gets another metric clause appended.

use once_cell::sync::Lazy;
use regex::Regex;

/// One pattern per recognized metric shape.
static QUANTIFICATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // percentage
        r"\d+(?:\.\d+)?\s*%",
        // "N+"
        r"\b\d[\d,]*\+",
        // dollar amount
        r"\$\s?\d[\d,]*(?:\.\d+)?\s*(?:[kmb]\b|million|billion)?",
        // time period
        r"(?i)\b\d+\s*(?:hours?|days?|weeks?|months?|years?|quarters?)\b",
        // quantity of people
        r"(?i)\b\d[\d,]*\s*(?:people|persons?|members?|employees|staff|engineers|customers|clients|users|students|patients|team members|reports)\b",
        // quantity of work items
        r"(?i)\b\d[\d,]*\s*(?:projects?|tasks?|tickets?|cases?|orders?|accounts?|calls?|requests?|items?|transactions?|campaigns?|deals?|jobs?)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("quantification pattern is valid"))
    .collect()
});

/// A single numeric token: optional currency sign, digits with separators,
/// optional decimal part and an optional %, + or magnitude suffix.
static METRIC_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$?\d[\d,]*(?:\.\d+)?(?:%|\+|[kmb]\b)?").expect("metric token pattern is valid")
});

/// Returns true if the text already contains a percentage, "N+", dollar amount,
/// time period, head count or work-item count.
pub fn has_quantification(text: &str) -> bool {
    QUANTIFICATION_PATTERNS.iter().any(|re| re.is_match(text))
}

/// All numeric/metric tokens in order of appearance, e.g. `["95%", "$50K", "10+"]`.
pub fn metric_tokens(text: &str) -> Vec<String> {
    METRIC_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(',').to_string())
        .collect()
}

/// Metric tokens present in `after` but not in `before`, first `limit` only.
pub fn added_metric_tokens(before: &str, after: &str, limit: usize) -> Vec<String> {
    let existing = metric_tokens(before);
    let mut added: Vec<String> = Vec::new();
    for token in metric_tokens(after) {
        if !existing.contains(&token) && !added.contains(&token) {
            added.push(token);
        }
        if added.len() == limit {
            break;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_percentage() {
        assert!(has_quantification("Reduced churn by 12%"));
        assert!(has_quantification("Improved uptime to 99.9 %"));
    }

    #[test]
    fn test_detects_n_plus() {
        assert!(has_quantification("Mentored 10+ junior developers"));
    }

    #[test]
    fn test_detects_dollar_amounts() {
        assert!(has_quantification("Closed $1.2M in new business"));
        assert!(has_quantification("Saved $50K annually"));
    }

    #[test]
    fn test_detects_time_periods() {
        assert!(has_quantification("Delivered the migration in 3 months"));
    }

    #[test]
    fn test_detects_people_and_work_items() {
        assert!(has_quantification("Supervised 12 staff"));
        assert!(has_quantification("Resolved 40 tickets per day"));
    }

    #[test]
    fn test_plain_text_is_not_quantified() {
        assert!(!has_quantification("Handled customer complaints"));
        assert!(!has_quantification("Worked on the billing system"));
    }

    #[test]
    fn test_metric_tokens_in_order() {
        let tokens = metric_tokens("Grew revenue 25% to $3M across 40+ accounts");
        assert_eq!(tokens, vec!["25%", "$3M", "40+"]);
    }

    #[test]
    fn test_added_metric_tokens_skips_existing() {
        let added = added_metric_tokens(
            "Cut costs by 10%",
            "Cut costs by 10%, saving $20K and 15 hours weekly",
            2,
        );
        assert_eq!(added, vec!["$20K", "15"]);
    }
}
