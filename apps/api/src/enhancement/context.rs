//! Typed request vocabulary shared by every enhancer: industry keys, role levels,
//! content types and the per-call `EnhancementContext`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Normalized industry bucket used to pick keywords and realistic metric ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    SoftwareEngineering,
    Sales,
    Marketing,
    CustomerService,
    ProjectManagement,
    Finance,
    Healthcare,
    Education,
    Retail,
}

impl Industry {
    pub const ALL: [Industry; 9] = [
        Industry::SoftwareEngineering,
        Industry::Sales,
        Industry::Marketing,
        Industry::CustomerService,
        Industry::ProjectManagement,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Education,
        Industry::Retail,
    ];

    /// Lenient parse: accepts snake_case keys, hyphenated or spaced labels and
    /// a handful of common aliases. Returns None for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Industry> {
        let key = raw
            .trim()
            .to_lowercase()
            .replace(['-', ' ', '/'], "_");

        let industry = match key.as_str() {
            "software_engineering" | "software" | "tech" | "technology" | "engineering"
            | "it" | "information_technology" | "software_development" => {
                Industry::SoftwareEngineering
            }
            "sales" | "business_development" => Industry::Sales,
            "marketing" | "digital_marketing" => Industry::Marketing,
            "customer_service" | "customer_support" | "support" | "customer_success" => {
                Industry::CustomerService
            }
            "project_management" | "operations" | "management" => Industry::ProjectManagement,
            "finance" | "accounting" | "banking" => Industry::Finance,
            "healthcare" | "health" | "medical" | "nursing" => Industry::Healthcare,
            "education" | "teaching" | "academia" => Industry::Education,
            "retail" | "hospitality" => Industry::Retail,
            _ => return None,
        };
        Some(industry)
    }

    /// Parses an optional raw key, falling back to `default` when absent or unknown.
    pub fn parse_or(raw: Option<&str>, default: Industry) -> Industry {
        raw.and_then(Industry::parse).unwrap_or(default)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Industry::SoftwareEngineering => "software_engineering",
            Industry::Sales => "sales",
            Industry::Marketing => "marketing",
            Industry::CustomerService => "customer_service",
            Industry::ProjectManagement => "project_management",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Education => "education",
            Industry::Retail => "retail",
        }
    }

    /// Human-readable label for prompts and polish phrases.
    pub fn label(&self) -> &'static str {
        match self {
            Industry::SoftwareEngineering => "software engineering",
            Industry::Sales => "sales",
            Industry::Marketing => "marketing",
            Industry::CustomerService => "customer service",
            Industry::ProjectManagement => "project management",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Education => "education",
            Industry::Retail => "retail",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Industry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Industry::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown industry '{raw}'")))
    }
}

/// Seniority bucket. Scales metric magnitudes and verb strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Executive,
}

impl RoleLevel {
    /// Lenient parse of UI labels like "mid-level", "entry level", "junior", "vp".
    pub fn parse(raw: &str) -> Option<RoleLevel> {
        let key = raw.trim().to_lowercase().replace(['_', ' '], "-");
        let key = key.strip_suffix("-level").unwrap_or(key.as_str());

        let level = match key {
            "entry" | "junior" | "intern" | "graduate" | "associate" => RoleLevel::Entry,
            "mid" | "intermediate" | "experienced" => RoleLevel::Mid,
            "senior" | "lead" | "principal" | "staff" | "manager" => RoleLevel::Senior,
            "executive" | "director" | "vp" | "c" | "c-suite" | "head" => RoleLevel::Executive,
            _ => return None,
        };
        Some(level)
    }

    pub fn parse_or_default(raw: Option<&str>) -> RoleLevel {
        raw.and_then(RoleLevel::parse).unwrap_or_default()
    }

    pub fn key(&self) -> &'static str {
        match self {
            RoleLevel::Entry => "entry",
            RoleLevel::Mid => "mid",
            RoleLevel::Senior => "senior",
            RoleLevel::Executive => "executive",
        }
    }
}

impl<'de> Deserialize<'de> for RoleLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RoleLevel::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role level '{raw}'")))
    }
}

/// What kind of resume text is being enhanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Bullet,
    Summary,
    Achievement,
    CoverLetter,
}

/// Per-call options recognized by the enhancers. Unknown JSON fields are rejected
/// so a misspelled option fails loudly instead of being ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EnhancementContext {
    pub industry: Option<Industry>,
    pub role_level: Option<RoleLevel>,
    pub content_type: ContentType,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    /// Free-form experience description, e.g. "5 years".
    pub experience_level: Option<String>,
    pub bulk_mode: bool,
    pub item_index: Option<usize>,
    pub total_items: Option<usize>,
}

impl EnhancementContext {
    pub fn role_level_or_default(&self) -> RoleLevel {
        self.role_level.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_parse_accepts_hyphenated_labels() {
        assert_eq!(
            Industry::parse("customer-service"),
            Some(Industry::CustomerService)
        );
        assert_eq!(
            Industry::parse("Software Engineering"),
            Some(Industry::SoftwareEngineering)
        );
        assert_eq!(Industry::parse("tech"), Some(Industry::SoftwareEngineering));
    }

    #[test]
    fn test_industry_parse_unknown_is_none() {
        assert_eq!(Industry::parse("underwater basket weaving"), None);
        assert_eq!(
            Industry::parse_or(Some("nope"), Industry::ProjectManagement),
            Industry::ProjectManagement
        );
    }

    #[test]
    fn test_role_level_parse_variants() {
        assert_eq!(RoleLevel::parse("mid-level"), Some(RoleLevel::Mid));
        assert_eq!(RoleLevel::parse("Entry Level"), Some(RoleLevel::Entry));
        assert_eq!(RoleLevel::parse("junior"), Some(RoleLevel::Entry));
        assert_eq!(RoleLevel::parse("senior"), Some(RoleLevel::Senior));
        assert_eq!(RoleLevel::parse("VP"), Some(RoleLevel::Executive));
        assert_eq!(RoleLevel::parse("wizard"), None);
    }

    #[test]
    fn test_role_level_defaults_to_mid() {
        assert_eq!(RoleLevel::parse_or_default(None), RoleLevel::Mid);
        assert_eq!(RoleLevel::parse_or_default(Some("???")), RoleLevel::Mid);
    }

    #[test]
    fn test_context_deserializes_camel_case_with_defaults() {
        let json = r#"{"industry": "customer-service", "roleLevel": "senior", "bulkMode": true}"#;
        let ctx: EnhancementContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.industry, Some(Industry::CustomerService));
        assert_eq!(ctx.role_level, Some(RoleLevel::Senior));
        assert!(ctx.bulk_mode);
        assert_eq!(ctx.content_type, ContentType::Bullet);
        assert!(ctx.job_title.is_none());
    }

    #[test]
    fn test_context_rejects_misspelled_fields() {
        let json = r#"{"industy": "sales"}"#;
        let result: Result<EnhancementContext, _> = serde_json::from_str(json);
        assert!(result.is_err(), "typo'd field must not be silently ignored");
    }

    #[test]
    fn test_content_type_snake_case() {
        let ct: ContentType = serde_json::from_str(r#""cover_letter""#).unwrap();
        assert_eq!(ct, ContentType::CoverLetter);
    }
}
