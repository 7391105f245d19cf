//! Axum route handlers for the Enhancement API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::enhancement::ai_manager::ServiceStatus;
use crate::enhancement::context::{ContentType, EnhancementContext, Industry, RoleLevel};
use crate::enhancement::engine::{EnhancementEngine, EnhancementResult, EnhancementSource};
use crate::enhancement::keyword_bank::{KeywordBank, KeywordImprovements, DEFAULT_INDUSTRY};
use crate::enhancement::rule_based::RuleBasedEnhancer;
use crate::errors::{AppError, AppJson};
use crate::llm_client::LlmError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceMode {
    Search,
    Quantify,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub text: String,
    pub industry: Option<String>,
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub mode: Option<EnhanceMode>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EnhanceResponse {
    #[serde(rename_all = "camelCase")]
    Enhanced {
        enhanced: String,
        improvements: KeywordImprovements,
        suggestions: Vec<String>,
        quantification_options: BTreeMap<&'static str, Vec<String>>,
        detected_industry: Industry,
    },
    Search {
        results: Vec<String>,
    },
    Quantify {
        suggestions: BTreeMap<&'static str, Vec<String>>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullEnhanceRequest {
    pub text: String,
    pub industry: Option<String>,
    pub role_level: Option<String>,
    #[serde(default)]
    pub context: EnhancementContext,
}

#[derive(Debug, Deserialize)]
pub struct AiEnhanceRequest {
    pub text: String,
    #[serde(default)]
    pub context: EnhancementContext,
}

#[derive(Debug, Serialize)]
pub struct AiEnhanceResponse {
    pub original: String,
    pub enhanced: String,
    pub context: EnhancementContext,
    pub source: EnhancementSource,
}

#[derive(Debug, Deserialize)]
pub struct BatchEnhanceRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub context: EnhancementContext,
}

#[derive(Debug, Serialize)]
pub struct EnhancedItem {
    pub original: String,
    pub enhanced: String,
}

#[derive(Debug, Serialize)]
pub struct BatchEnhanceResponse {
    pub results: Vec<EnhancedItem>,
    pub source: EnhancementSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsRequest {
    pub job_title: String,
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub source: EnhancementSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummaryRequest {
    pub job_title: String,
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CareerSummaryResponse {
    pub summary: String,
    pub source: EnhancementSource,
}

#[derive(Debug, Serialize)]
pub struct AiStatusResponse {
    pub available: bool,
    pub services: BTreeMap<String, ServiceStatus>,
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Unavailable backends degrade to rule-based output; auth, quota and other
/// failures are returned to the caller.
fn degrade<T>(result: Result<T, LlmError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_unavailable() => {
            warn!("AI backend unavailable, falling back to rule-based output: {e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn industry_label(raw: Option<&str>) -> String {
    raw.and_then(Industry::parse)
        .map(|i| i.label().to_string())
        .or_else(|| raw.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()))
        .unwrap_or_else(|| "general professional roles".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/enhance
///
/// Keyword-bank enhancement. `type: "search"` searches the industry dictionary,
/// `type: "quantify"` returns metric fill-ins; otherwise the text is rewritten.
pub async fn handle_enhance(
    AppJson(request): AppJson<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    require_text("text", &request.text)?;

    let bank = KeywordBank;
    let detected = bank.detect_industry(&request.text);
    let industry = request
        .industry
        .as_deref()
        .and_then(Industry::parse)
        .unwrap_or(detected);

    let response = match request.mode {
        Some(EnhanceMode::Search) => EnhanceResponse::Search {
            results: bank.search_keywords(&request.text, industry),
        },
        Some(EnhanceMode::Quantify) => EnhanceResponse::Quantify {
            suggestions: bank.get_quantification_suggestions(industry, &request.text),
        },
        None => {
            let level = RoleLevel::parse_or_default(request.level.as_deref());
            let enhancement = bank.enhance_text(&request.text, industry, level);
            EnhanceResponse::Enhanced {
                enhanced: enhancement.enhanced,
                improvements: enhancement.improvements,
                suggestions: enhancement.suggestions,
                quantification_options: bank
                    .get_quantification_suggestions(industry, &request.text),
                detected_industry: detected,
            }
        }
    };

    Ok(Json(response))
}

/// POST /api/v1/enhance/full
///
/// Full engine pipeline: enhanced text, alternatives, quantification
/// suggestions and confidence. Never fails on backend errors.
pub async fn handle_enhance_full(
    State(state): State<AppState>,
    AppJson(request): AppJson<FullEnhanceRequest>,
) -> Result<Json<EnhancementResult>, AppError> {
    require_text("text", &request.text)?;

    let industry = request
        .industry
        .as_deref()
        .and_then(Industry::parse)
        .or(request.context.industry);
    let role_level = request
        .role_level
        .as_deref()
        .and_then(RoleLevel::parse)
        .unwrap_or_else(|| request.context.role_level_or_default());

    let result = EnhancementEngine::new(&state.ai)
        .enhance(&request.text, industry, role_level, &request.context)
        .await;

    Ok(Json(result))
}

/// POST /api/v1/ai-enhance
///
/// Backend enhancement of one text. Falls back to the rule-based enhancer when
/// no backend is reachable; auth (401) and quota (402) failures are reported.
pub async fn handle_ai_enhance(
    State(state): State<AppState>,
    AppJson(request): AppJson<AiEnhanceRequest>,
) -> Result<Json<AiEnhanceResponse>, AppError> {
    require_text("text", &request.text)?;

    let (enhanced, source) =
        match degrade(state.ai.enhance_text(&request.text, &request.context).await)? {
            Some(text) => (text, EnhancementSource::Ai),
            None => (
                RuleBasedEnhancer.enhance_text(&request.text, &request.context),
                EnhancementSource::RuleBased,
            ),
        };

    Ok(Json(AiEnhanceResponse {
        original: request.text,
        enhanced,
        context: request.context,
        source,
    }))
}

/// POST /api/v1/ai-enhance/batch
///
/// Enhances a list of texts in order; results line up with the input.
pub async fn handle_ai_enhance_batch(
    State(state): State<AppState>,
    AppJson(request): AppJson<BatchEnhanceRequest>,
) -> Result<Json<BatchEnhanceResponse>, AppError> {
    if request.texts.is_empty() {
        return Err(AppError::Validation("texts cannot be empty".to_string()));
    }
    if let Some(index) = request.texts.iter().position(|t| t.trim().is_empty()) {
        return Err(AppError::Validation(format!("texts[{index}] cannot be empty")));
    }

    let (enhanced, source) = match degrade(
        state
            .ai
            .enhance_multiple_texts(&request.texts, &request.context)
            .await,
    )? {
        Some(texts) => (texts, EnhancementSource::Ai),
        None => (
            request
                .texts
                .iter()
                .map(|t| RuleBasedEnhancer.enhance_text(t, &request.context))
                .collect(),
            EnhancementSource::RuleBased,
        ),
    };

    let results = request
        .texts
        .into_iter()
        .zip(enhanced)
        .map(|(original, enhanced)| EnhancedItem { original, enhanced })
        .collect();

    Ok(Json(BatchEnhanceResponse { results, source }))
}

/// POST /api/v1/ai/skills
///
/// Up to 10 skills for a job title. Without a backend the industry keyword
/// dictionary is used instead.
pub async fn handle_skill_suggestions(
    State(state): State<AppState>,
    AppJson(request): AppJson<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    require_text("jobTitle", &request.job_title)?;

    let industry = industry_label(request.industry.as_deref());
    let response = match degrade(
        state
            .ai
            .generate_skill_suggestions(&request.job_title, &industry)
            .await,
    )? {
        Some(skills) => SkillsResponse {
            skills,
            source: EnhancementSource::Ai,
        },
        None => {
            let bank = KeywordBank;
            let fallback = Industry::parse_or(request.industry.as_deref(), DEFAULT_INDUSTRY);
            SkillsResponse {
                skills: bank
                    .keywords(fallback)
                    .iter()
                    .take(10)
                    .map(|s| s.to_string())
                    .collect(),
                source: EnhancementSource::RuleBased,
            }
        }
    };

    Ok(Json(response))
}

/// POST /api/v1/ai/career-summary
pub async fn handle_career_summary(
    State(state): State<AppState>,
    AppJson(request): AppJson<CareerSummaryRequest>,
) -> Result<Json<CareerSummaryResponse>, AppError> {
    require_text("jobTitle", &request.job_title)?;

    let industry = industry_label(request.industry.as_deref());
    let response = match degrade(
        state
            .ai
            .generate_career_summary(&request.job_title, request.years, &request.skills, &industry)
            .await,
    )? {
        Some(summary) => CareerSummaryResponse {
            summary,
            source: EnhancementSource::Ai,
        },
        None => {
            let draft = template_summary(&request.job_title, request.years, &request.skills);
            let context = EnhancementContext {
                industry: request.industry.as_deref().and_then(Industry::parse),
                content_type: ContentType::Summary,
                experience_level: (request.years > 0).then(|| format!("{} years", request.years)),
                ..Default::default()
            };
            CareerSummaryResponse {
                summary: RuleBasedEnhancer.enhance_text(&draft, &context),
                source: EnhancementSource::RuleBased,
            }
        }
    };

    Ok(Json(response))
}

fn template_summary(job_title: &str, years: u32, skills: &[String]) -> String {
    let mut summary = match years {
        0 => format!("Delivered results as a {}", job_title.trim()),
        1 => format!("Delivered 1 year of results as a {}", job_title.trim()),
        n => format!("Delivered {n} years of results as a {}", job_title.trim()),
    };
    let top: Vec<&str> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(3)
        .collect();
    if !top.is_empty() {
        summary.push_str(&format!(", skilled in {}", top.join(", ")));
    }
    summary.push('.');
    summary
}

/// GET /api/v1/ai/status
///
/// Probes every configured backend. Not used by enhancement requests.
pub async fn handle_ai_status(State(state): State<AppState>) -> Json<AiStatusResponse> {
    Json(AiStatusResponse {
        available: state.ai.is_available(),
        services: state.ai.test_services().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrade_passes_unavailable_through_as_none() {
        let result: Result<Option<String>, AppError> = degrade(Err(LlmError::Unavailable));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_degrade_keeps_quota_and_auth_errors() {
        let quota = degrade::<String>(Err(LlmError::QuotaExceeded("balance".to_string())));
        assert!(matches!(quota, Err(AppError::BackendQuota(_))));
        let auth = degrade::<String>(Err(LlmError::Auth("key".to_string())));
        assert!(matches!(auth, Err(AppError::BackendAuth(_))));
    }

    #[test]
    fn test_template_summary_lists_top_three_skills() {
        let skills = vec![
            "Rust".to_string(),
            " ".to_string(),
            "SQL".to_string(),
            "Docker".to_string(),
            "Kafka".to_string(),
        ];
        assert_eq!(
            template_summary("Backend Engineer", 5, &skills),
            "Delivered 5 years of results as a Backend Engineer, skilled in Rust, SQL, Docker."
        );
    }

    #[test]
    fn test_industry_label_prefers_known_industries() {
        assert_eq!(industry_label(Some("customer-service")), "customer service");
        assert_eq!(industry_label(Some("Aerospace")), "Aerospace");
        assert_eq!(industry_label(None), "general professional roles");
    }

    #[test]
    fn test_enhance_request_reads_type_field() {
        let request: EnhanceRequest =
            serde_json::from_str(r#"{"text":"customer service","type":"search"}"#).unwrap();
        assert_eq!(request.mode, Some(EnhanceMode::Search));
    }
}
