//! AI service manager — single point of indirection over the configured backends.
//!
//! Backend discovery happens once per process (`initialize`). Every public method
//! returns `Result<_, LlmError>`; this layer never swaps in rule-based output on
//! its own. Deciding on a fallback is the caller's job.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::enhancement::context::{ContentType, EnhancementContext};
use crate::enhancement::prompts::{
    CAREER_SUMMARY_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, ENHANCE_PROMPT_TEMPLATE,
    SKILLS_PROMPT_TEMPLATE,
};
use crate::enhancement::templates::industry_template;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM, PROBE_PROMPT};
use crate::llm_client::{strip_json_fences, AnthropicClient, LlmError, OpenAiClient, TextBackend};

/// Upper bound on skills returned by `generate_skill_suggestions`.
pub const MAX_SKILL_SUGGESTIONS: usize = 10;

/// Health of one backend as seen by `test_services`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub available: bool,
    pub model: String,
    pub latency_ms: u64,
    pub error: Option<String>,
}

pub struct AiServiceManager {
    config: Config,
    backends: OnceCell<Vec<Arc<dyn TextBackend>>>,
}

impl AiServiceManager {
    /// Creates an uninitialized manager. Backends are discovered on first use
    /// or by an explicit `initialize()` at startup.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            backends: OnceCell::new(),
        }
    }

    /// Creates a manager with a fixed backend list, skipping discovery.
    pub fn with_backends(backends: Vec<Arc<dyn TextBackend>>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(backends);
        Self {
            config: Config::rule_based_only(),
            backends: cell,
        }
    }

    /// Discovers configured backends. Safe to call any number of times; discovery
    /// runs once and later calls return the same list.
    pub fn initialize(&self) -> &[Arc<dyn TextBackend>] {
        self.backends.get_or_init(|| discover_backends(&self.config))
    }

    /// True if at least one backend is configured.
    pub fn is_available(&self) -> bool {
        !self.initialize().is_empty()
    }

    /// Names of configured backends, in dispatch order.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.initialize().iter().map(|b| b.name()).collect()
    }

    /// Sends a prompt to the first backend that answers. Only "unavailable" failures
    /// (network, 5xx, rate limit) move on to the next backend; auth and quota
    /// errors are returned immediately so callers can report them.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let mut last_error = LlmError::Unavailable;

        for backend in self.initialize() {
            match backend.complete(prompt, system).await {
                Ok(text) => {
                    debug!("{} answered ({} chars)", backend.name(), text.len());
                    return Ok(text);
                }
                Err(e) if e.is_unavailable() => {
                    warn!("{} unavailable, trying next backend: {e}", backend.name());
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    /// Enhances a single piece of resume text. For `ContentType::CoverLetter`
    /// the text is already a complete prompt and is sent as-is.
    pub async fn enhance_text(
        &self,
        text: &str,
        context: &EnhancementContext,
    ) -> Result<String, LlmError> {
        if context.content_type == ContentType::CoverLetter {
            let letter = self.complete(text, COVER_LETTER_SYSTEM).await?;
            return Ok(letter.trim().to_string());
        }

        let prompt = build_enhance_prompt(text, context);
        let raw = self.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;
        let cleaned = clean_generated_text(&raw);
        if cleaned.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(cleaned)
    }

    /// Enhances each text in order, one at a time. The output index matches the
    /// input index; the first failure aborts the batch.
    pub async fn enhance_multiple_texts(
        &self,
        texts: &[String],
        context: &EnhancementContext,
    ) -> Result<Vec<String>, LlmError> {
        let mut results = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let item_context = EnhancementContext {
                bulk_mode: true,
                item_index: Some(index),
                total_items: Some(texts.len()),
                ..context.clone()
            };
            results.push(self.enhance_text(text, &item_context).await?);
        }
        Ok(results)
    }

    /// Suggests up to 10 skills for a role.
    pub async fn generate_skill_suggestions(
        &self,
        job_title: &str,
        industry: &str,
    ) -> Result<Vec<String>, LlmError> {
        let prompt = SKILLS_PROMPT_TEMPLATE
            .replace("{job_title}", job_title.trim())
            .replace("{industry}", industry.trim());
        let raw = self.complete(&prompt, JSON_ONLY_SYSTEM).await?;
        let skills = parse_skill_list(&raw);
        if skills.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(skills)
    }

    /// Writes a 2-3 sentence professional summary.
    pub async fn generate_career_summary(
        &self,
        job_title: &str,
        years: u32,
        skills: &[String],
        industry: &str,
    ) -> Result<String, LlmError> {
        let prompt = CAREER_SUMMARY_PROMPT_TEMPLATE
            .replace("{job_title}", job_title.trim())
            .replace("{years}", &years.to_string())
            .replace("{skills}", &skills.join(", "))
            .replace("{industry}", industry.trim());
        let raw = self.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;
        let summary = clean_generated_text(&raw);
        if summary.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(summary)
    }

    /// Probes every configured backend with a tiny prompt. The built-in
    /// rule-based enhancer is always listed as available.
    pub async fn test_services(&self) -> BTreeMap<String, ServiceStatus> {
        let mut statuses = BTreeMap::new();

        for backend in self.initialize() {
            let started = Instant::now();
            let result = backend.complete(PROBE_PROMPT, PLAIN_TEXT_SYSTEM).await;
            let latency_ms = started.elapsed().as_millis() as u64;
            let status = match result {
                Ok(_) => ServiceStatus {
                    available: true,
                    model: backend.model().to_string(),
                    latency_ms,
                    error: None,
                },
                Err(e) => {
                    warn!("Health probe for {} failed: {e}", backend.name());
                    ServiceStatus {
                        available: false,
                        model: backend.model().to_string(),
                        latency_ms,
                        error: Some(e.to_string()),
                    }
                }
            };
            statuses.insert(backend.name().to_string(), status);
        }

        statuses.insert(
            "rule_based".to_string(),
            ServiceStatus {
                available: true,
                model: "built-in".to_string(),
                latency_ms: 0,
                error: None,
            },
        );
        statuses
    }
}

fn discover_backends(config: &Config) -> Vec<Arc<dyn TextBackend>> {
    let mut backends: Vec<Arc<dyn TextBackend>> = Vec::new();

    if let Some(key) = &config.anthropic_api_key {
        match AnthropicClient::new(key.clone()) {
            Ok(client) => backends.push(Arc::new(client)),
            Err(e) => error!("Failed to build Anthropic client: {e}"),
        }
    }

    if let Some(key) = &config.openai_api_key {
        match OpenAiClient::new(
            key.clone(),
            config.openai_base_url.clone(),
            config.openai_model.clone(),
        ) {
            Ok(client) => backends.push(Arc::new(client)),
            Err(e) => error!("Failed to build OpenAI-compatible client: {e}"),
        }
    }

    if backends.is_empty() {
        info!("No AI backend configured; running in rule-based mode");
    } else {
        let names: Vec<&str> = backends.iter().map(|b| b.name()).collect();
        info!("AI backends initialized: {}", names.join(", "));
    }
    backends
}

fn build_enhance_prompt(text: &str, context: &EnhancementContext) -> String {
    let content_label = match context.content_type {
        ContentType::Summary => "professional summary",
        ContentType::Achievement => "achievement",
        ContentType::Bullet | ContentType::CoverLetter => "bullet point",
    };
    let industry = context
        .industry
        .map(|i| i.label())
        .unwrap_or("general professional roles");
    let example_metric = industry_template(context.industry).metrics[0];

    let mut extra = Vec::new();
    if let Some(title) = &context.job_title {
        extra.push(format!("Job title: {title}"));
    }
    if let Some(company) = &context.company_name {
        extra.push(format!("Company: {company}"));
    }
    if let Some(experience) = &context.experience_level {
        extra.push(format!("Experience: {experience}"));
    }
    if context.bulk_mode {
        if let (Some(index), Some(total)) = (context.item_index, context.total_items) {
            extra.push(format!(
                "This is item {} of {} in one list; keep the style consistent with the others.",
                index + 1,
                total
            ));
        }
    }
    let extra_context = if extra.is_empty() {
        String::new()
    } else {
        format!("{}\n", extra.join("\n"))
    };

    ENHANCE_PROMPT_TEMPLATE
        .replace("{content_label}", content_label)
        .replace("{industry}", industry)
        .replace("{role_level}", context.role_level_or_default().key())
        .replace("{extra_context}", &extra_context)
        .replace("{example_metric}", example_metric)
        .replace("{text}", text.trim())
}

/// Strips labels, bullets and wrapping quotes models sometimes add.
fn clean_generated_text(raw: &str) -> String {
    let mut text = raw.trim();
    for label in ["Enhanced text:", "Enhanced:", "Rewritten:", "Summary:"] {
        if let Some(rest) = text.strip_prefix(label) {
            text = rest.trim_start();
        }
    }
    let text = text
        .trim_start_matches(['-', '•', '*'])
        .trim()
        .trim_matches('"')
        .trim();
    text.to_string()
}

/// Parses a JSON string array, falling back to one skill per line or comma.
fn parse_skill_list(raw: &str) -> Vec<String> {
    let body = strip_json_fences(raw);
    let items: Vec<String> = match serde_json::from_str::<Vec<String>>(body) {
        Ok(list) => list,
        Err(_) => body
            .split(['\n', ','])
            .map(|line| {
                line.trim()
                    .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '•' | '*'))
                    .trim()
                    .trim_matches('"')
                    .to_string()
            })
            .collect(),
    };

    let mut skills: Vec<String> = Vec::new();
    for item in items {
        let item = item.trim().to_string();
        if item.is_empty() || skills.iter().any(|s| s.eq_ignore_ascii_case(&item)) {
            continue;
        }
        skills.push(item);
        if skills.len() == MAX_SKILL_SUGGESTIONS {
            break;
        }
    }
    skills
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextBackend};

    pub enum Behavior {
        /// Returns the prompt's last line with a prefix, so tests can trace ordering.
        Echo(&'static str),
        Reply(&'static str),
        Fail(fn() -> LlmError),
    }

    /// In-memory backend with a scripted behavior; records every prompt it receives.
    pub struct ScriptedBackend {
        pub name: &'static str,
        pub behavior: Behavior,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub fn new(name: &'static str, behavior: Behavior) -> Self {
            Self {
                name,
                behavior,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextBackend for ScriptedBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.behavior {
                Behavior::Echo(prefix) => {
                    let last = prompt.lines().last().unwrap_or_default();
                    Ok(format!("{prefix} {last}"))
                }
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::Fail(make) => Err(make()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{Behavior, ScriptedBackend};
    use super::*;
    use crate::enhancement::context::Industry;

    fn manager_with(backends: Vec<Arc<ScriptedBackend>>) -> AiServiceManager {
        AiServiceManager::with_backends(
            backends
                .into_iter()
                .map(|b| b as Arc<dyn TextBackend>)
                .collect(),
        )
    }

    #[test]
    fn test_initialize_without_keys_is_empty_and_idempotent() {
        let manager = AiServiceManager::new(Config::rule_based_only());
        assert!(manager.initialize().is_empty());
        assert!(manager.initialize().is_empty());
        assert!(!manager.is_available());
    }

    #[test]
    fn test_initialize_discovers_configured_backends_in_order() {
        let config = Config {
            anthropic_api_key: Some("sk-ant-test".to_string()),
            openai_api_key: Some("sk-test".to_string()),
            ..Config::rule_based_only()
        };
        let manager = AiServiceManager::new(config);
        assert_eq!(manager.backend_names(), vec!["anthropic", "openai"]);
        // Second call returns the same discovered list.
        assert_eq!(manager.initialize().len(), 2);
    }

    #[tokio::test]
    async fn test_enhance_text_without_backends_is_unavailable() {
        let manager = manager_with(vec![]);
        let err = manager
            .enhance_text("Handled complaints", &EnhancementContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Unavailable));
    }

    #[tokio::test]
    async fn test_enhance_text_cleans_model_output() {
        let backend = Arc::new(ScriptedBackend::new(
            "primary",
            Behavior::Reply("Enhanced: \"Resolved 40+ customer escalations weekly\""),
        ));
        let manager = manager_with(vec![backend.clone()]);
        let context = EnhancementContext {
            industry: Some(Industry::CustomerService),
            ..Default::default()
        };
        let out = manager.enhance_text("handled escalations", &context).await.unwrap();
        assert_eq!(out, "Resolved 40+ customer escalations weekly");

        let prompt = backend.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("Target industry: customer service"));
        assert!(prompt.ends_with("handled escalations"));
    }

    #[tokio::test]
    async fn test_auth_failure_propagates_without_failover() {
        let failing = Arc::new(ScriptedBackend::new(
            "primary",
            Behavior::Fail(|| LlmError::Auth("invalid key".to_string())),
        ));
        let healthy = Arc::new(ScriptedBackend::new("secondary", Behavior::Reply("ok")));
        let manager = manager_with(vec![failing, healthy.clone()]);

        let err = manager
            .enhance_text("text", &EnhancementContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Auth(_)));
        assert_eq!(healthy.calls(), 0);
    }

    #[tokio::test]
    async fn test_quota_failure_is_distinct() {
        let failing = Arc::new(ScriptedBackend::new(
            "primary",
            Behavior::Fail(|| LlmError::QuotaExceeded("Insufficient Balance".to_string())),
        ));
        let manager = manager_with(vec![failing]);
        let err = manager
            .enhance_text("text", &EnhancementContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn test_outage_fails_over_to_next_backend() {
        let down = Arc::new(ScriptedBackend::new(
            "primary",
            Behavior::Fail(|| LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
        ));
        let up = Arc::new(ScriptedBackend::new(
            "secondary",
            Behavior::Reply("Streamlined intake"),
        ));
        let manager = manager_with(vec![down.clone(), up.clone()]);
        let out = manager
            .enhance_text("did intake", &EnhancementContext::default())
            .await
            .unwrap();
        assert_eq!(out, "Streamlined intake");
        assert_eq!(down.calls(), 1);
        assert_eq!(up.calls(), 1);
    }

    #[tokio::test]
    async fn test_enhance_multiple_preserves_order() {
        let backend = Arc::new(ScriptedBackend::new("primary", Behavior::Echo("Improved:")));
        let manager = manager_with(vec![backend.clone()]);
        let texts = vec![
            "first bullet".to_string(),
            "second bullet".to_string(),
            "third bullet".to_string(),
        ];
        let out = manager
            .enhance_multiple_texts(&texts, &EnhancementContext::default())
            .await
            .unwrap();
        assert_eq!(
            out,
            vec![
                "Improved: first bullet",
                "Improved: second bullet",
                "Improved: third bullet"
            ]
        );

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[1].contains("This is item 2 of 3"));
    }

    #[tokio::test]
    async fn test_skill_suggestions_capped_at_ten() {
        let backend = Arc::new(ScriptedBackend::new(
            "primary",
            Behavior::Reply(
                r#"```json
["Rust", "SQL", "Docker", "Kubernetes", "AWS", "Git", "Linux", "gRPC", "Kafka", "Redis", "Terraform", "rust"]
```"#,
            ),
        ));
        let manager = manager_with(vec![backend]);
        let skills = manager
            .generate_skill_suggestions("Backend Engineer", "software engineering")
            .await
            .unwrap();
        assert_eq!(skills.len(), MAX_SKILL_SUGGESTIONS);
        assert_eq!(skills[0], "Rust");
        assert!(!skills.contains(&"Terraform".to_string()));
    }

    #[test]
    fn test_parse_skill_list_falls_back_to_lines() {
        let skills = parse_skill_list("1. Budgeting\n2. Forecasting\n- Excel, GAAP\n\n");
        assert_eq!(skills, vec!["Budgeting", "Forecasting", "Excel", "GAAP"]);
    }

    #[tokio::test]
    async fn test_career_summary_is_trimmed() {
        let backend = Arc::new(ScriptedBackend::new(
            "primary",
            Behavior::Reply("  \"Seasoned nurse with 8 years in acute care.\"  "),
        ));
        let manager = manager_with(vec![backend.clone()]);
        let summary = manager
            .generate_career_summary(
                "Registered Nurse",
                8,
                &["Patient care".to_string(), "EHR".to_string()],
                "healthcare",
            )
            .await
            .unwrap();
        assert_eq!(summary, "Seasoned nurse with 8 years in acute care.");
        let prompt = backend.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("Key skills: Patient care, EHR"));
    }

    #[tokio::test]
    async fn test_cover_letter_prompt_is_sent_verbatim() {
        let backend = Arc::new(ScriptedBackend::new("primary", Behavior::Echo("")));
        let manager = manager_with(vec![backend.clone()]);
        let context = EnhancementContext {
            content_type: ContentType::CoverLetter,
            ..Default::default()
        };
        manager.enhance_text("Write a letter", &context).await.unwrap();
        assert_eq!(backend.prompts.lock().unwrap()[0], "Write a letter");
    }

    #[tokio::test]
    async fn test_services_reports_each_backend_and_rule_based() {
        let up = Arc::new(ScriptedBackend::new("alpha", Behavior::Reply("OK")));
        let down = Arc::new(ScriptedBackend::new(
            "beta",
            Behavior::Fail(|| LlmError::Auth("bad key".to_string())),
        ));
        let manager = manager_with(vec![up, down]);
        let statuses = manager.test_services().await;
        assert!(statuses["alpha"].available);
        assert!(!statuses["beta"].available);
        assert!(statuses["beta"].error.as_deref().unwrap().contains("bad key"));
        assert!(statuses["rule_based"].available);
    }
}
