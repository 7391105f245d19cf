//! Cover letter engine.
//!
//! Builds one prompt from the resume and job details (absent fields are left
//! out), delegates to `AiServiceManager::enhance_text`, and falls back to a
//! fixed template when the backend call fails for any reason.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cover_letter::prompts::{
    COVER_LETTER_GUIDELINES, COVER_LETTER_INTRO, MAX_JOB_POSTING_CHARS,
};
use crate::enhancement::ai_manager::AiServiceManager;
use crate::enhancement::context::{ContentType, EnhancementContext};
use crate::models::resume::{non_blank, ExperienceEntry, ResumeData};

const TOP_SKILLS: usize = 5;

const NAME_PLACEHOLDER: &str = "[Your Name]";
const COMPANY_PLACEHOLDER: &str = "[Company Name]";
const POSITION_PLACEHOLDER: &str = "[Position Title]";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume_data: ResumeData,
    pub job_posting: Option<String>,
    pub company_name: Option<String>,
    pub position_title: Option<String>,
    pub personalized_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub content: String,
    pub used_fallback: bool,
}

pub struct CoverLetterEngine<'a> {
    ai: &'a AiServiceManager,
}

impl<'a> CoverLetterEngine<'a> {
    pub fn new(ai: &'a AiServiceManager) -> Self {
        Self { ai }
    }

    pub async fn generate_cover_letter(&self, request: &CoverLetterRequest) -> CoverLetter {
        let prompt = build_prompt(request);
        let context = EnhancementContext {
            content_type: ContentType::CoverLetter,
            job_title: non_blank(&request.position_title).map(str::to_string),
            company_name: non_blank(&request.company_name).map(str::to_string),
            ..Default::default()
        };

        match self.ai.enhance_text(&prompt, &context).await {
            Ok(content) if !content.trim().is_empty() => {
                info!("Cover letter generated by backend ({} chars)", content.len());
                CoverLetter {
                    content,
                    used_fallback: false,
                }
            }
            Ok(_) => {
                warn!("Backend returned an empty cover letter, using template");
                self.fallback(request)
            }
            Err(e) => {
                warn!("Cover letter generation failed, using template: {e}");
                self.fallback(request)
            }
        }
    }

    fn fallback(&self, request: &CoverLetterRequest) -> CoverLetter {
        CoverLetter {
            content: fallback_letter(request, Local::now().date_naive()),
            used_fallback: true,
        }
    }
}

/// Prompt containing only the fields that are present.
pub fn build_prompt(request: &CoverLetterRequest) -> String {
    let resume = &request.resume_data;
    let mut lines = vec![COVER_LETTER_INTRO.to_string(), String::new()];

    if let Some(position) = non_blank(&request.position_title) {
        lines.push(format!("Position: {position}"));
    }
    if let Some(company) = non_blank(&request.company_name) {
        lines.push(format!("Company: {company}"));
    }
    if let Some(name) = resume.name() {
        lines.push(format!("Candidate name: {name}"));
    }
    if let Some(summary) = non_blank(&resume.summary) {
        lines.push(format!("Professional summary: {summary}"));
    }
    if let Some(entry) = resume.most_recent_experience() {
        if let Some(role) = describe_role(entry) {
            lines.push(format!("Most recent role: {role}"));
        }
        if let Some(description) = non_blank(&entry.description) {
            lines.push(format!("Role description: {description}"));
        }
        let achievements: Vec<&str> = entry
            .achievements
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();
        if !achievements.is_empty() {
            lines.push(format!("Key achievements: {}", achievements.join("; ")));
        }
    }
    let skills = resume.top_skills(TOP_SKILLS);
    if !skills.is_empty() {
        lines.push(format!("Top skills: {}", skills.join(", ")));
    }
    if let Some(posting) = non_blank(&request.job_posting) {
        let posting: String = posting.chars().take(MAX_JOB_POSTING_CHARS).collect();
        lines.push(format!("Job posting:\n{posting}"));
    }
    if let Some(message) = non_blank(&request.personalized_message) {
        lines.push(format!("Personal note to include: {message}"));
    }

    lines.push(String::new());
    lines.push(COVER_LETTER_GUIDELINES.to_string());
    lines.join("\n")
}

fn describe_role(entry: &ExperienceEntry) -> Option<String> {
    match (non_blank(&entry.title), non_blank(&entry.company)) {
        (Some(title), Some(company)) => Some(format!("{title} at {company}")),
        (Some(title), None) => Some(title.to_string()),
        (None, Some(company)) => Some(format!("role at {company}")),
        (None, None) => None,
    }
}

/// "A", "A and B", "A, B and C".
fn join_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}

/// Fixed-template letter with bracket placeholders for missing values.
pub fn fallback_letter(request: &CoverLetterRequest, date: NaiveDate) -> String {
    let resume = &request.resume_data;
    let name = resume.name().unwrap_or(NAME_PLACEHOLDER);
    let company = non_blank(&request.company_name).unwrap_or(COMPANY_PLACEHOLDER);
    let position = non_blank(&request.position_title).unwrap_or(POSITION_PLACEHOLDER);

    let mut opening = format!(
        "I am writing to express my interest in the {position} position at {company}."
    );

    match resume.most_recent_experience() {
        Some(entry) if describe_role(entry).is_some() => {
            let tense = if entry.is_current() { "current" } else { "most recent" };
            let role = describe_role(entry).unwrap_or_default();
            opening.push_str(&format!(
                " In my {tense} position as {role}, I have built experience that carries directly into this role."
            ));
        }
        _ => opening.push_str(
            " I bring a strong work ethic and a steady commitment to delivering quality results.",
        ),
    }

    let skills = resume.top_skills(TOP_SKILLS);
    if !skills.is_empty() {
        opening.push_str(&format!(" My key skills include {}.", join_list(&skills)));
    }

    let mut paragraphs = vec![
        date.format("%B %-d, %Y").to_string(),
        "Dear Hiring Manager,".to_string(),
        opening,
    ];
    if let Some(message) = non_blank(&request.personalized_message) {
        paragraphs.push(message.to_string());
    }
    paragraphs.push(format!(
        "I would welcome the opportunity to discuss how I can contribute to {company}. \
         Thank you for your time and consideration."
    ));
    paragraphs.push(format!("Sincerely,\n{name}"));

    paragraphs.join("\n\n")
}
