// Prompt templates for backend-driven enhancement.
// Cross-cutting system prompts live in llm_client::prompts.

/// Text enhancement prompt.
/// Replace: {content_label}, {industry}, {role_level}, {extra_context}, {example_metric}, {text}
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Rewrite the following resume {content_label} so it reads as strong, professional resume language.

Target industry: {industry}
Seniority: {role_level}
{extra_context}
Guidelines:
- Start with a strong past-tense action verb
- Keep every fact from the original; do not invent employers, titles or credentials
- If the original has no numbers, you may add ONE realistic, modest metric typical for this field, e.g. "{example_metric}"
- Keep it to one or two sentences
- Return only the rewritten text

Original text:
{text}"#;

/// Skill suggestion prompt. Replace: {job_title}, {industry}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"List the 10 most relevant skills for a {job_title} working in {industry}.
Mix technical skills with the most important professional skills for the role.
Each skill must be 1-4 words.

Return a JSON array of strings, for example:
["Project planning", "Stakeholder communication"]"#;

/// Career summary prompt. Replace: {job_title}, {years}, {skills}, {industry}
pub const CAREER_SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a professional resume summary for a {job_title} with {years} years of experience in {industry}.

Key skills: {skills}

Requirements:
- 2-3 sentences, written without first-person pronouns
- Lead with the candidate's level and field
- Mention the most important skills naturally
- End with the value the candidate brings to an employer
- Return only the summary text"#;

/// System prompt used when the text being "enhanced" is a full cover-letter prompt.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career coach who writes concise, \
    specific and warm cover letters. Respond with the letter text only: no subject line, \
    no markdown, no commentary. Never invent experience that was not provided.";
