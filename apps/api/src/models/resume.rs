use serde::{Deserialize, Serialize};

/// Resume contents as submitted by the editor. Every field is optional so a
/// half-filled form still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    /// Absent or "present" for the current role.
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    pub fn is_current(&self) -> bool {
        match self.end_date.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(end) => end.eq_ignore_ascii_case("present") || end.eq_ignore_ascii_case("current"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub graduation_date: Option<String>,
}

/// Trims an optional field, treating blank strings as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ResumeData {
    /// The first current role, or the first entry when none is current.
    pub fn most_recent_experience(&self) -> Option<&ExperienceEntry> {
        self.experience
            .iter()
            .find(|e| e.is_current())
            .or_else(|| self.experience.first())
    }

    /// First `n` non-blank skills, in the order the user listed them.
    pub fn top_skills(&self, n: usize) -> Vec<&str> {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(n)
            .collect()
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(&self.personal.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_partial_camel_case_payload() {
        let data: ResumeData = serde_json::from_str(
            r#"{"personal":{"name":"Ada"},"experience":[{"title":"Engineer","endDate":"2021"}]}"#,
        )
        .unwrap();
        assert_eq!(data.name(), Some("Ada"));
        assert_eq!(data.experience[0].end_date.as_deref(), Some("2021"));
        assert!(data.skills.is_empty());
    }

    #[test]
    fn test_most_recent_prefers_current_role() {
        let data = ResumeData {
            experience: vec![
                ExperienceEntry {
                    title: Some("Analyst".to_string()),
                    end_date: Some("2020".to_string()),
                    ..Default::default()
                },
                ExperienceEntry {
                    title: Some("Lead".to_string()),
                    end_date: Some("Present".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            data.most_recent_experience().and_then(|e| e.title.as_deref()),
            Some("Lead")
        );
    }

    #[test]
    fn test_most_recent_falls_back_to_first_entry() {
        let data = ResumeData {
            experience: vec![ExperienceEntry {
                title: Some("Clerk".to_string()),
                end_date: Some("2019".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            data.most_recent_experience().and_then(|e| e.title.as_deref()),
            Some("Clerk")
        );
        assert!(ResumeData::default().most_recent_experience().is_none());
    }

    #[test]
    fn test_top_skills_skips_blanks() {
        let data = ResumeData {
            skills: vec!["Rust".into(), " ".into(), "SQL".into()],
            ..Default::default()
        };
        assert_eq!(data.top_skills(5), vec!["Rust", "SQL"]);
    }
}
