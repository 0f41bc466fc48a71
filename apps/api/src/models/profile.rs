use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A career profile as entered in the builder form.
///
/// Every field defaults when absent so partially filled drafts round-trip.
/// Timestamps are owned by the profile store, never by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<String>,
    pub achievements: Vec<String>,
    pub publications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_industry: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Treats `Some("")` from the form the same as an absent value.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl Profile {
    /// Profile links that are actually filled in, labelled for display.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
            ("Portfolio", &self.portfolio),
        ]
        .into_iter()
        .filter_map(|(label, link)| non_empty(link).map(|url| (label, url)))
        .collect()
    }
}

impl Experience {
    /// "Present" for ongoing roles, the end date otherwise.
    pub fn end_label(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

impl Education {
    pub fn end_label(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_form_payload_with_missing_lists() {
        let json = serde_json::json!({
            "id": "p-1",
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "+49 30 1234",
            "location": "Berlin",
            "github": "https://github.com/jane",
            "technicalSkills": ["Rust", "Go"],
            "experience": [{
                "company": "Acme",
                "position": "Engineer",
                "startDate": "2021-01",
                "current": true,
                "description": ["Built things"]
            }]
        });

        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(profile.technical_skills, vec!["Rust", "Go"]);
        assert!(profile.education.is_empty());
        assert!(profile.experience[0].technologies.is_empty());
        assert_eq!(profile.experience[0].end_label(), "Present");
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let profile = Profile {
            full_name: "Jane".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["fullName"], "Jane");
        assert!(value.get("linkedin").is_none());
        assert!(value["technicalSkills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_links_skip_empty_values() {
        let profile = Profile {
            linkedin: Some("  ".to_string()),
            github: Some("https://github.com/jane".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.links(), vec![("GitHub", "https://github.com/jane")]);
    }
}
