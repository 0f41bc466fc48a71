use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Career-coach analysis of an uploaded resume, as produced by the LLM.
///
/// The model is told the schema but does not always honour types, so every
/// field defaults and scores accept numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysis {
    #[serde(deserialize_with = "lenient_score")]
    pub ats_score: u8,
    pub risk_factor: String,
    /// Free-form: models return "65%", 65, or a sentence.
    pub job_probability: Value,
    pub improvements: Vec<String>,
    pub roadmap: Vec<RoadmapStep>,
    pub interview_risk_detection: String,
    #[serde(deserialize_with = "lenient_score")]
    pub personal_branding_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapStep {
    pub period: String,
    pub task: String,
}

/// Reads a 0–100 score from a number or a string such as `"82"` or `"82/100"`.
/// Out-of-range values are clamped; unreadable values become 0.
fn lenient_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let score = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().ok()
        }
        _ => None,
    };
    Ok(score.map(|s| s.round().clamp(0.0, 100.0) as u8).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_well_typed_analysis() {
        let json = serde_json::json!({
            "atsScore": 78,
            "riskFactor": "Medium - few metrics",
            "jobProbability": "60%",
            "improvements": ["Quantify impact", "Add Kubernetes"],
            "roadmap": [{"period": "Week 1", "task": "Learn Helm"}],
            "interviewRiskDetection": "System design depth may be questioned.",
            "personalBrandingScore": 70
        });
        let analysis: ResumeAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.ats_score, 78);
        assert_eq!(analysis.roadmap[0].period, "Week 1");
        assert_eq!(analysis.job_probability, Value::String("60%".to_string()));
        assert_eq!(analysis.personal_branding_score, 70);
    }

    #[test]
    fn test_scores_accept_strings_and_clamp() {
        let json = serde_json::json!({
            "atsScore": "82/100",
            "personalBrandingScore": 140.4
        });
        let analysis: ResumeAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.ats_score, 82);
        assert_eq!(analysis.personal_branding_score, 100);
    }

    #[test]
    fn test_missing_fields_default() {
        let analysis: ResumeAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(analysis.ats_score, 0);
        assert!(analysis.improvements.is_empty());
        assert_eq!(analysis.job_probability, Value::Null);
    }

    #[test]
    fn test_unreadable_score_is_zero() {
        let analysis: ResumeAnalysis =
            serde_json::from_value(serde_json::json!({"atsScore": "high"})).unwrap();
        assert_eq!(analysis.ats_score, 0);
    }
}
