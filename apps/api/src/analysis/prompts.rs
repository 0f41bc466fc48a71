// Prompt constants for resume analysis.

/// Analysis prompt. Replace `{target_role}` and `{resume_text}` before sending.
/// The schema keys must match `models::analysis::ResumeAnalysis`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Act as an AI Career Coach and Senior Recruiter.
Analyze this resume for the specific target role: "{target_role}".

Resume Text: {resume_text}

Rules for JSON generation:
1. atsScore: 0-100 based on keyword density for a {target_role}.
2. riskFactor: Start with 'Low', 'Medium', or 'High' followed by a short reason.
3. jobProbability: Predicted percentage of landing an interview for {target_role}.
4. improvements: An array of 4-5 specific, actionable points to improve this resume for the role of {target_role}.
5. roadmap: An array of 4 objects with "period" (e.g., "Week 1") and "task" (a specific learning goal).
6. interviewRiskDetection: A single sentence warning about a potential weak spot.
7. personalBrandingScore: A value from 40-95.
"#;
