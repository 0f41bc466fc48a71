// Prompt constants for resume generation.
// Cross-cutting fragments live in llm_client::prompts.

/// Resume body prompt. Replace `{candidate_data}`, `{target_role}`,
/// `{job_description}` and `{structure}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are a resume writer. Generate a professional resume in LaTeX format using ONLY the data provided below.

CRITICAL RULES:
1. DO NOT include: \documentclass, \usepackage, \hypersetup, \begin{document}, \end{document}
2. DO NOT use placeholder text like "Company Name" or "Project Name"
3. USE ONLY the actual data from the profile below
4. Return ONLY the LaTeX body content

CANDIDATE DATA:
{candidate_data}

TARGET ROLE: {target_role}

JOB DESCRIPTION:
{job_description}

NOW GENERATE A PROFESSIONAL RESUME IN LATEX FORMAT USING THE ACTUAL DATA ABOVE.
Use this structure:

{structure}
"#;

/// Shown in place of an absent job description.
pub const NO_JOB_DESCRIPTION: &str = "No job description provided";

/// Section skeleton the model is asked to follow. Replace `{target_role}`.
pub const RESUME_STRUCTURE: &str = r#"\section*{Professional Summary}
[Write 2-3 sentences for {target_role}]

\section*{Experience}
[Format each with \textbf{Position} -- \textbf{Company}, Location \hfill Dates
\begin{itemize} for each responsibility
\textit{Technologies: ...}]

\section*{Education}
[Format each entry]

\section*{Technical Skills}
[List all skills]

\section*{Projects}
[Format each project]"#;
