//! Document wrapper: the preamble is ours, never the generator's.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed preamble every generated resume compiles against.
pub const PREAMBLE: &str = r"\documentclass[11pt,a4paper]{article}

\usepackage[margin=1.5cm]{geometry}
\usepackage{enumitem}
\usepackage{hyperref}
\usepackage{xcolor}

\hypersetup{
  colorlinks=true,
  urlcolor=blue,
  linkcolor=blue
}

\setlength{\parindent}{0pt}
\setlength{\parskip}{4pt}";

static RE_DOCUMENTCLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\documentclass[^\n]*\n?").unwrap());
static RE_USEPACKAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\usepackage[^\n]*\n?").unwrap());
static RE_HYPERSETUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\\hypersetup\{.*?\}").unwrap());

/// Removes any document frame the content carries: `\begin{document}`,
/// `\end{document}`, `\documentclass` and `\usepackage` lines, `\hypersetup{…}`.
pub fn strip_document_frame(content: &str) -> String {
    let content = content
        .replace("\\begin{document}", "")
        .replace("\\end{document}", "");
    let content = RE_DOCUMENTCLASS.replace_all(&content, "");
    let content = RE_USEPACKAGE.replace_all(&content, "");
    let content = RE_HYPERSETUP.replace_all(&content, "");
    content.trim().to_string()
}

/// Wraps a body fragment into a complete, compilable document.
pub fn wrap_document(content: &str) -> String {
    let body = strip_document_frame(content);
    format!("{PREAMBLE}\n\n\\begin{{document}}\n\n{body}\n\n\\end{{document}}")
}
