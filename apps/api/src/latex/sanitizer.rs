//! LaTeX Sanitizer: structural repair of generator-produced resume bodies.
//!
//! Flow: strip_artifacts → repair_orphaned_items → balance_environments.
//!
//! The input is untrusted free text from the LLM. Every pass is a pure
//! `&str → String` transformation and none of them can fail.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Commands the generator leaks from its own template knowledge. They either
/// redefine the preamble or break the fixed document class we wrap with.
const DENIED_COMMANDS: &[&str] = &[
    "\\hrefdefaultcolor",
    "\\hrefcolor",
    "\\newcommand",
    "\\moderncv",
];

/// Environments whose open/close counts are equalized by the final pass.
pub const BALANCED_ENVIRONMENTS: &[&str] = &["itemize", "enumerate", "center"];

const LIST_OPENERS: &[(&str, &str)] = &[
    ("\\begin{itemize}", "itemize"),
    ("\\begin{enumerate}", "enumerate"),
];

const LIST_CLOSERS: &[&str] = &["\\end{itemize}", "\\end{enumerate}"];

const STRUCTURAL_BOUNDARIES: &[&str] = &[
    "\\section",
    "\\subsection",
    "\\begin{center}",
    "\\end{center}",
    "\\end{document}",
];

const SYNTHETIC_LIST_OPEN: &str = "\\begin{itemize}";
const SYNTHETIC_LIST_CLOSE: &str = "\\end{itemize}";
const DOCUMENT_END: &str = "\\end{document}";

/// A fence on its own line: ``` optionally followed by a language tag.
static RE_FENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_+-]*[ \t]*$\n?").unwrap());

/// Any fence left inline after line-level stripping.
static RE_INLINE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```(?:latex?)?").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Sanitizes raw generator output into a structurally well-formed LaTeX fragment.
///
/// Accepts `&str` or `Option<&str>`; empty or absent input yields an empty string.
/// Deterministic, and a second application is a no-op.
pub fn sanitize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    let stripped = strip_artifacts(raw);
    if stripped.is_empty() {
        return String::new();
    }

    let repaired = repair_orphaned_items(&stripped);
    // Removing an edge line during balancing can expose surrounding whitespace.
    balance_environments(&repaired).trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 1: artifact stripping
// ────────────────────────────────────────────────────────────────────────────

/// Removes code fences and denied commands, normalizes line endings, trims.
///
/// Runs to a fixed point so that a removal can never splice together a new
/// artifact (`\new\newcommandcommand`).
pub fn strip_artifacts(raw: &str) -> String {
    let mut text = raw.replace("\r\n", "\n").replace('\r', "\n");

    loop {
        let before = text.len();

        text = RE_FENCE_LINE.replace_all(&text, "").into_owned();
        text = RE_INLINE_FENCE.replace_all(&text, "").into_owned();
        for command in DENIED_COMMANDS {
            if text.contains(command) {
                text = text.replace(command, "");
            }
        }

        if text.len() == before {
            break;
        }
    }

    text.trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 2: orphaned list items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    ListOpen(&'static str),
    ListClose,
    Item,
    Boundary,
    Blank,
    Other,
}

/// One entry of the environment stack: which list opened, and where.
#[derive(Debug, Clone, Copy)]
struct OpenList {
    name: &'static str,
    line: usize,
}

fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if let Some((_, name)) = LIST_OPENERS
        .iter()
        .find(|(tag, _)| trimmed.starts_with(*tag))
    {
        return LineKind::ListOpen(*name);
    }
    if LIST_CLOSERS.iter().any(|tag| trimmed.starts_with(*tag)) {
        return LineKind::ListClose;
    }
    if is_item(trimmed) {
        return LineKind::Item;
    }
    if STRUCTURAL_BOUNDARIES
        .iter()
        .any(|tag| trimmed.starts_with(*tag))
    {
        return LineKind::Boundary;
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    LineKind::Other
}

/// `\item`, `\item text`, `\item[label]`, but not `\itemsep`.
fn is_item(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("\\item")
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphabetic()))
}

/// Does the next non-blank line keep the current list going?
fn list_continues(rest: &[&str]) -> bool {
    rest.iter()
        .map(|line| classify(line))
        .find(|kind| *kind != LineKind::Blank)
        .is_some_and(|kind| matches!(kind, LineKind::Item | LineKind::ListClose))
}

fn close_all<'a>(stack: &mut Vec<OpenList>, out: &mut Vec<&'a str>) {
    while let Some(open) = stack.pop() {
        trace!(
            "Closing unterminated {} opened at line {}",
            open.name,
            open.line + 1
        );
        out.push(SYNTHETIC_LIST_CLOSE);
    }
}

/// Guarantees every `\item` sits inside an open list.
///
/// Single pass over the lines with a flat stack of open lists:
/// - an orphaned `\item` gets a synthetic `\begin{itemize}` in front of it;
/// - a structural boundary (`\section`, `\subsection`, centered blocks,
///   `\end{document}`) closes everything still open;
/// - two consecutive blank lines inside a list close it, unless the next
///   non-blank line is another item or an explicit list close;
/// - whatever is open at end of input is closed.
///
/// Unmatched explicit closes pass through untouched; [`balance_environments`]
/// drops them.
pub fn repair_orphaned_items(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut stack: Vec<OpenList> = Vec::new();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);

    for (index, line) in lines.iter().copied().enumerate() {
        match classify(line) {
            LineKind::ListOpen(name) => {
                stack.push(OpenList { name, line: index });
                out.push(line);
            }
            LineKind::ListClose => {
                stack.pop();
                out.push(line);
            }
            LineKind::Item => {
                if stack.is_empty() {
                    out.push(SYNTHETIC_LIST_OPEN);
                    stack.push(OpenList {
                        name: "itemize",
                        line: index,
                    });
                }
                out.push(line);
            }
            LineKind::Boundary => {
                close_all(&mut stack, &mut out);
                out.push(line);
            }
            LineKind::Blank => {
                out.push(line);
                let previous_blank = index > 0 && lines[index - 1].trim().is_empty();
                if previous_blank && !stack.is_empty() && !list_continues(&lines[index + 1..]) {
                    close_all(&mut stack, &mut out);
                }
            }
            LineKind::Other => out.push(line),
        }
    }

    close_all(&mut stack, &mut out);
    out.join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 3: environment balancing
// ────────────────────────────────────────────────────────────────────────────

/// Open and close tag counts for one environment across a whole fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentCount {
    pub opens: usize,
    pub closes: usize,
}

/// Counts `\begin{env}` and `\end{env}` occurrences anywhere in `text`.
pub fn count_environment(text: &str, env: &str) -> EnvironmentCount {
    EnvironmentCount {
        opens: text.matches(&format!("\\begin{{{env}}}")).count(),
        closes: text.matches(&format!("\\end{{{env}}}")).count(),
    }
}

/// Equalizes open and close counts for every environment in [`BALANCED_ENVIRONMENTS`].
///
/// Missing closes go right before the last `\end{document}`, or at the end of
/// the fragment when there is none. Excess closes are removed by
/// `remove_excess_closes`. Matched counts only: nesting order is not checked.
pub fn balance_environments(text: &str) -> String {
    let mut latex = text.to_string();

    for env in BALANCED_ENVIRONMENTS {
        let close_tag = format!("\\end{{{env}}}");
        let count = count_environment(&latex, env);

        if count.opens > count.closes {
            let closing = vec![close_tag.as_str(); count.opens - count.closes].join("\n");
            match latex.rfind(DOCUMENT_END) {
                Some(position) => latex.insert_str(position, &format!("{closing}\n")),
                None => {
                    latex.push('\n');
                    latex.push_str(&closing);
                }
            }
        } else if count.closes > count.opens {
            latex = remove_excess_closes(&latex, env, count.closes - count.opens);
        }
    }

    latex
}

/// Removes `excess` close tags of `env`, taking first the ones that close nothing.
///
/// Removal order:
/// 1. close-only lines reached while no `env` is open, in document order;
/// 2. close tags sharing a line with other content, in document order;
/// 3. any remaining close-only lines, last first.
///
/// Dropping an unmatched close leaves the structure seen by
/// [`repair_orphaned_items`] unchanged, so a repaired fragment repairs to itself.
fn remove_excess_closes(latex: &str, env: &str, excess: usize) -> String {
    let open_tag = format!("\\begin{{{env}}}");
    let close_tag = format!("\\end{{{env}}}");
    let mut lines: Vec<Option<String>> = latex.split('\n').map(|l| Some(l.to_string())).collect();
    let mut remaining = excess;

    let mut depth = 0usize;
    for (index, line) in latex.split('\n').enumerate() {
        if line.trim() == close_tag {
            if depth > 0 {
                depth -= 1;
            } else if remaining > 0 {
                trace!("Dropping unmatched {close_tag} at line {}", index + 1);
                lines[index] = None;
                remaining -= 1;
            }
        } else {
            depth += line.matches(open_tag.as_str()).count();
            depth = depth.saturating_sub(line.matches(close_tag.as_str()).count());
        }
    }

    // Close tags sharing a line with other content.
    for line in lines.iter_mut().flatten() {
        while remaining > 0 && line.trim() != close_tag {
            match line.find(close_tag.as_str()) {
                Some(position) => {
                    line.replace_range(position..position + close_tag.len(), "");
                    remaining -= 1;
                }
                None => break,
            }
        }
    }

    for line in lines.iter_mut().rev() {
        if remaining == 0 {
            break;
        }
        if line.as_deref().is_some_and(|l| l.trim() == close_tag) {
            *line = None;
            remaining -= 1;
        }
    }

    lines.into_iter().flatten().collect::<Vec<_>>().join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
