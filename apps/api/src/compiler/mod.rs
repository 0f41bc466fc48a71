//! LaTeX → PDF compilation via a remote compile service.
//!
//! The service takes the whole document in a `text` query parameter and
//! answers with PDF bytes, or with the TeX log on failure.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);
const GENERIC_FAILURE: &str = "Remote LaTeX compilation failed";
/// Upper bound on diagnostic text echoed back to the user.
const MAX_DIAGNOSTIC_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Failed to connect to LaTeX compiler: {0}")]
    Connection(#[from] reqwest::Error),

    /// Compiler-reported failure; the message is safe to show to users.
    #[error("{0}")]
    Diagnostics(String),
}

/// A LaTeX compilation capability: complete document in, PDF bytes out.
#[async_trait]
pub trait Compiler: Send + Sync {
    async fn compile(&self, latex: &str) -> Result<Bytes, CompileError>;
}

/// Compiler backed by a latexonline-style HTTP endpoint.
#[derive(Clone)]
pub struct RemoteCompiler {
    client: Client,
    endpoint: String,
}

impl RemoteCompiler {
    pub fn new(endpoint: &str) -> Result<Self, CompileError> {
        Ok(Self {
            client: Client::builder().timeout(COMPILE_TIMEOUT).build()?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl Compiler for RemoteCompiler {
    async fn compile(&self, latex: &str) -> Result<Bytes, CompileError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("text", latex)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let log = response.text().await.unwrap_or_default();
            warn!("Remote compiler returned {}", status);
            debug!("Compiler log: {}", log);
            return Err(CompileError::Diagnostics(
                extract_diagnostic(&log).unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            ));
        }

        let pdf = response.bytes().await?;
        if !pdf.starts_with(b"%PDF") {
            let log = String::from_utf8_lossy(&pdf);
            warn!("Remote compiler returned a non-PDF body ({} bytes)", pdf.len());
            return Err(CompileError::Diagnostics(
                extract_diagnostic(&log).unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            ));
        }

        Ok(pdf)
    }
}

/// Pulls the first TeX error out of a compile log.
///
/// TeX reports errors as a `! Message` line, usually followed a few lines
/// later by `l.<N> <source excerpt>`. Returns both joined, or `None` when the
/// log has no error line.
pub fn extract_diagnostic(log: &str) -> Option<String> {
    let lines: Vec<&str> = log.lines().collect();
    let start = lines.iter().position(|line| line.trim_start().starts_with('!'))?;

    let message = lines[start].trim().to_string();
    let location = lines[start + 1..]
        .iter()
        .take(6)
        .map(|line| line.trim())
        .find(|line| line.starts_with("l."));

    let diagnostic = match location {
        Some(location) => format!("{message} ({location})"),
        None => message,
    };

    Some(diagnostic.chars().take(MAX_DIAGNOSTIC_CHARS).collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Test doubles
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod fakes {
    use super::*;

    /// Returns a fixed PDF, or a fixed diagnostic.
    pub struct CannedCompiler {
        pub outcome: Result<&'static [u8], &'static str>,
    }

    #[async_trait]
    impl Compiler for CannedCompiler {
        async fn compile(&self, _latex: &str) -> Result<Bytes, CompileError> {
            self.outcome
                .map(Bytes::from_static)
                .map_err(|msg| CompileError::Diagnostics(msg.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::get, Router};

    use super::*;

    const TEX_LOG: &str = "This is pdfTeX, Version 3.14\n\
        (./main.tex\n\
        ! Undefined control sequence.\n\
        <recently read> \\foo\n\
        \n\
        l.12 \\foo\n\
        ! Emergency stop.";

    #[test]
    fn test_extracts_first_error_with_location() {
        assert_eq!(
            extract_diagnostic(TEX_LOG).as_deref(),
            Some("! Undefined control sequence. (l.12 \\foo)")
        );
    }

    #[test]
    fn test_error_without_location() {
        assert_eq!(
            extract_diagnostic("! LaTeX Error: File `moderncv.cls' not found.").as_deref(),
            Some("! LaTeX Error: File `moderncv.cls' not found.")
        );
    }

    #[test]
    fn test_clean_log_has_no_diagnostic() {
        assert_eq!(extract_diagnostic("Output written on main.pdf (1 page)."), None);
        assert_eq!(extract_diagnostic(""), None);
    }

    #[test]
    fn test_diagnostic_is_truncated() {
        let log = format!("! {}", "x".repeat(2000));
        assert_eq!(extract_diagnostic(&log).unwrap().chars().count(), MAX_DIAGNOSTIC_CHARS);
    }

    async fn spawn_compiler() -> String {
        let router = Router::new().route(
            "/compile",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let text = params.get("text").cloned().unwrap_or_default();
                if text.contains("\\begin{document}") {
                    (StatusCode::OK, b"%PDF-1.5 fake".to_vec())
                } else {
                    (StatusCode::BAD_REQUEST, TEX_LOG.as_bytes().to_vec())
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/compile")
    }

    #[tokio::test]
    async fn test_remote_compile_success() {
        let compiler = RemoteCompiler::new(&spawn_compiler().await).unwrap();
        let pdf = compiler
            .compile("\\documentclass{article}\n\\begin{document}\nHi & bye 100%\n\\end{document}")
            .await
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_remote_compile_failure_surfaces_diagnostic() {
        let compiler = RemoteCompiler::new(&spawn_compiler().await).unwrap();
        let err = compiler.compile("\\foo").await.unwrap_err();
        match err {
            CompileError::Diagnostics(msg) => assert!(msg.starts_with("! Undefined control sequence.")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
