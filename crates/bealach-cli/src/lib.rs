// SPDX-License-Identifier: MIT OR Apache-2.0
//! # bealach-cli
//!
//! Command-line front end for [`bealach`] dot-path queries.
//!
//! ## Usage
//!
//! ```bash
//! # One path against a file
//! bealach data.json name.last
//!
//! # Several paths, document on stdin
//! cat data.json | bealach - name.first age 'friends.#'
//!
//! # Every line of a JSON lines stream, raw JSON output
//! bealach --jsonl --raw events.jsonl payload.user
//!
//! # Fail when a path is missing, report as JSON
//! bealach --require --format json data.json widget.window.name
//! ```
//!
//! ## Options
//!
//! | Flag | Description |
//! |------|-------------|
//! | `--raw` | print matched JSON text instead of the string view |
//! | `--jsonl` | query every input line as its own document |
//! | `--require` | exit with status 1 when any path is missing |
//! | `--format text\|json` | plain lines, or one JSON report per result |
//! | `-v` | debug logging on stderr (`RUST_LOG` overrides) |

#![warn(missing_docs)]

use anyhow::Context;
use bealach::{BealachError, Kind, ParsedPath, Value};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Output encoding for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per result
    #[default]
    Text,
    /// One JSON object per result
    Json,
}

/// How results are written
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the matched JSON text rather than its string view
    pub raw: bool,
    /// Output encoding
    pub format: OutputFormat,
}

/// A single result in `--format json` output
#[derive(Debug, Serialize)]
pub struct Report<'r> {
    /// Path as given on the command line
    pub path: &'r str,
    /// Zero-based input line, in JSON lines mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Whether the path matched
    pub exists: bool,
    /// Kind of the matched value
    pub kind: Kind,
    /// Rendered value, empty when missing
    pub value: String,
}

/// Paths parsed once and applied to every document
#[derive(Debug)]
pub struct Session<'p> {
    queries: Vec<(&'p str, ParsedPath<'p>)>,
    options: RenderOptions,
    missing: Option<String>,
}

impl<'p> Session<'p> {
    /// Parse `paths` for repeated use
    #[must_use]
    pub fn new(paths: &'p [String], options: RenderOptions) -> Self {
        let queries = paths
            .iter()
            .map(|p| (p.as_str(), ParsedPath::parse(p)))
            .collect();
        Self {
            queries,
            options,
            missing: None,
        }
    }

    /// Query one document and write a result per path
    ///
    /// # Errors
    ///
    /// Fails when the output cannot be written.
    pub fn run_document<W: Write>(
        &mut self,
        doc: &[u8],
        line: Option<usize>,
        out: &mut W,
    ) -> anyhow::Result<()> {
        for (text, parsed) in &self.queries {
            let value = bealach::query(doc, parsed);
            if !value.exists() && self.missing.is_none() {
                debug!(path = *text, ?line, "path not found");
                self.missing = Some((*text).to_string());
            }
            let rendered = render(&value, self.options.raw);
            match self.options.format {
                OutputFormat::Text => writeln!(out, "{rendered}")?,
                OutputFormat::Json => {
                    let report = Report {
                        path: text,
                        line,
                        exists: value.exists(),
                        kind: value.kind(),
                        value: rendered,
                    };
                    serde_json::to_writer(&mut *out, &report)
                        .context("failed to encode report")?;
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    /// Query every non-blank line of a JSON lines buffer
    ///
    /// # Errors
    ///
    /// Fails when the output cannot be written.
    pub fn run_lines<W: Write>(&mut self, input: &[u8], out: &mut W) -> anyhow::Result<()> {
        let mut start = 0;
        let ends = memchr::memchr_iter(b'\n', input).chain(std::iter::once(input.len()));
        for (line, end) in ends.enumerate() {
            let doc = &input[start..end];
            start = end + 1;
            if doc.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            self.run_document(doc, Some(line), out)?;
        }
        Ok(())
    }

    /// First path that failed to match in any document so far
    #[must_use]
    pub fn first_missing(&self) -> Option<&str> {
        self.missing.as_deref()
    }

    /// Check that every path matched
    ///
    /// # Errors
    ///
    /// Returns [`BealachError::NotFound`] naming the first missing path.
    pub fn finish(self) -> bealach::Result<()> {
        match self.missing {
            Some(path) => Err(BealachError::NotFound { path }),
            None => Ok(()),
        }
    }
}

fn render(value: &Value<'_>, raw: bool) -> String {
    if raw {
        value.json().into_owned()
    } else {
        value.to_string()
    }
}
