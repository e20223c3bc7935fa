//! Source views
//!
//! A source page shows a documented file with numbered, linkable lines.
//! Reading the file and highlighting it are separate capabilities so the
//! generator can run against sources that do not live on disk.

use std::io;
use std::path::{Path, PathBuf};

use crate::html::escape_html;

/// Turns raw source text into an HTML fragment
pub trait SourceHighlighter: Send + Sync {
    fn highlight(&self, content: &str) -> String;
}

/// Reads the content of a documented file
pub trait SourceReader: Send + Sync {
    fn read(&self, file: &Path) -> io::Result<String>;
}

/// Escapes the source and numbers every line. Line `n` gets the id `n`
/// so symbol pages can deep-link with `#n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl SourceHighlighter for PlainHighlighter {
    fn highlight(&self, content: &str) -> String {
        let lines: Vec<&str> = content.lines().collect();
        let width = lines.len().to_string().len();
        let mut output = String::with_capacity(content.len() * 2);

        output.push_str("<pre class=\"source\"><code>");
        for (number, line) in (1..).zip(&lines) {
            output.push_str(&format!(
                "<span class=\"line\" id=\"{number}\"><a class=\"line-number\" href=\"#{number}\">{number:>width$}</a> {}</span>\n",
                escape_html(line)
            ));
        }
        output.push_str("</code></pre>");
        output
    }
}

/// Reads files relative to a root directory. Absolute locations are used
/// as they are.
#[derive(Debug, Clone)]
pub struct FsSourceReader {
    root: PathBuf,
}

impl FsSourceReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceReader for FsSourceReader {
    fn read(&self, file: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(file))
    }
}
