use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;

use crate::fsio::write_lines_atomic;
use crate::{GuextError, Result};

/// Directive lines split away from the body of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Removed lines, original text, in file order.
    pub directives: Vec<String>,
    /// Retained lines, verbatim, in file order.
    pub body: Vec<String>,
}

/// Classifies each line by whether its left-trimmed text starts with `prefix`.
pub fn split_directives<I, S>(lines: I, prefix: &str) -> Extraction
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut extraction = Extraction::default();
    for line in lines {
        let line = line.into();
        if line.trim_start().starts_with(prefix) {
            extraction.directives.push(line);
        } else {
            extraction.body.push(line);
        }
    }
    extraction
}

/// Removes directive lines from source files in place.
pub struct DirectiveExtractor {
    prefix: String,
}

impl DirectiveExtractor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Rewrites `path` without its directive lines and returns them.
    ///
    /// Every retained line is written back with a single `\n`. A file whose
    /// rewrite would be byte-identical is left alone.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<String>> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|err| GuextError::io("open", path, err))?;
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|err| GuextError::io("read", path, err))?;
        drop(file);

        let Extraction { directives, body } = split_directives(text.lines(), &self.prefix);

        if directives.is_empty() && render(&body) == text {
            log::debug!("{}: no directives", path.display());
            return Ok(directives);
        }

        write_lines_atomic(path, body.as_slice())?;
        log::debug!(
            "{}: removed {} directive(s), kept {} line(s)",
            path.display(),
            directives.len(),
            body.len()
        );
        Ok(directives)
    }
}

fn render(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
