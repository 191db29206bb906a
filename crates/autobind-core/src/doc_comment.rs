//! Doc-comment mining.
//!
//! Turns a raw comment block into a summary line, per-parameter descriptions
//! and a return description. Pure text processing; no syntax tree access.
//!
//! ```text
//! /**
//!  * @brief Multiplies two integers.
//!  * @param a The first integer.
//!  * @param b The second integer, default is 2.
//!  * @return The product of a and b.
//!  */
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Parameter;

#[allow(clippy::expect_used)] // Safe: literal patterns
static PARAM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[@\\]param(?:\[[a-z, ]*\])?\s+(\w+)\s*(.*)$").expect("valid param regex")
});

#[allow(clippy::expect_used)] // Safe: literal patterns
static RETURN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[@\\]returns?\b\s*(.*)$").expect("valid return regex"));

#[allow(clippy::expect_used)] // Safe: literal patterns
static BRIEF_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[@\\]brief\b\s*(.*)$").expect("valid brief regex"));

#[allow(clippy::expect_used)] // Safe: literal patterns
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[@\\]\w+").expect("valid tag regex"));

/// Description attached to one `@param` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    pub name: String,
    pub description: String,
}

/// Structured content of one comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub summary: Option<String>,
    pub params: Vec<ParamDoc>,
    pub returns: Option<String>,
}

/// Section the next continuation line belongs to.
#[derive(Clone, Copy)]
enum Section {
    None,
    Brief,
    Paragraph,
    Param(usize),
    Return,
    Ignored,
}

impl DocComment {
    /// Parse a raw comment block.
    pub fn parse(raw: &str) -> Self {
        let mut doc = DocComment::default();
        let mut brief: Option<String> = None;
        let mut paragraph: Option<String> = None;
        let mut paragraph_closed = false;
        let mut section = Section::None;

        for line in clean_lines(raw) {
            if line.is_empty() {
                if matches!(section, Section::Paragraph) {
                    paragraph_closed = true;
                }
                section = Section::None;
                continue;
            }

            if let Some(caps) = PARAM_TAG.captures(&line) {
                doc.params.push(ParamDoc {
                    name: caps[1].to_string(),
                    description: caps[2].trim().to_string(),
                });
                section = Section::Param(doc.params.len() - 1);
            } else if let Some(caps) = RETURN_TAG.captures(&line) {
                if doc.returns.is_none() {
                    doc.returns = Some(caps[1].trim().to_string());
                    section = Section::Return;
                } else {
                    section = Section::Ignored;
                }
            } else if let Some(caps) = BRIEF_TAG.captures(&line) {
                brief = Some(caps[1].trim().to_string());
                section = Section::Brief;
            } else if ANY_TAG.is_match(&line) {
                section = Section::Ignored;
            } else {
                match section {
                    Section::Brief => append(&mut brief, &line),
                    Section::Param(idx) => append_str(&mut doc.params[idx].description, &line),
                    Section::Return => {
                        if let Some(returns) = doc.returns.as_mut() {
                            append_str(returns, &line);
                        }
                    }
                    Section::Ignored => {}
                    Section::None | Section::Paragraph => {
                        if paragraph_closed {
                            continue;
                        }
                        append(&mut paragraph, &line);
                        section = Section::Paragraph;
                    }
                }
            }

            if !matches!(section, Section::Paragraph) && paragraph.is_some() {
                paragraph_closed = true;
            }
        }

        doc.summary = brief.or(paragraph).filter(|s| !s.is_empty());
        doc
    }

    /// Assign descriptions to matching parameters and the return comment.
    ///
    /// Tags naming a parameter that does not exist are skipped, and so are
    /// tags without a description.
    pub fn apply(&self, parameters: &mut [Parameter], return_comment: &mut Option<String>) {
        for param_doc in self.params.iter().filter(|d| !d.description.is_empty()) {
            match parameters.iter_mut().find(|p| p.name == param_doc.name) {
                Some(param) => param.comment = Some(param_doc.description.clone()),
                None => tracing::trace!(
                    parameter = %param_doc.name,
                    "doc comment names an unknown parameter"
                ),
            }
        }

        if let Some(returns) = self.returns.as_ref().filter(|r| !r.is_empty()) {
            *return_comment = Some(returns.clone());
        }
    }
}

/// Summary line of a raw comment block.
pub fn summary(raw: &str) -> Option<String> {
    DocComment::parse(raw).summary
}

/// Strip comment delimiters and leading `*` decoration from every line.
fn clean_lines(raw: &str) -> Vec<String> {
    const OPENERS: &[&str] = &["/**<", "/*!<", "///<", "//!<", "/**", "/*!", "///", "//!", "//", "/*"];

    raw.lines()
        .map(|line| {
            let mut line = line.trim();
            for opener in OPENERS {
                if let Some(rest) = line.strip_prefix(opener) {
                    line = rest;
                    break;
                }
            }
            if let Some(rest) = line.trim_end().strip_suffix("*/") {
                line = rest;
            }
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

fn append(target: &mut Option<String>, line: &str) {
    match target {
        Some(text) => append_str(text, line),
        None => *target = Some(line.to_string()),
    }
}

fn append_str(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}
