//! Version templates
//!
//! A template such as `{name}={version}` turns a package into the identifier a
//! manager expects on its command line. Placeholder syntax is checked when the
//! template is parsed; placeholder names are checked when it is rendered.

use std::fmt;

use scfg_model::Package;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed `{field}` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl VersionTemplate {
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidTemplate {
            template: source.to_string(),
            message: message.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find(['{', '}']) {
            if rest[start..].starts_with('}') {
                return Err(invalid("unmatched `}`"));
            }
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| invalid("unclosed `{`"))?;
            let field = after[..end].trim();
            if field.is_empty() || field.contains('{') {
                return Err(invalid("empty or nested placeholder"));
            }

            segments.push(Segment::Field(field.to_string()));
            rest = &after[end + 1..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Substitute `name` and `version` from `pkg`. Any other placeholder is an error.
    pub fn render(&self, pkg: &Package) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => match field.as_str() {
                    "name" => out.push_str(pkg.name()),
                    "version" => out.push_str(pkg.version().unwrap_or_default()),
                    other => {
                        return Err(Error::InvalidTemplate {
                            template: self.source.clone(),
                            message: format!("unknown placeholder `{}`", other),
                        });
                    }
                },
            }
        }
        Ok(out)
    }
}

impl fmt::Display for VersionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
