//! Schema text parser
//!
//! The format is line oriented. A line ending in `:` opens a group; every
//! other non-blank line is a mapping line of the form
//! `source: type [<=> target]` belonging to the most recent group.

use crate::model::{EntityGroup, FieldMapping, SchemaDocument};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Separates the model side of a mapping line from its entity path.
pub const TARGET_SEPARATOR: &str = "<=>";

/// What to do when a group name or a source path appears twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later declaration replaces the earlier one in its original
    /// position. For a group header, the group's previous fields are
    /// discarded.
    #[default]
    LastWins,

    /// Fail with `DuplicateSourcePath` or `DuplicateGroup`
    Reject,
}

/// Parser options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub duplicates: DuplicatePolicy,
}

impl ParseOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate policy
    #[must_use]
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

/// Line-oriented schema parser
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    options: ParseOptions,
}

/// A classified input line
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Header(&'a str),
    Mapping(FieldMapping),
}

/// Position of a group in the document and where its source paths were seen
struct OpenGroup {
    index: usize,
    seen: HashMap<String, (usize, usize)>,
}

impl SchemaParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit options
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Create a parser that rejects duplicates
    pub fn strict() -> Self {
        Self::with_options(ParseOptions::new().duplicates(DuplicatePolicy::Reject))
    }

    /// Options in effect
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse schema text into a document
    ///
    /// # Errors
    ///
    /// Returns `MalformedSchema` for mapping lines outside any group, lines
    /// that cannot be split into a source path and a type, and invalid group
    /// names. Returns `DuplicateSourcePath` or `DuplicateGroup` when the
    /// duplicate policy is `Reject`.
    pub fn parse(&self, text: &str) -> Result<SchemaDocument> {
        let mut document = SchemaDocument::new();
        let mut group_lines: HashMap<String, (usize, usize)> = HashMap::new();
        let mut current: Option<OpenGroup> = None;

        for (offset, raw) in text.lines().enumerate() {
            let line_no = offset + 1;
            let group_name = current
                .as_ref()
                .map(|open| document.groups[open.index].name.as_str());

            match classify(raw, line_no, group_name)? {
                Line::Blank => {}
                Line::Header(name) => {
                    current = Some(self.open_group(&mut document, &mut group_lines, name, line_no)?);
                }
                Line::Mapping(field) => {
                    let Some(open) = current.as_mut() else {
                        return Err(Error::malformed(
                            None,
                            line_no,
                            format!(
                                "mapping line '{}' appears before any group header",
                                raw.trim()
                            ),
                        ));
                    };
                    self.push_field(&mut document.groups[open.index], open, field, line_no)?;
                }
            }
        }

        debug!(groups = document.len(), "Parsed schema");
        Ok(document)
    }

    fn open_group(
        &self,
        document: &mut SchemaDocument,
        group_lines: &mut HashMap<String, (usize, usize)>,
        name: &str,
        line_no: usize,
    ) -> Result<OpenGroup> {
        if let Some(&(index, first_line)) = group_lines.get(name) {
            match self.options.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateGroup {
                        group: name.to_owned(),
                        line: line_no,
                        first_line,
                    });
                }
                DuplicatePolicy::LastWins => {
                    warn!(
                        group = name,
                        line = line_no,
                        first_line,
                        "Group declared twice, replacing earlier fields"
                    );
                    document.groups[index].fields.clear();
                    return Ok(OpenGroup {
                        index,
                        seen: HashMap::new(),
                    });
                }
            }
        }

        trace!(group = name, line = line_no, "Opening group");
        let index = document.groups.len();
        document.groups.push(EntityGroup::new(name));
        group_lines.insert(name.to_owned(), (index, line_no));
        Ok(OpenGroup {
            index,
            seen: HashMap::new(),
        })
    }

    fn push_field(
        &self,
        group: &mut EntityGroup,
        open: &mut OpenGroup,
        field: FieldMapping,
        line_no: usize,
    ) -> Result<()> {
        if let Some(&(position, first_line)) = open.seen.get(&field.source_path) {
            return match self.options.duplicates {
                DuplicatePolicy::Reject => Err(Error::DuplicateSourcePath {
                    group: group.name.clone(),
                    path: field.source_path,
                    line: line_no,
                    first_line,
                }),
                DuplicatePolicy::LastWins => {
                    warn!(
                        group = %group.name,
                        path = %field.source_path,
                        line = line_no,
                        first_line,
                        "Source path declared twice, keeping the later mapping"
                    );
                    group.fields[position] = field;
                    Ok(())
                }
            };
        }

        open.seen
            .insert(field.source_path.clone(), (group.fields.len(), line_no));
        group.fields.push(field);
        Ok(())
    }
}

/// Parse schema text with default options
///
/// # Errors
///
/// See [`SchemaParser::parse`].
pub fn parse(text: &str) -> Result<SchemaDocument> {
    SchemaParser::new().parse(text)
}

fn classify<'a>(raw: &'a str, line_no: usize, group: Option<&str>) -> Result<Line<'a>> {
    let line = raw.trim_end();
    if line.trim_start().is_empty() {
        return Ok(Line::Blank);
    }

    if let Some(name) = line.strip_suffix(':') {
        let name = name.trim();
        if name.is_empty() || name.contains(':') || name.contains(char::is_whitespace) {
            return Err(Error::malformed(
                group,
                line_no,
                format!("invalid group header '{}'", line.trim()),
            ));
        }
        return Ok(Line::Header(name));
    }

    parse_mapping(line, line_no, group).map(Line::Mapping)
}

fn parse_mapping(line: &str, line_no: usize, group: Option<&str>) -> Result<FieldMapping> {
    let (left, target) = match line.split_once(TARGET_SEPARATOR) {
        Some((_, right)) if right.contains(TARGET_SEPARATOR) => {
            return Err(Error::malformed(
                group,
                line_no,
                format!("more than one '{TARGET_SEPARATOR}' in '{}'", line.trim()),
            ));
        }
        Some((left, right)) => (left, Some(right.trim())),
        None => (line, None),
    };

    let Some((source, declared_type)) = left.split_once(':') else {
        return Err(Error::malformed(
            group,
            line_no,
            format!("expected '<source>: <type>', found '{}'", left.trim()),
        ));
    };

    let source = source.trim();
    let declared_type = declared_type.trim();
    if source.is_empty() {
        return Err(Error::malformed(group, line_no, "empty source path"));
    }
    if declared_type.is_empty() {
        return Err(Error::malformed(
            group,
            line_no,
            format!("missing declared type for '{source}'"),
        ));
    }

    let target = target.filter(|t| !t.is_empty()).unwrap_or(source);
    Ok(FieldMapping::new(source, declared_type, target))
}
