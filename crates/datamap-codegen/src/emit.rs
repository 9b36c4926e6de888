//! TypeScript emission
//!
//! Rendering is pure: every function here returns source text and leaves
//! file placement to the generator.

use datamap_schema::TypedField;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

const INDENT: &str = "  ";

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern compiles")
});

/// Names and imports a mapper module refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperSource<'a> {
    /// Exported mapper constant, e.g. `UserMapper`
    pub mapper_name: &'a str,
    /// Model interface name, e.g. `UserModel`
    pub model_type: &'a str,
    /// Entity interface name, e.g. `UserEntity`
    pub entity_type: &'a str,
    /// Relative import of the model file, without extension
    pub model_import: &'a str,
    /// Relative import of the entity file, without extension
    pub entity_import: &'a str,
    /// Package exporting `Mapper` and `TransformationMap`
    pub runtime_package: &'a str,
}

/// Render `export interface <name> { ... }` with dotted paths nested
pub fn render_interface(name: &str, fields: &[TypedField]) -> String {
    let members: Vec<(&str, &str)> = fields
        .iter()
        .map(|f| (f.path.as_str(), f.declared_type.as_str()))
        .collect();

    let mut out = format!("export interface {name} {{\n");
    for line in render_members(&members) {
        out.push_str(INDENT);
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

/// Render a mapper module whose map is keyed by model path
pub fn render_mapper(source: &MapperSource<'_>, pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "import {{ Mapper, type TransformationMap }} from {}",
        quote(source.runtime_package)
    );
    let _ = writeln!(
        out,
        "import type {{ {} }} from {}",
        source.entity_type,
        quote(source.entity_import)
    );
    let _ = writeln!(
        out,
        "import type {{ {} }} from {}\n",
        source.model_type,
        quote(source.model_import)
    );

    let _ = writeln!(
        out,
        "const transformationMap: TransformationMap<{}, {}> = {{",
        source.model_type, source.entity_type
    );
    for (model_path, entity_path) in pairs {
        let _ = writeln!(
            out,
            "{INDENT}{}: {},",
            property_key(model_path),
            quote(entity_path)
        );
    }
    out.push_str("}\n\n");

    let _ = writeln!(
        out,
        "export const {} = new Mapper<{}, {}>(transformationMap)",
        source.mapper_name, source.entity_type, source.model_type
    );
    out
}

/// A property name as written in an object literal or interface
///
/// Plain identifiers are emitted bare; anything else, including dotted
/// paths, is quoted.
pub fn property_key(name: &str) -> String {
    if IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Single-quoted TypeScript string literal
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Flat members first, then one nested block per first segment in order of
/// first appearance
fn render_members(members: &[(&str, &str)]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut nested: Vec<(&str, Vec<(&str, &str)>)> = Vec::new();

    for &(path, declared_type) in members {
        match path.split_once('.') {
            None => lines.push(format!("{}: {declared_type}", property_key(path))),
            Some((head, rest)) => match nested.iter_mut().find(|(key, _)| *key == head) {
                Some((_, children)) => children.push((rest, declared_type)),
                None => nested.push((head, vec![(rest, declared_type)])),
            },
        }
    }

    for (key, children) in nested {
        lines.push(format!("{}: {{", property_key(key)));
        lines.extend(
            render_members(&children)
                .into_iter()
                .map(|line| format!("{INDENT}{line}")),
        );
        lines.push("}".to_string());
    }

    lines
}
