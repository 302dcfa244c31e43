mod python_gen;
mod rust_gen;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::message::{GeneratedClass, GeneratedFunction};
use crate::resolver::Primitive;

/// Language the message constructors are emitted in
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Target {
    #[default]
    Python,
    Rust,
}

impl Target {
    /// Name of the target type a JSON-Schema primitive maps to
    pub fn type_name(self, primitive: Primitive) -> &'static str {
        match self {
            Target::Python => match primitive {
                Primitive::Array => "list",
                Primitive::Boolean => "bool",
                Primitive::Integer => "int",
                Primitive::Null => "None",
                Primitive::Number => "float",
                Primitive::Object => "dict",
                Primitive::String => "str",
            },
            Target::Rust => match primitive {
                Primitive::Array => "Vec<serde_json::Value>",
                Primitive::Boolean => "bool",
                Primitive::Integer => "i64",
                Primitive::Null => "()",
                Primitive::Number => "f64",
                Primitive::Object => "serde_json::Value",
                Primitive::String => "String",
            },
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Target::Python),
            "rust" | "rs" => Ok(Target::Rust),
            other => Err(format!("unknown target `{}`, expected `python` or `rust`", other)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Python => f.write_str("python"),
            Target::Rust => f.write_str("rust"),
        }
    }
}

/// Renders a named container holding every function, in the given order
pub fn render(class_name: &str, functions: &[GeneratedFunction], target: Target) -> String {
    match target {
        Target::Python => python_gen::generate_class(class_name, functions),
        Target::Rust => rust_gen::generate_class(class_name, functions),
    }
}

pub fn render_class(class: &GeneratedClass, target: Target) -> String {
    render(&class.name, &class.functions, target)
}

/// Replaces every character outside `[A-Za-z0-9_]`. Keywords are left to the targets.
pub(crate) fn normalize_identifier(name: &str) -> String {
    let mut out = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Target identifier of every parameter of `function`, keyed by parameter name.
/// Names that collide once sanitized get a numeric suffix: `max-spread`, `max_spread` ->
/// `max_spread`, `max_spread_2`.
pub(crate) fn parameter_identifiers<'a>(
    function: &'a GeneratedFunction,
    sanitize: impl Fn(&str) -> String,
) -> HashMap<&'a str, String> {
    let mut taken = HashSet::new();
    let mut identifiers = HashMap::new();
    for param in &function.params {
        let base = sanitize(&param.name);
        let mut ident = base.clone();
        let mut suffix = 2;
        while taken.contains(&ident) {
            ident = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        taken.insert(ident.clone());
        identifiers.insert(param.name.as_str(), ident);
    }
    identifiers
}
