use std::collections::HashMap;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::debug;

use crate::deserializer::SchemaNode;
use crate::error::{Error, Result};
use crate::generator::Target;

/// The JSON-Schema instance types, independent of the language being generated
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Primitive {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

lazy_static! {
    static ref PRIMITIVES: HashMap<&'static str, Primitive> = [
        ("array", Primitive::Array),
        ("boolean", Primitive::Boolean),
        ("integer", Primitive::Integer),
        ("null", Primitive::Null),
        ("number", Primitive::Number),
        ("object", Primitive::Object),
        ("string", Primitive::String),
    ]
    .into_iter()
    .collect();
}

/// Unknown names map to `None`, schema producers are free to invent their own
pub fn primitive_from_name(name: &str) -> Option<Primitive> {
    PRIMITIVES.get(name).copied()
}

pub fn primitive_to_target_type(name: &str, target: Target) -> Option<&'static str> {
    primitive_from_name(name).map(|primitive| target.type_name(primitive))
}

fn unresolvable(reference: &str, reason: &str) -> Error {
    Error::UnresolvableReference {
        reference: reference.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolves `#/definitions/<Name>` to the primitive type of that definition.
///
/// Only one level is followed: a definition that is itself a `$ref` or a combinator
/// (`allOf`/`anyOf`/`oneOf`) is reported as unresolvable rather than chased further.
pub fn try_resolve_ref(
    definitions: &IndexMap<String, SchemaNode>,
    reference: &str,
) -> Result<Primitive> {
    let name = reference.rsplit('/').next().unwrap_or_default();
    if name.is_empty() {
        return Err(unresolvable(reference, "no definition name"));
    }
    let definition = definitions
        .get(name)
        .ok_or_else(|| unresolvable(reference, "no such definition"))?;
    if definition.reference.is_some()
        || definition.all_of.is_some()
        || definition.any_of.is_some()
        || definition.one_of.is_some()
    {
        return Err(unresolvable(
            reference,
            "definition is a reference or a combinator, nested references are not followed",
        ));
    }
    let type_name = definition
        .primary_type()
        .ok_or_else(|| unresolvable(reference, "definition declares no type"))?;
    primitive_from_name(type_name).ok_or_else(|| unresolvable(reference, "unknown type name"))
}

/// Like [`try_resolve_ref`], absorbing the failure into an untyped result
pub fn resolve_ref(definitions: &IndexMap<String, SchemaNode>, reference: &str) -> Option<Primitive> {
    match try_resolve_ref(definitions, reference) {
        Ok(primitive) => Some(primitive),
        Err(err) => {
            debug!("leaving parameter untyped: {}", err);
            None
        }
    }
}

fn resolve_direct(definitions: &IndexMap<String, SchemaNode>, node: &SchemaNode) -> Option<Primitive> {
    if let Some(type_name) = node.primary_type() {
        let primitive = primitive_from_name(type_name);
        if primitive.is_none() {
            debug!("leaving parameter untyped: unknown type name `{}`", type_name);
        }
        return primitive;
    }
    node.reference
        .as_deref()
        .and_then(|reference| resolve_ref(definitions, reference))
}

/// Type of a property schema: its own `type`, else its `$ref`, else the single entry of an
/// `allOf` wrapper (schema generators use that shape to attach a description to a reference).
pub fn resolve_node_type(
    definitions: &IndexMap<String, SchemaNode>,
    node: &SchemaNode,
) -> Option<Primitive> {
    if node.instance_type.is_some() || node.reference.is_some() {
        return resolve_direct(definitions, node);
    }
    match node.all_of.as_deref() {
        Some([inner]) => resolve_direct(definitions, inner),
        _ => None,
    }
}
