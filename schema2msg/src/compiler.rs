use log::warn;

use crate::deserializer::{SchemaDocument, SchemaNode};
use crate::message::{GeneratedFunction, Parameter, PayloadShape};
use crate::resolver::{primitive_from_name, resolve_node_type, Primitive};

/// Namespace of the constructors generated from an enum-shaped message schema
pub fn prefix_for_title(title: &str) -> String {
    match title {
        "ExecuteMsg" => "execute".to_string(),
        "QueryMsg" => "query".to_string(),
        "Cw20HookMsg" => "cw20".to_string(),
        other => other.to_string(),
    }
}

/// Function base name for an object-shaped message schema.
/// `InstantiateMsg` (or no title) gives `instantiate`, any other title is lowercased.
pub fn single_shape_name(title: Option<&str>) -> String {
    match title {
        None | Some("InstantiateMsg") => "instantiate".to_string(),
        Some(title) => title.to_lowercase(),
    }
}

/// Compiles a schema document into message constructors, see [`compile_with_prefix`]
pub fn compile(document: &SchemaDocument) -> Vec<GeneratedFunction> {
    compile_with_prefix(document, None)
}

/// Compiles a schema document into one constructor per message.
///
/// An `object` root without `anyOf`/`oneOf` is a single message (instantiate style), anything
/// else is treated as an enum of variants. `default_prefix` is only used when the root has no
/// title to derive the prefix from.
pub fn compile_with_prefix(
    document: &SchemaDocument,
    default_prefix: Option<&str>,
) -> Vec<GeneratedFunction> {
    let root = &document.schema;
    if root.primary_type() == Some("object") && !root.has_variants() {
        return vec![compile_single(document)];
    }
    let prefix = root
        .title()
        .map(prefix_for_title)
        .or_else(|| default_prefix.map(str::to_string));
    compile_variants(document, prefix)
}

/// Properties of a single message are typed by their own `type` only, a `$ref` stays untyped
fn compile_single(document: &SchemaDocument) -> GeneratedFunction {
    let root = &document.schema;
    let mut function =
        GeneratedFunction::new(single_shape_name(root.title()), None, PayloadShape::Flat);
    add_params(&mut function, root, |property| {
        property.primary_type().and_then(primitive_from_name)
    });
    function
}

/// One parameter per property of `object`, in declaration order
fn add_params(
    function: &mut GeneratedFunction,
    object: &SchemaNode,
    resolve: impl Fn(&SchemaNode) -> Option<Primitive>,
) {
    for (name, property) in object.properties.iter().flatten() {
        function.add_param(Parameter::new(
            name.as_str(),
            resolve(property),
            object.is_required(name),
        ));
    }
}

/// The property key naming the message. CosmWasm variants carry exactly one property; when
/// there are several, a single `required` entry that is also a property key decides.
fn discriminant(variant: &SchemaNode) -> Option<&str> {
    let properties = variant.properties.as_ref()?;
    if properties.len() == 1 {
        return properties.keys().next().map(String::as_str);
    }
    match variant.required.as_ref() {
        Some(required) if required.len() == 1 => required
            .iter()
            .next()
            .filter(|key| properties.contains_key(key.as_str()))
            .map(String::as_str),
        _ => None,
    }
}

/// Unit variants are emitted as `{"type": "string", "enum": [...]}`
fn unit_variant_names(variant: &SchemaNode) -> Option<Vec<&str>> {
    if variant.properties.is_some() {
        return None;
    }
    let values = variant.enum_values.as_ref()?;
    let names = values
        .iter()
        .filter_map(|value| {
            let name = value.as_str();
            if name.is_none() {
                warn!("skipping non-string unit variant {}", value);
            }
            name
        })
        .collect();
    Some(names)
}

fn compile_variants(document: &SchemaDocument, prefix: Option<String>) -> Vec<GeneratedFunction> {
    let mut functions = vec![];
    for variant in document.schema.variants() {
        if let Some(names) = unit_variant_names(variant) {
            functions.extend(
                names
                    .into_iter()
                    .map(|name| GeneratedFunction::new(name, prefix.clone(), PayloadShape::Unit)),
            );
            continue;
        }
        let Some(base_name) = discriminant(variant) else {
            warn!(
                "skipping variant without a single discriminant property (prefix {:?}, title {:?})",
                prefix,
                variant.title()
            );
            continue;
        };
        let mut function = GeneratedFunction::new(base_name, prefix.clone(), PayloadShape::Wrapped);
        if let Some(value) = variant
            .properties
            .as_ref()
            .and_then(|properties| properties.get(base_name))
        {
            add_params(&mut function, value, |property| {
                resolve_node_type(&document.definitions, property)
            });
        }
        functions.push(function);
    }
    functions
}
