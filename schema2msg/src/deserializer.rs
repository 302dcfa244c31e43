use std::collections::BTreeSet;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// A keyword that may hold either one value or a list of them, e.g. `"type": "string"` and
/// `"type": ["string", "null"]`, or `items` as a single schema versus a tuple of schemas.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Vec(Vec<T>),
    Single(Box<T>),
}

impl<T> SingleOrVec<T> {
    /// The single value, or the first entry of the list
    pub fn first(&self) -> Option<&T> {
        match self {
            SingleOrVec::Single(value) => Some(value),
            SingleOrVec::Vec(values) => values.first(),
        }
    }
}

/// A keyword holding an unexpected JSON shape is read as absent
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A subschema. Boolean schemas (`true`/`false`) and other non-object shapes carry no keywords.
fn subschema(value: Value) -> SchemaNode {
    serde_json::from_value(value).unwrap_or_default()
}

fn lenient_items<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SingleOrVec<SchemaNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(values) => SingleOrVec::Vec(values.into_iter().map(subschema).collect()),
        value => SingleOrVec::Single(Box::new(subschema(value))),
    };
    Ok(Some(items))
}

fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<SchemaNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(Some(values.into_iter().map(subschema).collect())),
        _ => Ok(None),
    }
}

fn lenient_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<IndexMap<String, SchemaNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(
            map.into_iter()
                .map(|(name, value)| (name, subschema(value)))
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn lenient_definitions<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, SchemaNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_map(deserializer)?.unwrap_or_default())
}

/// Informational keywords. Only `title` takes part in code generation.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename = "$id", deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    pub default: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub deprecated: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub read_only: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub write_only: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub examples: Option<Vec<Value>>,
}

/// One JSON-Schema subtree. Every keyword is optional, unknown keywords
/// (`additionalProperties`, `maxItems`, ...) are ignored and so are known keywords
/// holding a value of the wrong JSON type.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SchemaNode {
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Kept as raw names so that unknown type names degrade to an untyped parameter
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub instance_type: Option<SingleOrVec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(rename = "enum", deserialize_with = "lenient")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(rename = "const")]
    pub const_value: Option<Value>,
    #[serde(rename = "$ref", deserialize_with = "lenient")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "lenient_items")]
    pub items: Option<SingleOrVec<SchemaNode>>,
    #[serde(deserialize_with = "lenient")]
    pub required: Option<BTreeSet<String>>,
    /// Insertion ordered, generated parameters follow declaration order
    #[serde(deserialize_with = "lenient_map")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(rename = "allOf", deserialize_with = "lenient_list")]
    pub all_of: Option<Vec<SchemaNode>>,
    #[serde(rename = "anyOf", deserialize_with = "lenient_list")]
    pub any_of: Option<Vec<SchemaNode>>,
    #[serde(rename = "oneOf", deserialize_with = "lenient_list")]
    pub one_of: Option<Vec<SchemaNode>>,
}

impl SchemaNode {
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// The declared type name, taking the first entry for `["string", "null"]` style unions
    pub fn primary_type(&self) -> Option<&str> {
        self.instance_type
            .as_ref()
            .and_then(SingleOrVec::first)
            .map(String::as_str)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.contains(property))
    }

    pub fn has_variants(&self) -> bool {
        self.any_of.is_some() || self.one_of.is_some()
    }

    /// `anyOf` entries followed by `oneOf` entries
    pub fn variants(&self) -> impl Iterator<Item = &SchemaNode> {
        self.any_of
            .iter()
            .flatten()
            .chain(self.one_of.iter().flatten())
    }
}

/// A parsed schema file: the root node plus its `definitions` table.
/// Mirrors the `RootSchema` layout emitted by schemars.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct SchemaDocument {
    #[serde(rename = "$schema", default, deserialize_with = "lenient")]
    pub meta_schema: Option<String>,
    #[serde(default, deserialize_with = "lenient_definitions")]
    pub definitions: IndexMap<String, SchemaNode>,
    #[serde(flatten)]
    pub schema: SchemaNode,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses a raw JSON value into a `SchemaDocument`. Definitions and nested schemas are parsed
/// eagerly. Fails only when `raw` is not an object.
pub fn parse(raw: &Value) -> Result<SchemaDocument> {
    if !raw.is_object() {
        return Err(Error::MalformedSchema(format!(
            "expected a JSON object at the document root, found {}",
            json_kind(raw)
        )));
    }
    Ok(SchemaDocument::deserialize(raw)?)
}

impl FromStr for SchemaDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = serde_json::from_str::<Value>(s)?;
        parse(&raw)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_execute_schema() {
        let raw = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "ExecuteMsg",
            "oneOf": [
                {
                    "type": "object",
                    "required": ["swap"],
                    "properties": {
                        "swap": {
                            "type": "object",
                            "required": ["offer_asset"],
                            "properties": {
                                "offer_asset": { "$ref": "#/definitions/Asset" },
                                "to": { "type": ["string", "null"] }
                            }
                        }
                    },
                    "additionalProperties": false
                }
            ],
            "definitions": {
                "Asset": { "type": "object" },
                "Uint128": { "description": "A thin wrapper around u128", "type": "string" }
            }
        });
        let doc = parse(&raw).unwrap();
        assert_eq!(
            doc.meta_schema.as_deref(),
            Some("http://json-schema.org/draft-07/schema#")
        );
        assert_eq!(doc.schema.title(), Some("ExecuteMsg"));
        assert!(doc.schema.has_variants());
        assert_eq!(
            doc.definitions.keys().collect::<Vec<_>>(),
            vec!["Asset", "Uint128"]
        );

        let variant = doc.schema.variants().next().unwrap();
        assert!(variant.is_required("swap"));
        let swap = &variant.properties.as_ref().unwrap()["swap"];
        let props = swap.properties.as_ref().unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["offer_asset", "to"]);
        assert_eq!(
            props["offer_asset"].reference.as_deref(),
            Some("#/definitions/Asset")
        );
        assert_eq!(props["to"].primary_type(), Some("string"));
    }

    #[test]
    fn test_property_order_is_preserved() {
        let doc: SchemaDocument = r#"{
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" },
                "mid": {}
            }
        }"#
        .parse()
        .unwrap();
        let names = doc
            .schema
            .properties
            .unwrap()
            .into_keys()
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        for raw in [json!([1, 2]), json!("schema"), json!(null), json!(3)] {
            let err = parse(&raw).unwrap_err();
            assert!(matches!(err, Error::MalformedSchema(_)), "{err}");
        }
        assert!(matches!(
            "not json".parse::<SchemaDocument>(),
            Err(Error::MalformedSchema(_))
        ));
    }

    #[test]
    fn test_parse_is_permissive() {
        let doc = parse(&json!({})).unwrap();
        assert_eq!(doc, SchemaDocument::default());

        let doc = parse(&json!({ "type": "frobnicate", "x-custom": [1] })).unwrap();
        assert_eq!(doc.schema.primary_type(), Some("frobnicate"));
    }

    #[test]
    fn test_parse_tuple_items_and_metadata() {
        let doc = parse(&json!({
            "type": "array",
            "items": [{ "type": "string" }, { "$ref": "#/definitions/Uint128" }],
            "maxItems": 2,
            "description": "pair of values",
            "deprecated": true,
            "readOnly": false,
            "examples": [["a", "1"]]
        }))
        .unwrap();
        let node = doc.schema;
        assert_eq!(node.metadata.description.as_deref(), Some("pair of values"));
        assert_eq!(node.metadata.deprecated, Some(true));
        assert_eq!(node.metadata.read_only, Some(false));
        assert_eq!(node.metadata.examples.as_ref().map(Vec::len), Some(1));
        match node.items {
            Some(SingleOrVec::Vec(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected tuple items, got {:?}", other),
        }
    }

    #[test]
    fn test_boolean_subschemas() {
        let doc = parse(&json!({
            "title": "ExecuteMsg",
            "oneOf": [{
                "properties": {
                    "custom": { "properties": { "data": true, "memo": { "type": "string" } } }
                }
            }, false],
            "definitions": { "Any": true },
            "items": true
        }))
        .unwrap();
        let variants = doc.schema.variants().collect::<Vec<_>>();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1], &SchemaNode::default());
        let custom = &variants[0].properties.as_ref().unwrap()["custom"];
        let props = custom.properties.as_ref().unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["data", "memo"]);
        assert_eq!(props["data"], SchemaNode::default());
        assert_eq!(props["memo"].primary_type(), Some("string"));
        assert_eq!(doc.definitions["Any"], SchemaNode::default());
        assert_eq!(
            doc.schema.items,
            Some(SingleOrVec::Single(Box::new(SchemaNode::default())))
        );
    }

    #[test]
    fn test_mistyped_keywords_are_ignored() {
        let doc = parse(&json!({
            "$schema": 7,
            "title": 5,
            "type": "object",
            "required": "owner",
            "properties": {
                "owner": { "type": "string", "$ref": false, "description": ["x"] }
            },
            "anyOf": {},
            "definitions": []
        }))
        .unwrap();
        assert_eq!(doc.meta_schema, None);
        assert_eq!(doc.schema.title(), None);
        assert_eq!(doc.schema.primary_type(), Some("object"));
        assert_eq!(doc.schema.required, None);
        assert!(!doc.schema.has_variants());
        assert!(doc.definitions.is_empty());
        let owner = &doc.schema.properties.as_ref().unwrap()["owner"];
        assert_eq!(owner.primary_type(), Some("string"));
        assert_eq!(owner.reference, None);
        assert_eq!(owner.metadata.description, None);
    }

    #[test]
    fn test_unit_enum_variant() {
        let doc = parse(&json!({
            "title": "QueryMsg",
            "anyOf": [{ "type": "string", "enum": ["config", "state"] }]
        }))
        .unwrap();
        let variant = doc.schema.variants().next().unwrap();
        assert_eq!(
            variant.enum_values,
            Some(vec![json!("config"), json!("state")])
        );
    }
}
