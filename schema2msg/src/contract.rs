use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use log::{debug, error, info, warn};

use crate::compiler::compile_with_prefix;
use crate::deserializer::SchemaDocument;
use crate::error::{Error, Result};
use crate::message::GeneratedClass;

/// The message schema files exported for a contract, in generation order
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MessageKind {
    Instantiate,
    Execute,
    Query,
    Cw20Hook,
}

impl MessageKind {
    pub const ALL: [MessageKind; 4] = [
        MessageKind::Instantiate,
        MessageKind::Execute,
        MessageKind::Query,
        MessageKind::Cw20Hook,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            MessageKind::Instantiate => "instantiate_msg.json",
            MessageKind::Execute => "execute_msg.json",
            MessageKind::Query => "query_msg.json",
            MessageKind::Cw20Hook => "cw20_hook_msg.json",
        }
    }

    /// Prefix used when the schema itself carries no title
    pub fn default_prefix(self) -> Option<&'static str> {
        match self {
            MessageKind::Instantiate => None,
            MessageKind::Execute => Some("execute"),
            MessageKind::Query => Some("query"),
            MessageKind::Cw20Hook => Some("cw20"),
        }
    }

    /// Only contracts that accept cw20 tokens export a hook message
    pub fn is_optional(self) -> bool {
        matches!(self, MessageKind::Cw20Hook)
    }
}

/// `terraswap pair-v2` -> `Terraswap_Pair_V2`
pub fn class_name(raw: &str) -> String {
    raw.split([' ', '-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Derives the class name of a contract from its directory.
///
/// The segment following a `contracts` component wins (`./terraswap/contracts/terraswap_pair`),
/// otherwise the last directory of the path is used, skipping a trailing `schema` directory.
pub fn contract_name_from_path(path: &Path) -> Result<String> {
    let invalid = || Error::InvalidContractPath {
        path: path.to_path_buf(),
    };
    let segments = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>();
    let raw = match segments.iter().position(|segment| segment == "contracts") {
        Some(index) => segments.get(index + 1).ok_or_else(invalid)?,
        None => {
            let mut rest = segments.iter().rev();
            match rest.next() {
                Some(last) if last == "schema" => rest.next(),
                last => last,
            }
            .ok_or_else(invalid)?
        }
    };
    let name = class_name(raw);
    if name.is_empty() {
        return Err(invalid());
    }
    Ok(name)
}

/// Schema files live in `<contract>/schema/` when the contract crate layout is used
pub fn schema_dir(contract_dir: &Path) -> PathBuf {
    let nested = contract_dir.join("schema");
    if nested.is_dir() {
        nested
    } else {
        contract_dir.to_path_buf()
    }
}

pub fn load_schema(schema_dir: &Path, kind: MessageKind) -> Result<SchemaDocument> {
    let path = schema_dir.join(kind.file_name());
    let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::MissingSchemaFile { path: path.clone() },
        _ => Error::Io {
            path: path.clone(),
            source,
        },
    })?;
    content.parse()
}

/// Generates the message constructors of every schema file found for a contract.
/// A file that is missing or malformed is logged and skipped, the others are still processed.
pub fn build_contract(class_name: &str, contract_dir: &Path) -> GeneratedClass {
    let dir = schema_dir(contract_dir);
    let mut class = GeneratedClass::new(class_name);
    for kind in MessageKind::ALL {
        match load_schema(&dir, kind) {
            Ok(document) => {
                let functions = compile_with_prefix(&document, kind.default_prefix());
                info!("{}: {} message(s)", kind.file_name(), functions.len());
                class.extend(functions);
            }
            Err(err @ Error::MissingSchemaFile { .. }) if kind.is_optional() => {
                debug!("{}", err)
            }
            Err(err @ Error::MissingSchemaFile { .. }) => warn!("{}", err),
            Err(err) => error!("skipping {}: {}", kind.file_name(), err),
        }
    }
    class
}
