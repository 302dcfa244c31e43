//! Generates message constructors from the JSON schemas a CosmWasm contract exports.
//!
//! `raw JSON -> SchemaDocument -> GeneratedFunction* -> source text`

use generator::Target;
use serde_json::Value;

pub mod client;
pub mod compiler;
pub mod contract;
pub mod deserializer;
pub mod error;
pub mod generator;
pub mod message;
pub mod resolver;

pub use client::{to_binary, Contract, ContractClient};
pub use contract::{build_contract, contract_name_from_path, MessageKind};
pub use deserializer::{parse, SchemaDocument, SchemaNode};
pub use error::{Error, Result};
pub use message::{GeneratedClass, GeneratedFunction, Parameter, PayloadShape};

/// Renders the constructors of a single schema document inside a class named `class_name`
pub fn generate(class_name: &str, raw: &Value, target: Target) -> Result<String> {
    let document = parse(raw)?;
    let functions = compiler::compile(&document);
    Ok(generator::render(class_name, &functions, target))
}

/// Generates the class for a whole contract directory
pub fn generate_contract(
    class_name: &str,
    contract_dir: &std::path::Path,
    target: Target,
) -> String {
    let class = build_contract(class_name, contract_dir);
    generator::render_class(&class, target)
}
