use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a JSON object, or a known keyword holds a value of the wrong shape
    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    #[error("schema file not found: {}", path.display())]
    MissingSchemaFile { path: PathBuf },

    /// A `$ref` that does not lead to a primitive type. Never surfaced by code generation,
    /// the parameter is emitted untyped instead.
    #[error("unresolvable reference `{reference}`: {reason}")]
    UnresolvableReference { reference: String, reason: String },

    #[error("cannot derive a contract name from `{}`", path.display())]
    InvalidContractPath { path: PathBuf },

    #[error("missing required argument `{argument}` for `{function}`")]
    MissingArgument { function: String, argument: String },

    #[error("`{function}` has no parameter named `{argument}`")]
    UnknownArgument { function: String, argument: String },

    #[error("contract client error: {0}")]
    Client(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedSchema(err.to_string())
    }
}
