//! The chain side of message construction. Generated payloads are handed to a
//! [`ContractClient`] that is passed in explicitly, there is no process-wide connection.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::info;
use serde_json::Value;

use crate::error::{Error, Result};

/// Capabilities of a chain client able to run CosmWasm contracts
pub trait ContractClient {
    /// Uploads wasm byte code and returns its code id
    fn store(&mut self, code: &[u8]) -> Result<u64>;
    /// Instantiates stored code and returns the contract address
    fn instantiate(&mut self, code_id: u64, msg: &Value) -> Result<String>;
    fn execute(&mut self, address: &str, msg: &Value) -> Result<Value>;
    fn query(&self, address: &str, msg: &Value) -> Result<Value>;
}

/// Nested messages such as a cw20 `send` hook travel base64 encoded
pub fn to_binary(msg: &Value) -> String {
    STANDARD.encode(msg.to_string())
}

/// A deployed (or to be deployed) contract, tracking its code id and address
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Contract {
    pub name: String,
    pub code_id: Option<u64>,
    pub address: Option<String>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code_id: None,
            address: None,
        }
    }

    /// Attaches to a contract that is already instantiated
    pub fn at(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::new(name)
        }
    }

    pub fn store<C: ContractClient>(&mut self, client: &mut C, code: &[u8]) -> Result<u64> {
        let code_id = client.store(code)?;
        info!("code id of {}: {}", self.name, code_id);
        self.code_id = Some(code_id);
        Ok(code_id)
    }

    pub fn instantiate<C: ContractClient>(&mut self, client: &mut C, msg: &Value) -> Result<&str> {
        let code_id = self
            .code_id
            .ok_or_else(|| Error::Client(format!("contract `{}` has no stored code", self.name)))?;
        let address = client.instantiate(code_id, msg)?;
        info!("{} (code id {}) instantiated at {}", self.name, code_id, address);
        Ok(self.address.insert(address).as_str())
    }

    fn address(&self) -> Result<&str> {
        self.address
            .as_deref()
            .ok_or_else(|| Error::Client(format!("contract `{}` is not instantiated", self.name)))
    }

    pub fn execute<C: ContractClient>(&self, client: &mut C, msg: &Value) -> Result<Value> {
        client.execute(self.address()?, msg)
    }

    pub fn query<C: ContractClient>(&self, client: &C, msg: &Value) -> Result<Value> {
        client.query(self.address()?, msg)
    }
}
