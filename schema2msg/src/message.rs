use log::warn;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::resolver::Primitive;

/// One argument of a generated message constructor
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// `None` renders an untyped parameter
    pub primitive: Option<Primitive>,
    pub required: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, primitive: Option<Primitive>, required: bool) -> Self {
        Self {
            name: name.into(),
            primitive,
            required,
        }
    }
}

/// How the payload of a message is laid out
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PayloadShape {
    /// `{"param": param, ...}`, the instantiate message
    Flat,
    /// `{"<base_name>": {"param": param, ...}}`, one variant of an execute/query/hook enum
    Wrapped,
    /// `"<base_name>"`, a unit variant serialized as a bare string
    Unit,
}

/// A message constructor: plain data consumed by every generator target
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GeneratedFunction {
    pub base_name: String,
    pub prefix: Option<String>,
    pub params: Vec<Parameter>,
    pub shape: PayloadShape,
}

impl GeneratedFunction {
    pub fn new(base_name: impl Into<String>, prefix: Option<String>, shape: PayloadShape) -> Self {
        Self {
            base_name: base_name.into(),
            prefix,
            params: vec![],
            shape,
        }
    }

    /// Parameter names are unique, a repeated name is dropped
    pub fn add_param(&mut self, param: Parameter) {
        if self.params.iter().any(|p| p.name == param.name) {
            warn!(
                "duplicate parameter `{}` in `{}`, keeping the first one",
                param.name,
                self.function_name()
            );
            return;
        }
        self.params.push(param);
    }

    /// `<prefix>_<base_name>_msg`, or `<base_name>_msg` without a prefix
    pub fn function_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}_msg", prefix, self.base_name),
            None => format!("{}_msg", self.base_name),
        }
    }

    /// Required parameters first, each group keeping declaration order
    pub fn ordered_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params
            .iter()
            .filter(|p| p.required)
            .chain(self.params.iter().filter(|p| !p.required))
    }

    /// Builds the payload the generated function returns for the given arguments.
    /// Optional parameters that are not supplied become `null`.
    pub fn build_payload(&self, mut args: Map<String, Value>) -> Result<Value> {
        let mut fields = Map::new();
        for param in &self.params {
            match args.remove(&param.name) {
                Some(value) => {
                    fields.insert(param.name.clone(), value);
                }
                None if param.required => {
                    return Err(Error::MissingArgument {
                        function: self.function_name(),
                        argument: param.name.clone(),
                    })
                }
                None => {
                    fields.insert(param.name.clone(), Value::Null);
                }
            }
        }
        if let Some(argument) = args.keys().next() {
            return Err(Error::UnknownArgument {
                function: self.function_name(),
                argument: argument.clone(),
            });
        }
        let payload = match self.shape {
            PayloadShape::Flat => Value::Object(fields),
            PayloadShape::Wrapped => {
                let mut wrapper = Map::new();
                wrapper.insert(self.base_name.clone(), Value::Object(fields));
                Value::Object(wrapper)
            }
            PayloadShape::Unit => Value::String(self.base_name.clone()),
        };
        Ok(payload)
    }
}

/// All message constructors of one contract, in schema file order
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GeneratedClass {
    pub name: String,
    pub functions: Vec<GeneratedFunction>,
}

impl GeneratedClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: vec![],
        }
    }

    pub fn add_function(&mut self, function: GeneratedFunction) {
        self.functions.push(function);
    }

    pub fn find(&self, function_name: &str) -> Option<&GeneratedFunction> {
        self.functions
            .iter()
            .find(|f| f.function_name() == function_name)
    }
}

impl Extend<GeneratedFunction> for GeneratedClass {
    fn extend<I: IntoIterator<Item = GeneratedFunction>>(&mut self, iter: I) {
        self.functions.extend(iter)
    }
}
