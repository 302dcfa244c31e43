use std::collections::HashMap;

use super::{normalize_identifier, parameter_identifiers, Target};
use crate::message::{GeneratedFunction, Parameter, PayloadShape};

const INDENT: &str = "    ";

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// `from` -> `from_`, the payload key keeps the original spelling
fn identifier(name: &str) -> String {
    let mut ident = normalize_identifier(name);
    if KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// A double quoted string literal, JSON escaping is valid Python
fn string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn generate_arg(param: &Parameter, ident: &str) -> String {
    let mut arg = ident.to_string();
    match (param.primitive, param.required) {
        (Some(primitive), true) => {
            arg.push_str(": ");
            arg.push_str(Target::Python.type_name(primitive));
        }
        (Some(primitive), false) => {
            arg.push_str(": ");
            arg.push_str(Target::Python.type_name(primitive));
            arg.push_str(" = None");
        }
        (None, true) => {}
        (None, false) => arg.push_str("=None"),
    }
    arg
}

fn generate_fields(function: &GeneratedFunction, idents: &HashMap<&str, String>) -> String {
    let fields = function
        .params
        .iter()
        .map(|param| format!("{}: {}", string_literal(&param.name), idents[param.name.as_str()]))
        .collect::<Vec<_>>();
    format!("{{{}}}", fields.join(", "))
}

fn generate_body(function: &GeneratedFunction, idents: &HashMap<&str, String>) -> String {
    match function.shape {
        PayloadShape::Flat => generate_fields(function, idents),
        PayloadShape::Wrapped => format!(
            "{{{}: {}}}",
            string_literal(&function.base_name),
            generate_fields(function, idents)
        ),
        PayloadShape::Unit => string_literal(&function.base_name),
    }
}

pub(super) fn generate_function(function: &GeneratedFunction) -> Vec<String> {
    let idents = parameter_identifiers(function, identifier);
    let args = function
        .ordered_params()
        .map(|param| generate_arg(param, &idents[param.name.as_str()]))
        .collect::<Vec<_>>();
    vec![
        "@staticmethod".to_string(),
        format!(
            "def {}({}):",
            identifier(&function.function_name()),
            args.join(", ")
        ),
        format!("{}return {}", INDENT, generate_body(function, &idents)),
    ]
}

pub fn generate_class(class_name: &str, functions: &[GeneratedFunction]) -> String {
    let mut lines = vec![format!("class {}:", identifier(class_name))];
    if functions.is_empty() {
        lines.push(format!("{}pass", INDENT));
    }
    for function in functions {
        lines.push(String::new());
        lines.extend(
            generate_function(function)
                .into_iter()
                .map(|line| format!("{}{}", INDENT, line)),
        );
    }
    let mut code = lines.join("\n");
    code.push('\n');
    code
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::resolver::Primitive;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_arg() {
        let arg = |primitive, required| {
            generate_arg(&Parameter::new("amount", primitive, required), "amount")
        };
        assert_eq!(arg(Some(Primitive::Integer), false), "amount: int = None");
        assert_eq!(arg(Some(Primitive::Integer), true), "amount: int");
        assert_eq!(arg(None, true), "amount");
        assert_eq!(arg(None, false), "amount=None");
        assert_eq!(identifier("from"), "from_");
    }

    #[test]
    fn test_generate_swap_function() {
        let mut f = GeneratedFunction::new("swap", Some("execute".into()), PayloadShape::Wrapped);
        f.add_param(Parameter::new("to", Some(Primitive::String), false));
        f.add_param(Parameter::new("offer_asset", Some(Primitive::Object), true));
        assert_eq!(
            generate_function(&f),
            vec![
                "@staticmethod",
                "def execute_swap_msg(offer_asset: dict, to: str = None):",
                r#"    return {"swap": {"to": to, "offer_asset": offer_asset}}"#,
            ]
        );
    }

    #[test]
    fn test_generate_flat_and_unit_bodies() {
        let mut f = GeneratedFunction::new("instantiate", None, PayloadShape::Flat);
        f.add_param(Parameter::new("owner", Some(Primitive::String), true));
        f.add_param(Parameter::new("lambda", None, false));
        assert_eq!(
            generate_function(&f)[1..].to_vec(),
            vec![
                "def instantiate_msg(owner: str, lambda_=None):",
                r#"    return {"owner": owner, "lambda": lambda_}"#,
            ]
        );

        let f = GeneratedFunction::new("config", Some("query".into()), PayloadShape::Unit);
        assert_eq!(generate_function(&f)[2], r#"    return "config""#);
    }

    #[test]
    fn test_colliding_names_stay_distinct() {
        let mut f = GeneratedFunction::new("swap", Some("execute".into()), PayloadShape::Wrapped);
        f.add_param(Parameter::new("max-spread", None, false));
        f.add_param(Parameter::new("max_spread", None, false));
        f.add_param(Parameter::new("x²", Some(Primitive::String), true));
        assert_eq!(
            generate_function(&f)[1..].to_vec(),
            vec![
                "def execute_swap_msg(x_: str, max_spread=None, max_spread_2=None):",
                r#"    return {"swap": {"max-spread": max_spread, "max_spread": max_spread_2, "x²": x_}}"#,
            ]
        );
    }

    #[test]
    fn test_generate_class() {
        let init = GeneratedFunction::new("instantiate", None, PayloadShape::Flat);
        let pair = GeneratedFunction::new("pair", Some("query".into()), PayloadShape::Wrapped);
        let expected = r#"class Pair:

    @staticmethod
    def instantiate_msg():
        return {}

    @staticmethod
    def query_pair_msg():
        return {"pair": {}}
"#;
        assert_eq!(generate_class("Pair", &[init, pair]), expected);
        assert_eq!(generate_class("Empty", &[]), "class Empty:\n    pass\n");
    }
}
