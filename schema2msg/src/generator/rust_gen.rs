use std::collections::HashMap;

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use super::{normalize_identifier, parameter_identifiers};
use crate::message::{GeneratedFunction, Parameter, PayloadShape};
use crate::resolver::Primitive;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// `self` -> `self_`, characters outside `[A-Za-z0-9_]` -> `_`
fn sanitize(name: &str) -> String {
    let mut ident = normalize_identifier(name);
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// `type` -> `r#type`, expects a sanitized name
fn to_ident(sanitized: &str) -> Ident {
    if KEYWORDS.contains(&sanitized) {
        Ident::new_raw(sanitized, Span::call_site())
    } else {
        Ident::new(sanitized, Span::call_site())
    }
}

fn identifier(name: &str) -> Ident {
    to_ident(&sanitize(name))
}

fn expand_primitive(primitive: Option<Primitive>) -> TokenStream {
    match primitive {
        Some(Primitive::Array) => quote! { Vec<serde_json::Value> },
        Some(Primitive::Boolean) => quote! { bool },
        Some(Primitive::Integer) => quote! { i64 },
        Some(Primitive::Null) => quote! { () },
        Some(Primitive::Number) => quote! { f64 },
        Some(Primitive::String) => quote! { String },
        Some(Primitive::Object) | None => quote! { serde_json::Value },
    }
}

fn generate_arg(param: &Parameter, ident: &str) -> TokenStream {
    let name = to_ident(ident);
    let field_type = expand_primitive(param.primitive);
    if param.required {
        quote! { #name: #field_type }
    } else {
        quote! { #name: Option<#field_type> }
    }
}

fn generate_body(function: &GeneratedFunction, idents: &HashMap<&str, String>) -> TokenStream {
    let fields = function.params.iter().map(|param| {
        let key = &param.name;
        let value = to_ident(&idents[param.name.as_str()]);
        quote! { #key: #value }
    });
    let base_name = &function.base_name;
    match function.shape {
        PayloadShape::Flat => quote! { serde_json::json!({ #(#fields),* }) },
        PayloadShape::Wrapped => quote! { serde_json::json!({ #base_name: { #(#fields),* } }) },
        PayloadShape::Unit => quote! { serde_json::json!(#base_name) },
    }
}

fn generate_function(function: &GeneratedFunction) -> TokenStream {
    let name = identifier(&function.function_name());
    let idents = parameter_identifiers(function, sanitize);
    let args = function
        .ordered_params()
        .map(|param| generate_arg(param, &idents[param.name.as_str()]));
    let body = generate_body(function, &idents);
    quote! {
        pub fn #name(#(#args),*) -> serde_json::Value {
            #body
        }
    }
}

pub fn generate_class(class_name: &str, functions: &[GeneratedFunction]) -> String {
    let identifier = identifier(class_name);
    let functions = functions.iter().map(generate_function);
    let code = quote! {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct #identifier;

        impl #identifier {
            #(#functions)*
        }
    };
    code.to_string()
}
