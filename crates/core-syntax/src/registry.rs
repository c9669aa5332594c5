//! Syntax-definition lookup by file extension (spec §4.3: a definition is
//! `(name, extensions[], calculate_fn, prefers_spaces)`).

use crate::lang::{bash, c, diff, java, json, make, markdown, python, rust, xml};
use crate::Syntax;

/// All built-in syntax definitions, in the order they're probed.
pub fn all() -> Vec<&'static dyn Syntax> {
    vec![
        &c::CSyntax,
        &rust::RustSyntax,
        &python::PythonSyntax,
        &bash::BashSyntax,
        &markdown::MarkdownSyntax,
        &java::JavaSyntax,
        &json::JsonSyntax,
        &xml::XmlSyntax,
        &make::MakeSyntax,
        &diff::DiffSyntax,
    ]
}

/// Find the syntax definition whose extension list contains `ext`
/// (case-insensitive, no leading dot).
pub fn lookup_by_extension(ext: &str) -> Option<&'static dyn Syntax> {
    let ext = ext.to_lowercase();
    all().into_iter().find(|s| s.extensions().contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_rust_by_extension() {
        assert_eq!(lookup_by_extension("rs").unwrap().name(), "rust");
    }

    #[test]
    fn unknown_extension_is_none() {
        assert!(lookup_by_extension("zzz").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup_by_extension("RS").unwrap().name(), "rust");
    }
}
