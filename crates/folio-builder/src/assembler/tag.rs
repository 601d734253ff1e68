//! Parsing of tag bodies into structured tags.

use std::sync::LazyLock;

use folio_core::descriptor::{DescriptorKind, ExampleLocation, TagDescriptor, TagKind, TagTarget};
use regex::Regex;

use crate::{
    ProjectDescriptorBuilder,
    assembler::{Assembler, Built, Reflected, ReflectionKind},
    error::Result,
};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+://.+$").unwrap());

pub struct TagAssembler;

impl Assembler for TagAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Tag
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Tag
    }

    fn create(&self, data: Reflected<'_>, _: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Tag(tag) = data else {
            return Err(super::unexpected_input(self, data));
        };
        Ok(Built::Tag(parse_tag(&tag.name, &tag.body)))
    }
}

/// Splits off the first whitespace-delimited word of `body`.
fn split_word(body: &str) -> (&str, &str) {
    let body = body.trim();
    match body.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (body, ""),
    }
}

/// Strips the `$`, `&` and `...` decorations of a variable name.
fn variable_name(word: &str) -> Option<String> {
    let name = word.trim_start_matches('&').trim_start_matches("...");
    name.strip_prefix('$').map(str::to_string)
}

/// Parses a tag body according to the tag name.
///
/// Malformed `@param` tags (without a variable) come back as generic tags;
/// the validator reports them.
///
/// # Examples
///
/// ```
/// use folio_builder::assembler::parse_tag;
/// use folio_core::descriptor::TagKind;
///
/// let tag = parse_tag("param", "int $count Number of retries");
/// match tag.kind() {
///     TagKind::Param { variable, types } => {
///         assert_eq!(variable, "count");
///         assert_eq!(types, "int");
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// assert_eq!(tag.description(), "Number of retries");
/// ```
pub fn parse_tag(name: &str, body: &str) -> TagDescriptor {
    let body = body.trim();
    match name {
        "uses" | "used-by" | "covers" => reference_tag(name, body),
        "see" => {
            let (target, description) = split_word(body);
            if URL_RE.is_match(target) {
                let kind = TagKind::Link {
                    url: target.to_string(),
                };
                TagDescriptor::new(name, description, kind)
            } else {
                reference_tag(name, body)
            }
        }
        "link" => {
            let (url, description) = split_word(body);
            let kind = TagKind::Link {
                url: url.to_string(),
            };
            TagDescriptor::new(name, description, kind)
        }
        "return" | "throws" if !body.is_empty() => {
            let (types, description) = split_word(body);
            let kind = TagKind::Return {
                types: types.to_string(),
            };
            TagDescriptor::new(name, description, kind)
        }
        "param" => parse_param(body),
        "var" => parse_var(body),
        "method" => parse_method(body),
        "example" => {
            let location = ExampleLocation::parse(body);
            let description = location.description().to_string();
            TagDescriptor::new(name, description, TagKind::Example { location })
        }
        _ => TagDescriptor::generic(name, body),
    }
}

fn reference_tag(name: &str, body: &str) -> TagDescriptor {
    let (target, description) = split_word(body);
    let kind = TagKind::Reference {
        target: TagTarget::Unresolved(target.to_string()),
    };
    TagDescriptor::new(name, description, kind)
}

fn parse_param(body: &str) -> TagDescriptor {
    let (first, rest) = split_word(body);
    if let Some(variable) = variable_name(first) {
        let kind = TagKind::Param {
            variable,
            types: String::new(),
        };
        return TagDescriptor::new("param", rest, kind);
    }

    let (second, description) = split_word(rest);
    match variable_name(second) {
        Some(variable) => {
            let kind = TagKind::Param {
                variable,
                types: first.to_string(),
            };
            TagDescriptor::new("param", description, kind)
        }
        None => TagDescriptor::generic("param", body),
    }
}

fn parse_var(body: &str) -> TagDescriptor {
    let (types, rest) = split_word(body);
    let (second, description) = split_word(rest);
    let (variable, description) = match variable_name(second) {
        Some(variable) => (Some(variable), description),
        None => (None, rest),
    };
    let kind = TagKind::Var {
        variable,
        types: types.to_string(),
    };
    TagDescriptor::new("var", description, kind)
}

/// `@method [static] [return type] name(arguments) [description]`
fn parse_method(body: &str) -> TagDescriptor {
    let (Some(open), Some(close)) = (body.find('('), body.rfind(')')) else {
        return TagDescriptor::generic("method", body);
    };
    if close < open {
        return TagDescriptor::generic("method", body);
    }

    let mut signature: Vec<&str> = body[..open].split_whitespace().collect();
    let Some(method_name) = signature.pop() else {
        return TagDescriptor::generic("method", body);
    };
    let is_static = signature.first() == Some(&"static");
    if is_static {
        signature.remove(0);
    }
    let return_type = signature.join(" ");
    let arguments = body[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|argument| !argument.is_empty())
        .map(str::to_string)
        .collect();

    let kind = TagKind::Method {
        method_name: method_name.to_string(),
        arguments,
        return_type: if return_type.is_empty() {
            "void".to_string()
        } else {
            return_type
        },
        is_static,
    };
    TagDescriptor::new("method", body[close + 1..].trim(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tags() {
        let tag = parse_tag("uses", "\\App\\Mailer::send() to notify");
        assert_eq!(tag.description(), "to notify");
        match tag.target() {
            Some(TagTarget::Unresolved(target)) => assert_eq!(target, "\\App\\Mailer::send()"),
            other => panic!("unexpected target {other:?}"),
        }
    }

    #[test]
    fn test_see_with_url_becomes_link() {
        let tag = parse_tag("see", "https://example.com/docs The manual");
        match tag.kind() {
            TagKind::Link { url } => assert_eq!(url, "https://example.com/docs"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tag.description(), "The manual");

        let tag = parse_tag("see", "Logger::log()");
        assert!(tag.target().is_some());
    }

    #[test]
    fn test_param_without_type() {
        let tag = parse_tag("param", "...$values all values");
        match tag.kind() {
            TagKind::Param { variable, types } => {
                assert_eq!(variable, "values");
                assert!(types.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_param_without_variable_is_generic() {
        let tag = parse_tag("param", "string the name");
        assert!(matches!(tag.kind(), TagKind::Generic));
        assert_eq!(tag.description(), "string the name");
    }

    #[test]
    fn test_var_with_and_without_variable() {
        let tag = parse_tag("var", "int[] $ids identifiers");
        match tag.kind() {
            TagKind::Var { variable, types } => {
                assert_eq!(variable.as_deref(), Some("ids"));
                assert_eq!(types, "int[]");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tag.description(), "identifiers");

        let tag = parse_tag("var", "string");
        assert!(matches!(tag.kind(), TagKind::Var { variable: None, .. }));
    }

    #[test]
    fn test_method_tag() {
        let tag = parse_tag("method", "static Builder where(string $column, $value) Adds a clause");
        match tag.kind() {
            TagKind::Method {
                method_name,
                arguments,
                return_type,
                is_static,
            } => {
                assert_eq!(method_name, "where");
                assert_eq!(arguments, &["string $column", "$value"]);
                assert_eq!(return_type, "Builder");
                assert!(is_static);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tag.description(), "Adds a clause");
    }

    #[test]
    fn test_method_tag_without_return_type() {
        let tag = parse_tag("method", "reset()");
        match tag.kind() {
            TagKind::Method { return_type, .. } => assert_eq!(return_type, "void"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_example_tag() {
        let tag = parse_tag("example", "demo.php:2,3 Short demo");
        match tag.kind() {
            TagKind::Example { location } => {
                assert_eq!(location.file(), "demo.php");
                assert_eq!(location.start(), Some(2));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tag.description(), "Short demo");
    }

    #[test]
    fn test_unknown_tag_is_generic() {
        let tag = parse_tag("todo", "  write docs ");
        assert!(matches!(tag.kind(), TagKind::Generic));
        assert_eq!(tag.description(), "write docs");
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn tag_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("uses"),
            Just("see"),
            Just("link"),
            Just("return"),
            Just("throws"),
            Just("param"),
            Just("var"),
            Just("method"),
            Just("example"),
            Just("todo"),
        ]
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn test_any_body_keeps_tag_name(name in tag_name(), body in "\\PC{0,40}") {
            let tag = parse_tag(&name, &body);
            prop_assert_eq!(tag.name(), name.as_str());
        }

        #[test]
        fn test_typed_param_is_split(
            types in "[a-z][a-z|]{0,10}",
            variable in "[a-z_][a-z0-9_]{0,10}",
            description in "[a-z ]{0,20}",
        ) {
            let tag = parse_tag("param", &format!("{types} ${variable} {description}"));
            match tag.kind() {
                TagKind::Param { variable: parsed, types: parsed_types } => {
                    prop_assert_eq!(parsed, &variable);
                    prop_assert_eq!(parsed_types, &types);
                }
                other => prop_assert!(false, "unexpected kind {:?}", other),
            }
            prop_assert_eq!(tag.description(), description.trim());
        }
    }
}
