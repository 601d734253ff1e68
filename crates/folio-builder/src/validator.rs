//! Docblock checks run on every built element.
//!
//! Findings are attached to the descriptor as [`Diagnostic`]s and never abort
//! the build.

use folio_core::{
    collection::OwnedList,
    descriptor::{ArgumentDescriptor, Descriptor, DescriptorBase, TagKind},
    validation::{Diagnostic, ErrorCode},
};

use crate::assembler::Built;

#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Checks `built` and records the findings on it.
    pub fn validate(&self, built: &mut Built) {
        let requires_summary = matches!(
            built,
            Built::Class(_)
                | Built::Interface(_)
                | Built::Trait(_)
                | Built::Enum(_)
                | Built::Function(_)
                | Built::Method(_)
        );

        let mut diagnostics = Vec::new();
        match built {
            Built::Function(function) => {
                check_params(function.base(), function.arguments(), &mut diagnostics)
            }
            Built::Method(method) => {
                check_params(method.base(), method.arguments(), &mut diagnostics)
            }
            _ => {}
        }

        let Some(descriptor) = built.as_descriptor_mut() else {
            return;
        };
        let base = descriptor.base();
        if requires_summary && base.summary().is_empty() {
            diagnostics.push(
                Diagnostic::warning(format!(
                    "No summary for {} {}",
                    descriptor.kind(),
                    display_name(base)
                ))
                .with_code(ErrorCode::W100)
                .with_line(base.line()),
            );
        }
        check_tags(base, &mut diagnostics);

        let base = descriptor.base_mut();
        for diagnostic in diagnostics {
            base.push_error(diagnostic);
        }
    }
}

fn display_name(base: &DescriptorBase) -> String {
    match base.fqsen() {
        Some(fqsen) => fqsen.to_string(),
        None => base.name().to_string(),
    }
}

fn check_params(
    base: &DescriptorBase,
    arguments: &OwnedList<ArgumentDescriptor>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for tag in base.tags().get("param") {
        let TagKind::Param { variable, .. } = tag.kind() else {
            continue;
        };
        if arguments.iter().any(|argument| argument.name() == variable) {
            continue;
        }

        let mut diagnostic = Diagnostic::warning(format!(
            "@param ${variable} does not match any argument of {}",
            display_name(base)
        ))
        .with_code(ErrorCode::W101)
        .with_line(base.line());
        if let Some(closest) = closest_argument(variable, arguments) {
            diagnostic = diagnostic.with_help(format!("did you mean ${closest}?"));
        }
        diagnostics.push(diagnostic);
    }
}

/// An argument whose name differs from `variable` by one edit at most.
fn closest_argument<'a>(
    variable: &str,
    arguments: &'a OwnedList<ArgumentDescriptor>,
) -> Option<&'a str> {
    arguments
        .iter()
        .map(ArgumentDescriptor::name)
        .find(|name| within_one_edit(variable, name))
}

fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if long.len() - short.len() > 1 {
        return false;
    }

    let prefix = short.iter().zip(long.iter()).take_while(|(x, y)| x == y).count();
    if prefix == long.len() {
        return true;
    }
    if short.len() == long.len() {
        short[prefix + 1..] == long[prefix + 1..]
    } else {
        short[prefix..] == long[prefix + 1..]
    }
}

fn check_tags(base: &DescriptorBase, diagnostics: &mut Vec<Diagnostic>) {
    let returns = base.tags().get("return").len();
    if returns > 1 {
        diagnostics.push(
            Diagnostic::warning(format!(
                "{returns} @return tags found on {}",
                display_name(base)
            ))
            .with_code(ErrorCode::W102)
            .with_line(base.line()),
        );
    }

    for tag in base.tags().get("param") {
        if matches!(tag.kind(), TagKind::Generic) {
            diagnostics.push(
                Diagnostic::error(format!(
                    "Malformed @param \"{}\" on {}",
                    tag.description(),
                    display_name(base)
                ))
                .with_code(ErrorCode::E100)
                .with_line(base.line())
                .with_help("name the documented variable, e.g. `@param int $count`"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::{
        descriptor::{ClassDescriptor, FunctionDescriptor, TagDescriptor},
        fqsen::Fqsen,
        validation::Severity,
    };

    use super::*;
    use crate::assembler::parse_tag;

    fn base(fqsen: &str, summary: &str, tags: &[(&str, &str)]) -> DescriptorBase {
        let fqsen = Fqsen::new(fqsen).unwrap();
        let mut base = DescriptorBase::new(fqsen.name(), Some(fqsen));
        base.set_summary(summary);
        base.set_line(7);
        for (name, body) in tags {
            base.tags_mut().add(parse_tag(name, body));
        }
        base
    }

    fn codes(built: &mut Built) -> Vec<ErrorCode> {
        built
            .as_descriptor_mut()
            .unwrap()
            .base()
            .errors()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_missing_summary() {
        let mut built = Built::Class(ClassDescriptor::new(base("\\App\\User", "", &[])));
        Validator::new().validate(&mut built);

        assert_eq!(codes(&mut built), vec![ErrorCode::W100]);
    }

    #[test]
    fn test_documented_class_is_clean() {
        let mut built = Built::Class(ClassDescriptor::new(base("\\App\\User", "A user.", &[])));
        Validator::new().validate(&mut built);

        assert!(codes(&mut built).is_empty());
    }

    #[test]
    fn test_unknown_param_with_suggestion() {
        let base = base("\\App\\find()", "Finds.", &[("param", "int $idd")]);
        let mut function = FunctionDescriptor::new(base);
        function.arguments_mut().push(ArgumentDescriptor::new("$id"));

        let mut built = Built::Function(function);
        Validator::new().validate(&mut built);

        let descriptor = built.as_descriptor_mut().unwrap();
        let error = &descriptor.base().errors()[0];
        assert_eq!(error.code(), Some(ErrorCode::W101));
        assert_eq!(error.help(), Some("did you mean $id?"));
        assert_eq!(error.line(), 7);
    }

    #[test]
    fn test_duplicate_return_and_malformed_param() {
        let base = base(
            "\\App\\run()",
            "Runs.",
            &[("return", "int"), ("return", "string"), ("param", "int")],
        );
        let mut built = Built::Function(FunctionDescriptor::new(base));
        Validator::new().validate(&mut built);

        let codes = codes(&mut built);
        assert!(codes.contains(&ErrorCode::W102));
        assert!(codes.contains(&ErrorCode::E100));

        let descriptor = built.as_descriptor_mut().unwrap();
        let malformed = descriptor
            .base()
            .errors()
            .iter()
            .find(|error| error.code() == Some(ErrorCode::E100))
            .unwrap();
        assert_eq!(malformed.severity(), Severity::Error);
    }

    #[test]
    fn test_tags_are_not_validated() {
        let mut built = Built::Tag(TagDescriptor::generic("todo", ""));
        Validator::new().validate(&mut built);
        assert!(built.as_descriptor_mut().is_none());
    }

    #[test]
    fn test_within_one_edit() {
        assert!(within_one_edit("id", "idd"));
        assert!(within_one_edit("name", "nane"));
        assert!(within_one_edit("user", "user"));
        assert!(!within_one_edit("id", "identifier"));
        assert!(!within_one_edit("abc", "xyz"));
    }
}
