use crate::error::{DirectiveError, Result};
use crate::types::{Annotation, DepRef, Span};
use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([A-Za-z0-9_]+):\s*(.+)$").expect("directive regex"));

static WIRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+)\(([^)]*)\)$").expect("wire regex"));

/// Strip comment decoration from one raw comment line.
///
/// Handles line comments (`//`, `///`, `//!`), block comment delimiters
/// (`/*`, `/**`, `/*!`, `*/`) and the leading `*` of block continuation
/// lines. The result is trimmed.
pub fn clean_comment_line(line: &str) -> &str {
    let mut text = line.trim();

    for prefix in ["//!", "///", "//", "/*!", "/**", "/*"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest;
            break;
        }
    }

    text = text.trim_start();
    // continuation line of a block comment
    if let Some(rest) = text.strip_prefix('*') {
        if !rest.starts_with('/') {
            text = rest;
        }
    }

    if let Some(rest) = text.trim_end().strip_suffix("*/") {
        text = rest;
    }

    text.trim()
}

/// Parse one cleaned comment line into an annotation.
///
/// Returns `Ok(None)` when the line is not a directive at all; unknown
/// directive keys are ignored the same way. A line that matches a known key
/// but not its value grammar is a fatal configuration error.
pub fn parse_directive(line: &str, span: Span) -> Result<Option<Annotation>> {
    let Some(caps) = DIRECTIVE_RE.captures(line.trim()) else {
        return Ok(None);
    };

    let key = caps.get(1).map_or("", |m| m.as_str());
    let value = caps.get(2).map_or("", |m| m.as_str()).trim();

    match key {
        "factory" => parse_factory(value, span).map(Some),
        "wire" => parse_wire(value, span).map(Some),
        "final" => {
            let target = parse_target("final", value, &span)?;
            Ok(Some(Annotation::Final { target, span }))
        }
        "disable" => {
            let target = parse_target("disable", value, &span)?;
            Ok(Some(Annotation::Disable { target, span }))
        }
        _ => Ok(None),
    }
}

fn parse_factory(value: &str, span: Span) -> Result<Annotation> {
    let parts: Vec<&str> = value.split("->").map(str::trim).collect();

    match parts.as_slice() {
        [function, alias] if !function.is_empty() && !alias.is_empty() => {
            Ok(Annotation::Factory {
                function: (*function).to_string(),
                alias: (*alias).to_string(),
                span,
            })
        }
        _ => Err(DirectiveError::malformed(
            "factory",
            "expected `<Function> -> <Alias>`",
            span,
        )),
    }
}

fn parse_wire(value: &str, span: Span) -> Result<Annotation> {
    let Some(caps) = WIRE_RE.captures(value) else {
        return Err(DirectiveError::malformed(
            "wire",
            "expected `<Alias>(<dep>, ...)`",
            span,
        ));
    };

    let target = caps[1].to_string();
    let inner = caps[2].trim();

    let mut deps = Vec::new();
    if !inner.is_empty() {
        for raw in inner.split(',') {
            let raw = raw.trim();
            let (name, standalone) = match raw.strip_prefix('^') {
                Some(rest) => (rest.trim(), true),
                None => (raw, false),
            };
            if name.is_empty() {
                return Err(DirectiveError::malformed(
                    "wire",
                    "empty dependency name",
                    span,
                ));
            }
            deps.push(DepRef {
                name: name.to_string(),
                standalone,
            });
        }
    }

    Ok(Annotation::Wire { target, deps, span })
}

fn parse_target(key: &str, value: &str, span: &Span) -> Result<String> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(DirectiveError::malformed(
            key,
            "expected a single alias",
            span.clone(),
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span() -> Span {
        Span::new("src/lib.rs", 7)
    }

    fn parse(line: &str) -> Result<Option<Annotation>> {
        parse_directive(clean_comment_line(line), span())
    }

    #[test]
    fn parses_factory_directive() {
        let ann = parse("// @factory: NewDb -> db").unwrap().unwrap();
        assert_eq!(
            ann,
            Annotation::Factory {
                function: "NewDb".to_string(),
                alias: "db".to_string(),
                span: span(),
            }
        );
    }

    #[test]
    fn parses_wire_directive_with_standalone_marker() {
        let ann = parse("/// @wire: server(db, ^cache)").unwrap().unwrap();
        assert_eq!(
            ann,
            Annotation::Wire {
                target: "server".to_string(),
                deps: vec![
                    DepRef {
                        name: "db".to_string(),
                        standalone: false,
                    },
                    DepRef {
                        name: "cache".to_string(),
                        standalone: true,
                    },
                ],
                span: span(),
            }
        );
    }

    #[test]
    fn parses_wire_directive_with_no_deps() {
        let ann = parse("// @wire: db()").unwrap().unwrap();
        match ann {
            Annotation::Wire { target, deps, .. } => {
                assert_eq!(target, "db");
                assert!(deps.is_empty());
            }
            other => panic!("unexpected annotation: {other:?}"),
        }
    }

    #[test]
    fn parses_final_and_disable_directives() {
        assert_eq!(
            parse("// @final: server").unwrap().unwrap(),
            Annotation::Final {
                target: "server".to_string(),
                span: span(),
            }
        );
        assert_eq!(
            parse("// @disable: legacy").unwrap().unwrap(),
            Annotation::Disable {
                target: "legacy".to_string(),
                span: span(),
            }
        );
    }

    #[test]
    fn ignores_non_directive_comments() {
        assert_eq!(parse("// just a comment").unwrap(), None);
        assert_eq!(parse("// email@example.com: hello").unwrap(), None);
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn ignores_unknown_directive_keys() {
        assert_eq!(parse("// @deprecated: use something else").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_factory_value() {
        let err = parse("// @factory: NewDb").unwrap_err();
        assert!(matches!(
            err,
            DirectiveError::MalformedDirective { ref key, .. } if key == "factory"
        ));

        assert!(parse("// @factory: A -> B -> C").is_err());
        assert!(parse("// @factory: -> db").is_err());
    }

    #[test]
    fn rejects_malformed_wire_value() {
        assert!(parse("// @wire: server").is_err());
        assert!(parse("// @wire: server(db").is_err());
        assert!(parse("// @wire: server(db,)").is_err());
        assert!(parse("// @wire: server(^)").is_err());
    }

    #[test]
    fn rejects_malformed_final_value() {
        assert!(parse("// @final: a b").is_err());
    }

    #[test]
    fn cleans_block_comment_lines() {
        assert_eq!(clean_comment_line("/* @wire: a(b) */"), "@wire: a(b)");
        assert_eq!(clean_comment_line(" * @factory: F -> a"), "@factory: F -> a");
        assert_eq!(clean_comment_line("//! @final: a"), "@final: a");
        assert_eq!(clean_comment_line(" */"), "");
    }
}
