/// The template expression grammar
///
/// One production rule matters at binding time:
/// `{{ "trigger.body." IDENT }}`. Extraction is regex-based; this is a
/// deliberately tiny, explicitly scoped grammar, not a template engine.

use regex::Regex;
use std::sync::LazyLock;

/// Any double-brace expression candidate: `{{ ... }}` with no nested brace
static EXPRESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());

/// The trigger-variable production: captures the referenced field name
static TRIGGER_BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{trigger\.body\.([a-zA-Z0-9_]+)\}\}").unwrap());

/// Extract every double-brace expression candidate from a string
///
/// A string containing N `{{...}}` occurrences yields exactly N candidates.
pub fn extract_expressions(value: &str) -> Vec<&str> {
    EXPRESSION_RE.find_iter(value).map(|m| m.as_str()).collect()
}

/// Iterate the trigger field names referenced in a string
///
/// `"{{trigger.body.email}} / {{trigger.body.name}}"` yields
/// `["email", "name"]`.
pub fn trigger_fields_in(value: &str) -> impl Iterator<Item = String> + '_ {
    TRIGGER_BODY_RE
        .captures_iter(value)
        .map(|cap| cap[1].to_string())
}

/// Whether an extracted expression is a well-formed variable reference
///
/// A reference must be a dotted path (`trigger.body.email`, `node.n1.out`)
/// or a `$`-prefixed shorthand; a bare word like `{{foo}}` is not a valid
/// reference and is reported to the user instead of silently passed along.
pub fn is_well_formed(expression: &str) -> bool {
    if !EXPRESSION_RE.is_match(expression) {
        return false;
    }

    let inner = expression
        .trim_start_matches("{{")
        .trim_end_matches("}}")
        .trim();

    if inner.is_empty() {
        return false;
    }

    inner.contains('.') || inner.starts_with('$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_every_candidate() {
        let s = "Hi {{trigger.body.name}}, order {{trigger.body.order_id}} is ready";
        assert_eq!(extract_expressions(s).len(), 2);
        assert_eq!(extract_expressions("no expressions here").len(), 0);
    }

    #[test]
    fn trigger_fields_are_captured() {
        let fields: Vec<String> =
            trigger_fields_in("{{trigger.body.email}} and {{workflow.id}}").collect();
        assert_eq!(fields, vec!["email".to_string()]);
    }

    #[test]
    fn well_formedness() {
        assert!(is_well_formed("{{trigger.body.email}}"));
        assert!(is_well_formed("{{ node.n1.output }}"));
        assert!(is_well_formed("{{$json}}"));
        assert!(!is_well_formed("{{foo}}"));
        assert!(!is_well_formed("{{  }}"));
        assert!(!is_well_formed("trigger.body.email"));
    }
}
