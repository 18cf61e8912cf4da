//! Message provider boundary.
//!
//! Error text is rendered through a string-keyed provider so callers can plug
//! in their own catalog. Lookups never fail: unknown keys fall back to the
//! built-in catalog, and then to the bare key.

use std::collections::BTreeMap;

///
/// Message keys
///

pub const CAST_INVALID: &str = "sieve.cast.invalid";
pub const PATH_UNKNOWN: &str = "sieve.path.unknown";
pub const OPERATOR_ARITY: &str = "sieve.operator.arity";
pub const OPERATOR_UNSUPPORTED: &str = "sieve.operator.unsupported";
pub const RESPONSE_INPUT: &str = "sieve.response.input";
pub const RESPONSE_CONFIGURATION: &str = "sieve.response.configuration";

const DEFAULT_CATALOG: &[(&str, &str)] = &[
    (CAST_INVALID, "value '{0}' cannot be converted to {1}"),
    (PATH_UNKNOWN, "{0}"),
    (
        OPERATOR_ARITY,
        "operator '{0}' requires exactly {1} values, found {2}",
    ),
    (
        OPERATOR_UNSUPPORTED,
        "operator '{0}' is not supported for {1} fields",
    ),
    (
        RESPONSE_INPUT,
        "request contains invalid filter or sort values",
    ),
    (
        RESPONSE_CONFIGURATION,
        "filter or sort configuration is invalid",
    ),
];

///
/// MessageProvider
///

pub trait MessageProvider: Send + Sync {
    /// Render the message for `key` with positional `{n}` arguments.
    fn message(&self, key: &str, args: &[&str]) -> String;
}

///
/// DefaultMessages
/// Built-in English catalog.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMessages;

impl MessageProvider for DefaultMessages {
    fn message(&self, key: &str, args: &[&str]) -> String {
        DEFAULT_CATALOG
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map_or_else(|| key.to_string(), |(_, template)| render(template, args))
    }
}

///
/// CatalogMessages
///
/// Caller-supplied key to template map, falling back to `DefaultMessages`.
///

#[derive(Clone, Debug, Default)]
pub struct CatalogMessages {
    templates: BTreeMap<String, String>,
}

impl CatalogMessages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }
}

impl MessageProvider for CatalogMessages {
    fn message(&self, key: &str, args: &[&str]) -> String {
        match self.templates.get(key) {
            Some(template) => render(template, args),
            None => DefaultMessages.message(key, args),
        }
    }
}

/// Substitute `{n}` placeholders; placeholders without an argument are kept.
#[must_use]
pub fn render(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };

        let arg = tail[1..close]
            .parse::<usize>()
            .ok()
            .and_then(|index| args.get(index));

        match arg {
            Some(arg) => out.push_str(arg),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_positional_arguments() {
        assert_eq!(
            render("operator '{0}' requires {1}", &["between", "2"]),
            "operator 'between' requires 2"
        );
    }

    #[test]
    fn render_keeps_unmatched_placeholders() {
        assert_eq!(render("{0} and {3} {x", &["a"]), "a and {3} {x");
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key() {
        assert_eq!(DefaultMessages.message("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn catalog_overrides_then_falls_back() {
        let messages = CatalogMessages::new().with(CAST_INVALID, "mauvaise valeur '{0}'");

        assert_eq!(
            messages.message(CAST_INVALID, &["x", "Int32"]),
            "mauvaise valeur 'x'"
        );
        assert_eq!(
            messages.message(OPERATOR_ARITY, &["between", "2", "1"]),
            "operator 'between' requires exactly 2 values, found 1"
        );
    }
}
