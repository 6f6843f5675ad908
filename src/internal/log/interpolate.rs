use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use super::Context;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("placeholder pattern is valid"));

/// Replace `{name}` placeholders in `message` with values from `context`.
///
/// Strings are inserted verbatim, numbers and booleans with their JSON
/// rendering and `null` as an empty string. Arrays, objects and names
/// missing from the context leave the placeholder untouched.
pub fn interpolate<'a>(message: &'a str, context: &Context) -> Cow<'a, str> {
    if context.is_empty() || !message.contains('{') {
        return Cow::Borrowed(message);
    }

    PLACEHOLDER.replace_all(message, |caps: &Captures<'_>| {
        match context.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) => String::new(),
            Some(v @ (Value::Bool(_) | Value::Number(_))) => v.to_string(),
            _ => caps[0].to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> Context {
        match value {
            Value::Object(map) => map,
            _ => panic!("context must be an object"),
        }
    }

    #[test]
    fn test_scalars_are_substituted() {
        let ctx = context(json!({"user": "bob", "attempts": 3, "locked": false, "note": null}));
        let out = interpolate("{user} failed {attempts}x locked={locked}{note}", &ctx);
        assert_eq!(out, "bob failed 3x locked=false");
    }

    #[test]
    fn test_unknown_and_structured_values_are_kept() {
        let ctx = context(json!({"tags": ["a", "b"], "user": "bob"}));
        let out = interpolate("{tags} {missing} {user}", &ctx);
        assert_eq!(out, "{tags} {missing} bob");
    }

    #[test]
    fn test_empty_context_borrows() {
        let out = interpolate("{user}", &Context::new());
        assert!(matches!(out, Cow::Borrowed("{user}")));
    }
}
