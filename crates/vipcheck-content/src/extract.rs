//! Schema-agnostic extraction of a resource name and its iRules
//!
//! Declarations for the same resource type do not share one fixed schema,
//! so instead of deserializing into a typed struct the extractor scans the
//! token stream for two well-known keys:
//!
//! - `"name"`: the first string value wins.
//! - `"irules"`: every string value, in encounter order. A list
//!   contributes its direct string elements in list order.
//!
//! Anything else under those keys (numbers, nested lists, objects) is
//! skipped. Extraction never fails.

use serde::Serialize;

use crate::token::Token;

const NAME_KEY: &str = "name";
const RULES_KEY: &str = "irules";

/// The two fields of a declaration that reconciliation needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Resource identifier as written in the file; empty when absent
    pub name: String,
    /// iRules in declared order; empty for a ruleless resource
    pub rules: Vec<String>,
}

impl Declaration {
    /// True when the file carried no `name` field
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Rules,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            NAME_KEY => Some(Self::Name),
            RULES_KEY => Some(Self::Rules),
            _ => None,
        }
    }
}

/// Extract a [`Declaration`] from a token stream in one forward pass
pub fn extract<'a, I>(tokens: I) -> Declaration
where
    I: IntoIterator<Item = Token<'a>>,
{
    let mut name: Option<&str> = None;
    let mut rules = Vec::new();

    let mut depth = 0usize;
    // Key seen on the previous token, waiting for its value
    let mut field: Option<Field> = None;
    // Depth of the open list that is the value of a `name` key
    let mut name_list: Option<usize> = None;
    // Depths of open lists that are values of `irules` keys, innermost last
    let mut rule_lists: Vec<usize> = Vec::new();

    for token in tokens {
        let awaiting = field.take();
        match token {
            Token::Key(key) => field = Field::from_key(key),
            Token::Str(value) => match awaiting {
                Some(Field::Name) => {
                    name.get_or_insert(value);
                }
                Some(Field::Rules) => rules.push(value.to_owned()),
                None => {
                    if rule_lists.last() == Some(&depth) {
                        rules.push(value.to_owned());
                    }
                    if name_list == Some(depth) {
                        name.get_or_insert(value);
                    }
                }
            },
            Token::BeginArray => {
                depth += 1;
                match awaiting {
                    Some(Field::Name) => name_list = Some(depth),
                    Some(Field::Rules) => rule_lists.push(depth),
                    None => {}
                }
            }
            Token::BeginObject => depth += 1,
            Token::EndArray | Token::EndObject => {
                if rule_lists.last() == Some(&depth) {
                    rule_lists.pop();
                }
                if name_list == Some(depth) {
                    name_list = None;
                }
                depth = depth.saturating_sub(1);
            }
            Token::Scalar(_) => {}
        }
    }

    Declaration {
        name: name.unwrap_or_default().to_owned(),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Tokens;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn extract_value(value: &Value) -> Declaration {
        extract(Tokens::new(value))
    }

    #[test]
    fn test_extract_minimal() {
        let decl = extract_value(&json!({"name": "/Common/web", "irules": ["a", "b"]}));
        assert_eq!(decl.name, "/Common/web");
        assert_eq!(decl.rules, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_fields_yield_empty() {
        let decl = extract_value(&json!({"resource": {"destination": "10.0.0.1"}}));
        assert!(decl.is_unnamed());
        assert!(decl.rules.is_empty());
    }

    #[test]
    fn test_first_name_wins() {
        let decl = extract_value(&json!([
            {"name": "first"},
            {"name": "second"}
        ]));
        assert_eq!(decl.name, "first");
    }

    #[test]
    fn test_name_given_as_list() {
        let decl = extract_value(&json!({"name": [1, "listed", "ignored"]}));
        assert_eq!(decl.name, "listed");
    }

    #[test]
    fn test_rules_accumulate_across_occurrences() {
        let decl = extract_value(&json!([
            {"irules": ["a", "b"]},
            {"other": {"irules": "c"}},
            {"irules": ["d"]}
        ]));
        assert_eq!(decl.rules, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_duplicate_rules_are_preserved() {
        let decl = extract_value(&json!({"irules": ["a", "b", "a"]}));
        assert_eq!(decl.rules, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_non_string_rule_tokens_are_skipped() {
        let decl = extract_value(&json!({
            "irules": ["a", 7, null, ["nested"], {"x": "y"}, true, "b"]
        }));
        assert_eq!(decl.rules, vec!["a", "b"]);
    }

    #[test]
    fn test_non_string_name_is_skipped() {
        let decl = extract_value(&json!({"name": 42, "inner": {"name": "real"}}));
        assert_eq!(decl.name, "real");
    }

    #[test]
    fn test_string_values_equal_to_keys_are_not_fields() {
        let decl = extract_value(&json!({"description": "name", "tags": ["irules", "x"]}));
        assert!(decl.is_unnamed());
        assert!(decl.rules.is_empty());
    }

    #[test]
    fn test_name_nested_in_rules_list_object() {
        let decl = extract_value(&json!({
            "irules": ["a", {"name": "inner"}, "b"]
        }));
        assert_eq!(decl.name, "inner");
        assert_eq!(decl.rules, vec!["a", "b"]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let tree = json!({
            "resource": {"bigip_ltm_virtual_server": {"vs": {
                "name": "/Common/vs", "irules": ["x", "y", "z"]
            }}}
        });
        assert_eq!(extract_value(&tree), extract_value(&tree));
    }
}
