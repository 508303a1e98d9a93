//! Validation engine
//!
//! A rule passes when the regular expression finds a match anywhere in the
//! value's textual form. Rules are not implicitly anchored; a rule that must
//! cover the whole value spells out `^...$` itself.

use regex::Regex;
use std::collections::HashMap;

use super::error::PatternCompileError;
use super::value::FieldValue;

/// Message recorded against a field whose value does not satisfy its rule.
pub const VALIDATION_FAILED: &str = "Validation Failed";

pub fn compile(rule: &str) -> Result<Regex, PatternCompileError> {
    Regex::new(rule).map_err(|source| PatternCompileError {
        rule: rule.to_string(),
        source,
    })
}

/// Checks `value` against `rule`. An absent or empty rule always passes.
pub fn validate(rule: Option<&str>, value: &FieldValue) -> Result<bool, PatternCompileError> {
    match rule.filter(|r| !r.is_empty()) {
        None => Ok(true),
        Some(rule) => Ok(compile(rule)?.is_match(&value.to_string())),
    }
}

/// Compiled rules keyed by their source text.
///
/// Same contract as [`validate`]; a form that is submitted repeatedly
/// compiles each distinct rule once.
#[derive(Debug, Default, Clone)]
pub struct PatternCache {
    compiled: HashMap<String, Regex>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&mut self, rule: Option<&str>, value: &FieldValue) -> Result<bool, PatternCompileError> {
        let Some(rule) = rule.filter(|r| !r.is_empty()) else {
            return Ok(true);
        };
        if !self.compiled.contains_key(rule) {
            self.compiled.insert(rule.to_string(), compile(rule)?);
        }
        Ok(self.compiled[rule].is_match(&value.to_string()))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn clear(&mut self) {
        self.compiled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Choice;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_absent_rule_always_passes() {
        assert!(validate(None, &text("")).unwrap());
        assert!(validate(None, &FieldValue::number("")).unwrap());
        assert!(validate(Some(""), &text("anything")).unwrap());
    }

    #[test]
    fn test_anchored_rule() {
        assert!(validate(Some("^[a-z]+$"), &text("abc")).unwrap());
        assert!(!validate(Some("^[a-z]+$"), &text("ABC")).unwrap());
        assert!(!validate(Some("^[a-z]+$"), &text("")).unwrap());
    }

    #[test]
    fn test_unanchored_rule_matches_substring() {
        assert!(validate(Some("[0-9]"), &text("abc1def")).unwrap());
        assert!(!validate(Some("[0-9]"), &text("abcdef")).unwrap());
    }

    #[test]
    fn test_numbers_and_selections_match_textual_form() {
        assert!(validate(Some(r"^\d+$"), &FieldValue::number("42")).unwrap());
        assert!(!validate(Some(r"^\d+$"), &FieldValue::number("4.5")).unwrap());
        // Rules see the number exactly as it was entered
        assert!(validate(Some(r"^\d+\.\d{2}$"), &FieldValue::number("1.50")).unwrap());
        assert!(validate(Some(r"^\d{3}$"), &FieldValue::number("007")).unwrap());
        assert!(validate(Some("^b$"), &FieldValue::Selection(Some(Choice::Text("b".to_string())))).unwrap());
        assert!(validate(Some("^$"), &FieldValue::Selection(None)).unwrap());
    }

    #[test]
    fn test_invalid_rule_is_compile_error() {
        let err = validate(Some("[a-"), &text("a")).unwrap_err();
        assert_eq!(err.rule, "[a-");
        assert!(err.to_string().contains("[a-"));
    }

    #[test]
    fn test_cache_compiles_each_rule_once() {
        let mut cache = PatternCache::new();
        assert!(cache.validate(Some("^a"), &text("abc")).unwrap());
        assert!(!cache.validate(Some("^a"), &text("cba")).unwrap());
        assert!(cache.validate(Some("c$"), &text("abc")).unwrap());
        assert!(cache.validate(None, &text("abc")).unwrap());
        assert_eq!(cache.len(), 2);

        assert!(cache.validate(Some("("), &text("abc")).is_err());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
