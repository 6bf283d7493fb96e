//! Statement validation results.

use std::fmt;

/// Violations found while validating a statement. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records `<field> is required` unless the field is present and non-blank.
    pub fn check_required_field(&mut self, field: &str, value: Option<&str>) {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.add_error(format!("{field} is required"));
        }
    }

    /// Records `No <field> defined` for an empty collection.
    pub fn check_required_collection(&mut self, field: &str, is_empty: bool) {
        if is_empty {
            self.add_error(format!("No {field} defined"));
        }
    }

    /// Records a violation.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Returns true if any violation was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The violations in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_accumulate() {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", Some("  "));
        errors.check_required_field("schemaName", Some("public"));
        errors.check_required_collection("columns", true);
        assert_eq!(errors.errors(), ["tableName is required", "No columns defined"]);
        assert_eq!(errors.to_string(), "tableName is required; No columns defined");
    }

    #[test]
    fn test_missing_field_is_required() {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sql", None);
        errors.check_required_collection("rows", false);
        assert_eq!(errors.errors(), ["sql is required"]);
    }
}
