// src/types/resume_record.rs
//! Loosely structured resume data, read once from JSON and never mutated

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Render a scalar JSON value as text. Strings are used verbatim, numbers and
/// booleans in their JSON form, everything else counts as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(map: &Map<String, Value>, key: &str, default: &str) -> String {
    map.get(key)
        .and_then(scalar_text)
        .unwrap_or_else(|| default.to_string())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct ResumeRecord {
    root: Map<String, Value>,
}

impl ResumeRecord {
    /// Read and parse the record file. No schema validation beyond requiring
    /// a JSON object at the root.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resume data: {}", path.display()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse resume data: {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => anyhow::bail!(
                "Resume data must be a JSON object, found {}",
                json_kind(&other)
            ),
        }
    }

    /// Look up a top-level text field, falling back to `default`
    pub fn text_or(&self, key: &str, default: &str) -> String {
        text_field(&self.root, key, default)
    }

    /// Object entries of a top-level sequence, in input order. Non-object
    /// items are skipped.
    pub fn entries(&self, key: &str) -> Vec<RecordEntry<'_>> {
        self.root
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|item| item.as_object())
                    .map(|fields| RecordEntry { fields })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Category name to items, in the key order of the input file
    pub fn skill_categories(&self, key: &str) -> Vec<(String, Vec<String>)> {
        self.root
            .get(key)
            .and_then(|v| v.as_object())
            .map(|categories| {
                categories
                    .iter()
                    .map(|(name, items)| (name.clone(), string_list(Some(items))))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One item of a sequence field such as `education` or `experience`
#[derive(Debug, Clone, Copy)]
pub struct RecordEntry<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RecordEntry<'a> {
    pub fn text_or(&self, key: &str, default: &str) -> String {
        text_field(self.fields, key, default)
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        string_list(self.fields.get(key))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_text_or_uses_default_only_when_absent() {
        let record = ResumeRecord::from_value(json!({
            "name": "Ada Lovelace",
            "email": "",
            "phone": null,
        }))
        .unwrap();

        assert_eq!(record.text_or("name", "John Doe"), "Ada Lovelace");
        assert_eq!(record.text_or("email", "johndoe@email.com"), "");
        assert_eq!(record.text_or("phone", "123-456-7890"), "123-456-7890");
        assert_eq!(record.text_or("linkedin", "linkedin.com/in/johndoe"), "linkedin.com/in/johndoe");
    }

    #[test]
    fn test_scalars_render_as_text() {
        let record = ResumeRecord::from_value(json!({
            "education": [{"school": "MIT", "year": 2021, "honors": true, "degree": ["x"]}]
        }))
        .unwrap();

        let entries = record.entries("education");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text_or("year", ""), "2021");
        assert_eq!(entries[0].text_or("honors", ""), "true");
        assert_eq!(entries[0].text_or("degree", "none"), "none");
    }

    #[test]
    fn test_entries_keep_order_and_skip_non_objects() {
        let record = ResumeRecord::from_value(json!({
            "projects": [{"name": "first"}, "stray", {"name": "second"}]
        }))
        .unwrap();

        let names: Vec<String> = record
            .entries("projects")
            .iter()
            .map(|p| p.text_or("name", ""))
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(record.entries("experience").is_empty());
    }

    #[test]
    fn test_list_filters_nested_values() {
        let record = ResumeRecord::from_value(json!({
            "experience": [{"bullets": ["a", 2, ["nested"], {"k": "v"}, "b"], "technologies": "Rust"}]
        }))
        .unwrap();

        let job = record.entries("experience")[0];
        assert_eq!(job.list("bullets"), vec!["a", "2", "b"]);
        assert!(job.list("technologies").is_empty());
        assert!(job.list("missing").is_empty());
    }

    #[test]
    fn test_skill_categories_preserve_input_order() {
        let record = ResumeRecord::from_json_str(
            r#"{"skills": {"Tools": ["Git"], "Languages": ["Python", "Go"], "Empty": []}}"#,
        )
        .unwrap();

        let skills = record.skill_categories("skills");
        let names: Vec<&str> = skills.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Tools", "Languages", "Empty"]);
        assert_eq!(skills[1].1, vec!["Python", "Go"]);
        assert!(skills[2].1.is_empty());
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        assert!(ResumeRecord::from_json_str("[1, 2, 3]").is_err());
        assert!(ResumeRecord::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Grace Hopper"}}"#).unwrap();

        let record = ResumeRecord::load(file.path()).unwrap();
        assert_eq!(record.text_or("name", "John Doe"), "Grace Hopper");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = ResumeRecord::load(Path::new("/nonexistent/personal.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read resume data"));
    }
}
