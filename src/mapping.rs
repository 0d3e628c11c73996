// Declarative mapping: CSV source -> parameterized Cypher write statement
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// One rule binding a CSV source to a graph write statement.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingEntry {
    /// CSV filename, resolved against the mapping file's directory.
    pub source: String,
    /// Cypher text with `$name` placeholders.
    pub statement: String,
    /// Statement parameter name -> CSV column name.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    /// Reporting tag, e.g. a node label or relationship type.
    pub label: String,
}

/// The full mapping file: optional init statements (constraints, indexes)
/// followed by the ordered list of load entries.
///
/// Entry order is significant and preserved: statements that create
/// relationships must come after the entries that create the nodes they
/// match on. No dependency inference is performed.
#[derive(Debug, Clone, Deserialize)]
pub struct Mapping {
    #[serde(default)]
    pub init: Vec<String>,
    pub entries: Vec<MappingEntry>,
}

/// Parse and validate a mapping file.
///
/// Fails with [`ConfigError`] on unreadable or malformed YAML, on empty
/// required fields, and on statement placeholders with no column binding.
/// Runs before any CSV is opened and before any write is issued.
pub fn load(path: &Path) -> Result<Mapping, ConfigError> {
    let text = fs::read_to_string(path)?;
    let mapping: Mapping = serde_yaml::from_str(&text)?;
    validate(&mapping)?;
    Ok(mapping)
}

fn validate(mapping: &Mapping) -> Result<(), ConfigError> {
    for entry in &mapping.entries {
        for (field, value) in [
            ("source", &entry.source),
            ("statement", &entry.statement),
            ("label", &entry.label),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    label: entry.label.clone(),
                    field,
                });
            }
        }

        for parameter in statement_placeholders(&entry.statement) {
            if !entry.parameters.contains_key(&parameter) {
                return Err(ConfigError::UnboundParameter {
                    label: entry.label.clone(),
                    parameter,
                });
            }
        }
    }

    Ok(())
}

/// Collect the distinct `$name` placeholders of a Cypher statement, in
/// order of first appearance.
fn statement_placeholders(statement: &str) -> Vec<String> {
    let bytes = statement.as_bytes();
    let mut names: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }
            if end > start {
                let name = &statement[start..end];
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
            i = end.max(start);
        } else {
            i += 1;
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_mapping(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn placeholders_are_extracted_in_order() {
        let names = statement_placeholders(
            "MATCH (a:Account {id: $account_id}) MERGE (c:Contact {id: $contact_id}) \
             SET c.name = $name, c.account = $account_id",
        );
        assert_eq!(names, vec!["account_id", "contact_id", "name"]);
    }

    #[test]
    fn lone_dollar_is_not_a_placeholder() {
        assert!(statement_placeholders("CREATE (n:Price {text: '$ 100'})").is_empty());
    }

    #[test]
    fn entries_keep_declared_order() {
        let file = write_mapping(
            r#"
entries:
  - source: accounts.csv
    statement: "MERGE (a:Account {id: $id})"
    parameters:
      id: Account_ID
    label: Account
  - source: contacts.csv
    statement: "MERGE (c:Contact {id: $id})"
    parameters:
      id: Contact_ID
    label: Contact
"#,
        );

        let mapping = load(file.path()).unwrap();
        let labels: Vec<&str> = mapping.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Account", "Contact"]);
    }

    #[test]
    fn missing_source_key_is_a_config_error() {
        let file = write_mapping(
            r#"
entries:
  - statement: "MERGE (a:Account {id: $id})"
    parameters:
      id: Account_ID
    label: Account
"#,
        );

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn unbound_placeholder_is_a_config_error() {
        let file = write_mapping(
            r#"
entries:
  - source: accounts.csv
    statement: "MERGE (a:Account {id: $id, name: $name})"
    parameters:
      id: Account_ID
    label: Account
"#,
        );

        let err = load(file.path()).unwrap_err();
        match err {
            ConfigError::UnboundParameter { label, parameter } => {
                assert_eq!(label, "Account");
                assert_eq!(parameter, "name");
            }
            other => panic!("expected UnboundParameter, got {other:?}"),
        }
    }

    #[test]
    fn empty_statement_is_a_config_error() {
        let file = write_mapping(
            r#"
entries:
  - source: accounts.csv
    statement: "  "
    parameters: {}
    label: Account
"#,
        );

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField { field: "statement", .. }));
    }

    #[test]
    fn init_statements_are_optional() {
        let file = write_mapping(
            r#"
init:
  - "CREATE CONSTRAINT account_id IF NOT EXISTS FOR (a:Account) REQUIRE a.id IS UNIQUE"
entries: []
"#,
        );

        let mapping = load(file.path()).unwrap();
        assert_eq!(mapping.init.len(), 1);
        assert!(mapping.entries.is_empty());
    }
}
