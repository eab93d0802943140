use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog for locale {locale} is not valid JSON: {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog for locale {0} must be a JSON object")]
    NotAnObject(String),
}

/// Message catalog for one locale, keyed by dotted identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    locale: String,
    entries: BTreeMap<String, String>,
}

impl Catalog {
    /// Parses a nested JSON object, flattening it into dotted keys.
    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self, CatalogError> {
        let locale = locale.into();
        let value: Value = serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            locale: locale.clone(),
            source,
        })?;
        let Value::Object(root) = value else {
            return Err(CatalogError::NotAnObject(locale));
        };
        let mut entries = BTreeMap::new();
        for (key, child) in root {
            flatten(&key, child, &mut entries);
        }
        Ok(Self { locale, entries })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Looks up `key` and substitutes `{name}` placeholders. Unknown keys render as the key.
    pub fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        let Some(template) = self.get(key) else {
            return key.to_string();
        };
        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

fn flatten(prefix: &str, value: Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&format!("{prefix}.{key}"), child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text);
        }
        Value::Number(number) => {
            out.insert(prefix.to_string(), number.to_string());
        }
        Value::Bool(_) | Value::Null | Value::Array(_) => {}
    }
}
