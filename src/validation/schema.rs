use serde_json::{Map, Value};

use super::error::SchemaError;
use super::rule::Rule;

/// One declared field and its rules, in evaluation order
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub name: String,
    pub rules: Vec<Rule>,
}

/// Declared shape of a request body. Built once at startup and shared.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Validate `body` and return one message per failing field, in declaration order.
    ///
    /// Rules of a field run in order and stop at the first failure, so a missing
    /// field only reports `is required` when `Required` is declared first.
    pub fn validate(&self, body: &Map<String, Value>) -> Vec<String> {
        let mut messages = Vec::new();

        for field in &self.fields {
            let value = lookup(body, &field.name);
            if let Some(rule) = field.rules.iter().find(|rule| !rule.check(value)) {
                messages.push(rule.message(&display_name(&field.name)));
            }
        }

        messages
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldRules>,
    error: Option<SchemaError>,
}

impl SchemaBuilder {
    pub fn field<I>(mut self, name: &str, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        if self.error.is_some() {
            return self;
        }

        let rules: Vec<Rule> = rules.into_iter().collect();

        if name.trim().is_empty() {
            self.error = Some(SchemaError::EmptyFieldName);
        } else if self.fields.iter().any(|f| f.name == name) {
            self.error = Some(SchemaError::DuplicateField(name.to_string()));
        } else if rules.is_empty() {
            self.error = Some(SchemaError::NoRules(name.to_string()));
        } else {
            self.fields.push(FieldRules {
                name: name.to_string(),
                rules,
            });
        }

        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Schema {
                fields: self.fields,
            }),
        }
    }
}

/// Exact key first, then an ASCII case-insensitive match
pub fn lookup<'a>(body: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    body.get(name).or_else(|| {
        body.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Field name as shown in messages: first character lower-cased
fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
