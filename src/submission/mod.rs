pub mod fields;
pub mod parser;
pub mod pipeline;

use serde_json::{Map, Value};

/// One accepted application: every submitted field plus where its file ended up.
#[derive(Debug, Clone)]
pub struct Submission {
    pub fields: Map<String, Value>,
    pub file_reference: String,
}

impl Submission {
    pub fn new(fields: Map<String, Value>, file_reference: String) -> Self {
        Self {
            fields,
            file_reference,
        }
    }

    /// Address the confirmation goes to.
    pub fn email(&self) -> String {
        match self.fields.get(fields::EMAIL) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Fields as two-space indented JSON, in the order they were submitted.
    pub fn pretty_fields(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn log_entry(&self) -> String {
        format!(
            "\n--- New Submission ---\n{}\nFile URL: {}\n",
            self.pretty_fields(),
            self.file_reference
        )
    }

    pub fn email_text(&self) -> String {
        format!(
            "Thank you for applying!\n\nDetails:\n{}\n\nFile URL:\n{}",
            self.pretty_fields(),
            self.file_reference
        )
    }
}
