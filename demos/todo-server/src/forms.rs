//! Validation of the create form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TITLE_MAX_LENGTH: usize = 255;

pub const REQUIRED: &str = "This field is required.";
pub const REJECTED_TITLE_ERROR: &str = "This is an error!";

/// Title that the form rejects on purpose, to show the error path.
const REJECTED_TITLE: &str = "error";

/// Raw body of `POST /todos/create/`.
#[derive(Debug, Default, Deserialize)]
pub struct TodoCreateForm {
    #[serde(default)]
    pub title: String,
}

/// A form as rendered back to the user: the submitted value plus errors by field.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BoundForm {
    pub title: String,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

impl BoundForm {
    pub fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl TodoCreateForm {
    /// The trimmed title, or the form with its errors.
    pub fn clean(self) -> Result<String, BoundForm> {
        let title = self.title.trim().to_string();
        let mut form = BoundForm {
            title: title.clone(),
            ..BoundForm::default()
        };

        let length = title.chars().count();
        if title.is_empty() {
            form.add_error("title", REQUIRED);
        } else if length > TITLE_MAX_LENGTH {
            form.add_error(
                "title",
                format!(
                    "Ensure this value has at most {TITLE_MAX_LENGTH} characters (it has {length})."
                ),
            );
        } else if title == REJECTED_TITLE {
            form.add_error("title", REJECTED_TITLE_ERROR);
        }

        if form.is_valid() { Ok(title) } else { Err(form) }
    }
}
