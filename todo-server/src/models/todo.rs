//! Todo transfer contracts
//!
//! Create input, sparse update input, and the output projection. Inputs are
//! validated from raw JSON so that every bad field is reported together and
//! so that an absent key can be told apart from an explicit `null`.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{ValidationError, ValidationErrors};
use crate::db::Todo;

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new todo title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    ///
    /// The title is stored as supplied; trimming only decides emptiness.
    ///
    /// # Example
    /// ```
    /// use todo_server::models::TodoTitle;
    ///
    /// assert!(TodoTitle::new("Buy milk").is_ok());
    /// assert!(TodoTitle::new("").is_err());
    /// assert!(TodoTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Create input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl NewTodo {
    /// Validate a create payload.
    ///
    /// `title` is required; `description` may be absent or null;
    /// `is_completed` defaults to false when absent. Unknown keys are ignored.
    pub fn from_json(value: Value) -> Result<Self, ValidationErrors> {
        let mut body = into_object(value)?;
        let mut errors = ValidationErrors::default();

        let title = match body.remove("title") {
            None => {
                errors.push(ValidationError::Missing { field: "title" });
                None
            }
            Some(value) => collect(&mut errors, title_from(value)),
        };

        let description = match body.remove("description") {
            None => Some(None),
            Some(value) => collect(&mut errors, description_from(value)),
        };

        let is_completed = match body.remove("is_completed") {
            None => Some(false),
            Some(value) => collect(&mut errors, completed_from(value)),
        };

        match (title, description, is_completed) {
            (Some(title), Some(description), Some(is_completed)) => Ok(Self {
                title,
                description,
                is_completed,
            }),
            _ => Err(errors),
        }
    }
}

impl TryFrom<Value> for NewTodo {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

/// A single field supplied in an update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoChange {
    Title(TodoTitle),
    /// `None` clears the description
    Description(Option<String>),
    Completed(bool),
}

impl TodoChange {
    /// Column this change writes.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Description(_) => "description",
            Self::Completed(_) => "is_completed",
        }
    }
}

/// Sparse update input
///
/// Holds one change per field present in the payload and nothing for the
/// fields that were left out. An empty patch is a valid no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    changes: Vec<TodoChange>,
}

impl TodoPatch {
    /// Validate an update payload.
    ///
    /// `description: null` clears the description. `title` and
    /// `is_completed` cannot be null. Unknown keys are ignored.
    pub fn from_json(value: Value) -> Result<Self, ValidationErrors> {
        let mut body = into_object(value)?;
        let mut errors = ValidationErrors::default();
        let mut changes = Vec::new();

        if let Some(value) = body.remove("title") {
            if let Some(title) = collect(&mut errors, title_from(value)) {
                changes.push(TodoChange::Title(title));
            }
        }

        if let Some(value) = body.remove("description") {
            if let Some(description) = collect(&mut errors, description_from(value)) {
                changes.push(TodoChange::Description(description));
            }
        }

        if let Some(value) = body.remove("is_completed") {
            if let Some(done) = collect(&mut errors, completed_from(value)) {
                changes.push(TodoChange::Completed(done));
            }
        }

        errors.into_result(|| Self { changes })
    }

    pub fn changes(&self) -> &[TodoChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl TryFrom<Value> for TodoPatch {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl FromIterator<TodoChange> for TodoPatch {
    fn from_iter<I: IntoIterator<Item = TodoChange>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

/// Output representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoOut {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl From<Todo> for TodoOut {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            is_completed: t.is_completed,
        }
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, ValidationErrors> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::InvalidType {
            field: "body",
            expected: "a JSON object",
        }
        .into()),
    }
}

fn collect<T>(errors: &mut ValidationErrors, result: Result<T, ValidationError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn title_from(value: Value) -> Result<TodoTitle, ValidationError> {
    match value {
        Value::String(s) => TodoTitle::new(&s),
        _ => Err(ValidationError::InvalidType {
            field: "title",
            expected: "a string",
        }),
    }
}

fn description_from(value: Value) -> Result<Option<String>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(ValidationError::InvalidType {
            field: "description",
            expected: "a string or null",
        }),
    }
}

fn completed_from(value: Value) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(b),
        _ => Err(ValidationError::InvalidType {
            field: "is_completed",
            expected: "a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_rejects_blank() {
        assert!(TodoTitle::new("Buy milk").is_ok());
        assert_eq!(
            TodoTitle::new("  \t").unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
    }

    #[test]
    fn title_kept_as_supplied() {
        let title = TodoTitle::new("  padded ").unwrap();
        assert_eq!(title.as_str(), "  padded ");
    }

    #[test]
    fn create_applies_defaults() {
        let todo = NewTodo::from_json(json!({"title": "Buy milk"})).unwrap();
        assert_eq!(todo.title.as_str(), "Buy milk");
        assert_eq!(todo.description, None);
        assert!(!todo.is_completed);
    }

    #[test]
    fn create_accepts_all_fields() {
        let todo = NewTodo::from_json(json!({
            "title": "Write report",
            "description": "quarterly",
            "is_completed": true
        }))
        .unwrap();
        assert_eq!(todo.description.as_deref(), Some("quarterly"));
        assert!(todo.is_completed);
    }

    #[test]
    fn create_ignores_client_id() {
        let todo = NewTodo::from_json(json!({"id": 99, "title": "x"})).unwrap();
        assert_eq!(todo.title.as_str(), "x");
    }

    #[test]
    fn create_requires_title() {
        let errors = NewTodo::from_json(json!({"description": "no title"})).unwrap_err();
        assert_eq!(errors.fields(), vec!["title"]);
        assert!(matches!(
            errors.iter().next(),
            Some(ValidationError::Missing { field: "title" })
        ));
    }

    #[test]
    fn create_rejects_null_title() {
        let errors = NewTodo::from_json(json!({"title": null})).unwrap_err();
        assert!(matches!(
            errors.iter().next(),
            Some(ValidationError::InvalidType { field: "title", .. })
        ));
    }

    #[test]
    fn create_reports_every_bad_field() {
        let errors = NewTodo::from_json(json!({
            "title": 5,
            "description": false,
            "is_completed": "yes"
        }))
        .unwrap_err();
        assert_eq!(errors.fields(), vec!["title", "description", "is_completed"]);
    }

    #[test]
    fn create_rejects_non_object() {
        let errors = NewTodo::from_json(json!(["Buy milk"])).unwrap_err();
        assert_eq!(errors.fields(), vec!["body"]);
    }

    #[test]
    fn patch_keeps_only_supplied_fields() {
        let patch = TodoPatch::from_json(json!({"is_completed": true})).unwrap();
        assert_eq!(patch.changes(), &[TodoChange::Completed(true)]);
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let cleared = TodoPatch::from_json(json!({"description": null})).unwrap();
        assert_eq!(cleared.changes(), &[TodoChange::Description(None)]);

        let untouched = TodoPatch::from_json(json!({"title": "t"})).unwrap();
        assert!(untouched
            .changes()
            .iter()
            .all(|c| c.column() != "description"));
    }

    #[test]
    fn patch_empty_object_is_noop() {
        let patch = TodoPatch::from_json(json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_rejects_null_title_and_completed() {
        let errors =
            TodoPatch::from_json(json!({"title": null, "is_completed": null})).unwrap_err();
        assert_eq!(errors.fields(), vec!["title", "is_completed"]);
    }

    #[test]
    fn patch_rejects_empty_title() {
        let errors = TodoPatch::from_json(json!({"title": ""})).unwrap_err();
        assert!(matches!(
            errors.iter().next(),
            Some(ValidationError::Empty { field: "title" })
        ));
    }

    #[test]
    fn output_serializes_null_description() {
        let out = TodoOut {
            id: 1,
            title: "Buy milk".into(),
            description: None,
            is_completed: false,
        };
        assert_eq!(
            serde_json::to_value(out).unwrap(),
            json!({"id": 1, "title": "Buy milk", "description": null, "is_completed": false})
        );
    }
}
