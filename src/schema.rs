use crate::model::{TodoField, TodoFilter};

// Every field is optional so that a missing one becomes a status code rather
// than an extractor rejection. Empty strings count as missing.

// Struct representing the request body for creating or replacing a Todo
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TodoSchema {
    pub title: Option<String>,
    pub content: Option<String>,
    pub owner: Option<String>,
    pub idtoken: Option<String>,
}

// Struct representing the request body for deleting a Todo
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct OwnerSchema {
    pub owner: Option<String>,
    pub idtoken: Option<String>,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SignupSchema {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LoginSchema {
    pub password: Option<String>,
}

// Query string of GET /todo
#[derive(Debug, Default, serde::Deserialize)]
pub struct ListQuery {
    pub field: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    // Unknown fields and empty searches fall back to the unfiltered list.
    pub fn filter(&self) -> Option<TodoFilter> {
        let field: TodoField = self.field.as_deref()?.parse().ok()?;
        let search = present(&self.search)?;
        Some(TodoFilter {
            field,
            search: search.to_string(),
        })
    }
}

pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(field: Option<&str>, search: Option<&str>) -> ListQuery {
        ListQuery {
            field: field.map(str::to_string),
            search: search.map(str::to_string),
        }
    }

    #[test]
    fn filter_needs_known_field_and_search() {
        assert_eq!(
            query(Some("title"), Some("milk")).filter(),
            Some(TodoFilter {
                field: TodoField::Title,
                search: "milk".into()
            })
        );
        assert_eq!(query(Some("id"), Some("1")).filter(), None);
        assert_eq!(query(Some("title"), Some("")).filter(), None);
        assert_eq!(query(None, Some("milk")).filter(), None);
        assert_eq!(query(Some("owner"), None).filter(), None);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let body: TodoSchema = serde_json::from_str(r#"{"title":"a"}"#).unwrap();
        assert_eq!(body.title.as_deref(), Some("a"));
        assert!(body.content.is_none());
        assert!(body.idtoken.is_none());
    }

    #[test]
    fn empty_string_is_not_present() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("x".into())), Some("x"));
    }
}
