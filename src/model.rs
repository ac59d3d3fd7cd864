use std::str::FromStr;

// Data model representing a Todo item
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Todo {
    pub(crate) title: String,
    pub(crate) owner: String,
    pub(crate) content: String,
    pub(crate) id: u64,
}

impl Todo {
    pub fn field(&self, field: TodoField) -> &str {
        match field {
            TodoField::Owner => &self.owner,
            TodoField::Title => &self.title,
            TodoField::Content => &self.content,
        }
    }
}

// Account record; never serialized, the hash and token stay in memory.
#[derive(Debug, Clone)]
pub struct User {
    pub(crate) name: String,
    pub(crate) idtoken: String,
    pub(crate) password_hash: String,
    pub(crate) salt: String,
}

/// Todo fields a listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    Owner,
    Title,
    Content,
}

impl FromStr for TodoField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(TodoField::Owner),
            "title" => Ok(TodoField::Title),
            "content" => Ok(TodoField::Content),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFilter {
    pub field: TodoField,
    pub search: String,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        todo.field(self.field).contains(self.search.as_str())
    }
}
