use crate::{
    error::AppError,
    model::{Todo, TodoFilter},
};

// Todos in insertion order. Ids come from `counter`, which never goes back,
// so a deleted id is never handed out again.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
    counter: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, filter: Option<&TodoFilter>) -> Vec<u64> {
        self.todos
            .iter()
            .filter(|todo| filter.map_or(true, |filter| filter.matches(todo)))
            .map(|todo| todo.id)
            .collect()
    }

    pub fn get(&self, id: u64) -> Result<&Todo, AppError> {
        self.todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or(AppError::NotFound(id))
    }

    pub fn add(&mut self, owner: &str, title: &str, content: &str) -> Result<u64, AppError> {
        if title.is_empty() || content.is_empty() {
            return Err(AppError::BadRequest("title and content are required"));
        }
        let id = self.counter;
        self.todos.push(Todo {
            title: title.to_string(),
            owner: owner.to_string(),
            content: content.to_string(),
            id,
        });
        self.counter += 1;
        Ok(id)
    }

    pub fn update(&mut self, id: u64, title: &str, content: &str) -> Result<(), AppError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(AppError::NotFound(id))?;
        todo.title = title.to_string();
        todo.content = content.to_string();
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<Todo, AppError> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(AppError::NotFound(id))?;
        Ok(self.todos.remove(index))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.todos.len()
    }
}
