use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CONTENT_TYPE, LOCATION},
        StatusCode,
    },
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppError,
    extract::JsonBody,
    model::Todo,
    schema::{present, ListQuery, LoginSchema, OwnerSchema, SignupSchema, TodoSchema},
    user_store::UserStore,
    AppState,
};

// Only a plain decimal integer names a todo; anything else is an unknown route.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| AppError::RouteNotFound)
}

fn credentials<'a>(
    owner: &'a Option<String>,
    idtoken: &'a Option<String>,
) -> Result<(&'a str, &'a str), AppError> {
    match (present(owner), present(idtoken)) {
        (Some(owner), Some(idtoken)) => Ok((owner, idtoken)),
        _ => Err(AppError::Unauthorized),
    }
}

fn authenticate(users: &UserStore, owner: &str, idtoken: &str) -> Result<(), AppError> {
    if users.verify(owner, idtoken) {
        Ok(())
    } else {
        Err(AppError::Forbidden("invalid owner or token"))
    }
}

fn authorize_owner(todo: &Todo, owner: &str) -> Result<(), AppError> {
    if todo.owner == owner {
        Ok(())
    } else {
        Err(AppError::Forbidden("not the owner of this todo"))
    }
}

// Handler for listing Todo URIs, optionally filtered
pub async fn get_todos(
    State(data): State<Arc<AppState>>,
    query: Option<Query<ListQuery>>,
) -> impl IntoResponse {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let filter = query.filter();

    let ids = data.todos.lock().await.list(filter.as_ref());
    let uris: Vec<String> = ids.into_iter().map(|id| data.config.todo_uri(id)).collect();
    Json(uris)
}

// Handler for creating a new Todo
pub async fn create_todo(
    State(data): State<Arc<AppState>>,
    JsonBody(body): JsonBody<TodoSchema>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(title), Some(content)) = (present(&body.title), present(&body.content)) else {
        return Err(AppError::BadRequest("title and content are required"));
    };
    let (owner, idtoken) = credentials(&body.owner, &body.idtoken)?;

    let users = data.users.lock().await;
    authenticate(&users, owner, idtoken)?;

    let id = data.todos.lock().await.add(owner, title, content)?;
    drop(users);
    tracing::info!(id, owner, "todo created");

    let uri = data.config.todo_uri(id);
    Ok((
        StatusCode::CREATED,
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (LOCATION, uri.clone()),
        ],
        uri,
    ))
}

// Handler for getting a specific Todo by ID
pub async fn get_todo(
    Path(id): Path<String>,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let todos = data.todos.lock().await;
    let todo = todos.get(id)?.clone();
    Ok(Json(todo))
}

// Handler for replacing the title and content of a Todo
pub async fn update_todo(
    Path(id): Path<String>,
    State(data): State<Arc<AppState>>,
    JsonBody(body): JsonBody<TodoSchema>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let (Some(title), Some(content)) = (present(&body.title), present(&body.content)) else {
        return Err(AppError::BadRequest("title and content are required"));
    };

    let users = data.users.lock().await;
    let mut todos = data.todos.lock().await;
    let todo = todos.get(id)?;
    let (owner, idtoken) = credentials(&body.owner, &body.idtoken)?;
    authenticate(&users, owner, idtoken)?;
    authorize_owner(todo, owner)?;

    todos.update(id, title, content)?;
    tracing::info!(id, owner, "todo updated");
    Ok(StatusCode::NO_CONTENT)
}

// Handler for deleting a Todo by ID
pub async fn delete_todo(
    Path(id): Path<String>,
    State(data): State<Arc<AppState>>,
    JsonBody(body): JsonBody<OwnerSchema>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;

    let users = data.users.lock().await;
    let mut todos = data.todos.lock().await;
    let todo = todos.get(id)?;
    let (owner, idtoken) = credentials(&body.owner, &body.idtoken)?;
    authenticate(&users, owner, idtoken)?;
    authorize_owner(todo, owner)?;

    todos.remove(id)?;
    tracing::info!(id, owner, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

// Handler for account creation; responds with the first token
pub async fn signup(
    State(data): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SignupSchema>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(username), Some(password)) = (present(&body.username), present(&body.password))
    else {
        return Err(AppError::BadRequest("username and password are required"));
    };

    let idtoken = data.users.lock().await.create(username, password)?;
    tracing::info!(username, "account created");
    Ok(Json(idtoken))
}

// Handler for logging in; responds with a fresh token
pub async fn login(
    Path(username): Path<String>,
    State(data): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginSchema>,
) -> Result<impl IntoResponse, AppError> {
    let Some(password) = present(&body.password) else {
        return Err(AppError::BadRequest("password is required"));
    };

    let idtoken = data.users.lock().await.login(&username, password)?;
    tracing::info!(username = %username, "login succeeded");
    Ok(Json(idtoken))
}

pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(owner: &str) -> Todo {
        Todo {
            title: "t".into(),
            owner: owner.into(),
            content: "c".into(),
            id: 0,
        }
    }

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(AppError::RouteNotFound)));
        assert!(matches!(parse_id("-1"), Err(AppError::RouteNotFound)));
        // forms a JavaScript Number() would accept are still not ids here
        for raw in ["0.0", "1e0", " 1", ""] {
            assert!(matches!(parse_id(raw), Err(AppError::RouteNotFound)), "{raw:?}");
        }
    }

    #[test]
    fn credentials_need_both_fields() {
        let some = |s: &str| Some(s.to_string());
        assert!(credentials(&some("alice"), &some("t")).is_ok());
        assert!(matches!(
            credentials(&some("alice"), &None),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            credentials(&some(""), &some("t")),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn only_the_owner_is_authorized() {
        assert!(authorize_owner(&todo("alice"), "alice").is_ok());
        assert!(matches!(
            authorize_owner(&todo("alice"), "bob"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn authenticate_checks_token() {
        let users = UserStore::new();
        assert!(authenticate(&users, "admin", "faketoken").is_ok());
        assert!(matches!(
            authenticate(&users, "admin", "wrong"),
            Err(AppError::Forbidden(_))
        ));
    }
}
