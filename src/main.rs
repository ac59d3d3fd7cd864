use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, route::create_router, todo_store::TodoStore, user_store::UserStore};

mod config;
mod credential;
mod error;
mod extract;
mod handler;
mod middleware;
mod model;
mod route;
mod schema;
mod todo_store;
mod user_store;

// Struct representing the application state. A handler needing both stores
// locks `users` before `todos`.
pub struct AppState {
    users: Mutex<UserStore>,
    todos: Mutex<TodoStore>,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            users: Mutex::new(UserStore::new()),
            todos: Mutex::new(TodoStore::new()),
            config,
        }
    }
}

const USAGE: &str = r#"
This is a restful API representing a todolist and users.

Make an account by POSTing /users with a json containing username and password.
Log into (get a fresh idtoken for) an existing account by POSTing /users/:username
with a json containing password. Both respond with the idtoken used to authenticate.

A default account exists with username "admin" and idtoken "faketoken".

GET /todo returns the URIs of all todos, optionally filtered with
?field=<owner|title|content>&search=<substring>.
POST /todo adds a todo from title, content, owner and idtoken.
GET, PUT and DELETE /todo/:id read, replace and remove a todo; PUT takes the
same fields as POST, DELETE only owner and idtoken.

All other endpoints return 404."#;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

// Entry point of the application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    // Create an Arc-wrapped instance of the application state
    let app_state = Arc::new(AppState::new(config.clone()));
    let app = create_router(app_state);

    let server = axum::Server::try_bind(&addr)?;
    tracing::info!(%addr, public_url = %config.public_url, "server started");
    tracing::info!("{USAGE}");

    server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
