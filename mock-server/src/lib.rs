use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PagingResponse<T> {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<T>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub sort: Sort,
    pub search_text: Option<String>,
    pub role: Option<String>,
    pub is_deleted: Option<bool>,
}

impl UserFilter {
    /// Case-insensitive substring match on name or email, exact role, and
    /// soft-delete state.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(needle) = self.search_text.as_deref().map(str::to_lowercase) {
            if !user.name.to_lowercase().contains(&needle)
                && !user.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.role.as_deref().is_some_and(|role| role != user.role) {
            return false;
        }
        if self
            .is_deleted
            .is_some_and(|deleted| deleted != user.deleted_at.is_some())
        {
            return false;
        }
        true
    }
}

#[derive(Default)]
pub struct Db {
    next_todo_id: u64,
    todos: Vec<Todo>,
    users: Vec<User>,
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", delete(delete_todo))
        .route("/admin/users/", get(list_users).post(create_user))
        .route("/admin/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<SharedDb>) -> Json<Vec<Todo>> {
    Json(db.read().await.todos.clone())
}

async fn create_todo(
    State(db): State<SharedDb>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut db = db.write().await;
    db.next_todo_id += 1;
    let todo = Todo {
        id: db.next_todo_id,
        text: input.text,
        completed: input.completed,
    };
    db.todos.push(todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn delete_todo(
    State(db): State<SharedDb>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.write().await;
    let index = db
        .todos
        .iter()
        .position(|todo| todo.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    db.todos.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(
    State(db): State<SharedDb>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<PagingResponse<User>>, StatusCode> {
    let page = filter.page.unwrap_or(1);
    let page_size = filter.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page == 0 || page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let db = db.read().await;
    // Users are stored in creation order.
    let mut matched: Vec<&User> = db.users.iter().filter(|user| filter.matches(user)).collect();
    if filter.sort == Sort::Desc {
        matched.reverse();
    }
    let skip = (page as usize - 1) * page_size as usize;
    let items = matched
        .iter()
        .skip(skip)
        .take(page_size as usize)
        .map(|user| (*user).clone())
        .collect();
    Ok(Json(PagingResponse {
        total: matched.len() as u64,
        page,
        page_size,
        items,
    }))
}

async fn create_user(
    State(db): State<SharedDb>,
    Json(input): Json<CreateUser>,
) -> Result<Json<User>, StatusCode> {
    if input.name.trim().is_empty() || !input.email.contains('@') || input.password.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut db = db.write().await;
    if db.users.iter().any(|user| user.email == input.email) {
        return Err(StatusCode::CONFLICT);
    }

    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        role: input.role,
        created_at: now.clone(),
        updated_at: now,
        deleted_at: None,
    };
    db.users.push(user.clone());
    Ok(Json(user))
}

async fn get_user(
    State(db): State<SharedDb>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, StatusCode> {
    let db = db.read().await;
    db.users
        .iter()
        .find(|user| user.id == id)
        .map(|user| Json(user.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: 1,
            text: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "text": "Test", "completed": false}));
    }

    #[test]
    fn create_todo_defaults_completed_to_false() {
        let input: CreateTodo = serde_json::from_str(r#"{"text":"No completed field"}"#).unwrap();
        assert_eq!(input.text, "No completed field");
        assert!(!input.completed);
    }

    #[test]
    fn create_todo_rejects_missing_text() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn user_serializes_null_deleted_at() {
        let user = User {
            id: Uuid::nil(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            role: "admin".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            deleted_at: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json["deleted_at"].is_null());
        assert!(json.get("password").is_none());
    }

    fn user(name: &str, role: &str, deleted: bool) -> User {
        User {
            id: Uuid::nil(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: role.to_string(),
            created_at: "t0".to_string(),
            updated_at: "t0".to_string(),
            deleted_at: deleted.then(|| "t1".to_string()),
        }
    }

    #[test]
    fn filter_defaults_to_newest_first_and_matches_everything() {
        let filter: UserFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.sort, Sort::Desc);
        assert!(filter.matches(&user("Ann", "admin", true)));
    }

    #[test]
    fn filter_search_is_case_insensitive_over_name_and_email() {
        let filter = UserFilter {
            search_text: Some("ANN".to_string()),
            ..UserFilter::default()
        };
        assert!(filter.matches(&user("Annabel", "user", false)));
        assert!(!filter.matches(&user("Bob", "user", false)));

        let by_email = UserFilter {
            search_text: Some("bob@".to_string()),
            ..UserFilter::default()
        };
        assert!(by_email.matches(&user("Bob", "user", false)));
    }

    #[test]
    fn filter_role_and_deleted_state() {
        let filter = UserFilter {
            role: Some("admin".to_string()),
            is_deleted: Some(false),
            ..UserFilter::default()
        };
        assert!(filter.matches(&user("Ann", "admin", false)));
        assert!(!filter.matches(&user("Ann", "admin", true)));
        assert!(!filter.matches(&user("Bob", "user", false)));
    }

    #[test]
    fn create_user_requires_password() {
        let result: Result<CreateUser, _> =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@example.com","role":"admin"}"#);
        assert!(result.is_err());
    }
}
