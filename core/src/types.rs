//! Domain DTOs for the todo and admin user endpoints.
//!
//! # Design
//! These types mirror the server's JSON but are defined independently of the
//! mock-server crate; integration tests catch schema drift. User timestamps
//! stay string-encoded exactly as the server sends them.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use uuid::Uuid;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// An admin-visible user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl User {
    /// Soft-deleted accounts carry a `deleted_at` timestamp.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Server-side paging envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<T>,
}

pub type PaginatedUsersResponse = Page<User>;

/// Sort direction of the user list, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Paging and filter parameters for the user list. `None` leaves the server
/// default and is not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<SortOrder>,
    /// Matched against name and email.
    pub search_text: Option<String>,
    pub role: Option<String>,
    /// `Some(true)` lists only soft-deleted users, `Some(false)` only active ones.
    pub is_deleted: Option<bool>,
}

impl UserQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub(crate) fn to_query_string(&self) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page {
            params.append_pair("page", &page.to_string());
        }
        if let Some(page_size) = self.page_size {
            params.append_pair("page_size", &page_size.to_string());
        }
        if let Some(sort) = self.sort {
            params.append_pair("sort", sort.as_str());
        }
        if let Some(search_text) = &self.search_text {
            params.append_pair("search_text", search_text);
        }
        if let Some(role) = &self.role {
            params.append_pair("role", role);
        }
        if let Some(is_deleted) = self.is_deleted {
            params.append_pair("is_deleted", if is_deleted { "true" } else { "false" });
        }
        let encoded = params.finish();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }
}
