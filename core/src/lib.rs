//! Client core for the admin console: todos and admin users.
//!
//! # Overview
//! Layers, leaf first:
//! - `http` / `client`: requests and responses as plain data, built and
//!   parsed without touching the network (host-does-IO pattern).
//! - `transport`: executes a request; `ReqwestTransport` for real use.
//! - `api`: one async call per endpoint. Logs failures and propagates them.
//! - `store`: reactive collections with `loading` / `error` state. Absorbs
//!   failures into state.
//! - `app`: owns the stores for the lifetime of the application.
//! - `routes`: static path to view table.
//!
//! # Design
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - Stores publish state over `tokio::sync::watch`; views subscribe.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod routes;
pub mod store;
pub mod transport;
pub mod types;

pub use api::Api;
pub use app::App;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use routes::{resolve, Route, View, ROUTES};
pub use store::{PageInfo, Store, StoreState, StoreWatcher, TodoStore, UserStore};
pub use transport::ReqwestTransport;
pub use types::{
    NewTodo, NewUser, Page, PaginatedUsersResponse, SortOrder, Todo, User, UserQuery,
};
