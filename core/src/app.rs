//! Application state with an explicit lifecycle.
//!
//! # Design
//! One `App` is built at startup and handed to whatever renders or drives
//! the stores; there are no global stores. Both stores share a single `Api`.
//! `shutdown` consumes the value, so a torn-down app cannot be used again.

use std::sync::Arc;

use tracing::info;

use crate::api::Api;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::http::Transport;
use crate::store::{TodoStore, UserStore};
use crate::transport::ReqwestTransport;
use crate::types::UserQuery;

#[derive(Debug)]
pub struct App<T> {
    api: Arc<Api<T>>,
    todos: TodoStore<T>,
    users: UserStore<T>,
}

impl<T: Transport> App<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self::with_user_query(config, transport, UserQuery::default())
    }

    pub fn with_user_query(config: &ClientConfig, transport: T, query: UserQuery) -> Self {
        let api = Arc::new(Api::new(ApiClient::new(&config.base_url), transport));
        info!(base_url = %api.client().base_url(), "application state created");
        Self {
            todos: TodoStore::new(Arc::clone(&api)),
            users: UserStore::with_query(Arc::clone(&api), query),
            api,
        }
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn todos(&self) -> &TodoStore<T> {
        &self.todos
    }

    pub fn users(&self) -> &UserStore<T> {
        &self.users
    }

    pub fn shutdown(self) {
        info!(
            todos = self.todos.len(),
            users = self.users.len(),
            "application state torn down"
        );
    }
}

impl App<ReqwestTransport> {
    /// Build the app on a real HTTP transport.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }
}
