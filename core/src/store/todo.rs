use std::ops::Deref;
use std::sync::Arc;

use super::Store;
use crate::api::Api;
use crate::http::Transport;
use crate::types::{NewTodo, Todo};

/// Todo collection with append-on-create and filter-on-delete semantics.
#[derive(Debug)]
pub struct TodoStore<T> {
    api: Arc<Api<T>>,
    store: Store<Todo>,
}

impl<T: Transport> TodoStore<T> {
    pub fn new(api: Arc<Api<T>>) -> Self {
        Self {
            api,
            store: Store::new("todos"),
        }
    }

    /// Replace the collection with the server's list.
    pub async fn load(&self) {
        self.store
            .replace("load", self.api.fetch_todos(), |state, todos| {
                state.items = todos;
            })
            .await
    }

    /// Create a todo and append the server's copy. The list is not refetched.
    pub async fn add(&self, input: NewTodo) {
        self.store
            .track("add", self.api.create_todo(&input), |state, todo| {
                state.items.push(todo);
            })
            .await
    }

    /// Delete a todo and drop it from the local collection.
    pub async fn remove(&self, id: u64) {
        self.store
            .track("remove", self.api.delete_todo(id), |state, ()| {
                state.items.retain(|todo| todo.id != id);
            })
            .await
    }
}

impl<T> Deref for TodoStore<T> {
    type Target = Store<Todo>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}
