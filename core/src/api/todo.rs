use super::Api;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{NewTodo, Todo};

impl<T: Transport> Api<T> {
    /// `GET /todos`
    pub async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let request = Ok(self.client.build_list_todos());
        self.call("fetch_todos", request, ApiClient::parse_list_todos)
            .await
    }

    /// `POST /todos`, returning the server-assigned todo.
    pub async fn create_todo(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input);
        self.call("create_todo", request, ApiClient::parse_create_todo)
            .await
    }

    /// `DELETE /todos/{id}`
    pub async fn delete_todo(&self, id: u64) -> Result<(), ApiError> {
        let request = Ok(self.client.build_delete_todo(id));
        self.call("delete_todo", request, ApiClient::parse_delete_todo)
            .await
    }
}
