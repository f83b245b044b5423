use super::Api;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{NewUser, Page, User, UserQuery};

impl<T: Transport> Api<T> {
    /// `GET /admin/users/`, returning the whole paging envelope.
    pub async fn get_users(&self, query: &UserQuery) -> Result<Page<User>, ApiError> {
        let request = Ok(self.client.build_list_users(query));
        self.call("get_users", request, ApiClient::parse_list_users)
            .await
    }

    /// `POST /admin/users/`
    pub async fn create_user(&self, input: &NewUser) -> Result<User, ApiError> {
        let request = self.client.build_create_user(input);
        self.call("create_user", request, ApiClient::parse_create_user)
            .await
    }
}
