//! Resource API modules: async calls that pair an `ApiClient` with a
//! `Transport`.
//!
//! # Design
//! Each call builds its request, executes it once and parses the response.
//! Failures are logged where they happen and returned to the caller as-is;
//! there is no retry and no error translation at this layer.

mod todo;
mod user;

use tracing::{debug, error};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Typed access to the todo and admin user endpoints.
#[derive(Debug)]
pub struct Api<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute `request` and hand the response to `parse`, logging any failure
    /// under `operation`.
    async fn call<R>(
        &self,
        operation: &'static str,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&ApiClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let result = async {
            let request = request?;
            debug!(operation, method = request.method.as_str(), path = %request.path, "sending request");
            let response = self.transport.execute(request).await?;
            parse(&self.client, response)
        }
        .await;

        if let Err(err) = &result {
            error!(operation, error = %err, "API call failed");
        }
        result
    }
}
