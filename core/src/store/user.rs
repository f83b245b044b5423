use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use super::Store;
use crate::api::Api;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{NewUser, Page, User, UserQuery};

/// Paging metadata of the last applied user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> From<&Page<T>> for PageInfo {
    fn from(page: &Page<T>) -> Self {
        Self {
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

/// Admin user collection. Creating a user refetches the whole list.
#[derive(Debug)]
pub struct UserStore<T> {
    api: Arc<Api<T>>,
    query: UserQuery,
    page_info: Mutex<Option<PageInfo>>,
    store: Store<User>,
}

impl<T: Transport> UserStore<T> {
    pub fn new(api: Arc<Api<T>>) -> Self {
        Self::with_query(api, UserQuery::default())
    }

    /// Use `query` for every list request this store issues.
    pub fn with_query(api: Arc<Api<T>>, query: UserQuery) -> Self {
        Self {
            api,
            query,
            page_info: Mutex::new(None),
            store: Store::new("users"),
        }
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        *self.page_info.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the collection with the items of the server's page.
    pub async fn get_many(&self) {
        self.store
            .replace("get_many", self.api.get_users(&self.query), |state, page| {
                self.apply_page(&mut state.items, page);
            })
            .await
    }

    /// Populate the collection once. Does nothing while it holds any user.
    pub async fn fetch(&self) {
        if self.store.is_empty() {
            self.get_many().await;
        }
    }

    /// Alias of [`UserStore::fetch`].
    pub async fn fetch_if_empty(&self) {
        self.fetch().await
    }

    /// Create a user, then reload the list from the server.
    ///
    /// Both calls run inside one loading window. A failed create issues no
    /// refetch. The replace ticket is taken only once the create has
    /// succeeded, so a list that lands while the POST is in flight does not
    /// supersede the refetch.
    pub async fn create(&self, input: NewUser) {
        let call = async {
            let created = self.api.create_user(&input).await?;
            info!(user_id = %created.id, "user created");
            let ticket = self.store.next_ticket();
            let page = self.api.get_users(&self.query).await?;
            Ok::<_, ApiError>((ticket, page))
        };
        self.store
            .track("create", call, |state, (ticket, page)| {
                self.store.commit_if_current("create", ticket, state, page, |state, page| {
                    self.apply_page(&mut state.items, page);
                });
            })
            .await
    }

    fn apply_page(&self, items: &mut Vec<User>, page: Page<User>) {
        *self.page_info.lock().unwrap_or_else(PoisonError::into_inner) = Some(PageInfo::from(&page));
        *items = page.items;
    }
}

impl<T> Deref for UserStore<T> {
    type Target = Store<User>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}
