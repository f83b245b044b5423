//! Full store lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives both stores over
//! real HTTP with `ReqwestTransport`. Validates that request building,
//! response parsing and the store lifecycle work end-to-end with the actual
//! server.

use admin_core::{App, ClientConfig, NewTodo, NewUser, ReqwestTransport, SortOrder, UserQuery};

/// Start the mock server and return its base URL.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn app(base_url: &str) -> App<ReqwestTransport> {
    App::connect(&ClientConfig::new(base_url).unwrap())
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: "user".to_string(),
        password: "correct horse".to_string(),
    }
}

#[tokio::test]
async fn todo_lifecycle() {
    let base_url = start_server().await;
    let app = app(&base_url);
    let todos = app.todos();

    // Step 1: load — should be empty.
    todos.load().await;
    assert!(todos.is_empty(), "expected empty list");
    assert_eq!(todos.error(), None);

    // Step 2: add two todos; each is appended in order.
    todos.add(NewTodo::new("write tests")).await;
    todos
        .add(NewTodo {
            text: "ship".to_string(),
            completed: true,
        })
        .await;
    let items = todos.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "write tests");
    assert_eq!(items[1].text, "ship");
    assert!(items[1].completed);

    // Step 3: a fresh load agrees with the local view.
    todos.load().await;
    assert_eq!(todos.items(), items);

    // Step 4: remove the first; the second keeps its identity.
    todos.remove(items[0].id).await;
    assert_eq!(todos.items(), vec![items[1].clone()]);
    assert!(!todos.loading());

    // Step 5: remove again — server says 404, collection unchanged.
    todos.remove(items[0].id).await;
    assert_eq!(todos.items(), vec![items[1].clone()]);
    let error = todos.error().expect("404 should be recorded");
    assert!(error.starts_with("HTTP 404"), "{error}");
    assert!(!todos.loading());

    // Step 6: the next success clears the error.
    todos.load().await;
    assert_eq!(todos.error(), None);

    app.shutdown();
}

#[tokio::test]
async fn user_lifecycle() {
    let base_url = start_server().await;
    let app = app(&base_url);
    let users = app.users();

    // Lazy fetch on an empty server leaves the store empty.
    users.fetch().await;
    assert!(users.is_empty());
    assert_eq!(users.page_info().map(|p| p.total), Some(0));

    // Create refetches: newest first, as the server orders them.
    users.create(new_user("Ann")).await;
    users.create(new_user("Bob")).await;
    let names: Vec<_> = users.items().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Bob", "Ann"]);
    assert_eq!(users.page_info().map(|p| p.total), Some(2));
    assert!(users.items().iter().all(|u| !u.is_deleted()));

    // Duplicate email is rejected and nothing is refetched into the store.
    users.create(new_user("Ann")).await;
    let error = users.error().expect("409 should be recorded");
    assert!(error.starts_with("HTTP 409"), "{error}");
    assert_eq!(users.len(), 2);

    // Populated store: fetch is a no-op, so the error stays.
    users.fetch().await;
    assert!(users.error().is_some());

    app.shutdown();
}

#[tokio::test]
async fn user_store_respects_page_size() {
    let base_url = start_server().await;
    let config = ClientConfig::new(base_url.as_str()).unwrap();
    let app = App::with_user_query(&config, ReqwestTransport::new(), UserQuery::page(1, 1));

    app.users().create(new_user("Ann")).await;
    app.users().create(new_user("Bob")).await;

    let users = app.users().items();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Bob");
    let info = app.users().page_info().unwrap();
    assert_eq!((info.total, info.page, info.page_size), (2, 1, 1));
}

#[tokio::test]
async fn user_store_query_filters_and_sorts_on_the_server() {
    let base_url = start_server().await;
    let config = ClientConfig::new(base_url.as_str()).unwrap();
    let query = UserQuery {
        sort: Some(SortOrder::Asc),
        search_text: Some("an".to_string()),
        ..UserQuery::default()
    };
    let app = App::with_user_query(&config, ReqwestTransport::new(), query);

    for name in ["Ann", "Bob", "Dana"] {
        app.users().create(new_user(name)).await;
    }

    let names: Vec<_> = app.users().items().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Ann", "Dana"]);
    assert_eq!(app.users().page_info().unwrap().total, 2);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app(&format!("http://{addr}"));
    app.todos().load().await;

    let error = app.todos().error().expect("network failure should be recorded");
    assert!(error.starts_with("network error"), "{error}");
    assert!(!app.todos().loading());
    assert!(app.todos().is_empty());
}
