mod cmd_args;

use std::process::ExitCode;

use admin_core::{routes, App, ClientConfig, NewTodo, NewUser, ReqwestTransport, UserQuery, ROUTES};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cmd_args::{Cli, Command, TodoCommand, UserCommand};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_cli=info,admin_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::Routes { path } = &cli.command {
        return print_routes(path.as_deref());
    }

    let config = match cli.base_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let query = match &cli.command {
        Command::Users(UserCommand::List(args)) => UserQuery {
            page: args.page,
            page_size: args.page_size,
            sort: args.sort,
            search_text: args.search.clone(),
            role: args.role.clone(),
            is_deleted: args.deleted,
        },
        _ => UserQuery::default(),
    };
    let app = App::with_user_query(&config, ReqwestTransport::new(), query);

    let error = match cli.command {
        Command::Todos(command) => run_todos(&app, command).await,
        Command::Users(command) => run_users(&app, command).await,
        Command::Routes { .. } => None,
    };

    app.shutdown();

    match error {
        Some(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

/// Run one todo action and print the resulting collection.
async fn run_todos(app: &App<ReqwestTransport>, command: TodoCommand) -> Option<String> {
    let todos = app.todos();
    match command {
        TodoCommand::List => todos.load().await,
        TodoCommand::Add { text, completed } => todos.add(NewTodo { text, completed }).await,
        TodoCommand::Remove { id } => {
            // Load first so the printed list reflects the server.
            todos.load().await;
            if todos.error().is_none() {
                todos.remove(id).await;
            }
        }
    }

    for todo in todos.items() {
        let mark = if todo.completed { "x" } else { " " };
        println!("[{mark}] {:>4}  {}", todo.id, todo.text);
    }
    todos.error()
}

async fn run_users(app: &App<ReqwestTransport>, command: UserCommand) -> Option<String> {
    let users = app.users();
    match command {
        UserCommand::List(_) => users.fetch().await,
        UserCommand::Create(args) => {
            users
                .create(NewUser {
                    name: args.name,
                    email: args.email,
                    role: args.role,
                    password: args.password,
                })
                .await
        }
    }

    for user in users.items() {
        let status = if user.is_deleted() { " (deactivated)" } else { "" };
        println!("{}  {:<20} {:<30} {}{status}", user.id, user.name, user.email, user.role);
    }
    if let Some(info) = users.page_info() {
        println!("page {} ({} per page), {} total", info.page, info.page_size, info.total);
    }
    users.error()
}

fn print_routes(path: Option<&str>) -> ExitCode {
    match path {
        Some(path) => match routes::resolve(path) {
            Some(view) => {
                println!("{view}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("no route for {path}");
                ExitCode::FAILURE
            }
        },
        None => {
            for route in ROUTES {
                println!("{:<12} {}", route.path, route.view);
            }
            ExitCode::SUCCESS
        }
    }
}
