use admin_core::SortOrder;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Admin console client for todos and users", long_about = None)]
pub struct Cli {
    /// API base URL. Defaults to $API_BASE_URL, then http://localhost:3000.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Work with todos
    #[command(subcommand)]
    Todos(TodoCommand),

    /// Work with admin users
    #[command(subcommand)]
    Users(UserCommand),

    /// Print the route table, or the view a path resolves to
    Routes {
        path: Option<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TodoCommand {
    /// List all todos
    List,

    /// Create a todo
    Add {
        text: String,
        #[arg(long)]
        completed: bool,
    },

    /// Delete a todo by id
    Remove { id: u64 },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum UserCommand {
    /// List one page of users
    List(ListUsersArgs),

    /// Create a user and print the refreshed list
    Create(CreateUserArgs),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ListUsersArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    /// asc or desc by creation time
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortOrder>,
    /// Match against name and email
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    /// Only deactivated (true) or only active (false) users
    #[arg(long)]
    pub deleted: Option<bool>,
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    match value {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(format!("expected asc or desc, got {other:?}")),
    }
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "user")]
    pub role: String,
    #[arg(long, env = "ADMIN_USER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_todo_add() {
        let cli = Cli::parse_from(["admin-cli", "todos", "add", "buy milk", "--completed"]);
        assert_eq!(
            cli.command,
            Command::Todos(TodoCommand::Add {
                text: "buy milk".to_string(),
                completed: true
            })
        );
        assert_eq!(cli.base_url, None);
    }

    #[test]
    fn parse_todo_remove_with_global_base_url() {
        let cli = Cli::parse_from([
            "admin-cli",
            "todos",
            "remove",
            "7",
            "--base-url",
            "http://api.test",
        ]);
        assert_eq!(cli.command, Command::Todos(TodoCommand::Remove { id: 7 }));
        assert_eq!(cli.base_url.as_deref(), Some("http://api.test"));
    }

    #[test]
    fn parse_users_list_paging() {
        let cli = Cli::parse_from(["admin-cli", "users", "list", "--page", "2", "--page-size", "50"]);
        assert_eq!(
            cli.command,
            Command::Users(UserCommand::List(ListUsersArgs {
                page: Some(2),
                page_size: Some(50),
                ..ListUsersArgs::default()
            }))
        );
    }

    #[test]
    fn parse_users_list_filters() {
        let cli = Cli::parse_from([
            "admin-cli", "users", "list", "--sort", "asc", "--search", "ann", "--role", "admin",
            "--deleted", "false",
        ]);
        let Command::Users(UserCommand::List(args)) = cli.command else {
            panic!("expected users list");
        };
        assert_eq!(args.sort, Some(SortOrder::Asc));
        assert_eq!(args.search.as_deref(), Some("ann"));
        assert_eq!(args.role.as_deref(), Some("admin"));
        assert_eq!(args.deleted, Some(false));
    }

    #[test]
    fn unknown_sort_is_rejected() {
        assert!(Cli::try_parse_from(["admin-cli", "users", "list", "--sort", "newest"]).is_err());
    }

    #[test]
    fn parse_users_create_defaults_role() {
        let cli = Cli::parse_from([
            "admin-cli",
            "users",
            "create",
            "--name",
            "Ann",
            "--email",
            "ann@example.com",
            "--password",
            "pw",
        ]);
        let Command::Users(UserCommand::Create(args)) = cli.command else {
            panic!("expected users create");
        };
        assert_eq!(args.role, "user");
        assert_eq!(args.password, "pw");
    }

    #[test]
    fn non_numeric_todo_id_is_rejected() {
        assert!(Cli::try_parse_from(["admin-cli", "todos", "remove", "abc"]).is_err());
    }

    #[test]
    fn parse_routes_optional_path() {
        let cli = Cli::parse_from(["admin-cli", "routes"]);
        assert_eq!(cli.command, Command::Routes { path: None });
        let cli = Cli::parse_from(["admin-cli", "routes", "/toast"]);
        assert_eq!(
            cli.command,
            Command::Routes {
                path: Some("/toast".to_string())
            }
        );
    }
}
