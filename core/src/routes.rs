//! Client-side route table: URL path to view.

use std::fmt;

/// Views the console can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    About,
    Users,
    Login,
    UserList,
    Sidebar,
    Dashboard,
    DataTable,
    Toast,
    AuditLog,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Home => "HomePage",
            View::About => "AboutPage",
            View::Users => "UserPage",
            View::Login => "LoginPage",
            View::UserList => "UserListPage",
            View::Sidebar => "AdminSidebar",
            View::Dashboard => "DashboardPage",
            View::DataTable => "DataTable",
            View::Toast => "ToastCommon",
            View::AuditLog => "AuditLog",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub view: View,
}

pub const ROUTES: &[Route] = &[
    Route { path: "/", view: View::Home },
    Route { path: "/about", view: View::About },
    Route { path: "/users", view: View::Users },
    Route { path: "/login", view: View::Login },
    Route { path: "/user-list", view: View::UserList },
    Route { path: "/sidebar", view: View::Sidebar },
    Route { path: "/dashboard", view: View::Dashboard },
    Route { path: "/datatable", view: View::DataTable },
    Route { path: "/toast", view: View::Toast },
    Route { path: "/auditlog", view: View::AuditLog },
];

/// Find the view for `path`.
///
/// A query string or fragment is ignored, and so is one trailing `/` on
/// anything but the root.
pub fn resolve(path: &str) -> Option<View> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    ROUTES.iter().find(|route| route.path == path).map(|route| route.view)
}
