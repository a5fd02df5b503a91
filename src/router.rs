//! Navigable entry points and the admin guard.
//!
//! | Path            | Route                 | Protected |
//! |-----------------|-----------------------|-----------|
//! | `/`             | `Route::Home`         | no        |
//! | `/about`        | `Route::About`        | no        |
//! | `/destinations` | `Route::Destinations` | no        |
//! | `/services`     | `Route::Services`     | no        |
//! | `/blog`         | `Route::Blog`         | no        |
//! | `/contact`      | `Route::Contact`      | no        |
//! | `/admin/login`  | `Route::AdminLogin`   | no        |
//! | `/admin/*`      | `Route::Admin(rest)`  | yes       |
//!
//! Hash-style paths (`#/about`) are accepted as well.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Destinations,
    Services,
    Blog,
    Contact,
    AdminLogin,
    /// Anything under `/admin` except the login page; holds the remainder
    /// after `/admin/` (empty for `/admin` itself).
    Admin(String),
}

impl Route {
    /// Parse a request path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_matches('/');

        let route = match path {
            "" => Self::Home,
            "about" => Self::About,
            "destinations" => Self::Destinations,
            "services" => Self::Services,
            "blog" => Self::Blog,
            "contact" => Self::Contact,
            "admin/login" => Self::AdminLogin,
            "admin" => Self::Admin(String::new()),
            _ => {
                let rest = path.strip_prefix("admin/")?;
                Self::Admin(rest.trim_end_matches('/').to_owned())
            }
        };
        Some(route)
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Admin(rest) if rest.is_empty() => "/admin".into(),
            Self::Admin(rest) => format!("/admin/{rest}"),
            other => other.static_path().into(),
        }
    }

    fn static_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Destinations => "/destinations",
            Self::Services => "/services",
            Self::Blog => "/blog",
            Self::Contact => "/contact",
            Self::AdminLogin => "/admin/login",
            Self::Admin(_) => "/admin",
        }
    }

    /// Short page name, used as a view identifier.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Destinations => "destinations",
            Self::Services => "services",
            Self::Blog => "blog",
            Self::Contact => "contact",
            Self::AdminLogin => "admin-login",
            Self::Admin(_) => "admin",
        }
    }

    pub const fn is_protected(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    /// Public pages render inside the shared navbar/footer layout.
    pub const fn uses_layout(&self) -> bool {
        !matches!(self, Self::AdminLogin | Self::Admin(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of guarding a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    pub const fn route(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Send protected routes to the login page unless the admin flag is set.
pub fn guard(route: Route, is_admin: bool) -> Resolution {
    if route.is_protected() && !is_admin {
        Resolution::Redirect(Route::AdminLogin)
    } else {
        Resolution::Render(route)
    }
}

/// A link in the main navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

/// Main navigation, in display order.
pub const NAV_LINKS: [NavLink; 6] = [
    NavLink { name: "Home", path: "/" },
    NavLink { name: "Destinations", path: "/destinations" },
    NavLink { name: "Services", path: "/services" },
    NavLink { name: "About", path: "/about" },
    NavLink { name: "Blog", path: "/blog" },
    NavLink { name: "Contact", path: "/contact" },
];

/// Label of the admin entry in the navigation.
pub const fn admin_link_label(is_admin: bool) -> &'static str {
    if is_admin { "Admin Dashboard" } else { "Admin Login" }
}

impl NavLink {
    /// Whether this link points at the page for `current_path`.
    pub fn is_active(&self, current_path: &str) -> bool {
        Route::parse(current_path).is_some_and(|route| route.path() == self.path)
    }
}
