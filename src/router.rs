//! Route table and navigation guard.
//!
//! Routes map URL paths (with `:param` segments) to views. Two flags
//! protect routes: `requires_auth` sends anonymous visitors to the login
//! view with the intended path in `?redirect=`, and `requires_admin` sends
//! logged-in non-admins home.

use crate::auth::{AuthMirror, AuthStatus};
use crate::error::RouterError;
use std::collections::BTreeMap;

/// Views the client can show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    ProductDetail,
    StartDesign,
    MyDesigns,
    Activities,
    Design,
    Login,
    Register,
    Profile,
    Checkout,
    OrderConfirmation,
    MyOrders,
    Admin,
}

/// One entry of the route table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub view: View,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl RouteDef {
    const fn public(name: &'static str, path: &'static str, view: View) -> Self {
        Self {
            name,
            path,
            view,
            requires_auth: false,
            requires_admin: false,
        }
    }

    const fn protected(name: &'static str, path: &'static str, view: View) -> Self {
        Self {
            name,
            path,
            view,
            requires_auth: true,
            requires_admin: false,
        }
    }

    const fn admin(name: &'static str, path: &'static str, view: View) -> Self {
        Self {
            name,
            path,
            view,
            requires_auth: true,
            requires_admin: true,
        }
    }

    /// Match `path` against this route's pattern, extracting parameters
    fn match_path(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = split_segments(self.path).collect();
        let actual: Vec<&str> = split_segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, segment) in pattern.iter().zip(&actual) {
            if let Some(name) = expected.strip_prefix(':') {
                let value = urlencoding::decode(segment).ok()?;
                params.insert(name.to_string(), value.into_owned());
            } else if expected != segment {
                return None;
            }
        }
        Some(params)
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Where non-admins are sent
pub const HOME_ROUTE: RouteDef = RouteDef::public("home", "/", View::Home);

/// Where anonymous visitors are sent
pub const LOGIN_ROUTE: RouteDef = RouteDef::public("Login", "/login", View::Login);

/// The application's routes
pub static ROUTES: &[RouteDef] = &[
    HOME_ROUTE,
    RouteDef::public("ProductDetail", "/product/:productId", View::ProductDetail),
    RouteDef::protected("StartDesign", "/start-design/:productId", View::StartDesign),
    RouteDef::protected("MyDesigns", "/my-designs", View::MyDesigns),
    RouteDef::protected("Activities", "/activities", View::Activities),
    RouteDef::protected("Design", "/design/:productId/:activityId", View::Design),
    LOGIN_ROUTE,
    RouteDef::public("Register", "/register", View::Register),
    RouteDef::protected("Profile", "/profile", View::Profile),
    RouteDef::protected("Checkout", "/checkout/:designId", View::Checkout),
    RouteDef::protected("OrderConfirmation", "/order-confirmation/:orderId", View::OrderConfirmation),
    RouteDef::protected("MyOrders", "/my-orders", View::MyOrders),
    RouteDef::admin("Admin", "/admin", View::Admin),
];

/// A path resolved against the route table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    /// Path plus query string as requested
    pub full_path: String,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Redirect target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub name: &'static str,
    pub path: &'static str,
    pub query: BTreeMap<String, String>,
}

impl Location {
    fn for_route(route: &'static RouteDef) -> Self {
        Self {
            name: route.name,
            path: route.path,
            query: BTreeMap::new(),
        }
    }

    fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    /// Path with an encoded query string
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.to_string();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// Outcome of the navigation guard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Location),
}

/// Route table with its guard
#[derive(Clone, Copy, Debug)]
pub struct Router {
    routes: &'static [RouteDef],
}

impl Default for Router {
    fn default() -> Self {
        Self { routes: ROUTES }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &'static [RouteDef] {
        self.routes
    }

    /// Route by name
    pub fn route(&self, name: &str) -> Option<&'static RouteDef> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve a path (optionally with a query string) to a route
    pub fn resolve(&self, full_path: &str) -> Result<RouteMatch, RouterError> {
        let (path, query_string) = full_path.split_once('?').unwrap_or((full_path, ""));

        let (route, params) = self
            .routes
            .iter()
            .find_map(|route| route.match_path(path).map(|params| (route, params)))
            .ok_or_else(|| RouterError::NotFound(full_path.to_string()))?;

        Ok(RouteMatch {
            route,
            params,
            query: parse_query(query_string),
            full_path: full_path.to_string(),
        })
    }

    /// Decide whether navigation to `to` may proceed
    pub fn guard(&self, to: &RouteMatch, auth: &AuthStatus) -> Navigation {
        let route = to.route;
        if (route.requires_auth || route.requires_admin) && !auth.logged_in {
            tracing::debug!(target_path = %to.full_path, "Redirecting anonymous visitor to login");
            return Navigation::Redirect(
                Location::for_route(&LOGIN_ROUTE).with_query("redirect", &to.full_path),
            );
        }
        if route.requires_admin && !auth.is_admin() {
            tracing::debug!(target_path = %to.full_path, "Redirecting non-admin home");
            return Navigation::Redirect(Location::for_route(&HOME_ROUTE));
        }
        Navigation::Proceed
    }

    /// Resolve `path` and run the guard, fetching the auth status on first use.
    ///
    /// Public routes never trigger an auth check.
    pub fn navigate(&self, path: &str, auth: &AuthMirror) -> Result<(RouteMatch, Navigation), RouterError> {
        let to = self.resolve(path)?;
        let navigation = if to.route.requires_auth || to.route.requires_admin {
            self.guard(&to, &auth.status())
        } else {
            Navigation::Proceed
        };
        Ok((to, navigation))
    }
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| {
                let s = s.replace('+', " ");
                match urlencoding::decode(&s) {
                    Ok(decoded) => decoded.into_owned(),
                    Err(_) => s.clone(),
                }
            };
            (decode(k), decode(v))
        })
        .collect()
}
