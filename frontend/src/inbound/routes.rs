//! Navigation route table.
//!
//! The client has one page. The root path and every unknown path redirect
//! to it.

/// Canonical path of the hero management page.
pub const HERO_ROUTE: &str = "/hero";

/// Pages reachable by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Hero list and create/edit modal.
    HeroPage,
}

impl Route {
    /// Canonical path of this page.
    pub const fn path(self) -> &'static str {
        match self {
            Self::HeroPage => HERO_ROUTE,
        }
    }
}

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    /// The path names a page directly.
    Direct(Route),
    /// The path was redirected to a page.
    Redirect(Route),
}

impl RouteMatch {
    /// The page that ends up displayed.
    pub const fn route(self) -> Route {
        match self {
            Self::Direct(route) | Self::Redirect(route) => route,
        }
    }
}

/// Resolve a requested path against the route table.
///
/// Leading and trailing slashes are ignored; matching is exact on the
/// remaining segment.
///
/// # Examples
/// ```
/// use frontend::inbound::routes::{Route, RouteMatch, resolve_route};
///
/// assert_eq!(resolve_route("/hero"), RouteMatch::Direct(Route::HeroPage));
/// assert_eq!(resolve_route("/"), RouteMatch::Redirect(Route::HeroPage));
/// ```
pub fn resolve_route(path: &str) -> RouteMatch {
    match path.trim().trim_matches('/') {
        "hero" => RouteMatch::Direct(Route::HeroPage),
        _ => RouteMatch::Redirect(Route::HeroPage),
    }
}
