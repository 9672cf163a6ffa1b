//! Admin route table and the authentication guard in front of it

use std::fmt;

/// Every screen of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form
    Login,
    /// Dashboard
    Dashboard,
    /// User list
    Users,
    /// Service list
    Services,
    /// New service form
    ServiceNew,
    /// Service edit form
    ServiceEdit(i64),
    /// Reservation list
    Reservations,
    /// Reservation detail
    ReservationDetail(i64),
    /// Reservation edit form
    ReservationEdit(i64),
    /// Contact-form inbox
    ContactForms,
    /// Contact-form detail
    ContactFormDetail(i64),
    /// Notification recipients
    Notifications,
    /// Rating moderation
    Ratings,
    /// Blog management
    Blog,
}

/// Path every protected route falls back to without a session
pub const LOGIN_PATH: &str = "/login";
/// Path unknown locations fall back to
pub const ROOT_PATH: &str = "/";

impl Route {
    /// Match a path against the route table
    ///
    /// Trailing slashes and a query string are ignored. Both
    /// `/services/:id/edit` and the legacy `/services/edit/:id` are
    /// accepted.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Self::Dashboard),
            ["login"] => Some(Self::Login),
            ["users"] => Some(Self::Users),
            ["services"] => Some(Self::Services),
            ["services", "new"] => Some(Self::ServiceNew),
            ["services", raw, "edit"] | ["services", "edit", raw] => parse_id(raw).map(Self::ServiceEdit),
            ["reservations"] => Some(Self::Reservations),
            ["reservations", raw] => parse_id(raw).map(Self::ReservationDetail),
            ["reservations", raw, "edit"] => parse_id(raw).map(Self::ReservationEdit),
            ["contact-forms"] => Some(Self::ContactForms),
            ["contact-forms", raw] => parse_id(raw).map(Self::ContactFormDetail),
            ["notifications"] => Some(Self::Notifications),
            ["ratings"] => Some(Self::Ratings),
            ["blog"] => Some(Self::Blog),
            _ => None,
        }
    }

    /// Canonical path of the route
    pub fn path(self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Dashboard => ROOT_PATH.to_string(),
            Self::Users => "/users".to_string(),
            Self::Services => "/services".to_string(),
            Self::ServiceNew => "/services/new".to_string(),
            Self::ServiceEdit(id) => format!("/services/{id}/edit"),
            Self::Reservations => "/reservations".to_string(),
            Self::ReservationDetail(id) => format!("/reservations/{id}"),
            Self::ReservationEdit(id) => format!("/reservations/{id}/edit"),
            Self::ContactForms => "/contact-forms".to_string(),
            Self::ContactFormDetail(id) => format!("/contact-forms/{id}"),
            Self::Notifications => "/notifications".to_string(),
            Self::Ratings => "/ratings".to_string(),
            Self::Blog => "/blog".to_string(),
        }
    }

    /// Whether the route requires a session
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Show the route
    Render(Route),
    /// Go elsewhere
    Redirect(String),
}

/// Decides what a path shows given the authentication state
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Resolve `path`
    ///
    /// Unknown paths redirect to the dashboard root; protected routes
    /// redirect to the login page without a session.
    pub fn resolve(path: &str, authenticated: bool) -> Resolution {
        match Route::parse(path) {
            None => Resolution::Redirect(ROOT_PATH.to_string()),
            Some(route) if route.is_protected() && !authenticated => {
                Resolution::Redirect(LOGIN_PATH.to_string())
            }
            Some(route) => Resolution::Render(route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_route_table_round_trips() {
        let routes = [
            Route::Login,
            Route::Dashboard,
            Route::Users,
            Route::Services,
            Route::ServiceNew,
            Route::ServiceEdit(4),
            Route::Reservations,
            Route::ReservationDetail(41),
            Route::ReservationEdit(41),
            Route::ContactForms,
            Route::ContactFormDetail(7),
            Route::Notifications,
            Route::Ratings,
            Route::Blog,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_legacy_service_edit_path() {
        assert_eq!(Route::parse("/services/edit/12"), Some(Route::ServiceEdit(12)));
        assert_eq!(Route::parse("/reservations/41/?tab=payments"), Some(Route::ReservationDetail(41)));
    }

    #[test]
    fn test_unknown_paths_redirect_to_root() {
        for path in ["/nope", "/reservations/abc", "/services/4/delete"] {
            assert_eq!(RouteGuard::resolve(path, true), Resolution::Redirect("/".to_string()));
        }
    }

    #[test]
    fn test_protected_routes_need_session() {
        assert_eq!(
            RouteGuard::resolve("/ratings", false),
            Resolution::Redirect("/login".to_string())
        );
        assert_eq!(
            RouteGuard::resolve("/ratings", true),
            Resolution::Render(Route::Ratings)
        );
        assert_eq!(
            RouteGuard::resolve("/login", false),
            Resolution::Render(Route::Login)
        );
    }
}
