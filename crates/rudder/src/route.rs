//! Route strings and their parsed form.
//!
//! A route names the action a console invocation targets, as a
//! `/`-separated identifier path like `db/migrate` or `greet`. Routes are
//! parsed once per invocation and immutable afterwards.

use std::fmt;

/// A parsed command route: an ordered sequence of identifier segments.
///
/// Empty segments produced by doubled or leading/trailing separators are
/// dropped, so `"/db//migrate/"` parses the same as `"db/migrate"`.
///
/// # Example
///
/// ```rust
/// use rudder::Route;
///
/// let route = Route::parse("db/migrate");
/// assert_eq!(route.segments(), ["db", "migrate"]);
/// assert_eq!(route.to_string(), "db/migrate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    segments: Vec<String>,
}

impl Route {
    /// Parses a `/`-separated route string.
    ///
    /// The empty string parses to the empty route.
    pub fn parse(route: &str) -> Self {
        Self {
            segments: route
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// The route's segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns true if the route has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<&str> for Route {
    fn from(route: &str) -> Self {
        Self::parse(route)
    }
}
