//! Command-line parsing.
//!
//! Turns a raw argument vector (program name excluded) into an
//! [`Invocation`]: the route plus a [`ParamSet`].
//!
//! The grammar is deliberately loose, because option names are not declared
//! up front — they are interpreted by whatever action the route resolves
//! to:
//!
//! - the first non-option argument is the route; if none is present the
//!   supplied default route is used
//! - `--name=value` sets a named text value (last occurrence wins)
//! - `--name` with no `=` sets a boolean-true flag
//! - a literal `--` ends option processing; everything after it is
//!   positional verbatim
//! - anything else is appended to the positional values in order
//!
//! The reserved configuration option (`--appconfig=...`) is consumed by the
//! configuration loader before dispatch and never reaches the [`ParamSet`].
//!
//! No validation against the target action's parameters happens here; that
//! is the resolver's concern.

use crate::config::OPTION_APPCONFIG;
use crate::params::{ParamSet, ParamValue};
use crate::route::Route;

/// A parsed invocation: the route and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The requested route, or the default route if none was given.
    pub route: Route,
    /// Named options and positional values.
    pub params: ParamSet,
}

/// Parses an argument vector into an [`Invocation`].
///
/// `args` must not include the program name. `default_route` is used when
/// no route argument is present.
///
/// # Example
///
/// ```rust
/// use rudder::parse_invocation;
///
/// let invocation = parse_invocation(["greet", "--name=Ada"], "help");
/// assert_eq!(invocation.route.to_string(), "greet");
/// assert_eq!(invocation.params.get_str("name"), Some("Ada"));
///
/// let fallback = parse_invocation(Vec::<String>::new(), "help");
/// assert_eq!(fallback.route.to_string(), "help");
/// assert!(fallback.params.is_empty());
/// ```
pub fn parse_invocation<I, S>(args: I, default_route: &str) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut route: Option<String> = None;
    let mut params = ParamSet::new();
    let mut options_ended = false;

    for arg in args {
        let arg = arg.into();

        if options_ended {
            params.push_positional(arg);
            continue;
        }
        if arg == "--" {
            options_ended = true;
            continue;
        }
        if let Some(body) = arg.strip_prefix("--") {
            if let Some((name, value)) = split_option(body) {
                if name != OPTION_APPCONFIG {
                    params.insert(name, value);
                }
                continue;
            }
        }
        if route.is_none() {
            route = Some(arg);
        } else {
            params.push_positional(arg);
        }
    }

    Invocation {
        route: Route::parse(route.as_deref().unwrap_or(default_route)),
        params,
    }
}

/// Splits the body of a `--` argument into an option name and value.
///
/// Returns `None` when the body is not a well-formed option (empty name or
/// a name outside `[A-Za-z0-9_-]`), in which case the argument is treated
/// as a route or positional value.
fn split_option(body: &str) -> Option<(&str, ParamValue)> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        return None;
    }
    let value = match value {
        Some(value) => ParamValue::Text(value.to_string()),
        None => ParamValue::Flag(true),
    };
    Some((name, value))
}
