//! The resolver seam: mapping a route to an action and running it.
//!
//! # Design Rationale
//!
//! The dispatcher does not know how routes map to code. That knowledge
//! lives behind the [`Resolver`] trait, so the built-in registry
//! ([`Router`]) and application-defined resolution schemes are
//! interchangeable.
//!
//! Resolution failures are a tagged enumeration rather than a single
//! opaque error: [`ResolveError::Unroutable`] means "no such command" and
//! is the one variant the dispatcher translates; everything else travels
//! through [`ResolveError::Other`] unchanged. Callers can therefore tell
//! "the user typed a command that doesn't exist" apart from a command that
//! existed and failed.
//!
//! # Core Types
//!
//! - [`Context`]: per-dispatch environment handed to actions
//! - [`Outcome`]: what a resolved action produces (status or response)
//! - [`IntoOutcome`]: normalizes the return shapes actions may use
//! - [`Action`] / [`FnAction`]: the unit of business logic
//! - [`Router`]: the default route-string → action registry

use crate::config::Config;
use crate::params::ParamSet;
use crate::route::Route;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Context passed to actions for one dispatch.
///
/// Records the route being executed (useful for diagnostics and for
/// actions registered under several routes) and shares the configuration
/// the dispatch was resolved under. A fresh context is built per
/// invocation; nothing persists across dispatches.
#[derive(Debug, Clone)]
pub struct Context {
    /// The route this dispatch resolved.
    pub route: Route,
    /// The configuration in effect, after any `--appconfig` override.
    pub config: Rc<Config>,
}

impl Context {
    /// Creates a context for the given route and configuration.
    pub fn new(route: Route, config: Rc<Config>) -> Self {
        Self { route, config }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            route: Route::parse(""),
            config: Rc::new(Config::new()),
        }
    }
}

/// A response object carrying an exit status.
///
/// Actions that need to hand back more than a bare integer return one of
/// these; the dispatcher passes it through verbatim, and the process
/// adapter uses its `exit_status` as the process exit code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// The exit status to report to the process-exit layer.
    pub exit_status: i32,
}

impl Response {
    /// Creates a response with exit status 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a response with the given exit status.
    pub fn with_status(exit_status: i32) -> Self {
        Self { exit_status }
    }
}

/// What a resolved action produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A bare integer exit status.
    Status(i32),
    /// A response object, returned unchanged to the caller.
    Response(Response),
}

impl Outcome {
    /// Returns true if this is a bare status.
    pub fn is_status(&self) -> bool {
        matches!(self, Outcome::Status(_))
    }

    /// Returns true if this is a response object.
    pub fn is_response(&self) -> bool {
        matches!(self, Outcome::Response(_))
    }

    /// The exit status this outcome represents, whichever shape it has.
    pub fn status(&self) -> i32 {
        match self {
            Outcome::Status(status) => *status,
            Outcome::Response(response) => response.exit_status,
        }
    }
}

/// Normalizes the return shapes an action may use into an [`Outcome`].
///
/// Actions return whichever shape reads best at the call site:
///
/// - `i32` becomes [`Outcome::Status`]
/// - `()` becomes `Outcome::Status(0)` — returning nothing is success
/// - [`Response`] becomes [`Outcome::Response`]
/// - [`Outcome`] passes through unchanged
///
/// # Example
///
/// ```rust
/// use rudder::{IntoOutcome, Outcome, Response};
///
/// assert_eq!(3.into_outcome(), Outcome::Status(3));
/// assert_eq!(().into_outcome(), Outcome::Status(0));
/// assert_eq!(
///     Response::with_status(7).into_outcome(),
///     Outcome::Response(Response::with_status(7))
/// );
/// ```
pub trait IntoOutcome {
    /// Convert this value into an [`Outcome`].
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl IntoOutcome for i32 {
    fn into_outcome(self) -> Outcome {
        Outcome::Status(self)
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Status(0)
    }
}

impl IntoOutcome for Response {
    fn into_outcome(self) -> Outcome {
        Outcome::Response(self)
    }
}

/// Errors a [`Resolver`] can produce.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No handler exists for the route. The dispatcher translates this
    /// into [`DispatchError::UnknownCommand`](crate::DispatchError::UnknownCommand).
    #[error("unable to resolve the request \"{0}\"")]
    Unroutable(String),

    /// Any other resolution or action failure; passes through dispatch
    /// unchanged.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Maps a route to a concrete action and invokes it.
///
/// Implementations take `&mut self`: console dispatch is single-threaded,
/// one route per process invocation, so actions may hold mutable state
/// directly.
pub trait Resolver {
    /// Resolves `route` and runs the matching action.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Unroutable`] when no action matches the route;
    /// [`ResolveError::Other`] for failures inside a matched action.
    fn resolve(
        &mut self,
        route: &Route,
        params: &ParamSet,
        ctx: &Context,
    ) -> Result<Outcome, ResolveError>;
}

/// A unit of business logic bound to a route.
pub trait Action {
    /// Runs the action.
    fn run(&mut self, params: &ParamSet, ctx: &Context) -> Result<Outcome, anyhow::Error>;
}

/// Wraps an `FnMut` closure as an [`Action`].
///
/// The closure may return `Result<R, anyhow::Error>` for any `R:
/// IntoOutcome`, so simple actions return `0` or `()` and richer ones
/// return a [`Response`].
///
/// # Example
///
/// ```rust
/// use rudder::{Action, Context, FnAction, ParamSet};
///
/// let mut action = FnAction::new(|params: &ParamSet, _ctx: &Context| {
///     let name = params.get_str("name").unwrap_or("world");
///     println!("Hello, {name}!");
///     Ok::<_, anyhow::Error>(0)
/// });
///
/// let outcome = action.run(&ParamSet::new(), &Context::default()).unwrap();
/// assert_eq!(outcome.status(), 0);
/// ```
pub struct FnAction<F, R> {
    f: F,
    _marker: std::marker::PhantomData<fn() -> R>,
}

impl<F, R> FnAction<F, R>
where
    F: FnMut(&ParamSet, &Context) -> Result<R, anyhow::Error>,
    R: IntoOutcome,
{
    /// Creates an action from the given closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<F, R> Action for FnAction<F, R>
where
    F: FnMut(&ParamSet, &Context) -> Result<R, anyhow::Error>,
    R: IntoOutcome,
{
    fn run(&mut self, params: &ParamSet, ctx: &Context) -> Result<Outcome, anyhow::Error> {
        (self.f)(params, ctx).map(IntoOutcome::into_outcome)
    }
}

/// The default resolver: a registry mapping route strings to actions.
///
/// Routes are matched by their canonical string form (segments joined with
/// `/`), so `Router` supports flat and nested command sets alike.
#[derive(Default)]
pub struct Router {
    actions: HashMap<String, Box<dyn Action>>,
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closure action for a route, replacing any previous
    /// registration.
    pub fn action<F, R>(mut self, route: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&ParamSet, &Context) -> Result<R, anyhow::Error> + 'static,
        R: IntoOutcome + 'static,
    {
        self.actions.insert(route.into(), Box::new(FnAction::new(f)));
        self
    }

    /// Registers an [`Action`] implementation for a route.
    pub fn action_handler(
        mut self,
        route: impl Into<String>,
        action: impl Action + 'static,
    ) -> Self {
        self.actions.insert(route.into(), Box::new(action));
        self
    }

    /// Returns true if a route is registered.
    pub fn contains(&self, route: &str) -> bool {
        self.actions.contains_key(route)
    }

    /// Iterates the registered route strings, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

impl Resolver for Router {
    fn resolve(
        &mut self,
        route: &Route,
        params: &ParamSet,
        ctx: &Context,
    ) -> Result<Outcome, ResolveError> {
        let key = route.to_string();
        match self.actions.get_mut(&key) {
            Some(action) => action.run(params, ctx).map_err(ResolveError::Other),
            None => Err(ResolveError::Unroutable(key)),
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("action_count", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(router: &mut Router, route: &str) -> Result<Outcome, ResolveError> {
        let route = Route::parse(route);
        let ctx = Context::new(route.clone(), Rc::new(Config::new()));
        router.resolve(&route, &ParamSet::new(), &ctx)
    }

    #[test]
    fn test_into_outcome_conversions() {
        assert_eq!(5.into_outcome(), Outcome::Status(5));
        assert_eq!(().into_outcome(), Outcome::Status(0));
        assert!(Response::new().into_outcome().is_response());
        assert_eq!(Outcome::Status(1).into_outcome(), Outcome::Status(1));
    }

    #[test]
    fn test_outcome_status() {
        assert_eq!(Outcome::Status(3).status(), 3);
        assert_eq!(Outcome::Response(Response::with_status(7)).status(), 7);
    }

    #[test]
    fn test_router_runs_registered_action() {
        let mut router = Router::new().action("greet", |_p: &ParamSet, _c: &Context| {
            Ok::<_, anyhow::Error>(0)
        });

        assert!(router.contains("greet"));
        let outcome = run(&mut router, "greet").unwrap();
        assert_eq!(outcome, Outcome::Status(0));
    }

    #[test]
    fn test_router_unknown_route_is_unroutable() {
        let mut router = Router::new();
        let err = run(&mut router, "db/migrate").unwrap_err();

        assert!(matches!(err, ResolveError::Unroutable(ref route) if route == "db/migrate"));
        assert_eq!(err.to_string(), "unable to resolve the request \"db/migrate\"");
    }

    #[test]
    fn test_router_action_error_is_other() {
        let mut router = Router::new().action("boom", |_p: &ParamSet, _c: &Context| {
            Err::<i32, _>(anyhow::anyhow!("exploded"))
        });

        let err = run(&mut router, "boom").unwrap_err();
        assert!(matches!(err, ResolveError::Other(_)));
        assert_eq!(err.to_string(), "exploded");
    }

    #[test]
    fn test_router_unit_return_is_status_zero() {
        let mut router = Router::new()
            .action("noop", |_p: &ParamSet, _c: &Context| Ok::<_, anyhow::Error>(()));

        let outcome = run(&mut router, "noop").unwrap();
        assert_eq!(outcome, Outcome::Status(0));
    }

    #[test]
    fn test_router_response_passes_through() {
        let mut router = Router::new().action("status", |_p: &ParamSet, _c: &Context| {
            Ok::<_, anyhow::Error>(Response::with_status(2))
        });

        let outcome = run(&mut router, "status").unwrap();
        assert_eq!(outcome, Outcome::Response(Response::with_status(2)));
    }

    #[test]
    fn test_router_action_sees_params_and_context() {
        let mut router = Router::new().action("echo", |p: &ParamSet, ctx: &Context| {
            assert_eq!(p.get_str("word"), Some("hi"));
            assert_eq!(ctx.route.to_string(), "echo");
            Ok::<_, anyhow::Error>(0)
        });

        let route = Route::parse("echo");
        let mut params = ParamSet::new();
        params.insert("word", crate::params::ParamValue::Text("hi".into()));
        let ctx = Context::new(route.clone(), Rc::new(Config::new()));

        router.resolve(&route, &params, &ctx).unwrap();
    }

    #[test]
    fn test_stateful_action_handler() {
        struct Counter {
            count: i32,
        }

        impl Action for Counter {
            fn run(&mut self, _p: &ParamSet, _c: &Context) -> Result<Outcome, anyhow::Error> {
                self.count += 1;
                Ok(Outcome::Status(self.count))
            }
        }

        let mut router = Router::new().action_handler("count", Counter { count: 0 });
        assert_eq!(run(&mut router, "count").unwrap(), Outcome::Status(1));
        assert_eq!(run(&mut router, "count").unwrap(), Outcome::Status(2));
    }

    #[test]
    fn test_routes_listing() {
        let router = Router::new()
            .action("a", |_p: &ParamSet, _c: &Context| Ok::<_, anyhow::Error>(0))
            .action("b", |_p: &ParamSet, _c: &Context| Ok::<_, anyhow::Error>(0));

        let mut routes: Vec<&str> = router.routes().collect();
        routes.sort_unstable();
        assert_eq!(routes, ["a", "b"]);
    }
}
