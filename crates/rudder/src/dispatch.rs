//! The dispatcher: parse → resolve → invoke → normalize → translate.
//!
//! [`Dispatcher`] orchestrates one console invocation end to end:
//!
//! ```text
//! argument vector
//!   → configuration (default, or --appconfig override)
//!   → route + params
//!   → resolver
//!   → Outcome (status or response)
//! ```
//!
//! It holds no state across invocations; every call to [`dispatch`] is an
//! independent run through the pipeline. Only the resolver's "unroutable"
//! failure is intercepted and re-typed as
//! [`DispatchError::UnknownCommand`]; every other failure passes through
//! unchanged.
//!
//! [`dispatch`]: Dispatcher::dispatch

use crate::config::{Config, ConfigError, ConfigLoader};
use crate::params::ParamSet;
use crate::parser::parse_invocation;
use crate::resolver::{
    Action, Context, IntoOutcome, Outcome, ResolveError, Resolver, Response, Router,
};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

/// Errors surfaced by [`Dispatcher::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The route named a command that does not exist.
    ///
    /// Carries the offending route and, as [`source`], the resolver's
    /// original failure, so "the user typed a command that doesn't exist"
    /// stays distinguishable from other failures without losing the cause
    /// chain.
    ///
    /// [`source`]: std::error::Error::source
    #[error("Unknown command \"{route}\"")]
    UnknownCommand {
        /// The route as resolved, in canonical string form.
        route: String,
        #[source]
        source: ResolveError,
    },

    /// Configuration could not be loaded; dispatch never started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A resolver or action failure other than "unroutable", passed
    /// through unchanged.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl DispatchError {
    /// Returns the offending route if this is an unknown-command error.
    pub fn unknown_route(&self) -> Option<&str> {
        match self {
            DispatchError::UnknownCommand { route, .. } => Some(route),
            _ => None,
        }
    }
}

/// Dispatches console invocations to actions.
///
/// Built with [`Dispatcher::builder`]. The three entry points differ only
/// in what they hand back:
///
/// - [`dispatch`](Dispatcher::dispatch) returns the raw [`Outcome`]
/// - [`handle`](Dispatcher::handle) always returns a [`Response`]
/// - [`run`](Dispatcher::run) reports errors on an injected stream and
///   returns the process exit code
///
/// # Example
///
/// ```rust
/// use rudder::{Context, Dispatcher, ParamSet};
///
/// let mut dispatcher = Dispatcher::builder()
///     .action("greet", |params: &ParamSet, _ctx: &Context| {
///         let name = params.get_str("name").unwrap_or("world").to_string();
///         println!("Hello, {name}!");
///         Ok::<_, anyhow::Error>(0)
///     })
///     .build();
///
/// let status = dispatcher.run(["greet", "--name=Ada"], &mut std::io::sink());
/// assert_eq!(status, 0);
/// ```
pub struct Dispatcher {
    config: Config,
    loader: ConfigLoader,
    resolver: Box<dyn Resolver>,
}

impl Dispatcher {
    /// Starts building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Dispatches one invocation.
    ///
    /// `args` is the argument vector without the program name. The
    /// returned outcome is exactly what the action produced: an integer
    /// status as-is, a response object verbatim.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Config`] if a `--appconfig` override cannot be
    /// loaded, [`DispatchError::UnknownCommand`] if the resolver reports
    /// the route unroutable, and [`DispatchError::Failed`] for every other
    /// resolver or action failure.
    pub fn dispatch<I, S>(&mut self, args: I) -> Result<Outcome, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let config = self.loader.load(&args, self.config.clone())?;
        let invocation = parse_invocation(args, &config.default_route);
        let ctx = Context::new(invocation.route.clone(), Rc::new(config));

        match self
            .resolver
            .resolve(&invocation.route, &invocation.params, &ctx)
        {
            Ok(outcome) => Ok(outcome),
            Err(err @ ResolveError::Unroutable(_)) => Err(DispatchError::UnknownCommand {
                route: invocation.route.to_string(),
                source: err,
            }),
            Err(ResolveError::Other(err)) => Err(DispatchError::Failed(err)),
        }
    }

    /// Dispatches one invocation through the request/response adapter.
    ///
    /// An action's own [`Response`] is returned verbatim; a bare integer
    /// status is written onto a fresh response's `exit_status` field.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Dispatcher::dispatch).
    pub fn handle<I, S>(&mut self, args: I) -> Result<Response, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.dispatch(args)? {
            Outcome::Response(response) => Ok(response),
            Outcome::Status(status) => Ok(Response::with_status(status)),
        }
    }

    /// Dispatches one invocation and returns the process exit code.
    ///
    /// Failures print their message as one line on `err` and yield exit
    /// code 1; a missing `--appconfig` file does so before any dispatch
    /// occurs. The stream is injected rather than taken from the ambient
    /// process so callers (and tests) control where diagnostics go.
    pub fn run<I, S, W>(&mut self, args: I, err: &mut W) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: io::Write,
    {
        match self.dispatch(args) {
            Ok(outcome) => outcome.status(),
            Err(error) => {
                let _ = writeln!(err, "{error}");
                1
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Dispatcher`].
///
/// Routes registered with [`action`](DispatcherBuilder::action) /
/// [`action_handler`](DispatcherBuilder::action_handler) go into the
/// built-in [`Router`]; [`resolver`](DispatcherBuilder::resolver) swaps in
/// a custom collaborator instead, superseding any registered actions.
#[derive(Default)]
pub struct DispatcherBuilder {
    config: Config,
    loader: ConfigLoader,
    router: Router,
    resolver: Option<Box<dyn Resolver>>,
}

impl DispatcherBuilder {
    /// Sets the default configuration used when no override is given.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the route dispatched when an invocation names none.
    ///
    /// Shorthand for mutating [`Config::default_route`] on the default
    /// configuration.
    pub fn default_route(mut self, route: impl Into<String>) -> Self {
        self.config.default_route = route.into();
        self
    }

    /// Installs a path-resolution hook on the configuration loader, for
    /// alias schemes like `@app/config.yaml`.
    pub fn resolve_path_with<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&str) -> PathBuf + 'static,
    {
        self.loader = self.loader.resolve_path_with(resolve);
        self
    }

    /// Registers a closure action for a route on the built-in router.
    pub fn action<F, R>(mut self, route: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&ParamSet, &Context) -> Result<R, anyhow::Error> + 'static,
        R: IntoOutcome + 'static,
    {
        self.router = self.router.action(route, f);
        self
    }

    /// Registers an [`Action`] implementation for a route on the built-in
    /// router.
    pub fn action_handler(
        mut self,
        route: impl Into<String>,
        action: impl Action + 'static,
    ) -> Self {
        self.router = self.router.action_handler(route, action);
        self
    }

    /// Replaces the built-in router with a custom [`Resolver`].
    pub fn resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Builds the dispatcher.
    pub fn build(self) -> Dispatcher {
        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => Box::new(self.router),
        };
        Dispatcher {
            config: self.config,
            loader: self.loader,
            resolver,
        }
    }
}

impl fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("config", &self.config)
            .field("router", &self.router)
            .field("custom_resolver", &self.resolver.is_some())
            .finish()
    }
}
