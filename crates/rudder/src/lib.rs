//! Route-based command dispatch for console applications.
//!
//! `rudder` turns a raw argument vector into a route plus parameters,
//! resolves the route to an action, runs it, and hands back an exit status
//! or response object — the console front half of an application, with the
//! business logic kept behind a pluggable resolver seam.
//!
//! # Features
//!
//! - **Route parsing**: `module/controller/action` route strings,
//!   `--name=value` options with last-occurrence-wins, bare `--name`
//!   flags, positional values, `--` end-of-options
//! - **Configuration override**: a reserved `--appconfig=<path>` option
//!   replaces the in-memory configuration from a JSON or YAML file before
//!   dispatch, failing fast when the file is missing
//! - **Pluggable resolution**: a built-in route registry ([`Router`]) or
//!   any custom [`Resolver`]
//! - **Typed error translation**: "no such command" is re-typed as
//!   [`DispatchError::UnknownCommand`] carrying the route and the original
//!   cause; every other failure propagates unchanged
//!
//! # Usage
//!
//! ```rust
//! use rudder::{Context, Dispatcher, ParamSet};
//!
//! let mut dispatcher = Dispatcher::builder()
//!     .default_route("greet")
//!     .action("greet", |params: &ParamSet, _ctx: &Context| {
//!         let name = params.get_str("name").unwrap_or("world").to_string();
//!         println!("Hello, {name}!");
//!         Ok::<_, anyhow::Error>(0)
//!     })
//!     .build();
//!
//! // The returned status is the process exit code.
//! let status = dispatcher.run(["greet", "--name=Ada"], &mut std::io::sink());
//! assert_eq!(status, 0);
//! ```
//!
//! # Dispatch pipeline
//!
//! ```text
//! argument vector
//!   → ConfigLoader (default config, or --appconfig=<path> override)
//!   → parse_invocation (route + ParamSet)
//!   → Resolver (route → action → Outcome)
//!   → Status(n) as-is | Response verbatim
//! ```
//!
//! Each invocation is independent: no state survives between dispatches,
//! and there is no concurrency — one process, one route, start to finish.

// Core modules
mod config;
mod dispatch;
mod params;
mod parser;
mod resolver;
mod route;

// Re-export core types
pub use config::{Config, ConfigError, ConfigLoader, OPTION_APPCONFIG};

pub use dispatch::{DispatchError, Dispatcher, DispatcherBuilder};

pub use params::{ParamSet, ParamValue};

pub use parser::{parse_invocation, Invocation};

pub use resolver::{
    Action, Context, FnAction, IntoOutcome, Outcome, ResolveError, Resolver, Response, Router,
};

pub use route::Route;
