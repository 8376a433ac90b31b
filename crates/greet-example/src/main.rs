//! Example console application built on `rudder`.
//!
//! Try:
//!
//! ```text
//! greet-example greet --name=Ada
//! greet-example greet --shout
//! greet-example --appconfig=config.yaml
//! greet-example exit --status=3
//! ```

use rudder::{Context, Dispatcher, ParamSet, Response};
use std::env;
use std::io;
use std::process;

fn main() {
    let mut dispatcher = Dispatcher::builder()
        .default_route("greet")
        .action("greet", |params: &ParamSet, ctx: &Context| {
            let name = params.get_str("name").unwrap_or("world");
            let greeting = ctx
                .config
                .setting("greeting")
                .and_then(|value| value.as_str())
                .unwrap_or("Hello");
            let mut line = format!("{greeting}, {name}!");
            if params.get_flag("shout") {
                line = line.to_uppercase();
            }
            println!("{line}");
            Ok::<_, anyhow::Error>(0)
        })
        .action("exit", |params: &ParamSet, _ctx: &Context| {
            let status = params
                .get_str("status")
                .map(|status| status.parse::<i32>())
                .transpose()?
                .unwrap_or(0);
            Ok::<_, anyhow::Error>(Response::with_status(status))
        })
        .build();

    let status = dispatcher.run(env::args().skip(1), &mut io::stderr());
    process::exit(status);
}
