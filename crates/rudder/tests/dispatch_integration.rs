use rudder::{
    Context, DispatchError, Dispatcher, Outcome, ParamSet, ResolveError, Resolver, Response,
    Route,
};
use std::cell::RefCell;
use std::rc::Rc;

// Full pipeline with closure actions
#[test]
fn test_greet_scenario() {
    let seen = Rc::new(RefCell::new(String::new()));
    let seen_in_action = seen.clone();

    let mut dispatcher = Dispatcher::builder()
        .default_route("help")
        .action("greet", move |params: &ParamSet, _ctx: &Context| {
            let name = params.get_str("name").unwrap_or("world");
            *seen_in_action.borrow_mut() = name.to_string();
            Ok::<_, anyhow::Error>(0)
        })
        .build();

    let outcome = dispatcher.dispatch(["greet", "--name=Ada"]).unwrap();
    assert_eq!(outcome, Outcome::Status(0));
    assert_eq!(*seen.borrow(), "Ada");
}

#[test]
fn test_unknown_command_is_distinguishable() {
    let mut dispatcher = Dispatcher::builder()
        .action("known", |_p: &ParamSet, _c: &Context| {
            Ok::<_, anyhow::Error>(0)
        })
        .build();

    match dispatcher.dispatch(["does/not/exist"]) {
        Err(DispatchError::UnknownCommand { route, source }) => {
            assert_eq!(route, "does/not/exist");
            assert!(matches!(source, ResolveError::Unroutable(_)));
        }
        other => panic!("expected UnknownCommand, got {other:?}"),
    }
}

#[test]
fn test_action_failure_is_not_unknown_command() {
    let mut dispatcher = Dispatcher::builder()
        .action("fragile", |_p: &ParamSet, _c: &Context| {
            Err::<i32, _>(anyhow::anyhow!("backend unavailable"))
        })
        .build();

    match dispatcher.dispatch(["fragile"]) {
        Err(DispatchError::Failed(err)) => assert_eq!(err.to_string(), "backend unavailable"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn test_response_object_survives_dispatch_unchanged() {
    let mut dispatcher = Dispatcher::builder()
        .action("report", |_p: &ParamSet, _c: &Context| {
            Ok::<_, anyhow::Error>(Response::with_status(5))
        })
        .build();

    let outcome = dispatcher.dispatch(["report"]).unwrap();
    assert_eq!(outcome, Outcome::Response(Response::with_status(5)));

    let response = dispatcher.handle(["report"]).unwrap();
    assert_eq!(response.exit_status, 5);
}

// Custom resolvers plug into the same error translation
#[test]
fn test_custom_resolver_unroutable_becomes_unknown_command() {
    struct OnlyServe;

    impl Resolver for OnlyServe {
        fn resolve(
            &mut self,
            route: &Route,
            _params: &ParamSet,
            _ctx: &Context,
        ) -> Result<Outcome, ResolveError> {
            if route.segments() == ["serve"] {
                Ok(Outcome::Status(0))
            } else {
                Err(ResolveError::Unroutable(route.to_string()))
            }
        }
    }

    let mut dispatcher = Dispatcher::builder().resolver(OnlyServe).build();

    assert_eq!(dispatcher.dispatch(["serve"]).unwrap(), Outcome::Status(0));

    let err = dispatcher.dispatch(["stop"]).unwrap_err();
    assert_eq!(err.unknown_route(), Some("stop"));
}

#[test]
fn test_custom_resolver_other_errors_pass_through() {
    struct Broken;

    impl Resolver for Broken {
        fn resolve(
            &mut self,
            _route: &Route,
            _params: &ParamSet,
            _ctx: &Context,
        ) -> Result<Outcome, ResolveError> {
            Err(ResolveError::Other(anyhow::anyhow!("registry corrupted")))
        }
    }

    let mut dispatcher = Dispatcher::builder().resolver(Broken).build();
    let err = dispatcher.dispatch(["anything"]).unwrap_err();

    assert!(matches!(err, DispatchError::Failed(_)));
    assert_eq!(err.to_string(), "registry corrupted");
}

// Mutable state in actions, as in any single-threaded console app
#[test]
fn test_action_with_mutable_state() {
    let counter = Rc::new(RefCell::new(0));
    let counter_in_action = counter.clone();

    let mut dispatcher = Dispatcher::builder()
        .action("inc", move |_p: &ParamSet, _c: &Context| {
            *counter_in_action.borrow_mut() += 1;
            Ok::<_, anyhow::Error>(*counter_in_action.borrow())
        })
        .build();

    assert_eq!(dispatcher.dispatch(["inc"]).unwrap(), Outcome::Status(1));
    assert_eq!(dispatcher.dispatch(["inc"]).unwrap(), Outcome::Status(2));
    assert_eq!(*counter.borrow(), 2);
}

#[test]
fn test_positional_and_flag_params_reach_action() {
    let mut dispatcher = Dispatcher::builder()
        .action("copy", |params: &ParamSet, _ctx: &Context| {
            assert_eq!(params.positional(), ["a.txt", "b.txt"]);
            assert!(params.get_flag("force"));
            Ok::<_, anyhow::Error>(0)
        })
        .build();

    dispatcher
        .dispatch(["copy", "a.txt", "--force", "b.txt"])
        .unwrap();
}

#[test]
fn test_run_exit_codes_end_to_end() {
    let mut dispatcher = Dispatcher::builder()
        .action("ok", |_p: &ParamSet, _c: &Context| {
            Ok::<_, anyhow::Error>(())
        })
        .action("warn", |_p: &ParamSet, _c: &Context| {
            Ok::<_, anyhow::Error>(Response::with_status(2))
        })
        .build();

    let mut err: Vec<u8> = Vec::new();
    assert_eq!(dispatcher.run(["ok"], &mut err), 0);
    assert_eq!(dispatcher.run(["warn"], &mut err), 2);
    assert!(err.is_empty());

    assert_eq!(dispatcher.run(["missing"], &mut err), 1);
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "Unknown command \"missing\"\n"
    );
}
