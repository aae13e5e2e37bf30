use asana_router_rs::{
    Context, FilterOutcome, FilterStage, HttpMethod, Namespace, Router, RouterError,
    RouterOptions, RouterOptionsBuilder, RouterOptionsError,
};

#[test]
fn router_options_when_default_constructed_then_uses_expected_values() {
    let options = RouterOptions::default();

    assert!(options.case_sensitive);
    assert_eq!(options.max_param_count, 32);
    assert!(!options.debug);
}

#[test]
fn router_options_when_all_fields_customized_then_values_are_assigned() {
    let options = RouterOptionsBuilder::default()
        .case_sensitive(false)
        .max_param_count(4)
        .debug(true)
        .build()
        .expect("router options should build");

    assert!(!options.case_sensitive);
    assert_eq!(options.max_param_count, 4);
    assert!(options.debug);
}

#[test]
fn router_options_when_max_param_count_is_zero_then_returns_error() {
    let err = RouterOptions::builder().max_param_count(0).build();

    match err.expect_err("expected max param count error") {
        RouterOptionsError::MaxParamCountInvalid { provided } => assert_eq!(provided, 0),
    }
}

#[test]
fn router_when_try_new_with_invalid_options_then_returns_error() {
    let options = RouterOptions {
        max_param_count: 0,
        ..RouterOptions::default()
    };

    match Router::try_new(options).expect_err("invalid options should be rejected") {
        RouterError::Options(RouterOptionsError::MaxParamCountInvalid { .. }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_options_when_serialized_then_round_trips_through_json() {
    let options = RouterOptions::builder()
        .case_sensitive(false)
        .max_param_count(8)
        .build()
        .expect("router options should build");

    let json = serde_json::to_string(&options).expect("options should serialize");
    let restored: RouterOptions = serde_json::from_str(&json).expect("options should deserialize");

    assert_eq!(restored, options);
}

#[test]
fn router_options_when_json_omits_fields_then_defaults_fill_in() {
    let restored: RouterOptions =
        serde_json::from_str(r#"{"debug":true}"#).expect("partial options should deserialize");

    assert!(restored.debug);
    assert!(restored.case_sensitive);
    assert_eq!(restored.max_param_count, 32);
}

#[test]
fn router_when_case_insensitive_then_matches_any_case() {
    let options = RouterOptions::builder()
        .case_sensitive(false)
        .build()
        .expect("router options should build");
    let router = Router::new(Some(options));
    router
        .get("/users/:id", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    let (_, params) = router
        .find(HttpMethod::Get, "/USERS/abc")
        .expect("upper-case path should match");
    assert_eq!(params.get(":id"), Some("abc"));
}

#[test]
fn router_when_case_insensitive_then_mixed_case_patterns_match() {
    let options = RouterOptions::builder()
        .case_sensitive(false)
        .build()
        .expect("router options should build");
    let router = Router::new(Some(options));
    router
        .get("/Users/:userId", |_ctx: &mut Context| Ok(()))
        .expect("route should register");
    router
        .get("/Shop/Item:id([0-9]+).HTML", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    let (_, params) = router
        .find(HttpMethod::Get, "/users/abc")
        .expect("lower-case path should match");
    assert_eq!(params.get(":userId"), Some("abc"));
    assert!(router.find(HttpMethod::Get, "/Users/abc").is_some());

    let (_, params) = router
        .find(HttpMethod::Get, "/SHOP/item42.html")
        .expect("constrained segment should match");
    assert_eq!(params.get(":id"), Some("42"));

    assert_eq!(
        router
            .remove_route(HttpMethod::Get, "/Users/:userId")
            .expect("removal should succeed"),
        1
    );
    assert!(router.find(HttpMethod::Get, "/users/abc").is_none());
}

#[test]
fn router_when_case_insensitive_then_filters_and_namespaces_fold_too() {
    let options = RouterOptions::builder()
        .case_sensitive(false)
        .build()
        .expect("router options should build");
    let router = Router::new(Some(options));
    router
        .insert_filter("/Admin/*", FilterStage::BeforeRouter, |ctx: &mut Context| {
            ctx.write_str("blocked");
            FilterOutcome::Continue
        })
        .expect("filter should register");
    let ns = Namespace::new("/Api")
        .get("/Items", |ctx: &mut Context| {
            ctx.write_str("items");
            Ok(())
        })
        .expect("route should register")
        .namespace(
            Namespace::new("/V2")
                .get("/Orders", |_ctx: &mut Context| Ok(()))
                .expect("route should register"),
        )
        .expect("child should nest");
    router.add_namespace(ns).expect("namespace should mount");

    let mut ctx = Context::new(HttpMethod::Get, "/admin/panel");
    router.dispatch(&mut ctx).expect("dispatch should succeed");
    assert_eq!(ctx.response().body(), b"blocked");

    let mut ctx = Context::new(HttpMethod::Get, "/API/items");
    router.dispatch(&mut ctx).expect("dispatch should succeed");
    assert_eq!(ctx.response().body(), b"items");

    assert!(router.find(HttpMethod::Get, "/api/v2/orders").is_some());
}

#[test]
fn router_when_case_sensitive_then_rejects_other_case() {
    let router = Router::new(None);
    router
        .get("/users/list", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    assert!(router.find(HttpMethod::Get, "/Users/List").is_none());
    assert!(router.find(HttpMethod::Get, "/users/list").is_some());
}

#[test]
fn router_when_route_exceeds_param_limit_then_returns_error() {
    let options = RouterOptions::builder()
        .max_param_count(2)
        .build()
        .expect("router options should build");
    let router = Router::new(Some(options));

    let err = router.get("/:a/:b/:c", |_ctx: &mut Context| Ok(()));
    match err.expect_err("expected too many params error") {
        RouterError::TooManyParams { count, limit, .. } => {
            assert_eq!(count, 3);
            assert_eq!(limit, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(router.find(HttpMethod::Get, "/x/y/z").is_none());
}
