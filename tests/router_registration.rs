use asana_router_rs::{
    Context, Controller, Endpoint, FilterOutcome, FilterStage, HandlerError, HandlerResult,
    HttpMethod, Namespace, ParamStore, RouteMethod, Router, RouterError,
};
use http::StatusCode;
use parking_lot::Mutex;
use std::sync::Arc;

struct UserController;

impl Controller for UserController {
    fn actions(&self) -> &[&'static str] {
        &["Get", "Post", "List", "Save"]
    }

    fn call(&self, action: &str, ctx: &mut Context) -> HandlerResult {
        ctx.write_str(action);
        Ok(())
    }
}

fn dispatch_body(router: &Router, method: HttpMethod, path: &str) -> Option<String> {
    let mut ctx = Context::new(method, path);
    match router.dispatch(&mut ctx).expect("dispatch should succeed") {
        asana_router_rs::DispatchOutcome::NotFound => None,
        _ => Some(String::from_utf8(ctx.response().body().to_vec()).expect("body should be utf-8")),
    }
}

fn get(path: &str) -> http::Request<Vec<u8>> {
    http::Request::builder()
        .method("GET")
        .uri(path)
        .body(Vec::new())
        .expect("request should build")
}

#[test]
fn router_when_controller_without_mapping_then_default_actions_registered() {
    let router = Router::new(None);
    router
        .add_controller("/users", Arc::new(UserController), None)
        .expect("controller should register");

    assert_eq!(dispatch_body(&router, HttpMethod::Get, "/users").as_deref(), Some("Get"));
    assert_eq!(dispatch_body(&router, HttpMethod::Post, "/users").as_deref(), Some("Post"));
    assert_eq!(dispatch_body(&router, HttpMethod::Put, "/users"), None);
}

#[test]
fn router_when_controller_mapping_given_then_methods_map_to_actions() {
    let router = Router::new(None);
    router
        .add_controller("/users", Arc::new(UserController), Some("get:List; post,put:Save"))
        .expect("controller should register");
    router
        .add_controller("/all", Arc::new(UserController), Some("*:List"))
        .expect("controller should register");

    assert_eq!(dispatch_body(&router, HttpMethod::Get, "/users").as_deref(), Some("List"));
    assert_eq!(dispatch_body(&router, HttpMethod::Post, "/users").as_deref(), Some("Save"));
    assert_eq!(dispatch_body(&router, HttpMethod::Put, "/users").as_deref(), Some("Save"));
    assert_eq!(dispatch_body(&router, HttpMethod::Delete, "/all").as_deref(), Some("List"));
}

#[test]
fn router_when_controller_mapping_invalid_then_returns_error() {
    let router = Router::new(None);

    match router
        .add_controller("/users", Arc::new(UserController), Some("get:Missing"))
        .expect_err("unknown action should fail")
    {
        RouterError::UnknownAction { action, .. } => assert_eq!(action, "Missing"),
        other => panic!("unexpected error: {other:?}"),
    }
    match router
        .add_controller("/users", Arc::new(UserController), Some("get"))
        .expect_err("malformed mapping should fail")
    {
        RouterError::MalformedMapping { mapping } => assert_eq!(mapping, "get"),
        other => panic!("unexpected error: {other:?}"),
    }
    match router
        .add_controller("/users", Arc::new(UserController), Some("fetch:List"))
        .expect_err("unknown method should fail")
    {
        RouterError::UnsupportedMethod { method } => assert_eq!(method, "fetch"),
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(router.find(HttpMethod::Get, "/users").is_none());
    assert_eq!(router.metrics().total_routes_registered, 0);
}

#[test]
fn router_when_pattern_malformed_then_registry_unchanged() {
    let router = Router::new(None);
    router
        .get("/ok/:id", |_ctx: &mut Context| Ok(()))
        .expect("route should register");
    let before = router.snapshot();

    let err = router.get("/bad/:id([0-9]+", |_ctx: &mut Context| Ok(()));
    match err.expect_err("expected malformed pattern") {
        RouterError::Tree(_) => {}
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(router.metrics(), before.metrics());
    assert!(router.find(HttpMethod::Get, "/ok/1").is_some());
}

#[test]
fn router_when_find_called_then_returns_endpoint_and_params() {
    let router = Router::new(None);
    router
        .get("/users/:id", |ctx: &mut Context| {
            let id = ctx.param(":id").unwrap_or_default().to_string();
            ctx.write_str(&id);
            Ok(())
        })
        .expect("route should register");

    let (endpoint, params) = router
        .find(HttpMethod::Get, "/users/42")
        .expect("route should match");
    assert_eq!(params.get(":id"), Some("42"));

    let mut ctx = Context::new(HttpMethod::Get, "/users/42");
    *ctx.params_mut() = params;
    endpoint.invoke(&mut ctx).expect("endpoint should run");
    assert_eq!(ctx.response().body(), b"42");
}

#[test]
fn router_when_route_removed_then_sibling_still_dispatches() {
    let router = Router::new(None);
    router
        .get("/api/users/:id", |_ctx: &mut Context| Ok(()))
        .expect("route should register");
    router
        .get("/api/users/list", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    let removed = router
        .remove_route(HttpMethod::Get, "/api/users/:id")
        .expect("removal should succeed");

    assert_eq!(removed, 1);
    assert!(router.find(HttpMethod::Get, "/api/users/7").is_none());
    assert!(router.find(HttpMethod::Get, "/api/users/list").is_some());
    assert_eq!(
        router
            .remove_route(RouteMethod::Any, "/api/users/list")
            .expect("removal should succeed"),
        0
    );
    assert_eq!(router.metrics().total_routes_removed, 1);
}

#[test]
fn router_when_prefix_handler_registered_then_serves_subpaths() {
    let router = Router::new(None);
    router
        .handle_prefix(
            "/static",
            Endpoint::handler(|ctx: &mut Context| {
                let rest = ctx.param(":all").unwrap_or("<none>").to_string();
                ctx.write_str(&rest);
                Ok(())
            }),
        )
        .expect("prefix handler should register");

    assert_eq!(
        dispatch_body(&router, HttpMethod::Get, "/static/css/site.css").as_deref(),
        Some("css/site.css")
    );
    assert_eq!(
        dispatch_body(&router, HttpMethod::Post, "/static").as_deref(),
        Some("<none>")
    );
    assert_eq!(dispatch_body(&router, HttpMethod::Get, "/other"), None);
}

#[test]
fn router_when_namespace_mounted_then_routes_and_filters_are_prefixed() {
    let router = Router::new(None);
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let filter_log = log.clone();

    let admin = Namespace::new("/admin")
        .get("/stats", |ctx: &mut Context| {
            ctx.write_str("stats");
            Ok(())
        })
        .expect("admin route should register");
    let v1 = Namespace::new("/v1")
        .get("/shop/:id", |ctx: &mut Context| {
            let id = ctx.param(":id").unwrap_or_default().to_string();
            ctx.write_str(&format!("shop {id}"));
            Ok(())
        })
        .expect("shop route should register")
        .filter(FilterStage::BeforeRouter, move |ctx: &mut Context| {
            filter_log.lock().push(ctx.path().to_string());
            FilterOutcome::Continue
        })
        .expect("filter should register")
        .namespace(admin)
        .expect("nested namespace should mount");
    router.add_namespace(v1).expect("namespace should mount");

    assert_eq!(
        dispatch_body(&router, HttpMethod::Get, "/v1/shop/5").as_deref(),
        Some("shop 5")
    );
    assert_eq!(
        dispatch_body(&router, HttpMethod::Get, "/v1/admin/stats").as_deref(),
        Some("stats")
    );
    assert_eq!(dispatch_body(&router, HttpMethod::Get, "/shop/5"), None);

    assert_eq!(*log.lock(), vec!["/v1/shop/5", "/v1/admin/stats"]);
    assert_eq!(router.metrics().total_namespaces_mounted, 1);
}

#[test]
fn router_when_namespace_prefix_has_param_then_filters_cover_bare_prefix() {
    let router = Router::new(None);
    let hits = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = hits.clone();

    let ns = Namespace::new("/v1/:ver")
        .get("/", |ctx: &mut Context| {
            let ver = ctx.param(":ver").unwrap_or_default().to_string();
            ctx.write_str(&ver);
            Ok(())
        })
        .expect("route should register")
        .filter(FilterStage::BeforeExec, move |ctx: &mut Context| {
            seen.lock().push(ctx.path().to_string());
            FilterOutcome::Continue
        })
        .expect("filter should register");
    router.add_namespace(ns).expect("namespace should mount");

    assert_eq!(dispatch_body(&router, HttpMethod::Get, "/v1/2").as_deref(), Some("2"));
    assert_eq!(*hits.lock(), vec!["/v1/2"]);
}

#[test]
fn router_when_namespace_cond_rejects_then_responds_405() {
    let router = Router::new(None);
    let ns = Namespace::new("/v1")
        .get("/shop", |ctx: &mut Context| {
            ctx.write_str("shop");
            Ok(())
        })
        .expect("route should register")
        .cond(|ctx: &Context| ctx.request_headers().contains_key("x-api-key"))
        .expect("cond should register");
    router.add_namespace(ns).expect("namespace should mount");

    let rejected = router.serve(&get("/v1/shop"));
    assert_eq!(rejected.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(rejected.body().is_empty());

    let request = http::Request::builder()
        .method("GET")
        .uri("/v1/shop")
        .header("x-api-key", "secret")
        .body(Vec::new())
        .expect("request should build");
    let accepted = router.serve(&request);
    assert_eq!(accepted.status(), StatusCode::OK);
    assert_eq!(accepted.body(), b"shop");
}

#[test]
fn router_when_namespace_prefix_empty_then_mount_fails() {
    let router = Router::new(None);
    let ns = Namespace::new("/")
        .get("/x", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    match router.add_namespace(ns).expect_err("empty prefix should fail") {
        RouterError::Tree(_) => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(router.find(HttpMethod::Get, "/x").is_none());
}

#[test]
fn router_when_served_then_maps_outcomes_to_status_codes() {
    let router = Router::new(None);
    router
        .get("/hello", |ctx: &mut Context| {
            let who = ctx.query().unwrap_or("world").to_string();
            ctx.response_mut().insert_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("text/plain"),
            );
            ctx.write_str(&format!("hello {who}"));
            Ok(())
        })
        .expect("route should register");
    router
        .get("/fail", |_ctx: &mut Context| Err(HandlerError::msg("broken")))
        .expect("route should register");

    let ok = router.serve(&get("/hello?neo"));
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(ok.body(), b"hello neo");
    assert_eq!(
        ok.headers().get(http::header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"text/plain"[..])
    );

    assert_eq!(router.serve(&get("/missing")).status(), StatusCode::NOT_FOUND);
    assert_eq!(router.serve(&get("/fail")).status(), StatusCode::INTERNAL_SERVER_ERROR);

    let brew = http::Request::builder()
        .method("BREW")
        .uri("/hello")
        .body(Vec::new())
        .expect("request should build");
    assert_eq!(router.serve(&brew).status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn router_when_snapshot_taken_then_later_registrations_invisible() {
    let router = Router::new(None);
    router
        .get("/a", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    let snapshot = router.snapshot();
    router
        .get("/b", |_ctx: &mut Context| Ok(()))
        .expect("route should register");

    let mut params = ParamStore::new();
    assert!(snapshot.find(HttpMethod::Get, "/a", &mut params).is_some());
    assert!(snapshot.find(HttpMethod::Get, "/b", &mut params).is_none());
    assert!(router.find(HttpMethod::Get, "/b").is_some());
}

#[test]
fn router_when_dispatched_concurrently_then_params_stay_per_request() {
    let router = Arc::new(Router::new(None));
    router
        .get("/user/:id", |ctx: &mut Context| {
            let id = ctx.param(":id").unwrap_or_default().to_string();
            ctx.write_str(&id);
            Ok(())
        })
        .expect("route should register");

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let router = router.clone();
            scope.spawn(move || {
                for i in 0..200 {
                    let id = format!("{worker}-{i}");
                    let mut ctx = Context::new(HttpMethod::Get, &format!("/user/{id}"));
                    router.dispatch(&mut ctx).expect("dispatch should succeed");
                    assert_eq!(ctx.response().body(), id.as_bytes());
                    assert_eq!(ctx.params().len(), 1);
                }
            });
        }

        for n in 0..50 {
            router
                .get(&format!("/extra/{n}"), |_ctx: &mut Context| Ok(()))
                .expect("route should register");
        }
    });

    assert_eq!(router.metrics().total_routes_registered, 51);
}
