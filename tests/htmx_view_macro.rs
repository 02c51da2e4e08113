use axum::body::{Body, to_bytes};
use axum::http;
use htmx_view::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Default)]
struct CounterView {
    value: AtomicI64,
}

#[htmx_view]
impl CounterView {
    async fn get(&self, _request: Request) -> String {
        format!("value={}", self.value.load(Ordering::SeqCst))
    }

    #[post]
    async fn hx_add(&self, _request: Request, amount: i64) -> String {
        let value = self.value.fetch_add(amount, Ordering::SeqCst) + amount;
        format!("value={value}")
    }

    #[post]
    fn hx_reset(&self) -> StatusCode {
        self.value.store(0, Ordering::SeqCst);
        StatusCode::NO_CONTENT
    }

    async fn hx_peek(&self, request: Request) -> String {
        format!("{} value={}", request.method(), self.value.load(Ordering::SeqCst))
    }

    #[get]
    async fn hx_describe(&self, count: u32, label: String, owner: Uuid) -> String {
        format!("{count}|{label}|{owner}")
    }

    // Not an action: no prefix, not a verb name.
    fn helper(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }
}

struct SilentView;

#[htmx_view(prefix = "action_")]
impl SilentView {
    #[delete]
    async fn action_purge(&self) -> &'static str {
        "purged"
    }
}

fn app() -> (Router, UrlResolver, Arc<CounterView>) {
    let view = Arc::new(CounterView::default());
    let conf = UrlConf::new()
        .path("", "counter", Arc::clone(&view).as_view())
        .unwrap()
        .include(Arc::clone(&view).htmx_urls("counter", "counter").unwrap())
        .unwrap();
    let resolver = conf.resolver();
    (conf.into_router(), resolver, view)
}

async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn test_prefixed_methods_become_named_routes() {
    let (_, resolver, _) = app();
    let table: Vec<(String, String)> = resolver
        .patterns()
        .map(|pattern| (pattern.name().to_string(), pattern.template()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("counter".to_string(), "".to_string()),
            ("counter->add".to_string(), "counter/add/<int:amount>/".to_string()),
            (
                "counter->describe".to_string(),
                "counter/describe/<int:count>/<str:label>/<uuid:owner>/".to_string()
            ),
            ("counter->peek".to_string(), "counter/peek/".to_string()),
            ("counter->reset".to_string(), "counter/reset/".to_string()),
        ]
    );
}

#[test]
fn test_action_metadata() {
    let view = Arc::new(CounterView::default());
    let set = view.htmx_urls("counter", "counter").unwrap();

    let add = set.get("counter->add").unwrap();
    assert_eq!(add.method(), Some(&Method::POST));
    assert_eq!(add.params()[0].converter(), ConverterTag::Int);

    let peek = set.get("counter->peek").unwrap();
    assert_eq!(peek.method(), None);
    assert!(set.get("counter->helper").is_none());
}

#[tokio::test]
async fn test_gated_action_runs_on_its_verb() {
    let (router, _, view) = app();
    let (status, body) = send(&router, Method::POST, "/counter/add/5/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "value=5");
    assert_eq!(view.helper(), 5);
}

#[tokio::test]
async fn test_wrong_verb_is_empty_405_without_side_effects() {
    let (router, _, view) = app();
    let (status, body) = send(&router, Method::GET, "/counter/add/5/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body.is_empty());
    assert_eq!(view.helper(), 0);
}

#[tokio::test]
async fn test_sync_action_and_custom_status() {
    let (router, _, view) = app();
    send(&router, Method::POST, "/counter/add/3/").await;
    let (status, body) = send(&router, Method::POST, "/counter/reset/").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(view.helper(), 0);
}

#[tokio::test]
async fn test_ungated_action_accepts_any_verb() {
    let (router, _, _) = app();
    for method in [Method::GET, Method::POST, Method::PUT] {
        let (status, body) = send(&router, method.clone(), "/counter/peek/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{method} value=0"));
    }
}

#[tokio::test]
async fn test_typed_params_in_declared_order() {
    let (router, resolver, _) = app();
    let owner = Uuid::new_v4();
    let uri = resolver
        .reverse("counter->describe", [7.to_string(), "blue".to_string(), owner.to_string()])
        .unwrap();
    assert_eq!(uri, format!("/counter/describe/7/blue/{owner}/"));

    let (status, body) = send(&router, Method::GET, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("7|blue|{owner}"));
}

#[tokio::test]
async fn test_converter_mismatch_is_404() {
    let (router, _, view) = app();
    let (status, _) = send(&router, Method::POST, "/counter/add/five/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, "/counter/describe/1/blue/not-a-uuid/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(view.helper(), 0);
}

#[tokio::test]
async fn test_view_verbs_dispatch_normally() {
    let (router, _, _) = app();
    let (status, body) = send(&router, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "value=0");

    let (status, _) = send(&router, Method::POST, "/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_custom_prefix_and_view_without_verbs() {
    let view = Arc::new(SilentView);
    let router: Router = UrlConf::new()
        .path("", "silent", Arc::clone(&view).as_view())
        .unwrap()
        .include(view.htmx_urls_with_separator("silent/", "silent", ":").unwrap())
        .unwrap()
        .into_router();

    let (status, body) = send(&router, Method::DELETE, "/silent/purge/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "purged");

    let (status, _) = send(&router, Method::GET, "/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
