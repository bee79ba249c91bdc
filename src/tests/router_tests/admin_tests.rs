use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::urlencode;
use crate::tests::router_tests::{body_string, get, post};
use crate::tests::utils::{record, test_app, TEST_KEY};

const T1: &str = "2026-01-01 09:00:00";
const SCOPE: &str = "래미안테스트";

#[test]
fn admin_page_shows_store_totals() {
    let app = test_app();
    app.store
        .append(&[record("A", T1), record("B", T1)])
        .unwrap();

    let resp = handle(get("/admin"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("총 수집 데이터 건수"));
    assert!(body.contains("2 건"));
    assert!(body.contains("수집 이력 로그"));
    assert!(body.contains("자동 수집 스케줄러"));
    assert!(body.contains("자동 수집 중지"), "Scheduler starts stopped");
}

#[test]
fn mutating_routes_require_the_admin_key() {
    let app = test_app();
    app.store.append(&[record("A", T1)]).unwrap();

    let form = format!("key=wrong&complex={}", urlencode(SCOPE));
    let result = handle(post("/clear", &form), &app);
    assert!(matches!(result, Err(ServerError::Unauthorized)));

    let result = handle(post("/collect", "key=wrong&complex_no=108064"), &app);
    assert!(matches!(result, Err(ServerError::Unauthorized)));

    let result = handle(post("/scheduler/stop", "key=wrong"), &app);
    assert!(matches!(result, Err(ServerError::Unauthorized)));

    let result = handle(post("/scheduler/start", "key=wrong&interval_min=30"), &app);
    assert!(matches!(result, Err(ServerError::Unauthorized)));

    // Nothing was deleted by the failed attempts.
    assert_eq!(app.store.load(SCOPE).unwrap().len(), 1);
}

#[test]
fn clear_removes_scope_and_redirects() {
    let app = test_app();
    let mut other = record("Z", T1);
    other.complex_name = "단지나".to_string();
    app.store.append(&[record("A", T1), other]).unwrap();

    let form = format!("key={TEST_KEY}&complex={}", urlencode(SCOPE));
    let resp = handle(post("/clear", &form), &app).expect("Handler failed");

    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/admin"
    );
    assert!(app.store.load(SCOPE).unwrap().is_empty());
    assert_eq!(app.store.load("단지나").unwrap().len(), 1);
}

#[test]
fn clear_requires_a_scope() {
    let app = test_app();
    let form = format!("key={TEST_KEY}");
    let result = handle(post("/clear", &form), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn scheduler_stop_persists_auto_collect_off() {
    let app = test_app();

    let form = format!("key={TEST_KEY}");
    let resp = handle(post("/scheduler/stop", &form), &app).expect("Handler failed");

    assert_eq!(resp.status(), 303);
    assert!(!app.scheduler.status().running);
    assert!(!app.config().unwrap().auto_collect);
}

#[test]
fn scheduler_start_rejects_bad_interval() {
    let app = test_app();

    let form = format!("key={TEST_KEY}&complex_no=108064&trade_type=A1&interval_min=0");
    let result = handle(post("/scheduler/start", &form), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));

    let form = format!("key={TEST_KEY}&complex_no=108064&trade_type=A1&interval_min=많이");
    let result = handle(post("/scheduler/start", &form), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}
