use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::urlencode;
use crate::tests::router_tests::{body_string, get};
use crate::tests::utils::{record, record_by, test_app};

const T1: &str = "2026-01-01 09:00:00";
const T2: &str = "2026-01-02 09:00:00";
const SCOPE: &str = "래미안테스트";

#[test]
fn empty_store_renders_placeholder() {
    let app = test_app();

    let resp = handle(get("/"), &app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("수집된 데이터가 없습니다"));
}

#[test]
fn dashboard_shows_latest_scope_data() {
    let app = test_app();
    app.store
        .append(&[
            record_by("A", "갑중개", T1),
            record_by("B", "을중개", T1),
            record_by("B", "을중개", T2),
            record_by("C", "병중개", T2),
        ])
        .unwrap();

    let resp = handle(get("/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(SCOPE), "Dashboard should name the scope");
    assert!(body.contains("주간 활동 집계"));
    assert!(body.contains("병중개"), "Appearing realtor should be ranked");
    assert!(body.contains("수집 이력"));
}

#[test]
fn dashboard_honors_scope_query() {
    let app = test_app();
    let mut other = record("Z", T2);
    other.complex_name = "단지나".to_string();
    app.store.append(&[record("A", T1), other]).unwrap();

    let uri = format!("/?complex={}", urlencode(SCOPE));
    let resp = handle(get(&uri), &app).expect("Handler failed");

    let body = body_string(resp);
    assert!(body.contains(&format!("{SCOPE} 매물 분석")));
}

#[test]
fn diff_view_lists_changes() {
    let app = test_app();
    app.store
        .append(&[
            record("A", T1),
            record("B", T1),
            record("B", T2),
            record("C", T2),
        ])
        .unwrap();

    let uri = format!("/diff?complex={}&to={}", urlencode(SCOPE), urlencode(T2));
    let resp = handle(get(&uri), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("신규 매물 (1)"));
    assert!(body.contains("소멸 매물 (1)"));
    assert!(body.contains(">C<"), "Appeared listing id should be shown");
    assert!(body.contains(">A<"), "Disappeared listing id should be shown");
}

#[test]
fn diff_requires_known_snapshot() {
    let app = test_app();
    app.store.append(&[record("A", T1)]).unwrap();

    let uri = format!(
        "/diff?complex={}&to={}",
        urlencode(SCOPE),
        urlencode("2026-05-01 00:00:00")
    );
    let result = handle(get(&uri), &app);

    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn diff_rejects_malformed_timestamp() {
    let app = test_app();
    app.store.append(&[record("A", T1)]).unwrap();

    let uri = format!("/diff?complex={}&to=yesterday", urlencode(SCOPE));
    let result = handle(get(&uri), &app);

    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn export_returns_spreadsheet() {
    let app = test_app();
    app.store.append(&[record("A", T1)]).unwrap();

    let uri = format!("/export?complex={}", urlencode(SCOPE));
    let resp = handle(get(&uri), &app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("spreadsheetml"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app();
    let result = handle(get("/nope"), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}
