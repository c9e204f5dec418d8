use crate::helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status_when_cache_directory_exists(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("cache").and_then(|v| v.as_str()), Some("available"));
    assert_eq!(
        body.get("cache_directory").and_then(|v| v.as_str()),
        Some(ctx.configuration.cache_directory_name.as_str())
    );
    assert_eq!(body.get("runtime_mode").and_then(|v| v.as_str()), Some("editor"));
    assert_eq!(body.get("fallback").and_then(|v| v.as_str()), Some("stub"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_not_ready_without_cache_directory(ctx: &TestContext) {
    ctx.fixtures
        .remove_cache_directory(&ctx.configuration)
        .unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(body.get("cache").and_then(|v| v.as_str()), Some("missing"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_runtime_mode_changes(ctx: &TestContext) {
    ctx.runtime.set_playing(true);

    let response = ctx.client.get("/health/ready").await.unwrap();

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("runtime_mode").and_then(|v| v.as_str()), Some("playing"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_unique_request_ids(ctx: &TestContext) {
    let first = ctx.client.get("/health").await.unwrap();
    let second = ctx.client.get("/health").await.unwrap();

    assert_ne!(first.header("x-request-id"), second.header("x-request-id"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_routes(ctx: &TestContext) {
    let response = ctx.client.get("/api/unknown").await.unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}
