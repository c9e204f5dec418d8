use crate::helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_current_runtime_mode(ctx: &TestContext) {
    let response = ctx.client.get("/api/runtime/mode").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["mode"], "editor");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_switch_content_store_when_entering_play_mode(ctx: &TestContext) {
    let packaged = [1000, -1000];
    let persistent = [7, -7];
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Chapter two", None, &packaged)
        .unwrap();
    ctx.fixtures
        .cache_persistent(&ctx.configuration, "Chapter two", None, &persistent)
        .unwrap();

    let response = ctx
        .client
        .put("/api/runtime/mode", &json!({ "mode": "playing" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["mode"], "playing");
    assert!(ctx.runtime.is_playing());

    let playing = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Chapter two" }))
        .await
        .unwrap();
    assert_eq!(playing.pcm_samples(), persistent.to_vec());

    ctx.client
        .put("/api/runtime/mode", &json!({ "mode": "editor" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let editor = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Chapter two" }))
        .await
        .unwrap();
    assert_eq!(editor.pcm_samples(), packaged.to_vec());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_runtime_mode(ctx: &TestContext) {
    let response = ctx
        .client
        .put("/api/runtime/mode", &json!({ "mode": "paused" }))
        .await
        .unwrap();

    assert!(response.status.is_client_error());
    assert!(!ctx.runtime.is_playing());
}
