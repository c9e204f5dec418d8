use crate::helpers::{
    TestContext, REQUEST_TIMEOUT, SLOW_TEXT, SYNTHESIZED_SAMPLE_COUNT, SYNTHESIZED_SAMPLE_RATE,
    UNSPEAKABLE_TEXT,
};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

const CACHED_SAMPLES: [i16; 6] = [0, 16384, -16384, 32767, -32768, 1];

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_cached_audio_for_default_language(ctx: &TestContext) {
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Welcome to the course", None, &CACHED_SAMPLES)
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Welcome to the course" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("content-type", "audio/L16; rate=48000; channels=1");
    response.assert_header("x-sample-rate", "48000");
    response.assert_header("x-sample-count", "6");
    response.assert_header("x-audio-source", "cache");
    assert_eq!(response.pcm_samples(), CACHED_SAMPLES.to_vec());
    assert!(ctx.synthesizer.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_cached_audio_for_requested_language(ctx: &TestContext) {
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "नमस्ते", Some("hi"), &CACHED_SAMPLES)
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "नमस्ते", "language": "hi" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("x-audio-source", "cache");
    assert_eq!(response.pcm_samples(), CACHED_SAMPLES.to_vec());

    let label = response.header("x-audio-label").unwrap();
    assert_eq!(urlencoding::decode(label).unwrap(), "नमस्ते");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_mix_language_and_default_entries(ctx: &TestContext) {
    // Only the default-language entry exists
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Hello", None, &CACHED_SAMPLES)
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Hello", "language": "en" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("x-audio-source", "synthesized");
    assert_eq!(
        ctx.synthesizer.calls(),
        vec![("Hello".to_string(), Some("en".to_string()))]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_when_nothing_is_cached(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Brand new sentence." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("x-audio-source", "synthesized");
    response.assert_header("x-sample-rate", &SYNTHESIZED_SAMPLE_RATE.to_string());
    assert_eq!(response.pcm_samples(), vec![8192; SYNTHESIZED_SAMPLE_COUNT]);
    assert_eq!(
        ctx.synthesizer.calls(),
        vec![("Brand new sentence.".to_string(), None)]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_audio_is_unavailable(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": UNSPEAKABLE_TEXT }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("no audio available");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_empty_cache_entry(ctx: &TestContext) {
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Silence", None, &[])
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Silence" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(ctx.synthesizer.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_corrupt_cache_entry(ctx: &TestContext) {
    ctx.fixtures
        .cache_raw(&ctx.configuration, "Truncated", None, &[0x01, 0x02, 0x03])
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Truncated" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(ctx.synthesizer.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_exceeding_10000_chars(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "a".repeat(10001) }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("10,000 characters or less");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_read_persistent_data_only_while_playing(ctx: &TestContext) {
    let persistent = [100, -100];
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Lesson one", None, &CACHED_SAMPLES)
        .unwrap();
    ctx.fixtures
        .cache_persistent(&ctx.configuration, "Lesson one", None, &persistent)
        .unwrap();

    let editor = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Lesson one" }))
        .await
        .unwrap();
    assert_eq!(editor.pcm_samples(), CACHED_SAMPLES.to_vec());

    ctx.runtime.set_playing(true);

    let playing = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Lesson one" }))
        .await
        .unwrap();
    assert_eq!(playing.pcm_samples(), persistent.to_vec());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_resolve_batch_items_independently(ctx: &TestContext) {
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Hello", Some("en"), &[16384])
        .unwrap();

    let response = ctx
        .client
        .post(
            "/api/tts/batch",
            &json!({
                "texts": ["Hello", "नमस्ते", "வணக்கம்"],
                "languages": ["en", "hi", "ta"]
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let clips = body["clips"].as_array().unwrap();
    assert_eq!(clips.len(), 3);

    assert_eq!(clips[0]["label"], "Hello");
    assert_eq!(clips[0]["source"], "cache");
    assert_eq!(clips[0]["sample_rate"], 48000);
    assert_eq!(clips[0]["samples"], json!([0.5]));

    assert_eq!(clips[1]["label"], "नमस्ते");
    assert_eq!(clips[1]["source"], "synthesized");
    assert_eq!(clips[2]["label"], "வணக்கம்");
    assert_eq!(clips[2]["source"], "synthesized");

    let mut calls = ctx.synthesizer.calls();
    calls.sort();
    assert_eq!(
        calls,
        vec![
            ("नमस्ते".to_string(), Some("hi".to_string())),
            ("வணக்கம்".to_string(), Some("ta".to_string())),
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_batch_with_mismatched_lengths(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/batch",
            &json!({ "texts": ["One", "Two"], "languages": ["en"] }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.synthesizer.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_empty_batch(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/batch", &json!({ "texts": [], "languages": [] }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["clips"], json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_batch_when_any_item_is_unavailable(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/batch",
            &json!({
                "texts": ["Fine", UNSPEAKABLE_TEXT],
                "languages": ["en", "en"]
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_current_configuration(ctx: &TestContext) {
    let response = ctx.client.get("/api/tts/configuration").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["provider"], "polly");
    assert_eq!(body["voice"], "Joanna");
    assert_eq!(body["language"], "en");
    assert_eq!(body["cache_directory_name"], "TextToSpeech");
    assert_eq!(body["sample_rate"], 48000);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_resolve_against_updated_configuration(ctx: &TestContext) {
    let mut updated = ctx.configuration.clone();
    updated.voice = "Kajal".to_string();
    updated.sample_rate = 22050;
    ctx.fixtures
        .cache_packaged(&updated, "Switch voices", None, &CACHED_SAMPLES)
        .unwrap();

    let response = ctx
        .client
        .put("/api/tts/configuration", &updated)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["voice"], "Kajal");

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Switch voices" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("x-audio-source", "cache");
    response.assert_header("x-sample-rate", "22050");
    assert!(ctx.synthesizer.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_configuration(ctx: &TestContext) {
    let mut invalid = ctx.configuration.clone();
    invalid.cache_directory_name = "  ".to_string();

    let response = ctx
        .client
        .put("/api/tts/configuration", &invalid)
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);

    let mut invalid = ctx.configuration.clone();
    invalid.sample_rate = 0;

    let response = ctx
        .client
        .put("/api/tts/configuration", &invalid)
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);

    // The active configuration is untouched
    let response = ctx.client.get("/api/tts/configuration").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["sample_rate"], 48000);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_content_cache_status(ctx: &TestContext) {
    ctx.fixtures
        .cache_packaged(&ctx.configuration, "Good morning", Some("en"), &CACHED_SAMPLES)
        .unwrap();

    let content = json!({
        "english_text": "Good morning",
        "hindi_text": "सुप्रभात"
    });

    let response = ctx
        .client
        .post("/api/tts/content/status", &content)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["cached"], false);
    assert_eq!(body["missing"], json!(["hi"]));

    ctx.fixtures
        .cache_packaged(&ctx.configuration, "सुप्रभात", Some("hi"), &CACHED_SAMPLES)
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/content/status", &content)
        .await
        .unwrap();

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["cached"], true);
    assert_eq!(body["missing"], json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_up_on_slow_synthesis_after_the_deadline(ctx: &TestContext) {
    let start = std::time::Instant::now();

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": SLOW_TEXT }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::GATEWAY_TIMEOUT)
        .assert_error_message("cancelled before completion");
    assert!(start.elapsed() >= REQUEST_TIMEOUT);
    assert!(start.elapsed() < std::time::Duration::from_secs(5));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_up_on_slow_batch_after_the_deadline(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/batch",
            &json!({ "texts": ["Quick", SLOW_TEXT], "languages": ["en", "en"] }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
}
