use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use ampview::config::{BackpressurePolicy, MalformedPolicy};
use ampview::display::{FrameHistory, MemorySurface, Point, Size, TextRun, TextStyle};
use ampview::stream::{ChannelSource, StreamEvent};
use ampview::{AmpviewError, Application, PipelinePolicy, SampleRenderer};

const TIMEOUT_MS: u64 = 500;

fn spawn_pipeline(
    policy: PipelinePolicy,
) -> (
    mpsc::Sender<StreamEvent>,
    FrameHistory,
    tokio::task::JoinHandle<(ampview::Result<()>, Application)>,
) {
    let surface = MemorySurface::new(Size::new(128, 128));
    let history = surface.history();
    let renderer = SampleRenderer::new(Box::new(surface), TextStyle::default());
    let (tx, source) = ChannelSource::new(4);

    let mut app = Application::new(Box::new(source), renderer, policy);
    let handle = tokio::spawn(async move {
        let result = app.run().await;
        (result, app)
    });

    (tx, history, handle)
}

async fn finish(
    handle: tokio::task::JoinHandle<(ampview::Result<()>, Application)>,
) -> (ampview::Result<()>, Application) {
    timeout(Duration::from_millis(TIMEOUT_MS), handle)
        .await
        .expect("pipeline did not stop")
        .expect("pipeline task panicked")
}

fn sample(value: f64) -> StreamEvent {
    StreamEvent::Payload(json!(value))
}

#[tokio::test]
async fn payload_is_drawn_once_at_anchor() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    tx.send(sample(0.0023)).await.unwrap();
    drop(tx);

    let (result, app) = finish(handle).await;
    result.unwrap();

    let frames = history.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(
        frames[0].texts(),
        &[TextRun {
            position: Point::new(3, 3),
            text: "2.3mA".to_string(),
        }]
    );
    assert_eq!(app.stats().rendered, 1);
}

#[tokio::test]
async fn burst_is_rendered_in_order() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    for value in [1e-7, 2e-7, 3e-7] {
        tx.send(sample(value)).await.unwrap();
    }
    drop(tx);

    let (result, _) = finish(handle).await;
    result.unwrap();
    assert_eq!(history.texts(), vec!["100nA", "200nA", "300nA"]);
}

#[tokio::test]
async fn repeated_sample_commits_identical_frames() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    tx.send(sample(-5e-7)).await.unwrap();
    tx.send(sample(-5e-7)).await.unwrap();
    drop(tx);

    let (result, _) = finish(handle).await;
    result.unwrap();

    let frames = history.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].texts()[0].text, "-500nA");
    assert_eq!(frames[0].pixels(), frames[1].pixels());
}

#[tokio::test]
async fn sample_records_are_accepted() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    tx.send(StreamEvent::Payload(
        json!({"hrtime": {"seconds": 1, "nanos": 2}, "value": 4.2e-5}),
    ))
    .await
    .unwrap();
    drop(tx);

    let (result, _) = finish(handle).await;
    result.unwrap();
    assert_eq!(history.texts(), vec!["42µA"]);
}

#[tokio::test]
async fn record_batch_shows_newest_reading() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    tx.send(StreamEvent::Payload(json!([
        {"hrtime": {"seconds": 1, "nanos": 0}, "value": 0.001},
        {"hrtime": {"seconds": 1, "nanos": 500}, "value": 0.002},
    ])))
    .await
    .unwrap();
    drop(tx);

    let (result, app) = finish(handle).await;
    result.unwrap();
    assert_eq!(history.texts(), vec!["2mA"]);
    assert_eq!(app.stats().rendered, 1);
}

#[tokio::test]
async fn malformed_payload_stops_pipeline_and_keeps_last_frame() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    tx.send(sample(1.0)).await.unwrap();
    tx.send(StreamEvent::Payload(json!("volts"))).await.unwrap();

    let (result, _) = finish(handle).await;
    match result {
        Err(AmpviewError::MalformedPayload { payload }) => assert_eq!(payload, "\"volts\""),
        other => panic!("expected MalformedPayload, got {other:?}"),
    }
    assert_eq!(history.texts(), vec!["1A"]);
}

#[tokio::test]
async fn malformed_payload_is_skipped_when_configured() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy {
        on_malformed: MalformedPolicy::Skip,
        ..PipelinePolicy::default()
    });

    tx.send(StreamEvent::Payload(json!(null))).await.unwrap();
    tx.send(sample(1.0)).await.unwrap();
    drop(tx);

    let (result, app) = finish(handle).await;
    result.unwrap();
    assert_eq!(history.texts(), vec!["1A"]);
    assert_eq!(app.stats().skipped, 1);
}

#[tokio::test]
async fn disconnect_is_fatal() {
    let (tx, history, handle) = spawn_pipeline(PipelinePolicy::default());

    tx.send(sample(0.5)).await.unwrap();
    tx.send(StreamEvent::Disconnected {
        reason: "connection closed".to_string(),
    })
    .await
    .unwrap();

    let (result, _) = finish(handle).await;
    match result {
        Err(AmpviewError::Transport { message }) => assert_eq!(message, "connection closed"),
        other => panic!("expected Transport error, got {other:?}"),
    }
    assert_eq!(history.texts(), vec!["500mA"]);
}

#[tokio::test]
async fn latest_policy_renders_newest_of_queued_burst() {
    let surface = MemorySurface::new(Size::new(128, 128));
    let history = surface.history();
    let renderer = SampleRenderer::new(Box::new(surface), TextStyle::default());
    let (tx, source) = ChannelSource::new(8);

    // Queue the whole burst before the loop starts so it is all pending at once.
    for value in [1e-7, 2e-7, 3e-7] {
        tx.send(sample(value)).await.unwrap();
    }
    drop(tx);

    let mut app = Application::new(
        Box::new(source),
        renderer,
        PipelinePolicy {
            backpressure: BackpressurePolicy::Latest,
            ..PipelinePolicy::default()
        },
    );
    timeout(Duration::from_millis(TIMEOUT_MS), app.run())
        .await
        .expect("pipeline did not stop")
        .unwrap();

    assert_eq!(history.texts(), vec!["300nA"]);
    assert_eq!(app.stats().coalesced, 2);
    assert_eq!(app.stats().rendered, 1);
}
