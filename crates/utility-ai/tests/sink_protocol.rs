mod common;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use common::{EventLog, StopAt, constant, counting, failing};
use utility_ai::{
    CancellationToken, CompositeSink, OrchestrationStopReason, Orchestrator, RecordingSink,
    Runtime, TracingSink, UserIntent, UtilityAiOrchestrator,
};

#[tokio::test]
async fn callbacks_follow_tick_order() {
    let runs = Arc::new(AtomicUsize::new(0));
    let work = counting("work", &runs);
    let rest = counting("rest", &runs);
    let mut orchestrator = UtilityAiOrchestrator::new().add_module(move |_: &Runtime<'_>| {
        vec![constant("rest", &rest, 0.2), constant("work", &work, 0.6)]
    });
    let log = EventLog::default();

    orchestrator
        .run(&UserIntent::from_query("q"), 2, &CancellationToken::new(), Some(&log))
        .await
        .expect("run should end normally");

    assert_eq!(
        log.entries(),
        [
            "start 0",
            "scored 0 work,rest",
            "chosen 0 work",
            "acted 0 work",
            "start 1",
            "scored 1 work,rest",
            "chosen 1 work",
            "acted 1 work",
            "stopped 2 MaxTicksReached",
        ]
    );
}

#[tokio::test]
async fn stop_event_skips_the_rest_of_the_tick() {
    let runs = Arc::new(AtomicUsize::new(0));
    let work = counting("work", &runs);
    let mut orchestrator = UtilityAiOrchestrator::new()
        .add_sensor(StopAt {
            tick: 1,
            reason: OrchestrationStopReason::GoalAchieved,
        })
        .add_module(move |_: &Runtime<'_>| vec![constant("work", &work, 0.6)]);
    let log = EventLog::default();

    orchestrator
        .run(&UserIntent::from_query("q"), 5, &CancellationToken::new(), Some(&log))
        .await
        .expect("run should end normally");

    let entries = log.entries();
    assert_eq!(&entries[4..], ["start 1", "stopped 1 GoalAchieved"]);
}

#[tokio::test]
async fn stopped_is_delivered_once_on_failure() {
    let action = failing("explode");
    let mut orchestrator = UtilityAiOrchestrator::new()
        .add_module(move |_: &Runtime<'_>| vec![constant("explode", &action, 0.9)]);
    let log = EventLog::default();

    let result = orchestrator
        .run(&UserIntent::from_query("q"), 5, &CancellationToken::new(), Some(&log))
        .await;

    assert!(result.is_err());
    assert_eq!(log.stops(), 1);
    assert_eq!(
        log.entries(),
        [
            "start 0",
            "scored 0 explode",
            "chosen 0 explode",
            "stopped 0 ActionFailed",
        ]
    );
}

#[tokio::test]
async fn composite_feeds_every_sink() {
    let runs = Arc::new(AtomicUsize::new(0));
    let work = counting("work", &runs);
    let mut orchestrator = UtilityAiOrchestrator::new()
        .add_module(move |_: &Runtime<'_>| vec![constant("work", &work, 0.6)]);

    let log = Arc::new(EventLog::default());
    let recording = Arc::new(RecordingSink::new());
    let composite = CompositeSink::new()
        .with(TracingSink)
        .with_shared(log.clone())
        .with_shared(recording.clone());

    orchestrator
        .run(&UserIntent::from_query("q"), 3, &CancellationToken::new(), Some(&composite))
        .await
        .expect("run should end normally");

    assert_eq!(log.stops(), 1);
    assert_eq!(recording.ticks().len(), 3);
    assert_eq!(recording.stop_reason(), Some(OrchestrationStopReason::MaxTicksReached));
    assert_eq!(recording.stop_tick(), Some(3));
}

#[tokio::test]
async fn trait_object_runs_like_concrete_type() {
    let runs = Arc::new(AtomicUsize::new(0));
    let work = counting("work", &runs);
    let mut orchestrator: Box<dyn Orchestrator> = Box::new(
        UtilityAiOrchestrator::new()
            .add_module(move |_: &Runtime<'_>| vec![constant("work", &work, 0.6)]),
    );
    let recording = RecordingSink::new();

    let summary = orchestrator
        .run(&UserIntent::from_query("q"), 2, &CancellationToken::new(), Some(&recording))
        .await
        .expect("run should end normally");

    assert_eq!(summary.actions_executed, 2);
    assert_eq!(recording.chosen_ids(), ["work", "work"]);
}
