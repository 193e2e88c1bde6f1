//! Life simulation entry point.
mod actions;
mod capability;
mod config;
mod curves;
mod logging;
mod report;
mod sensors;
mod simulation;
mod world;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::SimConfig;
use report::SimReport;
use utility_ai::{CancellationToken, CompositeSink, OrchestratorConfig, RecordingSink, TracingSink};
use world::{SharedWorld, WorldState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(logging::generate_session_id);
    let session_dir = logging::log_dir().join(&session_id);
    let _guard = logging::setup_logging(&session_dir)?;

    tracing::info!(
        session = %session_id,
        max_ticks = config.max_ticks,
        goal_money = config.goal_money,
        selection = ?config.selection,
        "starting life simulation"
    );

    let world = SharedWorld::new(WorldState::default());
    let policy = OrchestratorConfig::from_env();
    let mut orchestrator = simulation::build_orchestrator(&config, policy, &world);
    let intent = simulation::intent(&session_id);

    let recording = Arc::new(RecordingSink::new());
    let sink = CompositeSink::new()
        .with(TracingSink)
        .with_shared(recording.clone());

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current tick");
            interrupt.cancel();
        }
    });

    let summary = orchestrator
        .run(&intent, config.max_ticks, &cancel, Some(&sink))
        .await
        .context("Simulation aborted")?;

    let final_world = world.snapshot();
    tracing::info!(
        reason = %summary.reason,
        tick = summary.tick,
        actions = summary.actions_executed,
        "simulation finished"
    );
    tracing::info!(
        hunger = final_world.hunger,
        energy = final_world.energy,
        money = final_world.money,
        meals_eaten = final_world.meals_eaten,
        hours_worked = final_world.hours_worked,
        "final world"
    );

    if config.write_report {
        let report = SimReport {
            session_id,
            intent,
            summary,
            ticks: recording.summaries(),
            final_world,
        };
        let path = report.write_to(&session_dir)?;
        tracing::info!("Report written: {}", path.display());
    }

    Ok(())
}
