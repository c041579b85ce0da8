//! Entry point for driving the mesh: start a mission, reset, request the
//! report, observe changes.

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::mission_state::{MeshEvent, MeshSnapshot, MissionState};
use super::plan_provider::PlanProvider;
use super::summary_provider::{SummaryOutcome, SummaryProvider};
use super::timeline::{RunOutcome, TimelineDriver};
use crate::domain::errors::{MissionError, MissionResult};
use crate::domain::models::Stage;
use crate::domain::ports::TextGenerator;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Handle to a spawned mission run.
pub struct RunHandle {
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Wait for the run to finish or be cancelled.
    pub async fn wait(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "mission task ended abnormally");
                RunOutcome::Cancelled
            }
        }
    }
}

/// Owns the mesh state and the single active run.
///
/// Dropping the controller cancels any run still in flight.
pub struct MissionController {
    state: Arc<RwLock<MissionState>>,
    events: broadcast::Sender<MeshEvent>,
    timeline: TimelineDriver,
    plan_provider: PlanProvider,
    summary_provider: SummaryProvider,
    shutdown: CancellationToken,
}

impl MissionController {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let state = Arc::new(RwLock::new(MissionState::default()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let timeline = TimelineDriver::new(state.clone(), events.clone());

        Self {
            state,
            events,
            timeline,
            plan_provider: PlanProvider::new(generator.clone()),
            summary_provider: SummaryProvider::new(generator),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MeshEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> MeshSnapshot {
        self.state.read().await.snapshot()
    }

    /// Whether [`start`](Self::start) would accept `mission` right now.
    pub async fn can_start(&self, mission: &str) -> bool {
        !mission.trim().is_empty() && !self.state.read().await.is_busy()
    }

    /// Whether [`generate_report`](Self::generate_report) would be accepted.
    pub async fn can_generate_report(&self) -> bool {
        let state = self.state.read().await;
        state.stage.is_terminal() && state.report.is_none() && !state.generating_report
    }

    /// Begin a mission.
    ///
    /// Stage 0 is applied before this returns; planning and the timeline run
    /// on a spawned task. Rejected without any state change when the
    /// mission is blank or another run is still in progress.
    #[instrument(skip(self))]
    pub async fn start(&self, mission: &str) -> MissionResult<RunHandle> {
        let mission = mission.trim();
        if mission.is_empty() {
            return Err(MissionError::EmptyMission);
        }

        let token = self.shutdown.child_token();
        {
            let mut state = self.state.write().await;
            if state.is_busy() {
                debug!(stage = %state.stage, "start ignored, run in progress");
                return Err(MissionError::RunInProgress);
            }

            state.epoch += 1;
            state.orchestrating = true;
            state.mission = Some(mission.to_string());
            state.report = None;
            state.generating_report = false;
            state.run_token = Some(token.clone());

            let _ = self.events.send(MeshEvent::RunStarted {
                mission: mission.to_string(),
            });
            self.timeline.intake(&mut state, mission);
            let _ = self.events.send(MeshEvent::StageEntered { stage: Stage::Idle });
        }
        info!("mission started");

        let planner = self.plan_provider.clone();
        let timeline = self.timeline.clone();
        let mission = mission.to_string();
        let run_token = token;

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                () = run_token.cancelled() => return RunOutcome::Cancelled,
                outcome = planner.plan(&mission) => outcome,
            };
            timeline.run(outcome, &run_token).await
        });

        Ok(RunHandle { task })
    }

    /// Return to the initial mesh, abandoning any run in progress.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        let mut state = self.state.write().await;

        if let Some(token) = state.run_token.take() {
            token.cancel();
        }
        state.store.reset();
        state.stage = Stage::Idle;
        state.orchestrating = false;
        state.simulating = false;
        state.mission = None;
        state.report = None;
        state.generating_report = false;
        state.epoch += 1;

        let _ = self.events.send(MeshEvent::Reset);
        info!("mesh reset");
    }

    /// Summarize the completed run.
    ///
    /// Available once per completed run. The outcome is stored in the state
    /// unless a reset or new run happened while it was being generated.
    #[instrument(skip(self))]
    pub async fn generate_report(&self) -> MissionResult<SummaryOutcome> {
        let (epoch, transcript) = {
            let mut state = self.state.write().await;
            if !state.stage.is_terminal() {
                return Err(MissionError::ReportUnavailable { stage: state.stage });
            }
            if state.generating_report {
                return Err(MissionError::ReportInProgress);
            }
            if state.report.is_some() {
                return Err(MissionError::ReportAlreadyGenerated);
            }
            state.generating_report = true;
            (state.epoch, state.store.log_transcript())
        };

        let outcome = self.summary_provider.summarize(&transcript).await;

        let mut state = self.state.write().await;
        if state.epoch == epoch {
            state.generating_report = false;
            state.report = Some(outcome.clone());
            let _ = self.events.send(MeshEvent::ReportReady {
                text: outcome.text().to_string(),
                fallback: outcome.is_fallback(),
            });
        } else {
            debug!("discarding report for an abandoned run");
        }

        Ok(outcome)
    }
}

impl Drop for MissionController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::GenerationError;
    use crate::domain::ports::{GenerationResult, ResponseFormat};
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl TextGenerator for Offline {
        async fn generate(&self, _prompt: &str, _format: ResponseFormat) -> GenerationResult<String> {
            Err(GenerationError::MissingCredential)
        }
    }

    fn controller() -> MissionController {
        MissionController::new(Arc::new(Offline))
    }

    #[tokio::test]
    async fn test_blank_mission_rejected() {
        let controller = controller();
        assert!(!controller.can_start("   ").await);
        assert_eq!(
            controller.start("   ").await.err(),
            Some(MissionError::EmptyMission)
        );
        assert_eq!(controller.snapshot().await.logs.len(), 1);
    }

    #[tokio::test]
    async fn test_report_unavailable_before_completion() {
        let controller = controller();
        assert!(!controller.can_generate_report().await);
        assert_eq!(
            controller.generate_report().await.err(),
            Some(MissionError::ReportUnavailable { stage: Stage::Idle })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_applies_intake_immediately() {
        let controller = controller();
        let mut events = controller.subscribe();

        let handle = controller.start("  Tidy the garage ").await.unwrap();
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.stage, Stage::Idle);
        assert!(snapshot.orchestrating);
        assert_eq!(snapshot.mission.as_deref(), Some("Tidy the garage"));
        assert_eq!(snapshot.logs.len(), 2);

        assert!(matches!(
            events.recv().await.unwrap(),
            MeshEvent::RunStarted { mission } if mission == "Tidy the garage"
        ));

        assert_eq!(handle.wait().await, RunOutcome::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_controller_cancels_run() {
        let controller = controller();
        let handle = controller.start("Write a poem").await.unwrap();
        drop(controller);
        assert_eq!(handle.wait().await, RunOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_only_once_per_run() {
        let controller = controller();
        let handle = controller.start("Write a poem").await.unwrap();
        handle.wait().await;

        assert!(controller.can_generate_report().await);
        let outcome = controller.generate_report().await.unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(
            controller.generate_report().await.err(),
            Some(MissionError::ReportAlreadyGenerated)
        );

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.report.as_deref(), Some(outcome.text()));
        assert!(snapshot.report_is_fallback);
    }
}
