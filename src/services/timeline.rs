//! Scripted mission timeline.
//!
//! The timeline is data: [`STAGE_TABLE`] lists each stage with its offset
//! from the anchor and the effects it applies. One loop sleeps until each
//! offset and applies the step under the state lock. Every offset is
//! measured from the same anchor (the moment the plan resolved), not from
//! the previous stage.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::mission_state::{MeshEvent, MissionState};
use super::plan_provider::PlanOutcome;
use crate::domain::models::{AgentId, AgentStatus, LogEntry, Plan, Stage};

pub const ORCHESTRATOR_SOURCE: &str = "Orchestrator";
pub const COMPLETION_MESSAGE: &str = "Workflow completed successfully. All agents reported success.";

/// One state change applied by a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEffect {
    SetStatus(AgentId, AgentStatus),
    SetAllStatus(AgentStatus),
    Log { source: String, message: String },
}

impl StageEffect {
    fn log(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Log {
            source: source.into(),
            message: message.into(),
        }
    }
}

/// A timed stage of the timeline.
#[derive(Clone, Copy)]
pub struct StageStep {
    pub stage: Stage,
    /// Delay from the anchor
    pub offset: Duration,
    effects: fn(&Plan) -> Vec<StageEffect>,
}

impl std::fmt::Debug for StageStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageStep")
            .field("stage", &self.stage)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl StageStep {
    pub fn effects(&self, plan: &Plan) -> Vec<StageEffect> {
        (self.effects)(plan)
    }
}

/// Delayed stages, anchored at plan resolution.
pub static STAGE_TABLE: [StageStep; 5] = [
    StageStep {
        stage: Stage::RoleAssignment,
        offset: Duration::from_millis(1_500),
        effects: role_assignment,
    },
    StageStep {
        stage: Stage::RegistryLookup,
        offset: Duration::from_millis(3_500),
        effects: registry_lookup,
    },
    StageStep {
        stage: Stage::Distribution,
        offset: Duration::from_millis(5_500),
        effects: distribution,
    },
    StageStep {
        stage: Stage::Progress,
        offset: Duration::from_millis(8_500),
        effects: progress,
    },
    StageStep {
        stage: Stage::Complete,
        offset: Duration::from_millis(11_500),
        effects: completion,
    },
];

fn role_assignment(plan: &Plan) -> Vec<StageEffect> {
    let names = plan.names().collect::<Vec<_>>().join(", ");
    vec![
        StageEffect::SetStatus(AgentId::ORCHESTRATOR, AgentStatus::Working),
        StageEffect::log(ORCHESTRATOR_SOURCE, format!("Assigning roles: {names}.")),
    ]
}

fn registry_lookup(plan: &Plan) -> Vec<StageEffect> {
    let [first, second, third] = plan.roles();
    vec![StageEffect::log(
        "Registry",
        format!(
            "Registry lookup matched specialists for {}, {} and {}.",
            first.specialty, second.specialty, third.specialty
        ),
    )]
}

fn distribution(_plan: &Plan) -> Vec<StageEffect> {
    vec![
        StageEffect::SetStatus(AgentId::ORCHESTRATOR, AgentStatus::Communicating),
        StageEffect::SetStatus(AgentId::SPECIALIST_A, AgentStatus::Working),
        StageEffect::SetStatus(AgentId::SPECIALIST_B, AgentStatus::Working),
        StageEffect::SetStatus(AgentId::WORKER_A, AgentStatus::Working),
        StageEffect::log(ORCHESTRATOR_SOURCE, "Distributing sub-tasks across the mesh."),
    ]
}

fn progress(plan: &Plan) -> Vec<StageEffect> {
    let [first, _, third] = plan.roles();
    vec![
        StageEffect::SetStatus(AgentId::SPECIALIST_A, AgentStatus::Communicating),
        StageEffect::SetStatus(AgentId::WORKER_B, AgentStatus::Working),
        StageEffect::log(
            first.name.clone(),
            format!("Progress on \"{}\": sharing findings with the orchestrator.", first.task),
        ),
        StageEffect::log("Worker Two", format!("Picked up supporting work for \"{}\".", third.task)),
    ]
}

fn completion(_plan: &Plan) -> Vec<StageEffect> {
    vec![
        StageEffect::SetAllStatus(AgentStatus::Success),
        StageEffect::log(ORCHESTRATOR_SOURCE, COMPLETION_MESSAGE),
    ]
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Reached [`Stage::Complete`]
    Completed,
    /// Abandoned by reset or shutdown before completing
    Cancelled,
}

/// Applies the timeline to the shared mission state.
#[derive(Clone)]
pub struct TimelineDriver {
    state: Arc<RwLock<MissionState>>,
    events: broadcast::Sender<MeshEvent>,
}

impl TimelineDriver {
    pub fn new(state: Arc<RwLock<MissionState>>, events: broadcast::Sender<MeshEvent>) -> Self {
        Self { state, events }
    }

    /// Stage 0: clear the feed and record the request. Caller holds the lock.
    pub(crate) fn intake(&self, state: &mut MissionState, mission: &str) {
        state.stage = Stage::Idle;
        state.store.clear_logs();
        self.log(state, LogEntry::new("User", format!("Mission received: \"{mission}\"")));
        self.log(state, LogEntry::new("System", "Consulting the planning model for a team..."));
    }

    /// Anchor the timeline on `outcome` and play every stage.
    ///
    /// Returns early with [`RunOutcome::Cancelled`] as soon as `token` is
    /// cancelled; no mutation happens after that point.
    pub async fn run(&self, outcome: PlanOutcome, token: &CancellationToken) -> RunOutcome {
        let fallback = outcome.is_fallback();
        let plan = outcome.into_plan();

        let Some(anchor) = self.anchor(&plan, fallback, token).await else {
            return RunOutcome::Cancelled;
        };

        let mut steps: Vec<&StageStep> = STAGE_TABLE.iter().collect();
        steps.sort_by_key(|step| step.offset);

        for step in steps {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(stage = %step.stage, "run cancelled before stage");
                    return RunOutcome::Cancelled;
                }
                () = sleep_until(anchor + step.offset) => {}
            }

            let mut state = self.state.write().await;
            if token.is_cancelled() {
                return RunOutcome::Cancelled;
            }
            self.apply_step(&mut state, step, &plan);
        }

        let _ = self.events.send(MeshEvent::RunCompleted);
        RunOutcome::Completed
    }

    /// Stage 1: fold the plan into the roster and hand over from
    /// orchestrating to simulating.
    async fn anchor(&self, plan: &Plan, fallback: bool, token: &CancellationToken) -> Option<Instant> {
        let mut state = self.state.write().await;
        if token.is_cancelled() {
            return None;
        }

        if let Err(err) = state.store.apply_plan(plan) {
            warn!(error = %err, "failed to apply plan to roster");
        }
        state.stage = Stage::Anchored;
        state.orchestrating = false;
        state.simulating = true;

        let _ = self.events.send(MeshEvent::PlanResolved {
            plan: plan.clone(),
            fallback,
        });
        let _ = self.events.send(MeshEvent::AgentsChanged {
            agents: state.store.agents().to_vec(),
        });
        let _ = self.events.send(MeshEvent::StageEntered {
            stage: Stage::Anchored,
        });
        info!(fallback, "plan resolved, timeline anchored");

        Some(Instant::now())
    }

    fn apply_step(&self, state: &mut MissionState, step: &StageStep, plan: &Plan) {
        let mut agents_changed = false;

        for effect in step.effects(plan) {
            match effect {
                StageEffect::SetStatus(id, status) => {
                    if let Err(err) = state.store.set_status(id, status) {
                        warn!(error = %err, "stage effect skipped");
                    }
                    agents_changed = true;
                }
                StageEffect::SetAllStatus(status) => {
                    state.store.set_all_status(status);
                    agents_changed = true;
                }
                StageEffect::Log { source, message } => {
                    self.log(state, LogEntry::new(source, message));
                }
            }
        }

        state.stage = step.stage;
        if step.stage.is_terminal() {
            state.simulating = false;
            state.run_token = None;
        }

        if agents_changed {
            let _ = self.events.send(MeshEvent::AgentsChanged {
                agents: state.store.agents().to_vec(),
            });
        }
        let _ = self.events.send(MeshEvent::StageEntered { stage: step.stage });
        info!(stage = %step.stage, "stage entered");
    }

    fn log(&self, state: &mut MissionState, entry: LogEntry) {
        state.store.push_log(entry.clone());
        let _ = self.events.send(MeshEvent::LogAppended { entry });
    }
}
