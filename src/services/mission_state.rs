//! Shared mutable state of one mesh view, plus the events and snapshots
//! published from it.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::mesh_store::MeshStore;
use super::summary_provider::SummaryOutcome;
use crate::domain::models::{Agent, LogEntry, Plan, Stage};

/// Everything the controller and the timeline driver mutate.
///
/// Lives behind one `RwLock`; every mutation happens with the write lock
/// held so a cancelled run can be detected before it touches anything.
#[derive(Debug)]
pub struct MissionState {
    pub(crate) store: MeshStore,
    pub(crate) stage: Stage,
    /// Waiting on the plan request
    pub(crate) orchestrating: bool,
    /// Timeline running
    pub(crate) simulating: bool,
    pub(crate) mission: Option<String>,
    pub(crate) report: Option<SummaryOutcome>,
    pub(crate) generating_report: bool,
    /// Token of the run currently allowed to mutate state
    pub(crate) run_token: Option<CancellationToken>,
    /// Bumped on every start and reset; late results from older epochs are dropped
    pub(crate) epoch: u64,
}

impl Default for MissionState {
    fn default() -> Self {
        Self {
            store: MeshStore::new(),
            stage: Stage::Idle,
            orchestrating: false,
            simulating: false,
            mission: None,
            report: None,
            generating_report: false,
            run_token: None,
            epoch: 0,
        }
    }
}

impl MissionState {
    pub const fn is_busy(&self) -> bool {
        self.orchestrating || self.simulating
    }

    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot {
            agents: self.store.agents().to_vec(),
            logs: self.store.logs().to_vec(),
            stage: self.stage,
            orchestrating: self.orchestrating,
            simulating: self.simulating,
            mission: self.mission.clone(),
            report: self.report.as_ref().map(|r| r.text().to_string()),
            report_is_fallback: self.report.as_ref().is_some_and(SummaryOutcome::is_fallback),
        }
    }
}

/// Point-in-time copy of the mesh for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSnapshot {
    pub agents: Vec<Agent>,
    /// Most recent first
    pub logs: Vec<LogEntry>,
    pub stage: Stage,
    pub orchestrating: bool,
    pub simulating: bool,
    pub mission: Option<String>,
    pub report: Option<String>,
    pub report_is_fallback: bool,
}

/// Change notifications broadcast to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MeshEvent {
    RunStarted { mission: String },
    PlanResolved { plan: Plan, fallback: bool },
    StageEntered { stage: Stage },
    LogAppended { entry: LogEntry },
    AgentsChanged { agents: Vec<Agent> },
    RunCompleted,
    ReportReady { text: String, fallback: bool },
    Reset,
}
