//! In-memory holder for the five agents and the capped log feed.
//!
//! Agents are only ever changed by replacing whole records: patching one
//! agent reads it, builds a new record, and swaps the list. The log feed is
//! kept newest-first and never exceeds [`LOG_CAPACITY`].

use serde::Serialize;

use crate::domain::errors::StoreError;
use crate::domain::models::{Agent, AgentId, AgentStatus, LogEntry, Plan, LOG_CAPACITY, MESH_SIZE};

/// Source label of the readiness entry written by reset.
pub const SYSTEM_SOURCE: &str = "System";

/// Message of the readiness entry written by reset.
pub const READY_MESSAGE: &str = "System Online. Agent mesh ready.";

/// Agents plus log feed.
#[derive(Debug, Clone, Serialize)]
pub struct MeshStore {
    agents: Vec<Agent>,
    logs: Vec<LogEntry>,
}

impl Default for MeshStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshStore {
    /// Fresh store in the reset state.
    pub fn new() -> Self {
        let mut store = Self {
            agents: Vec::new(),
            logs: Vec::new(),
        };
        store.reset();
        store
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Log entries, most recent first.
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Replace the whole roster.
    ///
    /// The new list must hold exactly the five slots in order with their
    /// bound roles; anything else is rejected and the store is unchanged.
    pub fn replace_agents(&mut self, agents: Vec<Agent>) -> Result<(), StoreError> {
        if agents.len() != MESH_SIZE {
            return Err(StoreError::AgentCountMismatch {
                expected: MESH_SIZE,
                actual: agents.len(),
            });
        }
        for (index, (agent, expected)) in agents.iter().zip(AgentId::ALL).enumerate() {
            if agent.id != expected || agent.role != expected.role() {
                return Err(StoreError::AgentIdentityMismatch { index, expected });
            }
        }
        self.agents = agents;
        Ok(())
    }

    /// Read-modify-write of one agent record.
    pub fn patch_agent<F>(&mut self, id: AgentId, patch: F) -> Result<(), StoreError>
    where
        F: FnOnce(&Agent) -> Agent,
    {
        let current = self.agent(id).ok_or(StoreError::UnknownAgent(id))?;
        let mut updated = patch(current);
        // Identity and role are bound to the slot, whatever the patch did.
        updated.id = id;
        updated.role = id.role();

        let agents = self
            .agents
            .iter()
            .map(|a| if a.id == id { updated.clone() } else { a.clone() })
            .collect();
        self.replace_agents(agents)
    }

    pub fn set_status(&mut self, id: AgentId, status: AgentStatus) -> Result<(), StoreError> {
        self.patch_agent(id, |agent| agent.with_status(status))
    }

    pub fn set_all_status(&mut self, status: AgentStatus) {
        self.agents = self.agents.iter().map(|a| a.with_status(status)).collect();
    }

    /// Fold a plan into slots 2, 3 and 4: names, specialties and tasks.
    pub fn apply_plan(&mut self, plan: &Plan) -> Result<(), StoreError> {
        let agents = self
            .agents
            .iter()
            .map(|agent| {
                match AgentId::PLAN_SLOTS.iter().position(|slot| *slot == agent.id) {
                    Some(i) => {
                        let role = &plan.roles()[i];
                        Agent {
                            name: role.name.clone(),
                            specialty: role.specialty.clone(),
                            current_task: Some(role.task.clone()),
                            ..agent.clone()
                        }
                    }
                    None => agent.clone(),
                }
            })
            .collect();
        self.replace_agents(agents)
    }

    /// Prepend an entry, dropping the oldest beyond capacity.
    pub fn push_log(&mut self, entry: LogEntry) {
        self.logs.insert(0, entry);
        self.logs.truncate(LOG_CAPACITY);
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    /// Back to the template roster with a single readiness entry.
    pub fn reset(&mut self) {
        self.agents = Agent::template();
        self.logs = vec![LogEntry::new(SYSTEM_SOURCE, READY_MESSAGE)];
    }

    /// Log feed rendered as `[source]: message` lines in stored order.
    pub fn log_transcript(&self) -> String {
        self.logs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AgentRole;

    #[test]
    fn test_new_store_is_reset() {
        let store = MeshStore::new();
        assert_eq!(store.agents(), Agent::template().as_slice());
        assert_eq!(store.logs().len(), 1);
        assert_eq!(store.logs()[0].message, READY_MESSAGE);
        assert_eq!(store.logs()[0].source, SYSTEM_SOURCE);
    }

    #[test]
    fn test_push_log_caps_and_prepends() {
        let mut store = MeshStore::new();
        for i in 0..20 {
            store.push_log(LogEntry::new("Test", format!("entry {i}")));
        }
        assert_eq!(store.logs().len(), LOG_CAPACITY);
        assert_eq!(store.logs()[0].message, "entry 19");
        assert_eq!(store.logs()[LOG_CAPACITY - 1].message, "entry 12");
    }

    #[test]
    fn test_patch_agent_keeps_slot_identity() {
        let mut store = MeshStore::new();
        store
            .patch_agent(AgentId::SPECIALIST_A, |agent| Agent {
                role: AgentRole::Worker,
                status: AgentStatus::Working,
                ..agent.clone()
            })
            .unwrap();

        let agent = store.agent(AgentId::SPECIALIST_A).unwrap();
        assert_eq!(agent.status, AgentStatus::Working);
        assert_eq!(agent.role, AgentRole::Specialist);
        assert_eq!(store.agents().len(), MESH_SIZE);
    }

    #[test]
    fn test_replace_agents_rejects_bad_roster() {
        let mut store = MeshStore::new();

        let mut short = Agent::template();
        short.pop();
        assert_eq!(
            store.replace_agents(short),
            Err(StoreError::AgentCountMismatch { expected: 5, actual: 4 })
        );

        let mut swapped = Agent::template();
        swapped.swap(1, 3);
        assert_eq!(
            store.replace_agents(swapped),
            Err(StoreError::AgentIdentityMismatch {
                index: 1,
                expected: AgentId::SPECIALIST_A
            })
        );

        assert_eq!(store.agents(), Agent::template().as_slice());
    }

    #[test]
    fn test_apply_plan_fills_slots_two_to_four() {
        let mut store = MeshStore::new();
        let plan = Plan::fallback();
        store.apply_plan(&plan).unwrap();

        let names: Vec<_> = store.agents().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Orchestrator", "Logic Bot", "Resource Bot", "Review Bot", "Worker Two"]
        );
        let worker = store.agent(AgentId::WORKER_A).unwrap();
        assert_eq!(worker.role, AgentRole::Worker);
        assert_eq!(worker.specialty, "Quality Control");
        assert_eq!(worker.current_task.as_deref(), Some("Verifying output"));
        assert!(store.agent(AgentId::WORKER_B).unwrap().current_task.is_none());
    }

    #[test]
    fn test_set_all_status_and_reset() {
        let mut store = MeshStore::new();
        store.set_all_status(AgentStatus::Success);
        assert!(store.agents().iter().all(|a| a.status == AgentStatus::Success));

        store.reset();
        assert!(store.agents().iter().all(|a| a.status == AgentStatus::Idle));
        assert_eq!(store.logs().len(), 1);
    }

    #[test]
    fn test_log_transcript_order() {
        let mut store = MeshStore::new();
        store.clear_logs();
        store.push_log(LogEntry::new("A", "first"));
        store.push_log(LogEntry::new("B", "second"));
        assert_eq!(store.log_transcript(), "[B]: second\n[A]: first");
    }
}
