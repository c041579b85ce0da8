//! Agent roster command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::{colorize_role, colorize_status, list_table, output, render_list, CommandOutput};
use crate::domain::models::Agent;

#[derive(Debug, Serialize)]
pub struct AgentOutput {
    pub id: String,
    pub name: String,
    pub role: String,
    pub specialty: String,
    pub status: String,
    pub task: Option<String>,
    pub position: (f32, f32),
}

impl From<&Agent> for AgentOutput {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.to_string(),
            name: agent.name.clone(),
            role: agent.role.to_string(),
            specialty: agent.specialty.clone(),
            status: agent.status.to_string(),
            task: agent.current_task.clone(),
            position: (agent.position.x, agent.position.y),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgentListOutput {
    pub agents: Vec<AgentOutput>,
    pub total: usize,
}

impl AgentListOutput {
    pub fn from_agents(agents: &[Agent]) -> Self {
        Self {
            agents: agents.iter().map(AgentOutput::from).collect(),
            total: agents.len(),
        }
    }
}

impl CommandOutput for AgentListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "role", "specialty", "status", "task"]);
        for agent in &self.agents {
            table.add_row(vec![
                agent.id.clone(),
                agent.name.clone(),
                colorize_role(&agent.role).to_string(),
                agent.specialty.clone(),
                colorize_status(&agent.status).to_string(),
                agent.task.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        render_list("agent", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(json_mode: bool) -> Result<()> {
    output(&AgentListOutput::from_agents(&Agent::template()), json_mode);
    Ok(())
}
