//! Mission run command.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::ProgressBar;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use super::agents::AgentListOutput;
use crate::cli::display::{action_success, action_warning, output, section_header, CommandOutput};
use crate::cli::output::progress::{create_spinner, print_line};
use crate::domain::models::{Config, LogEntry, Stage};
use crate::infrastructure::gemini::{GeminiClient, GeminiClientConfig};
use crate::services::{MeshEvent, MeshSnapshot, MissionController, RunOutcome};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Mission for the mesh to carry out
    pub mission: String,

    /// Generate the mission report once the run completes
    #[arg(short, long)]
    pub report: bool,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub mission: Option<String>,
    pub stage: Stage,
    #[serde(flatten)]
    pub roster: AgentListOutput,
    pub logs: Vec<LogEntry>,
    pub report: Option<ReportOutput>,
}

#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub text: String,
    pub fallback: bool,
}

impl From<MeshSnapshot> for RunOutput {
    fn from(snapshot: MeshSnapshot) -> Self {
        let report = snapshot.report.map(|text| ReportOutput {
            text,
            fallback: snapshot.report_is_fallback,
        });
        Self {
            mission: snapshot.mission,
            stage: snapshot.stage,
            roster: AgentListOutput::from_agents(&snapshot.agents),
            logs: snapshot.logs,
            report,
        }
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![section_header("Mesh"), self.roster.to_human()];

        if let Some(report) = &self.report {
            lines.push(section_header("Mission report"));
            lines.push(report.text.clone());
            if report.fallback {
                lines.push("(built-in summary, the model was unavailable)".dimmed().to_string());
            }
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, config: &Config, json_mode: bool) -> Result<()> {
    let client = GeminiClient::new(GeminiClientConfig::from_config(&config.generator))
        .context("Failed to build generative text client")?;
    if !client.has_credential() {
        warn!("no API key configured, the built-in team and summary will be used");
    }

    let controller = MissionController::new(Arc::new(client));
    let mut events = controller.subscribe();
    let handle = controller.start(&args.mission).await?;

    let spinner = (!json_mode).then(|| create_spinner("Consulting the planning model..."));
    let mut run = std::pin::pin!(handle.wait());

    let outcome = loop {
        tokio::select! {
            outcome = &mut run => break outcome,
            _ = tokio::signal::ctrl_c() => {
                controller.reset().await;
                break (&mut run).await;
            }
            event = events.recv() => match event {
                Ok(event) if !json_mode => render_event(&event, spinner.as_ref()),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break (&mut run).await,
            },
        }
    };

    while let Ok(event) = events.try_recv() {
        if !json_mode {
            render_event(&event, spinner.as_ref());
        }
    }
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    if outcome == RunOutcome::Cancelled {
        bail!("Mission cancelled before completion");
    }

    if args.report {
        let spinner = (!json_mode).then(|| create_spinner("Writing the mission report..."));
        let report = controller.generate_report().await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        report?;
    }

    output(&RunOutput::from(controller.snapshot().await), json_mode);
    Ok(())
}

fn render_event(event: &MeshEvent, spinner: Option<&ProgressBar>) {
    match event {
        MeshEvent::LogAppended { entry } => {
            let line = format!(
                "{} [{}]: {}",
                entry.time.dimmed(),
                entry.source.bold(),
                entry.message
            );
            print_line(spinner, &line);
        }
        MeshEvent::PlanResolved { plan, fallback } => {
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let team = plan.names().collect::<Vec<_>>().join(", ");
            let line = if *fallback {
                action_warning(&format!("Planning model unavailable, using the built-in team: {team}"))
            } else {
                action_success(&format!("Team assembled: {team}"))
            };
            print_line(spinner, &line);
        }
        MeshEvent::StageEntered { stage } => {
            print_line(spinner, &format!("-- stage {stage}").dimmed().to_string());
        }
        MeshEvent::RunCompleted => {
            print_line(spinner, &action_success("All agents reported success"));
        }
        MeshEvent::RunStarted { .. }
        | MeshEvent::AgentsChanged { .. }
        | MeshEvent::ReportReady { .. }
        | MeshEvent::Reset => {}
    }
}
