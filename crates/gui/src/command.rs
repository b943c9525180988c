//! JSON command protocol for scripted control of the assembly.

use serde::{Deserialize, Serialize};
use shared::{AssemblyRevision, PhoneModel};

use crate::harness::TestHarness;
use crate::state::assembly::Transition;

/// A command an external agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Move to the next step.
    Advance,
    /// Back to the first step.
    Reset,
    /// Flip the phone model.
    ToggleVariant,
    SelectVariant {
        model: PhoneModel,
    },
    /// Switch step sequence; restarts at its first step.
    SetRevision {
        revision: AssemblyRevision,
    },
    /// Report step, model, revision and part visibility.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn transition_data(t: Transition) -> serde_json::Value {
    serde_json::json!({
        "from": t.from,
        "to": t.to,
        "changed": !t.is_noop(),
    })
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::Advance => CommandResponse::ok_with_data(transition_data(harness.advance())),

        AgentCommand::Reset => CommandResponse::ok_with_data(transition_data(harness.reset())),

        AgentCommand::ToggleVariant => {
            let model = harness.toggle_variant();
            CommandResponse::ok_with_data(serde_json::json!({ "model": model }))
        }

        AgentCommand::SelectVariant { model } => {
            harness.select_variant(model);
            CommandResponse::ok()
        }

        AgentCommand::SetRevision { revision } => {
            let changed = harness.set_revision(revision);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::Inspect => {
            let a = &harness.assembly;
            let parts: Vec<serde_json::Value> = crate::parts::visibility(a.revision(), a.ordinal())
                .into_iter()
                .map(|(id, visible)| serde_json::json!({ "id": id, "visible": visible }))
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "step": a.step(),
                "ordinal": a.ordinal(),
                "model": a.model(),
                "revision": a.revision(),
                "complete": a.is_complete(),
                "parts": parts,
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

/// Execute a line of input: a single command or a batch.
/// Parse failures are reported as a failed response instead of an error.
pub fn execute_line(harness: &mut TestHarness, line: &str) -> Vec<CommandResponse> {
    let result = if line.trim_start().starts_with('[') {
        execute_json_batch(harness, line)
    } else {
        execute_json(harness, line).map(|r| vec![r])
    };
    result.unwrap_or_else(|e| vec![CommandResponse::err(e)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AssemblyStep;

    #[test]
    fn test_command_serde_advance() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "advance"}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::Advance));
    }

    #[test]
    fn test_command_serde_select_variant() {
        let json = r#"{"command": "select_variant", "model": "GalaxyS22"}"#;
        match serde_json::from_str::<AgentCommand>(json).unwrap() {
            AgentCommand::SelectVariant { model } => assert_eq!(model, PhoneModel::GalaxyS22),
            other => panic!("Expected SelectVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_command_serde_set_revision() {
        let json = r#"{"command": "set_revision", "revision": "hybrid"}"#;
        match serde_json::from_str::<AgentCommand>(json).unwrap() {
            AgentCommand::SetRevision { revision } => assert_eq!(revision, AssemblyRevision::Hybrid),
            other => panic!("Expected SetRevision, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_advance() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "advance"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["from"], "chassis");
        assert_eq!(data["to"], "solar_module");
        assert_eq!(data["changed"], true);
        assert_eq!(h.step(), AssemblyStep::SolarModule);
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        h.advance();
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["ordinal"], 1);
        assert_eq!(data["model"], "iPhone12");
        assert_eq!(data["revision"], "classic");
        assert_eq!(data["parts"].as_array().unwrap().len(), 5);
        assert_eq!(data["parts"][1]["visible"], true);
        assert_eq!(data["parts"][2]["visible"], false);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    }

    #[test]
    fn test_execute_line_reports_parse_error() {
        let mut h = TestHarness::new();
        let resp = execute_line(&mut h, "[{\"command\": ");
        assert_eq!(resp.len(), 1);
        assert!(!resp[0].success);
        assert!(resp[0].error.is_some());
    }
}
