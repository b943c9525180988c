//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use shared::{AssemblyRevision, AssemblyStep, PhoneModel};
use solarframe_gui_lib::command::{execute_json, execute_json_batch, execute_line};
use solarframe_gui_lib::harness::TestHarness;

#[test]
fn test_batch_walks_whole_sequence() {
    let mut h = TestHarness::new();
    let json = r#"[
        {"command": "advance"},
        {"command": "advance"},
        {"command": "advance"},
        {"command": "advance"},
        {"command": "advance"},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 6);
    assert!(responses.iter().all(|r| r.success));

    // Fifth advance hits the end of the sequence
    assert_eq!(responses[3].data.as_ref().unwrap()["changed"], true);
    assert_eq!(responses[4].data.as_ref().unwrap()["changed"], false);

    let inspect = responses[5].data.as_ref().unwrap();
    assert_eq!(inspect["step"], "thermal_insert");
    assert_eq!(inspect["complete"], true);
    let parts = inspect["parts"].as_array().unwrap();
    assert!(parts.iter().all(|p| p["visible"] == true));
}

#[test]
fn test_reset_after_progress() {
    let mut h = TestHarness::new();
    execute_json_batch(&mut h, r#"[{"command": "advance"}, {"command": "advance"}]"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "reset"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["from"], "pcb");
    assert_eq!(data["to"], "chassis");
    assert_eq!(h.step(), AssemblyStep::Chassis);
}

#[test]
fn test_variant_commands_keep_step() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "advance"}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "toggle_variant"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["model"], "GalaxyS22");
    assert_eq!(h.assembly.model(), PhoneModel::GalaxyS22);

    let resp = execute_json(&mut h, r#"{"command": "select_variant", "model": "iPhone12"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.assembly.model(), PhoneModel::IPhone12);
    assert_eq!(h.step(), AssemblyStep::SolarModule);
}

#[test]
fn test_set_revision_then_inspect() {
    let mut h = TestHarness::new();
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "advance"},
            {"command": "set_revision", "revision": "hybrid"},
            {"command": "set_revision", "revision": "hybrid"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();

    assert_eq!(responses[1].data.as_ref().unwrap()["changed"], true);
    assert_eq!(responses[2].data.as_ref().unwrap()["changed"], false);

    let inspect = responses[3].data.as_ref().unwrap();
    assert_eq!(inspect["revision"], "hybrid");
    assert_eq!(inspect["step"], "case");
    assert_eq!(inspect["ordinal"], 0);
    let parts = inspect["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 6);
    assert_eq!(parts[0]["id"], "phone_case");
    assert_eq!(parts[0]["visible"], true);
    assert!(parts[1..].iter().all(|p| p["visible"] == false));
    assert_eq!(h.assembly.revision(), AssemblyRevision::Hybrid);
}

#[test]
fn test_execute_line_single_and_batch() {
    let mut h = TestHarness::new();
    assert_eq!(execute_line(&mut h, r#"{"command": "advance"}"#).len(), 1);
    assert_eq!(
        execute_line(&mut h, r#"  [{"command": "advance"}, {"command": "inspect"}]"#).len(),
        2
    );
    assert_eq!(h.step(), AssemblyStep::Pcb);
}

#[test]
fn test_unknown_command_in_batch_rejects_whole_batch() {
    let mut h = TestHarness::new();
    let result = execute_json_batch(&mut h, r#"[{"command": "advance"}, {"command": "fly"}]"#);
    assert!(result.is_err());
    // Nothing ran
    assert_eq!(h.step(), AssemblyStep::Chassis);
}
