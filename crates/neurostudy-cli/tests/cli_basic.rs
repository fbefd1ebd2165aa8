//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return output.
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_neurostudy"))
        .args(args)
        .env("NEUROSTUDY_DATA_DIR", dir)
        .env("NEUROSTUDY_LOG", "off")
        .env("NEUROSTUDY_API_KEY", "test-key")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&run_ok(dir, args)).expect("valid JSON output")
}

#[test]
fn test_profile_defaults() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["profile", "show"]);
    assert!(out.contains("Tasks today:      5"));
    assert!(out.contains("You've got this!"));
}

#[test]
fn test_mode_enable_changes_profile() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["mode", "enable", "adhd"]);
    let profile = run_json(dir.path(), &["profile", "show", "--json"]);
    assert_eq!(profile["default_timer_minutes"], 25);
    assert_eq!(profile["show_quick_start"], true);

    let list = run_ok(dir.path(), &["mode", "list"]);
    assert!(list.contains("[x] adhd"));

    run_ok(dir.path(), &["mode", "disable", "adhd"]);
    let profile = run_json(dir.path(), &["profile", "show", "--json"]);
    assert_eq!(profile["show_quick_start"], false);
}

#[test]
fn test_style_tags_are_reconciled() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["mode", "enable", "adhd"]);
    assert!(out.contains("styles: +adhd-mode"));

    let out = run_ok(dir.path(), &["mode", "enable", "sensory_safe"]);
    assert!(out.contains("styles: +sensory-safe"));
    assert!(!out.contains("adhd-mode"));

    let out = run_ok(dir.path(), &["mode", "disable", "adhd"]);
    assert!(out.contains("styles: -adhd-mode"));

    // Nothing left to change.
    let out = run_ok(dir.path(), &["energy", "set", "high"]);
    assert!(!out.contains("styles:"));

    let out = run_ok(dir.path(), &["prefs", "set", "motorLargeButtons", "true"]);
    assert!(out.contains("styles: +motor-friendly"));

    let profile = run_json(dir.path(), &["profile", "show", "--json"]);
    assert_eq!(profile["style"], serde_json::json!(["sensory-safe", "motor-friendly"]));
}

#[test]
fn test_unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["mode", "enable", "telepathy"]);
    assert_ne!(code, 0);
}

#[test]
fn test_energy_low_caps_plan() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["energy", "set", "low"]);
    assert!(out.contains("timer 15 min, up to 2 tasks"));
    assert_eq!(run_ok(dir.path(), &["energy", "show"]).trim(), "Low energy");

    let plan = run_json(dir.path(), &["plan", "today", "--json"]);
    assert_eq!(plan.as_array().unwrap().len(), 2);
}

#[test]
fn test_prefs_set() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["prefs", "set", "timerPreset", "45"]);
    let prefs = run_json(dir.path(), &["prefs", "show"]);
    assert_eq!(prefs["timerPreset"], 45);

    let (_, stderr, code) = run_cli(dir.path(), &["prefs", "set", "timerPreset", "30"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("timer preset"));
}

#[test]
fn test_demo_plan() {
    let dir = TempDir::new().unwrap();
    let plan = run_json(dir.path(), &["plan", "demo", "--json"]);
    let tasks = plan.as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0]["title"], "Rational Numbers");
}

#[test]
fn test_plan_lifecycle() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "study.planner_seed", "42"]);

    let plan = run_json(dir.path(), &["plan", "today", "--json"]);
    let tasks = plan.as_array().unwrap();
    assert_eq!(tasks.len(), 5);
    let first = tasks[0]["id"].as_str().unwrap().to_string();
    let second = tasks[1]["id"].as_str().unwrap().to_string();

    // Stored plan is returned unchanged on the next call.
    let again = run_json(dir.path(), &["plan", "today", "--json"]);
    assert_eq!(again[0]["id"], first.as_str());

    run_ok(dir.path(), &["plan", "move", &second, "up"]);
    let listed = run_json(dir.path(), &["plan", "list", "--json"]);
    assert_eq!(listed[0]["id"], second.as_str());

    let out = run_ok(dir.path(), &["plan", "step", &first[..8]]);
    assert!(out.contains("step 2/5"));

    run_ok(dir.path(), &["plan", "remove", &first]);
    let listed = run_json(dir.path(), &["plan", "list", "--json"]);
    assert_eq!(listed.as_array().unwrap().len(), 4);

    let out = run_ok(dir.path(), &["plan", "add", "math-8-1"]);
    assert!(out.contains("added: Rational Numbers"));
    let listed = run_json(dir.path(), &["plan", "list", "--json"]);
    assert_eq!(listed.as_array().unwrap().len(), 5);

    let (_, stderr, code) = run_cli(dir.path(), &["plan", "add", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no chapter"));
}

#[test]
fn test_focus_start_status_stop() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["focus", "start", "--minutes", "10"]);
    assert!(out.contains("quick focus for 10 min"));

    let (_, _, code) = run_cli(dir.path(), &["focus", "start"]);
    assert_eq!(code, 1);

    let status = run_json(dir.path(), &["focus", "status", "--json"]);
    assert_eq!(status["state"], "running");

    let out = run_ok(dir.path(), &["focus", "pause"]);
    assert!(out.contains("paused at"));
    run_ok(dir.path(), &["focus", "resume"]);

    let out = run_ok(dir.path(), &["focus", "stop"]);
    assert!(out.contains("You stopped the session early."));

    let progress = run_json(dir.path(), &["progress", "show", "--json"]);
    assert_eq!(progress["total_sessions_completed"], 0);
    assert_eq!(progress["total_xp"], 0);

    let (_, stderr, code) = run_cli(dir.path(), &["focus", "status"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no focus session running"));
}

#[test]
fn test_focus_task_prefix_must_be_unique() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "study.planner_seed", "7"]);
    let plan = run_json(dir.path(), &["plan", "today", "--json"]);
    assert!(plan.as_array().unwrap().len() > 1);

    let (_, stderr, code) = run_cli(dir.path(), &["focus", "start", "--task", ""]);
    assert_eq!(code, 1);
    assert!(stderr.contains("must not be empty"));

    let (_, stderr, code) = run_cli(dir.path(), &["focus", "start", "--task", "zzzz"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no task in today's plan matches"));

    let id = plan[0]["id"].as_str().unwrap();
    let out = run_ok(dir.path(), &["focus", "start", "--task", &id[..8]]);
    assert!(out.contains(plan[0]["title"].as_str().unwrap()));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "study.grade"]).trim(), "8");

    run_ok(dir.path(), &["config", "set", "study.grade", "9"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "study.grade"]).trim(), "9");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "study.grade", "20"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);

    let list = run_ok(dir.path(), &["config", "list"]);
    assert!(list.contains("gateway.base_url = http://localhost:54321"));

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "study.grade"]).trim(), "8");
}

#[test]
fn test_tutor_prompt_and_greeting() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["mode", "enable", "dyslexia"]);

    let prompt = run_ok(dir.path(), &["tutor", "prompt", "--chapter", "sci-8-1"]);
    assert!(prompt.starts_with("You are NeuroStudy AI Tutor"));
    assert!(prompt.contains("DYSLEXIA ADAPTATIONS"));
    assert!(!prompt.contains("ADHD ADAPTATIONS"));
    assert!(prompt.contains("Title: Microorganisms"));

    let greeting = run_ok(dir.path(), &["tutor", "greeting"]);
    assert!(greeting.starts_with("Hi! I'm here to help."));
}

#[test]
fn test_tutor_ask_unreachable_gateway() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "gateway.base_url", "http://127.0.0.1:9"]);

    let (stdout, stderr, code) = run_cli(dir.path(), &["tutor", "ask", "what", "is", "a", "fraction?"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Sorry, I encountered an issue:"));
    assert!(!stdout.contains("Sorry"));
}

#[test]
fn test_tutor_upstream_request() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["mode", "enable", "adhd"]);

    let request = run_json(dir.path(), &["tutor", "upstream", "what", "is", "x?"]);
    assert_eq!(request["stream"], true);
    let messages = request["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"].as_str().unwrap().contains("ADHD ADAPTATIONS"));
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "what is x?");
}

#[test]
fn test_notes_upstream_request() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("cells.md");
    std::fs::write(&file, "Cells are the basic unit of life.").unwrap();

    let request = run_json(
        dir.path(),
        &["notes", "upstream", file.to_str().unwrap(), "--detail", "brief"],
    );
    let messages = request["messages"].as_array().unwrap();
    assert!(messages[0]["content"].as_str().unwrap().contains("Keep the summary to 1 paragraph."));
    assert!(messages[1]["content"].as_str().unwrap().contains("Cells are the basic unit of life."));

    let empty = dir.path().join("empty.txt");
    std::fs::write(&empty, "   ").unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["notes", "upstream", empty.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No content provided"));
}

#[test]
fn test_notes_rejects_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("slides.docx");
    std::fs::write(&file, "x").unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["notes", "generate", file.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Only .txt, .md, and .pdf files are accepted"));
}
