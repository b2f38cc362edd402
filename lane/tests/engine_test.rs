//! Tests for CommandEngine (engine started as a separate program)

#![cfg(unix)]

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use lane::application::services::Resolver;
use lane::domain::{PersistedConfig, RawInvocation, ResolvedConfig};
use lane::infrastructure::engine::CommandEngine;
use lane::infrastructure::traits::{CommandRunner, Engine};
use lane::infrastructure::InfraError;

/// Runner that records the call and replies with a canned result.
struct ScriptedRunner {
    reply: Box<dyn Fn() -> io::Result<Output> + Send + Sync>,
    seen: Mutex<Vec<(String, Vec<String>, String)>>,
}

impl ScriptedRunner {
    fn new(reply: impl Fn() -> io::Result<Output> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl CommandRunner for ScriptedRunner {
    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        self.seen.lock().unwrap().push((
            cmd.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
            stdin.to_string(),
        ));
        (self.reply)()
    }
}

fn output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        // raw wait status: exit code lives in the high byte
        status: ExitStatus::from_raw(code << 8),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

fn resolved() -> ResolvedConfig {
    let raw = RawInvocation {
        positional: vec!["https://example.com".into()],
        keywords: Some("a,b".into()),
        ..Default::default()
    };
    Resolver::new(PersistedConfig::default())
        .resolve(&raw)
        .unwrap()
}

#[test]
fn given_successful_engine_when_running_then_stdout_is_result_and_config_sent_as_json() {
    // Arrange
    let runner = ScriptedRunner::new(|| Ok(output(0, "found: a\n", "")));
    let engine = CommandEngine::new("node lane.js --quiet", runner.clone());

    // Act
    let result = engine.run(&resolved()).unwrap();

    // Assert
    assert_eq!(result.to_string(), "found: a");
    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (cmd, args, stdin) = &seen[0];
    assert_eq!(cmd, "node");
    assert_eq!(args, &["lane.js", "--quiet"]);
    let sent: Value = serde_json::from_str(stdin).unwrap();
    assert_eq!(sent, json!({"uri": "https://example.com", "keywords": ["a", "b"]}));
}

#[test]
fn given_engine_exits_non_zero_when_running_then_stderr_becomes_error() {
    let runner = ScriptedRunner::new(|| Ok(output(3, "", "fetch failed\n")));
    let engine = CommandEngine::new("lane-engine", runner);

    let err = engine.run(&resolved()).unwrap_err();

    match err {
        InfraError::Engine { program, message } => {
            assert_eq!(program, "lane-engine");
            assert_eq!(message, "fetch failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_engine_exits_non_zero_silently_when_running_then_status_reported() {
    let runner = ScriptedRunner::new(|| Ok(output(2, "", "")));
    let engine = CommandEngine::new("lane-engine", runner);

    let err = engine.run(&resolved()).unwrap_err();

    assert!(err.to_string().contains("exit status: 2"), "got: {err}");
}

#[test]
fn given_missing_program_when_running_then_engine_error() {
    let runner = ScriptedRunner::new(|| Err(io::Error::new(io::ErrorKind::NotFound, "not found")));
    let engine = CommandEngine::new("no-such-engine", runner);

    let err = engine.run(&resolved()).unwrap_err();

    assert!(matches!(err, InfraError::Engine { .. }));
    assert!(err.to_string().contains("no-such-engine"));
}

#[test]
fn given_blank_command_when_creating_then_default_program_used() {
    let runner = ScriptedRunner::new(|| Ok(output(0, "", "")));
    let engine = CommandEngine::new("   ", runner);

    assert_eq!(engine.program(), "lane-engine");
}
