//! Shared mock infrastructure for unit tests.
//!
//! [`ScriptedConnector`] hands out sessions that answer from a fixed script
//! and record every call, so tests can assert both the outcome and exactly
//! which runtime operations happened.

#![allow(clippy::expect_used, dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use autodock_cli::application::ports::{
    ConfigStore, ContainerRuntime, ProgressReporter, RuntimeConnector, Sleeper,
};
use autodock_cli::domain::config::AutodockConfig;
use autodock_cli::domain::error::RuntimeError;
use autodock_common::{ContainerDetails, ContainerStatus};

// ── Call record ───────────────────────────────────────────────────────────────

/// Every runtime call a test can observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calls {
    pub connects: usize,
    pub inspects: Vec<String>,
    pub restarts: Vec<(String, Duration)>,
    pub polls: usize,
    pub logs: Vec<(String, usize)>,
    pub closes: usize,
}

// ── Script ────────────────────────────────────────────────────────────────────

struct Script {
    connect: Result<(), RuntimeError>,
    inspect: Result<ContainerDetails, RuntimeError>,
    restart: Result<(), RuntimeError>,
    /// Answers to `status`, in order. The last one repeats forever.
    statuses: Mutex<VecDeque<Result<ContainerStatus, RuntimeError>>>,
    logs: Result<Vec<u8>, RuntimeError>,
    close: Result<(), RuntimeError>,
    calls: Mutex<Calls>,
}

pub fn details(name: &str, status: ContainerStatus) -> ContainerDetails {
    ContainerDetails {
        id: "4f1c2d3e5a6b".to_string(),
        name: name.to_string(),
        status,
        health_check: "not_configured".to_string(),
        started_at: None,
    }
}

/// Builder for a scripted runtime. Clones share the same script and call record.
#[derive(Clone)]
pub struct ScriptedConnector {
    script: Arc<Script>,
}

pub struct ScriptBuilder {
    connect: Result<(), RuntimeError>,
    inspect: Result<ContainerDetails, RuntimeError>,
    restart: Result<(), RuntimeError>,
    statuses: Vec<Result<ContainerStatus, RuntimeError>>,
    logs: Result<Vec<u8>, RuntimeError>,
    close: Result<(), RuntimeError>,
}

impl ScriptBuilder {
    pub fn connect_error(mut self, err: RuntimeError) -> Self {
        self.connect = Err(err);
        self
    }

    pub fn inspect_error(mut self, err: RuntimeError) -> Self {
        self.inspect = Err(err);
        self
    }

    pub fn restart_error(mut self, err: RuntimeError) -> Self {
        self.restart = Err(err);
        self
    }

    pub fn statuses(mut self, statuses: &[ContainerStatus]) -> Self {
        self.statuses = statuses.iter().copied().map(Ok).collect();
        self
    }

    /// Answer `status` with `before` for each entry, then fail with `err`.
    pub fn status_error_after(mut self, before: &[ContainerStatus], err: RuntimeError) -> Self {
        self.statuses = before.iter().copied().map(Ok).collect();
        self.statuses.push(Err(err));
        self
    }

    pub fn logs(mut self, bytes: &[u8]) -> Self {
        self.logs = Ok(bytes.to_vec());
        self
    }

    pub fn logs_error(mut self, err: RuntimeError) -> Self {
        self.logs = Err(err);
        self
    }

    pub fn close_error(mut self, err: RuntimeError) -> Self {
        self.close = Err(err);
        self
    }

    pub fn build(self) -> ScriptedConnector {
        ScriptedConnector {
            script: Arc::new(Script {
                connect: self.connect,
                inspect: self.inspect,
                restart: self.restart,
                statuses: Mutex::new(self.statuses.into()),
                logs: self.logs,
                close: self.close,
                calls: Mutex::new(Calls::default()),
            }),
        }
    }
}

impl ScriptedConnector {
    /// A container named `web` that comes back `running` on the first poll.
    pub fn builder() -> ScriptBuilder {
        ScriptBuilder {
            connect: Ok(()),
            inspect: Ok(details("web", ContainerStatus::Running)),
            restart: Ok(()),
            statuses: vec![Ok(ContainerStatus::Running)],
            logs: Ok(Vec::new()),
            close: Ok(()),
        }
    }

    pub fn calls(&self) -> Calls {
        self.script.calls.lock().expect("calls lock").clone()
    }
}

impl RuntimeConnector for ScriptedConnector {
    type Session = ScriptedSession;

    async fn connect(&self) -> Result<ScriptedSession, RuntimeError> {
        self.script.calls.lock().expect("calls lock").connects += 1;
        self.script.connect.clone()?;
        Ok(ScriptedSession {
            script: Arc::clone(&self.script),
        })
    }
}

pub struct ScriptedSession {
    script: Arc<Script>,
}

impl ScriptedSession {
    fn record(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.script.calls.lock().expect("calls lock"));
    }
}

impl ContainerRuntime for ScriptedSession {
    async fn inspect(&self, id: &str) -> Result<ContainerDetails, RuntimeError> {
        self.record(|c| c.inspects.push(id.to_string()));
        self.script.inspect.clone()
    }

    async fn restart(&self, id: &str, grace: Duration) -> Result<(), RuntimeError> {
        self.record(|c| c.restarts.push((id.to_string(), grace)));
        self.script.restart.clone()
    }

    async fn status(&self, _id: &str) -> Result<ContainerStatus, RuntimeError> {
        self.record(|c| c.polls += 1);
        let mut statuses = self.script.statuses.lock().expect("statuses lock");
        if statuses.len() > 1 {
            statuses.pop_front().expect("non-empty")
        } else {
            statuses
                .front()
                .cloned()
                .unwrap_or(Ok(ContainerStatus::Unknown))
        }
    }

    async fn logs(&self, id: &str, tail: usize) -> Result<Vec<u8>, RuntimeError> {
        self.record(|c| c.logs.push((id.to_string(), tail)));
        self.script.logs.clone()
    }

    async fn close(self) -> Result<(), RuntimeError> {
        self.record(|c| c.closes += 1);
        self.script.close.clone()
    }
}

// ── Mock: recording sleeper ───────────────────────────────────────────────────

/// Returns immediately and records every requested wait.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("sleeps lock").clone()
    }

    pub fn total(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("sleeps lock").push(duration);
    }
}

// ── Mock: recording progress reporter ────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.lock().expect("events lock").push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events.lock().expect("events lock").push(format!("warn: {message}"));
    }
}

// ── Mock: in-memory config store ─────────────────────────────────────────────

pub struct MemoryConfigStore {
    pub config: Mutex<AutodockConfig>,
    pub saves: Mutex<u32>,
}

impl MemoryConfigStore {
    pub fn new(config: AutodockConfig) -> Self {
        Self {
            config: Mutex::new(config),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> u32 {
        *self.saves.lock().expect("saves lock")
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> anyhow::Result<AutodockConfig> {
        Ok(self.config.lock().expect("config lock").clone())
    }

    fn save(&self, config: &AutodockConfig) -> anyhow::Result<()> {
        *self.config.lock().expect("config lock") = config.clone();
        *self.saves.lock().expect("saves lock") += 1;
        Ok(())
    }

    fn path(&self) -> anyhow::Result<std::path::PathBuf> {
        Ok(std::path::PathBuf::from("/tmp/autodock-test/config.yaml"))
    }
}
