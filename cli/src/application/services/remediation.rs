//! Application service — restart a container and verify it comes back.
//!
//! One call to [`Remediator::remediate`] performs exactly one restart and then
//! polls the container's status with exponential backoff until it is
//! `running`, stops again, or the polling budget runs out. Every path ends in
//! a single [`RemediationOutcome`]; no error escapes, and a malformed id
//! is a `not_found` failure reported without contacting the runtime.

use autodock_common::ContainerStatus;
use tracing::{debug, info, warn};

use crate::application::ports::{
    ContainerRuntime, ProgressReporter, RuntimeConnector, SilentReporter, Sleeper,
};
use crate::application::services::release;
use crate::domain::container::validate_container_id;
use crate::domain::error::RuntimeError;
use crate::domain::remediation::{BackoffPolicy, BackoffState, FailureKind, RemediationOutcome};

/// Restart-and-verify engine.
pub struct Remediator<C, S> {
    connector: C,
    sleeper: S,
    policy: BackoffPolicy,
}

impl<C: RuntimeConnector, S: Sleeper> Remediator<C, S> {
    pub fn new(connector: C, sleeper: S) -> Self {
        Self {
            connector,
            sleeper,
            policy: BackoffPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Restart `id` and report how it came back.
    pub async fn remediate(&self, id: &str) -> RemediationOutcome {
        self.remediate_with_progress(id, &SilentReporter).await
    }

    /// Like [`remediate`](Self::remediate), emitting progress along the way.
    pub async fn remediate_with_progress(
        &self,
        id: &str,
        reporter: &impl ProgressReporter,
    ) -> RemediationOutcome {
        if let Err(err) = validate_container_id(id) {
            warn!(container = id, error = %err, "rejected container id");
            return RemediationOutcome::failure(FailureKind::NotFound, err.to_string());
        }

        let session = match self.connector.connect().await {
            Ok(session) => session,
            Err(err) => {
                warn!(container = id, error = %err, "runtime connection failed");
                return RemediationOutcome::failure(FailureKind::Connection, err.to_string());
            }
        };

        let outcome = self.restart_and_verify(&session, id, reporter).await;
        release(session, id).await;

        match &outcome {
            RemediationOutcome::Success { name } => {
                info!(container = id, name = %name, "container restarted and running");
            }
            RemediationOutcome::Degraded { status } => {
                warn!(container = id, status = %status, "container stopped after restart");
            }
            RemediationOutcome::TimedOut {
                status,
                elapsed_secs,
                ..
            } => {
                warn!(container = id, status = %status, elapsed_secs, "restart verification timed out");
            }
            RemediationOutcome::Failure { kind, reason } => {
                warn!(container = id, kind = ?kind, reason = %reason, "remediation failed");
            }
        }
        outcome
    }

    async fn restart_and_verify(
        &self,
        runtime: &C::Session,
        id: &str,
        reporter: &impl ProgressReporter,
    ) -> RemediationOutcome {
        let details = match runtime.inspect(id).await {
            Ok(details) => details,
            Err(err @ RuntimeError::NotFound(_)) => {
                return RemediationOutcome::failure(FailureKind::NotFound, err.to_string());
            }
            Err(err) => {
                return RemediationOutcome::failure(FailureKind::Connection, err.to_string());
            }
        };

        reporter.step(&format!("Restarting '{}'...", details.name));
        info!(
            container = id,
            name = %details.name,
            grace_secs = self.policy.restart_grace.as_secs(),
            "issuing restart"
        );
        match runtime.restart(id, self.policy.restart_grace).await {
            Ok(()) => {}
            Err(err @ RuntimeError::NotFound(_)) => {
                return RemediationOutcome::failure(FailureKind::NotFound, err.to_string());
            }
            Err(err) => {
                return RemediationOutcome::failure(
                    FailureKind::Mutation,
                    format!("Restart request failed: {err}"),
                );
            }
        }

        self.await_stable(runtime, id, details.name, reporter).await
    }

    async fn await_stable(
        &self,
        runtime: &C::Session,
        id: &str,
        name: String,
        reporter: &impl ProgressReporter,
    ) -> RemediationOutcome {
        let mut backoff = BackoffState::new(self.policy);
        loop {
            self.sleeper.sleep(backoff.interval()).await;
            backoff.record_wait();

            let status = match runtime.status(id).await {
                Ok(status) => status,
                Err(err) => {
                    return RemediationOutcome::failure(
                        FailureKind::Verification,
                        format!("Unable to verify container status after restart: {err}"),
                    );
                }
            };
            debug!(
                container = id,
                status = %status,
                interval_ms = backoff.interval().as_millis(),
                elapsed_ms = backoff.elapsed().as_millis(),
                "polled container status"
            );

            if status == ContainerStatus::Running {
                reporter.success(&format!("'{name}' is running"));
                return RemediationOutcome::Success { name };
            }
            if status.is_stopped() {
                reporter.warn(&format!("'{name}' is {status}"));
                return RemediationOutcome::Degraded { status };
            }
            if backoff.is_exhausted() {
                reporter.warn(&format!("'{name}' still {status}"));
                return RemediationOutcome::TimedOut {
                    status,
                    elapsed_secs: backoff.elapsed().as_secs_f64(),
                    budget_secs: backoff.budget().as_secs_f64(),
                };
            }

            reporter.step(&format!(
                "'{name}' is {status} after {:.1}s, waiting...",
                backoff.elapsed().as_secs_f64()
            ));
            backoff.advance();
        }
    }
}
