//! Docker Engine implementation of the container runtime ports, via `bollard`.

use std::time::Duration;

use autodock_common::{
    ContainerDetails, ContainerStatus, display_name, health_or_default, parse_started_at, short_id,
};
use bollard::container::{
    InspectContainerOptions, LogOutput, LogsOptions, RestartContainerOptions,
};
use bollard::errors::Error as DockerError;
use bollard::models::ContainerInspectResponse;
use bollard::{API_DEFAULT_VERSION, Docker};
use futures_util::TryStreamExt as _;
use tracing::debug;

use crate::application::ports::{ContainerRuntime, RuntimeConnector};
use crate::domain::config::DockerConfig;
use crate::domain::error::RuntimeError;

/// Opens a fresh, pinged Docker client per session.
#[derive(Debug, Clone)]
pub struct DockerConnector {
    host: Option<String>,
    timeout: Duration,
}

impl DockerConnector {
    #[must_use]
    pub fn new(config: &DockerConfig) -> Self {
        Self {
            host: config.host.clone(),
            timeout: config.timeout(),
        }
    }

    fn client(&self) -> Result<Docker, DockerError> {
        let timeout_secs = self.timeout.as_secs();
        let docker = match self.host.as_deref() {
            None => Docker::connect_with_local_defaults()?,
            Some(host) if host.starts_with("unix://") => {
                Docker::connect_with_socket(host, timeout_secs, API_DEFAULT_VERSION)?
            }
            Some(host) => Docker::connect_with_http(host, timeout_secs, API_DEFAULT_VERSION)?,
        };
        Ok(docker.with_timeout(self.timeout))
    }
}

impl RuntimeConnector for DockerConnector {
    type Session = DockerSession;

    async fn connect(&self) -> Result<DockerSession, RuntimeError> {
        let docker = self
            .client()
            .map_err(|e| RuntimeError::Unreachable(e.to_string()))?;
        docker
            .ping()
            .await
            .map_err(|e| RuntimeError::Unreachable(e.to_string()))?;
        debug!(host = self.host.as_deref().unwrap_or("local"), "docker session opened");
        Ok(DockerSession { docker })
    }
}

/// A pinged Docker client scoped to one use-case.
pub struct DockerSession {
    docker: Docker,
}

impl DockerSession {
    async fn inspect_raw(&self, id: &str) -> Result<ContainerInspectResponse, RuntimeError> {
        self.docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| classify(id, e))
    }
}

impl ContainerRuntime for DockerSession {
    async fn inspect(&self, id: &str) -> Result<ContainerDetails, RuntimeError> {
        let response = self.inspect_raw(id).await?;
        Ok(details_from_inspect(id, &response))
    }

    async fn restart(&self, id: &str, grace: Duration) -> Result<(), RuntimeError> {
        let t = isize::try_from(grace.as_secs()).unwrap_or(isize::MAX);
        self.docker
            .restart_container(id, Some(RestartContainerOptions { t }))
            .await
            .map_err(|e| classify(id, e))
    }

    async fn status(&self, id: &str) -> Result<ContainerStatus, RuntimeError> {
        let response = self.inspect_raw(id).await?;
        Ok(status_of(&response))
    }

    async fn logs(&self, id: &str, tail: usize) -> Result<Vec<u8>, RuntimeError> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            tail: tail.to_string(),
            ..Default::default()
        };
        let chunks: Vec<LogOutput> = self
            .docker
            .logs(id, Some(options))
            .try_collect()
            .await
            .map_err(|e| classify(id, e))?;
        Ok(chunks.into_iter().flat_map(LogOutput::into_bytes).collect())
    }

    async fn close(self) -> Result<(), RuntimeError> {
        drop(self.docker);
        debug!("docker session closed");
        Ok(())
    }
}

/// Map a bollard error to the runtime taxonomy. Only a 404 means "no such container".
fn classify(id: &str, err: DockerError) -> RuntimeError {
    match err {
        DockerError::DockerResponseServerError {
            status_code: 404, ..
        } => RuntimeError::NotFound(id.to_string()),
        other => RuntimeError::Api(other.to_string()),
    }
}

fn status_of(response: &ContainerInspectResponse) -> ContainerStatus {
    response
        .state
        .as_ref()
        .and_then(|state| state.status.as_ref())
        .map_or(ContainerStatus::Unknown, |status| {
            ContainerStatus::from(status.to_string().as_str())
        })
}

fn details_from_inspect(requested: &str, response: &ContainerInspectResponse) -> ContainerDetails {
    let state = response.state.as_ref();
    let health = state
        .and_then(|s| s.health.as_ref())
        .and_then(|h| h.status.as_ref())
        .map(ToString::to_string);
    ContainerDetails {
        id: short_id(response.id.as_deref().unwrap_or(requested)),
        name: response
            .name
            .as_deref()
            .map_or_else(|| requested.to_string(), display_name),
        status: status_of(response),
        health_check: health_or_default(health.as_deref()),
        started_at: state
            .and_then(|s| s.started_at.as_deref())
            .and_then(parse_started_at),
    }
}
