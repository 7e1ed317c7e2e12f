//! Native bridge gateway: lifecycle of the embedded control agent.
//!
//! The host (FFI shell or the standalone binary) hands the gateway a config
//! file path; the gateway runs the agent on a dedicated worker thread with
//! its own tokio runtime and owns the shutdown contract: a watch channel
//! feeds axum's graceful shutdown and `stop` joins the worker. In-flight
//! command dispatches are never aborted, only new ones are prevented.
//!
//! At most one agent instance runs per process. `start` while one is running
//! is rejected with an "already running" status; `stop` with none running
//! returns a neutral status, so both calls are safe to repeat.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::api::{create_router, AppState};
use crate::automation::{CommandBridge, HandleRegistry};
use crate::config::Config;
use crate::error::AgentError;

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

struct RunningAgent {
    addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    worker: thread::JoinHandle<()>,
}

pub struct AgentGateway {
    registry: Arc<HandleRegistry>,
    slot: Mutex<Option<RunningAgent>>,
}

impl Default for AgentGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentGateway {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(HandleRegistry::new()),
            slot: Mutex::new(None),
        }
    }

    /// Process-wide instance for FFI callers.
    pub fn global() -> &'static AgentGateway {
        static GATEWAY: OnceLock<AgentGateway> = OnceLock::new();
        GATEWAY.get_or_init(AgentGateway::new)
    }

    /// Registry the platform layer registers its automation driver with.
    pub fn registry(&self) -> Arc<HandleRegistry> {
        Arc::clone(&self.registry)
    }

    /// Address the running agent is bound to, if any.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|agent| agent.addr)
    }

    /// Start the embedded agent bound to the configuration at `config_path`.
    /// Returns once the agent has bound its listener (or failed to).
    pub fn start(&self, config_path: &Path) -> String {
        match self.start_inner(config_path) {
            Ok(addr) => format!("agent started on {addr}"),
            Err(AgentError::AlreadyRunning) => "agent already running".to_string(),
            Err(e) => format!("agent failed to start: {e}"),
        }
    }

    fn start_inner(&self, config_path: &Path) -> crate::error::Result<SocketAddr> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            return Err(AgentError::AlreadyRunning);
        }

        let config = Config::load(config_path)?;

        let bridge = CommandBridge::new(self.registry());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (ready_tx, ready_rx) = mpsc::channel::<Result<SocketAddr, String>>();

        let worker = thread::Builder::new()
            .name("tapbridge-agent".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("runtime init failed: {e}")));
                        return;
                    }
                };
                runtime.block_on(run_agent(config, bridge, shutdown_rx, ready_tx));
            });

        let worker = worker?;

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(addr)) => {
                tracing::info!("embedded agent started on {addr}");
                *slot = Some(RunningAgent {
                    addr,
                    shutdown: shutdown_tx,
                    worker,
                });
                Ok(addr)
            }
            Ok(Err(e)) => {
                let _ = worker.join();
                Err(AgentError::Internal(anyhow::anyhow!(e)))
            }
            Err(_) => Err(AgentError::Internal(anyhow::anyhow!(
                "startup timed out"
            ))),
        }
    }

    /// Request graceful shutdown and join the worker. Idempotent: with no
    /// agent running this returns a neutral status rather than failing.
    pub fn stop(&self) -> String {
        match self.stop_inner() {
            Ok(()) => "agent stopped".to_string(),
            Err(AgentError::NotRunning) => "agent not running".to_string(),
            Err(e) => format!("agent stop failed: {e}"),
        }
    }

    fn stop_inner(&self) -> crate::error::Result<()> {
        let agent = self.slot.lock().unwrap_or_else(|e| e.into_inner()).take();
        let agent = agent.ok_or(AgentError::NotRunning)?;

        let _ = agent.shutdown.send(true);
        if agent.worker.join().is_err() {
            tracing::warn!("agent worker panicked during shutdown");
        }
        tracing::info!("embedded agent stopped");
        Ok(())
    }
}

async fn run_agent(
    config: Config,
    bridge: CommandBridge,
    mut shutdown_rx: watch::Receiver<bool>,
    ready_tx: mpsc::Sender<Result<SocketAddr, String>>,
) {
    let state = Arc::new(AppState::new(bridge, config.clone()));
    let app = create_router(state);

    let listener = match TcpListener::bind((config.host.as_str(), config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("bind {}:{} failed: {e}", config.host, config.port)));
            return;
        }
    };

    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(e) => {
            let _ = ready_tx.send(Err(e.to_string()));
            return;
        }
    };
    let _ = ready_tx.send(Ok(addr));

    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        // Closed sender also counts as a shutdown request
        let _ = shutdown_rx.changed().await;
    });

    if let Err(e) = serve.await {
        tracing::error!("embedded agent exited with error: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_agent_is_neutral_and_repeatable() {
        let gateway = AgentGateway::new();
        assert_eq!(gateway.stop(), "agent not running");
        assert_eq!(gateway.stop(), "agent not running");
        assert!(gateway.local_addr().is_none());
    }
}
