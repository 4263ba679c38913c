use std::sync::Arc;
use std::time::Duration;

use cf_auth::{AuthBackend, AuthBridge, AuthState, HostedBackend, LogNavigator};
use cf_config::CodeflowConfig;

/// How long commands wait for a pushed session change to land in the bridge.
const PUSH_WAIT: Duration = Duration::from_secs(5);

/// Shared state for commands that talk to the backend.
///
/// Owns the one [`AuthBridge`] of the process. `hosted` is the same client the
/// bridge listens to, kept for the credential flows.
pub struct AppContext {
    pub config: CodeflowConfig,
    pub bridge: AuthBridge,
    hosted: Option<Arc<HostedBackend>>,
}

impl AppContext {
    pub fn new(config: CodeflowConfig) -> anyhow::Result<Self> {
        let mut hosted = None;
        let bridge = AuthBridge::from_config(
            &config.backend,
            &config.general,
            Arc::new(LogNavigator),
            |backend_config| {
                let client = HostedBackend::connect(backend_config)?;
                hosted = Some(Arc::clone(&client));
                Ok(client as Arc<dyn AuthBackend>)
            },
        )?;
        Ok(Self {
            config,
            bridge,
            hosted,
        })
    }

    /// The hosted client, or an error telling the user to configure one.
    pub fn hosted(&self) -> anyhow::Result<&HostedBackend> {
        self.hosted.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "backend is not configured; set CODEFLOW_BACKEND__URL and CODEFLOW_BACKEND__ANON_KEY (see `cflow setup`)"
            )
        })
    }

    /// Start the bridge and wait for the first session resolution.
    pub async fn load_session(&self) -> anyhow::Result<AuthState> {
        self.bridge.start().await;
        Ok(self.bridge.loaded().await?)
    }

    /// Wait until the bridge state satisfies `done`, giving up after a few seconds.
    ///
    /// Returns the last observed state either way.
    pub async fn wait_for_state(
        &self,
        done: impl FnMut(&AuthState) -> bool,
    ) -> anyhow::Result<AuthState> {
        let mut receiver = self.bridge.subscribe()?;
        match tokio::time::timeout(PUSH_WAIT, receiver.wait_for(done)).await {
            Ok(Ok(state)) => Ok(state.clone()),
            Ok(Err(_)) => anyhow::bail!("auth state store closed"),
            Err(_) => {
                tracing::debug!("timed out waiting for auth state");
                Ok(self.bridge.state()?)
            }
        }
    }
}
