//! Subcommand implementations and the state they share.

pub mod session;
pub mod transactions;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use zork_core::{
    ApiClient, Config, FileJar, Policy, RecordingNavigator, SessionBootstrap, SessionSnapshot,
    SessionStore, UserProfile,
};

/// Everything a subcommand needs: config, API client, and the cookie jar
pub struct Context {
    pub config: Config,
    pub api: ApiClient,
    pub store: SessionStore,
}

impl Context {
    /// Flags and env vars win over the config file
    pub fn open(api_url: Option<String>, jar_dir: PathBuf) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        Self::with_config(config, jar_dir)
    }

    pub fn with_config(config: Config, jar_dir: PathBuf) -> Result<Self> {
        let jar = FileJar::open(jar_dir)?;
        let api = ApiClient::new(&config.api_base_url)?;

        Ok(Self {
            config,
            api,
            store: SessionStore::new(Arc::new(jar)),
        })
    }

    pub fn bootstrap(&self, policy: Policy) -> (SessionBootstrap, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::new());
        let bootstrap = SessionBootstrap::new(
            self.store.clone(),
            Arc::new(self.api.clone()),
            navigator.clone(),
            policy,
        );
        (bootstrap, navigator)
    }

    /// Evaluate the session once, reporting where the bootstrap wanted to go
    pub async fn evaluate(&self, policy: Policy) -> Result<Evaluation> {
        let (bootstrap, navigator) = self.bootstrap(policy);
        let snapshot = bootstrap.evaluate().await?;
        Ok(Evaluation {
            snapshot,
            navigated_to: navigator.last(),
        })
    }

    /// Evaluate with the dashboard's default policy and insist on a signed-in user
    pub async fn require_user(&self) -> Result<(String, UserProfile)> {
        let evaluation = self
            .evaluate(Policy::redirect_if_missing(&self.config.login_path))
            .await?;

        if evaluation.navigated_to.as_deref() == Some(self.config.login_path.as_str()) {
            anyhow::bail!("Not signed in. Run `zork login` first.");
        }

        match (evaluation.snapshot.credential, evaluation.snapshot.profile) {
            (Some(credential), Some(profile)) => Ok((credential, profile)),
            _ => anyhow::bail!("Session changed while loading your profile, try again."),
        }
    }
}

pub struct Evaluation {
    pub snapshot: SessionSnapshot,
    pub navigated_to: Option<String>,
}
