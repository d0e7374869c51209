//! Host discovery: probe candidates until one answers, then select.

use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;

use crate::broker::{dedup_preserving_order, ConnectionType, NodeRecord, QueueRecord};
use crate::config::{ProbeStrategy, SelectorConfig};
use crate::discovery::gate::SuccessGate;
use crate::discovery::{DiscoveryError, DiscoveryResult};
use crate::load_balancer::random::RandomSource;
use crate::load_balancer::{self, SeededRandom, Selection, ThreadRandom};
use crate::management::{HttpManagementClient, ManagementApi, ManagementError};
use crate::observability::metrics;
use crate::store::{FileHostStore, HostStore};

/// Cluster view returned by one host.
type ClusterView = (Vec<QueueRecord>, Vec<NodeRecord>);

/// Picks the least loaded broker by asking candidate hosts for cluster state.
#[derive(Clone)]
pub struct Discovery {
    api: Arc<dyn ManagementApi>,
    store: Arc<dyn HostStore>,
    rng: Arc<dyn RandomSource>,
    strategy: ProbeStrategy,
}

impl Discovery {
    /// Create a discovery with sequential probing and the thread RNG.
    pub fn new(api: Arc<dyn ManagementApi>, store: Arc<dyn HostStore>) -> Self {
        Self {
            api,
            store,
            rng: Arc::new(ThreadRandom),
            strategy: ProbeStrategy::Sequential,
        }
    }

    /// Build the HTTP client and file store described by `config`.
    ///
    /// Management credentials from the environment override `config`.
    pub async fn from_config(config: &SelectorConfig) -> DiscoveryResult<Self> {
        let config = config.clone().with_env_overrides();
        let api = HttpManagementClient::new(config.management.clone(), &config.timeouts)
            .map_err(DiscoveryError::Client)?;
        let store = FileHostStore::from_config(&config.store).await?;

        let mut discovery = Self::new(Arc::new(api), Arc::new(store)).with_strategy(config.discovery.strategy);
        if let Some(seed) = config.discovery.seed {
            discovery = discovery.with_random(Arc::new(SeededRandom::new(seed)));
        }

        tracing::info!(
            strategy = ?config.discovery.strategy,
            store = %config.store.path,
            port = config.management.port,
            "Broker discovery initialized"
        );

        Ok(discovery)
    }

    pub fn with_strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// Callback entry point.
    ///
    /// `on_success` receives the selected hostname, `on_failure` the error
    /// once every candidate has failed. Exactly one of them runs, once.
    pub async fn select_host<S, F>(&self, configured: &[String], kind: ConnectionType, on_success: S, on_failure: F)
    where
        S: FnOnce(String),
        F: FnOnce(DiscoveryError),
    {
        match self.discover(configured, kind).await {
            Ok(selection) => on_success(selection.host),
            Err(e) => on_failure(e),
        }
    }

    /// Probe candidates and select a broker host.
    ///
    /// Candidates are the remembered hosts followed by `configured`, without
    /// duplicates. The first host answering both API calls decides the
    /// selection; its live node list replaces the remembered hosts.
    pub async fn discover(&self, configured: &[String], kind: ConnectionType) -> DiscoveryResult<Selection> {
        if configured.is_empty() {
            return Err(DiscoveryError::NoHosts);
        }

        let remembered = self.load_remembered().await;
        let candidates = dedup_preserving_order(remembered.into_iter().chain(configured.iter().cloned()));

        tracing::debug!(
            candidates = candidates.len(),
            strategy = ?self.strategy,
            connection_type = %kind,
            "Starting broker discovery"
        );

        let outcome = match self.strategy {
            ProbeStrategy::Sequential => self.probe_sequential(&candidates).await,
            ProbeStrategy::Concurrent => self.probe_concurrent(&candidates).await,
        };

        let (source, (queues, nodes)) = match outcome {
            Ok(found) => found,
            Err(last) => {
                metrics::record_discovery_failure();
                let reason = last.as_ref().map(ToString::to_string).unwrap_or_default();
                tracing::error!(
                    attempted = candidates.len(),
                    error = %reason,
                    "No broker management API reachable"
                );
                return Err(DiscoveryError::AllHostsExhausted {
                    attempted: candidates.len(),
                    last,
                });
            }
        };

        let selection = load_balancer::select(configured, &queues, &nodes, kind, self.rng.as_ref())
            .ok_or(DiscoveryError::NoHosts)?;

        if !selection.live_hosts.is_empty() {
            self.remember(&selection.live_hosts).await;
        }

        metrics::record_selection(selection.tier, kind);
        tracing::info!(
            host = %selection.host,
            tier = selection.tier.as_str(),
            source = %source,
            queues = queues.len(),
            nodes = nodes.len(),
            connection_type = %kind,
            "Selected broker"
        );

        Ok(selection)
    }

    /// Ask one host for queues, then nodes.
    async fn probe(&self, host: &str) -> Result<ClusterView, ManagementError> {
        let result = async {
            let queues = self.api.list_queues(host).await?;
            let nodes = self.api.list_nodes(host).await?;
            Ok::<_, ManagementError>((queues, nodes))
        }
        .await;

        match &result {
            Ok((queues, nodes)) => {
                tracing::debug!(host = %host, queues = queues.len(), nodes = nodes.len(), "Probe succeeded");
            }
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Probe failed, trying next host");
            }
        }
        metrics::record_probe(result.is_ok());
        result
    }

    async fn probe_sequential(&self, candidates: &[String]) -> Result<(String, ClusterView), Option<ManagementError>> {
        let mut last = None;
        for host in candidates {
            match self.probe(host).await {
                Ok(view) => return Ok((host.clone(), view)),
                Err(e) => last = Some(e),
            }
        }
        Err(last)
    }

    /// Probe all hosts at once.
    ///
    /// A successful probe must claim the gate to become the winner; any
    /// other success is discarded. The rest of the probes are dropped.
    async fn probe_concurrent(&self, candidates: &[String]) -> Result<(String, ClusterView), Option<ManagementError>> {
        let gate = SuccessGate::new();
        let gate = &gate;
        let mut probes: FuturesUnordered<_> = candidates
            .iter()
            .map(|host| async move {
                let outcome = match self.probe(host).await {
                    Ok(view) if gate.try_claim() => Some(Ok(view)),
                    Ok(_) => {
                        tracing::debug!(host = %host, "Discarding probe result, another host already won");
                        None
                    }
                    Err(e) => Some(Err(e)),
                };
                (host, outcome)
            })
            .collect();

        let mut last = None;
        while let Some((host, outcome)) = probes.next().await {
            match outcome {
                Some(Ok(view)) => return Ok((host.clone(), view)),
                Some(Err(e)) => last = Some(e),
                None => {}
            }
        }
        Err(last)
    }

    async fn load_remembered(&self) -> Vec<String> {
        match self.store.load().await {
            Ok(hosts) => hosts,
            Err(e) => {
                metrics::record_store_error("load");
                tracing::warn!(error = %e, "Could not load remembered hosts, using configured hosts only");
                Vec::new()
            }
        }
    }

    async fn remember(&self, hosts: &[String]) {
        if let Err(e) = self.store.save(hosts).await {
            metrics::record_store_error("save");
            tracing::warn!(error = %e, "Could not persist live broker hosts");
        }
    }
}

impl std::fmt::Debug for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery")
            .field("strategy", &self.strategy)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}
