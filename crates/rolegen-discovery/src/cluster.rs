//! Live discovery against a Kubernetes API server.
//!
//! `kube` is async; `ClusterDiscovery` owns a current-thread Tokio runtime and
//! blocks on it, so the rest of the pipeline stays synchronous.

use std::path::{Path, PathBuf};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use rolegen_contracts::{
    discovery::{ApiResource, ApiResourceList},
    error::{RolegenError, RolegenResult},
};
use rolegen_core::traits::DiscoveryProvider;

/// How to reach the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterConnection {
    /// Service-account credentials mounted into the pod.
    InCluster,
    /// A kubeconfig file on disk, using its current context.
    Kubeconfig(PathBuf),
}

/// `DiscoveryProvider` backed by a live API server.
pub struct ClusterDiscovery {
    runtime: Runtime,
    client: Client,
}

impl ClusterDiscovery {
    /// Build a client for `connection`.
    ///
    /// Returns `ConnectionError` if the configuration cannot be loaded or the
    /// client cannot be created. No request is sent yet.
    pub fn connect(connection: &ClusterConnection) -> RolegenResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RolegenError::ConnectionError {
                reason: format!("failed to start async runtime: {}", e),
            })?;

        let config = match connection {
            ClusterConnection::InCluster => {
                Config::incluster().map_err(|e| RolegenError::ConnectionError {
                    reason: format!("unable to load in-cluster config: {}", e),
                })?
            }
            ClusterConnection::Kubeconfig(path) => runtime.block_on(load_kubeconfig(path))?,
        };

        info!(cluster_url = %config.cluster_url, "cluster configuration loaded");

        let client = {
            // Client construction spawns onto the ambient runtime.
            let _guard = runtime.enter();
            Client::try_from(config).map_err(|e| RolegenError::ConnectionError {
                reason: format!("unable to create a client: {}", e),
            })?
        };

        Ok(Self { runtime, client })
    }

    async fn fetch(&self) -> kube::Result<Vec<APIResourceList>> {
        let mut lists = Vec::new();

        let core = self.client.list_core_api_versions().await?;
        for version in &core.versions {
            debug!(group_version = %version, "listing core resources");
            lists.push(self.client.list_core_api_resources(version).await?);
        }

        let groups = self.client.list_api_groups().await?;
        for group in &groups.groups {
            for version in &group.versions {
                debug!(group_version = %version.group_version, "listing group resources");
                lists.push(
                    self.client
                        .list_api_group_resources(&version.group_version)
                        .await?,
                );
            }
        }

        Ok(lists)
    }
}

impl DiscoveryProvider for ClusterDiscovery {
    fn server_resources(&self) -> RolegenResult<Vec<ApiResourceList>> {
        let lists = self
            .runtime
            .block_on(self.fetch())
            .map_err(|e| RolegenError::DiscoveryError {
                reason: format!("error during server resource discovery: {}", e),
            })?;

        Ok(lists.into_iter().map(from_api).collect())
    }
}

async fn load_kubeconfig(path: &Path) -> RolegenResult<Config> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| RolegenError::ConnectionError {
        reason: format!("unable to load kubeconfig from {}: {}", path.display(), e),
    })?;

    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| RolegenError::ConnectionError {
            reason: format!("unable to load kubeconfig from {}: {}", path.display(), e),
        })
}

/// Convert the wire type into the contract type, keeping only name and verbs.
pub fn from_api(list: APIResourceList) -> ApiResourceList {
    ApiResourceList {
        group_version: list.group_version,
        resources: list
            .resources
            .into_iter()
            .map(|r| ApiResource {
                name: r.name,
                verbs: r.verbs,
            })
            .collect(),
    }
}
