//! rolegen — least-privilege ClusterRole generator
//!
//! Discovers every resource the API server exposes, groups resources that
//! share an API group and verb set into one rule each, and writes the result
//! as a ClusterRole. With a restriction file, the resources it names are left
//! out of discovery and its rules are merged back on top.
//!
//! Usage:
//!   rolegen --in-cluster-mode=false --kubeconfig ~/.kube/config
//!   RESTRICTIONS=restrictions.yaml rolegen --name my-role
//!   rolegen --discovery-file discovery.json -v

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rolegen_contracts::{error::RolegenResult, role::DEFAULT_ROLE_NAME};
use rolegen_core::{
    traits::{DiscoveryProvider, RoleSink},
    Generator, GeneratorConfig,
};
use rolegen_discovery::{ClusterConnection, ClusterDiscovery, SnapshotDiscovery};
use rolegen_merge::{load_restrictions, AppendMerger};
use rolegen_output::FileRoleSink;
use rolegen_rules::DiscoveryAggregator;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Generate a least-privilege ClusterRole from the cluster's API discovery.
#[derive(Debug, Parser)]
#[command(
    name = "rolegen",
    about = "Generate a least-privilege ClusterRole from API discovery",
    long_about = "Discovers every API resource the cluster exposes, groups resources by\n\
                  API group and verb set, and writes a ClusterRole. A restriction file\n\
                  removes the resources it names and merges its own rules back in."
)]
struct Cli {
    /// Name of the generated ClusterRole.
    #[arg(long, default_value = DEFAULT_ROLE_NAME)]
    name: String,

    /// Enable verbose logging of every discovered group and resource.
    #[arg(short, long)]
    verbose: bool,

    /// Path to the kubeconfig file (defaults to ~/.kube/config).
    #[arg(long, alias = "kubeConfig")]
    kubeconfig: Option<PathBuf>,

    /// Use the in-cluster service account; set to false to use --kubeconfig.
    #[arg(
        long,
        alias = "inClusterMode",
        default_value_t = true,
        action = ArgAction::Set
    )]
    in_cluster_mode: bool,

    /// Restriction file (YAML, JSON or TOML) to exclude and merge.
    #[arg(long, env = "RESTRICTIONS")]
    restrictions: Option<PathBuf>,

    /// Read discovery data from a saved snapshot instead of a cluster.
    #[arg(long)]
    discovery_file: Option<PathBuf>,

    /// Where to write the generated role.
    #[arg(long, default_value = "role_base.yaml")]
    base_file: PathBuf,

    /// Where to write the merged role (only with --restrictions).
    #[arg(long, default_value = "role_merged.yaml")]
    merged_file: PathBuf,
}

impl Cli {
    fn connection(&self) -> ClusterConnection {
        if self.in_cluster_mode {
            return ClusterConnection::InCluster;
        }
        let path = self
            .kubeconfig
            .clone()
            .or_else(default_kubeconfig)
            .unwrap_or_default();
        ClusterConnection::Kubeconfig(path)
    }

    fn restrictions_path(&self) -> Option<&PathBuf> {
        self.restrictions
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// `~/.kube/config`, using `USERPROFILE` where `HOME` is unset.
fn default_kubeconfig() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".kube").join("config"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the rendered role.
    let default_filter = if cli.verbose { "warn,rolegen=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("rolegen: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> RolegenResult<()> {
    // A broken restriction file must stop the run before anything is written.
    let overlay = cli
        .restrictions_path()
        .map(|path| load_restrictions(path))
        .transpose()?;

    let discovery: Box<dyn DiscoveryProvider> = match &cli.discovery_file {
        Some(path) => Box::new(SnapshotDiscovery::from_file(path)?),
        None => {
            let connection = cli.connection();
            info!(connection = ?connection, "connecting to cluster");
            Box::new(ClusterDiscovery::connect(&connection)?)
        }
    };

    let sink = FileRoleSink::new(&cli.base_file, &cli.merged_file);
    let generation = build_generator(discovery, Box::new(sink), &cli.name).run(overlay)?;

    println!("{}", generation.rendered);
    Ok(())
}

fn build_generator(
    discovery: Box<dyn DiscoveryProvider>,
    sink: Box<dyn RoleSink>,
    role_name: &str,
) -> Generator {
    Generator::new(
        discovery,
        Box::new(DiscoveryAggregator),
        Box::new(AppendMerger),
        sink,
        GeneratorConfig {
            role_name: role_name.to_string(),
        },
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
