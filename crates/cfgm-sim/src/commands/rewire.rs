use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use cfgm_core::rng::derive_substream_seed;
use cfgm_core::RunProvenance;
use cfgm_graph::{
    degree_sequence_hash, degrees_of, edge_list_to_weighted, ensemble_hash, ensemble_to_json,
    format_weighted_edgelist, instance_hash, Ensemble, EnsembleArtifact, EnsembleConfig,
    EnsembleGenerator,
};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::io::{read_multigraph, write_text};

#[derive(Args, Debug)]
pub struct RewireArgs {
    /// Observed network in (weighted) edge list format; `.gz` is decompressed.
    #[arg(short, long)]
    pub input: PathBuf,
    /// Number of rewired networks per ensemble.
    #[arg(short = 'n', long = "number-of-networks")]
    pub number_of_networks: Option<usize>,
    /// Master seed for the random stream.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Output directory.
    #[arg(long, visible_alias = "out", default_value = "output/network")]
    pub output: PathBuf,
    /// YAML file with ensemble settings; flags take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Rewiring attempts allowed per ensemble.
    #[arg(long)]
    pub retry_budget: Option<usize>,
    /// Draws allowed per sampling call.
    #[arg(long)]
    pub draw_threshold: Option<usize>,
    /// Independent ensembles to generate, each on a derived substream seed.
    #[arg(long, default_value_t = 1)]
    pub replicas: usize,
    /// Also write each ensemble as a JSON artifact.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RewireManifest {
    input: String,
    input_hash: String,
    nodes: usize,
    edges: usize,
    config: EnsembleConfig,
    replicas: Vec<ReplicaEntry>,
}

#[derive(Debug, Serialize)]
struct ReplicaEntry {
    label: String,
    seed: Option<u64>,
    attempts: usize,
    failures: usize,
    ensemble_hash: String,
    files: Vec<InstanceEntry>,
}

#[derive(Debug, Serialize)]
struct InstanceEntry {
    file: String,
    hash: String,
}

pub fn run(args: &RewireArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let source = read_multigraph(&args.input)?;
    let degrees = degrees_of(&source);
    info!(
        input = %args.input.display(),
        nodes = degrees.len(),
        edges = source.len(),
        "loaded observed network"
    );

    // Generate everything before touching the output directory so an
    // exhausted ensemble leaves nothing behind.
    let mut ensembles = Vec::with_capacity(args.replicas);
    for replica in 0..args.replicas.max(1) {
        let seed = replica_seed(config.seed, replica, args.replicas);
        let replica_config = EnsembleConfig {
            seed,
            ..config.clone()
        };
        let ensemble = EnsembleGenerator::new(replica_config)?.generate(&degrees)?;
        ensembles.push((replica_label(seed, replica, args.replicas), seed, ensemble));
    }

    fs::create_dir_all(&args.output)?;
    let input_hash = degree_sequence_hash(&degrees)?;
    let mut manifest = RewireManifest {
        input: args.input.display().to_string(),
        input_hash: input_hash.clone(),
        nodes: degrees.len(),
        edges: source.len(),
        config: config.clone(),
        replicas: Vec::new(),
    };
    for (label, seed, ensemble) in ensembles {
        let entry = write_ensemble(&args.output, &label, &ensemble)?;
        if args.json {
            let provenance = RunProvenance {
                input_hash: input_hash.clone(),
                seed,
                retry_budget: config.retry_budget,
                draw_threshold: config.draw_threshold,
                tool_versions: [(
                    env!("CARGO_PKG_NAME").to_string(),
                    env!("CARGO_PKG_VERSION").to_string(),
                )]
                .into_iter()
                .collect(),
            };
            let artifact = EnsembleArtifact::new(ensemble, provenance);
            write_text(
                &args.output.join(format!("seed{label}.ensemble.json")),
                &ensemble_to_json(&artifact)?,
            )?;
        }
        manifest.replicas.push(ReplicaEntry { seed, ..entry });
    }

    let json = serde_json::to_string_pretty(&manifest)?;
    write_text(&args.output.join("manifest.json"), &json)?;
    println!("{json}");
    Ok(())
}

fn resolve_config(args: &RewireArgs) -> Result<EnsembleConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EnsembleConfig::default(),
    };
    if let Some(size) = args.number_of_networks {
        config.size = size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(budget) = args.retry_budget {
        config.retry_budget = budget;
    }
    if let Some(threshold) = args.draw_threshold {
        config.draw_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

pub(crate) fn load_config(path: &Path) -> Result<EnsembleConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn replica_seed(master: Option<u64>, replica: usize, replicas: usize) -> Option<u64> {
    match master {
        Some(seed) if replicas > 1 => Some(derive_substream_seed(seed, replica as u64)),
        other => other,
    }
}

fn replica_label(seed: Option<u64>, replica: usize, replicas: usize) -> String {
    match seed {
        Some(seed) => seed.to_string(),
        None if replicas > 1 => format!("None-r{replica}"),
        None => "None".to_string(),
    }
}

fn write_ensemble(
    dir: &Path,
    label: &str,
    ensemble: &Ensemble<String>,
) -> Result<ReplicaEntry, Box<dyn Error>> {
    let mut files = Vec::with_capacity(ensemble.len());
    for (idx, instance) in ensemble.instances.iter().enumerate() {
        let file = format!("seed{label}_{idx}.edgelist.gz");
        let weighted = edge_list_to_weighted(instance);
        write_text(&dir.join(&file), &format_weighted_edgelist(&weighted))?;
        files.push(InstanceEntry {
            file,
            hash: instance_hash(instance)?,
        });
    }
    Ok(ReplicaEntry {
        label: label.to_string(),
        seed: None,
        attempts: ensemble.report.attempts,
        failures: ensemble.report.failures(),
        ensemble_hash: ensemble_hash(&ensemble.instances)?,
        files,
    })
}
