use std::error::Error;
use std::path::PathBuf;

use cfgm_graph::degree_sequence_hash;
use clap::Args;
use serde::Serialize;

use crate::io::read_weighted;

#[derive(Args, Debug)]
pub struct DegreesArgs {
    /// Weighted edge list to summarise; `.gz` is decompressed.
    #[arg(short, long)]
    pub input: PathBuf,
    /// Drop nodes whose degree is zero.
    #[arg(long)]
    pub skip_isolated: bool,
}

#[derive(Debug, Serialize)]
struct DegreeSummary {
    nodes: usize,
    stubs: usize,
    hash: String,
    degrees: Vec<(String, usize)>,
}

pub fn run(args: &DegreesArgs) -> Result<(), Box<dyn Error>> {
    let mut degrees = read_weighted(&args.input)?.degrees();
    if args.skip_isolated {
        degrees = degrees.without_isolated();
    }
    let summary = DegreeSummary {
        nodes: degrees.len(),
        stubs: degrees.total_stubs(),
        hash: degree_sequence_hash(&degrees)?,
        degrees: degrees
            .iter()
            .map(|(node, degree)| (node.clone(), degree))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
