use std::error::Error;
use std::path::PathBuf;

use cfgm_graph::{render_diagram, DiagramOptions};
use clap::Args;

use crate::io::{read_multigraph, write_text};

#[derive(Args, Debug)]
pub struct DiagramArgs {
    /// Edge list to render; `.gz` is decompressed.
    #[arg(short, long)]
    pub input: PathBuf,
    /// Lay the diagram out left to right.
    #[arg(long)]
    pub horizontal: bool,
    /// Write the diagram here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &DiagramArgs) -> Result<(), Box<dyn Error>> {
    let edges = read_multigraph(&args.input)?;
    let diagram = render_diagram(
        &edges,
        DiagramOptions {
            horizontal: args.horizontal,
        },
    );
    match &args.out {
        Some(path) => write_text(path, &diagram)?,
        None => print!("{diagram}"),
    }
    Ok(())
}
