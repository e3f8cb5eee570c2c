use anyhow::Result;

use distsim_core::graph::visualize;
use distsim_core::Orchestrator;

use crate::args::GraphArgs;

pub fn run(args: &GraphArgs) -> Result<()> {
    let graph = Orchestrator::standard().graph()?;
    let output = visualize(&graph, args.format.into());
    println!("{}", output);
    Ok(())
}
