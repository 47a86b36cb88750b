/*!

Creates an EKS cluster control plane in the default VPC, together with the IAM roles for the
cluster and its nodes, and waits for the cluster to become active. Node groups and workloads are
left to the operator; the commands for them are printed at the end.

!*/

use anyhow::Result;
use clap::Parser;
use clusterops::args::CommonArgs;
use clusterops::clients::AwsClients;
use clusterops::provision::{next_steps, provision};
use clusterops::report::Console;
use clusterops_utils::aws::aws_config;
use clusterops_utils::init_logger;
use log::debug;

/// Create an EKS cluster and the IAM roles it needs.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logger(env!("CARGO_CRATE_NAME"), Some(args.common.log_level));
    if let Err(e) = run(args).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.common.ops_config()?;
    let sdk_config = aws_config(&config.region, &config.assume_role).await;
    let clients = AwsClients::new(&sdk_config);

    let provisioned = provision(&clients, &config, &Console).await?;
    debug!("Provisioned:\n{}", provisioned);
    println!();
    println!("{}", next_steps(&config, &provisioned));
    Ok(())
}
