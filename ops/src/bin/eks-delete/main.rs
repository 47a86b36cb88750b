/*!

Deletes an EKS cluster, its node groups and the IAM roles created for it. Nothing is deleted
unless the operator types the confirmation keyword.

!*/

use anyhow::{Context, Result};
use clap::Parser;
use clusterops::args::CommonArgs;
use clusterops::clients::AwsClients;
use clusterops::confirm::{confirmed, CONFIRMATION_KEYWORD};
use clusterops::decommission::decommission;
use clusterops::report::Console;
use clusterops_utils::aws::aws_config;
use clusterops_utils::init_logger;
use std::io::Write;

/// Delete an EKS cluster, its node groups and its IAM roles.
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
    let role_names: Vec<&str> = config
        .roles()
        .into_iter()
        .map(|role| role.name.as_str())
        .collect();

    println!(
        "WARNING: This will delete the EKS cluster '{}' in '{}', its node groups, and the IAM \
        roles {:?}.",
        config.cluster.name, config.region, role_names
    );
    print!("Type '{}' to continue: ", CONFIRMATION_KEYWORD);
    std::io::stdout()
        .flush()
        .context("Unable to write the confirmation prompt")?;
    if !confirmed(std::io::stdin().lock())? {
        println!("Aborted.");
        return Ok(());
    }

    let sdk_config = aws_config(&config.region, &config.assume_role).await;
    let clients = AwsClients::new(&sdk_config);
    let summary = decommission(&clients, &config, &Console).await?;
    for (nodegroup, reason) in &summary.nodegroup_failures {
        eprintln!("Node group '{}' may still exist: {}", nodegroup, reason);
    }
    println!();
    println!("Cleanup complete.");
    Ok(())
}
