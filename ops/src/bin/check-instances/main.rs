/*!

Lists the running EC2 instances, the EKS clusters and the available RDS instances in one region.
Nothing is created or modified.

!*/

use anyhow::Result;
use clap::Parser;
use clusterops::args::CommonArgs;
use clusterops::clients::AwsClients;
use clusterops::inventory::check_inventory;
use clusterops::report::{Console, LogReporter, Reporter};
use clusterops_utils::aws::aws_config;
use clusterops_utils::{init_logger, json_display};

/// Report the compute resources running in an AWS region.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    common: CommonArgs,

    /// Output the inventory in JSON format. Progress is sent to the log instead of stdout.
    #[clap(long = "json")]
    json: bool,
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

    let reporter: &dyn Reporter = if args.json { &LogReporter } else { &Console };
    let inventory = check_inventory(&clients, &config.region, reporter).await?;
    if args.json {
        println!("{}", json_display(&inventory));
    }
    Ok(())
}
