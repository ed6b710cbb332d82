use std::fs;
use std::process::exit;
use std::time::Duration;

use clap::{Parser, Subcommand};
use runner_aws::adapters::artifact::HttpArtifactFetcher;
use runner_aws::adapters::function_store::LambdaFunctionStore;
use runner_aws::adapters::invoker::ProcessInvoker;
use runner_aws::config::{load_sdk_config, DEFAULT_REGION};
use runner_aws::handlers::invoke::invoke;
use runner_aws::workspace::create_workspace;
use serde_json::Value;

const HANDLER_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Parser)]
#[command(
    name = "runner",
    about = "Runs a packaged Lambda function's deployment artifact locally"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a function's artifact and invoke its entry point
    Invoke {
        /// ARN of the function to invoke
        arn: String,
        /// JSON event passed to the handler
        #[arg(short, long, default_value = "{}")]
        event: String,
        /// AWS credentials profile name
        #[arg(long)]
        profile: Option<String>,
        /// AWS region
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke {
            arn,
            event,
            profile,
            region,
        } => {
            let event: Value = match serde_json::from_str(&event) {
                Ok(value) => value,
                Err(error) => {
                    eprintln!("invalid --event payload: {error}");
                    exit(2);
                }
            };

            let config = load_sdk_config(Some(region), profile).await;
            let functions = LambdaFunctionStore::new(&config);
            let artifacts = HttpArtifactFetcher;
            let invoker = ProcessInvoker::new(HANDLER_TIMEOUT);

            let dir = match create_workspace() {
                Ok(dir) => dir,
                Err(error) => {
                    eprintln!("{error}");
                    exit(1);
                }
            };

            let outcome = tokio::task::block_in_place(|| {
                invoke(&event, &arn, &dir, &functions, &artifacts, &invoker)
            });

            // The workspace holds only the staged artifact; drop it whether
            // the invocation succeeded or not.
            let _ = fs::remove_dir_all(&dir);

            match outcome {
                Ok(result) => println!("{result}"),
                Err(error) => {
                    eprintln!("{error}");
                    exit(1);
                }
            }
        }
    }
}
