//! Viewcast CLI - Main entry point.

use viewcast::cli::{Cli, Commands};
use viewcast::config::{ArtifactConfig, ObservabilityConfig, ViewcastConfig};
use viewcast::features::PredictForm;
use viewcast::registry::ChannelRegistry;
use viewcast::schema::Schema;
use viewcast::service::{PredictionService, ServiceState};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let observability = ObservabilityConfig {
        log_level: cli.log_level.clone(),
        json_logs: cli.json_logs,
    };

    match cli.command {
        Commands::Predict {
            model,
            columns,
            subscribers,
            video_count,
            account_age,
            post_frequency,
            like_count,
            comment_count,
            channel,
        } => {
            viewcast::observability::init(&observability)?;

            let config = ViewcastConfig {
                artifacts: ArtifactConfig {
                    model_path: model,
                    columns_path: columns,
                },
                observability,
            };
            let service = PredictionService::load(&config);

            let form = PredictForm {
                subscribers,
                video_count,
                account_age,
                post_frequency_per_year: post_frequency,
                like_count,
                comment_count,
                channel_name: channel,
            };

            // Per the boundary contract, errors are display text, not faults.
            let outcome = service.handle(&form);
            println!("{}", outcome.text);
        }

        Commands::Channels { columns } => {
            let schema = Schema::from_file(&columns)?;
            let registry = ChannelRegistry::from_schema(&schema)?;
            for name in registry.channels() {
                println!("{}", name);
            }
        }

        Commands::Check { model, columns } => {
            viewcast::observability::init(&observability)?;

            let service = PredictionService::from_paths(&model, &columns);
            match service.state() {
                ServiceState::Ready => {
                    println!("Status: READY ({} channels)", service.channels().len());
                }
                ServiceState::Degraded => {
                    eprintln!("Status: DEGRADED");
                    std::process::exit(1);
                }
            }
        }

        Commands::Version => {
            println!("viewcast {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
