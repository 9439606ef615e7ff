use clap::Parser;
use linclass_classifiers::model::REFERENCE_INPUT;
use linclass_classifiers::{load_config, Classifier};
use linclass_demo::cli::{Cli, Commands, OutputFormat};
use linclass_demo::output::{render_model_text, render_text, ModelReport, RunReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            inputs,
            config,
            format,
        } => {
            let config = load_config(config.as_deref())?;
            let pipeline = config.build_pipeline()?;

            let rows: Vec<Vec<f64>> = if inputs.is_empty() {
                vec![REFERENCE_INPUT.to_vec()]
            } else {
                inputs.into_iter().map(|row| row.0).collect()
            };

            tracing::info!(
                pipeline = pipeline.name(),
                rows = rows.len(),
                "Classifying input"
            );
            let result = pipeline.execute(&rows)?;
            tracing::debug!("Pipeline finished in {}us", result.total_latency_us);

            match format {
                OutputFormat::Text => println!("{}", render_text(&result)),
                OutputFormat::Json => {
                    let report = RunReport::new(pipeline.name(), &result);
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }

        Commands::ShowModel { format } => {
            let report = ModelReport::new();
            match format {
                OutputFormat::Text => println!("{}", render_model_text(&report)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "linclass_demo=debug,linclass_classifiers=debug"
    } else {
        "linclass_demo=warn,linclass_classifiers=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
