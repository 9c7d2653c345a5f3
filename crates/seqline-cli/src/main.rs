//! seqline CLI: run YAML pipelines over JSON arrays.

use clap::{Parser, Subcommand};
use seqline_core::config::EngineConfig;
use seqline_core::order::Direction;
use seqline_planner::{parse_yaml_pipeline, PipelineConfig};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seqline")]
#[command(about = "Lazy, composable sequence pipelines over JSON arrays", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a pipeline to a JSON array and print the result
    Run {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,

        /// Path to the input JSON file (must hold an array)
        #[arg(short, long)]
        input: PathBuf,

        /// Pretty-print the output (overrides config)
        #[arg(long)]
        pretty: bool,

        /// Default sort direction, asc or desc (overrides config)
        #[arg(long)]
        direction: Option<Direction>,
    },

    /// Validate a pipeline YAML file
    Validate {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },

    /// Show the stages of a pipeline and which of them buffer
    Explain {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = EngineConfig::from_env();
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Run {
            pipeline,
            input,
            pretty,
            direction,
        } => {
            if let Err(e) = run_pipeline(config, &pipeline, &input, pretty, direction) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { pipeline } => {
            if let Err(e) = validate_pipeline(&pipeline) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Pipeline is valid");
        }
        Commands::Explain { pipeline } => {
            if let Err(e) = explain_pipeline(&pipeline) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_pipeline(
    config: EngineConfig,
    pipeline_path: &PathBuf,
    input_path: &PathBuf,
    pretty: bool,
    direction: Option<Direction>,
) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    let parsed = parse_yaml_pipeline(&yaml_content)?;

    let config = resolve_run_config(config, &parsed.config, pretty, direction);
    tracing::debug!(
        direction = %config.default_direction,
        pretty = config.pretty_output,
        stages = parsed.stages.len(),
        "resolved run config"
    );

    let input: serde_json::Value = serde_json::from_str(&fs::read_to_string(input_path)?)?;
    let output = parsed.run_json(input, config.default_direction)?;

    let rendered = if config.pretty_output {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}

fn validate_pipeline(pipeline_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    let _ = parse_yaml_pipeline(&yaml_content)?;
    Ok(())
}

fn explain_pipeline(pipeline_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    let parsed = parse_yaml_pipeline(&yaml_content)?;

    println!("Pipeline Stages");
    println!("===============");
    if let Some(dir) = parsed.config.direction {
        println!("Default direction: {}", dir);
    }
    println!();
    for (i, stage) in parsed.stages.iter().enumerate() {
        let marker = if stage.is_eager() { " [eager]" } else { "" };
        println!("  {}. {}{}", i + 1, stage.describe(), marker);
    }
    let eager = parsed.stages.iter().filter(|s| s.is_eager()).count();
    println!();
    println!(
        "{} stage(s), {} buffer their whole input per traversal",
        parsed.stages.len(),
        eager
    );

    Ok(())
}

/// env < pipeline `config:` < CLI flags
fn resolve_run_config(
    mut config: EngineConfig,
    doc: &PipelineConfig,
    pretty: bool,
    direction: Option<Direction>,
) -> EngineConfig {
    apply_pipeline_config(&mut config, doc);
    if pretty {
        config.pretty_output = true;
    }
    if let Some(dir) = direction {
        config.default_direction = dir;
    }
    config
}

fn apply_pipeline_config(cfg: &mut EngineConfig, doc: &PipelineConfig) {
    if let Some(dir) = doc.direction {
        cfg.default_direction = dir;
    }
    if let Some(pretty) = doc.pretty {
        cfg.pretty_output = pretty;
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_pipeline_config, resolve_run_config, EngineConfig};
    use seqline_core::order::Direction;
    use seqline_planner::PipelineConfig;

    #[test]
    fn pipeline_config_overrides_env_defaults() {
        let mut config = EngineConfig::default();
        let pipeline = PipelineConfig {
            direction: Some(Direction::Descending),
            pretty: Some(true),
        };
        apply_pipeline_config(&mut config, &pipeline);
        assert_eq!(config.default_direction, Direction::Descending);
        assert!(config.pretty_output);
    }

    #[test]
    fn absent_pipeline_config_keeps_env_values() {
        let mut config = EngineConfig {
            pretty_output: true,
            ..EngineConfig::default()
        };
        apply_pipeline_config(&mut config, &PipelineConfig::default());
        assert!(config.pretty_output);
        assert_eq!(config.default_direction, Direction::Ascending);
    }

    #[test]
    fn cli_flags_override_pipeline_config() {
        let pipeline = PipelineConfig {
            direction: Some(Direction::Descending),
            pretty: Some(false),
        };
        let config = resolve_run_config(
            EngineConfig::default(),
            &pipeline,
            true,
            Some(Direction::Ascending),
        );
        assert_eq!(config.default_direction, Direction::Ascending);
        assert!(config.pretty_output);
    }

    #[test]
    fn pipeline_config_applies_when_no_flags_given() {
        let env = EngineConfig {
            default_direction: Direction::Ascending,
            pretty_output: true,
            ..EngineConfig::default()
        };
        let pipeline = PipelineConfig {
            direction: Some(Direction::Descending),
            pretty: Some(false),
        };
        let config = resolve_run_config(env, &pipeline, false, None);
        assert_eq!(config.default_direction, Direction::Descending);
        assert!(!config.pretty_output);
    }
}
