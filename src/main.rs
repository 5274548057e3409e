//! House Price Estimator CLI
//!
//! Train a least squares price model from a CSV dataset, query it from the
//! command line, or serve it behind a web form.

use clap::{Parser, Subcommand};
use houseprice::{Config, Result};

#[derive(Parser)]
#[command(name = "houseprice")]
#[command(about = "House price estimation with linear regression", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with default config
    Init,
    /// Train the model and write the artifact
    Train {
        /// Override the split seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the held-out share of rows
        #[arg(long)]
        test_fraction: Option<f64>,
    },
    /// Estimate the price of a house
    Predict {
        bedrooms: String,
        bathrooms: String,
        sqft_living: String,
        /// Train from the dataset in-process instead of loading the artifact
        #[arg(long)]
        fresh: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Serve the estimate form over HTTP
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show model information
    Info,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Init => commands::init(&cli.config),
        Commands::Train {
            seed,
            test_fraction,
        } => commands::train(&config, seed, test_fraction),
        Commands::Predict {
            bedrooms,
            bathrooms,
            sqft_living,
            fresh,
            format,
        } => commands::predict(&config, &bedrooms, &bathrooms, &sqft_living, fresh, format),
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
        },
        Commands::Serve { host, port } => commands::serve(&config, host, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use houseprice::data::HouseDataset;
    use houseprice::features::RawFeatures;
    use houseprice::model::ModelArtifact;
    use houseprice::predict::{estimate_price, format_prediction, Predictor};
    use houseprice::training::Trainer;
    use houseprice::Prediction;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("model")?;
        println!("Created model/ directory");

        println!("\nNext steps:");
        println!("  1. Place your dataset at {}", config.data.dataset_path);
        println!("  2. Run 'houseprice train' to fit the model");
        println!("  3. Run 'houseprice predict 3 2 1600' for an estimate");
        println!("  4. Run 'houseprice serve' to open the web form");

        Ok(())
    }

    pub fn train(config: &Config, seed: Option<u64>, test_fraction: Option<f64>) -> Result<()> {
        let mut training = config.training.clone();
        if let Some(s) = seed {
            training.seed = s;
        }
        if let Some(f) = test_fraction {
            training.test_fraction = f;
        }
        training.validate()?;

        let dataset = HouseDataset::load(&config.data.dataset_path)?;
        let artifact = Trainer::new(&training).train_artifact(&dataset)?;
        artifact.save(&config.data.model_path)?;

        println!("\nTraining complete!");
        print_artifact(&artifact);
        Ok(())
    }

    pub fn predict(
        config: &Config,
        bedrooms: &str,
        bathrooms: &str,
        sqft_living: &str,
        fresh: bool,
        format: OutputFormat,
    ) -> Result<()> {
        let features = RawFeatures::new(bedrooms, bathrooms, sqft_living).validate(&config.limits)?;

        let prediction = if fresh {
            estimate_price(config, features)?
        } else {
            Predictor::load(&config.data.model_path, config.limits)?.predict(features)?
        };

        print_prediction(&prediction, format)
    }

    fn print_prediction(prediction: &Prediction, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => print!("{}", format_prediction(prediction)),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "bedrooms": prediction.features.bedrooms,
                    "bathrooms": prediction.features.bathrooms,
                    "sqft_living": prediction.features.sqft_living,
                    "predicted_price": prediction.predicted_price,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }

    pub fn model_info(config: &Config) -> Result<()> {
        let artifact = ModelArtifact::load(&config.data.model_path)?;

        println!("Model Information");
        println!("───────────────────────────────");
        println!("  Path:           {}", config.data.model_path);
        print_artifact(&artifact);
        Ok(())
    }

    fn print_artifact(artifact: &ModelArtifact) {
        let model = &artifact.model;
        println!("  Trained at:     {}", artifact.trained_at.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("  Format version: {}", artifact.format_version);
        println!(
            "  Rows:           {} train / {} test (seed {}, test fraction {})",
            artifact.training_rows, artifact.test_rows, artifact.seed, artifact.test_fraction
        );
        println!("  Intercept:      {:.4}", model.intercept);
        for (name, coef) in artifact.features.iter().zip(model.coefficients.iter()) {
            println!("  {:<15} {:.4}", format!("{}:", name), coef);
        }
        match &artifact.evaluation {
            Some(eval) => println!("  Held-out:       {}", eval),
            None => println!("  Held-out:       none"),
        }
    }

    pub fn serve(config: &Config, host: Option<String>, port: Option<u16>) -> Result<()> {
        let mut server = config.server.clone();
        if let Some(h) = host {
            server.host = h;
        }
        if let Some(p) = port {
            server.port = p;
        }

        // Load once; every request shares this predictor
        let predictor = Predictor::load(&config.data.model_path, config.limits)?;
        log::info!(
            "Loaded model trained at {}",
            predictor.artifact().trained_at
        );

        houseprice::web::serve(&server, predictor)
    }
}
