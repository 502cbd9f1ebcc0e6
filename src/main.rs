use clap::{Parser, Subcommand};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use url_checker::config::{CheckerConfig, ConfigLoader, OutputConfig};
use url_checker::fetcher::HttpFetcher;
use url_checker::pipeline::{Pipeline, PipelineSettings};
use url_checker::source;

#[derive(Parser)]
#[command(name = "url-checker")]
#[command(version = "0.1.0")]
#[command(about = "Bulk HTTP status checker for URL lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every URL listed in the first column of a CSV file
    Run {
        /// Input CSV file [default: ./all.csv]
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Number of concurrent requests [default: 10]
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Query parameters appended to every URL, e.g. nocache=1
        #[arg(short, long)]
        params: Option<String>,

        /// Optional configuration file (JSON/YAML/TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append results to this log file [default: ./exec.log]
        #[arg(short, long)]
        log: Option<String>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Validate a configuration file
    Check {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let level = logger.filter();
    let multi = MultiProgress::new();

    match cli.command {
        Commands::Run {
            file,
            concurrency,
            params,
            config,
            log: log_path,
            no_progress,
        } => {
            if no_progress {
                log::set_boxed_logger(Box::new(logger))?;
            } else {
                indicatif_log_bridge::LogWrapper::new(multi.clone(), logger).try_init()?;
            }
            log::set_max_level(level);

            let mut cfg = match &config {
                Some(path) => {
                    log::info!("Loading config from {:?}", path);
                    ConfigLoader::load(path)?
                }
                None => CheckerConfig::default(),
            };
            if let Some(file) = file {
                cfg.input = file;
            }
            if let Some(concurrency) = concurrency {
                cfg.concurrency = concurrency;
            }
            if let Some(params) = params {
                cfg.query = params;
            }
            if let Some(path) = log_path {
                cfg.output = OutputConfig::Log { path };
            }
            let cfg = ConfigLoader::validate(cfg)?;

            // Fails before any request is made when the input is unreadable.
            let total = source::count_records(&cfg.input)?;
            let records = source::open_records(&cfg.input)?;
            let sink = ConfigLoader::create_sink(&cfg.output)?;
            let fetcher = Arc::new(HttpFetcher::new(cfg.user_agent.as_deref())?);

            let progress = if no_progress {
                ProgressBar::hidden()
            } else {
                let pb = multi.add(ProgressBar::new(total));
                pb.set_style(ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
                    .progress_chars("#>-"));
                pb
            };

            log::info!(
                "Checking {} URLs from {} with concurrency {}",
                total,
                cfg.input.display(),
                cfg.concurrency
            );
            let pipeline = Pipeline::new(PipelineSettings::from(&cfg), fetcher);
            let summary = pipeline.run(records, sink, progress.clone()).await?;

            if !no_progress {
                progress.set_style(ProgressStyle::default_bar()
                    .template("✅ [{elapsed_precise}] [{bar:40.green/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"));
                progress.finish_with_message(format!(
                    "Failed: {} | RPS: {:.2} - Completed",
                    summary.failed,
                    summary.requests_per_second()
                ));
            }

            if summary.interrupted {
                println!("\n⚠️  Check Interrupted:");
            } else {
                println!("\n✅ Check Completed:");
            }
            println!("   URLs Checked: {}", summary.recorded);
            println!("   Responded: {}", summary.succeeded());
            println!("   No Response: {}", summary.failed);
            println!("   Results: {}", cfg.output.path());
            println!("   Total Time: {:.1}s", summary.elapsed_seconds);
        }
        Commands::Check { config } => match ConfigLoader::load(&config) {
            Ok(cfg) => {
                println!("✅ Config is valid:");
                println!("   Input: {}", cfg.input.display());
                println!("   Concurrency: {}", cfg.concurrency);
                println!("   Query: {:?}", cfg.query);
                println!("   Output: {:?}", cfg.output);
            }
            Err(e) => {
                eprintln!("❌ Config error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
