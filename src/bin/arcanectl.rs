use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use arcane_illusion::host::{CanvasHost, Host};
use arcane_illusion::panel::{GenerateOutcome, ParameterForm};
use arcane_illusion::settings::{FileStore, Options, SettingsStore};
use arcane_illusion::status::Status;
use arcane_illusion::task::WorkerPool;
use arcane_illusion::{extension, Config, ImageGenerationPanel, Parameters, SdApiClient, SegmentationPalette};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arcanectl", about = "CLI for the Arcane Illusion text-to-image panels", version)]
struct Cli {
    /// Override the API base URL
    #[arg(global = true, long)]
    api_url: Option<String>,

    /// Override ARCANE_SETTINGS_PATH
    #[arg(global = true, long, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available checkpoints
    Models,
    /// List available samplers
    Samplers,
    /// List ControlNet models
    ControlnetModels,
    /// Show progress of the running generation
    Progress,
    /// Persisted generation parameters
    Params {
        #[command(subcommand)]
        cmd: ParamsCmd,
    },
    /// Generate images and write one PNG per created layer
    Generate {
        #[command(flatten)]
        overrides: ParamOverrides,
        /// Output directory (defaults to ARCANE_OUTPUT_DIR)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Search segmentation classes
    Palette {
        /// Substring to match, case-insensitive
        query: Option<String>,
    },
    /// Show version information
    About,
    /// Print the environment variables read by the configuration
    Env,
}

#[derive(Subcommand, Debug)]
enum ParamsCmd {
    /// Print the stored parameters as JSON
    Show,
    /// Update and persist parameters
    Set {
        #[command(flatten)]
        overrides: ParamOverrides,
        /// Persist the API base URL
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct ParamOverrides {
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,
    #[arg(long, value_name = "TEXT")]
    negative_prompt: Option<String>,
    /// Checkpoint name
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    sampler: Option<String>,
    #[arg(long)]
    steps: Option<i64>,
    #[arg(long)]
    width: Option<i64>,
    #[arg(long)]
    height: Option<i64>,
    /// -1 picks a random seed server-side
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,
    #[arg(long)]
    cfg_scale: Option<f64>,
}

impl ParamOverrides {
    /// Apply through the form so range clamps hold.
    fn apply(&self, form: &mut ParameterForm) {
        if let Some(v) = &self.prompt {
            form.prompt.set_text(v);
        }
        if let Some(v) = &self.negative_prompt {
            form.negative_prompt.set_text(v);
        }
        if let Some(v) = &self.model {
            if !form.set_model(v) {
                tracing::warn!("Model '{}' is not offered by the API, keeping '{}'", v, form.model.current_text());
            }
        }
        if let Some(v) = &self.sampler {
            if !form.set_sampler(v) {
                tracing::warn!("Sampler '{}' is not offered by the API, keeping '{}'", v, form.sampler.current_text());
            }
        }
        if let Some(v) = self.steps {
            form.steps.set_value(v);
        }
        if let Some(v) = self.width {
            form.width.set_value(v);
        }
        if let Some(v) = self.height {
            form.height.set_value(v);
        }
        if let Some(v) = self.seed {
            form.seed.set_value(v);
        }
        if let Some(v) = self.cfg_scale {
            form.cfg_scale.set_value(v);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut conf = Config::new()?;
    if let Some(path) = cli.settings {
        conf.settings_path = path;
    }
    if cli.api_url.is_some() {
        conf.api_url = cli.api_url;
    }
    let store = FileStore::open(&conf.settings_path)?;

    match cli.command {
        Commands::Models => {
            for name in client_for(&conf, &store)?.models().await? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Samplers => {
            for name in client_for(&conf, &store)?.samplers().await? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::ControlnetModels => {
            for name in client_for(&conf, &store)?.control_net_models().await? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Progress => {
            let progress = client_for(&conf, &store)?.progress().await?;
            println!("{:.0}% (eta {:.1}s)", progress.progress * 100.0, progress.eta_relative);
            Ok(())
        }
        Commands::Params { cmd } => match cmd {
            ParamsCmd::Show => {
                let mut params = Parameters::default();
                params.load(&store);
                println!("{}", serde_json::to_string_pretty(&params)?);
                Ok(())
            }
            ParamsCmd::Set { overrides, url } => {
                let mut store = store;
                let mut loaded = Parameters::default();
                loaded.load(&store);
                let shared = Rc::new(RefCell::new(loaded));
                let mut form = ParameterForm::new(Rc::clone(&shared));
                form.populate_parameters();
                overrides.apply(&mut form);
                shared.borrow().save(&mut store)?;
                if let Some(url) = url {
                    Options { url }.save(&mut store)?;
                }
                println!("Saved {}", store.path().display());
                Ok(())
            }
        },
        Commands::Generate { overrides, out } => {
            let client = client_for(&conf, &store)?;
            let pool = WorkerPool::new(conf.worker_threads)?;
            let mut panel = ImageGenerationPanel::new(client, Box::new(store), pool);
            panel.load_options().await?;
            if let Status::Error(Some(message)) = panel.status() {
                eprintln!("Warning: {}; attempting generation anyway", message);
            }
            overrides.apply(panel.form_mut());

            let mut host = CanvasHost::with_document();
            match panel.generate(&mut host)? {
                GenerateOutcome::Submitted(task_id) => tracing::info!("Waiting for task {}", task_id),
                other => {
                    eprintln!("Error: generation not started ({:?})", other);
                    std::process::exit(1);
                }
            }
            panel.wait_for_generation(&mut host).await?;

            match panel.status() {
                Status::Ready => {
                    let dir = out.unwrap_or(conf.output_dir);
                    let document = host.document.as_ref().ok_or("document closed")?;
                    for path in document.export_layers(&dir)? {
                        println!("{}", path.display());
                    }
                    Ok(())
                }
                status => {
                    eprintln!("Error: {}", panel.status_bar().text());
                    tracing::debug!("Final status: {:?}", status);
                    std::process::exit(1);
                }
            }
        }
        Commands::Palette { query } => {
            let palette = SegmentationPalette::new();
            for (index, class) in palette.search(query.as_deref().unwrap_or("")) {
                println!("{:3} {} {}", index, class.hex(), class.name);
            }
            Ok(())
        }
        Commands::About => {
            let mut host = CanvasHost::new();
            extension::register(&mut host);
            println!("{}", extension::about_text(&host.version()));
            Ok(())
        }
        Commands::Env => {
            Config::print_env_vars();
            Ok(())
        }
    }
}

/// Resolve the base URL: flag or env first, then the stored option.
fn client_for(conf: &Config, store: &dyn SettingsStore) -> Result<SdApiClient, Box<dyn std::error::Error>> {
    let url = match &conf.api_url {
        Some(url) => url.clone(),
        None => {
            let mut options = Options::default();
            options.load(store);
            options.url
        }
    };
    tracing::debug!("Using API at {}", url);
    Ok(SdApiClient::new(url)?)
}
