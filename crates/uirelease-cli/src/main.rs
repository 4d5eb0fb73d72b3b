use clap::{Parser, Subcommand};
use uirelease::{
    commands::{
        clean,
        config::{self, ConfigAction},
        manifest, tasks, themes,
    },
    GlobalOpts,
};
use uirelease_logger as logger;

#[derive(Parser)]
#[command(name = "ui-release")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "jQuery UI release packaging",
    long_about = "ui-release builds the publishable pieces of a jQuery UI release: plugin descriptors, the themes package, staged release trees, zip archives and CDN hash lists."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one descriptor file per plugin
    Manifest,
    /// Run [[copy]] tasks (all, or the named one)
    Copy { task: Option<String> },
    /// Run [[zip]] tasks (all, or the named one)
    Zip { task: Option<String> },
    /// Run [[md5]] tasks (all, or the named one)
    Md5 { task: Option<String> },
    /// Package every theme of the gallery
    Themes {
        /// Gallery directory or http(s) index URL; overrides [themes] gallery
        #[arg(long)]
        gallery: Option<String>,
    },
    /// Remove the output directory
    Clean,
    /// Inspect or create uirelease.toml
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.global.verbosity_level(), cli.global.log_file.as_deref()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::error(&format!("Failed to start async runtime: {}", e));
            std::process::exit(1);
        }
    };

    let opts = &cli.global;
    let result = match cli.command {
        Commands::Manifest => manifest::handle_manifest(opts),
        Commands::Copy { task } => tasks::handle_copy(task.as_deref(), opts),
        Commands::Zip { task } => runtime.block_on(tasks::handle_zip(task.as_deref(), opts)),
        Commands::Md5 { task } => tasks::handle_md5(task.as_deref(), opts),
        Commands::Themes { gallery } => runtime.block_on(themes::handle_themes(gallery, opts)),
        Commands::Clean => clean::handle_clean(opts),
        Commands::Config { action } => config::handle_config(action, opts),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        logger::show_log_path();
        std::process::exit(1);
    }
}
