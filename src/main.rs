use clap::{ArgAction, Parser, Subcommand};
use repos::commands::*;
use repos::core::{
    command_init::{CommandContext, CommandInit},
    config::{Settings, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS},
    error::Result,
    print_error,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repos")]
#[command(about = "Keep an eye on many repositories: local changes, unpushed and unpulled commits")]
#[command(version)]
struct Cli {
    /// Path to the store of watched repositories
    #[arg(short = 's', long, global = true, env = "REPOS_STORE")]
    store: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of repositories checked at the same time
    #[arg(long, global = true, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Seconds any single git call may take (0 waits forever)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a repository to the watch list
    Add {
        /// Name of the watch
        name: String,
        /// Directory of the repository
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// Overwrite an existing watch of the same name
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// Remove a repository from the watch list, by name or directory
    Remove {
        name_or_directory: String,
    },
    /// Rename a watch
    Rename {
        old_name: String,
        new_name: String,
    },
    /// List all watched repositories
    Show,
    /// List the remotes of all watched repositories
    Remotes,
    /// Check all watched repositories for local changes and divergence from their remotes
    Check {
        /// Only check repos whose name matches this regex
        #[arg(short = 'i', long)]
        include: Option<String>,
        /// Skip repos whose name matches this regex
        #[arg(short = 'e', long)]
        exclude: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the sync state of every branch against every remote
    States {
        /// Only show repos whose name matches this regex
        #[arg(short = 'i', long)]
        include: Option<String>,
        /// Skip repos whose name matches this regex
        #[arg(short = 'e', long)]
        exclude: Option<String>,
    },
    /// Find repositories below a directory and add them
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// How many directory levels below the root are considered
        #[arg(short = 'd', long, default_value_t = 1)]
        max_depth: usize,
        /// Only consider names matching this regex
        #[arg(short = 'i', long)]
        include: Option<String>,
        /// Skip names matching this regex
        #[arg(short = 'e', long)]
        exclude: Option<String>,
        /// Prefix for suggested names
        #[arg(short = 'p', long, default_value = "")]
        prefix: String,
        /// Add every repository found without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn run(command: Commands, context: &mut CommandContext) -> Result<()> {
    match command {
        Commands::Add {
            name,
            directory,
            force,
        } => execute_add(context, &name, &directory, force),
        Commands::Remove { name_or_directory } => execute_remove(context, &name_or_directory),
        Commands::Rename { old_name, new_name } => execute_rename(context, &old_name, &new_name),
        Commands::Show => execute_show(context),
        Commands::Remotes => execute_remotes(context),
        Commands::Check {
            include,
            exclude,
            json,
        } => execute_check(context, include.as_deref(), exclude.as_deref(), json),
        Commands::States { include, exclude } => {
            execute_states(context, include.as_deref(), exclude.as_deref())
        }
        Commands::Scan {
            directory,
            max_depth,
            include,
            exclude,
            prefix,
            yes,
        } => execute_scan(
            context,
            ScanArgs {
                directory: &directory,
                max_depth,
                include: include.as_deref(),
                exclude: exclude.as_deref(),
                prefix: &prefix,
                yes,
            },
        ),
    }
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::resolve(cli.store, cli.verbose, cli.workers, cli.timeout) {
        Ok(settings) => settings,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // An explicit RUST_LOG wins over -v
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", settings.log_filter());
    }
    env_logger::init();

    let result = CommandInit::initialize(settings).and_then(|mut context| run(cli.command, &mut context));
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
