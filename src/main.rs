use clap::{CommandFactory, Parser};
use ghfetch::asset::MatchMode;
use ghfetch::config::RunOptions;
use ghfetch::download::DEFAULT_JOBS;
use ghfetch::github::API_HOST_ENV;
use std::path::PathBuf;

/// ghfetch - download the assets of a GitHub release
///
/// Fetches the asset list of a release and downloads the assets in parallel.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for accessing private repositories or avoiding rate limits.
///
/// Examples:
///   ghfetch -repo owner/repo                      # All assets of the latest release
///   ghfetch -repo owner/repo -version v1.2.0      # All assets of tag v1.2.0
///   ghfetch -repo owner/repo -include linux -dir /tmp
#[derive(Parser, Debug)]
#[command(author, about, disable_version_flag = true)]
struct Cli {
    /// The GitHub repository in the format "owner/repo"
    #[arg(long, value_name = "OWNER/REPO")]
    repo: Option<String>,

    /// Directory to save assets to (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Release tag to download (defaults to the latest release)
    #[arg(long, value_name = "TAG")]
    version: Option<String>,

    /// Only download assets whose name contains this value
    #[arg(long, value_name = "PATTERN")]
    include: Option<String>,

    /// How --include is matched: against its own value, or against the fixed "darwin" token
    #[arg(long = "match", value_enum, default_value_t = MatchMode::Filter)]
    match_mode: MatchMode,

    /// Maximum number of concurrent downloads (0 for no limit)
    #[arg(long, short = 'j', value_name = "N", default_value_t = DEFAULT_JOBS)]
    jobs: usize,

    /// Keep downloading the remaining assets when one fails
    #[arg(long)]
    keep_going: bool,

    /// GitHub API host (defaults to api.github.com)
    #[arg(long = "api", env = API_HOST_ENV, value_name = "HOST")]
    api_host: Option<String>,
}

impl Cli {
    fn into_options(self) -> Option<RunOptions> {
        let repo = self.repo.filter(|r| !r.is_empty())?;
        Some(RunOptions {
            repo,
            directory: self.dir.filter(|d| !d.as_os_str().is_empty()),
            version: self.version,
            include: self.include,
            match_mode: self.match_mode,
            jobs: self.jobs,
            keep_going: self.keep_going,
            api_host: self.api_host,
        })
    }
}

/// Long options that may also be spelled with a single dash (`-repo owner/repo`).
const LONG_OPTIONS: &[&str] = &[
    "repo",
    "dir",
    "version",
    "include",
    "match",
    "jobs",
    "keep-going",
    "api",
    "help",
];

/// Rewrite `-name` and `-name=value` into their `--` form for the options above.
fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut normalized = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough || arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        let single_dash = arg.strip_prefix('-').filter(|rest| !rest.starts_with('-'));
        match single_dash {
            Some(rest) if LONG_OPTIONS.contains(&rest.split('=').next().unwrap_or(rest)) => {
                normalized.push(format!("-{}", arg));
            }
            _ => normalized.push(arg),
        }
    }
    normalized
}

fn program_name() -> String {
    std::env::args().next().unwrap_or_else(|| "ghfetch".to_string())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let Some(options) = cli.into_options() else {
        eprint!("{}", Cli::command().render_help());
        std::process::exit(1);
    };

    let runtime = ghfetch::runtime::RealRuntime;
    if let Err(err) = ghfetch::app::download(runtime, options).await {
        eprintln!("{}:{:#}", program_name(), err);
        std::process::exit(1);
    }
}
