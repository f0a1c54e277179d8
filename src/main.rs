//! chapnb - convert sectioned HTML chapters to IPython notebooks

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use chapnb::{BatchConfig, ConvertConfig, convert_dir};

#[derive(Parser)]
#[command(name = "chapnb")]
#[command(version, about = "Convert sectioned HTML chapters to IPython notebooks", long_about = None)]
#[command(after_help = "EXAMPLES:
    chapnb                      Convert ch*.html in the current directory
    chapnb book/                Convert ch*.html in book/
    chapnb --dry-run book/      Show output names without writing")]
struct Cli {
    /// Directory containing ch*.html chapters
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Language for code blocks without data-code-language
    #[arg(long, value_name = "LANG", default_value = chapnb::config::DEFAULT_LANGUAGE)]
    default_language: String,

    /// Path component prepended to figure image sources
    #[arg(long, value_name = "PREFIX", default_value = chapnb::config::DEFAULT_IMAGE_PREFIX)]
    image_prefix: String,

    /// Convert but do not write notebooks
    #[arg(long)]
    dry_run: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every conversion step
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = BatchConfig::default()
        .with_dry_run(cli.dry_run)
        .with_convert(
            ConvertConfig::default()
                .with_default_language(cli.default_language)
                .with_image_prefix(cli.image_prefix),
        );

    match convert_dir(&cli.dir, &config) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            error!(
                "{} of {} chapters failed",
                report.failed.len(),
                report.total()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}: {e}", cli.dir.display());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .without_time()
        .try_init();
}
