use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "lintgate", version, about = "Pre-commit guard for a web application's source tree", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: LINTGATE_LOG=] [default: warn]
    #[arg(
        long,
        env = "LINTGATE_LOG",
        default_value = "warn",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    /// Path to config file (optional, initialize with `lintgate init`)
    #[arg(long, default_value = "lintgate.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fail on legacy `Model.query.get(id)` lookups in Python sources
    QueryGet(ScanArgs),
    /// Fail on inline `style="..."` attributes in HTML templates
    InlineStyles(ScanArgs),
    /// Fail on hand-written `?v=<digits>` cache-busting tokens in HTML templates
    CacheBust(ScanArgs),
    /// Run every source check
    All(ScanArgs),
    /// GET the informational pages of a running instance and require HTTP 200
    Smoke(SmokeArgs),
    /// Write a default lintgate.toml config file
    Init(InitArgs),
}

/// Arguments shared by the source checks
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Project root to scan
    #[arg(long, env = "LINTGATE_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Also write results to a file (.md or .json)
    #[arg(long)]
    pub output: Option<String>,
}

/// Arguments for the smoke command
#[derive(Parser, Debug)]
pub struct SmokeArgs {
    /// Base URL of the running application [default: smoke.base_url from config]
    #[arg(long, env = "LINTGATE_BASE_URL")]
    pub base_url: Option<String>,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_need_no_arguments() {
        let cli = Cli::try_parse_from(["lintgate", "query-get"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("lintgate.toml"));
        match cli.command {
            Commands::QueryGet(args) => {
                assert_eq!(args.root, PathBuf::from("."));
                assert!(args.output.is_none());
            }
            _ => panic!("expected query-get"),
        }
    }

    #[test]
    fn test_scan_flags() {
        let cli =
            Cli::try_parse_from(["lintgate", "cache-bust", "--root", "site", "--output", "r.json"])
                .unwrap();
        match cli.command {
            Commands::CacheBust(args) => {
                assert_eq!(args.root, PathBuf::from("site"));
                assert_eq!(args.output.as_deref(), Some("r.json"));
            }
            _ => panic!("expected cache-bust"),
        }
    }

    #[test]
    fn test_output_is_rejected_where_unused() {
        assert!(Cli::try_parse_from(["lintgate", "smoke", "--output", "r.json"]).is_err());
        assert!(Cli::try_parse_from(["lintgate", "init", "--output", "r.json"]).is_err());
        assert!(Cli::try_parse_from(["lintgate", "--output", "r.json", "all"]).is_err());
        assert!(Cli::try_parse_from(["lintgate", "smoke", "--root", "site"]).is_err());
    }

    #[test]
    fn test_smoke_base_url() {
        let cli =
            Cli::try_parse_from(["lintgate", "smoke", "--base-url", "http://localhost:8000"])
                .unwrap();
        match cli.command {
            Commands::Smoke(args) => {
                assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000"))
            }
            _ => panic!("expected smoke"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
