mod cli;
mod config;
mod review;
mod rule;
mod scan;
mod smoke;
mod types;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, ScanArgs, SmokeArgs};
use config::Config;
use review::orchestrator::{self, Outcome};
use rule::body::RuleBody;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Distinct from the violation exit code so CI can tell a broken gate from a failing one
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = run(&cli).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &anyhow::Result<Outcome>) -> u8 {
    match result {
        Ok(outcome) => outcome.code(),
        Err(_) => EXIT_ERROR,
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let (rules, args) = match &cli.command {
        Commands::QueryGet(args) => (vec![RuleBody::deprecated_query_get()], args),
        Commands::InlineStyles(args) => (vec![RuleBody::inline_styles()], args),
        Commands::CacheBust(args) => (vec![RuleBody::manual_cache_busting()], args),
        Commands::All(args) => (RuleBody::builtin(), args),
        Commands::Smoke(args) => return run_smoke(&Config::load(&cli.config)?, args).await,
        Commands::Init(args) => {
            Config::init(&cli.config, args.r#override)?;
            info!("Wrote {}", cli.config.display());
            return Ok(Outcome::Clean);
        }
    };

    run_scan(&Config::load(&cli.config)?, &rules, args)
}

fn run_scan(config: &Config, rules: &[RuleBody], args: &ScanArgs) -> anyhow::Result<Outcome> {
    orchestrator::run_checks(
        rules,
        &args.root,
        &config.scan.exclude_dirs,
        args.output.as_deref(),
    )
}

async fn run_smoke(config: &Config, args: &SmokeArgs) -> anyhow::Result<Outcome> {
    let base_url = args.base_url.as_deref().unwrap_or(&config.smoke.base_url);
    let failures = smoke::smoke(base_url, &config.smoke).await?;
    smoke::report(
        &failures,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
    .context("Failed to write report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn scan_args(root: &std::path::Path) -> ScanArgs {
        ScanArgs {
            root: root.to_path_buf(),
            output: None,
        }
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(Outcome::Clean)), 0);
        assert_eq!(exit_status(&Ok(Outcome::Violations)), 1);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("boom"))), EXIT_ERROR);
    }

    #[test]
    fn test_missing_root_exits_with_error_code() {
        let dir = TempDir::new().unwrap();
        let args = scan_args(&dir.path().join("missing"));
        let result = run_scan(&Config::default(), &RuleBody::builtin(), &args);
        assert_eq!(exit_status(&result), EXIT_ERROR);
    }

    #[test]
    fn test_violations_exit_with_failure_code() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("views.py"), "User.query.get(1)\n").unwrap();
        let result = run_scan(
            &Config::default(),
            &[RuleBody::deprecated_query_get()],
            &scan_args(dir.path()),
        );
        assert_eq!(exit_status(&result), 1);
    }

    #[tokio::test]
    async fn test_init_writes_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lintgate.toml");
        let cli = Cli::try_parse_from([
            PathBuf::from("lintgate"),
            PathBuf::from("init"),
            PathBuf::from("--config"),
            path.clone(),
        ])
        .unwrap();

        assert_eq!(exit_status(&run(&cli).await), 0);
        assert_eq!(Config::load(&path).unwrap(), Config::default());
        // A second init without --override refuses to clobber the file
        assert_eq!(exit_status(&run(&cli).await), EXIT_ERROR);
    }
}
