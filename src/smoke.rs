use crate::config::SmokeConfig;
use crate::review::orchestrator::Outcome;
use anyhow::Context;
use futures::future::join_all;
use reqwest::{Client, StatusCode, Url, redirect};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Informational pages that must always render
pub const SMOKE_PATHS: [&str; 5] = ["/", "/licenses", "/privacy", "/terms", "/conduct"];

/// A page that did not end in HTTP 200
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeFailure {
    pub path: String,
    pub reason: String,
}

/// GET every smoke path against `base_url`, following redirects
pub async fn smoke(base_url: &str, config: &SmokeConfig) -> anyhow::Result<Vec<SmokeFailure>> {
    let base = Url::parse(base_url).with_context(|| format!("Invalid base URL '{}'", base_url))?;
    let mut builder = Client::builder()
        .redirect(redirect::Policy::limited(config.max_redirects))
        .timeout(Duration::from_secs(config.timeout_secs));
    if is_loopback(&base) {
        // A dev server on this machine is never reachable through a proxy
        builder = builder.no_proxy();
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let root = base.as_str().trim_end_matches('/');
    info!("Smoke testing {} pages at {}", SMOKE_PATHS.len(), root);

    let checks = SMOKE_PATHS.iter().map(|path| {
        let client = client.clone();
        let url = format!("{}{}", root, path);
        async move {
            let reason = check_page(&client, &url).await.err()?;
            Some(SmokeFailure {
                path: path.to_string(),
                reason,
            })
        }
    });

    Ok(join_all(checks).await.into_iter().flatten().collect())
}

fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

async fn check_page(client: &Client, url: &str) -> Result<(), String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;
    let status = response.status();
    debug!("GET {} -> {} ({})", url, status, response.url());
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(format!("expected 200, got {}", status))
    }
}

pub fn report(
    failures: &[SmokeFailure],
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<Outcome> {
    if failures.is_empty() {
        writeln!(out, "All {} pages returned 200.", SMOKE_PATHS.len())?;
        return Ok(Outcome::Clean);
    }
    writeln!(err, "Smoke check failed:")?;
    for failure in failures {
        writeln!(err, "{}: {}", failure.path, failure.reason)?;
    }
    writeln!(err, "Make sure every informational page renders before committing.")?;
    Ok(Outcome::Violations)
}
