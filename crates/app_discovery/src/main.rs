//! `app_discovery [USER...] [--out FILE]`
//!
//! Prints the discovered app catalog as pretty JSON on stdout, or writes it to `FILE`. Set
//! `GITHUB_TOKEN` to raise the API rate limit. Diagnostics go to stderr (`RUST_LOG` controls them).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use app_discovery::{discover, DiscoveryConfig, GitHubClient};

struct CliArgs {
    users: Vec<String>,
    out: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<CliArgs>> {
    let mut users = Vec::new();
    let mut out = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let Some(path) = args.next() else {
                    bail!("--out requires a file path");
                };
                out = Some(PathBuf::from(path));
            }
            "help" | "--help" | "-h" => return Ok(None),
            flag if flag.starts_with('-') => bail!("unknown option: {flag}"),
            _ => users.push(arg),
        }
    }
    Ok(Some(CliArgs { users, out }))
}

fn print_usage() {
    eprintln!("usage: app_discovery [USER...] [--out FILE]");
    eprintln!("  crawls public repositories of each USER (default: bius os-clef ozclef)");
    eprintln!("  and prints the app catalog as JSON");
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(cli) = parse_args(std::env::args().skip(1))? else {
        print_usage();
        return Ok(());
    };

    let config = DiscoveryConfig::from_env().with_users(cli.users);
    if config.token.is_none() {
        log::info!("no token configured; unauthenticated rate limits apply");
    }
    let client = GitHubClient::new(&config).context("building HTTP client")?;

    let apps = discover(&client, &config).await;
    let json = serde_json::to_string_pretty(&apps).context("serializing app catalog")?;

    match cli.out {
        Some(path) => {
            tokio::fs::write(&path, format!("{json}\n"))
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {} apps to {}", apps.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
