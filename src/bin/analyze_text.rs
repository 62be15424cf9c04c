//! Analyze one article from a file or stdin and print the JSON result.
//!
//! Usage: analyze-text [--remote] [FILE]
//!
//! Without `--remote` the in-process engine runs. With it, the endpoints from
//! `config/analyzer.toml` are tried in order (local fallback per config).

use std::io::Read;

use anyhow::Context;
use news_bias_analyzer::{AnalyzerClient, AppConfig, BiasEngine, ClientOutcome};

struct Args {
    remote: bool,
    file: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        remote: false,
        file: None,
    };
    for a in std::env::args().skip(1) {
        match a.as_str() {
            "--remote" => args.remote = true,
            "-h" | "--help" => {
                println!("usage: analyze-text [--remote] [FILE]");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') && flag != "-" => anyhow::bail!("unknown flag `{flag}`"),
            path => {
                if args.file.replace(path.to_string()).is_some() {
                    anyhow::bail!("only one input file is supported");
                }
            }
        }
    }
    Ok(args)
}

fn read_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("read {path}"))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let cfg = AppConfig::load()?;
    let text = read_input(args.file.as_deref())?;

    let result = if args.remote {
        let client = AnalyzerClient::from_config(&cfg.client, cfg.analyzer.engine_options())?;
        let outcome = client.analyze(&text).await;
        if let ClientOutcome::Fallback {
            endpoint, failures, ..
        } = &outcome
        {
            eprintln!(
                "served by {endpoint} after {} failed endpoint(s)",
                failures.len()
            );
        }
        outcome.into_result()?
    } else {
        BiasEngine::new(cfg.analyzer.engine_options()).analyze(&text)
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
