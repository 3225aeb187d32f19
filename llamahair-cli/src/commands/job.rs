//! Job command handlers
//!
//! Handles submitting prompts, waiting for results, and doing both in one go.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use llamahair_client::{CancellationToken, LlamaClient};
use llamahair_core::domain::job::JobHandle;
use llamahair_core::domain::result::JobResult;
use llamahair_core::dto::job::JobRequest;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;

/// Arguments for submitting a prompt
#[derive(Args)]
pub struct SendArgs {
    /// Full URL of the prompt endpoint
    prompt_url: String,

    /// Request body: JSON, plain text, or @path to read from a file
    #[arg(short, long)]
    body: String,

    /// Request id (defaults to a random UUID)
    #[arg(long)]
    id: Option<String>,

    /// Print the raw JSON result instead of a summary
    #[arg(long)]
    json: bool,
}

/// Arguments for retrieving a job result
#[derive(Args)]
pub struct RetrieveArgs {
    /// Job id returned by `send`
    job_id: String,

    /// Print the raw JSON result instead of a summary
    #[arg(long)]
    json: bool,
}

/// Submit a prompt and print the job id
pub async fn send(args: SendArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let request = build_request(&args)?;

    let handle = client.submit(&args.prompt_url, &request).await?;

    println!("{}", handle);

    Ok(())
}

/// Wait for a job and print its result
pub async fn retrieve(args: RetrieveArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let handle = JobHandle::new(args.job_id);

    let result = await_with_interrupt(&client, &handle).await?;

    print_result(&result, args.json)
}

/// Submit a prompt, wait for the job, and print its result
pub async fn run(args: SendArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let request = build_request(&args)?;

    let handle = client.submit(&args.prompt_url, &request).await?;
    eprintln!("{} {}", "Submitted job".dimmed(), handle.to_string().cyan());

    let result = await_with_interrupt(&client, &handle).await?;

    print_result(&result, args.json)
}

/// Poll until the job finishes, cancelling on Ctrl-C
async fn await_with_interrupt(client: &LlamaClient, handle: &JobHandle) -> Result<JobResult> {
    let token = CancellationToken::new();
    let canceller = token.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            canceller.cancel();
        }
    });

    let outcome = client.await_job_with_cancel(handle, &token).await;
    signal_task.abort();

    outcome.map_err(|e| {
        if e.is_timeout() || e.is_cancelled() {
            anyhow::Error::new(e).context(format!(
                "Job {} may still finish; run `llamahair retrieve {}` to check again",
                handle, handle
            ))
        } else {
            anyhow::Error::new(e)
        }
    })
}

fn build_request(args: &SendArgs) -> Result<JobRequest> {
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    Ok(JobRequest::new(id, parse_body(&args.body)?))
}

/// Interpret a body argument
///
/// `@path` reads the file first. Valid JSON is sent as JSON; anything else is
/// sent as a JSON string.
fn parse_body(raw: &str) -> Result<serde_json::Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read body from {}", path))?,
        None => raw.to_string(),
    };

    Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
}

fn print_result(result: &JobResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", format!("Result {}", result.id).bold());
    println!("  Identifier: {}", result.identifier);
    if let Some(at) = result.produced_at() {
        println!("  Produced:   {}", at.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed());
    }

    let output = &result.response;
    if output.is_empty() {
        println!("{}", "  (no output)".yellow());
        return Ok(());
    }

    if let Some(summary) = &output.summary {
        println!();
        println!("{}", "Summary".cyan());
        println!("{}", summary);
    }
    if let Some(text) = &output.output {
        println!();
        println!("{}", "Output".cyan());
        println!("{}", text);
    }
    if let Some(outputs) = &output.outputs {
        println!();
        println!("{}", format!("Outputs ({})", outputs.len()).cyan());
        for (i, text) in outputs.iter().enumerate() {
            println!("  {} {}", format!("[{}]", i).dimmed(), text);
        }
    }
    if let Some(values) = &output.extracted_values {
        println!();
        println!("{}", "Extracted values".cyan());
        for value in values {
            println!("  {}: {}", value.key.bold(), value.value);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_json() {
        let body = parse_body(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "hi" }));
    }

    #[test]
    fn test_parse_body_plain_text() {
        let body = parse_body("Summarise this").unwrap();
        assert_eq!(body, serde_json::Value::String("Summarise this".to_string()));
    }

    #[test]
    fn test_parse_body_missing_file() {
        assert!(parse_body("@/definitely/not/here.json").is_err());
    }

    #[test]
    fn test_build_request_generates_id() {
        let args = SendArgs {
            prompt_url: "http://localhost/v1/prompt/x".to_string(),
            body: "hi".to_string(),
            id: None,
            json: false,
        };
        let request = build_request(&args).unwrap();
        assert!(Uuid::parse_str(&request.id).is_ok());

        let args = SendArgs {
            id: Some("req-1".to_string()),
            ..args
        };
        assert_eq!(build_request(&args).unwrap().id, "req-1");
    }
}
