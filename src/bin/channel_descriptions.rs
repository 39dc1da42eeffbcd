//! Export every video description of a YouTube channel to text files.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merchant_secret_sauce::constants::YOUTUBE_API_BASE_URL;
use merchant_secret_sauce::youtube::{save_descriptions, YouTubeClient};

/// YouTube Video Description Downloader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Channel whose videos are exported
    #[arg(long, default_value = "")]
    channel_id: String,

    /// Folder receiving one .txt file per video
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// API base URL override
    #[arg(long, hide = true, default_value = YOUTUBE_API_BASE_URL)]
    api_base_url: String,
}

/// Trimmed, checked inputs for one export run
#[derive(Debug, PartialEq)]
struct Inputs {
    api_key: String,
    channel_id: String,
    output_dir: PathBuf,
}

/// Check the arguments the way the form did before starting a run
fn validate(args: &Args) -> std::result::Result<Inputs, &'static str> {
    let api_key = args.api_key.trim();
    let channel_id = args.channel_id.trim();
    if api_key.is_empty() || channel_id.is_empty() {
        return Err("API Key and Channel ID are required!");
    }

    let output_dir = match &args.output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
        _ => return Err("Please select a folder to save files."),
    };

    Ok(Inputs {
        api_key: api_key.to_string(),
        channel_id: channel_id.to_string(),
        output_dir,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merchant_secret_sauce=info,channel_descriptions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let inputs = validate(&args).map_err(|msg| anyhow!(msg))?;
    let folder = inputs.output_dir;

    tracing::info!("Fetching video descriptions...");

    let client = YouTubeClient::with_base_url(inputs.api_key, args.api_base_url.as_str());
    let videos = client.fetch_channel_descriptions(&inputs.channel_id).await?;
    let written = save_descriptions(&folder, &videos).await?;

    println!(
        "Video descriptions saved successfully! ({} files in {})",
        written.len(),
        folder.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let argv = std::iter::once("channel-descriptions").chain(extra.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_validate_trims_inputs() {
        let args = parse(&[
            "--api-key",
            "  key  ",
            "--channel-id",
            " UC123 ",
            "--output-dir",
            "out",
        ]);

        assert_eq!(
            validate(&args),
            Ok(Inputs {
                api_key: "key".to_string(),
                channel_id: "UC123".to_string(),
                output_dir: PathBuf::from("out"),
            })
        );
    }

    #[test]
    fn test_validate_rejects_blank_api_key() {
        let args = parse(&["--api-key", "   ", "--channel-id", "UC123", "--output-dir", "out"]);
        assert_eq!(validate(&args), Err("API Key and Channel ID are required!"));
    }

    #[test]
    fn test_validate_rejects_missing_channel_id() {
        let args = parse(&["--api-key", "key", "--output-dir", "out"]);
        assert_eq!(validate(&args), Err("API Key and Channel ID are required!"));
    }

    #[test]
    fn test_validate_rejects_missing_output_dir() {
        let args = parse(&["--api-key", "key", "--channel-id", "UC123"]);
        assert_eq!(validate(&args), Err("Please select a folder to save files."));
    }
}
