mod commands;
mod saver;

use anyhow::Result;
use clap::{Parser, Subcommand};
use saver::DirectorySaver;
use screening_core::forms::MakeCallForm;
use screening_core::models::ExportKind;
use screening_core::{ClientConfig, HttpClient};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "screening")]
#[command(about = "Operator shell for the voice screening backend")]
struct Cli {
    /// Backend base URL [default: $SCREENING_API_BASE_URL or http://localhost:3000]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for templates and exports
    #[arg(long, global = true, default_value = ".")]
    out: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available personas
    Personas,
    /// Set the active persona
    SetPersona {
        persona: String,
        /// Required for "Manual Entry"
        #[arg(long)]
        prompt_text: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List caller-id phone numbers
    Numbers,
    /// Place a screening call
    Call {
        number: String,
        /// Caller-id; defaults to the first available number
        #[arg(long = "from", default_value = "")]
        from_number: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        product: String,
    },
    /// End a running call
    EndCall { call_sid: String },
    /// Import candidates from a CSV file
    UploadCandidates { csv: PathBuf },
    /// Upload CV files (PDF or Word)
    UploadCvs { files: Vec<PathBuf> },
    /// Write the candidate CSV template
    Template,
    /// List bulk candidate records
    Records {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one bulk candidate record
    Record { id: String },
    /// Call the next pending candidate
    AutoTrigger,
    /// List interviews
    Interviews {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show transcript, analysis and recording of one call
    Interview { call_sid: String },
    /// Export a transcript or analysis to a file
    Download {
        call_sid: String,
        #[arg(long = "type", value_parser = parse_export_kind)]
        kind: ExportKind,
    },
    /// Print the recording playback URL
    RecordingUrl {
        call_sid: String,
        #[arg(long)]
        wav: bool,
    },
}

/// An explicit `--api-url` wins over the environment.
fn client_config(api_url: Option<String>) -> ClientConfig {
    match api_url {
        Some(url) if !url.trim().is_empty() => ClientConfig::new(url.trim()),
        _ => ClientConfig::from_env(),
    }
}

fn parse_export_kind(value: &str) -> Result<ExportKind, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = client_config(cli.api_url.clone());
    debug!(api_url = %config.base_url, "starting");
    let client = HttpClient::new(&config)?;
    let api = &client;
    let saver = DirectorySaver::new(&cli.out);

    match cli.command {
        Command::Personas => commands::personas(api).await,
        Command::SetPersona {
            persona,
            prompt_text,
            description,
        } => commands::set_persona(api, persona, prompt_text, description).await,
        Command::Numbers => commands::numbers(api).await,
        Command::Call {
            number,
            from_number,
            name,
            location,
            product,
        } => {
            let form = MakeCallForm {
                number,
                from_number,
                name,
                location,
                product,
            };
            commands::call(api, form).await
        }
        Command::EndCall { call_sid } => commands::end_call(api, &call_sid).await,
        Command::UploadCandidates { csv } => commands::upload_candidates(api, &csv).await,
        Command::UploadCvs { files } => commands::upload_cvs(api, &files).await,
        Command::Template => commands::template(&saver),
        Command::Records { status, page } => {
            commands::records(api, status.as_deref(), page).await
        }
        Command::Record { id } => commands::record(api, &id).await,
        Command::AutoTrigger => commands::auto_trigger(api).await,
        Command::Interviews { status, page } => {
            commands::interviews(api, status.as_deref(), page).await
        }
        Command::Interview { call_sid } => commands::interview(api, &call_sid).await,
        Command::Download { call_sid, kind } => {
            commands::download(api, &saver, &call_sid, kind).await
        }
        Command::RecordingUrl { call_sid, wav } => {
            commands::recording_url(api, &call_sid, wav);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_type_is_parsed() {
        let cli = Cli::try_parse_from(["screening", "download", "CA1", "--type", "analysis"])
            .expect("parse");
        match cli.command {
            Command::Download { call_sid, kind } => {
                assert_eq!(call_sid, "CA1");
                assert_eq!(kind, ExportKind::Analysis);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(
            Cli::try_parse_from(["screening", "download", "CA1", "--type", "audio"]).is_err()
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "screening",
            "records",
            "--status",
            "PENDING",
            "--page",
            "3",
            "--api-url",
            "http://backend:4000",
        ])
        .expect("parse");
        assert_eq!(cli.api_url.as_deref(), Some("http://backend:4000"));
        assert_eq!(client_config(cli.api_url).base_url, "http://backend:4000");
        assert!(matches!(
            cli.command,
            Command::Records { status: Some(ref s), page: 3 } if s == "PENDING"
        ));
    }

    #[test]
    fn call_defaults_caller_id_to_empty() {
        let cli = Cli::try_parse_from(["screening", "call", "+919876543210", "--name", "Rakesh"])
            .expect("parse");
        match cli.command {
            Command::Call {
                number,
                from_number,
                name,
                ..
            } => {
                assert_eq!(number, "+919876543210");
                assert!(from_number.is_empty());
                assert_eq!(name, "Rakesh");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
