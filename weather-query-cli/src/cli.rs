use std::{fs, io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomUserError, InquireError, Text, validator::Validation};
use weather_query_core::{
    Config, QueryError, QueryResult, QueryService, QuerySession, client_from_config,
    config::{ENDPOINT_ENV, normalize_endpoint},
    parse, render,
};

use crate::output;

const PLACEHOLDER: &str = "e.g., What's the weather in Pune?";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-query",
    version,
    about = "Ask a weather assistant and get a structured summary"
)]
pub struct Cli {
    /// Base address of the assistant backend. Overrides the config file
    /// and the WEATHER_QUERY_ENDPOINT environment variable.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Log requests and parse results to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a single question and print the answer.
    Ask {
        /// The question, e.g. "What's the weather in Pune?".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Ask questions interactively until `exit`, `quit` or Esc.
    Chat,

    /// Parse a saved reply offline and print the summary.
    Parse {
        /// File with the reply text; reads stdin when absent.
        file: Option<PathBuf>,

        /// Print the extracted fields as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Set the assistant endpoint and store it in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Ask { ref query } => {
                let service = self.service()?;
                let mut session = QuerySession::new();
                ask(&mut session, service.as_ref(), &query.join(" ")).await?;
            }
            Command::Chat => {
                let service = self.service()?;
                chat(service.as_ref()).await?;
            }
            Command::Parse { ref file, json } => {
                let text = match file {
                    Some(path) => fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
                };

                if json {
                    println!("{}", serde_json::to_string_pretty(&parse(&text))?);
                } else {
                    let state = render(Some(&QueryResult::success(text)), false);
                    println!("{}", output::format_state(&state));
                }
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }

    fn service(&self) -> anyhow::Result<Box<dyn QueryService>> {
        let config = Config::load()?;
        let env = std::env::var(ENDPOINT_ENV).ok();

        let service = client_from_config(&config, self.endpoint.as_deref(), env.as_deref())?;
        tracing::debug!(?service, "resolved query service");

        Ok(service)
    }
}

/// Run one query through the session, printing the loading line and result.
///
/// A rejected input is returned without contacting `service`.
async fn ask(
    session: &mut QuerySession,
    service: &dyn QueryService,
    input: &str,
) -> Result<(), QueryError> {
    let query = session.begin(input)?;

    eprintln!("{}", output::format_state(&session.display()));
    let result = service.submit(&query).await;
    session.finish(result);

    println!("{}", output::format_state(&session.display()));

    Ok(())
}

async fn chat(service: &dyn QueryService) -> anyhow::Result<()> {
    let mut session = QuerySession::new();

    loop {
        let input = match Text::new("Ask me about weather:")
            .with_placeholder(PLACEHOLDER)
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if matches!(input.trim(), "exit" | "quit") {
            break;
        }

        session.edit();
        if let Err(err) = ask(&mut session, service, &input).await {
            eprintln!("{}", output::format_input_error(&err));
        }
        println!();
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let endpoint = Text::new("Assistant endpoint:")
        .with_default(config.endpoint())
        .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
            Ok(match normalize_endpoint(input) {
                Ok(_) => Validation::Valid,
                Err(err) => Validation::Invalid(err.to_string().into()),
            })
        })
        .prompt()?;

    config.set_endpoint(&endpoint)?;
    config.save()?;

    println!(
        "Saved endpoint {} to {}",
        config.endpoint(),
        Config::config_file_path()?.display()
    );

    Ok(())
}
