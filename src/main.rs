//! Interactive CLI host for the expense assistant.
//!
//! Runs one session at a time over stdin: every line is a turn, `quit` exits
//! cleanly without persisting anything.

use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use spendlog::adapters::{JsonFileStore, OpenAiConfig, OpenAiExtractor};
use spendlog::application::SubmitTurnHandler;
use spendlog::config::AppConfig;
use spendlog::domain::foundation::SessionId;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spendlog=info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let oracle_config = OpenAiConfig::new(config.ai.openai_api_key.clone().unwrap_or_default())
        .with_model(&config.ai.model)
        .with_base_url(&config.ai.base_url)
        .with_timeout(config.ai.timeout())
        .with_temperature(config.ai.temperature);

    let handler = SubmitTurnHandler::new(
        Arc::new(OpenAiExtractor::new(oracle_config)),
        Arc::new(JsonFileStore::new(&config.storage.path)),
    );

    println!("Welcome to the Expense Tracker!");
    println!("Enter your expenses in natural language (or 'quit' to exit)");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut session_id = SessionId::new();

    loop {
        stdout.write_all(b"\nExpense: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") {
            handler.abort_session(session_id).await;
            break;
        }

        match handler.submit_turn(session_id, input).await {
            Ok(response) => {
                println!("{}", response.message);
                if response.session_complete {
                    session_id = SessionId::new();
                }
            }
            Err(err) => eprintln!("Error: {}", err),
        }
    }

    Ok(())
}
