use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shelflife::cli::{self, Cli};
use shelflife::{
    ChatClient, ChatClientConfig, DomainError, LookupExpiryUseCase, MockChatClient,
    OpenAiChatClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the answers.
    let filter = if cli.verbose {
        EnvFilter::new("shelflife=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(cli::exit_code_for(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let chat_client = build_chat_client(&cli)?;

    let today = Local::now().date_naive();
    let use_case = LookupExpiryUseCase::new(chat_client).with_today(today);

    let items = if cli.items.is_empty() {
        let item = cli::read_item_name(&mut std::io::stdin().lock(), &mut std::io::stdout())
            .context("failed to read item name from standard input")?
            .ok_or_else(|| DomainError::invalid_argument("no item name given"))?;
        vec![item]
    } else {
        cli.items.clone()
    };

    let labelled = items.len() > 1;
    for item in &items {
        let answer = use_case.execute(item).await?;
        let label = labelled.then_some(item.as_str());
        println!("{}", cli::format_report(label, &answer, today, cli.status));
    }

    Ok(())
}

fn build_chat_client(cli: &Cli) -> Result<Arc<dyn ChatClient>> {
    if let Some(reply) = &cli.mock_reply {
        info!("Using mock chat client");
        return Ok(Arc::new(MockChatClient::with_reply(reply.clone())));
    }

    let config = cli.apply_overrides(ChatClientConfig::from_env()?);
    debug!("Chat client config: {:?}", config);

    let client = OpenAiChatClient::new(&config)?;
    info!("Using {} at {}", client.model(), client.url());
    Ok(Arc::new(client))
}
