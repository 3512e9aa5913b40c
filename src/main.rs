use anyhow::Result;
use assistant_link::{
    Error, ErrorKind,
    assistant::{AssistantClient, AssistantState, ConversationQuery},
    config::{self, Config},
    polling::{FnObserver, StatusPoller},
};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const HELP: &str = "\
Commands:
  /status              current assistant status
  /stats               session statistics
  /history [limit]     conversation so far
  /examples [category] example questions
  /reset               start a new session
  /health              probe the service
  /watch, /unwatch     toggle status polling
  /quit                exit
Anything else is asked as a question.";

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn describe(err: &Error) -> String {
    match err.kind() {
        ErrorKind::Unreachable => format!("Assistant service unreachable: {}", err),
        ErrorKind::Service => format!("Assistant reported a problem: {}", err),
        ErrorKind::InvalidInput => err.to_string(),
        ErrorKind::Malformed => format!("Unexpected response from assistant: {}", err),
        ErrorKind::Local => format!("Local error: {}", err),
    }
}

fn status_poller(client: &AssistantClient) -> StatusPoller {
    let last_state: Mutex<Option<AssistantState>> = Mutex::new(None);
    let observer = FnObserver::new(
        move |status| {
            if let Ok(mut last) = last_state.lock() {
                if last.as_ref() != Some(&status.assistant_status) {
                    println!(
                        "[watch] {} (questions: {}, session: {})",
                        status.assistant_status, status.question_count, status.session_id
                    );
                    *last = Some(status.assistant_status);
                }
            }
        },
        |err| println!("[watch] {}", describe(&err)),
    );

    StatusPoller::new(Arc::new(client.clone()), Arc::new(observer))
}

/// Runs one console line. Returns `false` when the user asked to quit.
async fn handle_line(
    line: &str,
    client: &AssistantClient,
    poller: &StatusPoller,
    config: &Config,
) -> std::result::Result<bool, Error> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match command {
        "/quit" | "/exit" => return Ok(false),
        "/help" => println!("{HELP}"),
        "/status" => {
            let status = client.get_status().await?;
            println!(
                "{} | available: {} | questions: {} | session: {}",
                status.assistant_status,
                status.assistant_available,
                status.question_count,
                status.session_id
            );
        }
        "/stats" => {
            let stats = client.get_stats().await?;
            println!(
                "questions: {} | entries: {} | status: {} | session: {}",
                stats.total_questions,
                stats.conversation_entries,
                stats.assistant_status,
                stats.session_id
            );
        }
        "/history" => {
            let mut query = ConversationQuery::new();
            if let Some(limit) = argument {
                let limit = limit
                    .parse()
                    .map_err(|_| Error::validation(format!("Invalid limit: {limit}")))?;
                query = query.limit(limit);
            }
            let entries = client.get_conversation(&query).await?;
            if entries.is_empty() {
                println!("(no conversation yet)");
            }
            for entry in entries {
                println!("#{} Q: {}\n   A: {}", entry.id, entry.question, entry.answer);
            }
        }
        "/examples" => {
            for example in client.get_example_questions(argument).await? {
                println!("[{}] {}: {}", example.category, example.question, example.description);
            }
        }
        "/reset" => {
            let outcome = client.reset_conversation().await?;
            println!("New session: {}", outcome.session_id);
        }
        "/health" => {
            let healthy = client.check_health().await;
            println!("{}", if healthy { "healthy" } else { "unreachable" });
        }
        "/watch" => poller.start(config.polling.interval())?,
        "/unwatch" => poller.stop(),
        other if other.starts_with('/') => println!("Unknown command: {other}\n{HELP}"),
        _ => {
            let response = client
                .ask_question(line, config.user_id.as_deref())
                .await?;
            println!("[{}] {}", response.question_number, response.answer);
        }
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let client = AssistantClient::new(&config.api)?;
    info!("Assistant console connecting to {}", client.base_url());

    if client.check_health().await {
        println!("Connected to {}", client.base_url());
    } else {
        println!("Assistant at {} is not responding yet", client.base_url());
    }
    println!("{HELP}");

    let poller = status_poller(&client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_line(line, &client, &poller, &config).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("{}", describe(&e)),
        }
    }

    poller.stop();
    info!("Assistant console exiting");
    Ok(())
}
