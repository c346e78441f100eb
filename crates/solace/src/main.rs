// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Solace - a conversational customer support assistant.
//!
//! Binary entry point: loads configuration, opens the SQLite store, and
//! dispatches chat and ticket subcommands.

mod seed;

use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use solace_bot::tickets::TicketService;
use solace_bot::{ChatRequest, SupportBot};
use solace_config::SolaceConfig;
use solace_core::{SolaceError, Ticket, TicketStatus};
use solace_gemini::GeminiProvider;
use solace_storage::SqliteStore;

/// Solace - a conversational customer support assistant.
#[derive(Parser, Debug)]
#[command(name = "solace", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send one message to the support assistant.
    Chat {
        /// The message to send.
        message: String,
        /// Order to bring into the conversation context.
        #[arg(long)]
        order: Option<i64>,
        /// Ticket to bring into the conversation context.
        #[arg(long)]
        ticket: Option<i64>,
        /// User whose order history to bring into the context.
        #[arg(long)]
        user: Option<i64>,
    },
    /// Manage support tickets.
    #[command(subcommand)]
    Ticket(TicketCommand),
    /// Populate the database with sample users and orders.
    Seed,
    /// Print the effective configuration.
    Config,
}

#[derive(Subcommand, Debug)]
enum TicketCommand {
    /// Open a new ticket against an order.
    Create {
        /// The order the ticket is about.
        #[arg(long)]
        order: i64,
        /// Description of the issue.
        description: String,
    },
    /// Change a ticket's status.
    Status {
        /// The ticket to update.
        id: i64,
        /// New status: open, in_progress, resolved, or closed.
        status: String,
    },
    /// Show a single ticket.
    Show {
        /// The ticket to display.
        id: i64,
    },
    /// List tickets, optionally filtered.
    List {
        /// Only tickets with this status.
        #[arg(long)]
        status: Option<String>,
        /// Only tickets against this order.
        #[arg(long)]
        order: Option<i64>,
        /// Only tickets across this user's orders.
        #[arg(long)]
        user: Option<i64>,
    },
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solace={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Applies an optional status filter to an already-fetched ticket list, so
/// `--status` composes with `--order` and `--user` instead of being dropped.
fn filter_by_status(
    tickets: Vec<Ticket>,
    status: Option<&str>,
) -> Result<Vec<Ticket>, SolaceError> {
    let Some(raw) = status else {
        return Ok(tickets);
    };
    let wanted = TicketStatus::from_str(raw).map_err(|_| SolaceError::InvalidStatus {
        given: raw.to_string(),
    })?;
    Ok(tickets.into_iter().filter(|t| t.status == wanted).collect())
}

fn print_ticket(ticket: &Ticket) {
    println!(
        "Ticket #{}: {} (order #{})\n  {}\n  created {}  updated {}",
        ticket.id,
        ticket.status,
        ticket.order_id,
        ticket.issue_description,
        ticket.created_at.to_rfc3339(),
        ticket.updated_at.to_rfc3339()
    );
}

async fn run(cli: Cli, config: SolaceConfig) -> Result<(), SolaceError> {
    let store = Arc::new(SqliteStore::open(&config.storage.database_path).await?);

    let result = match cli.command {
        Some(Commands::Chat {
            message,
            order,
            ticket,
            user,
        }) => {
            let provider = Arc::new(GeminiProvider::from_config(&config.gemini)?);
            let knowledge =
                solace_bot::knowledge::load_documents(Path::new(&config.knowledge.documents_dir))
                    .await;
            let template = solace_bot::prompt::load_system_template(&config.agent).await;
            let bot = SupportBot::new(store.clone(), provider, knowledge, template);

            let mut request = ChatRequest::new(message);
            request.order_id = order;
            request.ticket_id = ticket;
            request.user_id = user;

            let reply = bot.respond(&request).await;
            println!("{reply}");
            Ok(())
        }
        Some(Commands::Ticket(cmd)) => {
            let tickets = TicketService::new(store.clone());
            match cmd {
                TicketCommand::Create { order, description } => {
                    let ticket = tickets.create(order, &description).await?;
                    print_ticket(&ticket);
                    Ok(())
                }
                TicketCommand::Status { id, status } => {
                    let transition = tickets.update_status(id, &status).await?;
                    println!(
                        "Ticket #{}: {} -> {}",
                        transition.ticket.id, transition.previous_status, transition.ticket.status
                    );
                    Ok(())
                }
                TicketCommand::Show { id } => {
                    let ticket = tickets.get(id).await?;
                    print_ticket(&ticket);
                    Ok(())
                }
                TicketCommand::List {
                    status,
                    order,
                    user,
                } => {
                    let listed = match (order, user) {
                        (Some(order_id), _) => {
                            filter_by_status(tickets.for_order(order_id).await?, status.as_deref())?
                        }
                        (None, Some(user_id)) => {
                            filter_by_status(tickets.for_user(user_id).await?, status.as_deref())?
                        }
                        (None, None) => tickets.list(status.as_deref()).await?,
                    };
                    if listed.is_empty() {
                        println!("No tickets found.");
                    }
                    for ticket in &listed {
                        print_ticket(ticket);
                    }
                    Ok(())
                }
            }
        }
        Some(Commands::Seed) => seed::seed_sample_data(store.as_ref()).await,
        Some(Commands::Config) => {
            println!("agent.name = {}", config.agent.name);
            println!("agent.log_level = {}", config.agent.log_level);
            println!("gemini.model = {}", config.gemini.model);
            println!("gemini.base_url = {}", config.gemini.base_url);
            println!("storage.database_path = {}", config.storage.database_path);
            println!("knowledge.documents_dir = {}", config.knowledge.documents_dir);
            Ok(())
        }
        None => {
            println!("solace: use --help for available commands");
            Ok(())
        }
    };

    store.close().await?;
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match solace_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            solace_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.agent.log_level);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("solace: {e}");
            ExitCode::FAILURE
        }
    }
}
