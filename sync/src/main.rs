//! quiz-order - reorder quiz questions from the command line.
//!
//! Loads the collection from the configured backend, runs one command through
//! the synchronizer and prints the resulting order.

use quiz_order_engine::Snapshot;
use clap::Parser;
use quiz_order_sync::{Cli, Command, Config, HttpBackend, MoveOutcome, Synchronizer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiz_order_sync=debug,quiz_order=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = Cli::parse().into_command();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Connecting to {}", config.collection_url());
    let backend = HttpBackend::new(&config)?;
    let sync = Synchronizer::connect(backend, config.request_timeout).await?;

    // Forward notifications to the log
    let mut events = sync.subscribe();
    let notifier = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if event.is_failure() {
                tracing::warn!("{}", event);
            } else {
                tracing::info!("{}", event);
            }
        }
    });

    let payload = command.create_payload();
    let order = match command {
        Command::List => sync.current_order(),
        Command::Move { id, index } => match sync.move_item(&id, index).await {
            Ok(MoveOutcome::Persisted { order }) => order,
            Ok(MoveOutcome::RolledBack { error, order, .. }) => {
                tracing::error!("Move was not saved: {}", error);
                order
            }
            Err(e) if e.is_no_op() => {
                tracing::info!("{} is already at index {}", id, index);
                sync.current_order()
            }
            Err(e) => return Err(e.into()),
        },
        Command::Remove { id } => {
            sync.remove_item(&id).await?;
            sync.current_order()
        }
        Command::Attach { ids } => sync.attach_items(ids).await?,
        Command::Create { .. } => {
            let created = sync.create_item(payload.unwrap_or_default()).await?;
            tracing::info!("Created {} at rank {}", created.id, created.rank);
            sync.current_order()
        }
    };

    print_order(&order);

    // Closing the channel ends the notifier
    drop(sync);
    notifier.await.ok();

    Ok(())
}

fn print_order(order: &Snapshot) {
    for item in order {
        println!("{:>3}. {:<24} {}", item.rank, item.id, item.title().unwrap_or(""));
    }
}
