use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    config::DEFAULT_CONFIG_FILE, load_settings, HttpItemsGateway, InventoryEvent,
    InventoryListController, ViewTree,
};
use shared::domain::{ItemDraft, ItemId, STATUS_IN_STOCK};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Inventory list widget driven from the command line")]
struct Args {
    /// Client settings file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides the configured API base url.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and show the inventory.
    List,
    /// Add an item.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = STATUS_IN_STOCK)]
        status: String,
    },
    /// Delete an item by id.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }

    let gateway = HttpItemsGateway::from_settings(&settings)?;
    let mut controller = InventoryListController::new(gateway, ViewTree::new());
    let mut events = controller.subscribe_events();

    // Failures are reported through the event channel below.
    let _ = controller.initialize().await;
    match args.command {
        Command::List => {}
        Command::Add { name, status } => {
            let _ = controller.add(ItemDraft::new(name, status)).await;
        }
        Command::Delete { id } => {
            let _ = controller.delete(ItemId(id)).await;
        }
    }

    print_notices(&mut events);
    print!("{}", controller.view());
    Ok(())
}

fn print_notices(events: &mut broadcast::Receiver<InventoryEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            InventoryEvent::Validation(text) => eprintln!("! {text}"),
            InventoryEvent::Alert(text) => eprintln!("!! {text}"),
            InventoryEvent::Info(text) => println!("{text}"),
        }
    }
}
