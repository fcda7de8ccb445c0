use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, normalize_base_url, DeleteOutcome, HttpItemsApi, ItemListController, ItemsApi,
    SubmitOutcome,
};
use shared::domain::ItemId;
use tracing_subscriber::EnvFilter;

mod shell;
mod terminal;

use terminal::TerminalSurface;

#[derive(Parser, Debug)]
#[command(about = "List, create, update and delete items on a remote items service")]
struct Cli {
    /// Base url of the items service, e.g. http://127.0.0.1:8000
    #[arg(long)]
    api_base_url: Option<String>,
    /// Config file; defaults to ./items.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current collection
    List,
    /// Print one item
    Show { id: i64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        offer: bool,
    },
    /// Load an item into the form, apply the given fields and submit it
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        offer: Option<bool>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Interactive session (default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    tracing::info!(api_base_url = %settings.api_base_url, "using items service");

    let api = HttpItemsApi::from_settings(&settings).context("failed to build http client")?;
    let assume_yes = matches!(cli.command, Some(Command::Delete { yes: true, .. }));
    let surface = TerminalSurface::new(io::stdin().lock(), io::stdout()).assume_yes(assume_yes);
    let mut controller = ItemListController::new(api, surface);

    let ok = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            shell::run(&mut controller).await;
            true
        }
        Command::List => {
            controller.initialize().await;
            true
        }
        Command::Show { id } => show(&mut controller, ItemId(id)).await?,
        Command::Create {
            name,
            price,
            description,
            offer,
        } => {
            let form = controller.surface_mut().form_mut();
            form.name = name;
            form.price = price;
            form.description = description;
            form.is_offer = offer;
            controller.submit().await.is_success()
        }
        Command::Update {
            id,
            name,
            price,
            description,
            offer,
        } => {
            let id = ItemId(id);
            let items = controller.refresh().await;
            let item = items
                .iter()
                .find(|item| item.id == id)
                .ok_or_else(|| anyhow!("item {id} not found"))?;
            controller.begin_edit(item);

            let form = controller.surface_mut().form_mut();
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(offer) = offer {
                form.is_offer = offer;
            }
            matches!(controller.submit().await, SubmitOutcome::Updated(_))
        }
        Command::Delete { id, .. } => matches!(
            controller.delete(ItemId(id)).await,
            DeleteOutcome::Deleted(_)
        ),
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn show<A, R, W>(
    controller: &mut ItemListController<A, TerminalSurface<R, W>>,
    id: ItemId,
) -> Result<bool>
where
    A: ItemsApi,
    R: BufRead,
    W: Write,
{
    let result = controller.api().get_item(id).await;
    match result {
        Ok(item) => {
            controller.render(std::slice::from_ref(&item));
            Ok(true)
        }
        Err(err) => {
            let message = err.user_message("Unknown error while fetching item.");
            controller
                .surface_mut()
                .print(&format!("! Error fetching item: {message}"));
            Ok(false)
        }
    }
}
