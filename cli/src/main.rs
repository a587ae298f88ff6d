use clap::{Parser, Subcommand};
use coursedesk::api::{ApiClient, LessonDraftApi};
use coursedesk::error::{AppError, AppResult};
use coursedesk::model::entity::{DraftStatus, LessonType};
use coursedesk::model::{DraftFilter, DraftStore, Filter};
use coursedesk::notify::ConsoleNotifier;
use coursedesk::review::{ApprovalCoordinator, QuickView, ReviewError, ReviewOutcome};
use coursedesk::{Config, render};

#[derive(Parser, Debug)]
#[command(about = "CLI tool for reviewing lesson drafts", long_about = None)]
pub struct Cli {
    /// Read ./config.toml instead of the per-user config
    #[arg(long, global = true, default_value_t = false)]
    local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review lesson drafts
    Drafts {
        #[command(subcommand)]
        action: DraftCommands,
    },
}

/// Lesson draft review
#[derive(Subcommand, Debug)]
pub enum DraftCommands {
    List {
        /// Matches title or instructor name
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: Filter<DraftStatus>,
        #[arg(long = "type", default_value = "all")]
        lesson_type: Filter<LessonType>,
    },
    Show {
        id: i64,
    },
    Approve {
        id: i64,
    },
    Reject {
        id: i64,
        #[arg(long)]
        reason: String,
    },
}

async fn open_view(
    client: &ApiClient,
    store: &DraftStore,
    notifier: &ConsoleNotifier,
    id: i64,
) -> AppResult<QuickView> {
    let draft = store
        .get(id)
        .cloned()
        .ok_or(ReviewError::DraftNotFound { draft_id: id })?;
    Ok(QuickView::open(client, draft, notifier).await)
}

fn finish(outcome: ReviewOutcome) -> AppResult<()> {
    match outcome {
        ReviewOutcome::Applied(status) => {
            println!("draft is now {status}");
            Ok(())
        }
        ReviewOutcome::Failed(e) => {
            if let Some(redirect) = e.redirect() {
                eprintln!("session refused, continue at {}", redirect.route());
            }
            Err(AppError::from(e))
        }
        ReviewOutcome::Invalid(e) | ReviewOutcome::Ignored(e) => Err(AppError::from(e)),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    coursedesk::setup_trace();
    let args = Cli::parse();

    let config = Config::get_or_init(args.local).await;
    let client = ApiClient::new(config.api())?;
    let notifier = ConsoleNotifier;

    let page = client.list_drafts().await?;
    let mut store = DraftStore::from_drafts(page.drafts);
    tracing::debug!(total = page.total_elements, "drafts loaded");

    match args.command {
        Commands::Drafts { action } => match action {
            DraftCommands::List { search, status, lesson_type } => {
                let filter = DraftFilter::new(search, status, lesson_type);
                let visible = store.visible(&filter);
                println!("{}", render::list_header(store.counts(), visible.len(), &filter));
                println!("{}", render::draft_table(&visible));
            }

            DraftCommands::Show { id } => {
                let view = open_view(&client, &store, &notifier, id).await?;
                println!("{}", render::quick_view(&view));
            }

            DraftCommands::Approve { id } => {
                let mut view = open_view(&client, &store, &notifier, id).await?;
                let outcome = ApprovalCoordinator::new(&client, &mut store, &notifier)
                    .approve(&mut view)
                    .await;
                finish(outcome)?;
            }

            DraftCommands::Reject { id, reason } => {
                let mut view = open_view(&client, &store, &notifier, id).await?;
                let outcome = ApprovalCoordinator::new(&client, &mut store, &notifier)
                    .reject(&mut view, &reason)
                    .await;
                finish(outcome)?;
            }
        },
    }

    Ok(())
}
