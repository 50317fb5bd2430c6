//! Mindlog - command-line client for the idea sync layer
//!
//! Thin shell over the collection stores: resolves configuration, wires the
//! HTTP gateway and the env-backed token provider, and maps one subcommand
//! to one store operation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mindlog_client::{ArchivedIdeaStore, EnvTokenProvider, HttpIdeaGateway, IdeaStore};
use mindlog_common::config::ClientConfig;
use mindlog_common::{Idea, IdeaInput, IdeaUpdate};

/// Environment variable holding the bearer token
const TOKEN_ENV: &str = "MINDLOG_TOKEN";

/// Command-line arguments for mindlog
#[derive(Parser, Debug)]
#[command(name = "mindlog")]
#[command(about = "Capture and manage ideas against a remote store")]
#[command(version)]
struct Args {
    /// Base URL of the entries API
    #[arg(short, long, env = "MINDLOG_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List active ideas
    List,
    /// List archived ideas
    Archived,
    /// Show one idea fetched directly from the server
    Show { id: String },
    /// Capture a new idea from text
    Create {
        transcription: String,
        /// Recording length in seconds
        #[arg(short, long, default_value_t = 0.0)]
        duration: f64,
    },
    /// Capture a new idea from a recorded audio file
    CreateAudio {
        file: PathBuf,
        /// Recording length in seconds
        #[arg(short, long, default_value_t = 0.0)]
        duration: f64,
    },
    /// Update fields of an existing idea
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        transcription: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete an idea
    Delete { id: String },
    /// Archive an idea
    Archive { id: String },
    /// Unarchive an idea
    Unarchive { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ClientConfig::resolve(args.api_url.as_deref());
    info!("Using API at {}", config.base_url);

    let gateway =
        Arc::new(HttpIdeaGateway::new(&config.base_url).context("Failed to build HTTP gateway")?);
    let auth = Arc::new(EnvTokenProvider::new(TOKEN_ENV));

    let store = IdeaStore::new(gateway.clone(), auth.clone(), config.page_limit);
    let archived = ArchivedIdeaStore::new(gateway, auth, config.page_limit);

    match args.command {
        Command::List => {
            store.refresh().await;
            fail_on_error(store.error().await)?;
            print_ideas(&store.ideas().await);
        }
        Command::Archived => {
            archived.refresh().await;
            fail_on_error(archived.error().await)?;
            print_ideas(&archived.ideas().await);
        }
        Command::Show { id } => match store.get_details(&id).await {
            Some(idea) => print_idea(&idea),
            None => fail_on_error(store.error().await)?,
        },
        Command::Create {
            transcription,
            duration,
        } => {
            let input = IdeaInput {
                transcription,
                duration,
            };
            match store.create(&input).await {
                Some(idea) => println!("Created idea {}", idea.id),
                None => fail_on_error(store.error().await)?,
            }
        }
        Command::CreateAudio { file, duration } => {
            let audio = std::fs::read(&file)
                .with_context(|| format!("Failed to read audio file {}", file.display()))?;
            match store.create_with_audio(audio, duration).await {
                Some(idea) => println!("Created idea {} from audio", idea.id),
                None => fail_on_error(store.error().await)?,
            }
        }
        Command::Update {
            id,
            title,
            transcription,
            category,
        } => {
            let update = IdeaUpdate {
                title,
                transcription,
                category,
                ..Default::default()
            };
            if !store.update(&id, &update).await {
                fail_on_error(store.error().await)?;
            }
            println!("Updated idea {id}");
        }
        Command::Delete { id } => {
            if !store.delete(&id).await {
                fail_on_error(store.error().await)?;
            }
            println!("Deleted idea {id}");
        }
        Command::Archive { id } => {
            if !store.archive(&id).await {
                fail_on_error(store.error().await)?;
            }
            println!("Archived idea {id}");
        }
        Command::Unarchive { id } => {
            if !archived.unarchive(&id).await {
                fail_on_error(archived.error().await)?;
            }
            println!("Unarchived idea {id}");
        }
    }

    Ok(())
}

/// Turn a store's recorded error into a top-level failure
fn fail_on_error(error: Option<String>) -> Result<()> {
    match error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

fn print_ideas(ideas: &[Idea]) {
    if ideas.is_empty() {
        println!("(no ideas)");
        return;
    }
    for idea in ideas {
        let marker = if idea.ai_processed { "*" } else { " " };
        println!(
            "{} {} [{}] {}",
            marker,
            idea.id,
            idea.category,
            idea.title.as_deref().unwrap_or(&idea.transcription)
        );
    }
}

fn print_idea(idea: &Idea) {
    println!("id:            {}", idea.id);
    if let Some(title) = &idea.title {
        println!("title:         {title}");
    }
    println!("category:      {}", idea.category);
    println!("created:       {}", idea.created_at);
    println!("ai processed:  {}", idea.ai_processed);
    if let Some(duration) = idea.audio_duration {
        println!("duration:      {duration}s");
    }
    println!("transcription: {}", idea.transcription);
    if let Some(markdown) = &idea.ai_markdown {
        println!("---\n{markdown}");
    }
}
