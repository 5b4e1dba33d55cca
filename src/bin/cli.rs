// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use maeve_core::gateway::{Member, StaticGateway};
use maeve_core::{BooklistSession, BotConfig, Button, Commands, Database, RawBookFields, ViewUpdate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maeve-cli")]
#[command(about = "Maeve CLI - Desktop testing tool", long_about = None)]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "maeve.toml")]
    config: PathBuf,

    /// Database file, overrides the config
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Acting member id
    #[arg(long, global = true, default_value_t = 1)]
    user_id: i64,

    /// Acting member name
    #[arg(long, global = true, default_value = "reader")]
    name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register the acting member
    Start,
    /// Add a book
    Add {
        title: String,
        #[command(flatten)]
        fields: BookArgs,
    },
    /// Replace a book's fields
    Update {
        /// Current title
        old_title: String,
        /// New title
        title: String,
        #[command(flatten)]
        fields: BookArgs,
    },
    /// Set a review (empty text removes it)
    Review { title: String, review: String },
    /// Delete a book
    Delete { title: String },
    /// List the acting member's books
    List,
    /// Show the acting member's profile
    Profile,
    /// Set the "about me" text
    About { text: String },
    /// Toggle booklist privacy
    Privacy,
    /// Run the SQLite integrity check on the database file
    Check,
    /// Open the booklist view and replay button presses
    View {
        /// Member to switch to before pressing
        #[arg(long)]
        member: Option<String>,
        /// Presses in order, e.g. `right down get-review`
        #[arg(value_enum)]
        presses: Vec<Press>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct BookArgs {
    #[arg(short, long)]
    author: Option<String>,
    #[arg(short, long)]
    year: Option<i32>,
    #[arg(short, long)]
    interest: Option<i32>,
}

impl BookArgs {
    fn into_fields(self, title: String) -> RawBookFields {
        RawBookFields {
            title: Some(title),
            author: self.author,
            read_year: self.year,
            interest: self.interest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Press {
    Left,
    Right,
    Up,
    Down,
    GetReview,
}

impl From<Press> for Button {
    fn from(press: Press) -> Self {
        match press {
            Press::Left => Button::Left,
            Press::Right => Button::Right,
            Press::Up => Button::Up,
            Press::Down => Button::Down,
            Press::GetReview => Button::GetReview,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,maeve_core=debug")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = BotConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(db) = &cli.db {
        config.database_path = db.display().to_string();
    }
    config.validate()?;

    let db = Database::new(&config.database_path)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_path))?;

    let gateway = StaticGateway::new().with_member(Member::new(cli.user_id, cli.name.clone()));
    let outcome = run(&db, &gateway, &config, cli.user_id, cli.command).await;

    db.close().await?;
    outcome
}

async fn run(
    db: &Database,
    gateway: &StaticGateway,
    config: &BotConfig,
    user_id: i64,
    command: Command,
) -> anyhow::Result<()> {
    let commands = Commands::new(db, gateway, config);

    let result = match command {
        Command::Start => commands.start(user_id).await,
        Command::Add { title, fields } => {
            commands.add_book(user_id, &fields.into_fields(title)).await
        }
        Command::Update {
            old_title,
            title,
            fields,
        } => {
            commands
                .update_book(user_id, &old_title, &fields.into_fields(title))
                .await
        }
        Command::Review { title, review } => commands.review_book(user_id, &title, &review).await,
        Command::Delete { title } => commands.delete_book(user_id, &title).await,
        Command::List => commands.show_books(user_id).await,
        Command::Profile => commands.profile(user_id).await,
        Command::About { text } => commands.set_about_me(user_id, &text).await,
        Command::Privacy => commands.toggle_privacy(user_id).await,
        Command::Check => {
            if db.check_integrity().await? {
                println!("Database OK");
                return Ok(());
            }
            anyhow::bail!("Database integrity check failed");
        }
        Command::View {
            member,
            presses,
            json,
        } => {
            let session = commands.open_booklist().await?;
            return run_view(db, session, member, presses, json).await;
        }
    };

    match result {
        Ok(reply) => println!("{}", reply.text()),
        Err(e) if e.is_user_error() => eprintln!("{}", e.user_message()),
        Err(e) if e.is_database_error() => {
            let location = db
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "in-memory database".to_string());
            return Err(anyhow::Error::new(e).context(format!("Store failure in {}", location)));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn run_view(
    db: &Database,
    mut session: BooklistSession,
    member: Option<String>,
    presses: Vec<Press>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(name) = member {
        session.select_member(db, &name, Utc::now()).await?;
    }

    for entry in BooklistSession::directory(db).await? {
        println!("[{}] {}", entry.label, entry.name);
    }

    let mut update = ViewUpdate::Page(session.render());
    for press in presses {
        update = session.press(press.into(), Utc::now());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    let placeholder = session.render_settings().placeholder.clone();
    match update {
        ViewUpdate::Page(page) => println!("{}", page.to_text(&placeholder)),
        ViewUpdate::Review { title, review } => println!("{}\n{}", title, review),
        ViewUpdate::Notice(notice) => println!("{}", notice),
    }
    Ok(())
}
