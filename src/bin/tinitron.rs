//! CLI for the Tinitron URL shortener.
//!
//! Manages short links, per-link analytics and the user account through the
//! Tinitron microservices, using the same service layer an app frontend
//! would.
//!
//! # Usage
//!
//! ```bash
//! # List your links, grouped like the app shows them
//! cargo run --bin tinitron -- links list --all
//!
//! # Create a link interactively
//! cargo run --bin tinitron -- links create
//!
//! # Expire or delete links
//! cargo run --bin tinitron -- links expire abc1234
//! cargo run --bin tinitron -- links delete abc1234 xyz9876
//!
//! # Analytics
//! cargo run --bin tinitron -- analytics show abc1234
//!
//! # Offline demo of the grouping / pinning / expired filter
//! cargo run --bin tinitron -- demo
//! ```
//!
//! # Environment Variables
//!
//! - `LINKS_API_URL`, `USERS_API_URL` (required): microservice base URLs
//! - `TINITRON_ID_TOKEN`: bearer token (required for network commands)
//! - `TINITRON_UID`: user id (required for network commands)

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use tracing_subscriber::EnvFilter;

use tinitron_client::application::{AccountService, LinksService, SectionedLinks};
use tinitron_client::config::{self, Config};
use tinitron_client::domain::entities::{Link, LinkAnalytics, LinkDraft, MONTHS};
use tinitron_client::domain::gateways::{PreferenceStore, DELETE_EXPIRED_FLAG};
use tinitron_client::infrastructure::http::{
    HttpLinksGateway, HttpUserGateway, StaticTokenProvider,
};
use tinitron_client::infrastructure::preferences::JsonFileStore;
use tinitron_client::utils::sample;

const PREFS_FILE: &str = ".tinitron-prefs.json";

type RemoteLinksService = LinksService<HttpLinksGateway<StaticTokenProvider>>;

/// CLI tool for managing Tinitron short links.
#[derive(Parser)]
#[command(name = "tinitron")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Inspect click analytics
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },

    /// Manage the user account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show a generated sample board (no network access)
    Demo,
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links, grouped by creation day with pinned links first
    List {
        /// Page to fetch (zero-based)
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Follow pagination until every page is loaded
        #[arg(short, long)]
        all: bool,
    },

    /// Create a new link
    Create {
        /// Link title
        #[arg(short, long)]
        title: Option<String>,

        /// Destination URL
        #[arg(short, long)]
        url: Option<String>,

        /// Custom alias (alphanumeric; server picks one when omitted)
        #[arg(short, long)]
        alias: Option<String>,

        /// Days until expiration (default: 30)
        #[arg(short, long)]
        days: Option<i64>,

        /// Protect the link with a password (prompted)
        #[arg(long)]
        password: bool,
    },

    /// Show one link
    Show { key: String },

    /// Update a link's title, alias or expiration
    Update { key: String },

    /// Expire links immediately
    Expire {
        keys: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete links permanently
    Delete {
        keys: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Pin a link so it lists first
    Pin { key: String },

    /// Remove a link from the pinned list
    Unpin { key: String },
}

/// Analytics subcommands.
#[derive(Subcommand)]
enum AnalyticsAction {
    /// List analytics summaries
    List {
        /// Page to fetch (zero-based)
        #[arg(short, long, default_value_t = 0)]
        page: u32,
    },

    /// Show the full analytics record for one link
    Show { key: String },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Change the display username
    SetUsername {
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Change the account password (prompted, never echoed)
    SetPassword,

    /// Delete the account and all its links
    Delete {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The demo command works offline and without configuration.
    if matches!(cli.command, Commands::Demo) {
        init_tracing("info", "text");
        run_demo();
        return Ok(());
    }

    let config = config::load_from_env()?;
    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &config).await?,
        Commands::Analytics { action } => handle_analytics_action(action, &config).await?,
        Commands::Account { action } => handle_account_action(action, &config).await?,
        Commands::Demo => {}
    }

    Ok(())
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn required_uid(config: &Config) -> Result<String> {
    config.uid.clone().context("TINITRON_UID must be set for this command")
}

fn token_provider(config: &Config) -> Result<Arc<StaticTokenProvider>> {
    let token = config
        .id_token
        .clone()
        .context("TINITRON_ID_TOKEN must be set for this command")?;
    Ok(Arc::new(StaticTokenProvider::new(token)))
}

fn links_service(config: &Config) -> Result<RemoteLinksService> {
    let gateway = HttpLinksGateway::new(
        config.links_api_url.clone(),
        config.request_timeout(),
        token_provider(config)?,
    )?;
    Ok(LinksService::new(Arc::new(gateway), required_uid(config)?))
}

fn account_service(
    config: &Config,
) -> Result<AccountService<HttpUserGateway<StaticTokenProvider>>> {
    let gateway = HttpUserGateway::new(
        config.users_api_url.clone(),
        config.request_timeout(),
        token_provider(config)?,
    )?;
    Ok(AccountService::new(Arc::new(gateway)))
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, config: &Config) -> Result<()> {
    let mut service = links_service(config)?;
    let store = JsonFileStore::open(PREFS_FILE);

    match action {
        LinksAction::List { page, all } => list_links(&mut service, &store, page, all).await?,
        LinksAction::Create { title, url, alias, days, password } => {
            create_link(&service, title, url, alias, days, password).await?;
        }
        LinksAction::Show { key } => show_link(&service, &key).await?,
        LinksAction::Update { key } => update_link(&mut service, &key).await?,
        LinksAction::Expire { keys, yes } => expire_links(&mut service, keys, yes).await?,
        LinksAction::Delete { keys, yes } => delete_links(&mut service, &store, keys, yes).await?,
        LinksAction::Pin { key } => set_pin(&service, &store, &key, true),
        LinksAction::Unpin { key } => set_pin(&service, &store, &key, false),
    }

    Ok(())
}

/// Fetches links and prints them the way the app lists them: pinned links
/// first, the rest grouped by creation day, newest day first.
async fn list_links(
    service: &mut RemoteLinksService,
    store: &JsonFileStore,
    page: u32,
    all: bool,
) -> Result<()> {
    let mut current = service.refresh_links().await?;
    if all {
        while current.has_more() {
            current = service.fetch_more_links(current.page_number + 1).await?;
        }
    } else {
        for page_no in 1..=page {
            if !current.has_more() {
                break;
            }
            current = service.fetch_more_links(page_no).await?;
        }
    }

    let uid = service.uid().to_string();
    let mut board = SectionedLinks::new();
    board.rebuild(service.links(), &store.pinned_links(&uid));
    board.set_expired_filter(store.get_flag(&uid, DELETE_EXPIRED_FLAG));

    print_board(&board);

    if current.has_more() {
        println!(
            "  More pages available, next: {}",
            format!("--page {}", current.page_number + 1).bright_cyan()
        );
        println!();
    }

    Ok(())
}

fn print_board(board: &SectionedLinks) {
    println!("{}", "🔗 Your links".bright_blue().bold());
    println!();

    let sections = board.sections();
    if sections.iter().all(|s| s.links.is_empty()) {
        println!("{}", "  No links yet".yellow());
        println!();
        return;
    }

    for section in &sections {
        if section.links.is_empty() {
            continue;
        }
        println!("  {}", section.title.bright_white().bold());
        for link in &section.links {
            println!("    {}", link_line(link));
        }
        println!();
    }
}

fn link_line(link: &Link) -> String {
    let expiry = if link.is_expired() {
        "EXPIRED".red().to_string()
    } else {
        format!("{}d left", link.days_until_expiration()).green().to_string()
    };
    let lock = if link.password.is_some() { " 🔒" } else { "" };

    format!(
        "{:<10} {:<30} {} {}{}",
        link.short_url.cyan(),
        truncate(&link.title, 30),
        truncate(&link.original_url, 40).bright_black(),
        expiry,
        lock
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

/// Creates a link, prompting for anything not given as a flag.
async fn create_link(
    service: &RemoteLinksService,
    title: Option<String>,
    url: Option<String>,
    alias: Option<String>,
    days: Option<i64>,
    password: bool,
) -> Result<()> {
    println!("{}", "✨ Create link".bright_blue().bold());
    println!();

    let title = match title {
        Some(t) => t,
        None => Input::new().with_prompt("Title").interact_text()?,
    };
    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Destination URL").interact_text()?,
    };

    let mut draft = LinkDraft::new(title, url);
    if let Some(alias) = alias {
        draft = draft.with_alias(alias);
    }
    if let Some(days) = days {
        draft = draft.with_expiration(Utc::now() + Duration::days(days));
    }
    if password {
        let secret = Password::new()
            .with_prompt("Link password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?;
        draft = draft.with_password(secret);
    }

    let link = service.create_new_link(&draft).await?;

    println!();
    println!("{}", "✅ Link created".green().bold());
    println!("  {}", link_line(&link));
    println!();

    Ok(())
}

async fn show_link(service: &RemoteLinksService, key: &str) -> Result<()> {
    let link = service.fetch_link(key).await?;

    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  Title:    {}", link.title.cyan());
    println!("  Short:    {}", link.short_url.bright_yellow());
    println!("  Original: {}", link.original_url);
    println!("  Created:  {}", link.creation_date.format("%Y-%m-%d %H:%M"));
    println!("  Expires:  {}", link.expiration_date.format("%Y-%m-%d %H:%M"));
    if link.is_expired() {
        println!("  Status:   {}", "EXPIRED".red().bold());
    } else {
        println!(
            "  Status:   {} ({} days left)",
            "ACTIVE".green(),
            link.days_until_expiration()
        );
    }
    println!(
        "  Password: {}",
        if link.password.is_some() { "set" } else { "none" }
    );
    println!();

    Ok(())
}

/// Edits a link in place: current values are offered as the initial prompt
/// text, so hitting enter keeps them.
async fn update_link(service: &mut RemoteLinksService, key: &str) -> Result<()> {
    let current = service.fetch_link(key).await?;

    println!("{}", "✏️  Update link".bright_blue().bold());
    println!();

    let title: String = Input::new()
        .with_prompt("Title")
        .with_initial_text(current.title.clone())
        .interact_text()?;
    let alias: String = Input::new()
        .with_prompt("Short URL")
        .with_initial_text(current.short_url.clone())
        .interact_text()?;
    let days: i64 = Input::new()
        .with_prompt("Days until expiration")
        .with_initial_text(current.days_until_expiration().max(0).to_string())
        .interact_text()?;

    let mut updated = current.clone();
    updated.title = title;
    updated.short_url = alias;
    updated.expiration_date = Utc::now() + Duration::days(days);

    service.update_link(key, &updated).await?;

    println!();
    println!("{}", "✅ Link updated".green().bold());
    println!("  {}", link_line(&updated));
    println!();

    Ok(())
}

async fn expire_links(
    service: &mut RemoteLinksService,
    keys: Vec<String>,
    skip_confirm: bool,
) -> Result<()> {
    if keys.is_empty() {
        anyhow::bail!("no link keys given");
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Expire {} link(s) now?", keys.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.expire_links(&keys).await?;
    println!("{}", format!("✅ Expired {} link(s)", keys.len()).green().bold());

    Ok(())
}

async fn delete_links(
    service: &mut RemoteLinksService,
    store: &JsonFileStore,
    keys: Vec<String>,
    skip_confirm: bool,
) -> Result<()> {
    if keys.is_empty() {
        anyhow::bail!("no link keys given");
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete {} link(s)? This cannot be undone",
                keys.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete_links(&keys).await?;

    // Deleted links have no business staying pinned.
    let uid = service.uid().to_string();
    let remaining: Vec<String> = store
        .pinned_links(&uid)
        .into_iter()
        .filter(|k| !keys.contains(k))
        .collect();
    store.set_pinned_links(&uid, &remaining);

    println!("{}", format!("✅ Deleted {} link(s)", keys.len()).green().bold());

    Ok(())
}

fn set_pin(service: &RemoteLinksService, store: &JsonFileStore, key: &str, pin: bool) {
    let uid = service.uid().to_string();
    let mut pinned = store.pinned_links(&uid);

    if pin {
        if !pinned.iter().any(|k| k == key) {
            pinned.push(key.to_string());
        }
        println!("{}", format!("📌 Pinned {key}").green());
    } else {
        pinned.retain(|k| k != key);
        println!("{}", format!("Unpinned {key}").green());
    }

    store.set_pinned_links(&uid, &pinned);
}

/// Dispatches analytics commands.
async fn handle_analytics_action(action: AnalyticsAction, config: &Config) -> Result<()> {
    let mut service = links_service(config)?;

    match action {
        AnalyticsAction::List { page } => {
            service.refresh_analytics().await?;
            for page_no in 1..=page {
                service.fetch_more_analytics(page_no).await?;
            }

            println!("{}", "📊 Analytics".bright_blue().bold());
            println!();
            if service.analytics_data().is_empty() {
                println!("{}", "  No analytics yet".yellow());
            }
            for entry in service.analytics_data() {
                println!(
                    "  {:<10} {:>6} clicks this year",
                    entry.id.cyan(),
                    entry.month_total().to_string().bright_white()
                );
            }
            println!();
        }
        AnalyticsAction::Show { key } => {
            let analytics = service.fetch_link_analytic(&key).await?;
            print_analytics(&analytics);
        }
    }

    Ok(())
}

fn print_analytics(analytics: &LinkAnalytics) {
    println!("{}", format!("📊 Analytics for {}", analytics.id).bright_blue().bold());
    println!();

    if let Some(last) = analytics.last_access_date {
        println!("  Last access:   {}", last.format("%Y-%m-%d %H:%M"));
    } else {
        println!("  Last access:   never");
    }
    println!("  Total (year):  {}", analytics.total_per_year.to_string().bright_white().bold());
    println!("  Daily average: {:.2}", analytics.daily_average);
    println!("  Best month:    {}", analytics.max);
    println!("  Worst month:   {}", analytics.min);
    println!();

    println!("  {}", "Per month".bright_white().bold());
    let peak = analytics.per_month_clicks.values().copied().max().unwrap_or(0);
    for month in MONTHS {
        let clicks = analytics.clicks_in(month);
        let width = if peak > 0 { (clicks * 30 / peak) as usize } else { 0 };
        println!(
            "    {:<10} {:>5} {}",
            month,
            clicks,
            "▇".repeat(width).bright_cyan()
        );
    }
    println!();

    println!("  {}", "Browsers".bright_white().bold());
    for (browser, count) in &analytics.browser_counts {
        println!("    {:<10} {:>5}", browser, count);
    }
    println!();

    println!("  {}", "Operating systems".bright_white().bold());
    for (os, count) in &analytics.os_counts {
        println!("    {:<10} {:>5}", os, count);
    }
    println!();
}

/// Dispatches account commands.
async fn handle_account_action(action: AccountAction, config: &Config) -> Result<()> {
    let service = account_service(config)?;
    let uid = required_uid(config)?;

    match action {
        AccountAction::SetUsername { name } => {
            let name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("New username").interact_text()?,
            };
            service.change_username(&uid, &name).await?;
            println!("{}", "✅ Username updated".green().bold());
        }
        AccountAction::SetPassword => {
            let new_password = Password::new()
                .with_prompt("New password")
                .interact()?;
            let confirmation = Password::new()
                .with_prompt("Repeat new password")
                .interact()?;
            service.change_password(&uid, &new_password, &confirmation).await?;
            println!("{}", "✅ Password updated".green().bold());
        }
        AccountAction::Delete { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this account and all of its links?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }
            service.delete_account(&uid).await?;
            println!("{}", "✅ Account deleted".green().bold());
        }
    }

    Ok(())
}

/// Prints a generated board and walks through pinning and the expired
/// filter, without touching the network.
fn run_demo() {
    let links = sample::random_links(12);
    let analytics = sample::analytics_for_links(&links);

    let pinned: Vec<String> = links.iter().take(2).map(|l| l.short_url.clone()).collect();
    let mut board = SectionedLinks::new();
    board.rebuild(&links, &pinned);

    print_board(&board);

    println!("{}", "— with the expired filter on —".bright_black());
    println!();
    board.set_expired_filter(true);
    print_board(&board);
    board.set_expired_filter(false);

    if let Some(entry) = analytics.first() {
        print_analytics(entry);
    }
}
