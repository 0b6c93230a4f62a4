//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `indexflow` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing report formatting
//!
//! All application logic is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process;

use indexflow::app::AddressOutcome;
use indexflow::identity::{HttpIdentityProvider, IdentityProvider, UserProfile};
use indexflow::initialization::init_logger_with;
use indexflow::storage::SqliteStore;
use indexflow::{App, AuditStatus, Config, Plan, SimulatedAuditor};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present (access token, RUST_LOG)
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let store = SqliteStore::open(&config.db_path)
        .await
        .context("Failed to open local storage")?;
    let mut app = App::new(SimulatedAuditor::new(), store, &config);
    app.startup().await;

    if app.cookie_banner_needed().await {
        println!(
            "indexflow stores your daily usage and audit history in {}; continuing accepts this.",
            config.db_path.display()
        );
        app.accept_cookies().await;
    }

    // Sign in: a real userinfo fetch when an access token is provided,
    // otherwise a simulated profile for --email.
    if let Ok(token) = std::env::var("INDEXFLOW_ACCESS_TOKEN") {
        let identity = HttpIdentityProvider::new().context("Failed to build identity client")?;
        match identity.fetch_profile(&token).await {
            Ok(profile) => app.login(profile).await,
            Err(e) => eprintln!("Login failed, continuing signed out: {e}"),
        }
    } else if let Some(email) = config.email.clone() {
        app.login(simulated_profile(&email)).await;
    }

    if config.clear_history {
        app.clear_history().await;
        println!("Audit history cleared.");
        return Ok(());
    }
    if config.show_history {
        print_history(&app);
        return Ok(());
    }

    let outcome = if let Some(address) = config.open.clone() {
        match app.on_address_changed(&address).await {
            AddressOutcome::AnalysisRequired(url) => app.submit(&url).await,
            _ => Ok(()),
        }
    } else if let Some(url) = config.url.clone() {
        app.submit(&url).await
    } else {
        eprintln!("No URL given. Try: indexflow https://example.com");
        return Ok(());
    };

    match outcome {
        Ok(()) => {
            print_report(&app, config.show_sitemap);
            app.stats().log_summary();
            Ok(())
        }
        Err(_) => {
            if let Some(message) = &app.view().error_message {
                eprintln!("{}", message.red());
            }
            process::exit(1);
        }
    }
}

/// Builds a stand-in profile for `--email` sign-ins, mirroring the shape a
/// real identity provider would return.
fn simulated_profile(email: &str) -> UserProfile {
    let local = email.split('@').next().unwrap_or(email);
    UserProfile {
        id: format!("local-{local}"),
        email: email.to_string(),
        name: local.to_string(),
        picture: String::new(),
        verified_email: false,
        given_name: local.to_string(),
        family_name: String::new(),
        locale: "en".to_string(),
    }
}

fn print_report(app: &App<SimulatedAuditor, SqliteStore>, show_sitemap: bool) {
    let view = app.view();
    let Some(result) = &view.result else {
        return;
    };
    let plan = app.session().plan();
    let url = view.active_url().unwrap_or_default();

    println!();
    println!("{} {}", "SEO audit for".bold(), url.bold().underline());

    for check in &result.checks {
        if check.tier == Plan::Premium && plan == Plan::Free {
            println!(
                "  {} {:<18} {}",
                "locked".dimmed(),
                check.label.dimmed(),
                "upgrade to Premium to unlock this check".dimmed()
            );
            continue;
        }
        let badge = match check.status {
            AuditStatus::Ok => "OK".green().bold(),
            AuditStatus::Problem => "PROBLEM".red().bold(),
            AuditStatus::Info => "INFO".blue().bold(),
        };
        println!("  {:<7} {:<18} {}", badge, check.label, check.detail);
        if check.status != AuditStatus::Ok {
            println!("          {}", check.recommendation.dimmed());
        }
    }

    if let Some(meta) = &result.generated_meta_tags {
        println!();
        println!("{}", "Suggested meta tags".bold());
        println!("  title:       {}", meta.title);
        println!("  description: {}", meta.description);
        println!("  keywords:    {}", meta.keywords);
    }

    if let Some(links) = &result.link_analysis {
        println!();
        println!("{}", "Internal link analysis".bold());
        for s in &links.anchor_text_suggestions {
            println!(
                "  {}: replace \"{}\" with \"{}\"",
                s.link, s.current_anchor_text, s.suggested_anchor_text
            );
        }
        for page in &links.orphaned_pages {
            println!("  orphaned: {page}");
        }
        for opp in &links.linking_opportunities {
            println!("  link {} from {} ({})", opp.target_page, opp.source_page_suggestion, opp.reason);
        }
    }

    println!();
    println!("Shareable address: {}", app.address().cyan());

    if show_sitemap {
        println!();
        println!("{}", result.sitemap_xml);
    }

    if view.quota_exhausted && plan == Plan::Free {
        println!(
            "{}",
            "You've reached your daily free limit. Upgrade to Premium for unlimited analyses."
                .yellow()
        );
    }
}

fn print_history(app: &App<SimulatedAuditor, SqliteStore>) {
    if !app.session().is_signed_in() {
        println!("Sign in (--email) to keep and view audit history.");
        return;
    }
    let entries = app.history();
    if entries.is_empty() {
        println!("No past audits yet.");
        return;
    }
    println!("{}", "Your audit history".bold());
    for entry in entries {
        println!(
            "  {}  {}  ({} checks)",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.url,
            entry.result.checks.len()
        );
    }
}
