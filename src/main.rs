//! Binary entrypoint for the SpicyBeats CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `privileges --role <role> [--reputation <n>]` - print the resolved privileges as JSON
//! - `roles` - print the privilege table for every role
//! - `deals [--list <name>] [--sort <key>] [--category <id>] [--search <text>] [--nearby]
//!   [--refresh]` - print a ranked deal list
//! - `vote --deal <id> [--direction <up|down>] [--role <role>] [--reputation <n>]` - cast
//!   one vote, signing in as a random demo role when no role is given
//! - `status` - summarize configuration and seed data
//!
//! See the library crate docs for module-level details: `spicybeats::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::Path;

use spicybeats::alerts::AlertInbox;
use spicybeats::community::prompt::Prompt;
use spicybeats::community::roles::{resolve_privileges_named, UserRole};
use spicybeats::community::session::Session;
use spicybeats::config::Config;
use spicybeats::deals::ranker::{DealFilter, SortKey};
use spicybeats::deals::{Deal, DealFeed, VoteDirection};
use spicybeats::seed::{self, DealSeeds};

#[derive(Parser)]
#[command(name = "spicybeats")]
#[command(about = "Community deals: privileges, ranking and voting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Resolve the privileges of a role at a reputation
    Privileges {
        #[arg(short, long)]
        role: String,
        #[arg(short = 'p', long)]
        reputation: Option<f64>,
    },
    /// Show the privilege table for every role
    Roles,
    /// List deals ranked pinned-first
    Deals {
        /// home, nearby, trending or saved
        #[arg(short, long, default_value = "home")]
        list: String,
        /// newest, popularity or distance (defaults to the configured sort)
        #[arg(short, long)]
        sort: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        /// Only deals within the configured nearby radius
        #[arg(long)]
        nearby: bool,
        /// Pull to refresh first, adding the newly found deals
        #[arg(long)]
        refresh: bool,
    },
    /// Vote on a home-feed deal
    Vote {
        #[arg(short, long)]
        deal: u64,
        #[arg(short = 'D', long, default_value = "up")]
        direction: String,
        /// Role to vote as; without one a demo sign-in picks a random role
        #[arg(short, long)]
        role: Option<String>,
        /// Reputation for the voter (defaults to the configured demo reputation)
        #[arg(short = 'p', long)]
        reputation: Option<f64>,
    },
    /// Show configuration and seed data summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init runs before a config file exists
    let config = match cli.command {
        Commands::Init => None,
        _ => Some(load_config(&cli.config).await),
    };
    init_logging(config.as_ref(), cli.verbose);

    match cli.command {
        Commands::Init => {
            if Path::new(&cli.config).exists() {
                warn!("{} already exists; leaving it unchanged", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Privileges { role, reputation } => {
            let role = normalize_name(&role);
            if UserRole::parse(&role).is_none() {
                warn!("Unknown role '{}'; every privilege is off", role);
            }
            let privileges = resolve_privileges_named(&role, reputation);
            println!("{}", serde_json::to_string_pretty(&privileges)?);
        }
        Commands::Roles => print_roles(),
        Commands::Deals { list, sort, category, search, nearby, refresh } => {
            let config = config.unwrap_or_default();
            let mut seeds = load_deal_seeds(&config)?;
            let found = std::mem::take(&mut seeds.refresh);
            let mut feed = DealFeed::new(&list, pick_list(seeds, &list)?);
            if refresh {
                for deal in found {
                    print_prompt(&feed.refresh(deal));
                }
            }
            let sort = sort.map_or_else(|| config.feed.sort_key(), |s| {
                SortKey::from_name(&normalize_name(&s))
            });
            let deals = if nearby {
                let radius = config.feed.nearby_radius();
                info!("Showing deals within {} miles", radius);
                feed.nearby(radius)
            } else {
                let filter = DealFilter { query: search, category };
                feed.view(&filter, sort)
            };
            print_deals(&deals);
        }
        Commands::Vote { deal, direction, role, reputation } => {
            let config = config.unwrap_or_default();
            let direction: VoteDirection = direction.parse()?;
            let reputation = reputation.unwrap_or(config.app.demo_reputation);
            let mut session = Session::guest();
            match role {
                Some(role) => {
                    let role: UserRole = normalize_name(&role).parse()?;
                    if role != UserRole::Guest {
                        session.sign_in("cli", role, reputation);
                    }
                }
                None => {
                    let role = session.sign_in_demo(&mut rand::thread_rng(), reputation);
                    println!("Signed in as {} (demo)", role.display_name());
                }
            }
            let mut feed = DealFeed::new("home", load_deal_seeds(&config)?.home);
            match feed.vote(&session, deal, direction) {
                Ok(Some(votes)) => {
                    print_prompt(&direction.recorded_prompt());
                    println!("deal {}: {} up / {} down", deal, votes.up, votes.down);
                }
                Ok(None) => return Err(anyhow!("no deal with id {}", deal)),
                Err(denial) => print_prompt(&denial.prompt()),
            }
        }
        Commands::Status => {
            let config = config.unwrap_or_default();
            let seeds = load_deal_seeds(&config)?;
            let alerts = match config.seeds.alerts_file.as_deref() {
                Some(path) => seed::load_alerts(path)?,
                None => seed::builtin_alerts()?,
            };
            let inbox = AlertInbox::new(alerts);
            println!("{}", config.app.name);
            println!("  default sort:    {}", config.feed.sort_key());
            println!("  nearby radius:   {} miles", config.feed.nearby_radius());
            println!(
                "  moderation:      {}",
                if config.moderation.require_moderation { "required" } else { "off" }
            );
            println!(
                "  deals:           {} home, {} nearby, {} trending, {} saved",
                seeds.home.len(),
                seeds.nearby.len(),
                seeds.trending.len(),
                seeds.saved.len()
            );
            println!(
                "  alerts:          {} unread, {} preferences on",
                inbox.unread_count(),
                config.alerts.active_count()
            );
        }
    }

    Ok(())
}

/// Load the config file, falling back to defaults when it is missing or unreadable.
async fn load_config(path: &str) -> Config {
    match Config::load(path).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} (using defaults)", e);
            Config::default()
        }
    }
}

/// Role and sort ids are lowercase; accept any case on the command line.
fn normalize_name(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

fn load_deal_seeds(config: &Config) -> Result<DealSeeds> {
    Ok(match config.seeds.deals_file.as_deref() {
        Some(path) => seed::load_deal_seeds(path)?,
        None => seed::builtin_seeds()?,
    })
}

fn pick_list(seeds: DealSeeds, name: &str) -> Result<Vec<Deal>> {
    match name {
        "home" => Ok(seeds.home),
        "nearby" => Ok(seeds.nearby),
        "trending" => Ok(seeds.trending),
        "saved" => Ok(seeds.saved),
        other => Err(anyhow!("unknown list '{}' (expected home, nearby, trending or saved)", other)),
    }
}

fn print_roles() {
    println!(
        "{:<12} {:<14} {:<8} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6}",
        "ROLE", "NAME", "COLOUR", "POST", "VOTE", "MOD", "ADMIN", "AUTO", "DAILY"
    );
    let flag = |b: bool| if b { "yes" } else { "-" };
    for role in UserRole::ALL {
        let p = role.privileges();
        println!(
            "{:<12} {:<14} {:<8} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6}",
            role.as_str(),
            role.display_name(),
            role.color(),
            flag(p.can_post),
            flag(p.can_vote),
            flag(p.can_moderate),
            flag(p.can_access_admin),
            flag(p.auto_approve),
            p.max_daily_posts
        );
    }
    println!("(reputation 0; users post from 2.0, verified members auto-approve from 4.0)");
}

fn print_deals(deals: &[Deal]) {
    if deals.is_empty() {
        println!("No deals found");
        return;
    }
    let now = chrono::Utc::now();
    for deal in deals {
        let discount = deal.discount_percentage().map(|p| format!(" -{}%", p)).unwrap_or_default();
        println!(
            "{}{:>4}  {:<40} {:>12}{}  {:>+5}  {:<10}  {}",
            if deal.is_pinned { "*" } else { " " },
            deal.id,
            deal.title,
            deal.price,
            discount,
            deal.score(),
            deal.distance,
            deal.time_ago(now)
        );
    }
}

fn print_prompt(prompt: &Prompt) {
    println!("{}", prompt.title);
    println!("  {}", prompt.message);
    let labels: Vec<&str> = prompt.actions.iter().map(|a| a.label.as_str()).collect();
    if !labels.is_empty() {
        println!("  [{}]", labels.join("] ["));
    }
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    let configured = config.and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok());
    let level = match verbosity {
        0 => configured.unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let open = |path: &str| OpenOptions::new().create(true).append(true).open(path).ok();
    let log_file = config
        .and_then(|c| c.logging.file.as_deref())
        .and_then(open)
        .map(|f| Arc::new(Mutex::new(f)));
    let security_file = config
        .and_then(|c| c.logging.security_file.as_deref())
        .and_then(open)
        .map(|f| Arc::new(Mutex::new(f)));
    // With a log file, the console only gets a copy when someone is watching
    let to_console = log_file.is_none() || atty::is(atty::Stream::Stdout);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.format(move |fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!("{} [{}] {}", ts, record.level(), record.args());
        if let Some(file) = &log_file {
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
        }
        if record.target() == "security" {
            if let Some(file) = &security_file {
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
            }
        }
        if to_console {
            writeln!(fmt, "{}", line)
        } else {
            Ok(())
        }
    });
    let _ = builder.try_init();
}
