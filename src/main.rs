use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use listing_catalog::config::CatalogConfig;
use listing_catalog::models::ListingRecord;
use listing_catalog::query::{self, FilterCriteria, NumericRange, SortKey, TextField};
use listing_catalog::storage::{FileStore, KeyValueStore};
use listing_catalog::{
    AccessDecision, AccessGate, ListingPatch, ListingStore, SettingsPatch, SettingsStore,
};

#[derive(Parser)]
#[command(name = "listing-catalog", about = "Browse and administer the listing catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, filter and sort the catalog
    List(ListArgs),
    /// Print one listing as JSON
    Show { id: u64 },
    /// Distinct values of a field, for filter dropdowns
    Values {
        #[arg(value_enum)]
        field: FieldArg,
    },
    /// Create a listing from a JSON draft (admin)
    Add {
        #[arg(long)]
        json: String,
    },
    /// Merge JSON fields into a listing (admin)
    Update {
        id: u64,
        #[arg(long)]
        json: String,
    },
    /// Delete a listing (admin)
    Remove { id: u64 },
    /// Discard local changes and re-seed on next read (admin)
    Reset {
        /// Confirm the irreversible reset
        #[arg(long)]
        yes: bool,
    },
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Enter the admin code
    Unlock { code: String },
    /// Show the admin access state
    Access,
    /// Drop admin access
    Logout,
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    /// Update settings (admin)
    Set {
        #[arg(long)]
        site_name: Option<String>,
        #[arg(long)]
        support_email: Option<String>,
        #[arg(long)]
        support_telegram: Option<String>,
        #[arg(long)]
        admin_code: Option<String>,
    },
    /// Restore default settings (admin)
    Reset,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, short)]
    search: Option<String>,
    #[arg(long, value_enum, default_value_t = SortArg::Popularity)]
    sort: SortArg,
    #[arg(long)]
    verified: bool,
    #[arg(long)]
    vip: bool,
    #[arg(long)]
    online: bool,
    #[arg(long = "new")]
    new_this_week: bool,
    #[arg(long = "video")]
    with_video: bool,
    #[arg(long)]
    age_from: Option<u32>,
    #[arg(long)]
    age_to: Option<u32>,
    #[arg(long)]
    height_from: Option<u32>,
    #[arg(long)]
    height_to: Option<u32>,
    #[arg(long)]
    price_from: Option<i64>,
    #[arg(long)]
    price_to: Option<i64>,
    #[arg(long)]
    hair: Option<String>,
    #[arg(long)]
    eyes: Option<String>,
    #[arg(long)]
    nationality: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    language: Option<String>,
    /// Group the results by city
    #[arg(long)]
    group: bool,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            verified: self.verified,
            vip: self.vip,
            online: self.online,
            new_this_week: self.new_this_week,
            with_video: self.with_video,
            age: NumericRange::new(self.age_from, self.age_to),
            height: NumericRange::new(self.height_from, self.height_to),
            price: NumericRange::new(self.price_from, self.price_to),
            hair: self.hair.clone(),
            eyes: self.eyes.clone(),
            nationality: self.nationality.clone(),
            location: self.location.clone(),
            language: self.language.clone(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Popularity,
    Date,
    PriceAsc,
    PriceDesc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Popularity => SortKey::Popularity,
            SortArg::Date => SortKey::Date,
            SortArg::PriceAsc => SortKey::PriceAsc,
            SortArg::PriceDesc => SortKey::PriceDesc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Location,
    Hair,
    Eyes,
    Nationality,
    Orientation,
    MeetingPlace,
}

impl From<FieldArg> for TextField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Location => TextField::Location,
            FieldArg::Hair => TextField::Hair,
            FieldArg::Eyes => TextField::Eyes,
            FieldArg::Nationality => TextField::Nationality,
            FieldArg::Orientation => TextField::Orientation,
            FieldArg::MeetingPlace => TextField::MeetingPlace,
        }
    }
}

struct App {
    listings: ListingStore,
    settings: SettingsStore,
    gate: AccessGate,
}

impl App {
    fn require_admin(&self) -> Result<()> {
        match self.gate.check()? {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Expired => bail!("Admin access expired, run `unlock` again"),
            AccessDecision::Denied => bail!("Admin access required, run `unlock <code>` first"),
        }
    }
}

fn print_listing(index: usize, listing: &ListingRecord) {
    println!("{}. {} ({} y.o.), {} ₽", index + 1, listing.name, listing.age, listing.price);
    println!("   {} | id {}", listing.location, listing.id);
    if !listing.tags.is_empty() {
        println!("   Tags: {}", listing.tags.join(", "));
    }
    if let Some(cover) = listing.cover_photo() {
        println!("   Cover: {}", cover);
    }
}

async fn list(app: &App, args: &ListArgs) -> Result<()> {
    let all: Vec<ListingRecord> = app
        .listings
        .get_all()
        .await
        .iter()
        .map(query::with_derived_tags)
        .collect();

    let found = query::search(&all, args.search.as_deref().unwrap_or(""));
    let found = query::apply_filters(&found, &args.criteria());
    let found = query::sort(&found, args.sort.into());

    let settings = app.settings.get_settings();
    info!("{}: {} of {} listings", settings.site_name, found.len(), all.len());

    if args.group {
        for (location, members) in query::group_by_location(&found) {
            println!("== {} ({})", location, members.len());
            for (i, listing) in members.iter().enumerate() {
                print_listing(i, listing);
            }
        }
    } else {
        for (i, listing) in found.iter().enumerate() {
            print_listing(i, listing);
        }
    }
    Ok(())
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::List(args) => list(app, &args).await?,
        Command::Show { id } => match app.listings.get(id).await {
            Some(listing) => println!("{}", serde_json::to_string_pretty(&listing)?),
            None => warn!("No listing with id {}", id),
        },
        Command::Values { field } => {
            let all = app.listings.get_all().await;
            for value in query::unique_values(&all, field.into()) {
                println!("{}", value);
            }
        }
        Command::Add { json } => {
            app.require_admin()?;
            let draft: ListingPatch = serde_json::from_str(&json).context("Invalid listing JSON")?;
            let created = app.listings.add(draft).await?;
            info!("💾 Created listing {}", created.id);
        }
        Command::Update { id, json } => {
            app.require_admin()?;
            let patch: ListingPatch = serde_json::from_str(&json).context("Invalid listing JSON")?;
            if !app.listings.update(id, patch).await? {
                warn!("No listing with id {}, nothing updated", id);
            }
        }
        Command::Remove { id } => {
            app.require_admin()?;
            if !app.listings.remove(id).await? {
                warn!("No listing with id {}", id);
            }
        }
        Command::Reset { yes } => {
            app.require_admin()?;
            if !yes {
                bail!("Reset discards every local change; pass --yes to confirm");
            }
            app.listings.reset()?;
        }
        Command::Settings(SettingsCommand::Show) => {
            println!("{}", serde_json::to_string_pretty(&app.settings.get_settings())?);
        }
        Command::Settings(SettingsCommand::Set {
            site_name,
            support_email,
            support_telegram,
            admin_code,
        }) => {
            app.require_admin()?;
            let updated = app.settings.save_settings(SettingsPatch {
                site_name,
                support_email,
                support_telegram,
                admin_code,
            })?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::Settings(SettingsCommand::Reset) => {
            app.require_admin()?;
            app.settings.reset_settings()?;
        }
        Command::Unlock { code } => {
            let settings = app.settings.get_settings();
            if !app.gate.unlock(&code, &settings)?.is_granted() {
                bail!("Wrong admin code");
            }
            info!("✅ Admin access granted");
        }
        Command::Access => println!("{:?}", app.gate.check()?),
        Command::Logout => {
            app.gate.revoke()?;
            info!("Admin access revoked");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = CatalogConfig::from_env()?;

    let storage: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&config.data_dir)
            .with_context(|| format!("Failed to open {}", config.data_dir.display()))?,
    );
    let app = App {
        listings: ListingStore::new(storage.clone(), config.seed_source()?),
        settings: SettingsStore::new(storage.clone()),
        gate: AccessGate::new(storage),
    };

    app.listings.subscribe(|event| tracing::debug!("Listings changed: {:?}", event));
    app.settings.subscribe(|event| tracing::debug!("Settings changed: {:?}", event));

    run(&app, cli.command).await
}
