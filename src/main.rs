use chrono::Local;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use configuration::{Config, StorageBackend};
use core_types::{RiskTier, Strategy};
use dashboard::{AccessRule, AdminDashboard, DashboardError, UserDashboard};
use events::Route;
use notifier::{ConsoleSink, JsonLinesSink, Navigator, NotificationSink};
use rust_decimal::Decimal;
use session::{MockAuthenticator, SessionError, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use storage::{FileStore, KeyValueStore, MemoryStore};

/// The main entry point for the Strategy Hub command-line front end.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional overrides (RUST_LOG, STRATEGY_HUB__*) may live in a .env file.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())?;
    let _guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve { port } => handle_serve(config, port).await,
        command => {
            let mut app = App::new(&config, cli.storage, cli.json)?;
            app.run(command)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Browse mock investment strategies and manage users from the terminal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to `config.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured session storage backend.
    #[arg(long, global = true, value_enum)]
    storage: Option<StorageBackend>,

    /// Report notifications and redirects as JSON lines instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a username and password.
    Login(CredentialsArgs),
    /// Create an account and log it in.
    Register(CredentialsArgs),
    /// End the current session.
    Logout,
    /// Show the logged-in identity.
    Whoami,
    /// Explore the strategy catalog with filters.
    Strategies(StrategiesArgs),
    /// Show one strategy and a summary of its history.
    Show {
        id: u32,
    },
    /// List users (admin only).
    Users {
        /// Matched against username and email.
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a user from the working list (admin only).
    DeleteUser {
        id: u32,
    },
    /// Headline figures of the admin panel (admin only).
    Stats,
    /// The subscription plans.
    Pricing,
    /// Run the JSON API.
    Serve {
        /// Overrides `server.port`.
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Parser)]
struct CredentialsArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Parser)]
struct StrategiesArgs {
    /// One of low, medium, high.
    #[arg(long)]
    risk: Option<RiskTier>,

    /// Substring of the strategy type, e.g. "income".
    #[arg(long)]
    category: Option<String>,

    /// Asset label to match. Repeat to match any of several.
    #[arg(long = "asset")]
    assets: Vec<String>,

    /// Matched against name and description.
    #[arg(long)]
    search: Option<String>,
}

// ==============================================================================
// Application Context
// ==============================================================================

/// Prints redirects instead of navigating.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: Route) {
        let hint = match route {
            Route::Home => "Logged out.",
            Route::Login => "Please log in first: `strategy-hub login`.",
            Route::Dashboard => "This view is for admins. Try `strategy-hub strategies`.",
            Route::Admin => "This view is for regular users. Try `strategy-hub users`.",
        };
        println!("→ {} {}", route, hint);
    }
}

struct App {
    session: SessionStore,
    navigator: Box<dyn Navigator>,
    notifier: Arc<dyn NotificationSink>,
    strategies: Vec<Strategy>,
}

impl App {
    fn new(config: &Config, backend_override: Option<StorageBackend>, json: bool) -> anyhow::Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match backend_override.unwrap_or(config.storage.backend) {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::open(&config.storage.dir)?),
        };
        let (notifier, navigator): (Arc<dyn NotificationSink>, Box<dyn Navigator>) = if json {
            (Arc::new(JsonLinesSink), Box::new(JsonLinesSink))
        } else {
            (Arc::new(ConsoleSink), Box::new(TerminalNavigator))
        };

        let mut session = SessionStore::new(
            Box::new(MockAuthenticator::from_settings(&config.auth)),
            storage,
            notifier.clone(),
        );
        session.restore();

        let anchor = config
            .seed
            .anchor_date
            .unwrap_or_else(|| Local::now().date_naive());
        let strategies = seed_data::seed_strategies(anchor, config.seed.history_days, config.seed.rng_seed);
        tracing::debug!(
            authenticated = session.is_authenticated(),
            strategies = strategies.len(),
            %anchor,
            "CLI context ready."
        );

        Ok(Self {
            session,
            navigator,
            notifier,
            strategies,
        })
    }

    fn run(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Login(args) => self.login(args),
            Commands::Register(args) => self.register(args),
            Commands::Logout => Ok(self.session.logout(self.navigator.as_ref())?),
            Commands::Whoami => {
                self.whoami();
                Ok(())
            }
            Commands::Strategies(args) => self.strategies(args),
            Commands::Show { id } => self.show(id),
            Commands::Users { search } => self.users(search),
            Commands::DeleteUser { id } => self.delete_user(id),
            Commands::Stats => self.stats(),
            Commands::Pricing => {
                print_pricing();
                Ok(())
            }
            // Dispatched before the context is built.
            Commands::Serve { .. } => Ok(()),
        }
    }

    fn login(&mut self, args: CredentialsArgs) -> anyhow::Result<()> {
        if !dashboard::enforce(AccessRule::AnonymousOnly, self.session.current(), self.navigator.as_ref()) {
            return Ok(());
        }
        match self.session.authenticate(&args.username, &args.password) {
            // The outcome has already been reported through the notifier.
            Ok(_) | Err(SessionError::InvalidCredentials) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn register(&mut self, args: CredentialsArgs) -> anyhow::Result<()> {
        if !dashboard::enforce(AccessRule::AnonymousOnly, self.session.current(), self.navigator.as_ref()) {
            return Ok(());
        }
        self.session.register(&args.username, &args.password)?;
        Ok(())
    }

    fn whoami(&self) {
        match self.session.current() {
            Some(user) => println!("{} (id {}, {})", user.username, user.id, user.role),
            None => println!("Not logged in."),
        }
    }

    fn user_dashboard(&self) -> anyhow::Result<Option<UserDashboard>> {
        let subscriptions = match self.session.current() {
            Some(viewer) => dashboard::default_subscriptions(viewer, &seed_data::seed_users(), &self.strategies),
            None => Vec::new(),
        };
        let result = UserDashboard::open(
            self.session.current(),
            self.strategies.clone(),
            subscriptions,
            self.navigator.as_ref(),
        );
        granted(result)
    }

    fn admin_dashboard(&self) -> anyhow::Result<Option<AdminDashboard>> {
        let result = AdminDashboard::open(
            self.session.current(),
            seed_data::seed_users(),
            self.strategies.clone(),
            self.navigator.as_ref(),
            self.notifier.clone(),
        );
        granted(result)
    }

    fn strategies(&self, args: StrategiesArgs) -> anyhow::Result<()> {
        let Some(mut view) = self.user_dashboard()? else {
            return Ok(());
        };
        view.set_risk(args.risk);
        view.set_category(args.category);
        view.set_search(args.search.unwrap_or_default());
        for asset in &args.assets {
            view.select_asset(asset);
        }

        let subscribed: Vec<&str> = view.subscribed_strategies().iter().map(|s| s.name.as_str()).collect();
        println!("Your strategies: {}", subscribed.join(", "));
        if let (Some(selected), Some(summary)) = (view.selected_strategy(), view.selected_history()) {
            println!(
                "Charted: {} ({} → {}, {} over {} days)",
                selected.name,
                summary.first_value,
                summary.last_value,
                summary.change_pct.map(signed_pct).unwrap_or_else(|| "n/a".to_string()),
                summary.points.saturating_sub(1),
            );
        }

        let visible = view.visible_strategies();
        let mut table = new_table(vec!["ID", "Name", "Type", "Risk", "Assets", "Daily", "Yearly"]);
        for s in &visible {
            table.add_row(vec![
                s.id.to_string(),
                s.name.clone(),
                s.category.clone(),
                s.risk.to_string(),
                s.assets.join(", "),
                signed_pct(s.performance.daily),
                signed_pct(s.performance.yearly),
            ]);
        }
        println!("{table}");
        println!("Showing {} of {} strategies", visible.len(), view.strategies().len());
        Ok(())
    }

    fn show(&self, id: u32) -> anyhow::Result<()> {
        let Some(mut view) = self.user_dashboard()? else {
            return Ok(());
        };
        let strategy = view.select_strategy(id)?.clone();
        println!("{} [{}]", strategy.name, strategy.risk);
        println!("{}", strategy.description);
        println!("Type: {}  Creator: {}", strategy.category, strategy.creator);
        println!("Assets: {}", strategy.assets.join(", "));

        let mut table = new_table(vec!["Daily", "Weekly", "Monthly", "Yearly"]);
        table.add_row(vec![
            signed_pct(strategy.performance.daily),
            signed_pct(strategy.performance.weekly),
            signed_pct(strategy.performance.monthly),
            signed_pct(strategy.performance.yearly),
        ]);
        println!("{table}");

        if let Some(summary) = view.selected_history() {
            let mut table = new_table(vec!["From", "To", "First", "Last", "Min", "Max", "Change"]);
            table.add_row(vec![
                summary.start_date.to_string(),
                summary.end_date.to_string(),
                summary.first_value.to_string(),
                summary.last_value.to_string(),
                summary.min_value.to_string(),
                summary.max_value.to_string(),
                summary.change_pct.map(signed_pct).unwrap_or_else(|| summary.change.to_string()),
            ]);
            println!("{table}");
        }
        Ok(())
    }

    fn users(&self, search: Option<String>) -> anyhow::Result<()> {
        let Some(mut view) = self.admin_dashboard()? else {
            return Ok(());
        };
        view.set_search(search.unwrap_or_default());
        print_users(&view);
        Ok(())
    }

    fn delete_user(&self, id: u32) -> anyhow::Result<()> {
        let Some(mut view) = self.admin_dashboard()? else {
            return Ok(());
        };
        view.delete_user(id)?;
        print_users(&view);
        Ok(())
    }

    fn stats(&self) -> anyhow::Result<()> {
        let Some(view) = self.admin_dashboard()? else {
            return Ok(());
        };
        let stats = view.stats();
        let mut table = new_table(vec!["Total users", "Active users", "Strategies", "Avg strategies/user"]);
        table.add_row(vec![
            stats.total_users.to_string(),
            stats.active_users.to_string(),
            stats.total_strategies.to_string(),
            stats
                .avg_strategies_per_user
                .map(|avg| avg.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
        ]);
        println!("{table}");
        Ok(())
    }
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

async fn handle_serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
        configuration::validate(&config)?;
    }
    let addr = config.server.addr();
    tracing::info!(%addr, "Starting the API server.");
    let state = web_server::AppState::from_config(&config);
    web_server::run_server(addr, state).await
}

// ==============================================================================
// Rendering
// ==============================================================================

/// Turns an access refusal into `None`; the navigator has already reported it.
fn granted<T>(result: Result<T, DashboardError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(view) => Ok(Some(view)),
        Err(DashboardError::AccessDenied(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_users(view: &AdminDashboard) {
    let mut table = new_table(vec!["ID", "Username", "Email", "Registered", "Last login", "Status", "Strategies"]);
    for u in view.visible_users() {
        table.add_row(vec![
            u.id.to_string(),
            u.username.clone(),
            u.email.clone(),
            u.registration_date.to_string(),
            u.last_login.to_string(),
            u.status.to_string(),
            u.strategies.len().to_string(),
        ]);
    }
    println!("{table}");
    let (shown, total) = view.showing();
    println!("Showing {} of {} users", shown, total);
}

fn print_pricing() {
    let mut table = new_table(vec!["Plan", "Price", "Description", "Features", ""]);
    for tier in seed_data::pricing_tiers() {
        let title = if tier.highlighted {
            format!("★ {}", tier.title)
        } else {
            tier.title.clone()
        };
        table.add_row(vec![
            title,
            format!("${}/{}", tier.price, tier.period),
            tier.description.clone(),
            tier.features.join("\n"),
            tier.button_text.clone(),
        ]);
    }
    println!("{table}");
}

fn signed_pct(value: Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{}%", value)
    } else {
        format!("{}%", value)
    }
}
