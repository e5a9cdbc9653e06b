use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use vidfilters::domain::entities::{AuthUser, FilterField, UserRight, VideoFilters};
use vidfilters::infrastructure::{ConfigRepository, SessionAuth, StaticServerConfig};
use vidfilters::presentation::components::{ClickEvent, HeaderInputs, VideoFiltersHeader};
use vidfilters::presentation::services::ModalService;

#[derive(Parser)]
#[command(name = "vidfilters", about = "Video filters toolbar", version)]
struct Cli {
    /// Server config JSON with the enabled trending algorithms
    #[arg(long)]
    server_config: Option<PathBuf>,

    /// Toolbar config, defaults to ~/.config/vidfilters/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Route parameters, e.g. "languageOneOf=en&scope=local"
    #[arg(short, long)]
    query: Option<String>,

    /// Simulate a logged-in user
    #[arg(short, long)]
    user: Option<String>,

    /// Rights of the simulated user (repeatable)
    #[arg(long = "right", requires = "user")]
    rights: Vec<String>,

    /// Filters to remove after loading the route (repeatable)
    #[arg(long)]
    reset: Vec<String>,

    /// Show the moderation block (overrides the toolbar config)
    #[arg(long)]
    moderation: bool,

    /// Write the effective toolbar config back to the config file
    #[arg(long)]
    save_config: bool,
}

fn init_tracing() {
    #[cfg(feature = "verbose-logging")]
    let level = tracing::Level::TRACE;

    #[cfg(not(feature = "verbose-logging"))]
    let level = tracing::Level::INFO;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let repository = match &cli.config {
        Some(path) => ConfigRepository::with_path(path),
        None => ConfigRepository::new(),
    };
    let mut config = repository.load()?;
    if cli.moderation {
        config.display_moderation_block = true;
    }
    if cli.save_config {
        repository.save(&config)?;
        tracing::info!("Saved toolbar config");
    }

    let server = match &cli.server_config {
        Some(path) => StaticServerConfig::load(path)?,
        None => StaticServerConfig::default(),
    };

    let session = SessionAuth::anonymous();
    if let Some(username) = cli.user {
        let mut user = AuthUser::new(username);
        for right in &cli.rights {
            let right =
                UserRight::parse(right).with_context(|| format!("Unknown user right: {right}"))?;
            user = user.with_right(right);
        }
        session.login(user);
    }

    let filters = Arc::new(VideoFilters::from_config(&config));
    let modals = ModalService::new();
    let _quick_settings = modals.subscribe(|_| println!("Quick settings requested"));

    let mut header = VideoFiltersHeader::new(
        filters.clone(),
        HeaderInputs::from(&config),
        Arc::new(session),
        Arc::new(server),
        modals,
    );
    header.init()?;

    let listed = Arc::clone(&filters);
    let _refresh = header.filters_changed().on(move |_| {
        tracing::info!(query = %listed.to_query_string(), "Filters changed, refreshing videos");
    });

    if let Some(query) = &cli.query {
        filters.load_query(query)?;
    }

    for name in &cli.reset {
        let field: FilterField = name.parse()?;
        let can_remove = filters
            .active_filters()
            .iter()
            .any(|chip| chip.field == field && chip.can_remove);
        if !header.reset_filter(field, can_remove)? {
            tracing::warn!("Filter {field} is already at its default");
        }
    }

    print_summary(&header, &filters);

    let mut click = ClickEvent::new();
    header.on_account_settings_click(&mut click);
    if !click.is_default_prevented() {
        println!("Account settings page opened");
    }

    header.destroy();
    Ok(())
}

fn print_summary(header: &VideoFiltersHeader, filters: &VideoFilters) {
    println!("Sort:");
    for option in header.visible_sort_options() {
        let marker = if option.is_default { '*' } else { ' ' };
        println!("  {marker} {:<24} {}", option.key, option.label);
    }

    println!("Filters:");
    for chip in filters.active_filters() {
        println!("  {:<36} {}", chip.label, header.filter_title(chip.can_remove));
    }

    println!("See all videos: {}", header.can_see_all_videos());
    println!("NSFW selector: {}", header.can_filter_nsfw());
    println!("Collapsed: {}", header.are_filters_collapsed());
}
