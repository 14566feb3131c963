use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use discat::api::{CatalogApi, CmdMessage, ListFilter, MessageLevel};
use discat::config::CatalogConfig;
use discat::error::{DiscatError, Result};
use discat::model::{Disc, DiscDraft};
use discat::store::memory::InMemoryCatalog;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

struct AppContext {
    api: CatalogApi<InMemoryCatalog>,
    catalog_path: PathBuf,
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { sort, min_free, open }) => handle_list(
            &ctx,
            ListFilter {
                sort,
                min_free_space: min_free,
                open_only: open,
            },
        ),
        Some(Commands::Add {
            name,
            capacity,
            speed,
            used,
            sessions,
            session_type,
        }) => {
            let draft =
                DiscDraft::new(name, capacity, speed, used).with_sessions(sessions, session_type);
            handle_add(&mut ctx, draft)
        }
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Finalize { id }) => handle_finalize(&mut ctx, id, true),
        Some(Commands::Reopen { id }) => handle_finalize(&mut ctx, id, false),
        Some(Commands::Seed) => handle_seed(&mut ctx),
        None => handle_list(&ctx, ListFilter::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let proj_dirs = ProjectDirs::from("com", "discat", "discat");

    let config = match (&cli.config_dir, &proj_dirs) {
        (Some(dir), _) => CatalogConfig::load(dir)?,
        (None, Some(dirs)) => CatalogConfig::load(dirs.config_dir()).unwrap_or_default(),
        (None, None) => CatalogConfig::default(),
    };

    let catalog_path = match (&cli.file, &proj_dirs) {
        (Some(file), _) => file.clone(),
        (None, Some(dirs)) => config.catalog_path(dirs.data_dir()),
        (None, None) => {
            return Err(DiscatError::Api(
                "Could not determine a data directory; pass --file".to_string(),
            ))
        }
    };

    let mut api = CatalogApi::new(InMemoryCatalog::new()).with_save_options(config.save_options());
    let loaded = api.load(&catalog_path)?;
    if cli.verbose {
        print_messages(&loaded.messages);
    }

    Ok(AppContext {
        api,
        catalog_path,
        verbose: cli.verbose,
    })
}

fn persist(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.save(&ctx.catalog_path)?;
    if ctx.verbose {
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: ListFilter) -> Result<()> {
    let result = ctx.api.list_discs(filter)?;
    print_discs(&result.listed_discs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, draft: DiscDraft) -> Result<()> {
    let result = ctx.api.add_disc(draft)?;
    persist(ctx)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: u64) -> Result<()> {
    let result = ctx.api.find_disc(id)?;
    for disc in &result.listed_discs {
        print_disc_details(disc);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<u64>) -> Result<()> {
    let result = ctx.api.delete_discs(&ids)?;
    if !result.affected_discs.is_empty() {
        persist(ctx)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_finalize(ctx: &mut AppContext, id: u64, finalized: bool) -> Result<()> {
    let result = ctx.api.set_finalized(id, finalized)?;
    if !result.affected_discs.is_empty() {
        persist(ctx)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_seed(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.seed()?;
    persist(ctx)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

const NAME_WIDTH: usize = 32;

fn print_discs(discs: &[Disc]) {
    if discs.is_empty() {
        return;
    }

    println!(
        "{:>4}  {}  {:>8}  {:>5}  {:>8}  {:>8}  {}",
        "ID".bold(),
        pad_to_width("Name", NAME_WIDTH).bold(),
        "Size".bold(),
        "Speed".bold(),
        "Used".bold(),
        "Free".bold(),
        "Session".bold()
    );
    for disc in discs {
        let session = if disc.is_open() {
            disc.session_type().normal()
        } else {
            disc.session_type().dimmed()
        };
        println!(
            "{:>4}  {}  {:>8.1}  {:>4}x  {:>8.1}  {:>8.1}  {}",
            disc.id().to_string().yellow(),
            pad_to_width(disc.name(), NAME_WIDTH),
            disc.capacity(),
            disc.write_speed(),
            disc.used_space(),
            disc.free_space(),
            session
        );
    }
}

fn print_disc_details(disc: &Disc) {
    println!("{} {}", disc.id().to_string().yellow(), disc.name().bold());
    println!("--------------------------------");
    println!("Capacity:  {} MB", disc.capacity());
    println!("Used:      {} MB", disc.used_space());
    println!("Free:      {} MB", disc.free_space());
    println!("Speed:     {}x", disc.write_speed());
    println!(
        "Sessions:  {} ({}, {})",
        disc.session_count(),
        disc.session_type(),
        disc.session_state()
    );
}

/// Truncate or right-pad by display width so wide glyphs keep columns aligned.
fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
