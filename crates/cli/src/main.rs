use clap::{Parser, Subcommand};
use folio_core::{
    config::{data_file_from_env_value, default_title_from_env_value},
    CoreConfig, JsonFileStore, Page, PageResult, PageService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio page collection CLI")]
struct Cli {
    /// Collection file (defaults to FOLIO_DATA_FILE, then data/pages.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all pages
    List,
    /// Print one page as JSON
    Show { id: String },
    /// Create a page
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Update a page's title and/or content
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a page
    Delete { id: String },
    /// Add a tag to a page
    Tag { id: String, tag: String },
    /// Remove a tag from a page
    Untag { id: String, tag: String },
    /// Record a child page under a parent
    Attach { parent: String, child: String },
    /// Remove a child page from a parent
    Detach { parent: String, child: String },
    /// Mark a page archived
    Archive { id: String },
    /// Clear a page's archived flag
    Unarchive { id: String },
    /// Validate every record in the collection file
    Check,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> PageResult<()> {
    let data_file = cli
        .data_file
        .unwrap_or_else(|| data_file_from_env_value(std::env::var("FOLIO_DATA_FILE").ok()));
    let default_title = default_title_from_env_value(std::env::var("FOLIO_DEFAULT_TITLE").ok())?;
    let cfg = Arc::new(CoreConfig::new(data_file, default_title)?);
    let service = PageService::with_file_store(cfg.clone());

    match cli.command {
        Some(Commands::List) => {
            let pages = service.list()?;
            if pages.is_empty() {
                println!("No pages found.");
            }
            for page in pages {
                print_summary(&page);
            }
        }
        Some(Commands::Show { id }) => print_json(&service.get(&id)?),
        Some(Commands::Create { title, content }) => {
            let page = service.create(title, content)?;
            println!("Created page with ID: {}", page.id);
        }
        Some(Commands::Update { id, title, content }) => {
            let page = service.update(&id, title, content)?;
            println!("Updated page: {}", page.id);
        }
        Some(Commands::Delete { id }) => {
            let page = service.delete(&id)?;
            println!("Deleted page: {} ({})", page.id, page.title);
        }
        Some(Commands::Tag { id, tag }) => {
            let page = service.modify(&id, |p| {
                p.add_tag(tag);
            })?;
            println!("Tags: {}", page.tags.join(", "));
        }
        Some(Commands::Untag { id, tag }) => {
            let page = service.modify(&id, |p| {
                p.remove_tag(&tag);
            })?;
            println!("Tags: {}", page.tags.join(", "));
        }
        Some(Commands::Attach { parent, child }) => attach(&service, &parent, &child)?,
        Some(Commands::Detach { parent, child }) => detach(&service, &parent, &child)?,
        Some(Commands::Archive { id }) => {
            service.modify(&id, Page::archive)?;
            println!("Archived page: {}", id);
        }
        Some(Commands::Unarchive { id }) => {
            service.modify(&id, Page::unarchive)?;
            println!("Unarchived page: {}", id);
        }
        Some(Commands::Check) => check(&JsonFileStore::new(cfg.data_file()))?,
        None => {
            println!("Use 'folio --help' for commands");
        }
    }

    Ok(())
}

/// Links `child` under `parent`. The child's `parentId` is set when the child exists; the link
/// is advisory either way.
fn attach(service: &PageService, parent: &str, child: &str) -> PageResult<()> {
    let page = service.modify(parent, |p| {
        p.add_child(child);
    })?;
    match service.modify(child, |p| p.set_parent(Some(parent.to_string()))) {
        Ok(_) => {}
        Err(folio_core::PageError::NotFound(_)) => {
            println!("Note: child page {} does not exist", child);
        }
        Err(e) => return Err(e),
    }
    println!("Children of {}: {}", page.id, page.children.join(", "));
    Ok(())
}

fn detach(service: &PageService, parent: &str, child: &str) -> PageResult<()> {
    let page = service.modify(parent, |p| {
        p.remove_child(child);
    })?;
    // Only clear the back-reference if it still points at this parent.
    match service.get(child) {
        Ok(c) if c.parent_id.as_deref() == Some(parent) => {
            service.modify(child, |p| p.set_parent(None))?;
        }
        Ok(_) | Err(folio_core::PageError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }
    println!("Children of {}: {}", page.id, page.children.join(", "));
    Ok(())
}

fn check(store: &JsonFileStore) -> PageResult<()> {
    let records = store.read_records()?;
    let mut invalid = 0;
    for (index, record) in records.iter().enumerate() {
        let validation = Page::validate(record);
        if validation.is_valid {
            continue;
        }
        invalid += 1;
        let id = record.get("id").and_then(|v| v.as_str()).unwrap_or("<no id>");
        println!("Record {} ({}):", index, id);
        for error in validation.errors {
            println!("  - {}", error);
        }
    }
    println!("{} records checked, {} invalid", records.len(), invalid);
    Ok(())
}

fn print_summary(page: &Page) {
    let archived = if page.archived { " [archived]" } else { "" };
    println!(
        "ID: {}, Title: {}, Updated: {}{}",
        page.id,
        page.title,
        page.updated_at.to_rfc3339(),
        archived
    );
}

fn print_json(page: &Page) {
    match serde_json::to_string_pretty(page) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing page: {}", e),
    }
}
