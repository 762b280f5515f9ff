//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{ApiConfig, ConfigLayer};
use crate::decode::DecoderFormat;
use crate::engine::FetchOutcome;
use crate::error::Result;
use crate::forum::{Category, CategoryQuery, ForumClient, PostQuery, TextFormat};
use crate::output::{
    render_category_header, render_category_line, render_post_details, CsvExporter,
};
use crate::types::Record;
use chrono::Local;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
    client: Option<ForumClient>,
}

impl Runner {
    /// Create a new runner; the client is built from the resolved
    /// configuration when a command runs
    pub fn new(cli: Cli) -> Self {
        Self { cli, client: None }
    }

    /// Create a runner that talks through an already connected client
    pub fn with_client(cli: Cli, client: ForumClient) -> Self {
        Self {
            cli,
            client: Some(client),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let connected;
        let client = match &self.client {
            Some(client) => client,
            None => {
                connected = self.connect()?;
                &connected
            }
        };

        match &self.cli.command {
            Commands::Check => check(client).await,
            Commands::Categories { format, fields } => {
                categories(client, (*format).into(), fields.as_deref()).await
            }
            Commands::Posts { category } => posts(client, category.as_deref()).await,
            Commands::Export {
                output_dir,
                text_format,
            } => export(client, output_dir, (*text_format).into()).await,
        }
    }

    /// Resolve the API configuration: flags and environment first, then
    /// the config file
    pub fn api_config(&self) -> Result<ApiConfig> {
        let mut layers = vec![ConfigLayer::new(
            self.cli.token.clone(),
            self.cli.domain.clone(),
        )];
        if let Some(path) = &self.cli.config {
            debug!("Loading config file {}", path.display());
            layers.push(ConfigLayer::from_file(path)?);
        }
        ApiConfig::resolve(&layers)
    }

    fn connect(&self) -> Result<ForumClient> {
        let config = self.api_config()?;
        debug!(?config, "Resolved API configuration");
        ForumClient::new(&config)
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn check(client: &ForumClient) -> Result<()> {
    info!("Testing connection to {}", client.base_url());

    match client.check_connection().await {
        Ok(sample) => {
            println!("API connection successful.");
            println!("Sample response: {}", serde_json::to_string_pretty(&sample)?);
            Ok(())
        }
        Err(e) => {
            error!("Connection check failed: {e}");
            Err(e)
        }
    }
}

async fn categories(
    client: &ForumClient,
    format: DecoderFormat,
    fields: Option<&[String]>,
) -> Result<()> {
    let mut query = CategoryQuery::new().with_format(format);
    if let Some(fields) = fields {
        query = query.with_fields(fields);
    }

    let categories = load_categories(client, &query).await?;
    if !categories.is_empty() {
        println!("\nFound categories:");
        for category in &categories {
            println!("{}", render_category_line(category));
        }
    }
    Ok(())
}

async fn posts(client: &ForumClient, only: Option<&str>) -> Result<()> {
    let started = Instant::now();

    let categories = load_categories(client, &CategoryQuery::new()).await?;
    let mut printed = 0usize;

    for category in selected(&categories, only) {
        println!("{}", render_category_header(category));
        let Some(key) = category.key.as_deref() else {
            println!("No category key available");
            continue;
        };

        let outcome = client.list_posts(&PostQuery::details(key)).await?;
        let posts = keep_records(outcome, category);
        if posts.is_empty() {
            println!("No posts found in this category");
            continue;
        }
        for post in &posts {
            println!("{}", render_post_details(post));
        }
        printed += posts.len();
    }

    info!(
        "Printed {printed} posts in {}ms",
        started.elapsed().as_millis()
    );
    Ok(())
}

async fn export(client: &ForumClient, output_dir: &Path, text_format: TextFormat) -> Result<()> {
    let exporter = CsvExporter::new(output_dir);
    exporter.ensure_dir()?;

    let categories = load_categories(client, &CategoryQuery::new()).await?;
    let mut files = 0usize;
    let mut failures = 0usize;

    for category in &categories {
        println!("{}", render_category_header(category));
        let Some(key) = category.key.as_deref() else {
            println!("No category key available");
            continue;
        };

        let query = PostQuery::text(key).with_text_format(text_format);
        let outcome = client.list_posts(&query).await?;
        if !outcome.is_complete() {
            failures += 1;
        }
        let posts = keep_records(outcome, category);

        match exporter.write_records(&posts, &category.name, &Local::now()) {
            Ok(Some(path)) => {
                println!("Saved {} posts to {}", posts.len(), path.display());
                files += 1;
            }
            Ok(None) => println!("No posts found in this category"),
            Err(e) => {
                error!("Failed to export category {}: {e}", category.name);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        warn!("{failures} categories were exported incompletely or not at all");
    }
    info!(
        "Wrote {files} files to {}",
        exporter.output_dir().display()
    );
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// List categories, keeping a partial listing when a later page failed
async fn load_categories(client: &ForumClient, query: &CategoryQuery) -> Result<Vec<Category>> {
    let (categories, cause) = client.categories(query).await?;

    if let Some(cause) = cause {
        if categories.is_empty() {
            return Err(cause);
        }
        warn!(
            "Category listing incomplete after {} categories: {cause}",
            categories.len()
        );
    }

    if categories.is_empty() {
        println!("\nNo categories were returned.");
    }
    Ok(categories)
}

/// Categories to process; all of them unless a key is given
pub(super) fn selected<'a>(categories: &'a [Category], only: Option<&str>) -> Vec<&'a Category> {
    let Some(key) = only else {
        return categories.iter().collect();
    };

    let matching: Vec<_> = categories
        .iter()
        .filter(|c| c.key.as_deref() == Some(key))
        .collect();
    if matching.is_empty() {
        warn!(
            "No category with key {key} among {} categories",
            categories.len()
        );
    }
    matching
}

/// Records of a post listing; a failure is logged and the records fetched
/// before it are kept
fn keep_records(outcome: FetchOutcome, category: &Category) -> Vec<Record> {
    let (records, cause) = outcome.into_parts();
    if let Some(cause) = cause {
        warn!(
            "Error fetching posts for category {}: {cause} ({} posts kept)",
            category.name,
            records.len()
        );
    }
    records
}
