// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Sync core validation tool.
//!
//! A standalone CLI for exercising the sync core against real `WebDAV`,
//! `CalDAV` or `CardDAV` servers.

use std::error::Error;
use std::io::{Read as _, Write as _};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize as _;
use davsync::{
    AuthMethod, CTag, Collection, DavConfig, DavError, ETag, Href, HttpTransport, SyncOptions,
    create_object, delete_object, is_collection_dirty, select_strategy, supported_report_set,
    update_object,
};
use tracing_subscriber::EnvFilter;

/// Sync core validation tool.
#[derive(Parser)]
#[command(name = "davsync_cli")]
#[command(about = "WebDAV sync core validation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Server URL
    #[arg(long)]
    server: Option<String>,
    /// Username for basic auth
    #[arg(long)]
    username: Option<String>,
    /// Password for basic auth
    #[arg(long)]
    password: Option<String>,
    /// Bearer token for OAuth
    #[arg(long)]
    token: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    /// `Content-Type` for uploaded objects
    #[arg(long, default_value = "text/calendar; charset=utf-8")]
    content_type: String,
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the reports a collection supports and the sync strategy it gets
    Reports {
        /// Collection href
        collection: String,
    },
    /// Check whether a collection changed since the given ctag
    Dirty {
        /// Collection href
        collection: String,
        /// Home collection href listing the collection
        #[arg(long)]
        home: String,
        /// Last known ctag
        #[arg(long)]
        ctag: Option<String>,
    },
    /// Upload an object, conditionally when an etag is given
    Put {
        /// Object href
        href: String,
        /// Payload file path (or "-" for stdin)
        input: String,
        /// Expected current etag
        #[arg(long)]
        etag: Option<String>,
    },
    /// Delete an object
    Delete {
        /// Object href
        href: String,
        /// Expected current etag
        #[arg(long)]
        etag: Option<String>,
    },
}

impl Cli {
    fn build_config(&self) -> Result<DavConfig, Box<dyn Error>> {
        let server = self
            .server
            .clone()
            .or_else(|| std::env::var("DAVSYNC_SERVER").ok())
            .ok_or_else(|| {
                "DAVSYNC_SERVER must be provided via --server or DAVSYNC_SERVER env var"
                    .to_string()
            })?;

        let username = self
            .username
            .clone()
            .or_else(|| std::env::var("DAVSYNC_USERNAME").ok());

        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("DAVSYNC_PASSWORD").ok());

        let token = self
            .token
            .clone()
            .or_else(|| std::env::var("DAVSYNC_TOKEN").ok());

        let auth = if let Some(token) = token {
            AuthMethod::Bearer { token }
        } else if let (Some(username), Some(password)) = (username, password) {
            AuthMethod::Basic { username, password }
        } else {
            AuthMethod::None
        };

        Ok(DavConfig {
            base_url: server,
            auth,
            timeout_secs: self.timeout,
            content_type: self.content_type.clone(),
            ..Default::default()
        })
    }
}

async fn cmd_reports(options: &SyncOptions, collection: &str) -> Result<(), Box<dyn Error>> {
    let href = Href::from(collection);
    let collection = Collection::new(href.clone(), href);
    let reports = supported_report_set(&collection, options).await?;

    match reports.as_deref() {
        None => println!("Server did not report supported-report-set"),
        Some([]) => println!("No reports advertised"),
        Some(reports) => {
            println!("Supported reports:");
            for report in reports {
                println!("  {report}");
            }
        }
    }

    let decision = select_strategy(options.sync_method, reports.as_deref());
    println!("\nSync strategy: {:?} ({decision:?})", decision.method());

    Ok(())
}

async fn cmd_dirty(
    options: &SyncOptions,
    collection: &str,
    home: &str,
    ctag: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut collection = Collection::new(Href::from(collection), Href::from(home));
    collection.ctag = ctag.map(CTag::new);

    if is_collection_dirty(&collection, options).await? {
        println!("{}", "✗ Collection changed remotely".yellow());
    } else {
        println!("{}", "✓ Collection is up to date".green());
    }

    Ok(())
}

async fn cmd_put(
    options: &SyncOptions,
    href: &str,
    input: &str,
    etag: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let data = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        tokio::fs::read_to_string(input).await?
    };

    let href = Href::from(href);
    let response = match etag.map(ETag::new) {
        Some(etag) => update_object(&href, &data, Some(&etag), options).await?,
        None => create_object(&href, &data, options).await?,
    };

    println!("{}", "✓ Object uploaded successfully".green());
    println!("Href: {href}");
    if let Some(etag) = response.etag() {
        println!("ETag: {etag}");
    }

    Ok(())
}

async fn cmd_delete(
    options: &SyncOptions,
    href: &str,
    etag: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let href = Href::from(href);
    let etag = etag.map(ETag::new);
    delete_object(&href, etag.as_ref(), options).await?;

    println!("{}", "✓ Object deleted successfully".green());
    println!("Href: {href}");

    Ok(())
}

/// Format error for user-friendly display.
fn format_error(err: &(dyn Error + 'static)) -> String {
    match err.downcast_ref::<DavError>() {
        Some(DavError::PreconditionFailed(_)) => format!(
            "{} ETag conflict - resource was modified by another client",
            "Error:".red().bold()
        ),
        Some(DavError::NotFound(href)) => {
            format!("{} Resource not found: {href}", "Error:".red().bold())
        }
        Some(DavError::CollectionNotFound(href)) => format!(
            "{} Collection {href} is not listed in its home, was it deleted?",
            "Error:".red().bold()
        ),
        Some(DavError::Http(msg)) if msg.starts_with("401") || msg.starts_with("403") => {
            format!("{} Authentication failed", "Error:".red().bold())
        }
        _ => format!("{} {}", "Error:".red().bold(), err),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Priority: .env.local (highest) -> .env -> existing environment variables (lowest)
    dotenvy::dotenv().ok();
    dotenvy::from_filename(".env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.build_config()?;
    let sync_method = config.sync_method;
    let options =
        SyncOptions::new(Arc::new(HttpTransport::new(config)?)).with_sync_method(sync_method);

    let runtime = tokio::runtime::Runtime::new()?;

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Reports { collection } => cmd_reports(&options, &collection).await,
            Commands::Dirty {
                collection,
                home,
                ctag,
            } => cmd_dirty(&options, &collection, &home, ctag).await,
            Commands::Put { href, input, etag } => cmd_put(&options, &href, &input, etag).await,
            Commands::Delete { href, etag } => cmd_delete(&options, &href, etag).await,
        }
    });

    if let Err(e) = result {
        // Flush stdout before printing error
        std::io::stdout().flush().ok();
        eprintln!("{}", format_error(e.as_ref()));
        std::process::exit(1);
    }

    Ok(())
}
