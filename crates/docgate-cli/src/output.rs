//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use docgate_core::types::PageResult;
use docgate_entity::document::DocumentAsset;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One table row per document.
#[derive(Debug, Tabled)]
pub struct DocumentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Filename")]
    filename: String,
    #[tabled(rename = "Type")]
    document_type: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Size")]
    size: i64,
    #[tabled(rename = "Uploaded")]
    upload_date: String,
}

impl From<&DocumentAsset> for DocumentRow {
    fn from(asset: &DocumentAsset) -> Self {
        Self {
            id: asset.id.clone(),
            filename: asset.filename.clone(),
            document_type: asset.document_type.to_string(),
            channel: asset.channel.to_string(),
            status: asset.status.to_string(),
            size: asset.size,
            upload_date: asset.upload_date.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(&items, "[]"),
    }
}

/// Print documents as a table, or the assets themselves as JSON.
pub fn print_documents(assets: &[DocumentAsset], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<DocumentRow> = assets.iter().map(DocumentRow::from).collect();
            if rows.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => print_json(&assets, "[]"),
    }
}

/// Print one page of documents followed by its paging summary.
pub fn print_page(page: &PageResult<DocumentAsset>, page_number: u64, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            print_documents(&page.items, format);
            println!();
            print_kv("Page", &page_number.to_string());
            print_kv("Total", &page.total.to_string());
            print_kv("Has next page", if page.has_next_page { "yes" } else { "no" });
        }
        OutputFormat::Json => print_json(page, "{}"),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => print_json(item, "{}"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, fallback: &str) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
