//! Document search command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::output::{self, OutputFormat};
use docgate_core::config::AppConfig;
use docgate_core::error::{AppError, ErrorKind};
use docgate_core::types::{PageRequest, SortDirection, SortSpec};
use docgate_service::{DocumentSearchService, MemoryDocumentRepository};

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// JSON file holding an array of documents
    #[arg(short, long)]
    pub data: PathBuf,

    /// Filter expression, e.g. "filename contains 'test' and status eq 'RECEIVED'"
    #[arg(long)]
    pub filter: Option<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (ASC or DESC)
    #[arg(long, default_value = "ASC")]
    pub direction: String,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u64,

    /// Page size (defaults to search.default_page_size)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Return every match without paging
    #[arg(long)]
    pub all: bool,
}

/// Load the document file into a search service.
pub(crate) async fn open_service(
    data: &Path,
    config: &AppConfig,
) -> Result<DocumentSearchService, AppError> {
    tracing::debug!(path = %data.display(), "Loading documents");
    let json = tokio::fs::read_to_string(data).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to read '{}': {e}", data.display()),
            e,
        )
    })?;
    let repository = MemoryDocumentRepository::from_json(&json)?;
    Ok(DocumentSearchService::new(
        Arc::new(repository),
        config.search.clone(),
    ))
}

/// A token that is cancelled on Ctrl-C.
pub(crate) fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });
    cancel
}

/// Execute the search command
pub async fn execute(
    args: &SearchArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = open_service(&args.data, config).await?;
    let cancel = cancel_on_interrupt();

    let sort = SortSpec::new(
        args.sort_by.clone().unwrap_or_default(),
        SortDirection::from(args.direction.as_str()),
    );

    if args.all {
        let assets = service.search_all(args.filter.as_deref(), &sort, &cancel).await?;
        output::print_documents(&assets, format);
        return Ok(());
    }

    let mut request = PageRequest::new(
        args.page,
        args.page_size.unwrap_or(config.search.default_page_size),
    )
    .with_sort(sort);
    if let Some(filter) = &args.filter {
        request = request.with_filter(filter.clone());
    }

    let page_number = request.page.max(1);
    let page = service.search_paged(request, &cancel).await?;
    output::print_page(&page, page_number, format);
    Ok(())
}
