//! Offset pagination over a [`DataSource`].

use docgate_core::result::AppResult;
use docgate_core::types::{PageRequest, PageResult};
use tokio_util::sync::CancellationToken;

use crate::source::{DataSource, Query, Window};

/// Count the filtered set, then fetch the requested page of it.
///
/// `request` is used as given; normalize it first with
/// [`PageRequest::normalized`]. A page size of zero yields an empty page with
/// `has_next_page == false`.
pub async fn paginate<T, S>(
    source: &S,
    query: &Query<T>,
    request: &PageRequest,
    cancel: &CancellationToken,
) -> AppResult<PageResult<T>>
where
    T: Send + Sync + 'static,
    S: DataSource<T> + ?Sized,
{
    let total = source.count(query, cancel).await?;

    if request.page_size == 0 || request.offset() >= total {
        return Ok(PageResult::new(Vec::new(), request.page, request.page_size, total));
    }

    let window = Window::new(request.offset(), request.limit());
    let items = source.fetch(query, Some(window), cancel).await?;

    tracing::debug!(
        page = request.page,
        page_size = request.page_size,
        returned = items.len(),
        total,
        "Fetched page"
    );

    Ok(PageResult::new(items, request.page, request.page_size, total))
}
