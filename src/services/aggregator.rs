use crate::models::book::Book;
use crate::services::upstream::{BookSource, UpstreamError};
use crate::services::validate::{is_complete, Completeness};
use tracing::{debug, trace, warn};

/// Hard ceiling on the number of books returned for one request.
pub const MAX_LIMIT: usize = 50;

pub const DEFAULT_MAX_UPSTREAM_CALLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Upper bound on upstream calls per aggregation, reached calls end the
    /// loop with whatever has been accumulated.
    pub max_upstream_calls: usize,
    pub completeness: Completeness,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_upstream_calls: DEFAULT_MAX_UPSTREAM_CALLS,
            completeness: Completeness::default(),
        }
    }
}

/// Collects up to `limit` complete books for `query`, paging through `source`
/// until the limit is met, the source runs dry, or the call budget is spent.
///
/// Any upstream failure aborts the whole aggregation.
pub async fn fetch_books<S>(
    source: &S,
    query: &str,
    limit: usize,
    policy: FetchPolicy,
) -> Result<Vec<Book>, UpstreamError>
where
    S: BookSource + ?Sized,
{
    let limit = limit.min(MAX_LIMIT);
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut books = Vec::with_capacity(limit);
    let mut start_index = 0;
    let mut calls = 0;

    while books.len() < limit {
        if calls >= policy.max_upstream_calls {
            warn!(
                "Stopping search for '{}' after {} upstream calls with {}/{} books",
                query,
                calls,
                books.len(),
                limit
            );
            break;
        }

        let page = source.search(query, start_index).await?;
        calls += 1;

        if page.is_empty() {
            debug!(
                "Upstream exhausted for '{}' with {} books accumulated",
                query,
                books.len()
            );
            break;
        }

        start_index += page.len();

        for info in page {
            if books.len() >= limit {
                break;
            }

            if !is_complete(&info, policy.completeness) {
                trace!("Skipping incomplete record '{}'", info.title);
                continue;
            }

            books.push(Book::from(info));
        }
    }

    Ok(books)
}
