use crate::core::render::ResultRow;
use crate::domain::model::SearchQuery;
use crate::domain::ports::{CompanySearch, NoticeKind, ResultsView};
use crate::utils::error::QueryError;
use std::sync::atomic::{AtomicBool, Ordering};

pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input failed validation; no request was sent.
    Rejected(QueryError),
    /// A previous submission is still in flight.
    Busy,
    NoResults,
    Populated(Vec<ResultRow>),
    Failed,
}

/// Drives one search form: validation, the loading state, the request and
/// the rendering of whatever came back.
pub struct ResultsPresenter<C, V> {
    search: C,
    view: V,
    in_flight: AtomicBool,
}

impl<C: CompanySearch, V: ResultsView> ResultsPresenter<C, V> {
    pub fn new(search: C, view: V) -> Self {
        Self {
            search,
            view,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Splits multi-line input into one company per line and submits it.
    pub async fn submit_text(&self, text: &str) -> SubmitOutcome {
        self.submit_query(text.lines()).await
    }

    pub async fn submit_query<I, S>(&self, names: I) -> SubmitOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = match SearchQuery::new(names) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!("Search rejected: {}", e);
                self.view.notify(&e.to_string(), NoticeKind::Error);
                return SubmitOutcome::Rejected(e);
            }
        };

        if self.in_flight.swap(true, Ordering::AcqRel) {
            return SubmitOutcome::Busy;
        }
        // Released on every exit, including a dropped future.
        let _guard = InFlight {
            flag: &self.in_flight,
            view: &self.view,
        };

        self.view.set_loading(true);
        self.view.clear_results();
        self.view.set_submit_enabled(false);

        tracing::info!(companies = query.len(), "Searching companies");
        match self.search.search(&query).await {
            Ok(results) if results.is_empty() => {
                self.view.show_no_results();
                SubmitOutcome::NoResults
            }
            Ok(results) => {
                let rows: Vec<ResultRow> = results.iter().map(ResultRow::from).collect();
                tracing::debug!(rows = rows.len(), "Rendering search results");
                self.view.show_results(&rows);
                SubmitOutcome::Populated(rows)
            }
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                self.view.notify(SEARCH_FAILED_MESSAGE, NoticeKind::Error);
                SubmitOutcome::Failed
            }
        }
    }
}

/// Restores the form when a submission ends.
struct InFlight<'a, V: ResultsView> {
    flag: &'a AtomicBool,
    view: &'a V,
}

impl<V: ResultsView> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(false);
        self.view.set_submit_enabled(true);
        self.flag.store(false, Ordering::Release);
    }
}
