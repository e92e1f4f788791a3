//! Paginated, status-filtered list views (bulk records, interviews).

use crate::client::{ScreeningApi, SearchQuery};
use crate::error::ApiError;
use crate::models::{CallStatus, CandidateRecord, CandidateStatus, Interview, Page, StatusKind};
use std::ops::RangeInclusive;
use tracing::debug;

pub const PAGE_LIMIT: u32 = 10;

pub const RECORDS_FAILED: &str = "Failed to fetch records. Please try again.";
pub const INTERVIEWS_FAILED: &str = "Failed to fetch interviews. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Issued by [`ListView::begin_fetch`]; hand it back to [`ListView::apply`]
/// together with the response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: SearchQuery,
}

#[derive(Clone, Debug)]
pub struct ListView<S, T> {
    filter: Option<S>,
    page: u32,
    total: u64,
    total_pages: u32,
    items: Vec<T>,
    phase: Phase,
    generation: u64,
    failure_message: &'static str,
}

pub type RecordList = ListView<CandidateStatus, CandidateRecord>;
pub type InterviewList = ListView<CallStatus, Interview>;

impl RecordList {
    pub fn records() -> Self {
        Self::new(RECORDS_FAILED)
    }

    /// Fetches the current page and applies it.
    pub async fn refresh<A: ScreeningApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.begin_fetch();
        let result = api.search_records(&ticket.query).await;
        self.apply(&ticket, result)
    }
}

impl InterviewList {
    pub fn interviews() -> Self {
        Self::new(INTERVIEWS_FAILED)
    }

    pub async fn refresh<A: ScreeningApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.begin_fetch();
        let result = api.search_interviews(&ticket.query).await;
        self.apply(&ticket, result)
    }
}

impl<S: StatusKind, T> ListView<S, T> {
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            filter: None,
            page: 1,
            total: 0,
            total_pages: 1,
            items: Vec::new(),
            phase: Phase::Idle,
            generation: 0,
            failure_message,
        }
    }

    /// Changing the filter always restarts from page 1.
    pub fn set_filter(&mut self, filter: Option<S>) -> FetchTicket {
        self.filter = filter;
        self.page = 1;
        self.begin_fetch()
    }

    /// Moves to `page` (clamped to the known range). Returns `None` when the
    /// page does not change.
    pub fn go_to(&mut self, page: u32) -> Option<FetchTicket> {
        let page = page.clamp(1, self.total_pages.max(1));
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.begin_fetch())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        FetchTicket {
            generation: self.generation,
            query: SearchQuery::page(self.filter.map(StatusKind::wire), self.page, PAGE_LIMIT),
        }
    }

    /// Applies a response. Responses for anything but the latest ticket are
    /// dropped; returns whether the response was applied.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<Page<T>, ApiError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded list response"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.total_pages = page.total_pages.max(1);
                self.phase = Phase::Ready;
            }
            Err(e) => {
                debug!(error = %e, "list fetch failed");
                self.phase = Phase::Failed(self.failure_message.to_string());
            }
        }
        true
    }

    pub fn filter(&self) -> Option<S> {
        self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn controls(&self) -> PageControls {
        PageControls::new(self.page, self.total_pages)
    }
}

/// First/Prev/numbered/Next/Last pagination affordances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageControls {
    pub current: u32,
    pub total_pages: u32,
}

impl PageControls {
    pub fn new(current: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current: current.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.total_pages
    }

    pub fn first_disabled(&self) -> bool {
        self.current == 1
    }

    pub fn prev_disabled(&self) -> bool {
        self.current == 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current == self.total_pages
    }

    pub fn last_disabled(&self) -> bool {
        self.current == self.total_pages
    }

    pub fn prev(&self) -> u32 {
        self.current.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        (self.current + 1).min(self.total_pages)
    }
}
