use serde::Serialize;
use std::fmt;

use crate::api::{AccidentRecord, AccidentSource, FetchError};
use crate::domain::{District, Year};
use crate::view::ViewContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Pending,
    Success,
    Failure,
}

impl LoadStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the latest request. Records only exist on success and the
/// error only on failure.
#[derive(Debug, Default)]
pub enum QueryResult {
    #[default]
    Pending,
    Success(Vec<AccidentRecord>),
    Failure(FetchError),
}

impl QueryResult {
    pub const fn status(&self) -> LoadStatus {
        match self {
            Self::Pending => LoadStatus::Pending,
            Self::Success(_) => LoadStatus::Success,
            Self::Failure(_) => LoadStatus::Failure,
        }
    }

    pub fn records(&self) -> &[AccidentRecord] {
        match self {
            Self::Success(records) => records,
            Self::Pending | Self::Failure(_) => &[],
        }
    }

    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure(error) => Some(error),
            Self::Pending | Self::Success(_) => None,
        }
    }

    pub fn content(&self) -> ViewContent<'_> {
        match self {
            Self::Pending => ViewContent::Fetching,
            Self::Failure(_) => ViewContent::Failed,
            Self::Success(records) if records.is_empty() => ViewContent::NoData,
            Self::Success(records) => ViewContent::Records(records),
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub district: District,
    pub year: Year,
}

/// Tracks the load status of the latest request.
///
/// Requests are numbered as they are issued; a resolution is applied only
/// when it carries the number of the latest request.
#[derive(Debug, Default)]
pub struct Coordinator {
    issued: u64,
    latest: Option<FetchTicket>,
    result: QueryResult,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request: status goes back to pending and any earlier
    /// request becomes stale.
    pub fn begin(&mut self, district: District, year: Year) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket {
            seq: self.issued,
            district,
            year,
        };

        log::debug!("request #{} issued for {year} {district}", ticket.seq);
        self.latest = Some(ticket);
        self.result = QueryResult::Pending;
        ticket
    }

    /// Applies the outcome of request `seq`. Returns `false` when the
    /// outcome was discarded because a newer request exists or this one
    /// was already resolved.
    pub fn resolve(
        &mut self,
        seq: u64,
        outcome: Result<Vec<AccidentRecord>, FetchError>,
    ) -> bool {
        let is_latest = self.latest.is_some_and(|ticket| ticket.seq == seq);
        if !is_latest || self.result.status() != LoadStatus::Pending {
            log::debug!("request #{seq} resolved late, discarding");
            return false;
        }

        self.result = match outcome {
            Ok(records) => {
                log::debug!("request #{seq} succeeded with {} records", records.len());
                QueryResult::Success(records)
            }
            Err(error) => {
                log::warn!("request #{seq} failed: {error}");
                QueryResult::Failure(error)
            }
        };
        true
    }

    /// Issues, awaits and resolves a single request.
    pub async fn run<S>(&mut self, source: &S, district: District, year: Year) -> LoadStatus
    where
        S: AccidentSource + ?Sized,
    {
        let ticket = self.begin(district, year);
        let outcome = source.fetch(ticket.district, ticket.year).await;
        self.resolve(ticket.seq, outcome);
        self.status()
    }

    pub const fn latest(&self) -> Option<FetchTicket> {
        self.latest
    }

    pub const fn result(&self) -> &QueryResult {
        &self.result
    }

    pub const fn status(&self) -> LoadStatus {
        self.result.status()
    }

    pub fn records(&self) -> &[AccidentRecord] {
        self.result.records()
    }

    pub const fn error(&self) -> Option<&FetchError> {
        self.result.error()
    }
}
