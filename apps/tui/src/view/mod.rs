//! View state: what is selected, what has been fetched for it, and how the
//! fetched records are reshaped for the chart and the map.

pub mod chart;
pub mod coordinator;
pub mod dashboard;
pub mod map;
pub mod selection;

pub use chart::{to_chart_series, ChartRow, Metric};
pub use coordinator::{Coordinator, FetchTicket, LoadStatus, QueryResult};
pub use dashboard::Dashboard;
pub use map::{initial_center, to_markers, GeoPoint, Marker, Viewport};
pub use selection::Selection;

use crate::api::AccidentRecord;

pub const FETCHING_MESSAGE: &str = "fetching data...";
pub const FAILED_MESSAGE: &str = "failed to fetch";
pub const NO_DATA_MESSAGE: &str = "자료가 없습니다";

/// What the result panel should show for the current [`QueryResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewContent<'a> {
    Fetching,
    Failed,
    NoData,
    Records(&'a [AccidentRecord]),
}

impl ViewContent<'_> {
    /// Fixed user-facing message, or `None` when records are shown.
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Fetching => Some(FETCHING_MESSAGE),
            Self::Failed => Some(FAILED_MESSAGE),
            Self::NoData => Some(NO_DATA_MESSAGE),
            Self::Records(_) => None,
        }
    }
}
