use crate::api::{AccidentRecord, AccidentSource, FetchError};
use crate::domain::{District, Year};
use crate::view::{Coordinator, FetchTicket, LoadStatus, QueryResult, Selection};

/// Selection and load state of the dashboard.
///
/// Each mutation of the selection starts a new request and hands back the
/// ticket the caller must fetch for; nothing is fetched implicitly.
#[derive(Debug, Default)]
pub struct Dashboard {
    selection: Selection,
    coordinator: Coordinator,
}

impl Dashboard {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            coordinator: Coordinator::new(),
        }
    }

    pub fn select_year(&mut self, year: Year) -> FetchTicket {
        self.selection.select_year(year);
        self.refresh()
    }

    pub fn select_district(&mut self, district: District) -> FetchTicket {
        self.selection.select_district(district);
        self.refresh()
    }

    /// Requests the current selection again.
    pub fn refresh(&mut self) -> FetchTicket {
        self.coordinator
            .begin(self.selection.district(), self.selection.year())
    }

    /// Fetches the current selection in place and settles the result.
    pub async fn run<S>(&mut self, source: &S) -> LoadStatus
    where
        S: AccidentSource + ?Sized,
    {
        let selection = self.selection;
        self.coordinator
            .run(source, selection.district(), selection.year())
            .await
    }

    pub fn resolve(&mut self, seq: u64, outcome: Result<Vec<AccidentRecord>, FetchError>) -> bool {
        self.coordinator.resolve(seq, outcome)
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub const fn result(&self) -> &QueryResult {
        self.coordinator.result()
    }

    /// e.g. `2017년 계양구 사고조회 결과`
    pub fn heading(&self) -> String {
        format!(
            "{}년 {} 사고조회 결과",
            self.selection.year(),
            self.selection.district()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DISTRICTS;
    use async_trait::async_trait;

    struct Failing;

    #[async_trait]
    impl AccidentSource for Failing {
        async fn fetch(&self, _: District, _: Year) -> Result<Vec<AccidentRecord>, FetchError> {
            Err(FetchError::Unreachable {
                status: Some(500),
                message: "HTTP 500".to_string(),
            })
        }
    }

    #[test]
    fn each_change_issues_one_new_ticket() {
        let mut dashboard = Dashboard::default();

        let first = dashboard.select_district(DISTRICTS[3]);
        let second = dashboard.select_year(Year::ALL[1]);
        let third = dashboard.select_year(Year::ALL[1]);

        assert_eq!(second.seq, first.seq + 1);
        assert_eq!(third.seq, second.seq + 1);
        assert_eq!(third.district, DISTRICTS[3]);
        assert_eq!(third.year, Year::ALL[1]);
        assert_eq!(dashboard.selection().revision(), 3);
        assert_eq!(dashboard.coordinator().latest(), Some(third));
    }

    #[test]
    fn selection_change_goes_pending_then_settles_once() {
        let mut dashboard = Dashboard::default();
        let ticket = dashboard.select_district(DISTRICTS[2]);
        assert_eq!(dashboard.result().status(), LoadStatus::Pending);

        assert!(dashboard.resolve(ticket.seq, Ok(Vec::new())));
        assert_eq!(dashboard.result().status(), LoadStatus::Success);
        assert!(!dashboard.resolve(ticket.seq, Ok(Vec::new())));
    }

    #[test]
    fn heading_names_year_and_district() {
        let mut dashboard = Dashboard::new(Selection::new(DISTRICTS[1], Year::ALL[2]));
        assert_eq!(dashboard.heading(), "2019년 남동구 사고조회 결과");

        dashboard.select_district(DISTRICTS[7]);
        assert_eq!(dashboard.heading(), "2019년 중구 사고조회 결과");
    }

    #[tokio::test]
    async fn run_fetches_the_current_selection() {
        let mut dashboard = Dashboard::new(Selection::new(DISTRICTS[5], Year::ALL[2]));

        assert_eq!(dashboard.run(&Failing).await, LoadStatus::Failure);
        let latest = dashboard.coordinator().latest();
        assert_eq!(latest.map(|t| (t.district, t.year)), Some((DISTRICTS[5], Year::ALL[2])));
        assert_eq!(dashboard.result().content().message(), Some("failed to fetch"));
    }
}
