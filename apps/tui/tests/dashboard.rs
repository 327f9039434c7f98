use async_trait::async_trait;
use blackspot_tui::api::{parse_envelope, AccidentRecord, AccidentSource, FetchError};
use blackspot_tui::view::{
    initial_center, to_chart_series, to_markers, Dashboard, LoadStatus, Selection, ViewContent,
};
use blackspot_tui::{District, Year, DISTRICTS};

/// Serves canned envelopes: 남동구 2018 has two spots, 동구 answers with the
/// API's "no data" code, 중구 with an upstream error and everything else is empty.
struct Canned;

const NAMDONG_2018: &str = r#"{
    "resultCode": "00",
    "resultMsg": "NORMAL_CODE",
    "totalCount": 2,
    "items": {"item": [
        {"spot_nm": "인천 남동구 구월동 (모래내시장 부근)", "occrrnc_cnt": 7, "wnd_dnv_cnt": 9,
         "se_dnv_cnt": 3, "dth_dnv_cnt": 0, "la_crd": "37.4490", "lo_crd": "126.7035"},
        {"spot_nm": "인천 남동구 간석동 (간석오거리 부근)", "occrrnc_cnt": "5", "wnd_dnv_cnt": 6,
         "se_dnv_cnt": 1, "dth_dnv_cnt": 1, "la_crd": 37.4670, "lo_crd": 126.7080}
    ]}
}"#;

const EMPTY: &str = r#"{"resultCode": "00", "resultMsg": "NORMAL_CODE", "totalCount": 0, "items": ""}"#;

const NODATA: &str =
    r#"{"resultCode": "03", "resultMsg": "NODATA_ERROR", "totalCount": 0, "items": ""}"#;

const UPSTREAM_ERROR: &str =
    r#"{"resultCode": "30", "resultMsg": "SERVICE_KEY_IS_NOT_REGISTERED_ERROR"}"#;

#[async_trait]
impl AccidentSource for Canned {
    async fn fetch(&self, district: District, year: Year) -> Result<Vec<AccidentRecord>, FetchError> {
        let body = match (district.name, year.value()) {
            ("남동구", 2018) => NAMDONG_2018,
            ("동구", _) => NODATA,
            ("중구", _) => UPSTREAM_ERROR,
            _ => EMPTY,
        };
        parse_envelope(body)
    }
}

#[tokio::test]
async fn selecting_a_district_with_spots_feeds_chart_and_map() {
    let mut dashboard = Dashboard::new(Selection::new(DISTRICTS[0], Year::ALL[0]));

    let ticket = dashboard.select_district(DISTRICTS[1]);
    assert_eq!(dashboard.result().status(), LoadStatus::Pending);
    dashboard.resolve(ticket.seq, Canned.fetch(ticket.district, ticket.year).await);
    assert_eq!(dashboard.result().content(), ViewContent::NoData);

    let ticket = dashboard.select_year(Year::ALL[1]);
    dashboard.resolve(ticket.seq, Canned.fetch(ticket.district, ticket.year).await);
    assert_eq!(dashboard.heading(), "2018년 남동구 사고조회 결과");

    let records = dashboard.result().records();
    assert_eq!(records.len(), 2);

    let rows = to_chart_series(records);
    assert_eq!(rows[0].label, "인천 남동구");
    assert_eq!(rows[1].occurrence_count, 5);

    let markers = to_markers(records);
    assert_eq!(markers[0].label, "구월동");
    assert_eq!(markers[1].label, "간석동");

    let center = initial_center(records).map(|c| (c.lat, c.lng));
    assert_eq!(center, Some((37.4490, 126.7035)));
}

#[tokio::test]
async fn upstream_error_shows_failure() {
    let mut dashboard = Dashboard::default();
    let ticket = dashboard.select_district(DISTRICTS[7]);
    dashboard.resolve(ticket.seq, Canned.fetch(ticket.district, ticket.year).await);

    assert_eq!(dashboard.result().status(), LoadStatus::Failure);
    assert_eq!(dashboard.result().content().message(), Some("failed to fetch"));
    assert!(matches!(
        dashboard.result().error(),
        Some(FetchError::Upstream { .. })
    ));
}

#[tokio::test]
async fn nodata_code_shows_no_data_message() {
    let mut dashboard = Dashboard::default();
    let ticket = dashboard.select_district(DISTRICTS[2]);
    dashboard.resolve(ticket.seq, Canned.fetch(ticket.district, ticket.year).await);

    assert_eq!(dashboard.result().status(), LoadStatus::Success);
    assert_eq!(dashboard.result().content(), ViewContent::NoData);
    assert_eq!(dashboard.result().content().message(), Some("자료가 없습니다"));
}

#[tokio::test]
async fn late_answer_for_an_old_selection_is_ignored() {
    let mut dashboard = Dashboard::default();

    dashboard.select_district(DISTRICTS[1]);
    let old = dashboard.select_year(Year::ALL[1]);
    let current = dashboard.select_district(DISTRICTS[4]);

    let current_outcome = Canned.fetch(current.district, current.year).await;
    assert!(dashboard.resolve(current.seq, current_outcome));

    // 남동구 2018 has records; applying them would replace the empty result.
    let stale_outcome = Canned.fetch(old.district, old.year).await;
    assert!(!dashboard.resolve(old.seq, stale_outcome));

    assert_eq!(dashboard.result().content(), ViewContent::NoData);
    assert_eq!(dashboard.selection().district(), DISTRICTS[4]);
}

#[tokio::test]
async fn every_catalog_query_settles() {
    let mut dashboard = Dashboard::default();
    for district in DISTRICTS {
        for year in Year::ALL {
            let status = dashboard_run(&mut dashboard, district, year).await;
            assert_ne!(status, LoadStatus::Pending);
        }
    }
}

async fn dashboard_run(dashboard: &mut Dashboard, district: District, year: Year) -> LoadStatus {
    dashboard.select_district(district);
    let ticket = dashboard.select_year(year);
    dashboard.resolve(ticket.seq, Canned.fetch(ticket.district, ticket.year).await);
    dashboard.result().status()
}
