use serde::Serialize;

use crate::api::AccidentRecord;

/// One chart row per black spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub occurrence_count: u32,
    pub injury_count: u32,
    pub serious_injury_count: u32,
    pub death_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Occurrences,
    Injuries,
    SeriousInjuries,
    Deaths,
}

impl Metric {
    pub const ALL: [Self; 4] = [
        Self::Occurrences,
        Self::Injuries,
        Self::SeriousInjuries,
        Self::Deaths,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Occurrences => "발생건수",
            Self::Injuries => "부상자수",
            Self::SeriousInjuries => "중상자수",
            Self::Deaths => "사망자수",
        }
    }
}

impl ChartRow {
    pub const fn value(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Occurrences => self.occurrence_count,
            Metric::Injuries => self.injury_count,
            Metric::SeriousInjuries => self.serious_injury_count,
            Metric::Deaths => self.death_count,
        }
    }
}

/// First two words of a location name, e.g. `"서울 강남 교차로"` → `"서울 강남"`.
pub fn short_label(location_name: &str) -> String {
    location_name
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn to_chart_series(records: &[AccidentRecord]) -> Vec<ChartRow> {
    records
        .iter()
        .map(|record| ChartRow {
            label: short_label(&record.location_name),
            occurrence_count: record.occurrence_count,
            injury_count: record.injury_count,
            serious_injury_count: record.serious_injury_count,
            death_count: record.death_count,
        })
        .collect()
}

/// Largest value of any metric in `rows`, at least 1.
pub fn max_value(rows: &[ChartRow]) -> u32 {
    rows.iter()
        .flat_map(|row| Metric::ALL.map(|metric| row.value(metric)))
        .max()
        .unwrap_or(0)
        .max(1)
}
