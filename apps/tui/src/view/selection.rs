use crate::domain::{District, Year};

/// The year and district currently chosen by the user.
///
/// Every `select_*` call is a change, even when the value is the same one
/// already selected; `revision` counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    district: District,
    year: Year,
    revision: u64,
}

impl Selection {
    pub const fn new(district: District, year: Year) -> Self {
        Self {
            district,
            year,
            revision: 0,
        }
    }

    pub const fn district(&self) -> District {
        self.district
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn select_year(&mut self, year: Year) {
        self.year = year;
        self.revision += 1;
    }

    pub fn select_district(&mut self, district: District) {
        self.district = district;
        self.revision += 1;
    }
}
