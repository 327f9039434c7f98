use serde::Serialize;
use std::fmt;

/// Region code of Incheon in the accident API.
pub const INCHEON_REGION_CODE: u16 = 28;

/// An administrative district that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct District {
    pub region_code: u16,
    pub district_code: u16,
    pub name: &'static str,
}

const fn incheon(district_code: u16, name: &'static str) -> District {
    District {
        region_code: INCHEON_REGION_CODE,
        district_code,
        name,
    }
}

/// Selectable districts, in display order.
pub const DISTRICTS: [District; 8] = [
    incheon(245, "계양구"),
    incheon(200, "남동구"),
    incheon(140, "동구"),
    incheon(177, "미추홀구"),
    incheon(237, "부평구"),
    incheon(260, "서구"),
    incheon(185, "연수구"),
    incheon(110, "중구"),
];

impl District {
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < DISTRICTS.len() {
            Some(DISTRICTS[index])
        } else {
            None
        }
    }

    /// Position of this district in [`DISTRICTS`]. Districts are identified
    /// by their district code.
    pub fn index(self) -> usize {
        DISTRICTS
            .iter()
            .position(|district| district.district_code == self.district_code)
            .unwrap_or(0)
    }

    /// Accepts either the Korean name or the numeric district code.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(code) = value.parse::<u16>() {
            return DISTRICTS
                .iter()
                .copied()
                .find(|district| district.district_code == code);
        }

        DISTRICTS
            .iter()
            .copied()
            .find(|district| district.name == value)
    }
}

impl Default for District {
    fn default() -> Self {
        DISTRICTS[0]
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A survey year offered by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Year(u16);

impl Year {
    pub const ALL: [Self; 3] = [Self(2017), Self(2018), Self(2019)];

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|year| *year == self)
            .unwrap_or(0)
    }

    /// Only years from [`Year::ALL`] are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().parse::<u16>().ok()?;
        Self::ALL.iter().copied().find(|year| year.0 == value)
    }
}

impl Default for Year {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
