use blackspot_tui::config::{ENDPOINT_VAR, TIMEOUT_VAR};
use blackspot_tui::view::Selection;
use blackspot_tui::{District, Year};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "blackspot-tui", version, about = "Traffic accident black spots in Incheon")]
pub struct CliArgs {
    /// Survey year to show first (2017, 2018 or 2019)
    #[arg(long, value_parser = parse_year)]
    pub year: Option<Year>,

    /// District to show first, by name (e.g. 남동구) or code (e.g. 200)
    #[arg(long, value_parser = parse_district)]
    pub district: Option<District>,

    /// Fetch once, print the result and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the accident API endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(endpoint) = &self.endpoint {
            std::env::set_var(ENDPOINT_VAR, endpoint);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var(TIMEOUT_VAR, timeout.to_string());
        }
        if self.debug {
            std::env::set_var("RUST_LOG", "debug");
        }
    }

    pub fn initial_selection(&self) -> Selection {
        Selection::new(
            self.district.unwrap_or_default(),
            self.year.unwrap_or_default(),
        )
    }
}

fn parse_year(value: &str) -> Result<Year, String> {
    Year::parse(value).ok_or_else(|| {
        let years: Vec<String> = Year::ALL.iter().map(ToString::to_string).collect();
        format!("unknown year {value:?}; expected one of {}", years.join(", "))
    })
}

fn parse_district(value: &str) -> Result<District, String> {
    District::parse(value).ok_or_else(|| {
        let names: Vec<&str> = blackspot_tui::DISTRICTS.iter().map(|d| d.name).collect();
        format!("unknown district {value:?}; expected one of {}", names.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_flags() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["blackspot-tui", "--year", "2019", "--district", "부평구"])?;
        let selection = args.initial_selection();
        assert_eq!(selection.year().value(), 2019);
        assert_eq!(selection.district().district_code, 237);
        Ok(())
    }

    #[test]
    fn defaults_to_first_year_and_district() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["blackspot-tui"])?;
        assert_eq!(args.initial_selection(), Selection::default());
        assert!(!args.headless);
        Ok(())
    }

    #[test]
    fn rejects_years_outside_the_catalog() {
        assert!(CliArgs::try_parse_from(["blackspot-tui", "--year", "2021"]).is_err());
        assert!(CliArgs::try_parse_from(["blackspot-tui", "--district", "강남구"]).is_err());
    }
}
