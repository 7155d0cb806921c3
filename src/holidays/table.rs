//! Built-in public holiday calendar for the countries we cover

use serde::Serialize;

/// One public holiday. `date` is always `YYYY-MM-DD`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct HolidayEntry {
    pub date: &'static str,
    pub name: &'static str,
}

const fn h(date: &'static str, name: &'static str) -> HolidayEntry {
    HolidayEntry { date, name }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Singapore,
    India,
    Australia,
    Thailand,
}

impl Country {
    /// Country a city belongs to. Names are matched exactly.
    #[must_use]
    pub fn for_city(city: &str) -> Option<Self> {
        match city {
            "Singapore" => Some(Self::Singapore),
            "Bangalore" | "Mumbai" => Some(Self::India),
            "Sydney" => Some(Self::Australia),
            "Bangkok" => Some(Self::Thailand),
            _ => None,
        }
    }

    /// Holidays in table order, which is not necessarily chronological
    #[must_use]
    pub fn holidays(self) -> &'static [HolidayEntry] {
        match self {
            Self::Singapore => SINGAPORE,
            Self::India => INDIA,
            Self::Australia => AUSTRALIA,
            Self::Thailand => THAILAND,
        }
    }
}

static SINGAPORE: &[HolidayEntry] = &[
    h("2026-01-01", "New Year's Day"),
    h("2026-01-29", "Chinese New Year"),
    h("2026-01-30", "Chinese New Year"),
    h("2026-04-03", "Good Friday"),
    h("2026-05-01", "Labour Day"),
    h("2026-05-21", "Vesak Day"),
    h("2026-08-09", "National Day"),
    h("2026-10-24", "Deepavali"),
    h("2026-12-25", "Christmas Day"),
];

// Bangalore and Mumbai
static INDIA: &[HolidayEntry] = &[
    h("2026-01-26", "Republic Day"),
    h("2026-03-14", "Holi"),
    h("2026-04-02", "Good Friday"),
    h("2026-04-06", "Mahavir Jayanti"),
    h("2026-05-01", "Labour Day"),
    h("2026-08-15", "Independence Day"),
    h("2026-10-02", "Gandhi Jayanti"),
    h("2026-10-15", "Dussehra"),
    h("2026-10-24", "Diwali"),
    h("2026-11-14", "Guru Nanak's Birthday"),
    h("2026-12-25", "Christmas Day"),
];

static AUSTRALIA: &[HolidayEntry] = &[
    h("2026-01-01", "New Year's Day"),
    h("2026-01-26", "Australia Day"),
    h("2026-04-03", "Good Friday"),
    h("2026-04-04", "Saturday before Easter Sunday"),
    h("2026-04-06", "Easter Monday"),
    h("2026-04-25", "ANZAC Day"),
    h("2026-06-08", "Queen's Birthday"),
    h("2026-12-25", "Christmas Day"),
    h("2026-12-26", "Boxing Day"),
];

static THAILAND: &[HolidayEntry] = &[
    h("2026-01-01", "New Year's Day"),
    h("2026-02-16", "Makha Bucha Day"),
    h("2026-04-06", "Chakri Memorial Day"),
    h("2026-04-13", "Songkran Festival"),
    h("2026-04-14", "Songkran Festival"),
    h("2026-04-15", "Songkran Festival"),
    h("2026-05-01", "Labour Day"),
    h("2026-05-04", "Coronation Day"),
    h("2026-05-15", "Visakha Bucha Day"),
    h("2026-07-28", "King's Birthday"),
    h("2026-08-12", "Queen Mother's Birthday"),
    h("2026-10-13", "King Bhumibol Memorial Day"),
    h("2026-10-23", "Chulalongkorn Day"),
    h("2026-12-05", "King's Birthday"),
    h("2026-12-10", "Constitution Day"),
    h("2026-12-31", "New Year's Eve"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case("Singapore", Some(Country::Singapore))]
    #[case("Bangalore", Some(Country::India))]
    #[case("Mumbai", Some(Country::India))]
    #[case("Sydney", Some(Country::Australia))]
    #[case("Bangkok", Some(Country::Thailand))]
    #[case("mumbai", None)]
    #[case("London", None)]
    #[case("", None)]
    fn test_city_to_country(#[case] city: &str, #[case] expected: Option<Country>) {
        assert_eq!(Country::for_city(city), expected);
    }

    #[rstest]
    #[case(Country::Singapore, 9)]
    #[case(Country::India, 11)]
    #[case(Country::Australia, 9)]
    #[case(Country::Thailand, 16)]
    fn test_table_sizes(#[case] country: Country, #[case] expected: usize) {
        assert_eq!(country.holidays().len(), expected);
    }

    #[test]
    fn test_all_dates_are_canonical() {
        for country in [
            Country::Singapore,
            Country::India,
            Country::Australia,
            Country::Thailand,
        ] {
            for entry in country.holidays() {
                let parsed = NaiveDate::parse_from_str(entry.date, "%Y-%m-%d");
                assert!(parsed.is_ok(), "bad date {} in {:?}", entry.date, country);
                assert_eq!(entry.date.len(), 10);
            }
        }
    }
}
