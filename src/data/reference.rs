use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Location – one entry of the country reference table
// ---------------------------------------------------------------------------

/// Map position and ISO3 code for a known country.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub iso_code: String,
}

/// (name, lat, lon, ISO3) for every producer the dashboard knows how to place.
const BUILTIN_COUNTRIES: &[(&str, f64, f64, &str)] = &[
    ("Australia", -25.27, 133.78, "AUS"),
    ("Austria", 47.52, 14.55, "AUT"),
    ("Belarus", 53.71, 27.95, "BLR"),
    ("Belgium", 50.50, 4.47, "BEL"),
    ("Brazil", -14.24, -51.93, "BRA"),
    ("Chile", -35.68, -71.54, "CHL"),
    ("Czech Republic", 49.82, 15.47, "CZE"),
    ("Egypt", 26.82, 30.80, "EGY"),
    // Placed at Brussels; EUR is not an ISO3 code.
    ("European Commission", 50.85, 4.35, "EUR"),
    ("Finland", 61.92, 25.75, "FIN"),
    ("France", 46.23, 2.21, "FRA"),
    ("Germany", 51.17, 10.45, "DEU"),
    ("India", 20.59, 78.96, "IND"),
    ("Indonesia", -0.79, 113.92, "IDN"),
    ("Iran", 32.43, 53.69, "IRN"),
    ("Japan", 36.20, 138.25, "JPN"),
    // South Korea
    ("Korea", 35.91, 127.77, "KOR"),
    ("Pakistan", 30.38, 69.35, "PAK"),
    ("South Africa", -30.56, 22.94, "ZAF"),
    ("Spain", 40.46, -3.75, "ESP"),
    ("Switzerland", 46.82, 8.23, "CHE"),
    ("Syria", 34.80, 38.99, "SYR"),
    ("Turkey", 38.96, 35.24, "TUR"),
    ("USA", 37.09, -95.71, "USA"),
];

// ---------------------------------------------------------------------------
// ReferenceTables – immutable country lookup
// ---------------------------------------------------------------------------

/// Closed country → location lookup used to place records on the map.
///
/// Lookups are exact string matches. A country that is not in the table is
/// not an error: it gets `(0.0, 0.0)` and an empty ISO code.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    entries: BTreeMap<String, Location>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceTables {
    /// The hand-curated table shipped with the dashboard.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_COUNTRIES.iter().map(|&(name, lat, lon, iso)| {
            (
                name.to_string(),
                Location {
                    latitude: lat,
                    longitude: lon,
                    iso_code: iso.to_string(),
                },
            )
        }))
    }

    /// Build a table from arbitrary entries. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Location)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, country: &str) -> Option<&Location> {
        self.entries.get(country)
    }

    /// `(latitude, longitude)`, or `(0.0, 0.0)` for an unknown country.
    pub fn coordinates_of(&self, country: &str) -> (f64, f64) {
        self.get(country)
            .map(|loc| (loc.latitude, loc.longitude))
            .unwrap_or((0.0, 0.0))
    }

    /// ISO3 code, or `""` for an unknown country.
    pub fn iso_code_of(&self, country: &str) -> &str {
        self.get(country)
            .map(|loc| loc.iso_code.as_str())
            .unwrap_or("")
    }

    /// Country names in alphabetical order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
