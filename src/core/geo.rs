use crate::models::Continent;

/// Earth's radius in miles
const EARTH_RADIUS_MI: f64 = 3958.8;

/// Sentinel distance returned when a location cannot be resolved.
///
/// Unresolvable cities never error; they fall into the worst location
/// band downstream instead.
pub const UNKNOWN_DISTANCE_MILES: f64 = 9999.0;

/// Immutable city-coordinate and continent lookup tables.
///
/// Injected into the scorer at construction time so tests can substitute
/// fixture tables without touching process-wide state. Entries are kept in
/// insertion order: the substring fallback takes the first match in table
/// order, so a fixed table gives deterministic results.
#[derive(Debug, Clone)]
pub struct GeoTable {
    /// lowercase city key -> (lat, lng); keys unique
    cities: Vec<(String, (f64, f64))>,
    /// lowercase country/region substring -> continent
    continents: Vec<(String, Continent)>,
}

impl GeoTable {
    /// Build a table from custom entries. Keys are lowercased here so
    /// callers can pass them in any case.
    pub fn new(
        cities: Vec<(&str, (f64, f64))>,
        continents: Vec<(&str, Continent)>,
    ) -> Self {
        Self {
            cities: cities
                .into_iter()
                .map(|(k, c)| (k.to_lowercase(), c))
                .collect(),
            continents: continents
                .into_iter()
                .map(|(k, c)| (k.to_lowercase(), c))
                .collect(),
        }
    }

    /// Haversine distance in miles between two free-text locations.
    ///
    /// The city token is the text before the first comma, trimmed and
    /// lowercased. Exact key lookup first, then substring containment in
    /// either direction. If either side stays unresolved the result is
    /// [`UNKNOWN_DISTANCE_MILES`], never an error.
    pub fn distance_miles(&self, location_a: &str, location_b: &str) -> f64 {
        let a = self.resolve(location_a);
        let b = self.resolve(location_b);

        match (a, b) {
            (Some((lat1, lon1)), Some((lat2, lon2))) => {
                haversine_miles(lat1, lon1, lat2, lon2)
            }
            _ => UNKNOWN_DISTANCE_MILES,
        }
    }

    /// Resolve a free-text location to coordinates
    pub fn resolve(&self, location: &str) -> Option<(f64, f64)> {
        let city = city_token(location);
        if city.is_empty() {
            return None;
        }

        // Exact match wins over any substring match
        if let Some((_, coords)) = self.cities.iter().find(|(key, _)| *key == city) {
            return Some(*coords);
        }

        // Best-effort fuzzy fallback: first containment in table order
        self.cities
            .iter()
            .find(|(key, _)| city.contains(key.as_str()) || key.contains(&city))
            .map(|(_, coords)| *coords)
    }

    /// Classify a location's continent by substring scan over the full
    /// lowercased location text. `None` when nothing in the table matches.
    pub fn continent_of(&self, location: &str) -> Option<Continent> {
        let location = location.to_lowercase();
        self.continents
            .iter()
            .find(|(key, _)| location.contains(key.as_str()))
            .map(|(_, continent)| *continent)
    }

    /// A lane is international only when both endpoints resolve to known,
    /// different continents. An unknown continent on either side is treated
    /// as domestic.
    pub fn is_international(&self, origin: &str, destination: &str) -> bool {
        match (self.continent_of(origin), self.continent_of(destination)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }
}

/// Extract the city token: text before the first comma, trimmed, lowercased
#[inline]
fn city_token(location: &str) -> String {
    location
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Great-circle distance in miles between two coordinate pairs
#[inline]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MI * c
}

impl Default for GeoTable {
    /// Built-in table: North-American freight hubs plus the international
    /// port and air hubs the demo fleet operates between.
    fn default() -> Self {
        use Continent::*;

        GeoTable::new(
            vec![
                ("atlanta", (33.7490, -84.3880)),
                ("chicago", (41.8781, -87.6298)),
                ("dallas", (32.7767, -96.7970)),
                ("houston", (29.7604, -95.3698)),
                ("los angeles", (34.0522, -118.2437)),
                ("phoenix", (33.4484, -112.0740)),
                ("new york", (40.7128, -74.0060)),
                ("miami", (25.7617, -80.1918)),
                ("seattle", (47.6062, -122.3321)),
                ("denver", (39.7392, -104.9903)),
                ("boston", (42.3601, -71.0589)),
                ("detroit", (42.3314, -83.0458)),
                ("memphis", (35.1495, -90.0490)),
                ("nashville", (36.1627, -86.7816)),
                ("kansas city", (39.0997, -94.5786)),
                ("st. louis", (38.6270, -90.1994)),
                ("minneapolis", (44.9778, -93.2650)),
                ("portland", (45.5152, -122.6784)),
                ("las vegas", (36.1699, -115.1398)),
                ("san francisco", (37.7749, -122.4194)),
                ("san diego", (32.7157, -117.1611)),
                ("austin", (30.2672, -97.7431)),
                ("san antonio", (29.4241, -98.4936)),
                ("el paso", (31.7619, -106.4850)),
                ("charlotte", (35.2271, -80.8431)),
                ("indianapolis", (39.7684, -86.1581)),
                ("columbus", (39.9612, -82.9988)),
                ("jacksonville", (30.3322, -81.6557)),
                ("philadelphia", (39.9526, -75.1652)),
                ("oklahoma city", (35.4676, -97.5164)),
                ("salt lake city", (40.7608, -111.8910)),
                ("savannah", (32.0809, -81.0912)),
                ("laredo", (27.5306, -99.4803)),
                ("toronto", (43.6532, -79.3832)),
                ("vancouver", (49.2827, -123.1207)),
                ("mexico city", (19.4326, -99.1332)),
                ("tokyo", (35.6762, 139.6503)),
                ("shanghai", (31.2304, 121.4737)),
                ("hong kong", (22.3193, 114.1694)),
                ("seoul", (37.5665, 126.9780)),
                ("busan", (35.1796, 129.0756)),
                ("singapore", (1.3521, 103.8198)),
                ("dubai", (25.2048, 55.2708)),
                ("london", (51.5074, -0.1278)),
                ("paris", (48.8566, 2.3522)),
                ("hamburg", (53.5511, 9.9937)),
                ("rotterdam", (51.9244, 4.4777)),
                ("amsterdam", (52.3676, 4.9041)),
                ("frankfurt", (50.1109, 8.6821)),
                ("sydney", (-33.8688, 151.2093)),
                ("sao paulo", (-23.5505, -46.6333)),
            ],
            vec![
                // Hub cities first: city names must win before shorter
                // country tokens can shadow them ("busan" contains "usa")
                ("tokyo", Asia),
                ("shanghai", Asia),
                ("hong kong", Asia),
                ("seoul", Asia),
                ("busan", Asia),
                ("dubai", Asia),
                ("london", Europe),
                ("paris", Europe),
                ("hamburg", Europe),
                ("rotterdam", Europe),
                ("amsterdam", Europe),
                ("frankfurt", Europe),
                ("sydney", Oceania),
                ("sao paulo", SouthAmerica),
                ("toronto", NorthAmerica),
                ("vancouver", NorthAmerica),
                // Countries and regions
                ("united states", NorthAmerica),
                ("usa", NorthAmerica),
                ("canada", NorthAmerica),
                ("mexico", NorthAmerica),
                ("japan", Asia),
                ("china", Asia),
                ("korea", Asia),
                ("singapore", Asia),
                ("india", Asia),
                ("uae", Asia),
                ("germany", Europe),
                ("france", Europe),
                ("united kingdom", Europe),
                ("netherlands", Europe),
                ("spain", Europe),
                ("italy", Europe),
                ("brazil", SouthAmerica),
                ("argentina", SouthAmerica),
                ("chile", SouthAmerica),
                ("australia", Oceania),
                ("new zealand", Oceania),
                ("egypt", Africa),
                ("nigeria", Africa),
                ("south africa", Africa),
                ("morocco", Africa),
                // US state codes as they appear in "City, XX" strings;
                // last, so country names take precedence
                (", tx", NorthAmerica),
                (", ca", NorthAmerica),
                (", il", NorthAmerica),
                (", ny", NorthAmerica),
                (", fl", NorthAmerica),
                (", ga", NorthAmerica),
                (", az", NorthAmerica),
                (", pa", NorthAmerica),
                (", wa", NorthAmerica),
                (", co", NorthAmerica),
                (", nv", NorthAmerica),
                (", or", NorthAmerica),
                (", tn", NorthAmerica),
                (", oh", NorthAmerica),
                (", nc", NorthAmerica),
                (", mi", NorthAmerica),
                (", mo", NorthAmerica),
                (", mn", NorthAmerica),
                (", ut", NorthAmerica),
                (", ok", NorthAmerica),
                (", in", NorthAmerica),
                (", ma", NorthAmerica),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Continent;

    #[test]
    fn test_haversine_known_distance() {
        // New York to Los Angeles is approximately 2450 miles
        let distance = haversine_miles(40.7128, -74.0060, 34.0522, -118.2437);
        assert!(
            (distance - 2450.0).abs() < 60.0,
            "Expected ~2450mi, got {}",
            distance
        );
    }

    #[test]
    fn test_distance_same_city_is_zero() {
        let geo = GeoTable::default();
        let distance = geo.distance_miles("Dallas, TX", "Dallas, TX");
        assert!(distance.abs() < 0.01);
    }

    #[test]
    fn test_distance_symmetry() {
        let geo = GeoTable::default();
        let ab = geo.distance_miles("Chicago, IL", "Atlanta, GA");
        let ba = geo.distance_miles("Atlanta, GA", "Chicago, IL");
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_city_yields_sentinel() {
        let geo = GeoTable::default();
        assert_eq!(
            geo.distance_miles("Nowheresville, ZZ", "Dallas, TX"),
            UNKNOWN_DISTANCE_MILES
        );
        assert_eq!(
            geo.distance_miles("Dallas, TX", "Nowheresville, ZZ"),
            UNKNOWN_DISTANCE_MILES
        );
        assert_eq!(
            geo.distance_miles("Nowheresville, ZZ", "Elsewhere, QQ"),
            UNKNOWN_DISTANCE_MILES
        );
    }

    #[test]
    fn test_substring_fallback() {
        let geo = GeoTable::default();
        // "East Los Angeles" contains the "los angeles" key
        let resolved = geo.resolve("East Los Angeles, CA");
        assert_eq!(resolved, Some((34.0522, -118.2437)));
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let geo = GeoTable::new(
            vec![("york", (1.0, 1.0)), ("new york", (40.7128, -74.0060))],
            vec![],
        );
        assert_eq!(geo.resolve("New York, NY"), Some((40.7128, -74.0060)));
    }

    #[test]
    fn test_continent_classification() {
        let geo = GeoTable::default();
        assert_eq!(geo.continent_of("Dallas, TX"), Some(Continent::NorthAmerica));
        assert_eq!(geo.continent_of("Tokyo, Japan"), Some(Continent::Asia));
        assert_eq!(geo.continent_of("Hamburg, Germany"), Some(Continent::Europe));
        assert_eq!(geo.continent_of("Nowheresville"), None);
    }

    #[test]
    fn test_international_classification() {
        let geo = GeoTable::default();
        assert!(geo.is_international("Dallas, TX", "Tokyo, Japan"));
        assert!(!geo.is_international("Dallas, TX", "Chicago, IL"));
        // Unknown continent on either side is treated as domestic
        assert!(!geo.is_international("Nowheresville", "Tokyo, Japan"));
    }

    #[test]
    fn test_fixture_table_injection() {
        let geo = GeoTable::new(
            vec![("springfield", (39.8, -89.6)), ("shelbyville", (39.4, -88.8))],
            vec![(", il", Continent::NorthAmerica)],
        );
        let d = geo.distance_miles("Springfield, IL", "Shelbyville, IL");
        assert!(d > 0.0 && d < UNKNOWN_DISTANCE_MILES);
    }
}
