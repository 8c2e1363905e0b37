//! Sea level monitoring points supported by the FMI open data API

use crate::{FmiError, FmiResult};

/// Location name to FMI geoid, for the sea level stored query.
pub const SEA_LEVEL_LOCATIONS: [(&str, &str); 14] = [
    ("Pietarsaari", "-10000618"),
    ("Kemi", "-10017238"),
    ("Porvoo", "-100669"),
    ("Vaasa", "632978"),
    ("Turku", "633679"),
    ("Rauma", "639734"),
    ("Raahe", "640276"),
    ("Oulu", "643492"),
    ("Mantyluoto", "646666"), // Pori Mäntyluoto
    ("Kaskinen", "653760"),
    ("Helsinki", "658225"),
    ("Hanko", "659101"),
    ("Hamina", "659169"),
    ("Degerby", "660415"), // Föglö Degerby
];

/// Geoid for a sea level location name.
///
/// An unknown name is a configuration error whose message carries the
/// full list of valid names.
pub fn geoid_for(name: &str) -> FmiResult<&'static str> {
    SEA_LEVEL_LOCATIONS
        .iter()
        .find(|(location, _)| *location == name)
        .map(|(_, geoid)| *geoid)
        .ok_or_else(|| FmiError::UnknownSeaLevelLocation {
            name: name.to_string(),
            valid: location_names().join(", "),
        })
}

/// All supported sea level location names.
pub fn location_names() -> Vec<&'static str> {
    SEA_LEVEL_LOCATIONS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_location_resolves() {
        assert_eq!(geoid_for("Oulu").unwrap(), "643492");
        assert_eq!(geoid_for("Pietarsaari").unwrap(), "-10000618");
    }

    #[test]
    fn test_unknown_location_lists_valid_names() {
        let error = geoid_for("Atlantis").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("Atlantis"));
        assert!(message.contains("Helsinki"));
        assert!(message.contains("Degerby"));
    }
}
