//! Built-in reference data used when the backend cannot serve it.

use crate::models::{RequirementInfo, Tradition};

const STATES: &[&str] = &[
    "Andhra Pradesh",
    "Delhi",
    "Goa",
    "Gujarat",
    "Karnataka",
    "Kerala",
    "Maharashtra",
    "Punjab",
    "Rajasthan",
    "Tamil Nadu",
    "Telangana",
    "Uttar Pradesh",
    "West Bengal",
];

const CITIES: &[(&str, &[&str])] = &[
    ("Andhra Pradesh", &["Visakhapatnam", "Vijayawada", "Tirupati"]),
    ("Delhi", &["New Delhi"]),
    ("Goa", &["Panaji", "Margao"]),
    ("Gujarat", &["Ahmedabad", "Surat", "Vadodara"]),
    ("Karnataka", &["Bengaluru", "Mysuru", "Mangaluru"]),
    ("Kerala", &["Kochi", "Thiruvananthapuram", "Kozhikode"]),
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur"]),
    ("Punjab", &["Amritsar", "Ludhiana", "Chandigarh"]),
    ("Rajasthan", &["Jaipur", "Udaipur", "Jodhpur"]),
    ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai"]),
    ("Telangana", &["Hyderabad", "Warangal"]),
    ("Uttar Pradesh", &["Lucknow", "Varanasi", "Agra"]),
    ("West Bengal", &["Kolkata", "Darjeeling"]),
];

const TRADITIONS: &[(&str, &str)] = &[
    ("Hindu", "Rituals following Hindu customs"),
    ("Muslim", "Ceremonies following Islamic customs"),
    ("Christian", "Church and reception customs"),
    ("Sikh", "Gurdwara ceremonies and Punjabi customs"),
    ("Jain", "Ceremonies following Jain customs"),
    ("Buddhist", "Ceremonies following Buddhist customs"),
    ("Secular", "No specific tradition"),
];

/// `(id, name, category, unit)` of the default special requirements.
const REQUIREMENTS: &[(&str, &str, &str, Option<&str>)] = &[
    ("decoration", "Decoration", "ambience", None),
    ("photography", "Photography", "media", Some("photographers")),
    ("videography", "Videography", "media", Some("videographers")),
    ("sound-system", "Sound System", "technical", None),
    ("lighting", "Lighting", "ambience", None),
    ("security", "Security Staff", "services", Some("guards")),
    ("valet-parking", "Valet Parking", "services", Some("attendants")),
    ("mc-host", "MC / Host", "entertainment", None),
];

/// Fallback state list.
pub fn states() -> Vec<String> {
    STATES.iter().map(|s| s.to_string()).collect()
}

/// Fallback cities of `state`; empty for unknown states.
pub fn cities(state: &str) -> Vec<String> {
    CITIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(state.trim()))
        .map(|(_, cities)| cities.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default()
}

/// Fallback traditions; the same set for every event type.
pub fn traditions() -> Vec<Tradition> {
    TRADITIONS
        .iter()
        .map(|(name, description)| Tradition {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Default special requirements offered when none are configured.
pub fn requirements() -> Vec<RequirementInfo> {
    REQUIREMENTS
        .iter()
        .map(|(id, name, category, unit)| RequirementInfo {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            unit: unit.map(str::to_string),
            allows_quantity: unit.is_some(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_cities() {
        for state in states() {
            assert!(!cities(&state).is_empty(), "{state}");
        }
        assert_eq!(cities("karnataka")[0], "Bengaluru");
        assert!(cities("Atlantis").is_empty());
    }

    #[test]
    fn test_quantity_follows_unit() {
        for requirement in requirements() {
            assert_eq!(requirement.allows_quantity, requirement.unit.is_some());
        }
    }
}
