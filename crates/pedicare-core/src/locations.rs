//! # Locations Module
//!
//! The hospital directory and its search filter.
//!
//! The directory is fixed. Searching is a case-insensitive substring match
//! over name, city and address; a blank query matches every hospital.
//! Coordinates are only used to build an opaque map link, never to compute
//! distances.

use serde::Serialize;

/// A hospital in the network directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hospital {
    /// Directory id ("1".."5").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Street address without the city.
    pub address: &'static str,
    /// City, searched alongside name and address.
    pub city: &'static str,
    /// Distance as displayed, e.g. "8.2 km". Not computed.
    pub distance: &'static str,
    /// Phone number in international format.
    pub phone: &'static str,
    /// Opening hours as displayed.
    pub hours: &'static str,
    /// Patient rating in tenths of a star (47 = 4.7).
    pub rating_tenths: u8,
    /// Services offered on site.
    pub services: &'static [&'static str],
    /// Pediatric specialties with resident staff.
    pub specialties: &'static [&'static str],
    /// Runs a 24/7 emergency department.
    pub emergency: bool,
    /// Has a pediatric intensive care unit.
    pub pediatric_icu: bool,
    /// Decimal degrees, used only for the map link.
    pub latitude: f64,
    /// Decimal degrees, used only for the map link.
    pub longitude: f64,
}

impl Hospital {
    /// Rating with one decimal, e.g. "4.7".
    pub fn rating_display(&self) -> String {
        format!("{}.{}", self.rating_tenths / 10, self.rating_tenths % 10)
    }

    /// Map link with the hospital as destination.
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            self.latitude, self.longitude
        )
    }

    /// Whether `needle` (already lowercased) occurs in name, city or address.
    fn matches(&self, needle: &str) -> bool {
        [self.name, self.city, self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The network directory, in display order.
pub const HOSPITALS: [Hospital; 5] = [
    Hospital {
        id: "1",
        name: "Manipal Hospital Mysore",
        address: "85-86, Bangalore-Mysore Ring Road Junction, Bannimantap 'A' Layout",
        city: "Mysore",
        distance: "145 km",
        phone: "+91 821 242 7777",
        hours: "24/7 Emergency",
        rating_tenths: 47,
        services: &[
            "Emergency Care",
            "Pediatric ICU",
            "Neonatal Care",
            "Vaccination Center",
            "Child Surgery",
        ],
        specialties: &[
            "General Pediatrics",
            "Pediatric Cardiology",
            "Child Neurology",
            "Pediatric Orthopedics",
        ],
        emergency: true,
        pediatric_icu: true,
        latitude: 12.349979,
        longitude: 76.66018,
    },
    Hospital {
        id: "2",
        name: "Manipal Hospital HAL Airport Road",
        address: "98, HAL Airport Rd, HAL 2nd Stage, Indiranagar",
        city: "Bangalore",
        distance: "8.2 km",
        phone: "+91 80 2526 4444",
        hours: "24/7 Emergency",
        rating_tenths: 47,
        services: &[
            "Emergency Care",
            "Pediatric ICU",
            "Child Psychology",
            "Vaccination Center",
        ],
        specialties: &[
            "General Pediatrics",
            "Pediatric Oncology",
            "Child Development",
        ],
        emergency: true,
        pediatric_icu: true,
        latitude: 12.9716,
        longitude: 77.6412,
    },
    Hospital {
        id: "3",
        name: "Manipal Hospital Sarjapur Road",
        address: "46/2, Main Outer Ring Rd, Ambalipur, Sarjapura",
        city: "Bangalore",
        distance: "12.5 km",
        phone: "+91 80 6692 2000",
        hours: "6:00 AM - 10:00 PM",
        rating_tenths: 46,
        services: &["Outpatient Care", "Vaccination Center", "Child Health Checkups"],
        specialties: &["General Pediatrics", "Pediatric Dermatology"],
        emergency: false,
        pediatric_icu: false,
        latitude: 12.9079,
        longitude: 77.6934,
    },
    Hospital {
        id: "4",
        name: "Manipal Hospital Malleshwaram",
        address: "No. 1648, 4th Main, 5th Cross, Malleshwaram",
        city: "Bangalore",
        distance: "15.3 km",
        phone: "+91 80 2334 2000",
        hours: "24/7 Emergency",
        rating_tenths: 49,
        services: &[
            "Emergency Care",
            "Pediatric ICU",
            "Neonatal Care",
            "Child Surgery",
        ],
        specialties: &[
            "Pediatric Cardiology",
            "Child Neurology",
            "Pediatric Gastroenterology",
        ],
        emergency: true,
        pediatric_icu: true,
        latitude: 12.9833,
        longitude: 77.5667,
    },
    Hospital {
        id: "5",
        name: "Manipal Hospital Whitefield",
        address: "#143, 212-2015, EPIP Zone, ITPL Rd, Whitefield",
        city: "Bangalore",
        distance: "2.5 km",
        phone: "+91 80 6692 2222",
        hours: "24/7 Emergency",
        rating_tenths: 48,
        services: &[
            "Emergency Care",
            "Pediatric ICU",
            "Neonatal Care",
            "Vaccination Center",
        ],
        specialties: &[
            "Pediatric Cardiology",
            "Child Neurology",
            "Pediatric Surgery",
        ],
        emergency: true,
        pediatric_icu: true,
        latitude: 12.9698,
        longitude: 77.75,
    },
];

/// Hospitals whose name, city or address contains `query`, ignoring case,
/// in directory order. A blank query returns the whole directory.
pub fn search(query: &str) -> Vec<&'static Hospital> {
    let needle = query.trim().to_lowercase();
    HOSPITALS.iter().filter(|h| h.matches(&needle)).collect()
}

/// Look up a hospital by directory id.
pub fn find_hospital(id: &str) -> Option<&'static Hospital> {
    HOSPITALS.iter().find(|h| h.id == id)
}

// =============================================================================
// TESTS
// =============================================================================
