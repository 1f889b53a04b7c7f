//! Reference data for address classification
//!
//! The municipality list and the municipality-to-region table are fixed for the
//! lifetime of the process. List order is significant: the classifier returns
//! the first entry whose name occurs in an address, so a name that is contained
//! in a later, longer name shadows it.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Label used when no municipality or region could be determined
pub const UNKNOWN: &str = "Unknown";

/// Island group a municipality belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Luzon,
    Visayas,
    Mindanao,
}

impl Region {
    /// Display label of the region
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Luzon => "Luzon",
            Self::Visayas => "Visayas",
            Self::Mindanao => "Mindanao",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All municipalities recognised in addresses, in match-priority order.
pub static MUNICIPALITIES: &[&str] = &[
    "Abra",
    "Agusan del Norte",
    "Agusan del Sur",
    "Aklan",
    "Albay",
    "Antique",
    "Apayao",
    "Aurora",
    "Basilan",
    "Bataan",
    "Batanes",
    "Batangas",
    "Benguet",
    "Biliran",
    "Bohol",
    "Bukidnon",
    "Bulacan",
    "Cagayan",
    "Camarines Norte",
    "Camarines Sur",
    "Camiguin",
    "Capiz",
    "Catanduanes",
    "Cavite",
    "Cebu",
    "Cotabato",
    "Davao de Oro",
    "Davao del Norte",
    "Davao del Sur",
    "Davao Occidental",
    "Davao Oriental",
    "Dinagat Islands",
    "Eastern Samar",
    "Guimaras",
    "Ifugao",
    "Ilocos Norte",
    "Ilocos Sur",
    "Iloilo",
    "Isabela",
    "Kalinga",
    "La Union",
    "Laguna",
    "Lanao del Norte",
    "Lanao del Sur",
    "Leyte",
    "Maguindanao",
    "Marinduque",
    "Masbate",
    "Metro Manila",
    "Misamis Occidental",
    "Misamis Oriental",
    "Mountain Province",
    "Negros Occidental",
    "Negros Oriental",
    "Northern Samar",
    "Nueva Ecija",
    "Nueva Vizcaya",
    "Occidental Mindoro",
    "Oriental Mindoro",
    "Palawan",
    "Pampanga",
    "Pangasinan",
    "Quezon",
    "Quirino",
    "Rizal",
    "Romblon",
    "Samar",
    "Sarangani",
    "Siquijor",
    "Sorsogon",
    "South Cotabato",
    "Southern Leyte",
    "Sultan Kudarat",
    "Sulu",
    "Surigao del Norte",
    "Surigao del Sur",
    "Tarlac",
    "Tawi-Tawi",
    "Zambales",
    "Zamboanga del Norte",
    "Zamboanga del Sur",
    "Zamboanga Sibugay",
];

use Region::{Luzon, Mindanao, Visayas};

static REGION_ASSIGNMENTS: &[(&str, Region)] = &[
    ("Abra", Luzon),
    ("Agusan del Norte", Mindanao),
    ("Agusan del Sur", Mindanao),
    ("Aklan", Visayas),
    ("Albay", Luzon),
    ("Antique", Visayas),
    ("Apayao", Luzon),
    ("Aurora", Luzon),
    ("Basilan", Mindanao),
    ("Bataan", Luzon),
    ("Batanes", Luzon),
    ("Batangas", Luzon),
    ("Benguet", Luzon),
    ("Biliran", Visayas),
    ("Bohol", Visayas),
    ("Bukidnon", Mindanao),
    ("Bulacan", Luzon),
    ("Cagayan", Luzon),
    ("Camarines Norte", Luzon),
    ("Camarines Sur", Luzon),
    ("Camiguin", Mindanao),
    ("Capiz", Visayas),
    ("Catanduanes", Luzon),
    ("Cavite", Luzon),
    ("Cebu", Visayas),
    ("Cotabato", Mindanao),
    ("Davao de Oro", Mindanao),
    ("Davao del Norte", Mindanao),
    ("Davao del Sur", Mindanao),
    ("Davao Occidental", Mindanao),
    ("Davao Oriental", Mindanao),
    ("Dinagat Islands", Mindanao),
    ("Eastern Samar", Visayas),
    ("Guimaras", Visayas),
    ("Ifugao", Luzon),
    ("Ilocos Norte", Luzon),
    ("Ilocos Sur", Luzon),
    ("Iloilo", Visayas),
    ("Isabela", Luzon),
    ("Kalinga", Luzon),
    ("La Union", Luzon),
    ("Laguna", Luzon),
    ("Lanao del Norte", Mindanao),
    ("Lanao del Sur", Mindanao),
    ("Leyte", Visayas),
    ("Maguindanao", Mindanao),
    ("Marinduque", Luzon),
    ("Masbate", Visayas),
    ("Metro Manila", Luzon),
    ("Misamis Occidental", Mindanao),
    ("Misamis Oriental", Mindanao),
    ("Mountain Province", Luzon),
    ("Negros Occidental", Visayas),
    ("Negros Oriental", Visayas),
    ("Northern Samar", Visayas),
    ("Nueva Ecija", Luzon),
    ("Nueva Vizcaya", Luzon),
    ("Occidental Mindoro", Luzon),
    ("Oriental Mindoro", Luzon),
    ("Palawan", Luzon),
    ("Pampanga", Luzon),
    ("Pangasinan", Luzon),
    ("Quezon", Luzon),
    ("Quirino", Luzon),
    ("Rizal", Luzon),
    ("Romblon", Visayas),
    ("Samar", Visayas),
    ("Sarangani", Mindanao),
    ("Siquijor", Visayas),
    ("Sorsogon", Luzon),
    ("South Cotabato", Mindanao),
    ("Southern Leyte", Visayas),
    ("Sultan Kudarat", Mindanao),
    ("Sulu", Mindanao),
    ("Surigao del Norte", Mindanao),
    ("Surigao del Sur", Mindanao),
    ("Tarlac", Luzon),
    ("Tawi-Tawi", Mindanao),
    ("Zambales", Luzon),
    ("Zamboanga del Norte", Mindanao),
    ("Zamboanga del Sur", Mindanao),
    ("Zamboanga Sibugay", Mindanao),
];

/// Municipality name to region lookup
pub static REGION_MAP: LazyLock<FxHashMap<&'static str, Region>> =
    LazyLock::new(|| REGION_ASSIGNMENTS.iter().copied().collect());

/// Looks up the region of a municipality. Returns `None` if unmapped.
#[must_use]
pub fn region_of(municipality: &str) -> Option<Region> {
    REGION_MAP.get(municipality).copied()
}

/// Region label for a municipality, falling back to [`UNKNOWN`]
#[must_use]
pub fn region_label(municipality: &str) -> &'static str {
    region_of(municipality).map_or(UNKNOWN, Region::as_str)
}
