use serde::Serialize;

/// The two-valued lane partition. Each category owns an independent
/// single-occupancy restroom lane.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Category {
    Girls,
    Boys,
}

impl Category {
    /// Parse a CLI/user-facing code ("G", "B", "girls", "boys", ...).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "G" | "GIRL" | "GIRLS" => Some(Self::Girls),
            "B" | "BOY" | "BOYS" => Some(Self::Boys),
            _ => None,
        }
    }

    /// Convert enum → log store string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Category::Girls => "G",
            Category::Boys => "B",
        }
    }

    /// Convert log store string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "G" => Some(Category::Girls),
            "B" => Some(Category::Boys),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Girls => "Girls",
            Category::Boys => "Boys",
        }
    }
}
