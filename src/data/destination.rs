use serde::{Deserialize, Serialize};

/// A searchable destination city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    #[serde(default)]
    pub hotel_count: u32,
}

impl Destination {
    pub fn new(name: &str, region: &str, country: &str, hotel_count: u32) -> Self {
        Self {
            name: name.to_string(),
            region: region.to_string(),
            country: country.to_string(),
            hotel_count,
        }
    }

    /// Text the search box matches query terms against
    pub fn search_text(&self) -> String {
        if self.region.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.region, self.country)
        }
    }
}
