//! GarmentItem domain type

use serde::{Deserialize, Serialize};

use super::zone::{Zone, zone_for_category};

/// Caller-supplied garment description, before zone derivation
///
/// This is the wire shape of the product resolver's output: duck-typed
/// free-text fields, everything optional but the name. Conversion into
/// [`GarmentItem`] derives the zone; z-index assignment happens when a
/// snapshot is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GarmentSpec {
    pub name: String,
    pub category: String,
    pub colors: Vec<String>,
    pub pattern: Option<String>,
    pub brand: Option<String>,
    /// Opaque payload for the compositing collaborator; engine logic ignores it
    pub image_url: Option<String>,
    /// Opaque payload; engine logic ignores it
    pub product_url: Option<String>,
}

impl From<GarmentItem> for GarmentSpec {
    fn from(item: GarmentItem) -> Self {
        Self {
            name: item.name,
            category: item.category,
            colors: item.colors,
            pattern: item.pattern,
            brand: item.brand,
            image_url: item.image_url,
            product_url: item.product_url,
        }
    }
}

impl From<GarmentSpec> for GarmentItem {
    fn from(spec: GarmentSpec) -> Self {
        let mut item = GarmentItem::new(spec.name, spec.category);
        item.colors = spec.colors;
        item.pattern = spec.pattern;
        item.brand = spec.brand;
        item.image_url = spec.image_url;
        item.product_url = spec.product_url;
        item
    }
}

/// A single garment with its derived zone and stacking position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentItem {
    pub name: String,

    /// Free-text category from the resolver ("denim jacket", "maxi dress", ...)
    pub category: String,

    /// Zone derived from the category (falls back to the name when the
    /// category is empty)
    pub zone: Zone,

    /// 1-based stacking order within the zone; 0 until a snapshot assigns it
    #[serde(default)]
    pub z_index: u32,

    #[serde(default)]
    pub colors: Vec<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub product_url: Option<String>,
}

impl GarmentItem {
    /// Create a garment, deriving its zone from the category text
    ///
    /// An empty category falls back to the name so a bare mention like
    /// "leather jacket" still lands in the right zone.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        let category = category.into();
        let zone = if category.trim().is_empty() {
            zone_for_category(&name)
        } else {
            zone_for_category(&category)
        };

        Self {
            name,
            category,
            zone,
            z_index: 0,
            colors: Vec::new(),
            pattern: None,
            brand: None,
            image_url: None,
            product_url: None,
        }
    }

    /// Builder-style color attachment
    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Builder-style pattern attachment
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Human-facing label used in clarification options and responses
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.zone)
    }

    /// Lowercased name plus category, the haystack for mention matching
    pub fn match_text(&self) -> String {
        format!("{} {}", self.name.to_lowercase(), self.category.to_lowercase())
    }
}

impl std::fmt::Display for GarmentItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
