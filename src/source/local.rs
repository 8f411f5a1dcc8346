//! Bundled fallback catalog
//!
//! Static data served when the remote API is unreachable and nothing is
//! cached yet.

use crate::models::{Category, Product, ProductQuery, Subcategory};

/// Source of locally bundled catalog data.
pub trait LocalFallbackSource: Send + Sync {
    /// Bundled category list. Empty means "no fallback available".
    fn categories(&self) -> Vec<Category>;

    /// Bundled products for `query`. There are none by default.
    fn products(&self, _query: &ProductQuery) -> Vec<Product> {
        Vec::new()
    }
}

/// Furniture category tree shipped with the storefront.
const FURNITURE: &[(&str, &str, &str, &[(&str, &str)])] = &[
    (
        "living-room",
        "Living Room",
        "Sofas, armchairs and tables for everyday living",
        &[
            ("sofas", "Sofas"),
            ("armchairs", "Armchairs"),
            ("coffee-tables", "Coffee Tables"),
            ("tv-units", "TV Units"),
        ],
    ),
    (
        "bedroom",
        "Bedroom",
        "Beds, wardrobes and bedside furniture",
        &[
            ("beds", "Beds"),
            ("wardrobes", "Wardrobes"),
            ("nightstands", "Nightstands"),
            ("dressers", "Dressers"),
        ],
    ),
    (
        "dining",
        "Dining",
        "Dining tables, chairs and sideboards",
        &[
            ("dining-tables", "Dining Tables"),
            ("dining-chairs", "Dining Chairs"),
            ("sideboards", "Sideboards"),
        ],
    ),
    (
        "office",
        "Office",
        "Desks, office chairs and storage",
        &[
            ("desks", "Desks"),
            ("office-chairs", "Office Chairs"),
            ("bookcases", "Bookcases"),
        ],
    ),
    (
        "outdoor",
        "Outdoor",
        "Garden and patio furniture",
        &[
            ("garden-sets", "Garden Sets"),
            ("loungers", "Loungers"),
        ],
    ),
];

/// In-memory [`LocalFallbackSource`] holding a fixed category list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<Category>,
}

impl StaticCatalog {
    /// The bundled furniture catalog.
    pub fn furniture() -> Self {
        let categories = FURNITURE
            .iter()
            .map(|(id, name, description, subcategories)| Category {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                subcategories: subcategories
                    .iter()
                    .map(|(sub_id, sub_name)| Subcategory {
                        id: sub_id.to_string(),
                        name: sub_name.to_string(),
                        parent_id: id.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// A catalog with no fallback data.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

impl LocalFallbackSource for StaticCatalog {
    fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }
}
