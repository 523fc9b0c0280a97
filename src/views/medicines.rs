//! Medicines View
//!
//! Catalog browser: free-text search, category filter and one card per
//! medicine with price, stock, prescription and rating details.

use serde::{Deserialize, Serialize};

use super::{fetch_or_default, format_amount, non_empty};
use crate::backend::{ClinicBackend, Medicine, MedicineQuery};

/// Page size when browsing without filters
pub const BROWSE_LIMIT: u32 = 20;

/// Page size when a search or category filter is active
pub const SEARCH_LIMIT: u32 = 50;

/// Top of the rating scale
const MAX_STARS: f64 = 5.0;

/// Search controls as submitted by the UI
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MedicineSearch {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Set when the Search button itself was pressed
    #[serde(default)]
    pub searched: bool,
}

impl MedicineSearch {
    /// Sent untouched; only an empty box means no search
    fn search_text(&self) -> Option<String> {
        self.search.clone().filter(|s| !s.is_empty())
    }

    fn category_filter(&self) -> Option<String> {
        non_empty(self.category.as_deref()).filter(|c| !c.eq_ignore_ascii_case("all"))
    }

    /// Whether the operator asked for a search rather than plain browsing
    pub fn is_search(&self) -> bool {
        self.searched || self.search_text().is_some() || self.category_filter().is_some()
    }

    pub fn to_query(&self) -> MedicineQuery {
        if self.is_search() {
            MedicineQuery {
                page: 1,
                limit: SEARCH_LIMIT,
                search: self.search_text(),
                category: self.category_filter(),
            }
        } else {
            MedicineQuery::with_limit(BROWSE_LIMIT)
        }
    }
}

/// Price display, with the pre-discount price when discounted
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceTag {
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
}

impl PriceTag {
    fn from_medicine(medicine: &Medicine) -> Self {
        let price = format!("${}", format_amount(medicine.price));

        if medicine.discount > 0.0 {
            let original = medicine.original_price.unwrap_or(medicine.price);
            Self {
                price,
                original_price: Some(format!("${}", format_amount(original))),
                discount: Some(format!("{}% OFF", format_amount(medicine.discount))),
            }
        } else {
            Self {
                price,
                original_price: None,
                discount: None,
            }
        }
    }
}

/// Star rating line, present only for rated medicines
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingLine {
    pub stars: String,
    pub label: String,
}

/// One medicine as displayed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MedicineCard {
    pub id: Option<String>,
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub manufacturer: String,
    pub dosage: String,
    pub packaging: String,
    pub price: PriceTag,
    pub in_stock: bool,
    pub stock_label: String,
    pub prescription_required: bool,
    pub prescription_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Medicine> for MedicineCard {
    fn from(medicine: &Medicine) -> Self {
        let text = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };

        let in_stock = medicine.stock > 0;
        let rating = medicine
            .rating
            .filter(|r| r.average > 0.0)
            .map(|r| RatingLine {
                stars: "⭐".repeat(r.average.clamp(0.0, MAX_STARS).floor() as usize),
                label: format!("({:.1}) - {} reviews", r.average, r.count),
            });

        Self {
            id: medicine.id.clone(),
            name: text(&medicine.name, "Unknown Medicine"),
            generic_name: text(&medicine.generic_name, "No generic name"),
            category: text(&medicine.category, "Unknown"),
            manufacturer: text(&medicine.manufacturer, "Unknown"),
            dosage: text(&medicine.dosage, "Not specified"),
            packaging: text(&medicine.packaging, "Not specified"),
            price: PriceTag::from_medicine(medicine),
            in_stock,
            stock_label: if in_stock {
                format!("In Stock: {}", medicine.stock)
            } else {
                "Out of Stock".to_string()
            },
            prescription_required: medicine.prescription_required,
            prescription_label: if medicine.prescription_required {
                "Prescription Required".to_string()
            } else {
                "Over-the-Counter".to_string()
            },
            rating,
            description: medicine.description.clone().filter(|d| !d.is_empty()),
        }
    }
}

/// Everything the medicines page renders
#[derive(Debug, Clone, Serialize)]
pub struct MedicinesView {
    /// Category dropdown, "All" first
    pub categories: Vec<String>,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showing: Option<String>,
    pub count: usize,
    pub medicines: Vec<MedicineCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub notices: Vec<String>,
}

impl MedicinesView {
    pub async fn load(backend: &dyn ClinicBackend, search: &MedicineSearch) -> Self {
        let mut notices = Vec::new();

        let categories =
            fetch_or_default("categories", backend.medicine_categories(), &mut notices).await;
        let list = fetch_or_default(
            "medicines",
            backend.list_medicines(&search.to_query()),
            &mut notices,
        )
        .await;

        let mut view = Self::build(
            categories,
            &list.medicines,
            list.pagination.total_items,
        );
        view.notices = notices;
        view
    }

    pub fn build(categories: Vec<String>, medicines: &[Medicine], total_items: Option<u64>) -> Self {
        let count = medicines.len();

        Self {
            categories: std::iter::once("All".to_string()).chain(categories).collect(),
            heading: format!("Found {} medicines", count),
            showing: total_items
                .filter(|total| *total > 0)
                .map(|total| format!("Showing {} of {} total medicines", count, total)),
            count,
            medicines: medicines.iter().map(MedicineCard::from).collect(),
            empty_message: medicines
                .is_empty()
                .then(|| "No medicines found matching your criteria".to_string()),
            notices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Rating;

    #[test]
    fn test_browse_query() {
        let query = MedicineSearch::default().to_query();
        assert_eq!(query.limit, BROWSE_LIMIT);
        assert_eq!(query.page, 1);
        assert!(query.search.is_none());

        // "All" and an empty box are not filters
        let search = MedicineSearch {
            search: Some(String::new()),
            category: Some("All".to_string()),
            searched: false,
        };
        assert!(!search.is_search());

        // Whitespace is still search text
        let search = MedicineSearch {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        let query = search.to_query();
        assert_eq!(query.limit, SEARCH_LIMIT);
        assert_eq!(query.search.as_deref(), Some("  "));
    }

    #[test]
    fn test_search_query() {
        let search = MedicineSearch {
            search: Some(" amox ".to_string()),
            category: Some("Antibiotic".to_string()),
            searched: false,
        };
        let query = search.to_query();
        assert_eq!(query.limit, SEARCH_LIMIT);
        assert_eq!(query.search.as_deref(), Some(" amox "));
        assert_eq!(query.category.as_deref(), Some("Antibiotic"));

        let pressed = MedicineSearch {
            searched: true,
            ..Default::default()
        };
        let query = pressed.to_query();
        assert_eq!(query.limit, SEARCH_LIMIT);
        assert!(query.category.is_none());
    }

    #[test]
    fn test_card_defaults() {
        let card = MedicineCard::from(&Medicine::default());
        assert_eq!(card.name, "Unknown Medicine");
        assert_eq!(card.generic_name, "No generic name");
        assert_eq!(card.dosage, "Not specified");
        assert_eq!(card.price.price, "$0");
        assert!(card.price.original_price.is_none());
        assert_eq!(card.stock_label, "Out of Stock");
        assert_eq!(card.prescription_label, "Over-the-Counter");
        assert!(card.rating.is_none());
    }

    #[test]
    fn test_discounted_price() {
        let medicine = Medicine {
            price: 8.0,
            original_price: Some(10.0),
            discount: 20.0,
            ..Default::default()
        };
        let tag = MedicineCard::from(&medicine).price;
        assert_eq!(tag.price, "$8");
        assert_eq!(tag.original_price.as_deref(), Some("$10"));
        assert_eq!(tag.discount.as_deref(), Some("20% OFF"));

        // Missing original price falls back to the current price
        let medicine = Medicine {
            price: 4.5,
            discount: 5.0,
            ..Default::default()
        };
        let tag = MedicineCard::from(&medicine).price;
        assert_eq!(tag.original_price.as_deref(), Some("$4.50"));
    }

    #[test]
    fn test_stock_prescription_and_rating() {
        let medicine = Medicine {
            name: Some("Amoxicillin".to_string()),
            stock: 12,
            prescription_required: true,
            rating: Some(Rating {
                average: 3.7,
                count: 19,
            }),
            description: Some(String::new()),
            ..Default::default()
        };
        let card = MedicineCard::from(&medicine);
        assert_eq!(card.stock_label, "In Stock: 12");
        assert_eq!(card.prescription_label, "Prescription Required");
        let rating = card.rating.unwrap();
        assert_eq!(rating.stars, "⭐⭐⭐");
        assert_eq!(rating.label, "(3.7) - 19 reviews");
        assert!(card.description.is_none());
    }

    #[test]
    fn test_rating_stars_stay_on_scale() {
        let rated = |average: f64| Medicine {
            rating: Some(Rating { average, count: 1 }),
            ..Default::default()
        };

        let card = MedicineCard::from(&rated(1e20));
        assert_eq!(card.rating.unwrap().stars, "⭐⭐⭐⭐⭐");

        let card = MedicineCard::from(&rated(5e9));
        assert_eq!(card.rating.unwrap().stars.chars().count(), 5);

        let card = MedicineCard::from(&rated(f64::INFINITY));
        assert_eq!(card.rating.unwrap().stars.chars().count(), 5);

        // Zero or negative averages mean unrated
        assert!(MedicineCard::from(&rated(-3.0)).rating.is_none());
    }

    #[test]
    fn test_view_summary() {
        let medicines = vec![Medicine::default(), Medicine::default()];
        let view = MedicinesView::build(vec!["Analgesic".to_string()], &medicines, Some(75));

        assert_eq!(view.categories, vec!["All", "Analgesic"]);
        assert_eq!(view.heading, "Found 2 medicines");
        assert_eq!(view.showing.as_deref(), Some("Showing 2 of 75 total medicines"));
        assert!(view.empty_message.is_none());

        let empty = MedicinesView::build(Vec::new(), &[], None);
        assert!(empty.showing.is_none());
        assert_eq!(
            empty.empty_message.as_deref(),
            Some("No medicines found matching your criteria")
        );
    }
}
