//! Keyword-based clothing categorization.
//!
//! An item's free-text `type` is matched (case-insensitive substring)
//! against per-category keyword lists. Categories are evaluated in the
//! fixed order tops, bottoms, outerwear, shoes; the first match wins and
//! an item matching nothing is uncategorized.
//!
//! The keyword table is plain data: [`Categorizer::default`] ships a
//! bilingual Arabic/English table and [`Categorizer::from_json`] loads a
//! replacement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::item::ClothingItem;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Wardrobe category. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Outerwear,
    Shoes,
}

impl Category {
    /// Every category in evaluation order.
    pub const ALL: [Category; 4] = [
        Category::Tops,
        Category::Bottoms,
        Category::Outerwear,
        Category::Shoes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
        }
    }
}

// ---------------------------------------------------------------------------
// Default keyword table
// ---------------------------------------------------------------------------

const TOP_KEYWORDS: &[&str] = &[
    "قميص", "تيشيرت", "تي شيرت", "بلوزة", "بلوزه", "كنزة", "بلوفر", "هودي", "توب",
    "shirt", "tee", "blouse", "sweater", "pullover", "hoodie", "polo", "top",
];

const BOTTOM_KEYWORDS: &[&str] = &[
    "بنطال", "بنطلون", "جينز", "تنورة", "تنوره", "شورت", "سروال", "ليجن",
    "pants", "trousers", "jeans", "skirt", "shorts", "leggings", "chinos",
];

const OUTERWEAR_KEYWORDS: &[&str] = &[
    "جاكيت", "جاكت", "معطف", "سترة", "بليزر", "كارديجان",
    "jacket", "coat", "blazer", "cardigan", "parka", "vest",
];

const SHOE_KEYWORDS: &[&str] = &[
    "حذاء", "أحذية", "جزمة", "صندل", "شبشب", "بوت", "كوتشي",
    "shoe", "sneaker", "boot", "sandal", "loafer", "heels",
];

// ---------------------------------------------------------------------------
// Categorizer
// ---------------------------------------------------------------------------

/// Injectable keyword rule table.
#[derive(Debug, Clone)]
pub struct Categorizer {
    /// Lower-cased, non-empty keywords keyed by category. `BTreeMap`
    /// iteration follows [`Category`] order.
    rules: BTreeMap<Category, Vec<String>>,
}

impl Categorizer {
    /// Build from arbitrary keyword lists.
    ///
    /// Keywords are lower-cased and blank entries dropped (an empty keyword
    /// would match every type).
    pub fn new<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (Category, Vec<K>)>,
        K: AsRef<str>,
    {
        let mut table: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for (category, keywords) in rules {
            let entry = table.entry(category).or_default();
            entry.extend(
                keywords
                    .iter()
                    .map(|k| AsRef::<str>::as_ref(k).trim().to_lowercase())
                    .filter(|k| !k.is_empty()),
            );
        }
        Self { rules: table }
    }

    /// Load a rule table from JSON of the form
    /// `{"tops": [...], "bottoms": [...], "outerwear": [...], "shoes": [...]}`.
    ///
    /// Missing categories get no keywords.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<Category, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid category rule table: {e}")))?;
        let categorizer = Self::new(raw);
        if categorizer.rules.values().all(Vec::is_empty) {
            return Err(CoreError::Validation(
                "Category rule table has no keywords".into(),
            ));
        }
        Ok(categorizer)
    }

    /// Categorize a free-text clothing type. `None` means uncategorized.
    pub fn categorize(&self, kind: &str) -> Option<Category> {
        let needle = kind.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| needle.contains(k.as_str())))
            .map(|(category, _)| *category)
    }

    pub fn categorize_item(&self, item: &ClothingItem) -> Option<Category> {
        self.categorize(&item.info.kind)
    }

    /// Group items into category buckets, keeping store order inside each
    /// bucket. Uncategorized items are left out.
    pub fn bucket<'a>(&self, items: &'a [ClothingItem]) -> CategoryBuckets<'a> {
        let mut buckets = CategoryBuckets::default();
        for item in items {
            let Some(category) = self.categorize_item(item) else {
                continue;
            };
            let bucket = match category {
                Category::Tops => &mut buckets.tops,
                Category::Bottoms => &mut buckets.bottoms,
                Category::Outerwear => &mut buckets.outerwear,
                Category::Shoes => &mut buckets.shoes,
            };
            bucket.push(item);
        }
        buckets
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        self.rules.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new([
            (Category::Tops, TOP_KEYWORDS.to_vec()),
            (Category::Bottoms, BOTTOM_KEYWORDS.to_vec()),
            (Category::Outerwear, OUTERWEAR_KEYWORDS.to_vec()),
            (Category::Shoes, SHOE_KEYWORDS.to_vec()),
        ])
    }
}

/// Category-bucketed view of the wardrobe.
#[derive(Debug, Default, Serialize)]
pub struct CategoryBuckets<'a> {
    pub tops: Vec<&'a ClothingItem>,
    pub bottoms: Vec<&'a ClothingItem>,
    pub outerwear: Vec<&'a ClothingItem>,
    pub shoes: Vec<&'a ClothingItem>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::item::fixtures::candidate;
    use crate::store::ItemStore;

    #[test]
    fn arabic_types_map_to_categories() {
        let c = Categorizer::default();
        assert_eq!(c.categorize("قميص"), Some(Category::Tops));
        assert_eq!(c.categorize("بنطال جينز"), Some(Category::Bottoms));
        assert_eq!(c.categorize("معطف صوفي"), Some(Category::Outerwear));
        assert_eq!(c.categorize("حذاء رياضي"), Some(Category::Shoes));
    }

    #[test]
    fn english_match_is_case_insensitive() {
        let c = Categorizer::default();
        assert_eq!(c.categorize("T-SHIRT"), Some(Category::Tops));
        assert_eq!(c.categorize("Denim Jeans"), Some(Category::Bottoms));
        assert_eq!(c.categorize("Trench Coat"), Some(Category::Outerwear));
        assert_eq!(c.categorize("Running Sneakers"), Some(Category::Shoes));
    }

    #[test]
    fn unknown_type_is_uncategorized() {
        let c = Categorizer::default();
        assert_eq!(c.categorize("حقيبة"), None);
        assert_eq!(c.categorize("scarf"), None);
        assert_eq!(c.categorize(""), None);
    }

    #[test]
    fn ambiguous_type_resolves_to_earlier_category() {
        let c = Categorizer::default();
        // "shirt" (tops) and "jacket" (outerwear) both match.
        assert_eq!(c.categorize("shirt jacket"), Some(Category::Tops));
        // "jeans" (bottoms) and "boot" (shoes) both match.
        assert_eq!(c.categorize("bootcut jeans"), Some(Category::Bottoms));
    }

    #[test]
    fn categorize_is_pure() {
        let c = Categorizer::default();
        let first = c.categorize("بلوزة حرير");
        for _ in 0..10 {
            assert_eq!(c.categorize("بلوزة حرير"), first);
        }
    }

    #[test]
    fn category_ignores_everything_but_type() {
        let c = Categorizer::default();
        let mut store = ItemStore::new();
        let a = store.add(candidate("shirt", "red", "casual")).clone();
        let mut b_candidate = candidate("shirt", "boots-brown", "jacket style");
        b_candidate.info.description = "pairs with jeans".into();
        let b = store.add(b_candidate).clone();

        assert_eq!(c.categorize_item(&a), c.categorize_item(&b));
    }

    #[test]
    fn custom_rules_evaluate_in_fixed_order_regardless_of_input_order() {
        let c = Categorizer::new([
            (Category::Shoes, vec!["x"]),
            (Category::Tops, vec!["x"]),
        ]);
        assert_eq!(c.categorize("x"), Some(Category::Tops));
    }

    #[test]
    fn blank_keywords_are_dropped() {
        let c = Categorizer::new([(Category::Tops, vec!["", "  "])]);
        assert_eq!(c.categorize("anything"), None);
        assert!(c.keywords(Category::Tops).is_empty());
    }

    #[test]
    fn rules_load_from_json() {
        let c = Categorizer::from_json(r#"{"tops":["Camisa"],"shoes":["zapato"]}"#).unwrap();
        assert_eq!(c.categorize("camisa blanca"), Some(Category::Tops));
        assert_eq!(c.categorize("zapatos"), Some(Category::Shoes));
        assert_eq!(c.categorize("shirt"), None);
    }

    #[test]
    fn json_rules_reject_unknown_categories_and_empty_tables() {
        assert_matches!(
            Categorizer::from_json(r#"{"hats":["cap"]}"#),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            Categorizer::from_json(r#"{"tops":[]}"#),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bucket_excludes_uncategorized_and_keeps_order() {
        let c = Categorizer::default();
        let mut store = ItemStore::new();
        store.add(candidate("قميص", "أبيض", "كاجوال"));
        store.add(candidate("وشاح", "أحمر", "كاجوال"));
        store.add(candidate("بلوزة", "وردي", "رسمي"));
        store.add(candidate("حذاء", "أسود", "رسمي"));

        let buckets = c.bucket(store.list());
        let tops: Vec<&str> = buckets.tops.iter().map(|i| i.info.kind.as_str()).collect();
        assert_eq!(tops, vec!["قميص", "بلوزة"]);
        assert!(buckets.bottoms.is_empty());
        assert!(buckets.outerwear.is_empty());
        assert_eq!(buckets.shoes.len(), 1);
        assert_eq!(store.len(), 4);
    }
}
