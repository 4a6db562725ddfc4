//! Built-in sample people and garments offered next to custom uploads.

use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleModel {
    pub id: &'static str,
    pub name: &'static str,
    /// File name inside the assets directory.
    pub asset: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentKind {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClothingItem {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: GarmentKind,
    pub url: &'static str,
    pub category: &'static str,
}

pub const SAMPLE_MODELS: &[SampleModel] = &[
    SampleModel { id: "1", name: "Female Model 1", asset: "model-woman.jpg" },
    SampleModel { id: "2", name: "Male Model 1", asset: "model-man.jpg" },
    SampleModel { id: "3", name: "Male Model 2", asset: "model-male-1.webp" },
    SampleModel { id: "4", name: "Male Model 3", asset: "model-male-2.webp" },
    SampleModel { id: "5", name: "Female Model 2", asset: "model-female-2.webp" },
    SampleModel { id: "6", name: "Female Model 3", asset: "model-female-3.webp" },
];

pub const CLOTHING_ITEMS: &[ClothingItem] = &[
    ClothingItem {
        id: "shirt1",
        name: "Compass Print Shirt",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/61F0UAXJyFL._AC_UY1100_.jpg",
        category: "shirt",
    },
    ClothingItem {
        id: "shirt2",
        name: "Green Pattern Kurta",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/71cXYKjyCjL._AC_UY1100_.jpg",
        category: "kurta",
    },
    ClothingItem {
        id: "shirt3",
        name: "Green Ethnic Shirt",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/71cXYKjyCjL._AC_UY1100_.jpg",
        category: "shirt",
    },
    ClothingItem {
        id: "shirt4",
        name: "Black Ribbed Shirt",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/61mvPx8Y-4L._AC_UY1100_.jpg",
        category: "shirt",
    },
    ClothingItem {
        id: "shirt5",
        name: "Beige Ribbed Henley",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/71LpkosXVmL._AC_UY1100_.jpg",
        category: "henley",
    },
    ClothingItem {
        id: "shirt6",
        name: "Blue Casual Shirt",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/71VjSPCn-NL._AC_UY1100_.jpg",
        category: "shirt",
    },
    ClothingItem {
        id: "shirt7",
        name: "Linen Beach Shirt",
        kind: GarmentKind::Top,
        url: "https://m.media-amazon.com/images/I/61F0UAXJyFL._AC_UY1100_.jpg",
        category: "shirt",
    },
];

/// The model preselected when the selector first opens.
pub fn default_model() -> &'static SampleModel {
    &SAMPLE_MODELS[0]
}

pub fn find_model(id: &str) -> Option<&'static SampleModel> {
    SAMPLE_MODELS.iter().find(|model| model.id == id)
}

pub fn find_clothing_item(id: &str) -> Option<&'static ClothingItem> {
    CLOTHING_ITEMS.iter().find(|item| item.id == id)
}

pub fn clothing_items_by_kind(kind: GarmentKind) -> Vec<&'static ClothingItem> {
    CLOTHING_ITEMS.iter().filter(|item| item.kind == kind).collect()
}

/// Up to `count` distinct items in random order.
pub fn random_clothing_items(count: usize) -> Vec<&'static ClothingItem> {
    let mut items: Vec<&'static ClothingItem> = CLOTHING_ITEMS.iter().collect();
    items.shuffle(&mut rand::thread_rng());
    items.truncate(count);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookups() {
        assert_eq!(find_model("3").map(|m| m.name), Some("Male Model 2"));
        assert!(find_model("99").is_none());
        assert_eq!(
            find_clothing_item("shirt5").map(|i| i.category),
            Some("henley")
        );
        assert_eq!(default_model().id, "1");
    }

    #[test]
    fn test_ids_are_unique() {
        let model_ids: HashSet<_> = SAMPLE_MODELS.iter().map(|m| m.id).collect();
        assert_eq!(model_ids.len(), SAMPLE_MODELS.len());
        let item_ids: HashSet<_> = CLOTHING_ITEMS.iter().map(|i| i.id).collect();
        assert_eq!(item_ids.len(), CLOTHING_ITEMS.len());
    }

    #[test]
    fn test_by_kind() {
        assert_eq!(clothing_items_by_kind(GarmentKind::Top).len(), CLOTHING_ITEMS.len());
        assert!(clothing_items_by_kind(GarmentKind::Bottom).is_empty());
    }

    #[test]
    fn test_random_items() {
        let picked = random_clothing_items(4);
        assert_eq!(picked.len(), 4);
        let ids: HashSet<_> = picked.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 4);

        assert_eq!(random_clothing_items(100).len(), CLOTHING_ITEMS.len());
        assert!(random_clothing_items(0).is_empty());
    }
}
