//! Client-side filtering used when `/pieces/filter` is unavailable

use shared::models::{FilterQuery, InventoryPiece};

/// Keep pieces whose name or description contains `term` (case-insensitive).
/// A blank term keeps everything. Applying the same term twice is a no-op.
pub fn filter_by_search(pieces: Vec<InventoryPiece>, term: &str) -> Vec<InventoryPiece> {
    if term.trim().is_empty() {
        return pieces;
    }
    pieces
        .into_iter()
        .filter(|p| p.matches_search(term))
        .collect()
}

/// Fallback for a whole query: category and subcategory ids ANDed with the
/// search predicate. Pieces carry no gender id, so `gender_id` is ignored.
pub fn filter_fallback(pieces: Vec<InventoryPiece>, query: &FilterQuery) -> Vec<InventoryPiece> {
    let same = |wanted: &Option<String>, actual: &Option<String>| match wanted {
        Some(id) => actual.as_deref() == Some(id.as_str()),
        None => true,
    };
    let by_category: Vec<InventoryPiece> = pieces
        .into_iter()
        .filter(|p| same(&query.category_id, &p.category_id))
        .filter(|p| same(&query.subcategory_id, &p.subcategory_id))
        .collect();
    filter_by_search(by_category, query.search_term().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(id: &str, name: &str, description: &str, category: &str) -> InventoryPiece {
        InventoryPiece {
            id: id.into(),
            name: name.into(),
            description: Some(description.into()),
            quantity: 1,
            price: None,
            category_id: Some(category.into()),
            subcategory_id: None,
        }
    }

    fn stock() -> Vec<InventoryPiece> {
        vec![
            piece("1", "Jaqueta jeans", "azul clara", "cat-004"),
            piece("2", "Camiseta", "branca", "cat-001"),
            piece("3", "Casaco", "estilo JAQUETA de couro", "cat-004"),
            piece("4", "Vestido", "floral", "cat-003"),
            piece("5", "Calça", "jeans escura", "cat-002"),
        ]
    }

    #[test]
    fn test_search_name_or_description() {
        let ids: Vec<String> = filter_by_search(stock(), "jaqueta")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let once = filter_by_search(stock(), "JEANS");
        let twice = filter_by_search(once.clone(), "JEANS");
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_blank_search_keeps_all() {
        assert_eq!(filter_by_search(stock(), " ").len(), 5);
    }

    #[test]
    fn test_fallback_ands_category() {
        let q = FilterQuery::from_path(["cat-002"], "jeans");
        let ids: Vec<String> = filter_fallback(stock(), &q).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["5"]);

        let q = FilterQuery::from_path(Vec::<String>::new(), "jeans");
        assert_eq!(filter_fallback(stock(), &q).len(), 2);
    }
}
