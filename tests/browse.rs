//! Catalog search and sort options.

use storefront::{filter_and_sort, Catalog, PriceDirection, Product, SortKey, SortState};

fn sorted_ids(products: &[Product], query: &str, sort: &SortState) -> Vec<String> {
    filter_and_sort(products, query, sort)
        .into_iter()
        .map(|p| p.id.clone())
        .collect()
}

fn sort_by(key: SortKey) -> SortState {
    let mut sort = SortState::default();
    sort.select(key);
    sort
}

fn product(id: &str, name: &str, price: u64, rating: f64, sold: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: String::new(),
        image: format!("{id}.png"),
        rating,
        reviews_count: 0,
        sold_count: sold.to_string(),
        reviews: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn empty_query_matches_everything() {
    let catalog = Catalog::builtin().unwrap();
    let all = filter_and_sort(catalog.list_products(), "", &SortState::default());
    assert_eq!(all.len(), 10);
}

#[test]
fn query_is_case_insensitive_substring() {
    let catalog = Catalog::builtin().unwrap();
    let sort = sort_by(SortKey::Price);
    assert_eq!(sorted_ids(catalog.list_products(), "PRO", &sort), ["10", "7", "1"]);
    assert_eq!(sorted_ids(catalog.list_products(), "keyboard", &sort), ["5"]);
    assert!(sorted_ids(catalog.list_products(), "toaster", &sort).is_empty());
}

// ---------------------------------------------------------------------------
// Sort keys
// ---------------------------------------------------------------------------

#[test]
fn latest_is_descending_numeric_id() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(
        sorted_ids(catalog.list_products(), "", &SortState::default()),
        ["10", "9", "8", "7", "6", "5", "4", "3", "2", "1"]
    );
}

#[test]
fn top_sales_parses_k_suffix() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(
        sorted_ids(catalog.list_products(), "", &sort_by(SortKey::TopSales)),
        ["2", "4", "9", "1", "3", "10", "5", "8", "6", "7"]
    );
}

#[test]
fn top_rated_ties_keep_input_order() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(
        sorted_ids(catalog.list_products(), "", &sort_by(SortKey::TopRated)),
        ["1", "9", "2", "4", "6", "5", "10", "3", "7", "8"]
    );

    let products = vec![
        product("a", "First", 1, 4.0, "1"),
        product("b", "Second", 1, 5.0, "1"),
        product("c", "Third", 1, 4.0, "1"),
    ];
    assert_eq!(
        sorted_ids(&products, "", &sort_by(SortKey::TopRated)),
        ["b", "a", "c"]
    );
}

#[test]
fn price_ascending_then_descending() {
    let catalog = Catalog::builtin().unwrap();
    let mut sort = sort_by(SortKey::Price);
    assert_eq!(sort.price_direction(), PriceDirection::Asc);
    assert_eq!(
        sorted_ids(catalog.list_products(), "", &sort),
        ["10", "8", "4", "7", "5", "9", "3", "2", "6", "1"]
    );

    sort.select(SortKey::Price);
    assert_eq!(sort.price_direction(), PriceDirection::Desc);
    assert_eq!(
        sorted_ids(catalog.list_products(), "", &sort),
        ["1", "6", "2", "3", "9", "5", "7", "4", "8", "10"]
    );
}

#[test]
fn price_ties_are_stable_in_both_directions() {
    let products = vec![
        product("1", "A", 100, 0.0, "0"),
        product("2", "B", 50, 0.0, "0"),
        product("3", "C", 100, 0.0, "0"),
    ];
    let mut sort = sort_by(SortKey::Price);
    assert_eq!(sorted_ids(&products, "", &sort), ["2", "1", "3"]);
    sort.select(SortKey::Price);
    assert_eq!(sorted_ids(&products, "", &sort), ["1", "3", "2"]);
}

// ---------------------------------------------------------------------------
// Price direction toggle
// ---------------------------------------------------------------------------

#[test]
fn price_toggle_sequence() {
    let mut sort = SortState::default();
    assert_eq!(sort.key(), SortKey::Latest);

    sort.select(SortKey::Price);
    assert_eq!((sort.key(), sort.price_direction()), (SortKey::Price, PriceDirection::Asc));

    sort.select(SortKey::Price);
    assert_eq!((sort.key(), sort.price_direction()), (SortKey::Price, PriceDirection::Desc));

    sort.select(SortKey::TopSales);
    assert_eq!(sort.key(), SortKey::TopSales);
    assert_eq!(sort.price_direction(), PriceDirection::Desc);

    // Coming back to Price starts ascending again.
    sort.select(SortKey::Price);
    assert_eq!((sort.key(), sort.price_direction()), (SortKey::Price, PriceDirection::Asc));
}

#[test]
fn views_are_recomputed_from_current_products() {
    let mut products = vec![product("1", "Lamp", 10, 3.0, "5")];
    let sort = SortState::default();
    assert_eq!(sorted_ids(&products, "lamp", &sort), ["1"]);
    products.push(product("2", "Desk Lamp", 20, 4.0, "1"));
    assert_eq!(sorted_ids(&products, "lamp", &sort), ["2", "1"]);
}
