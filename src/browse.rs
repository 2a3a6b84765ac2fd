//! Catalog search and ordering for the product grid.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::Product;

/// Sort options shown above the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first: descending numeric id.
    #[default]
    Latest,
    TopSales,
    TopRated,
    Price,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Latest,
        SortKey::TopSales,
        SortKey::TopRated,
        SortKey::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Latest => "Latest",
            SortKey::TopSales => "Top Sales",
            SortKey::TopRated => "Top Rated",
            SortKey::Price => "Price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceDirection {
    #[default]
    Asc,
    Desc,
}

impl PriceDirection {
    pub fn flipped(self) -> Self {
        match self {
            PriceDirection::Asc => PriceDirection::Desc,
            PriceDirection::Desc => PriceDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            PriceDirection::Asc => "↑",
            PriceDirection::Desc => "↓",
        }
    }
}

/// Active sort key plus the remembered price direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    key: SortKey,
    price_direction: PriceDirection,
}

impl SortState {
    pub fn key(&self) -> SortKey {
        self.key
    }

    pub fn price_direction(&self) -> PriceDirection {
        self.price_direction
    }

    /// Handle a tap on a sort option.
    ///
    /// Price from another key starts ascending; Price while already active
    /// flips direction. Other keys leave the stored direction alone.
    pub fn select(&mut self, key: SortKey) {
        match key {
            SortKey::Price if self.key == SortKey::Price => {
                self.price_direction = self.price_direction.flipped();
            }
            SortKey::Price => {
                self.key = SortKey::Price;
                self.price_direction = PriceDirection::Asc;
            }
            other => self.key = other,
        }
        debug!(key = ?self.key, direction = ?self.price_direction, "sort changed");
    }
}

/// Case-insensitive name filter followed by a stable sort.
///
/// An empty query keeps every product. Ties keep their input order.
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    query: &str,
    sort: &SortState,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    let mut result: Vec<&Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect();

    match sort.key {
        SortKey::Latest => result.sort_by(|a, b| newest_first(a, b)),
        SortKey::TopSales => {
            result.sort_by(|a, b| b.sales_volume().total_cmp(&a.sales_volume()))
        }
        SortKey::TopRated => result.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Price => match sort.price_direction {
            PriceDirection::Asc => result.sort_by(|a, b| a.price.cmp(&b.price)),
            PriceDirection::Desc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        },
    }
    result
}

// Non-numeric ids go after numeric ones.
fn newest_first(a: &Product, b: &Product) -> Ordering {
    match (a.id.parse::<u64>(), b.id.parse::<u64>()) {
        (Ok(x), Ok(y)) => y.cmp(&x),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_sort_after_numeric() {
        let mk = |id: &str| Product {
            id: id.to_string(),
            name: id.to_string(),
            price: 1,
            description: String::new(),
            image: String::new(),
            rating: 0.0,
            reviews_count: 0,
            sold_count: "0".to_string(),
            reviews: Vec::new(),
        };
        let products = vec![mk("sku-a"), mk("2"), mk("sku-b"), mk("10")];
        let ids: Vec<&str> = filter_and_sort(&products, "", &SortState::default())
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["10", "2", "sku-a", "sku-b"]);
    }

    #[test]
    fn other_keys_keep_price_direction() {
        let mut sort = SortState::default();
        sort.select(SortKey::Price);
        sort.select(SortKey::Price);
        sort.select(SortKey::TopRated);
        assert_eq!(sort.key(), SortKey::TopRated);
        assert_eq!(sort.price_direction(), PriceDirection::Desc);
    }
}
