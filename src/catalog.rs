//! Catalog filtering and sorting: the view the storefront product grid
//! renders. Filters compose as a logical AND across dimensions; inside a
//! dimension the rules below apply. An empty result is a valid outcome.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Product;

/// The fixed age buckets the storefront filter offers.
pub const AGE_BUCKETS: [&str; 5] = ["0-3m", "3-6m", "6-12m", "1-2y", "2-3y"];

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct FilterCriteria {
    /// Case-insensitive substring, OR across name/description/category/
    /// tags/sku/material.
    pub search: Option<String>,
    /// Exact category names; empty selection means no filter.
    pub categories: Vec<String>,
    /// Age buckets; products without age data always pass.
    pub age_ranges: Vec<String>,
    /// Brand names; products without a brand always pass.
    pub brands: Vec<String>,
    /// Inclusive bounds on the effective price; an absent max is unbounded.
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Inclusive minimum rating.
    pub min_rating: Option<f32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    /// Reverse of input order; the catalog has no real recency timestamp
    /// the storefront trusts.
    Newest,
    /// By rating descending; sales counts are not tracked.
    BestSelling,
    #[default]
    Featured,
}

pub fn filter_and_sort(
    products: &[Product],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| matches(p, criteria))
        .cloned()
        .collect();

    match sort {
        SortKey::Featured => {}
        SortKey::Newest => out.reverse(),
        SortKey::PriceLow => out.sort_by(|a, b| a.effective_price().cmp(&b.effective_price())),
        SortKey::PriceHigh => out.sort_by(|a, b| b.effective_price().cmp(&a.effective_price())),
        SortKey::BestSelling => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    out
}

fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    matches_search(product, criteria)
        && matches_categories(product, criteria)
        && matches_age_ranges(product, criteria)
        && matches_brands(product, criteria)
        && matches_price(product, criteria)
        && matches_rating(product, criteria)
}

fn matches_search(product: &Product, criteria: &FilterCriteria) -> bool {
    let Some(needle) = criteria.search.as_deref().filter(|s| !s.trim().is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(&product.name)
        || contains(&product.description)
        || contains(&product.category)
        || product.tags.iter().any(|t| contains(t))
        || product.sku.as_deref().is_some_and(contains)
        || product.material.as_deref().is_some_and(contains)
}

fn matches_categories(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria.categories.is_empty() || criteria.categories.iter().any(|c| *c == product.category)
}

fn matches_age_ranges(product: &Product, criteria: &FilterCriteria) -> bool {
    if criteria.age_ranges.is_empty() {
        return true;
    }
    // Permissive default: a product without age data passes every bucket.
    if product.age_ranges.is_empty() {
        return true;
    }
    criteria.age_ranges.iter().any(|bucket| {
        let bucket = bucket.to_lowercase();
        product.age_ranges.iter().any(|stored| {
            let stored = stored.to_lowercase();
            stored.contains(&bucket) || bucket.contains(&stored)
        })
    })
}

fn matches_brands(product: &Product, criteria: &FilterCriteria) -> bool {
    if criteria.brands.is_empty() {
        return true;
    }
    match product.brand.as_deref() {
        // Same permissive default as age ranges.
        None => true,
        Some(brand) => criteria.brands.iter().any(|b| b.eq_ignore_ascii_case(brand)),
    }
}

fn matches_price(product: &Product, criteria: &FilterCriteria) -> bool {
    let price = product.effective_price();
    if let Some(min) = criteria.min_price
        && price < min
    {
        return false;
    }
    if let Some(max) = criteria.max_price
        && price > max
    {
        return false;
    }
    true
}

fn matches_rating(product: &Product, criteria: &FilterCriteria) -> bool {
    match criteria.min_rating {
        Some(min) => product.rating >= min,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn product(name: &str, category: &str, price: i64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: format!("{name} for little ones"),
            price: Decimal::new(price, 2),
            original_price: None,
            sale_price: None,
            image: "/img/placeholder.png".into(),
            category: category.into(),
            rating: 4.0,
            brand: None,
            age_ranges: Vec::new(),
            tags: Vec::new(),
            sku: None,
            material: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn effective_price_prefers_valid_sale_price() {
        let mut p = product("Rattle", "Toys & Play", 2000);
        assert_eq!(p.effective_price(), Decimal::new(2000, 2));

        p.sale_price = Some(Decimal::new(1500, 2));
        assert_eq!(p.effective_price(), Decimal::new(1500, 2));

        // A sale price at or above the base price is ignored.
        p.sale_price = Some(Decimal::new(2500, 2));
        assert_eq!(p.effective_price(), Decimal::new(2000, 2));

        // With an original price present, it is the base.
        p.original_price = Some(Decimal::new(3000, 2));
        p.sale_price = Some(Decimal::new(2500, 2));
        assert_eq!(p.effective_price(), Decimal::new(2500, 2));
    }

    #[test]
    fn category_filter_keeps_relative_order_under_featured_sort() {
        let mut all = Vec::new();
        for i in 0..10 {
            let cat = if i % 3 == 0 { "Toys & Play" } else { "Nursing" };
            all.push(product(&format!("p{i}"), cat, 1000 + i));
        }
        let criteria = FilterCriteria {
            categories: vec!["Toys & Play".into()],
            ..Default::default()
        };
        let got = filter_and_sort(&all, &criteria, SortKey::Featured);
        assert_eq!(names(&got), vec!["p0", "p3", "p6", "p9"]);
    }

    #[test]
    fn empty_category_selection_equals_no_filter() {
        let all = vec![
            product("a", "Toys & Play", 1000),
            product("b", "Nursing", 2000),
        ];
        let unfiltered = filter_and_sort(&all, &FilterCriteria::default(), SortKey::Featured);
        let empty_selection = filter_and_sort(
            &all,
            &FilterCriteria {
                categories: Vec::new(),
                ..Default::default()
            },
            SortKey::Featured,
        );
        assert_eq!(names(&unfiltered), names(&empty_selection));
    }

    #[test]
    fn filtering_is_idempotent() {
        let all = vec![
            product("teether", "Toys & Play", 899),
            product("bottle", "Feeding", 1299),
            product("teddy", "Toys & Play", 2499),
        ];
        let criteria = FilterCriteria {
            search: Some("te".into()),
            max_price: Some(Decimal::new(2500, 2)),
            ..Default::default()
        };
        let once = filter_and_sort(&all, &criteria, SortKey::PriceLow);
        let twice = filter_and_sort(&once, &criteria, SortKey::PriceLow);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn search_matches_any_field() {
        let mut a = product("Soft Blanket", "Nursery", 3000);
        a.material = Some("Organic Cotton".into());
        let mut b = product("Teether", "Toys & Play", 800);
        b.tags = vec!["cotton-free".into()];
        let c = product("Stroller", "Travel", 19900);

        let all = vec![a, b, c];
        let criteria = FilterCriteria {
            search: Some("COTTON".into()),
            ..Default::default()
        };
        let got = filter_and_sort(&all, &criteria, SortKey::Featured);
        assert_eq!(names(&got), vec!["Soft Blanket", "Teether"]);
    }

    #[test]
    fn age_range_filter_is_permissive_for_missing_data() {
        let mut sized = product("Onesie", "Clothing", 1500);
        sized.age_ranges = vec!["0-3m".into(), "3-6m".into()];
        let mut older = product("Tricycle", "Toys & Play", 8000);
        older.age_ranges = vec!["2-3y".into()];
        let r#unsized = product("Blanket", "Nursery", 3000);

        let all = vec![sized, older, r#unsized];
        let criteria = FilterCriteria {
            age_ranges: vec!["0-3m".into()],
            ..Default::default()
        };
        let got = filter_and_sort(&all, &criteria, SortKey::Featured);
        assert_eq!(names(&got), vec!["Onesie", "Blanket"]);
    }

    #[test]
    fn brand_filter_is_permissive_for_missing_brand() {
        let mut branded = product("Bottle", "Feeding", 1200);
        branded.brand = Some("MooMoo".into());
        let mut other = product("Pacifier", "Feeding", 600);
        other.brand = Some("Sleepy".into());
        let unbranded = product("Bib", "Feeding", 400);

        let all = vec![branded, other, unbranded];
        let criteria = FilterCriteria {
            brands: vec!["moomoo".into()],
            ..Default::default()
        };
        let got = filter_and_sort(&all, &criteria, SortKey::Featured);
        assert_eq!(names(&got), vec!["Bottle", "Bib"]);
    }

    #[test]
    fn price_filter_uses_effective_price_inclusive() {
        let mut on_sale = product("Mobile", "Nursery", 4000);
        on_sale.sale_price = Some(Decimal::new(2000, 2));
        let listed = product("Lamp", "Nursery", 3500);

        let all = vec![on_sale, listed];
        let criteria = FilterCriteria {
            min_price: Some(Decimal::new(1000, 2)),
            max_price: Some(Decimal::new(2000, 2)),
            ..Default::default()
        };
        let got = filter_and_sort(&all, &criteria, SortKey::Featured);
        assert_eq!(names(&got), vec!["Mobile"]);
    }

    #[test]
    fn rating_threshold_is_inclusive() {
        let mut good = product("Swing", "Nursery", 9900);
        good.rating = 4.5;
        let mut ok = product("Gym", "Toys & Play", 5900);
        ok.rating = 3.9;

        let all = vec![good, ok];
        let criteria = FilterCriteria {
            min_rating: Some(4.5),
            ..Default::default()
        };
        let got = filter_and_sort(&all, &criteria, SortKey::Featured);
        assert_eq!(names(&got), vec!["Swing"]);
    }

    #[test]
    fn sort_keys_order_as_documented() {
        let mut cheap = product("cheap", "Toys & Play", 500);
        cheap.rating = 3.0;
        let mut mid = product("mid", "Toys & Play", 1500);
        mid.rating = 5.0;
        let mut pricey = product("pricey", "Toys & Play", 9000);
        pricey.rating = 4.0;
        // Sale price makes "pricey" effectively cheapest.
        pricey.sale_price = Some(Decimal::new(100, 2));

        let all = vec![cheap, mid, pricey];
        let none = FilterCriteria::default();

        let low = filter_and_sort(&all, &none, SortKey::PriceLow);
        assert_eq!(names(&low), vec!["pricey", "cheap", "mid"]);

        let high = filter_and_sort(&all, &none, SortKey::PriceHigh);
        assert_eq!(names(&high), vec!["mid", "cheap", "pricey"]);

        let newest = filter_and_sort(&all, &none, SortKey::Newest);
        assert_eq!(names(&newest), vec!["pricey", "mid", "cheap"]);

        let best = filter_and_sort(&all, &none, SortKey::BestSelling);
        assert_eq!(names(&best), vec!["mid", "pricey", "cheap"]);
    }

    #[test]
    fn zero_matches_is_a_valid_result() {
        let all = vec![product("a", "Toys & Play", 1000)];
        let criteria = FilterCriteria {
            search: Some("no such product".into()),
            ..Default::default()
        };
        assert!(filter_and_sort(&all, &criteria, SortKey::Featured).is_empty());
    }
}
