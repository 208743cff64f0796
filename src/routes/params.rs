use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::{FilterCriteria, SortKey};
use crate::models::OrderStatus;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReorderDirection {
    Up,
    Down,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub direction: ReorderDirection,
}

/// Storefront product listing query. The multi-value filters arrive as
/// comma-separated strings.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub q: Option<String>,
    pub categories: Option<String>,
    pub age_ranges: Option<String>,
    pub brands: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f32>,
    pub sort: Option<SortKey>,
}

impl ProductQuery {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            search: self.q,
            categories: split_csv(self.categories),
            age_ranges: split_csv(self.age_ranges),
            brands: split_csv(self.brands),
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
        }
    }
}

fn split_csv(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_params_are_split_and_trimmed() {
        let query = ProductQuery {
            categories: Some("Toys & Play, Nursing ,".into()),
            ..Default::default()
        };
        let criteria = query.into_criteria();
        assert_eq!(criteria.categories, vec!["Toys & Play", "Nursing"]);
    }

    #[test]
    fn absent_params_mean_no_filter() {
        let criteria = ProductQuery::default().into_criteria();
        assert!(criteria.categories.is_empty());
        assert!(criteria.search.is_none());
        assert!(criteria.max_price.is_none());
    }
}
