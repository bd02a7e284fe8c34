use serde_json::{Map, Value, json};

use crate::api::models::SearchParams;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Sort selection for a search. Exactly one criterion is ever active; there
/// is no secondary tiebreak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Unrecognized values fall back to relevance ordering rather than
    /// erroring, same as every other malformed parameter.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "price.asc" => Self::PriceAsc,
            "price.desc" => Self::PriceDesc,
            _ => Self::Relevance,
        }
    }

    fn clause(self) -> Value {
        match self {
            Self::PriceAsc => json!([{ "price": "asc" }]),
            Self::PriceDesc => json!([{ "price": "desc" }]),
            Self::Relevance => json!([{ "_score": "desc" }]),
        }
    }
}

#[test]
fn test_sort_order_from_param() {
    assert_eq!(SortOrder::from_param("price.asc"), SortOrder::PriceAsc);
    assert_eq!(SortOrder::from_param("price.desc"), SortOrder::PriceDesc);
    assert_eq!(SortOrder::from_param(" price.asc "), SortOrder::PriceAsc);
    assert_eq!(SortOrder::from_param(""), SortOrder::Relevance);
    assert_eq!(SortOrder::from_param("price"), SortOrder::Relevance);
    assert_eq!(SortOrder::from_param("name.asc"), SortOrder::Relevance);
}

/// A normalized search request. Construction never fails: every malformed
/// parameter degrades to its safe default instead of surfacing an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub term: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortOrder,
    pub page: u32,
    pub size: u32,
}

impl SearchRequest {
    pub fn from_params(params: &SearchParams) -> Self {
        SearchRequest {
            term: non_empty(params.q.as_deref()),
            brand: non_empty(params.brand.as_deref()),
            min_price: parse_price(params.min_price.as_deref()),
            max_price: parse_price(params.max_price.as_deref()),
            sort: SortOrder::from_param(params.sort.as_deref().unwrap_or("")),
            page: parse_page(params.page.as_deref()),
            size: parse_size(params.size.as_deref()),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Compose the search body sent to the backend: bool query, single sort
    /// criterion, from/size pagination and an optional highlight directive.
    pub fn search_body(&self) -> Value {
        let mut must: Vec<Value> = Vec::new();
        let mut filter: Vec<Value> = Vec::new();

        if let Some(term) = &self.term {
            // Name matches count double relative to brand matches.
            must.push(json!({
                "multi_match": { "query": term, "fields": ["name^2", "brand"] }
            }));
        }
        if let Some(brand) = &self.brand {
            filter.push(json!({ "term": { "brand": brand } }));
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let mut range = Map::new();
            if let Some(min) = self.min_price {
                range.insert("gte".to_string(), json!(min));
            }
            if let Some(max) = self.max_price {
                range.insert("lte".to_string(), json!(max));
            }
            filter.push(json!({ "range": { "price": range } }));
        }

        // No clauses at all degenerates to match-all. Filters without a
        // scoring clause keep a match-all placeholder in the must position.
        let query = if must.is_empty() && filter.is_empty() {
            json!({ "match_all": {} })
        } else {
            let must = if must.is_empty() {
                vec![json!({ "match_all": {} })]
            } else {
                must
            };
            json!({ "bool": { "must": must, "filter": filter } })
        };

        let mut body = json!({
            "from": self.offset(),
            "size": self.size,
            "query": query,
            "sort": self.sort.clause(),
        });

        // Highlighting is tied to the text term: filter-only searches have
        // nothing to mark up.
        if self.term.is_some() {
            body["highlight"] = json!({
                "fields": { "name": {} },
                "pre_tags": ["<mark>"],
                "post_tags": ["</mark>"],
            });
        }

        body
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_price(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_page(value: Option<&str>) -> u32 {
    match value.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(page) if page >= 1 => page.min(i64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

fn parse_size(value: Option<&str>) -> u32 {
    match value.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(size) if size >= 1 => size.min(i64::from(MAX_PAGE_SIZE)) as u32,
        _ => DEFAULT_PAGE_SIZE,
    }
}

#[test]
fn test_parse_page_floors_to_one() {
    assert_eq!(parse_page(None), 1);
    assert_eq!(parse_page(Some("")), 1);
    assert_eq!(parse_page(Some("abc")), 1);
    assert_eq!(parse_page(Some("0")), 1);
    assert_eq!(parse_page(Some("-7")), 1);
    assert_eq!(parse_page(Some("3")), 3);
    assert_eq!(parse_page(Some(" 12 ")), 12);
}

#[test]
fn test_parse_size_clamps() {
    assert_eq!(parse_size(None), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_size(Some("abc")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_size(Some("0")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_size(Some("-1")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_size(Some("51")), MAX_PAGE_SIZE);
    assert_eq!(parse_size(Some("500")), MAX_PAGE_SIZE);
    assert_eq!(parse_size(Some("1")), 1);
    assert_eq!(parse_size(Some("25")), 25);
}

#[test]
fn test_parse_price_lenient() {
    assert_eq!(parse_price(Some("10")), Some(10.0));
    assert_eq!(parse_price(Some("19.99")), Some(19.99));
    assert_eq!(parse_price(Some(" 5 ")), Some(5.0));
    assert_eq!(parse_price(Some("abc")), None);
    assert_eq!(parse_price(Some("")), None);
    assert_eq!(parse_price(Some("NaN")), None);
    assert_eq!(parse_price(None), None);
}
