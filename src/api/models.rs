use serde::Deserialize;

/// Raw query-string parameters for `/api/search`. Every field is an optional
/// string so that absent or malformed values never reject the request; the
/// query builder decides what each one means.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}
