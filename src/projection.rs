use serde::Serialize;
use serde_json::{Map, Value};

use crate::backend::{RawHit, RawResponse};
use crate::query::SearchRequest;

/// Uniform wrapper returned for every request. Success and failure carry
/// disjoint field sets, so the two shapes are separate variants: a failure
/// can never leak pagination fields and a success can never carry an error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchEnvelope {
    Success {
        ok: bool,
        items: Vec<ResultItem>,
        page: u32,
        size: u32,
        total: u64,
    },
    Failure {
        ok: bool,
        items: Vec<ResultItem>,
        error: String,
    },
}

impl SearchEnvelope {
    pub fn failure(message: impl Into<String>) -> Self {
        SearchEnvelope::Failure {
            ok: false,
            items: Vec::new(),
            error: message.into(),
        }
    }
}

/// One matched document, flattened for the client: identifier and score as
/// siblings of every source field, plus the highlighted name snippet (null
/// when no term was searched or the backend produced no fragment).
#[derive(Debug, Serialize)]
pub struct ResultItem {
    pub id: String,
    pub score: Option<f64>,
    #[serde(flatten)]
    pub source: Map<String, Value>,
    #[serde(rename = "nameHtml")]
    pub name_html: Option<String>,
}

/// Map a successful backend result set onto the response envelope. Hits keep
/// the backend's ordering.
pub fn project(request: &SearchRequest, response: RawResponse) -> SearchEnvelope {
    let total = response.hits.total.count();
    let items = response.hits.hits.into_iter().map(project_hit).collect();

    SearchEnvelope::Success {
        ok: true,
        items,
        page: request.page,
        size: request.size,
        total,
    }
}

fn project_hit(hit: RawHit) -> ResultItem {
    let name_html = hit
        .highlight
        .as_ref()
        .and_then(|fields| fields.get("name"))
        .and_then(|fragments| fragments.first())
        .cloned();

    ResultItem {
        id: hit.id,
        score: hit.score,
        source: hit.source,
        name_html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::SearchParams;
    use serde_json::json;

    fn request() -> SearchRequest {
        SearchRequest::from_params(&SearchParams {
            page: Some("2".to_string()),
            size: Some("5".to_string()),
            ..Default::default()
        })
    }

    fn raw(value: Value) -> RawResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_project_carries_pagination_and_total() {
        let envelope = project(
            &request(),
            raw(json!({ "hits": { "total": { "value": 12 }, "hits": [] } })),
        );
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["page"], 2);
        assert_eq!(body["size"], 5);
        assert_eq!(body["total"], 12);
        assert_eq!(body["items"], json!([]));
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_project_flattens_source_beside_id_and_score() {
        let envelope = project(
            &request(),
            raw(json!({
                "hits": {
                    "total": 1,
                    "hits": [{
                        "_id": "p1",
                        "_score": 2.3,
                        "_source": { "name": "Trail Shoe", "brand": "Nike", "price": 89.0 }
                    }]
                }
            })),
        );
        let body = serde_json::to_value(&envelope).unwrap();
        let item = &body["items"][0];
        assert_eq!(item["id"], "p1");
        assert_eq!(item["score"], 2.3);
        assert_eq!(item["name"], "Trail Shoe");
        assert_eq!(item["brand"], "Nike");
        assert_eq!(item["price"], 89.0);
        assert_eq!(item["nameHtml"], Value::Null);
    }

    #[test]
    fn test_project_takes_first_name_fragment() {
        let envelope = project(
            &request(),
            raw(json!({
                "hits": {
                    "total": 1,
                    "hits": [{
                        "_id": "p1",
                        "_score": 1.0,
                        "_source": { "name": "Phone Case" },
                        "highlight": { "name": ["<mark>Phone</mark> Case", "second"] }
                    }]
                }
            })),
        );
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["items"][0]["nameHtml"], "<mark>Phone</mark> Case");
    }

    #[test]
    fn test_project_null_snippet_when_highlight_misses_name() {
        let envelope = project(
            &request(),
            raw(json!({
                "hits": {
                    "total": 1,
                    "hits": [{
                        "_id": "p1",
                        "_score": 1.0,
                        "_source": {},
                        "highlight": { "brand": ["<mark>Nike</mark>"] }
                    }]
                }
            })),
        );
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["items"][0]["nameHtml"], Value::Null);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = SearchEnvelope::failure("connection refused");
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["error"], "connection refused");
        assert!(body.get("page").is_none());
        assert!(body.get("size").is_none());
        assert!(body.get("total").is_none());
    }
}
