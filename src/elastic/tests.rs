//! Elasticsearch Adapter Tests
//!
//! ## Test Scopes
//! - **Encoding**: Wire JSON produced for queries, suggestions, the mapping and bulk bodies.
//! - **Decoding**: Response DTOs across engine versions.
//! - **Client**: Request/response handling against a `wiremock` stand-in for the cluster.

#[cfg(test)]
mod tests {
    use crate::catalog::store::CatalogStore;
    use crate::catalog::types::Course;
    use crate::elastic::client::ElasticClient;
    use crate::elastic::protocol::*;
    use crate::error::CatalogError;
    use crate::search::engine::SearchEngine;
    use crate::search::query::{CourseQuery, SuggestQuery};
    use crate::search::types::{SearchParams, SortKey};

    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = "courses";

    fn client(server: &MockServer) -> ElasticClient {
        ElasticClient::new(&server.uri(), INDEX, Duration::from_secs(2), 100)
    }

    fn chess_club() -> Course {
        Course {
            id: "c1".to_string(),
            title: Some("Chess Club".to_string()),
            category: Some("Games".to_string()),
            price: Some(50.0),
            ..Default::default()
        }
    }

    // ============================================================
    // ENCODING
    // ============================================================

    #[test]
    fn test_encode_search_full_query() {
        let params = SearchParams {
            keyword: Some("chess".to_string()),
            min_age: Some(6),
            category: Some("Games".to_string()),
            min_price: Some(10.0),
            start_date: Some(Utc.with_ymd_and_hms(2025, 9, 3, 12, 0, 0).unwrap()),
            sort: SortKey::PriceAsc,
            page: 1,
            size: 5,
            ..Default::default()
        };

        let body = encode_search(&CourseQuery::fuzzy(&params));

        assert_eq!(
            body,
            json!({
                "from": 5,
                "size": 5,
                "track_total_hits": true,
                "query": {
                    "bool": {
                        "must": [
                            { "match": { "title": { "query": "chess", "fuzziness": "AUTO" } } }
                        ],
                        "filter": [
                            { "range": { "minAge": { "gte": 6 } } },
                            { "term": { "category": { "value": "Games", "case_insensitive": true } } },
                            { "range": { "price": { "gte": 10.0 } } },
                            { "range": { "nextSessionDate": { "gte": "2025-09-03T12:00:00.000Z" } } }
                        ]
                    }
                },
                "sort": [ { "price": { "order": "asc", "missing": "_last" } } ]
            })
        );
    }

    #[test]
    fn test_encode_search_match_all_and_default_sort() {
        let body = encode_search(&CourseQuery::fuzzy(&SearchParams::default()));

        assert_eq!(body["query"]["bool"]["must"][0], json!({ "match_all": {} }));
        assert_eq!(body["query"]["bool"]["filter"], json!([]));
        assert_eq!(
            body["sort"][0],
            json!({ "nextSessionDate": { "order": "asc", "missing": "_last" } })
        );
    }

    #[test]
    fn test_encode_search_max_bounds_use_lte() {
        let params = SearchParams {
            max_age: Some(12),
            max_price: Some(99.5),
            sort: SortKey::PriceDesc,
            ..Default::default()
        };

        let body = encode_search(&CourseQuery::fuzzy(&params));

        assert_eq!(
            body["query"]["bool"]["filter"],
            json!([
                { "range": { "maxAge": { "lte": 12 } } },
                { "range": { "price": { "lte": 99.5 } } }
            ])
        );
        assert_eq!(body["sort"][0]["price"]["order"], "desc");
    }

    #[test]
    fn test_encode_suggest() {
        let body = encode_suggest(&SuggestQuery::for_prefix("Che"));

        assert_eq!(
            body,
            json!({
                "size": 0,
                "_source": false,
                "suggest": {
                    "course-suggest": {
                        "prefix": "Che",
                        "completion": {
                            "field": "autocomplete",
                            "skip_duplicates": true,
                            "size": 5
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_course_mapping_field_types() {
        let mapping = course_mapping();
        let props = &mapping["mappings"]["properties"];

        assert_eq!(props["title"]["type"], "text");
        assert_eq!(props["category"]["type"], "keyword");
        assert_eq!(props["type"]["type"], "keyword");
        assert_eq!(props["price"]["type"], "double");
        assert_eq!(props["nextSessionDate"]["type"], "date");
        assert_eq!(props["autocomplete"]["type"], "completion");
    }

    #[test]
    fn test_encode_bulk_is_action_source_pairs() {
        let body = encode_bulk(INDEX, &[chess_club()]).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(body.ends_with('\n'));

        let action: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(action, json!({ "index": { "_index": "courses", "_id": "c1" } }));

        let source: Course = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(source, chess_club());
    }

    // ============================================================
    // DECODING
    // ============================================================

    #[test]
    fn test_total_accepts_object_and_number() {
        let modern: HitsBody =
            serde_json::from_value(json!({ "total": { "value": 12, "relation": "eq" }, "hits": [] }))
                .unwrap();
        let legacy: HitsBody = serde_json::from_value(json!({ "total": 7, "hits": [] })).unwrap();

        assert_eq!(modern.total.unwrap().value(), 12);
        assert_eq!(legacy.total.unwrap().value(), 7);
    }

    #[test]
    fn test_bulk_failed_items() {
        let body: BulkResponseBody = serde_json::from_value(json!({
            "errors": true,
            "items": [
                { "index": { "_id": "a", "status": 201 } },
                { "index": { "_id": "b", "status": 400, "error": { "type": "mapper_parsing_exception" } } }
            ]
        }))
        .unwrap();

        assert_eq!(body.failed_items(), 1);
    }

    // ============================================================
    // CLIENT - INDEX MANAGEMENT
    // ============================================================

    #[tokio::test]
    async fn test_index_exists() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client(&server).index_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_index_missing() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(!client(&server).index_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_index_exists_unexpected_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).index_exists().await.unwrap_err();
        assert!(matches!(err, CatalogError::UpstreamStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_create_index_sends_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/courses"))
            .and(body_partial_json(json!({
                "mappings": { "properties": { "autocomplete": { "type": "completion" } } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).create_index().await.unwrap();
    }

    // ============================================================
    // CLIENT - SEARCH & SUGGEST
    // ============================================================

    #[tokio::test]
    async fn test_search_decodes_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .and(body_partial_json(json!({ "track_total_hits": true, "from": 0, "size": 10 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "took": 3,
                "hits": {
                    "total": { "value": 31, "relation": "eq" },
                    "hits": [
                        { "_id": "c1", "_score": 1.2, "_source": { "id": "c1", "title": "Chess Club" } },
                        { "_id": "c9", "_score": 0.4 }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let params = SearchParams {
            keyword: Some("chess".to_string()),
            ..Default::default()
        };
        let hits = client(&server)
            .search(&CourseQuery::fuzzy(&params))
            .await
            .unwrap();

        assert_eq!(hits.total, Some(31));
        assert_eq!(hits.hits.len(), 2);
        assert_eq!(hits.hits[0].id.as_deref(), Some("c1"));
        assert!(hits.hits[1].source.is_none());
    }

    #[tokio::test]
    async fn test_search_error_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("no shards available"))
            .mount(&server)
            .await;

        let err = client(&server)
            .search(&CourseQuery::all(10))
            .await
            .unwrap_err();

        match err {
            CatalogError::UpstreamStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "no shards available");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_undecodable_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .search(&CourseQuery::all(10))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UpstreamDecode(_)));
    }

    #[tokio::test]
    async fn test_search_timeout_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "hits": { "hits": [] } }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = ElasticClient::new(&server.uri(), INDEX, Duration::from_millis(50), 100);
        let err = client.search(&CourseQuery::all(10)).await.unwrap_err();

        assert!(matches!(err, CatalogError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_suggest_decodes_groups() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .and(body_partial_json(json!({
                "suggest": { "course-suggest": { "prefix": "Che" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": { "total": { "value": 0, "relation": "eq" }, "hits": [] },
                "suggest": {
                    "course-suggest": [
                        {
                            "text": "Che",
                            "offset": 0,
                            "length": 3,
                            "options": [
                                { "text": "Chess Club", "_id": "c1", "_score": 1.0 },
                                { "text": "Chemistry Lab", "_id": "c3", "_score": 1.0 }
                            ]
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let response = client(&server)
            .suggest(&SuggestQuery::for_prefix("Che"))
            .await
            .unwrap();

        let groups = &response.suggest["course-suggest"];
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].options, vec!["Chess Club", "Chemistry Lab"]);
    }

    #[tokio::test]
    async fn test_suggest_without_suggest_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": { "hits": [] } })))
            .mount(&server)
            .await;

        let response = client(&server)
            .suggest(&SuggestQuery::for_prefix("Zz"))
            .await
            .unwrap();
        assert!(response.suggest.is_empty());
    }

    // ============================================================
    // CLIENT - CATALOG STORE
    // ============================================================

    #[tokio::test]
    async fn test_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/_count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 12 })))
            .mount(&server)
            .await;

        assert_eq!(client(&server).count().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_count_on_missing_index_is_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/_count"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "type": "index_not_found_exception" },
                "status": 404
            })))
            .mount(&server)
            .await;

        assert_eq!(client(&server).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_uses_match_all_with_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .and(body_partial_json(json!({
                "size": 100,
                "query": { "bool": { "must": [ { "match_all": {} } ] } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": {
                    "total": { "value": 2, "relation": "eq" },
                    "hits": [
                        { "_id": "c1", "_source": { "id": "c1", "title": "Chess Club" } },
                        { "_id": "c2", "_source": { "id": "c2", "title": "Advanced Math" } }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let courses = client(&server).fetch_all().await.unwrap();
        let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn test_save_all_posts_ndjson_with_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_bulk"))
            .and(query_param("refresh", "true"))
            .and(header("content-type", "application/x-ndjson"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "took": 5,
                "errors": false,
                "items": [ { "index": { "_id": "c1", "status": 201 } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).save_all(vec![chess_club()]).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(body.starts_with(r#"{"index":{"#));
        assert!(body.contains(r#""title":"Chess Club""#));
    }

    #[tokio::test]
    async fn test_save_all_reports_rejected_documents() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_bulk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": true,
                "items": [
                    { "index": { "_id": "c1", "status": 400, "error": { "type": "mapper_parsing_exception" } } }
                ]
            })))
            .mount(&server)
            .await;

        let err = client(&server).save_all(vec![chess_club()]).await.unwrap_err();
        assert!(matches!(err, CatalogError::BulkRejected { failed: 1, total: 1 }));
    }

    #[tokio::test]
    async fn test_save_all_empty_sends_nothing() {
        let server = MockServer::start().await;

        client(&server).save_all(Vec::new()).await.unwrap();

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
