//! Integration tests for gandi-domains: suggestion runs against a mock registrar

use gandi_domains::config::{RateLimitConfig, TldConfig, TldMode, VariationConfig};
use gandi_domains::{
    ApiClient, CheckerConfig, Credentials, DomainChecker, SuggestOptions, SuggestProgress,
    SuggestionPipeline, VariationPattern,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Availability endpoint answering from a fixed set of available names
async fn registrar(available: &'static [&'static str]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/domain/check"))
        .respond_with(move |request: &Request| {
            let products: Vec<Value> = request
                .url
                .query_pairs()
                .filter(|(key, _)| key == "name")
                .map(|(_, name)| {
                    if available.iter().any(|a| *a == name) {
                        json!({
                            "name": name,
                            "status": "available",
                            "process": "create",
                            "prices": [{ "duration_unit": "y", "price_after_taxes": "12.5" }]
                        })
                    } else {
                        json!({ "name": name, "status": "unavailable" })
                    }
                })
                .collect();
            ResponseTemplate::new(200).set_body_json(json!({ "currency": "USD", "products": products }))
        })
        .mount(&server)
        .await;
    server
}

fn checker(server: &MockServer) -> DomainChecker {
    DomainChecker::new(ApiClient::new(Credentials::new("test-token", server.uri())).unwrap())
}

fn config() -> CheckerConfig {
    CheckerConfig {
        tlds: TldConfig {
            mode: TldMode::Extend,
            defaults: vec!["com".to_string(), "net".to_string(), "org".to_string(), "io".to_string()],
            custom: vec!["dev".to_string()],
        },
        variations: VariationConfig {
            enabled: true,
            patterns: ["numbers", "suffix"].iter().map(|s| s.to_string()).collect(),
            prefixes: Vec::new(),
            suffixes: vec!["hq".to_string()],
            max_numbers: 1,
        },
        rate_limit: RateLimitConfig {
            max_concurrent: 3,
            delay_ms: 1,
        },
    }
}

#[tokio::test]
async fn test_full_suggestion_run() {
    let server = registrar(&["acme.io", "acme2.net", "acmehq.com"]).await;
    let checker = checker(&server);
    let config = config();
    let pipeline = SuggestionPipeline::new(&checker, &config);

    let mut events = Vec::new();
    let result = pipeline
        .run("acme", &SuggestOptions::default(), |e| events.push(e.clone()))
        .await
        .unwrap();

    // com net org io dev in batches of three
    let exact: Vec<&str> = result.exact.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(exact, vec!["acme.com", "acme.net", "acme.org", "acme.io", "acme.dev"]);
    let io = &result.exact[3];
    assert!(io.available);
    assert_eq!(io.price.as_deref(), Some("12.5 USD"));

    let numbers: Vec<&str> = result.variations[&VariationPattern::Numbers]
        .iter()
        .map(|r| r.domain.as_str())
        .collect();
    assert_eq!(numbers, vec!["acme2.net"]);
    let suffix: Vec<&str> = result.variations[&VariationPattern::Suffix]
        .iter()
        .map(|r| r.domain.as_str())
        .collect();
    assert_eq!(suffix, vec!["acmehq.com"]);

    assert_eq!(result.available_count(), 3);

    // 2 exact batches, acme-hq, acmehq, acme2
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    assert_eq!(
        requests[2].url.query(),
        Some("name=acme-hq.com&name=acme-hq.net&name=acme-hq.org")
    );
    assert_eq!(events.len(), 5);
    assert!(matches!(
        events[0],
        SuggestProgress::ExactBatch { batch: 1, batches: 2, domains: 3 }
    ));
}

#[tokio::test]
async fn test_json_output_shape() {
    let server = registrar(&["acme2.com"]).await;
    let checker = checker(&server);
    let config = config();
    let pipeline = SuggestionPipeline::new(&checker, &config);
    let options = SuggestOptions {
        tlds: Some(vec!["com".to_string()]),
        no_variations: false,
        variations_only: true,
    };

    let result = pipeline.run("acme", &options, |_| {}).await.unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["exact"], json!([]));
    assert_eq!(value["variations"]["numbers"][0]["domain"], "acme2.com");
    assert_eq!(value["variations"]["numbers"][0]["status"], "available");
    assert_eq!(value["variations"]["suffix"], json!([]));
}

#[tokio::test]
async fn test_api_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/domain/check"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "message": "Rate limit exceeded" })))
        .mount(&server)
        .await;

    let checker = checker(&server);
    let config = config();
    let pipeline = SuggestionPipeline::new(&checker, &config);

    let err = pipeline
        .run("acme", &SuggestOptions::default(), |_| {})
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.to_string(), "Rate limit exceeded");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
