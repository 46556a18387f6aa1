use serde_json::json;
use ticketwatch::config::event::EventIdentity;
use ticketwatch::config::sources::TicketmasterPlan;
use ticketwatch::error::Error;
use ticketwatch::price_infra::connectors::ticketmaster::TicketmasterSource;
use ticketwatch::price_infra::connectors::PriceSource;
use ticketwatch::price_infra::SourceQuote;
use ticketwatch::types::price::PriceSummary;
use ticketwatch::types::source::SourceName;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn event() -> EventIdentity {
    EventIdentity::new("LAMP", "KovZpZAFaJeA", "2025-11-07").unwrap()
}

fn source(server: &MockServer, event_id: Option<&str>) -> TicketmasterSource {
    let plan = TicketmasterPlan {
        name: SourceName::new("TicketmasterAPI").unwrap(),
        api_key: "test-key".to_string(),
        event_id: event_id.map(str::to_string),
        base_url: server.uri(),
    };
    TicketmasterSource::new(plan, reqwest::Client::new())
}

#[tokio::test]
async fn direct_event_lookup_returns_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/G5vYZ9.json"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "G5vYZ9",
            "priceRanges": [
                {"type": "standard", "currency": "USD", "min": 45.0, "max": 150.0},
                {"type": "platinum", "currency": "USD", "min": 200.0, "max": 400.0}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quote = source(&server, Some("G5vYZ9")).fetch(&event()).await.unwrap();

    assert_eq!(quote, SourceQuote::Summary(PriceSummary {
        low: Some(45.0),
        avg: Some(198.75),
        median: Some(175.0),
        high: Some(400.0),
    }));
}

#[tokio::test]
async fn search_by_identity_collects_all_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("keyword", "LAMP"))
        .and(query_param("venueId", "KovZpZAFaJeA"))
        .and(query_param("startDateTime", "2025-11-07T00:00:00Z"))
        .and(query_param("endDateTime", "2025-11-07T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {"events": [
                {"priceRanges": [{"min": 60.0, "max": 90.0}]},
                {"name": "no ranges here"},
                {"priceRanges": [{"min": 30.0}]}
            ]}
        })))
        .mount(&server)
        .await;

    match source(&server, None).fetch(&event()).await.unwrap() {
        SourceQuote::Summary(summary) => {
            assert_eq!(summary.low, Some(30.0));
            assert_eq!(summary.high, Some(90.0));
            assert_eq!(summary.median, Some(60.0));
        }
        other => panic!("expected a summary, got {:?}", other),
    }
}

#[tokio::test]
async fn odd_endpoints_are_skipped_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/G5vYZ9.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "priceRanges": [
                {"min": "45.00", "max": null},
                {"min": 70.0, "max": 130.0},
                {"currency": "USD"}
            ]
        })))
        .mount(&server)
        .await;

    let quote = source(&server, Some("G5vYZ9")).fetch(&event()).await.unwrap();

    assert_eq!(quote, SourceQuote::Summary(PriceSummary {
        low: Some(70.0),
        avg: Some(100.0),
        median: Some(100.0),
        high: Some(130.0),
    }));
}

#[tokio::test]
async fn no_price_ranges_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": {"totalElements": 0}})))
        .mount(&server)
        .await;

    let quote = source(&server, None).fetch(&event()).await.unwrap();
    assert_eq!(quote, SourceQuote::empty());
}

#[tokio::test]
async fn http_errors_surface_as_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = source(&server, Some("G5vYZ9")).fetch(&event()).await.unwrap_err();
    assert!(matches!(err, Error::UpstreamStatus { status: 401, .. }));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn garbage_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let err = source(&server, Some("G5vYZ9")).fetch(&event()).await.unwrap_err();
    assert!(matches!(err, Error::DeserializationError(_)));
}
