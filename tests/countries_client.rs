//! Integration tests for the REST Countries client
//!
//! These tests run the client against a wiremock upstream and verify:
//! - Batch recovery (malformed records are dropped, the rest survive)
//! - Upstream 404 and empty-array handling per operation
//! - Path and query construction
//! - Error propagation vs. the never-failing popular selection

mod helpers;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use countries_dashboard::{CountriesClient, CountriesError};
use helpers::country_json;

fn client_for(server: &MockServer) -> CountriesClient {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build HTTP client");
    CountriesClient::new(http, &server.uri()).expect("Mock server URI should parse")
}

#[tokio::test]
async fn test_fetch_all_requests_dashboard_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .and(query_param(
            "fields",
            "name,capital,region,subregion,population,area,flags,cca2,cca3,currencies,languages,borders,continents",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            country_json("France", "FR", "FRA", 68_000_000),
            country_json("Germany", "DE", "DEU", 83_000_000),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let countries = client_for(&server)
        .fetch_all_countries()
        .await
        .expect("fetch should succeed");

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].name, "France");
    assert_eq!(countries[0].alpha3_code, "FRA");
    assert_eq!(countries[0].capital.as_deref(), Some("France City"));
    assert_eq!(countries[1].population, 83_000_000.0);
}

#[tokio::test]
async fn test_fetch_all_drops_malformed_records() {
    let server = MockServer::start().await;

    let mut missing_population = country_json("Broken", "BR", "BRK", 1);
    missing_population
        .as_object_mut()
        .expect("fixture is an object")
        .remove("population");
    let mut bad_flag = country_json("BadFlag", "BF", "BFX", 1);
    bad_flag["flags"]["png"] = json!("not a url");

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            country_json("France", "FR", "FRA", 68_000_000),
            missing_population,
            country_json("Spain", "ES", "ESP", 48_000_000),
            bad_flag,
            "not even an object",
        ])))
        .mount(&server)
        .await;

    let countries = client_for(&server)
        .fetch_all_countries()
        .await
        .expect("fetch should succeed with the valid subset");

    let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["France", "Spain"]);
}

#[tokio::test]
async fn test_fetch_all_empty_array_is_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let countries = client_for(&server).fetch_all_countries().await.unwrap();
    assert!(countries.is_empty());
}

#[tokio::test]
async fn test_fetch_all_non_array_is_invalid_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": 500, "message": "oops" })),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_all_countries().await;
    assert!(
        matches!(result, Err(CountriesError::InvalidResponseFormat(_))),
        "expected InvalidResponseFormat, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_fetch_all_non_json_body_is_invalid_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_all_countries().await;
    assert!(matches!(result, Err(CountriesError::InvalidResponseFormat(_))));
}

#[tokio::test]
async fn test_fetch_all_server_error_is_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    match client_for(&server).fetch_all_countries().await {
        Err(CountriesError::UpstreamStatus { status, url }) => {
            assert_eq!(status, 503);
            assert!(url.contains("/all"));
        }
        other => panic!("expected UpstreamStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_all_transport_failure() {
    // Nothing listens on the discard port
    let http = reqwest::Client::new();
    let client = CountriesClient::new(http, "http://127.0.0.1:9").unwrap();

    let result = client.fetch_all_countries().await;
    assert!(matches!(result, Err(CountriesError::Transport(_))));
}

#[tokio::test]
async fn test_fetch_by_name_returns_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/united"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            country_json("United Kingdom", "GB", "GBR", 67_000_000),
            country_json("United States", "US", "USA", 331_000_000),
        ])))
        .mount(&server)
        .await;

    let country = client_for(&server)
        .fetch_country_by_name("united")
        .await
        .unwrap();
    assert_eq!(country.alpha2_code, "GB");
}

#[tokio::test]
async fn test_fetch_by_name_percent_encodes_the_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/s%C3%A3o%20tom%C3%A9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([country_json(
            "São Tomé and Príncipe",
            "ST",
            "STP",
            220_000
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let country = client_for(&server)
        .fetch_country_by_name("são tomé")
        .await
        .unwrap();
    assert_eq!(country.alpha3_code, "STP");
}

#[tokio::test]
async fn test_fetch_by_name_empty_array_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_country_by_name("atlantis")
        .await
        .unwrap_err();
    assert!(matches!(err, CountriesError::NotFound(ref name) if name == "atlantis"));
    assert!(err.to_string().contains("atlantis"));
}

#[tokio::test]
async fn test_fetch_by_name_upstream_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/atlantis"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "status": 404, "message": "Not Found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_country_by_name("atlantis")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No country found with name: atlantis");
}

#[tokio::test]
async fn test_fetch_by_name_skips_invalid_first_record() {
    let server = MockServer::start().await;
    let mut invalid = country_json("", "XX", "XXX", 1);
    invalid["name"]["common"] = json!("");

    Mock::given(method("GET"))
        .and(path("/name/land"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            invalid,
            country_json("Finland", "FI", "FIN", 5_500_000),
        ])))
        .mount(&server)
        .await;

    let country = client_for(&server)
        .fetch_country_by_name("land")
        .await
        .unwrap();
    assert_eq!(country.name, "Finland");
}

#[tokio::test]
async fn test_fetch_by_continent_lowercases_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/region/europe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            country_json("France", "FR", "FRA", 68_000_000),
            country_json("Italy", "IT", "ITA", 59_000_000),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let countries = client_for(&server)
        .fetch_countries_by_continent("Europe")
        .await
        .unwrap();
    assert_eq!(countries.len(), 2);
}

#[tokio::test]
async fn test_fetch_by_continent_unknown_is_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/region/atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let countries = client_for(&server)
        .fetch_countries_by_continent("Atlantis")
        .await
        .unwrap();
    assert!(countries.is_empty());
}

#[tokio::test]
async fn test_fetch_popular_countries_selects_most_populous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            country_json("A", "AA", "AAA", 10),
            country_json("B", "BB", "BBB", 50),
            country_json("C", "CC", "CCC", 5),
            country_json("Germany", "DE", "DEU", 83_000_000),
        ])))
        .mount(&server)
        .await;

    let popular = client_for(&server)
        .with_popular_count(2)
        .fetch_popular_countries()
        .await;
    let codes: Vec<&str> = popular.iter().map(|c| c.alpha3_code.as_str()).collect();
    assert_eq!(codes, vec!["DEU", "BBB"]);
}

#[tokio::test]
async fn test_fetch_popular_countries_swallows_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let popular = client_for(&server).fetch_popular_countries().await;
    assert!(popular.is_empty());
}

#[tokio::test]
async fn test_client_timeout_surfaces_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = CountriesClient::new(http, &server.uri()).unwrap();

    match client.fetch_all_countries().await {
        Err(CountriesError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}
