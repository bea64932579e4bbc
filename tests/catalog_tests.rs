use std::collections::HashSet;

use memodeck::{rng_for_game, CatalogClient, CatalogError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_entity(server: &MockServer, id: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": format!("creature-{id}"),
            "sprites": { "front_default": format!("https://img.example/{id}.png") },
            "weight": 42
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_and_maps_all_requested_records() {
    let server = MockServer::start().await;
    for id in 1..=3 {
        mount_entity(&server, id).await;
    }

    let client = CatalogClient::new(server.uri());
    let mut rng = rng_for_game(0xABCD, 0);
    // n == max_id forces the rejection loop to draw every id exactly once.
    let records = client
        .fetch_random_records(3, 3, &mut rng)
        .await
        .expect("fetch_random_records");

    assert_eq!(records.len(), 3);
    let ids: HashSet<u32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, HashSet::from([1, 2, 3]));
    for r in &records {
        assert_eq!(r.name, format!("creature-{}", r.id));
        assert_eq!(r.image_ref, format!("https://img.example/{}.png", r.id));
    }
}

#[tokio::test]
async fn drawn_ids_are_distinct_and_in_range() {
    let server = MockServer::start().await;
    for id in 1..=10 {
        mount_entity(&server, id).await;
    }

    let client = CatalogClient::new(server.uri());
    let mut rng = rng_for_game(0x1234, 9);
    let records = client
        .fetch_random_records(5, 10, &mut rng)
        .await
        .expect("fetch_random_records");

    let ids: HashSet<u32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), 5, "ids must be distinct");
    assert!(ids.iter().all(|&id| (1..=10).contains(&id)));
}

#[tokio::test]
async fn one_failing_fetch_fails_the_whole_call() {
    let server = MockServer::start().await;
    mount_entity(&server, 1).await;
    mount_entity(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = CatalogClient::new(server.uri());
    let mut rng = rng_for_game(0xABCD, 0);
    let err = client
        .fetch_random_records(3, 3, &mut rng)
        .await
        .expect_err("a 500 on any id must abort the call");
    assert!(matches!(err, CatalogError::Fetch(_)));
}

#[tokio::test]
async fn entry_without_front_sprite_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "spriteless",
            "sprites": { "front_default": null }
        })))
        .mount(&server)
        .await;

    let client = CatalogClient::new(server.uri());
    let mut rng = rng_for_game(0xABCD, 0);
    let err = client
        .fetch_random_records(1, 1, &mut rng)
        .await
        .expect_err("null front_default must be rejected");
    assert!(matches!(err, CatalogError::MissingImage(1)));
}

// The original's rejection loop would spin forever when asked for more
// distinct ids than the range holds; here it is rejected up front.
#[tokio::test]
async fn impossible_draws_are_rejected_without_any_request() {
    let server = MockServer::start().await;
    let client = CatalogClient::new(server.uri());
    let mut rng = rng_for_game(0xABCD, 0);

    let err = client
        .fetch_random_records(9, 8, &mut rng)
        .await
        .expect_err("n > max_id cannot terminate");
    assert!(matches!(
        err,
        CatalogError::InvalidParams { wanted: 9, max_id: 8 }
    ));

    let err = client
        .fetch_random_records(0, 8, &mut rng)
        .await
        .expect_err("zero records is a caller bug");
    assert!(matches!(err, CatalogError::InvalidParams { .. }));

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
