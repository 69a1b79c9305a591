use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use stockanalysis_client::clients::EntityClient;
use stockanalysis_client::domain::{Analysis, Portfolio, Position, Stock};
use stockanalysis_client::framework::mock::MockTransport;
use stockanalysis_client::framework::{ClientError, EntityState, ListQuery, Transport};
use stockanalysis_client::lifecycle::{AdminSystem, Config};

fn system(transport: &Arc<MockTransport>) -> AdminSystem {
    AdminSystem::with_transport(Config::default(), transport.clone() as Arc<dyn Transport>)
}

/// Full end-to-end flow against a mocked server: create, list, read, update,
/// delete, reset — checking the store after every lifecycle round trip.
#[tokio::test]
async fn test_full_stock_admin_flow() {
    let transport = MockTransport::new();
    let system = system(&transport);

    let acme = json!({ "id": 1, "name": "Acme", "sector": "Industrials" });

    // Create: POST, then an automatic list refresh.
    transport.enqueue_ok(acme.clone());
    transport.enqueue_ok(json!([acme.clone()]));

    let created = system
        .stocks
        .create(Stock::new("Acme", "Industrials"))
        .await
        .expect("Failed to create stock");
    assert_eq!(created.id, Some(1));

    let mut observer = system.stocks.watch();
    let state = observer
        .wait_for(|s| s.update_success && !s.entities.is_empty())
        .await
        .unwrap()
        .clone();
    assert_eq!(state.entity, created);
    assert_eq!(state.entities, vec![created.clone()]);
    assert!(!state.updating && !state.loading);
    assert_eq!(system.stocks.cached(1), Some(created.clone()));
    assert!(system.stocks.cached(2).is_none());

    // Read back by id.
    transport.enqueue_ok(acme.clone());
    let fetched = system.stocks.fetch_one(1).await.expect("Failed to get stock");
    assert_eq!(fetched, created);

    // Update: PUT, then refresh.
    let energized = json!({ "id": 1, "name": "Acme", "sector": "Energy" });
    transport.enqueue_ok(energized.clone());
    transport.enqueue_ok(json!([energized.clone()]));

    let updated = system
        .stocks
        .update(Stock {
            sector: Some("Energy".into()),
            ..created
        })
        .await
        .expect("Failed to update stock");
    assert_eq!(updated.sector.as_deref(), Some("Energy"));

    let state = observer
        .wait_for(|s| s.entity.sector.as_deref() == Some("Energy") && !s.updating)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.entities, vec![updated.clone()]);

    // Delete the current entity: DELETE, then refresh. The current entity
    // reverts to the empty default because its id matched.
    transport.enqueue_ok(serde_json::Value::Null);
    transport.enqueue_ok(json!([]));

    system.stocks.delete(1).await.expect("Failed to delete stock");
    let state = observer
        .wait_for(|s| s.entities.is_empty() && s.entity == Stock::default())
        .await
        .unwrap()
        .clone();
    assert!(state.update_success);

    // Reset returns the documented initial state.
    system.stocks.reset().await.unwrap();
    observer
        .wait_for(|s| *s == EntityState::default())
        .await
        .unwrap();

    // The wire traffic matches the REST surface, in order.
    let requests = transport.requests();
    let summary: Vec<(Method, &str)> = requests
        .iter()
        .map(|r| (r.method.clone(), r.url.split('?').next().unwrap()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Method::POST, "http://localhost:8080/api/stocks"),
            (Method::GET, "http://localhost:8080/api/stocks"),
            (Method::GET, "http://localhost:8080/api/stocks/1"),
            (Method::PUT, "http://localhost:8080/api/stocks/1"),
            (Method::GET, "http://localhost:8080/api/stocks"),
            (Method::DELETE, "http://localhost:8080/api/stocks/1"),
            (Method::GET, "http://localhost:8080/api/stocks"),
        ]
    );
    transport.verify();

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Cross-entity flow: a position referencing its portfolio is transmitted
/// with an `{ "id": ... }` stub, never the nested object.
#[tokio::test]
async fn test_position_references_portfolio_by_id_stub() {
    let transport = MockTransport::new();
    let system = system(&transport);

    let growth = json!({ "id": 3, "name": "Growth" });
    transport.enqueue_ok(growth.clone());
    transport.enqueue_ok(json!([growth]));

    let portfolio = system
        .portfolios
        .create(Portfolio::new("Growth"))
        .await
        .expect("Failed to create portfolio");

    let held = json!({ "id": 7, "amount": 10.0, "price": 99.5, "portfolio": { "id": 3 } });
    transport.enqueue_ok(held.clone());
    transport.enqueue_ok(json!([held]));

    system
        .positions
        .create(Position::new(10.0, 99.5).in_portfolio(portfolio))
        .await
        .expect("Failed to create position");

    let requests = transport.requests();
    assert_eq!(requests[2].url, "http://localhost:8080/api/positions");
    assert_eq!(
        requests[2].body,
        Some(json!({ "amount": 10.0, "price": 99.5, "portfolio": { "id": 3 } }))
    );

    // The refreshed cache can be filtered by the owning portfolio.
    let mut observer = system.positions.watch();
    observer
        .wait_for(|s| !s.entities.is_empty())
        .await
        .unwrap();
    let held_here = system.positions.cached_in_portfolio(3);
    assert_eq!(held_here.len(), 1);
    assert_eq!(held_here[0].id, Some(7));
    assert!(system.positions.cached_in_portfolio(4).is_empty());

    transport.verify();
    system.shutdown().await.expect("Failed to shutdown system");
}

/// Failures surface in the store; validation failures never leave the client.
#[tokio::test]
async fn test_error_paths() {
    let transport = MockTransport::new();
    let system = system(&transport);

    // A get for an id the server does not have.
    transport.enqueue_err(ClientError::NotFound("404 Not Found".into()));
    let err = system.indicators.fetch_one(99).await.unwrap_err();
    assert_eq!(err, ClientError::NotFound("404 Not Found".into()));

    let mut observer = system.indicators.watch();
    let state = observer
        .wait_for(|s| s.error_message.is_some())
        .await
        .unwrap()
        .clone();
    assert!(!state.loading);
    assert_eq!(state.entity, Default::default());

    // Client-side validation blocks submission entirely.
    let err = system.analyses.create(Analysis::default()).await.unwrap_err();
    assert_eq!(err, ClientError::Validation { field: "date" });
    assert_eq!(transport.requests().len(), 1, "validation must not hit the network");
    assert!(system.analyses.state().error_message.is_none());

    // ListQuery forwarding is advisory and appended before the cache buster.
    transport.enqueue_ok(json!([]));
    system
        .indicators
        .fetch_all(ListQuery {
            page: Some(2),
            size: Some(50),
            sort: Some("name,desc".into()),
        })
        .await
        .unwrap();
    let last = transport.requests().pop().unwrap();
    assert!(last
        .url
        .starts_with("http://localhost:8080/api/indicators?page=2&size=50&sort=name,desc&cacheBuster="));

    // Relational cache filters work over an empty collection too.
    assert!(system.indicators.cached_for_analysis(1).is_empty());
    assert!(system.analyses.cached_for_stock(1).is_empty());

    transport.verify();
    system.shutdown().await.expect("Failed to shutdown system");
}
