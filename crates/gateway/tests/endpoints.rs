//! Typed endpoint wrappers: request shapes on the way out, model parsing on
//! the way back.

use std::sync::Arc;

use gateway::transport::mock::{ok_json, MockTransport};
use gateway::transport::Method;
use gateway::{ApiError, Gateway};

use session::api::mock::MockAuthApi;
use session::storage::mock::MemorySessionStorage;
use session::{Session, SessionStore};

use models::barbershop::BarbershopInput;
use models::offering::OfferingInput;
use models::user::{Role, User};

fn seeded_session() -> Session {
    Session {
        access_token: Some("t1".into()),
        refresh_token: Some("r1".into()),
        user: Some(User {
            id: "u1".into(),
            email: "u1@example.com".into(),
            role: Role::Barber,
            created_at: chrono::Utc::now(),
        }),
        active_barbershop: None,
    }
}

async fn gateway_with(transport: Arc<MockTransport>) -> Gateway {
    let storage = Arc::new(MemorySessionStorage::with(seeded_session()));
    let store = SessionStore::open(Arc::new(MockAuthApi::default()), storage).await.unwrap();
    Gateway::new(store, transport)
}

fn shop_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "barbershopId": id,
        "barbershopName": name,
        "barbershopAddress": "1 Main St",
        "barbershopCity": "Austin",
        "barbershopState": "TX",
        "barbershopZipCode": "78701",
        "barbershopLatitude": 30.26,
        "barbershopLongitude": -97.74,
        "barbershopImages": [],
        "countryCode": "+1",
        "phoneNumber": "5550001111"
    })
}

fn shop_input(name: &str) -> BarbershopInput {
    BarbershopInput {
        name: name.into(),
        address: "1 Main St".into(),
        city: "Austin".into(),
        state: "TX".into(),
        zip_code: "78701".into(),
        latitude: 30.26,
        longitude: -97.74,
        country_code: "+1".into(),
        phone_number: "5550001111".into(),
        additional_info: None,
    }
}

#[tokio::test]
async fn list_offerings_sends_bearer_and_parses_models() {
    let body = serde_json::json!([{
        "id": "s1",
        "serviceName": "Skin fade",
        "description": "Full skin fade",
        "price": 35.0,
        "duration": 45,
        "category": "Haircut",
        "isActive": true,
        "barbershopId": "b1"
    }]);
    let transport = Arc::new(MockTransport::sequence(vec![Ok(ok_json(&body))]));
    let gw = gateway_with(Arc::clone(&transport)).await;

    let offerings = gw.list_offerings("b1").await.unwrap();
    assert_eq!(offerings.len(), 1);
    assert_eq!(offerings[0].service_name, "Skin fade");

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::GET);
    assert_eq!(sent[0].path, "/services?barbershopId=b1");
    assert_eq!(sent[0].bearer, "t1");
}

#[tokio::test]
async fn create_offering_validates_before_sending() {
    let transport = Arc::new(MockTransport::sequence(vec![]));
    let gw = gateway_with(Arc::clone(&transport)).await;

    let input = OfferingInput {
        service_name: "  ".into(),
        description: "".into(),
        price: 10.0,
        duration: 30,
        category: "Haircut".into(),
        is_active: true,
        barbershop_id: "b1".into(),
    };
    let err = gw.create_offering(&input).await.unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed { status: 400, .. }));
    assert_eq!(transport.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn saving_a_barbershop_updates_the_active_selection() {
    let transport = Arc::new(MockTransport::sequence(vec![Ok(ok_json(&shop_json("b7", "Fade Factory")))]));
    let gw = gateway_with(Arc::clone(&transport)).await;

    let shop = gw.save_barbershop(&shop_input("Fade Factory"), None).await.unwrap();
    assert_eq!(shop.id, "b7");

    let session = gw.store().current();
    assert_eq!(session.active_barbershop.as_ref().map(|s| s.id.as_str()), Some("b7"));

    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].path, "/barbershops");
    assert_eq!(sent[0].body.as_ref().unwrap()["barbershopName"], "Fade Factory");
}

#[tokio::test]
async fn updating_a_barbershop_puts_to_its_id() {
    let transport = Arc::new(MockTransport::sequence(vec![Ok(ok_json(&shop_json("b7", "Renamed")))]));
    let gw = gateway_with(Arc::clone(&transport)).await;

    gw.save_barbershop(&shop_input("Renamed"), Some("b7")).await.unwrap();
    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::PUT);
    assert_eq!(sent[0].path, "/barbershops/b7");
}

#[tokio::test]
async fn profile_round_trip() {
    let body = serde_json::json!({
        "id": "u1",
        "email": "u1@example.com",
        "role": "BARBER",
        "createdAt": "2023-11-14T22:13:20Z"
    });
    let transport = Arc::new(MockTransport::sequence(vec![Ok(ok_json(&body))]));
    let gw = gateway_with(transport).await;

    let user = gw.profile().await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.role, Role::Barber);
}

#[tokio::test]
async fn deleting_the_account_clears_the_session() {
    let transport = Arc::new(MockTransport::sequence(vec![Ok(
        gateway::transport::mock::no_content(),
    )]));
    let gw = gateway_with(transport).await;

    gw.delete_account().await.unwrap();
    assert!(!gw.store().is_authenticated());
}
