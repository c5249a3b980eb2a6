//! Runs against a real PostgreSQL:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`

use rust_decimal::Decimal;

use liongate_server::config::Config;
use liongate_server::models::{AnimalChanges, NewAnimal, NewBooking, UserRecord};
use liongate_server::store::{self, StoreError};

async fn repositories() -> store::Repositories {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let config = Config::from_lookup(move |key: &str| match key {
        "JWT_SECRET" => Some("s".to_string()),
        "DB_TYPE" => Some("postgresql".to_string()),
        "DATABASE_URL" => Some(url.clone()),
        "DB_MIN_CONNECTIONS" => Some("1".to_string()),
        "DB_MAX_CONNECTIONS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();

    store::connect(&config.database).await.unwrap()
}

#[tokio::test]
#[ignore]
async fn test_postgres_animal_partial_update() {
    let repos = repositories().await;

    let animal = repos
        .animals
        .create(NewAnimal {
            name: "Leo".to_string(),
            species: "Lion".to_string(),
            kind: "mammal".to_string(),
            show_duration: 20,
        })
        .await
        .unwrap();

    let updated = repos
        .animals
        .update(
            &animal.id,
            AnimalChanges {
                name: Some("King Leo".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "King Leo");
    assert_eq!(updated.kind, "mammal");

    repos.animals.delete(&animal.id).await.unwrap();
    assert!(matches!(
        repos.animals.delete(&animal.id).await,
        Err(StoreError::NotFound("Animal"))
    ));
}

#[tokio::test]
#[ignore]
async fn test_postgres_seat_constraint() {
    let repos = repositories().await;
    let round_id = uuid::Uuid::new_v4().to_string();
    let booking = || NewBooking {
        user_id: "U1".to_string(),
        round_id: round_id.clone(),
        seat_number: 5,
        price: Decimal::new(1250, 2),
        qr_code: None,
    };

    let first = repos.bookings.create(booking()).await.unwrap();
    assert_eq!(first.price, Decimal::new(1250, 2));

    let err = repos.bookings.create(booking()).await.unwrap_err();
    assert!(matches!(err, StoreError::SeatTaken(5)));

    repos.bookings.delete(&first.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_postgres_duplicate_username() {
    let repos = repositories().await;
    let username = format!("user-{}", uuid::Uuid::new_v4());
    let record = || UserRecord {
        username: username.clone(),
        password_hash: "hash".to_string(),
        role: "user".to_string(),
    };

    let user = repos.users.create(record()).await.unwrap();
    let err = repos.users.create(record()).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(_)));

    repos.users.delete(&user.id).await.unwrap();
}
