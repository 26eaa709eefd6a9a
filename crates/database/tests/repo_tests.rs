mod common;

use chrono::{TimeZone, Utc};
use common::TempDatabase;
use geoposts::{client::SeedOutcome, RequestError};
use model::{
    connection::{Connection, Waypoint},
    post::{Post, PostSeed},
    user::{User, DEFAULT_ROLE},
};
use utility::{geo::PHILIPPINES, id::Id};

fn seed(name: &str, lat: f64, lng: f64) -> PostSeed {
    PostSeed {
        name: name.to_owned(),
        lat,
        lng,
        status: Some("active".to_owned()),
        area: None,
    }
}

#[tokio::test]
async fn seeding_only_fills_an_empty_table() {
    let db = TempDatabase::new("seed").await;

    let outcome = db
        .client
        .seed_posts(vec![
            seed("Manila", 14.5995, 120.9842),
            seed("New York", 40.7128, -74.0060),
            seed("Cebu", 10.3157, 123.8854),
        ])
        .await
        .expect("seeding should succeed");
    assert_eq!(outcome, SeedOutcome::Seeded(3));

    let outcome = db
        .client
        .seed_posts(vec![seed("Davao", 7.1907, 125.4553)])
        .await
        .expect("seeding should succeed");
    assert_eq!(outcome, SeedOutcome::AlreadySeeded);
    assert_eq!(db.client.count_posts(None).await.expect("count"), 3);

    db.close().await;
}

#[tokio::test]
async fn posts_can_be_filtered_by_bounding_box() {
    let db = TempDatabase::new("posts-within").await;
    db.client
        .seed_posts(vec![
            seed("Manila", 14.5995, 120.9842),
            seed("New York", 40.7128, -74.0060),
            seed("Cebu", 10.3157, 123.8854),
        ])
        .await
        .expect("seeding should succeed");

    let all = db.client.get_posts(None).await.expect("posts");
    assert_eq!(
        all.iter().map(|post| post.content.name.as_str()).collect::<Vec<_>>(),
        vec!["Manila", "New York", "Cebu"]
    );

    let within = db.client.get_posts(Some(PHILIPPINES)).await.expect("posts");
    assert_eq!(within.len(), 2);
    assert!(within.iter().all(|post| post.content.is_within(&PHILIPPINES)));
    assert_eq!(
        db.client.count_posts(Some(PHILIPPINES)).await.expect("count"),
        2
    );

    let first = db.client.first_post().await.expect("first post");
    assert_eq!(first.map(|post| post.content.name), Some("Manila".to_owned()));

    db.close().await;
}

#[tokio::test]
async fn unknown_posts_are_not_found() {
    let db = TempDatabase::new("posts-missing").await;

    assert!(matches!(
        db.client.get_post(Id::new(404)).await,
        Err(RequestError::NotFound)
    ));
    assert!(db.client.first_post().await.expect("first post").is_none());

    db.close().await;
}

#[tokio::test]
async fn connections_keep_their_points_in_order() {
    let db = TempDatabase::new("connections").await;
    db.client
        .seed_posts(vec![
            seed("A", 14.5995, 120.9842),
            seed("B", 14.6000, 120.9850),
        ])
        .await
        .expect("seeding should succeed");
    let posts = db.client.get_posts(None).await.expect("posts");

    let user = db
        .client
        .create_user(User::new("lineman", "hash"))
        .await
        .expect("user should be created");

    let mut connection = Connection::through(
        Some("Feeder 1".to_owned()),
        Some(user.id),
        vec![
            Waypoint::post(posts[0].id, &posts[0].content),
            Waypoint::at(14.5998, 120.9846),
            Waypoint::post(posts[1].id, &posts[1].content),
        ],
    );
    connection.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();

    let created = db
        .client
        .create_connection(connection.clone())
        .await
        .expect("connection should be created");
    let stored = db
        .client
        .get_connection(created.id)
        .await
        .expect("connection should exist");

    assert_eq!(stored.content.name.as_deref(), Some("Feeder 1"));
    assert_eq!(stored.content.created_at, connection.created_at);
    assert_eq!(stored.content.created_by, Some(user.id));
    assert_eq!(stored.content.points, connection.points);
    assert_eq!(stored.content.total_length, connection.total_length);
    assert_eq!(db.count("connection_point").await, 3);

    db.client
        .delete_connection(created.id)
        .await
        .expect("connection should be deleted");
    assert_eq!(db.count("connection_point").await, 0);
    assert!(matches!(
        db.client.get_connection(created.id).await,
        Err(RequestError::NotFound)
    ));
    assert!(matches!(
        db.client.delete_connection(created.id).await,
        Err(RequestError::NotFound)
    ));

    db.close().await;
}

#[tokio::test]
async fn users_are_found_by_username() {
    let db = TempDatabase::new("users").await;

    let viewer = db
        .client
        .create_user(User::new("viewer", "hash-1"))
        .await
        .expect("user should be created");
    db.client
        .create_user(User::new("admin", "hash-2").with_role("admin"))
        .await
        .expect("user should be created");

    let found = db.client.get_user("viewer").await.expect("user exists");
    assert_eq!(found.id, viewer.id);
    assert_eq!(found.content.role, DEFAULT_ROLE);
    assert_eq!(found.content.password_hash, "hash-1");

    let admin = db.client.get_user("admin").await.expect("user exists");
    assert_eq!(admin.content.role, "admin");

    assert!(db
        .client
        .create_user(User::new("viewer", "other"))
        .await
        .is_err());
    assert!(matches!(
        db.client.get_user("nobody").await,
        Err(RequestError::NotFound)
    ));

    db.close().await;
}

#[tokio::test]
async fn seeding_leaves_existing_posts_untouched() {
    let db = TempDatabase::new("posts-insert").await;
    db.execute("INSERT INTO post(id, name, lat, lng) VALUES (100, 'Pole 100', 10.0, 120.0);")
        .await;

    db.client
        .seed_posts(vec![seed("ignored", 10.0, 120.0)])
        .await
        .expect("seeding should succeed");
    let post = db
        .client
        .get_post(Id::new(100))
        .await
        .expect("post 100 exists");
    assert_eq!(
        post.content,
        Post {
            name: "Pole 100".to_owned(),
            latitude: 10.0,
            longitude: 120.0,
            status: None,
            area: None,
        }
    );

    db.close().await;
}
