use tempfile::TempDir;
use uuid::Uuid;

use crate::Database;
use crate::queries::drops::NewDrop;
use crate::queries::vip::SubscribeOutcome;

struct TestDb {
    db: Database,
    // Held so the directory outlives the connection.
    _dir: TempDir,
}

fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(&dir.path().join("test.db")).unwrap();
    TestDb { db, _dir: dir }
}

/// Creates a user + creator pair, returns the creator id.
fn seed_creator(db: &Database, slug: &str) -> String {
    let user_id = Uuid::new_v4().to_string();
    let creator_id = Uuid::new_v4().to_string();
    db.create_user(&user_id, &format!("user-{}", slug), "hash").unwrap();
    db.create_creator(&creator_id, &user_id, slug, "Test Creator", None)
        .unwrap();
    creator_id
}

// -- VIP subscription transitions --

#[test]
fn subscribe_fresh_pair_inserts_one_active_row() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    let outcome = t
        .db
        .vip_subscribe(&Uuid::new_v4().to_string(), &creator, "+251911111111")
        .unwrap();

    assert_eq!(outcome, SubscribeOutcome::Subscribed);
    assert_eq!(t.db.count_vip_rows(&creator, "+251911111111").unwrap(), 1);

    let active = t.db.list_active_vips(&creator).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status, "ACTIVE");
}

#[test]
fn subscribe_twice_reports_already_subscribed_and_keeps_one_row() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");
    let phone = "+251911111111";

    let first = t
        .db
        .vip_subscribe(&Uuid::new_v4().to_string(), &creator, phone)
        .unwrap();
    let second = t
        .db
        .vip_subscribe(&Uuid::new_v4().to_string(), &creator, phone)
        .unwrap();

    assert_eq!(first, SubscribeOutcome::Subscribed);
    assert_eq!(second, SubscribeOutcome::AlreadySubscribed);
    assert_eq!(t.db.count_vip_rows(&creator, phone).unwrap(), 1);
}

#[test]
fn subscribe_after_unsubscribe_reports_resubscribed() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");
    let phone = "+251922222222";

    t.db.vip_subscribe(&Uuid::new_v4().to_string(), &creator, phone)
        .unwrap();
    t.db.vip_unsubscribe(&creator, phone).unwrap();
    assert!(t.db.list_active_vips(&creator).unwrap().is_empty());

    let outcome = t
        .db
        .vip_subscribe(&Uuid::new_v4().to_string(), &creator, phone)
        .unwrap();

    assert_eq!(outcome, SubscribeOutcome::Resubscribed);
    assert_eq!(t.db.count_vip_rows(&creator, phone).unwrap(), 1);
    assert_eq!(t.db.list_active_vips(&creator).unwrap().len(), 1);
}

#[test]
fn unsubscribe_missing_pair_is_a_no_op() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    t.db.vip_unsubscribe(&creator, "+251933333333").unwrap();
    assert_eq!(t.db.count_vip_rows(&creator, "+251933333333").unwrap(), 0);
}

#[test]
fn vip_lists_are_scoped_per_creator() {
    let t = test_db();
    let a = seed_creator(&t.db, "abeba");
    let b = seed_creator(&t.db, "bini");
    let phone = "+251944444444";

    t.db.vip_subscribe(&Uuid::new_v4().to_string(), &a, phone).unwrap();
    t.db.vip_subscribe(&Uuid::new_v4().to_string(), &b, phone).unwrap();

    assert_eq!(t.db.list_active_vips(&a).unwrap().len(), 1);
    assert_eq!(t.db.list_active_vips(&b).unwrap().len(), 1);

    t.db.vip_unsubscribe(&a, phone).unwrap();
    assert!(t.db.list_active_vips(&a).unwrap().is_empty());
    assert_eq!(t.db.list_active_vips(&b).unwrap().len(), 1);
}

// -- Broadcast lifecycle --

fn seed_broadcast(db: &Database, creator: &str, status: &str) -> String {
    let id = Uuid::new_v4().to_string();
    let scheduled_at = if status == "SCHEDULED" {
        Some("2026-09-01T12:00:00+00:00")
    } else {
        None
    };
    db.insert_broadcast(&id, creator, "VIP", "drop tonight", scheduled_at, status)
        .unwrap();
    id
}

#[test]
fn cancel_requires_scheduled_state() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    let scheduled = seed_broadcast(&t.db, &creator, "SCHEDULED");
    let draft = seed_broadcast(&t.db, &creator, "DRAFT");
    let sent = seed_broadcast(&t.db, &creator, "SENT");

    assert!(t.db.cancel_broadcast(&scheduled).unwrap());
    assert!(!t.db.cancel_broadcast(&draft).unwrap());
    assert!(!t.db.cancel_broadcast(&sent).unwrap());

    // Cancelling twice fails the guard the second time.
    assert!(!t.db.cancel_broadcast(&scheduled).unwrap());

    let row = t.db.get_broadcast(&scheduled).unwrap().unwrap();
    assert_eq!(row.status, "CANCELLED");
}

#[test]
fn sent_broadcasts_cannot_be_deleted() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    let sent = seed_broadcast(&t.db, &creator, "SENT");
    let draft = seed_broadcast(&t.db, &creator, "DRAFT");
    let cancelled = seed_broadcast(&t.db, &creator, "CANCELLED");

    assert!(!t.db.delete_broadcast(&sent).unwrap());
    assert!(t.db.delete_broadcast(&draft).unwrap());
    assert!(t.db.delete_broadcast(&cancelled).unwrap());

    assert!(t.db.get_broadcast(&sent).unwrap().is_some());
    assert!(t.db.get_broadcast(&draft).unwrap().is_none());
}

#[test]
fn mark_sent_only_from_scheduled() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    let scheduled = seed_broadcast(&t.db, &creator, "SCHEDULED");
    let draft = seed_broadcast(&t.db, &creator, "DRAFT");

    assert!(t.db.mark_broadcast_sent(&scheduled).unwrap());
    assert!(!t.db.mark_broadcast_sent(&draft).unwrap());
    assert_eq!(
        t.db.get_broadcast(&scheduled).unwrap().unwrap().status,
        "SENT"
    );
}

// -- Drops --

#[test]
fn published_listing_excludes_drafts() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    let draft_id = Uuid::new_v4().to_string();
    let published_id = Uuid::new_v4().to_string();
    for id in [&draft_id, &published_id] {
        t.db.insert_drop(&NewDrop {
            id,
            creator_id: &creator,
            kind: "EVENT",
            title: "Rooftop show",
            description: None,
            price: 50000,
            capacity: Some(80),
            vip_only: false,
            starts_at: "2026-09-05T18:00:00+00:00",
            ends_at: None,
        })
        .unwrap();
    }
    t.db.publish_drop(&published_id).unwrap();

    assert_eq!(t.db.list_drops(&creator).unwrap().len(), 2);

    let published = t.db.list_published_drops(&creator).unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, published_id);
    assert_eq!(published[0].status, "PUBLISHED");
}

#[test]
fn drop_row_converts_to_domain() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");
    let id = Uuid::new_v4().to_string();

    t.db.insert_drop(&NewDrop {
        id: &id,
        creator_id: &creator,
        kind: "MERCH",
        title: "Tour tee",
        description: Some("Limited run"),
        price: 120000,
        capacity: None,
        vip_only: true,
        starts_at: "2026-09-05T18:00:00+00:00",
        ends_at: Some("2026-09-12T18:00:00+00:00"),
    })
    .unwrap();

    let drop = t.db.get_drop(&id).unwrap().unwrap().into_domain().unwrap();
    assert_eq!(drop.title, "Tour tee");
    assert!(drop.vip_only);
    assert!(drop.capacity.is_none());
    assert!(drop.ends_at.is_some());
}

// -- Bookings / earnings --

#[test]
fn earnings_roll_up_by_status() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");

    let rows = [
        ("COMPLETED", 100000),
        ("COMPLETED", 50000),
        ("CONFIRMED", 75000),
        ("CANCELLED", 30000),
    ];
    for (status, amount) in rows {
        t.db.insert_booking(
            &Uuid::new_v4().to_string(),
            &creator,
            None,
            "Hanna",
            "+251955555555",
            amount,
            amount / 10,
            status,
        )
        .unwrap();
    }

    let earnings = t.db.earnings_by_status(&creator).unwrap();
    let completed = earnings.iter().find(|e| e.status == "COMPLETED").unwrap();
    assert_eq!(completed.count, 2);
    assert_eq!(completed.amount, 150000);

    let cancelled = earnings.iter().find(|e| e.status == "CANCELLED").unwrap();
    assert_eq!(cancelled.amount, 30000);
}

#[test]
fn receipt_joins_creator_identity() {
    let t = test_db();
    let creator = seed_creator(&t.db, "selam");
    let booking_id = Uuid::new_v4().to_string();

    t.db.insert_booking(
        &booking_id,
        &creator,
        None,
        "Hanna",
        "+251955555555",
        100000,
        10000,
        "CONFIRMED",
    )
    .unwrap();

    let (booking, slug, display_name) = t.db.get_receipt(&booking_id).unwrap().unwrap();
    assert_eq!(booking.fan_name, "Hanna");
    assert_eq!(slug, "selam");
    assert_eq!(display_name, "Test Creator");

    assert!(t.db.get_receipt(&Uuid::new_v4().to_string()).unwrap().is_none());
}
