//! Contract tests for the in-memory shipment store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    DestinationAddress, ListShipmentsParams, ShipmentDraft, ShipmentNotes, StatusFilter,
    TrackingNumber,
};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn shipment(owner: &UserId, tracking: &str, status: ShipmentStatus, day: u32) -> Shipment {
    let mut draft = ShipmentDraft::new(
        TrackingNumber::new(tracking).expect("tracking number"),
        DestinationAddress::new(format!("{tracking} Dock Lane")).expect("address"),
        at(day),
        at(day) + Duration::days(3),
    );
    draft.status = status;
    Shipment::create(ShipmentId::random(), owner.clone(), draft, at(day))
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

async fn seeded(owner: &UserId) -> InMemoryShipmentRepository {
    let repo = InMemoryShipmentRepository::new();
    for (index, tracking) in ["TRK001", "TRK002", "TRK003"].into_iter().enumerate() {
        let day = u32::try_from(index).expect("small index") + 1;
        repo.insert(&shipment(owner, tracking, ShipmentStatus::Pending, day))
            .await
            .expect("insert");
    }
    repo
}

#[rstest]
#[tokio::test]
async fn tracking_numbers_are_unique_across_owners(owner: UserId) {
    let repo = seeded(&owner).await;
    let stranger = UserId::random();

    let error = repo
        .insert(&shipment(&stranger, "TRK001", ShipmentStatus::Pending, 9))
        .await
        .expect_err("duplicate tracking number");

    assert_eq!(
        error,
        ShipmentRepositoryError::duplicate_tracking_number("TRK001")
    );
}

#[rstest]
#[tokio::test]
async fn reads_and_deletes_are_owner_scoped(owner: UserId) {
    let repo = InMemoryShipmentRepository::new();
    let stored = shipment(&owner, "TRK010", ShipmentStatus::Delivered, 4);
    repo.insert(&stored).await.expect("insert");
    let stranger = UserId::random();

    assert_eq!(
        repo.find_for_owner(&stored.id(), &stranger).await.expect("find"),
        None
    );
    assert!(!repo.delete_for_owner(&stored.id(), &stranger).await.expect("delete"));
    assert!(repo.delete_for_owner(&stored.id(), &owner).await.expect("delete"));
    assert!(!repo.delete_for_owner(&stored.id(), &owner).await.expect("delete"));
}

#[rstest]
#[tokio::test]
async fn update_rejects_tracking_number_of_another_shipment(owner: UserId) {
    let repo = InMemoryShipmentRepository::new();
    let first = shipment(&owner, "TRK100", ShipmentStatus::Pending, 1);
    let second = shipment(&owner, "TRK200", ShipmentStatus::Pending, 2);
    repo.insert(&first).await.expect("insert");
    repo.insert(&second).await.expect("insert");

    let patch = ShipmentPatch {
        tracking_number: Some(TrackingNumber::new("TRK100").expect("tracking number")),
        ..Default::default()
    };

    let error = repo
        .update_for_owner(&second.id(), &owner, &patch, at(5))
        .await
        .expect_err("collision");
    assert!(matches!(
        error,
        ShipmentRepositoryError::DuplicateTrackingNumber { .. }
    ));
    let untouched = repo
        .find_for_owner(&second.id(), &owner)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(untouched.tracking_number().as_ref(), "TRK200");
}

#[rstest]
#[tokio::test]
async fn update_keeping_own_tracking_number_succeeds(owner: UserId) {
    let repo = InMemoryShipmentRepository::new();
    let stored = shipment(&owner, "TRK300", ShipmentStatus::Pending, 1);
    repo.insert(&stored).await.expect("insert");

    let patch = ShipmentPatch {
        tracking_number: Some(TrackingNumber::new("TRK300").expect("tracking number")),
        status: Some(ShipmentStatus::InTransit),
        ..Default::default()
    };

    let merged = repo
        .update_for_owner(&stored.id(), &owner, &patch, at(2))
        .await
        .expect("update")
        .expect("owned");
    assert_eq!(merged.status(), ShipmentStatus::InTransit);
    let reloaded = repo
        .find_for_owner(&stored.id(), &owner)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(reloaded, merged);
    assert_eq!(reloaded.updated_at(), at(2));
}

#[rstest]
#[tokio::test]
async fn update_of_foreign_shipment_returns_none(owner: UserId) {
    let repo = InMemoryShipmentRepository::new();
    let stored = shipment(&owner, "TRK400", ShipmentStatus::Pending, 1);
    repo.insert(&stored).await.expect("insert");
    let patch = ShipmentPatch {
        is_fragile: Some(true),
        ..Default::default()
    };

    let outcome = repo
        .update_for_owner(&stored.id(), &UserId::random(), &patch, at(2))
        .await
        .expect("update");

    assert_eq!(outcome, None);
}

#[rstest]
#[tokio::test]
async fn interleaved_patches_to_different_fields_both_survive(owner: UserId) {
    let repo = InMemoryShipmentRepository::new();
    let stored = shipment(&owner, "TRK500", ShipmentStatus::InTransit, 1);
    repo.insert(&stored).await.expect("insert");

    let deliver = ShipmentPatch {
        status: Some(ShipmentStatus::Delivered),
        ..Default::default()
    };
    let annotate = ShipmentPatch {
        notes: Some(ShipmentNotes::new("leave at reception").expect("notes")),
        ..Default::default()
    };
    repo.update_for_owner(&stored.id(), &owner, &deliver, at(2))
        .await
        .expect("deliver")
        .expect("owned");
    repo.update_for_owner(&stored.id(), &owner, &annotate, at(3))
        .await
        .expect("annotate")
        .expect("owned");

    let reloaded = repo
        .find_for_owner(&stored.id(), &owner)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(reloaded.status(), ShipmentStatus::Delivered);
    assert_eq!(reloaded.notes().as_ref(), "leave at reception");
    assert_eq!(reloaded.updated_at(), at(3));
}

#[rstest]
#[tokio::test]
async fn list_windows_the_ordered_selection(owner: UserId) {
    let repo = seeded(&owner).await;
    let selection = ShipmentSelection::build(owner.clone(), &ListShipmentsParams::default());

    let first_page = repo
        .list(&selection, PageRequest::new(1, 2))
        .await
        .expect("list");
    let second_page = repo
        .list(&selection, PageRequest::new(2, 2))
        .await
        .expect("list");
    let beyond = repo
        .list(&selection, PageRequest::new(3, 2))
        .await
        .expect("list");

    let tracking: Vec<&str> = first_page
        .iter()
        .chain(second_page.iter())
        .map(|s| s.tracking_number().as_ref())
        .collect();
    assert_eq!(tracking, ["TRK003", "TRK002", "TRK001"]);
    assert!(beyond.is_empty());
}

#[rstest]
#[tokio::test]
async fn count_and_status_groups_follow_filter(owner: UserId) {
    let repo = seeded(&owner).await;
    repo.insert(&shipment(&owner, "TRK004", ShipmentStatus::Delayed, 5))
        .await
        .expect("insert");
    repo.insert(&shipment(&UserId::random(), "TRK005", ShipmentStatus::Delayed, 5))
        .await
        .expect("insert");

    let delayed = ShipmentSelection::build(
        owner.clone(),
        &ListShipmentsParams {
            status: StatusFilter::Only(ShipmentStatus::Delayed),
            ..ListShipmentsParams::default()
        },
    );
    assert_eq!(repo.count(&delayed.filter).await.expect("count"), 1);
    assert_eq!(
        repo.count(&ShipmentFilter::for_owner(owner.clone()))
            .await
            .expect("count"),
        4
    );

    let groups = repo.count_by_status(&owner).await.expect("groups");
    assert_eq!(
        groups,
        vec![(ShipmentStatus::Pending, 3), (ShipmentStatus::Delayed, 1)]
    );
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(10)]
#[tokio::test]
async fn walking_every_page_yields_each_shipment_once(owner: UserId, #[case] page_size: u32) {
    let repo = InMemoryShipmentRepository::new();
    // Repeated days give equal creation timestamps, so ordering relies on
    // the id tie-break.
    for (tracking, day) in [
        ("TRK-A", 1),
        ("TRK-B", 1),
        ("TRK-C", 2),
        ("TRK-D", 2),
        ("TRK-E", 2),
        ("TRK-F", 3),
        ("TRK-G", 4),
    ] {
        repo.insert(&shipment(&owner, tracking, ShipmentStatus::InTransit, day))
            .await
            .expect("insert");
    }
    let selection = ShipmentSelection::build(owner.clone(), &ListShipmentsParams::default());
    let total = repo.count(&selection.filter).await.expect("count");
    let meta = pagination::PageMeta::new(PageRequest::new(1, page_size), total);

    let mut walked = Vec::new();
    for page in 1..=meta.total_pages {
        let request = PageRequest::new(u32::try_from(page).expect("small page"), page_size);
        let rows = repo.list(&selection, request).await.expect("list");
        assert!(rows.len() <= page_size as usize);
        walked.extend(rows.iter().map(Shipment::id));
    }

    let everything = repo
        .list(&selection, PageRequest::new(1, 100))
        .await
        .expect("list all");
    let expected: Vec<ShipmentId> = everything.iter().map(Shipment::id).collect();
    assert_eq!(walked, expected);
}
