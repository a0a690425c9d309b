use crate::core::errors::{ErrorKind, LedgerError};
use crate::infrastructure::storage::GroupStore;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use crate::tests::{ALICE, DAVE, addr, trip_group};

#[tokio::test]
async fn test_save_group_bumps_version() {
    let store = InMemoryStore::new();
    let group = store.insert_group(trip_group()).await.unwrap();
    assert_eq!(group.version, 0);

    let saved = store.save_group(group.clone(), 0).await.unwrap();
    assert_eq!(saved.version, 1);
    assert_eq!(store.get_group(&group.id).await.unwrap().unwrap().version, 1);
}

#[tokio::test]
async fn test_stale_save_is_rejected() {
    let store = InMemoryStore::new();
    let group = store.insert_group(trip_group()).await.unwrap();
    store.save_group(group.clone(), 0).await.unwrap();

    let mut stale = group.clone();
    stale.name = "Renamed".to_string();
    let err = store.save_group(stale, 0).await.unwrap_err();
    assert_eq!(
        err,
        LedgerError::VersionConflict {
            expected: 0,
            found: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(store.get_group(&group.id).await.unwrap().unwrap().name, "Trip");
}

#[tokio::test]
async fn test_insert_and_lookup() {
    let store = InMemoryStore::new();
    let group = store.insert_group(trip_group()).await.unwrap();
    assert!(matches!(
        store.insert_group(group.clone()).await,
        Err(LedgerError::StorageError(_))
    ));
    assert!(store.get_group("missing").await.unwrap().is_none());
    let unknown = trip_group();
    let unknown_id = unknown.id.clone();
    assert_eq!(
        store.save_group(unknown, 0).await,
        Err(LedgerError::GroupNotFound(unknown_id))
    );
    assert_eq!(store.get_member_groups(&addr(ALICE)).await.unwrap().len(), 1);
    assert!(store.get_member_groups(&addr(DAVE)).await.unwrap().is_empty());
}
