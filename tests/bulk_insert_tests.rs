use cssl::{Error, SkipList, SENTINEL};

#[test]
fn ascending_run_is_fully_retrievable() {
    let mut list = SkipList::new(3, 2);
    for k in 1..100 {
        list.bulk_insert(k).unwrap();
    }
    assert_eq!(list.lookup(50), 50);
    assert_eq!(list.lookup(101), SENTINEL);
}

#[test]
fn equal_to_tail_is_rejected() {
    let mut list = SkipList::new(3, 2);
    list.bulk_insert(10).unwrap();
    let err = list.bulk_insert(10).unwrap_err();
    assert!(matches!(err, Error::UnsortedInsert { tail: 10, got: 10 }));
}

#[test]
fn out_of_order_is_rejected() {
    let mut list = SkipList::new(3, 2);
    list.bulk_insert(10).unwrap();
    assert!(list.bulk_insert(9).is_err());
}

#[test]
fn key_at_or_above_sentinel_is_rejected() {
    let mut list = SkipList::new(3, 2);
    let err = list.bulk_insert(SENTINEL).unwrap_err();
    assert!(matches!(err, Error::KeyTooLarge(SENTINEL)));
}

#[test]
fn sampling_matches_skip_factor_at_scale() {
    let mut list = SkipList::new(9, 5);
    for k in 1..100_000 {
        list.bulk_insert(k).unwrap();
    }
    assert_eq!(list.len(), 99_999);
    for k in 1..100_000u32 {
        assert_eq!(list.lookup(k), k);
    }
}
