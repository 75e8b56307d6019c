//! Tests for typed row identifiers

use core_kernel::{BillId, RoomId, UserId};

#[test]
fn test_display_carries_prefix() {
    assert_eq!(RoomId::new(3).to_string(), "ROOM-3");
    assert_eq!(BillId::new(9).to_string(), "BILL-9");
    assert_eq!(UserId::new(1).to_string(), "USER-1");
}

#[test]
fn test_parse_with_and_without_prefix() {
    assert_eq!("ROOM-15".parse::<RoomId>().unwrap(), RoomId::new(15));
    assert_eq!("15".parse::<RoomId>().unwrap(), RoomId::new(15));
    assert!("ROOM-x".parse::<RoomId>().is_err());
}

#[test]
fn test_serde_is_transparent() {
    let json = serde_json::to_string(&UserId::new(4)).unwrap();
    assert_eq!(json, "4");
    let parsed: BillId = serde_json::from_str("12").unwrap();
    assert_eq!(parsed.value(), 12);
}

#[test]
fn test_ordering_follows_row_id() {
    assert!(RoomId::new(2) < RoomId::new(10));
}
