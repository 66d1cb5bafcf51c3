#![cfg(feature = "serde")]

use sandtime::{datetime, Easing, Timestamp};

#[test]
fn timestamp_serializes_as_millis() {
    let ts = datetime(2010, 12, 31, 23, 59, 59, 3);
    let json = serde_json::to_string(&ts).unwrap();
    assert_eq!(json, ts.as_millis().to_string());
    assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
}

#[test]
fn fields_serialize_by_name() {
    let fields = datetime(2010, 12, 31, 23, 59, 59, 3).fields();
    let value = serde_json::to_value(fields).unwrap();
    assert_eq!(value["year"], 2010);
    assert_eq!(value["millisecond"], 3);
}

#[test]
fn easing_uses_snake_case_names() {
    let json = serde_json::to_string(&Easing::BounceInOut).unwrap();
    assert_eq!(json, "\"bounce_in_out\"");
    assert_eq!(serde_json::from_str::<Easing>(&json).unwrap(), Easing::BounceInOut);
}
