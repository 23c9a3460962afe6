use bson::DateTime;
use chrono::{Local, TimeZone};
use proptest::prelude::*;
use svm_stats_import::import::{CLIENT_DATE_FORMAT, render_client_date, transform_payload};

proptest! {
    #[test]
    fn prop_render_matches_floor_second(ms in -62_000_000_000_000i64..250_000_000_000_000i64) {
        let secs = ms.div_euclid(1000);
        let expected = Local.timestamp_opt(secs, 0).unwrap().format(CLIENT_DATE_FORMAT).to_string();
        #[allow(clippy::cast_precision_loss)]
        let rendered = render_client_date(ms as f64).unwrap();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn prop_extra_fields_preserved(key in "[a-z]{1,12}", value in ".{0,40}", ms in 0i64..4_000_000_000_000i64) {
        prop_assume!(key != "timestamp");
        let mut entry = serde_json::Map::new();
        entry.insert(key.clone(), serde_json::Value::String(value.clone()));
        entry.insert("timestamp".to_string(), serde_json::json!({ "date": ms }));
        let payload = serde_json::Value::Array(vec![entry.into()]).to_string();
        let records = transform_payload(&payload, DateTime::now()).unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].get_str(&key).unwrap(), value.as_str());
    }
}
