use chessbot::search::tt::CachePolicy;
use chessbot::{ConfigError, SearchParams};
use pretty_assertions::assert_eq;
use std::fs::{create_dir_all, write};

#[test]
fn defaults() {
    let p = SearchParams::default();
    assert_eq!(p.max_depth, 3);
    assert_eq!(p.max_time_ms, 5_000);
    assert!(p.use_tt);
    assert_eq!(p.cache_policy, CachePolicy::DepthOnly);
}

#[test]
fn json_round_trip_and_errors() {
    let dir = std::path::Path::new("target/params_test");
    create_dir_all(dir).unwrap();

    let p = SearchParams {
        max_depth: 6,
        max_time_ms: 250,
        use_tt: false,
        tt_entries: 1024,
        cache_policy: CachePolicy::Bounded,
    };
    let good = dir.join("good.json");
    write(&good, serde_json::to_string_pretty(&p).unwrap()).unwrap();
    assert_eq!(SearchParams::from_json_file(&good).unwrap(), p);

    let bad = dir.join("bad.json");
    write(&bad, "{ \"max_depth\": \"deep\" }").unwrap();
    assert!(matches!(SearchParams::from_json_file(&bad), Err(ConfigError::Parse { .. })));

    let absent = SearchParams::from_json_file(&dir.join("absent.json"));
    assert!(matches!(absent, Err(ConfigError::Io { .. })));
}
