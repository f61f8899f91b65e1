use chrono::{FixedOffset, TimeZone};
use newplus_cli::variables::{BUILTIN_NAMES, builtins, builtins_at, resolve};
use regex::Regex;

#[test]
fn test_uuid_shape() {
    let re = Regex::new(
        r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    )
    .unwrap();
    for _ in 0..20 {
        let vars = builtins();
        assert!(re.is_match(&vars["UUID"]), "bad uuid {}", vars["UUID"]);
    }
}

#[test]
fn test_each_call_is_fresh() {
    let a = builtins();
    let b = builtins();
    assert_ne!(a["UUID"], b["UUID"]);
}

#[test]
fn test_offset_time_is_formatted_in_its_zone() {
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap();
    let vars = builtins_at(&now);

    assert_eq!(vars["DATETIME"], "2024-12-31 23:59:58");
    assert_eq!(vars["YEAR"], "2024");
    assert_eq!(vars["TIMESTAMP"], now.timestamp_millis().to_string());
}

#[test]
fn test_builtins_resolve_in_templates() {
    let vars = builtins();
    let out = resolve("$YEAR$-$MONTH$-$DAY$", &vars);
    assert_eq!(out, vars["DATE"]);

    for name in BUILTIN_NAMES {
        let token = format!("${name}$");
        assert_eq!(resolve(&token, &vars), vars[*name]);
    }
}
