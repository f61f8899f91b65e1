use newplus_cli::test_utils::init_test_logging;
use newplus_cli::variables::{MAX_PASSES, VariableMap, resolve, resolve_with_report};

fn vars(pairs: &[(&str, &str)]) -> VariableMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_text_without_tokens_is_unchanged() {
    let v = vars(&[("NAME", "World")]);
    for text in ["", "plain text", "costs $5", "$lower$", "a $ b $ c", "$$"] {
        assert_eq!(resolve(text, &v), text);
    }
}

#[test]
fn test_known_tokens_are_all_replaced() {
    let v = vars(&[("A", "1"), ("B", "2"), ("C_3", "3")]);
    let out = resolve("$A$-$B$-$C_3$-$A$", &v);
    assert_eq!(out, "1-2-3-1");
    assert!(!out.contains('$'));
}

#[test]
fn test_unknown_tokens_are_preserved() {
    let v = vars(&[("DATE", "2025-10-06")]);
    assert_eq!(resolve("$DATE$-$UNKNOWN$", &v), "2025-10-06-$UNKNOWN$");
}

#[test]
fn test_resolution_is_idempotent_when_complete() {
    let v = vars(&[("GREETING", "Hello $NAME$"), ("NAME", "World")]);
    let once = resolve("$GREETING$! $GREETING$?", &v);
    assert_eq!(once, "Hello World! Hello World?");
    assert_eq!(resolve(&once, &v), once);
}

#[test]
fn test_transitive_chain() {
    let v = vars(&[("A", "$B$"), ("B", "$C$"), ("C", "done")]);
    assert_eq!(resolve("$A$", &v), "done");

    let v = vars(&[("A", "$B$"), ("B", "value")]);
    assert_eq!(resolve("$A$", &v), "value");
}

#[test]
fn test_self_reference_terminates() {
    let v = vars(&[("X", "$X$")]);
    let report = resolve_with_report("$X$", &v);
    assert!(report.text.contains("$X$"));
    assert_eq!(report.cycles, vec!["X"]);
    assert!(!report.limit_reached);
}

#[test]
fn test_mutual_reference_terminates() {
    let v = vars(&[("A", "a($B$)"), ("B", "b($A$)")]);
    assert_eq!(resolve("$A$", &v), "a(b($A$))");
    assert_eq!(resolve("$B$", &v), "b(a($B$))");
}

#[test]
fn test_name_used_in_unrelated_places() {
    let v = vars(&[("A", "$B$"), ("B", "x")]);
    assert_eq!(resolve("$B$ $A$ $B$", &v), "x x x");
}

#[test]
fn test_pass_limit() {
    init_test_logging(None);
    let mut v = VariableMap::new();
    for i in 0..=MAX_PASSES {
        v.insert(format!("V{i}"), format!("$V{}$", i + 1));
    }
    v.insert(format!("V{}", MAX_PASSES + 1), "end".to_string());

    let report = resolve_with_report("$V0$", &v);
    assert!(report.limit_reached);
    assert_eq!(report.passes, MAX_PASSES);
    assert_eq!(report.text, format!("$V{MAX_PASSES}$"));
}

#[test]
fn test_values_with_dollar_signs_are_literal() {
    let v = vars(&[("PRICE", "$5"), ("NEXT", "$")]);
    assert_eq!(resolve("$PRICE$ $NEXT$UNKNOWN$", &v), "$5 $UNKNOWN$");
}

#[test]
fn test_empty_map_returns_input() {
    let report = resolve_with_report("$A$ stays", &VariableMap::new());
    assert_eq!(report.text, "$A$ stays");
    assert_eq!(report.unresolved, vec!["A"]);
    assert_eq!(report.passes, 0);
}

#[test]
fn test_no_further_pass_changes_output() {
    let fragments = ["", "x", "$", "$$", "$A", "A$", "$B", "B$", "$C", "C$", "$A$", "$B$", "$C"];
    let templates = ["$A$B$", "$B$A$", "$A$$B$", "$A$C$", "$$A$$", "$A$ $B$ $C$", "$C$B$A$"];

    for a in fragments {
        for b in fragments {
            let v = vars(&[("A", a), ("B", b), ("C", "c")]);
            for template in templates {
                let report = resolve_with_report(template, &v);
                if report.limit_reached || !report.cycles.is_empty() {
                    continue;
                }
                assert_eq!(
                    resolve(&report.text, &v),
                    report.text,
                    "template {template:?} with A={a:?} B={b:?}"
                );
            }
        }
    }
}
