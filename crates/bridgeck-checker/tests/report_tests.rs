//! Diagnostic Collector ordering and the JSON shape of reports.

use bridgeck_checker::{DiagnosticCollector, Outcome, Report};
use bridgeck_common::DiagnosticCategory;
use bridgeck_common::diagnostics::diagnostic_codes;
use serde_json::json;

fn unknown(member: &str) -> Outcome {
    Outcome::UnknownMember {
        receiver: "ICollection<E>".to_string(),
        member: member.to_string(),
        arity: 0,
        mutable_counterpart: None,
    }
}

fn resolved(member: &str) -> Outcome {
    Outcome::Resolved {
        member: format!("{member}(): int"),
        return_type: "int".to_string(),
        declared_in: "CCollection".to_string(),
        flags: Vec::new(),
    }
}

#[test]
fn test_report_is_in_call_site_order() {
    // Two worker buffers merged out of order.
    let mut late = DiagnosticCollector::new();
    late.record(2, None, resolved("c"));
    late.record(3, None, unknown("d"));
    let mut early = DiagnosticCollector::new();
    early.record(0, None, resolved("a"));
    early.record(1, Some("Use.java:7".to_string()), unknown("b"));

    let mut merged = DiagnosticCollector::new();
    merged.extend(late);
    merged.extend(early);
    assert_eq!(merged.len(), 4);

    let report = merged.report();
    let ids: Vec<_> = report.iter().map(|e| e.call_site_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(report.get(1).unwrap().label.as_deref(), Some("Use.java:7"));
    assert!(report.get(9).is_none());
}

#[test]
fn test_failures_do_not_hide_other_outcomes() {
    let mut collector = DiagnosticCollector::new();
    collector.record(0, None, unknown("a"));
    collector.record(
        1,
        None,
        Outcome::Rejected {
            error: "cannot find type `Missing`".to_string(),
            error_code: diagnostic_codes::UNKNOWN_TYPE,
        },
    );
    collector.record(2, None, resolved("c"));

    let report = collector.report();
    let summary = report.summary();
    assert_eq!((summary.resolved, summary.failed, summary.rejected), (1, 1, 1));
    assert!(report.has_errors());
    assert_eq!(report.get(1).unwrap().code, diagnostic_codes::REJECTED_CALL_SITE);
}

#[test]
fn test_entry_codes_and_categories() {
    let mut collector = DiagnosticCollector::new();
    collector.record(0, None, resolved("a"));
    collector.record(
        1,
        None,
        Outcome::UnknownMember {
            receiver: "ICollection<E>".to_string(),
            member: "getSize".to_string(),
            arity: 0,
            mutable_counterpart: Some("CCollection".to_string()),
        },
    );
    let report = collector.report();

    assert_eq!(report.entries[0].code, diagnostic_codes::RESOLVED);
    assert_eq!(report.entries[0].category, DiagnosticCategory::Message);
    assert_eq!(report.entries[1].code, diagnostic_codes::UNKNOWN_MEMBER_ON_READ_ONLY);
    assert_eq!(report.entries[1].category, DiagnosticCategory::Error);
}

#[test]
fn test_json_shape() {
    let mut collector = DiagnosticCollector::new();
    collector.record(0, Some("site-a".to_string()), resolved("getSize"));
    collector.record(
        1,
        None,
        Outcome::AmbiguousOverload {
            receiver: "Sink".to_string(),
            member: "put".to_string(),
            arguments: vec!["AB".to_string()],
            candidates: vec!["Sink.put(A): void".to_string(), "Sink.put(B): void".to_string()],
        },
    );
    let report = collector.report();

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "entries": [
                {
                    "callSiteId": 0,
                    "label": "site-a",
                    "code": 1000,
                    "category": "message",
                    "outcome": {
                        "kind": "resolved",
                        "member": "getSize(): int",
                        "returnType": "int",
                        "declaredIn": "CCollection",
                        "flags": []
                    }
                },
                {
                    "callSiteId": 1,
                    "code": 2004,
                    "category": "error",
                    "outcome": {
                        "kind": "ambiguousOverload",
                        "receiver": "Sink",
                        "member": "put",
                        "arguments": ["AB"],
                        "candidates": ["Sink.put(A): void", "Sink.put(B): void"]
                    }
                }
            ]
        })
    );
}

#[test]
fn test_empty_report() {
    let report = DiagnosticCollector::new().report();
    assert!(report.is_empty());
    assert!(!report.has_errors());
    assert_eq!(report, Report::default());
    assert_eq!(report.to_json().unwrap(), r#"{"entries":[]}"#);
}
