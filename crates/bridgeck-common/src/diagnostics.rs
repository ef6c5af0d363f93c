//! Diagnostic codes and message templates.
//!
//! The checker never renders diagnostics itself. It attaches a stable code
//! to every outcome so an external renderer can key its own messages; the
//! templates here are the default English wording with `{0}`-style holes.

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticCategory {
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Resolution outcomes (one per call site)
    pub const RESOLVED: u32 = 1000;
    pub const UNKNOWN_MEMBER: u32 = 2001;
    pub const UNKNOWN_MEMBER_ON_READ_ONLY: u32 = 2002;
    pub const NO_APPLICABLE_OVERLOAD: u32 = 2003;
    pub const AMBIGUOUS_OVERLOAD: u32 = 2004;
    pub const REJECTED_CALL_SITE: u32 = 2005;

    // Build-time failures
    pub const DUPLICATE_DECLARATION: u32 = 3001;
    pub const CYCLIC_HIERARCHY: u32 = 3002;
    pub const UNKNOWN_TYPE: u32 = 3003;
    pub const ARITY_MISMATCH: u32 = 3004;
    pub const INCOMPATIBLE_BRIDGE: u32 = 3005;
}

use diagnostic_codes as codes;

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: codes::RESOLVED,
        category: DiagnosticCategory::Message,
        message: "Call resolved to '{0}'.",
    },
    DiagnosticMessage {
        code: codes::UNKNOWN_MEMBER,
        category: DiagnosticCategory::Error,
        message: "Cannot resolve method '{0}' on '{1}'.",
    },
    DiagnosticMessage {
        code: codes::UNKNOWN_MEMBER_ON_READ_ONLY,
        category: DiagnosticCategory::Error,
        message: "Cannot resolve method '{0}' on read-only '{1}'; it is declared on '{2}'.",
    },
    DiagnosticMessage {
        code: codes::NO_APPLICABLE_OVERLOAD,
        category: DiagnosticCategory::Error,
        message: "No overload of '{0}' accepts arguments ({1}).",
    },
    DiagnosticMessage {
        code: codes::AMBIGUOUS_OVERLOAD,
        category: DiagnosticCategory::Error,
        message: "Ambiguous call to '{0}': {1} overloads match equally well.",
    },
    DiagnosticMessage {
        code: codes::REJECTED_CALL_SITE,
        category: DiagnosticCategory::Error,
        message: "Call site could not be checked: {0}",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_DECLARATION,
        category: DiagnosticCategory::Error,
        message: "Duplicate declaration '{0}'.",
    },
    DiagnosticMessage {
        code: codes::CYCLIC_HIERARCHY,
        category: DiagnosticCategory::Error,
        message: "'{0}' is a supertype of itself: {1}.",
    },
    DiagnosticMessage {
        code: codes::UNKNOWN_TYPE,
        category: DiagnosticCategory::Error,
        message: "Cannot find type '{0}'.",
    },
    DiagnosticMessage {
        code: codes::ARITY_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' expects {1} type argument(s) but got {2}.",
    },
    DiagnosticMessage {
        code: codes::INCOMPATIBLE_BRIDGE,
        category: DiagnosticCategory::Error,
        message: "'{1}' does not expose every member of read-only '{0}': {2}.",
    },
];

pub fn get_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_message(code).map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
