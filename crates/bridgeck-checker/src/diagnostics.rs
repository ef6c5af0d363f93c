//! Diagnostic Collector and the serializable report.
//!
//! The collector only appends. The session gives every rayon worker its own
//! collector and merges them in chunk order, so nothing here is shared
//! between threads. `report` orders entries by call-site id, which is the
//! submission index.

use crate::error::CheckError;
use bridgeck_common::DiagnosticCategory;
use bridgeck_common::diagnostics::{diagnostic_codes, get_message};
use serde::Serialize;

/// Submission index of a call site within its batch.
pub type CallSiteId = usize;

/// Outcome of one call site, with every type already rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Outcome {
    Resolved {
        /// Substituted signature, e.g. `contains(String): bool`.
        member: String,
        return_type: String,
        /// Declaration that introduced the member.
        declared_in: String,
        flags: Vec<&'static str>,
    },
    UnknownMember {
        receiver: String,
        member: String,
        arity: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        mutable_counterpart: Option<String>,
    },
    NoApplicableOverload {
        receiver: String,
        member: String,
        arguments: Vec<String>,
        candidates: Vec<String>,
    },
    AmbiguousOverload {
        receiver: String,
        member: String,
        arguments: Vec<String>,
        candidates: Vec<String>,
    },
    /// The receiver or an argument type could not be constructed.
    Rejected { error: String, error_code: u32 },
}

impl Outcome {
    pub fn code(&self) -> u32 {
        match self {
            Outcome::Resolved { .. } => diagnostic_codes::RESOLVED,
            Outcome::UnknownMember {
                mutable_counterpart: Some(_),
                ..
            } => diagnostic_codes::UNKNOWN_MEMBER_ON_READ_ONLY,
            Outcome::UnknownMember { .. } => diagnostic_codes::UNKNOWN_MEMBER,
            Outcome::NoApplicableOverload { .. } => diagnostic_codes::NO_APPLICABLE_OVERLOAD,
            Outcome::AmbiguousOverload { .. } => diagnostic_codes::AMBIGUOUS_OVERLOAD,
            Outcome::Rejected { .. } => diagnostic_codes::REJECTED_CALL_SITE,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved { .. })
    }

    pub fn category(&self) -> DiagnosticCategory {
        get_message(self.code()).map_or(DiagnosticCategory::Error, |m| m.category)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub call_site_id: CallSiteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    entries: Vec<ReportEntry>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        DiagnosticCollector {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, call_site_id: CallSiteId, label: Option<String>, outcome: Outcome) {
        self.entries.push(ReportEntry {
            call_site_id,
            label,
            code: outcome.code(),
            category: outcome.category(),
            outcome,
        });
    }

    /// Append another collector's entries after this one's.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn report(mut self) -> Report {
        self.entries.sort_by_key(|e| e.call_site_id);
        Report {
            entries: self.entries,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub resolved: usize,
    pub failed: usize,
    pub rejected: usize,
}

/// One entry per submitted call site, in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: CallSiteId) -> Option<&ReportEntry> {
        self.entries
            .binary_search_by_key(&id, |e| e.call_site_id)
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for entry in &self.entries {
            match entry.outcome {
                Outcome::Resolved { .. } => summary.resolved += 1,
                Outcome::Rejected { .. } => summary.rejected += 1,
                _ => summary.failed += 1,
            }
        }
        summary
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| !e.outcome.is_resolved())
    }

    pub fn to_json(&self) -> Result<String, CheckError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
