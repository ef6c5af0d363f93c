//! Checker session: build phase and resolution phase.
//!
//! `build` runs the whole build phase on the calling thread in input order:
//! prelude (if enabled), user declarations, freeze, memo warm-up, bridges.
//! Any build error aborts; a half-built registry is never exposed.
//!
//! After that the session is immutable apart from the append-only type
//! interner and the flattening memo, and `check` may resolve call sites on
//! the rayon pool. Each worker records into its own `DiagnosticCollector`;
//! the per-chunk collectors are merged in chunk order.

use crate::diagnostics::{CallSiteId, DiagnosticCollector, Outcome, Report};
use crate::error::CheckError;
use crate::input::{BridgeRecord, CallSiteRecord, CheckInput};
use crate::options::CheckerOptions;
use crate::prelude;
use bridgeck_common::Atom;
use bridgeck_common::limits::RESOLUTION_CHUNK_SIZE;
use bridgeck_solver::{
    BridgeTable, CallSite, DeclarationInput, FlattenStats, HierarchyError, HierarchyFlattener,
    Instantiation, LoweringScope, MemberResolver, ParamList, RegistryBuilder, ResolutionError,
    ResolvedMember, TypeExpr, TypeFormatter, TypeId, TypeRegistry,
};
use rayon::prelude::*;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, trace};

pub struct CheckerSession {
    registry: Arc<TypeRegistry>,
    flattener: HierarchyFlattener,
    bridges: BridgeTable,
    options: CheckerOptions,
}

impl CheckerSession {
    pub fn build(
        declarations: Vec<DeclarationInput>,
        bridges: &[BridgeRecord],
        options: CheckerOptions,
    ) -> Result<Self, CheckError> {
        let intrinsics: Vec<&str> = options.intrinsic_types.iter().map(String::as_str).collect();
        let mut builder = RegistryBuilder::new(&options.top_type, &intrinsics);

        let mut bridge_records = Vec::with_capacity(bridges.len());
        if options.include_prelude {
            let prelude = prelude::collection_prelude()?;
            builder.register_all(prelude.declarations)?;
            bridge_records.extend(prelude.bridges);
        }
        builder.register_all(declarations)?;
        bridge_records.extend_from_slice(bridges);

        let registry = Arc::new(builder.freeze()?);
        let flattener = HierarchyFlattener::new(Arc::clone(&registry));
        if options.prewarm_flattening {
            flattener.prewarm();
        }

        let pairs = bridge_records
            .iter()
            .map(|record| {
                Ok((
                    registry.lookup(&record.read_only)?.id,
                    registry.lookup(&record.mutable)?.id,
                ))
            })
            .collect::<Result<Vec<_>, HierarchyError>>()?;
        let bridges = BridgeTable::build(&flattener, &pairs)?;

        info!(
            declarations = registry.declarations().len(),
            bridges = bridges.len(),
            prelude = options.include_prelude,
            "checker session built"
        );
        Ok(CheckerSession {
            registry,
            flattener,
            bridges,
            options,
        })
    }

    /// Build from a batch's declarations and bridges; its call sites are
    /// left for `check`.
    pub fn from_input(input: &CheckInput, options: CheckerOptions) -> Result<Self, CheckError> {
        Self::build(input.declarations.clone(), &input.bridges, options)
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn flattener(&self) -> &HierarchyFlattener {
        &self.flattener
    }

    pub fn bridges(&self) -> &BridgeTable {
        &self.bridges
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    pub fn flatten_stats(&self) -> FlattenStats {
        self.flattener.stats()
    }

    /// Turn a call-site record into a `CallSite`.
    ///
    /// Fails with `UnknownType` for unregistered or malformed type
    /// references and `ArityMismatch` for a receiver with the wrong number of
    /// type arguments. Nothing is resolved before the receiver is valid.
    ///
    /// The member name is looked up, not interned: a name no declaration
    /// uses lowers to `Atom::NONE`, which matches no member.
    pub fn lower_call_site(&self, record: &CallSiteRecord) -> Result<CallSite, HierarchyError> {
        let types = self.registry.types();
        let vars: SmallVec<[Atom; 2]> = record
            .type_parameters
            .iter()
            .map(|p| types.intern_name(p))
            .collect();
        let scope = LoweringScope::call_site(&vars);

        let receiver_decl = self.registry.lookup(&record.receiver_type)?.id;
        let receiver_args = self.lower_all(&record.receiver_type_arguments, &scope)?;
        let receiver = Instantiation::new(&self.registry, receiver_decl, &receiver_args)?;
        let arguments = self.lower_all(&record.argument_types, &scope)?;

        Ok(CallSite {
            receiver,
            member: types.lookup_name(&record.member_name).unwrap_or(Atom::NONE),
            arguments,
        })
    }

    fn lower_all(&self, texts: &[String], scope: &LoweringScope<'_>) -> Result<ParamList, HierarchyError> {
        texts
            .iter()
            .map(|text| {
                let expr: TypeExpr = text
                    .parse()
                    .map_err(|_| HierarchyError::UnknownType { name: text.clone() })?;
                self.registry.lower(&expr, scope)
            })
            .collect()
    }

    pub fn resolve(&self, call: &CallSite) -> Result<ResolvedMember, ResolutionError> {
        MemberResolver::new(&self.flattener, &self.bridges).resolve(call)
    }

    /// Lower, resolve and render one call site.
    pub fn outcome(&self, record: &CallSiteRecord) -> Outcome {
        match self.lower_call_site(record) {
            Ok(call) => self.render(&record.member_name, &self.resolve(&call)),
            Err(err) => {
                trace!(receiver = %record.receiver_type, error = %err, "call site rejected");
                Outcome::Rejected {
                    error: err.to_string(),
                    error_code: err.code(),
                }
            }
        }
    }

    fn render(&self, member_name: &str, result: &Result<ResolvedMember, ResolutionError>) -> Outcome {
        let fmt = TypeFormatter::new(&self.registry);
        let render_all =
            |tys: &[TypeId]| -> Vec<String> { tys.iter().map(|&t| fmt.format_type(t)).collect() };

        match result {
            Ok(resolved) => Outcome::Resolved {
                member: fmt.format_member(&resolved.member),
                return_type: fmt.format_type(resolved.member.return_type),
                declared_in: self.registry.name_of(resolved.member.owner).to_string(),
                flags: resolved.member.flags.keywords(),
            },
            Err(ResolutionError::UnknownMember {
                receiver,
                name: _,
                arity,
                declared_on_mutable,
            }) => Outcome::UnknownMember {
                receiver: fmt.format_type(*receiver),
                member: member_name.to_string(),
                arity: *arity,
                mutable_counterpart: declared_on_mutable.map(|d| self.registry.name_of(d).to_string()),
            },
            Err(ResolutionError::NoApplicableOverload {
                receiver,
                name: _,
                arguments,
                candidates,
            }) => Outcome::NoApplicableOverload {
                receiver: fmt.format_type(*receiver),
                member: member_name.to_string(),
                arguments: render_all(arguments.as_slice()),
                candidates: candidates.iter().map(|m| fmt.format_qualified_member(m)).collect(),
            },
            Err(ResolutionError::AmbiguousOverload {
                receiver,
                name: _,
                arguments,
                candidates,
            }) => Outcome::AmbiguousOverload {
                receiver: fmt.format_type(*receiver),
                member: member_name.to_string(),
                arguments: render_all(arguments.as_slice()),
                candidates: candidates.iter().map(|m| fmt.format_qualified_member(m)).collect(),
            },
        }
    }

    /// Resolve every call site and collect one outcome per site, in
    /// submission order. A failing call site never stops the batch.
    pub fn check(&self, call_sites: &[CallSiteRecord]) -> Report {
        let parallel = self.options.parallel && call_sites.len() >= self.options.parallel_threshold;
        debug!(call_sites = call_sites.len(), parallel, "checking call sites");

        let collector = if parallel {
            let chunks: Vec<DiagnosticCollector> = call_sites
                .par_chunks(RESOLUTION_CHUNK_SIZE)
                .enumerate()
                .map(|(chunk, records)| self.check_chunk(chunk * RESOLUTION_CHUNK_SIZE, records))
                .collect();
            let mut merged = DiagnosticCollector::with_capacity(call_sites.len());
            for local in chunks {
                merged.extend(local);
            }
            merged
        } else {
            self.check_chunk(0, call_sites)
        };

        let report = collector.report();
        let summary = report.summary();
        debug!(
            resolved = summary.resolved,
            failed = summary.failed,
            rejected = summary.rejected,
            "check complete"
        );
        report
    }

    fn check_chunk(&self, first_id: CallSiteId, records: &[CallSiteRecord]) -> DiagnosticCollector {
        let mut local = DiagnosticCollector::with_capacity(records.len());
        for (offset, record) in records.iter().enumerate() {
            local.record(first_id + offset, record.label.clone(), self.outcome(record));
        }
        local
    }
}

/// Build a session from `input` and check its call sites.
pub fn check_input(input: &CheckInput, options: CheckerOptions) -> Result<Report, CheckError> {
    let session = CheckerSession::from_input(input, options)?;
    Ok(session.check(&input.call_sites))
}

/// `check_input` over a JSON-encoded batch.
pub fn check_json(input: &str, options: CheckerOptions) -> Result<Report, CheckError> {
    let input: CheckInput = serde_json::from_str(input)?;
    check_input(&input, options)
}
