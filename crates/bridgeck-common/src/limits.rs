//! Centralized limits and thresholds for the checker.
//!
//! Shared constants for traversal depths, pre-allocation sizes and
//! scheduling thresholds. Keeping them in one place prevents the solver and
//! the checker from drifting apart on the same limit.

// =============================================================================
// Traversal Limits
// =============================================================================

/// Maximum number of instantiations expanded by one assignability check.
///
/// Widening follows supertype edges and the mutable -> read-only bridge
/// edge. A bridge whose read-only side inherits from its mutable side with
/// growing arguments (`R<T> : M<Box<T>>`) produces an endless stream of new
/// instantiations; the search stops at this bound and answers "not
/// assignable" with a `warn!` event.
pub const MAX_WIDENING_STEPS: usize = 4096;

/// Maximum nesting depth of a type expression (`A<B<C<...>>>`).
///
/// Type expressions are parsed recursively; deeper input is rejected as
/// malformed rather than risking a stack overflow.
pub const MAX_TYPE_EXPR_DEPTH: u32 = 64;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Inline capacity for member parameter lists.
///
/// Nearly every collection member takes at most two parameters, so four
/// inline slots keep member signatures off the heap.
pub const INLINE_PARAMS: usize = 4;

/// Initial capacity of a flattening buffer.
pub const FLATTEN_INITIAL_CAPACITY: usize = 32;

// =============================================================================
// Scheduling
// =============================================================================

/// Number of call sites below which resolution stays on the calling thread.
///
/// Resolving one call site against a warm memo table is a handful of id
/// comparisons; spreading fewer than this many across the rayon pool costs
/// more in scheduling than it saves.
pub const PARALLEL_RESOLUTION_THRESHOLD: usize = 64;

/// Call sites handed to one worker at a time during parallel resolution.
///
/// Each chunk is resolved into a worker-local buffer; buffers are merged in
/// chunk order so the report keeps submission order.
pub const RESOLUTION_CHUNK_SIZE: usize = 32;
