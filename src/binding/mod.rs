/// Trigger Variable Binding
///
/// Node configuration strings may embed template expressions such as
/// `{{trigger.body.email}}` that defer a value to runtime. This module owns
/// the tiny expression grammar (extraction and well-formedness) and the
/// submission-payload shaping that nests trigger-origin fields under a
/// `body` envelope for trigger nodes.
///
/// Everything here is deterministic and side-effect-free: re-running on
/// identical input always yields identical output, which retries rely on.

// Expression extraction and well-formedness checks
pub mod expression;

// Trigger field collection and per-node submission shaping
pub mod binder;

pub use binder::{collect_trigger_fields, prepare_submission};
pub use expression::{extract_expressions, is_well_formed, trigger_fields_in};
