pub use crate::batch::{prepare, validate, Payload, StatementsField};
pub use crate::error::{GuardError, GuardResult};
pub use crate::exec::{run_batch, BatchReport, ExecError, StatementExecutor, StatementOutcome};
pub use crate::guard::{KeywordGuard, DEFAULT_FORBIDDEN_KEYWORDS};
pub use crate::splitter::{
    normalize, split, split_statements, DollarTag, LexicalState, Segment, Segmentation, Segmenter,
    Statement,
};
