//! Tag propagation verification engine.
//!
//! Verifies that per-principal tags introduced into an IAM
//! authorization export survive every stage of the reporting pipeline:
//! raw import, synthesized domain model, serialized results, rendered
//! UI source, and the compiled UI bundle.
//!
//! ```text
//! load_export --> AuthorizationExport --> synthesize --> ResultsDocument
//!                                                             |
//!                          +----------------+-----------------+
//!                          |                |                 |
//!                   structural checks  rendering check  artifact check
//!                          |                |                 |
//!                          +------> VerifyRunner ------> VerifySummary
//! ```

pub mod authz;
pub mod checks;
pub mod model;
pub mod report;
pub mod runner;

pub use authz::{AuthorizationExport, GroupDetail, RoleDetail, UserDetail, load_export};
pub use checks::{Check, CheckContext};
pub use model::{GroupRecord, ResultsDocument, RoleRecord, UserRecord, synthesize};
pub use report::{ReportOutcome, ReportRenderer, write_report};
pub use runner::{VerifyRunner, VerifyRunnerBuilder, VerifySummary};
