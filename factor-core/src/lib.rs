pub mod environment;
pub mod error;
pub mod expression;
pub mod factors;
pub mod format;
pub mod session;

pub use environment::{Builtins, Environment, Variables};
pub use error::CalcError;
pub use factors::Factor;
pub use session::{EntryKind, Response, Session, SessionState, TranscriptEntry};
