pub mod binding;
pub mod decode;
pub mod error;
pub mod formatter;
pub mod ordered;
pub mod record;
pub mod wrap;

pub use binding::Binding;
pub use decode::{decode_records, read_records};
pub use error::CoreError;
pub use formatter::{Formatter, RecordFormatter};
pub use record::{
    CommandInfo, DiagnosticRecord, ExceptionInfo, LogMessage, MemoryUsage, NamedTimer, Query,
    RequestInfo, Timing,
};
