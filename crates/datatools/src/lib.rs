pub mod error;
pub mod normalize;
pub mod reader;
pub mod rename;
pub mod roster;
pub mod sheet;
pub mod upload;

pub use error::{DataToolsError, Result};
pub use normalize::{DisciplineKind, RawValue};
pub use rename::{MatchMode, RenameOutcome, RenamePropagator};
pub use sheet::{CellWrite, Workbook};
pub use upload::ApiClient;
