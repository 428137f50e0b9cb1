//! Pushes registration data and historical results into the event API:
//! wire bodies, the HTTP client with its narrow retry policy, and the
//! list readers.

mod client;
mod models;
mod register;
mod results;

pub use client::ApiClient;
pub use models::{AthleteUpload, GroupMemberUpdate, GroupUpload, TimetableFile};
pub use register::{
    DecathlonRow, KidsRow, read_decathlon_rows, read_kids_rows, upload_decathlon, upload_kids,
};
pub use results::{ResultsRow, read_results_rows, upload_results};
