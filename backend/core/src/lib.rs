pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;

pub use error::ScanError;
pub use normalize::normalize_response;
pub use traits::{TableVision, VisionRequest};
pub use types::{ExtractionRecord, Grid, ProcessingResult};
