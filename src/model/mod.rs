pub mod classification;
pub mod record;
pub mod response;
pub mod thresholds;
