pub mod insights;
pub mod series;
