//! Terminal output components.
//!
//! - [`table`]: renders reports and configuration as aligned tables.

pub mod table;
