// Public entities for the MyLabGuide API
// This module contains data structures that are shared across the application boundary


// Common entities for error handling, pagination, etc.
pub mod common;
