
// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use blood_test::{
    create_default_blood_test_service, BloodTestService, BloodTestServiceError, BloodTestServiceTrait,
    PreparedRecord, StoredAnalysis,
};

// History queries are expressed with the repository filter
pub use my_lab_guide_data::repository::HistoryFilter;

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use crate::testing::create_mock_blood_test_service;
