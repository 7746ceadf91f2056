
pub use blood_test::{CreateStoredBloodTest, StoredBloodTest};
