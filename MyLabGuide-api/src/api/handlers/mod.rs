pub mod health;

#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use blood_test::{
    create_blood_test, delete_blood_tests, evaluate_blood_test, get_blood_test, get_blood_test_history,
    get_latest_blood_test,
};
pub use health::health_check;
