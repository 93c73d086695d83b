mod reconcile_tests;
mod store_failure_tests;
