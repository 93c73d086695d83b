mod assembly_tests;
mod event_tests;
mod submit_tests;
