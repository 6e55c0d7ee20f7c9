//! Focused tests of dispatch and error types, using `MockClient`.

pub mod dispatch_test;
pub mod error_handling_test;
