//! App-level tests: gesture routing and the capture → OCR → translate pipeline
//! driven through fakes, no display or network involved.

mod fakes;
mod pipeline_tests;
mod router_tests;
