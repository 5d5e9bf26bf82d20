pub mod estimator;
pub mod report;
