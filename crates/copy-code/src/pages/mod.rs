mod demo;

pub use demo::{DemoPage, SAMPLES};
