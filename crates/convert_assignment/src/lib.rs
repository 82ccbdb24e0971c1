// crates/convert_assignment/src/lib.rs

//! Produces the student version of an assignment file or directory.

pub mod assignment;
pub mod cli;
pub mod config;
pub mod file_converter;
pub mod logging;

pub use assignment::{convert_assignment, AssignmentConverter, ConversionReport, GENERATED_LOCATION_NAME};
pub use config::{AppConfig, ConvertOptions};
pub use file_converter::{DefaultFileConverter, FileConverter, FileOutcome};
