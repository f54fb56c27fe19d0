//! High-level operations.
//!
//! This module contains the implementation of Capstan commands.

pub mod doctor;
pub mod export_requirements;

pub use doctor::{doctor, format_report, DoctorReport};
pub use export_requirements::{
    export_requirements, ExportOptions, ExportOutcome, SkipReason, OUTPUT_DIR, REQUIREMENTS_FILE,
};
