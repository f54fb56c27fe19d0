//! Environment health checks.
//!
//! The `doctor` command performs fast environment checks to verify that
//! the tools the export pipeline shells out to are available.
//!
//! ## Usage
//!
//! ```bash
//! capstan doctor           # Quick check
//! capstan doctor --verbose # Detailed output
//! ```
//!
//! ## Checks Performed
//!
//! - poetry availability (required)
//! - Python interpreter availability (optional)

use std::collections::HashMap;
use std::path::PathBuf;

use crate::tool::{POETRY_INSTALL_HINT, POETRY_PROGRAM};
use crate::util::process::{find_executable, ProcessBuilder};

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    pub path: Option<PathBuf>,

    /// Version string (if applicable)
    pub version: Option<String>,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            version: None,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the tool path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Environment information
    pub environment: HashMap<String, String>,
}

impl DoctorReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        DoctorReport {
            checks: Vec::new(),
            environment: HashMap::new(),
        }
    }

    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Get the count of passed checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get the count of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Get the count of required failed checks.
    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }
}

impl Default for DoctorReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the doctor command.
pub fn doctor() -> DoctorReport {
    let mut report = DoctorReport::new();

    // Collect environment info
    report
        .environment
        .insert("os".to_string(), std::env::consts::OS.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());

    report.add(check_poetry());
    report.add(check_python());

    report
}

/// Check for the poetry CLI.
fn check_poetry() -> CheckResult {
    match tool_version(POETRY_PROGRAM) {
        Some((path, version)) => CheckResult::pass("poetry", "poetry is available")
            .with_path(path)
            .with_version(version),
        None => CheckResult::fail(
            "poetry",
            format!("poetry not found; install it from {}", POETRY_INSTALL_HINT),
        ),
    }
}

/// Check for a Python interpreter.
fn check_python() -> CheckResult {
    for interpreter in ["python3", "python"] {
        if let Some((path, version)) = tool_version(interpreter) {
            return CheckResult::pass("Python", format!("Found {}", interpreter))
                .with_path(path)
                .with_version(version)
                .optional();
        }
    }

    CheckResult::fail(
        "Python",
        "No Python interpreter found (tried python3, python)",
    )
    .optional()
}

/// Look up a tool on PATH and ask it for its version.
fn tool_version(name: &str) -> Option<(PathBuf, String)> {
    let path = find_executable(name)?;

    if let Ok(output) = ProcessBuilder::new(name).arg("--version").output() {
        // Some interpreters print the version to stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr)
        } else {
            String::from_utf8_lossy(&output.stdout)
        };

        if let Some(line) = text.lines().find(|l| !l.trim().is_empty()) {
            return Some((path, line.trim().to_string()));
        }
    }

    // Tool exists but couldn't get version
    Some((path, "unknown version".to_string()))
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    writeln!(output, "Capstan Doctor").unwrap();
    writeln!(output, "==============\n").unwrap();

    // Environment
    if verbose {
        writeln!(output, "Environment:").unwrap();
        writeln!(
            output,
            "  OS: {} ({})",
            report
                .environment
                .get("os")
                .unwrap_or(&"unknown".to_string()),
            report
                .environment
                .get("arch")
                .unwrap_or(&"unknown".to_string())
        )
        .unwrap();
        writeln!(output).unwrap();
    }

    // Checks
    writeln!(output, "Checks:").unwrap();
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };

        writeln!(output, "  {} {}{}", status, check.name, required).unwrap();

        if verbose {
            writeln!(output, "      {}", check.message).unwrap();
            if let Some(path) = &check.path {
                writeln!(output, "      Path: {}", path.display()).unwrap();
            }
            if let Some(version) = &check.version {
                writeln!(output, "      Version: {}", version).unwrap();
            }
        }
    }

    writeln!(output).unwrap();

    // Summary
    let passed = report.passed_count();
    let failed = report.failed_count();
    let required_failed = report.required_failed_count();

    writeln!(output, "Summary: {} passed, {} failed", passed, failed).unwrap();

    if required_failed > 0 {
        writeln!(
            output,
            "\nWarning: {} required check(s) failed. Exports will not work.",
            required_failed
        )
        .unwrap();
    } else if failed > 0 {
        writeln!(
            output,
            "\nAll required checks passed. {} optional check(s) failed.",
            failed
        )
        .unwrap();
    } else {
        writeln!(output, "\nAll checks passed. Capstan is ready to use.").unwrap();
    }

    output
}
