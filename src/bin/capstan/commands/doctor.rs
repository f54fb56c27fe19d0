//! `capstan doctor` command

use anyhow::Result;

use capstan::ops::{doctor, format_report};

pub fn execute(verbose: bool) -> Result<()> {
    let report = doctor();

    // Print the formatted report
    let output = format_report(&report, verbose);
    print!("{}", output);

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
