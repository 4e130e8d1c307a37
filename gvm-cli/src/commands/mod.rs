pub mod arch;
pub mod goroot;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod use_version;
pub mod version;

use gvm_core::console;
use gvm_core::switch::SwitchReport;

/// Only the first operand after the command is used.
pub fn warn_extra_operands(extra: &[String]) {
    if !extra.is_empty() {
        console::warn("Too many args: gvm expects 2 maximum.");
    }
}

/// Same rule for commands that take no operand of their own.
pub fn warn_unused_operands(operands: &[String]) {
    if operands.len() > 1 {
        warn_extra_operands(&operands[1..]);
    }
}

pub fn path_suffix(report: &SwitchReport) -> &'static str {
    if report.path_updated.is_empty() {
        " PATH already pointed there."
    } else {
        " Also updated PATH."
    }
}
