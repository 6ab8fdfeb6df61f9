use anyhow::Result;

use crate::report;

pub fn execute() -> Result<()> {
    report::print_preset_list();
    Ok(())
}
