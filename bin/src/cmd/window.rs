//! Window command implementation.

use super::resolve_window;
use anyhow::Result;

/// Print the lookback window for `as_of` (or today).
pub(crate) fn show_window(as_of: Option<&str>) -> Result<()> {
    let window = resolve_window(as_of)?;

    println!("Start: {}", window.start());
    println!("End:   {}", window.end());

    Ok(())
}
