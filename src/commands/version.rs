//! Version command

use crate::error::Result;

pub fn run() -> Result<()> {
    println!("skillfetch {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
