//! Case files compiled into the binary.

use std::path::Path;

use anyhow::Result;

use crate::model::CaseFile;
use crate::parser::parse_case_str;

const HIGH_SEAS: &str = include_str!("../cases/high-seas.toml");

/// "Murder at High Seas", the reference case (id `1`).
pub fn high_seas() -> Result<CaseFile> {
    parse_case_str(HIGH_SEAS, Path::new("builtin/high-seas.toml"))
}

/// Every built-in case.
pub fn builtin_cases() -> Result<Vec<CaseFile>> {
    Ok(vec![high_seas()?])
}
