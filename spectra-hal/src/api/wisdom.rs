use std::path::Path;

use crate::{error::Result, layouts::Backend};

/// Exports the accumulated planner wisdom.
pub trait WisdomExport<B: Backend> {
    fn export_wisdom_to_string(&self) -> Result<String>;
    fn export_wisdom_to_file(&self, path: &Path) -> Result<()>;
}

/// Merges wisdom into the planner.
pub trait WisdomImport<B: Backend> {
    fn import_wisdom_from_string(&self, wisdom: &str) -> Result<()>;
    fn import_wisdom_from_file(&self, path: &Path) -> Result<()>;
    fn import_system_wisdom(&self) -> Result<()>;
}

/// Discards all accumulated wisdom.
pub trait WisdomForget<B: Backend> {
    fn forget_wisdom(&self);
}
