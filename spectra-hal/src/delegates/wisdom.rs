use std::path::Path;

use crate::{
    api::{WisdomExport, WisdomForget, WisdomImport},
    error::{Error, Result},
    layouts::{Backend, Engine},
    oep::WisdomImpl,
};

impl<B> WisdomExport<B> for Engine<B>
where
    B: Backend + WisdomImpl<B>,
{
    fn export_wisdom_to_string(&self) -> Result<String> {
        B::export_wisdom_to_string_impl().ok_or_else(|| Error::wisdom("export wisdom to a string"))
    }

    fn export_wisdom_to_file(&self, path: &Path) -> Result<()> {
        if !B::export_wisdom_to_file_impl(path) {
            return Err(Error::wisdom(format!("export wisdom to '{}'", path.display())));
        }
        Ok(())
    }
}

impl<B> WisdomImport<B> for Engine<B>
where
    B: Backend + WisdomImpl<B>,
{
    fn import_wisdom_from_string(&self, wisdom: &str) -> Result<()> {
        if !B::import_wisdom_from_string_impl(wisdom) {
            return Err(Error::wisdom("import wisdom from a string"));
        }
        Ok(())
    }

    fn import_wisdom_from_file(&self, path: &Path) -> Result<()> {
        if !B::import_wisdom_from_file_impl(path) {
            return Err(Error::wisdom(format!("import wisdom from '{}'", path.display())));
        }
        Ok(())
    }

    fn import_system_wisdom(&self) -> Result<()> {
        if !B::import_system_wisdom_impl() {
            return Err(Error::wisdom("import system wisdom"));
        }
        Ok(())
    }
}

impl<B> WisdomForget<B> for Engine<B>
where
    B: Backend + WisdomImpl<B>,
{
    fn forget_wisdom(&self) {
        log::debug!("{}: forgetting wisdom", B::NAME);
        B::forget_wisdom_impl()
    }
}
