use crate::module::GirModule;
use std::fs;
use std::io;
use std::path::Path;

pub fn save_module(module: &GirModule, path: impl AsRef<Path>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(module)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}

pub fn load_module(path: impl AsRef<Path>) -> io::Result<GirModule> {
    let json = fs::read_to_string(path)?;
    let module =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(module)
}
