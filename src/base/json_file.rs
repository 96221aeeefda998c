use crate::StrError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Reads a JSON file into a structure
///
/// # Input
///
/// * `full_path` -- may be a String, &str, or Path
pub fn read_json<T, P>(full_path: &P) -> Result<T, StrError>
where
    T: DeserializeOwned,
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    let file = File::open(path).map_err(|_| "cannot open file")?;
    let buffered = BufReader::new(file);
    let data = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
    Ok(data)
}

/// Writes a structure to a JSON file (creating the parent directory if needed)
///
/// # Input
///
/// * `full_path` -- may be a String, &str, or Path
pub fn write_json<T, P>(data: &T, full_path: &P) -> Result<(), StrError>
where
    T: Serialize,
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut file = File::create(&path).map_err(|_| "cannot create file")?;
    serde_json::to_writer_pretty(&mut file, data).map_err(|_| "cannot write file")?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
