use super::Tokens;
use crate::mesh::Field;
use crate::StrError;
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Writes the nodal values of a field
///
/// The first line holds the number of variables per node; then, one value per line
/// (node-major). The parent directory is created if needed.
pub fn write_field_values<P>(path: &P, field: &Field) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(path);
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut buffer = String::new();
    format_values(field, &mut buffer).map_err(|_| "cannot format field values")?;
    fs::write(path, buffer).map_err(|_| "cannot write field file")
}

fn format_values(field: &Field, buffer: &mut String) -> std::fmt::Result {
    writeln!(buffer, "{}", field.n_vars())?;
    for v in field.values() {
        writeln!(buffer, "{:?}", v)?;
    }
    Ok(())
}

/// Reads the number of variables per node stored in a field file
pub fn read_field_n_vars<P>(path: &P) -> Result<usize, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let text = fs::read_to_string(Path::new(path)).map_err(|_| "cannot open field file")?;
    Tokens::new(&text).next()
}

/// Reads the nodal values of a field; see [write_field_values] for the format
pub fn read_field_values<P>(path: &P, field: &mut Field) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let text = fs::read_to_string(Path::new(path)).map_err(|_| "cannot open field file")?;
    let mut tokens = Tokens::new(&text);
    let n_vars: usize = tokens.next()?;
    if n_vars != field.n_vars() {
        return Err("the number of variables in the file is incompatible with the field");
    }
    let mut values: Vec<f64> = Vec::with_capacity(field.n_dof());
    for _ in 0..field.n_dof() {
        values.push(tokens.next().map_err(|_| "the number of values in the file is incompatible with the field")?);
    }
    if tokens.next_str().is_ok() {
        return Err("the number of values in the file is incompatible with the field");
    }
    field.set_values(&values)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
