use std::ffi::OsStr;
use std::fs;
use std::io;
use std::io::{BufReader, Read};
use std::path::Path;

use log::trace;
use serde::de::DeserializeOwned;

mod macros;

pub fn toml_from_reader<R, T>(reader: R) -> anyhow::Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(reader);
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    Ok(toml::from_str(&data)?)
}

pub fn read(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    trace!("reading from: {}", path.as_ref().display());
    fs::read(path)
}

pub fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> io::Result<u64> {
    trace!(
        "copying {} to {}",
        from.as_ref().display(),
        to.as_ref().display()
    );
    fs::copy(from, to)
}

pub fn create_dir_all(path: impl AsRef<Path>) -> io::Result<()> {
    trace!("creating directory: {}", path.as_ref().display());
    fs::create_dir_all(path)
}

pub trait PathExt {
    #[must_use]
    fn has_extension<E>(&self, extension: E) -> bool
    where
        for<'a> &'a OsStr: PartialEq<E>;
}

impl PathExt for Path {
    fn has_extension<E>(&self, extension: E) -> bool
    where
        for<'a> &'a OsStr: PartialEq<E>,
    {
        self.extension().map_or(false, |ext| ext == extension)
    }
}

pub trait StrExt {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N];
}

impl StrExt for str {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N] {
        let mut split = self.splitn(N, pat);
        [(); N].map(|_| split.next())
    }
}
