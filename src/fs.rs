use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io,
    ops::Deref,
    path::{Path, PathBuf},
};

use memmap2::{Mmap, MmapMut};

/// Input bytes, either mapped from a file or read into memory.
pub enum Source {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl Deref for Source {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Source::Mapped(mmap) => &mmap[..],
            Source::Buffered(buffer) => &buffer[..],
        }
    }
}

/// Maps `path` into memory. Empty files are not mapped, a zero length
/// mapping is rejected by the OS.
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Source> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Source::Buffered(Vec::new()));
    }

    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Source::Mapped(mmap))
}

/// Writes `buffer` to a sibling `<path>.<pid>.part` file and renames it over
/// `path`, so `path` is either untouched or complete. An existing file with
/// the part name is never opened or removed.
pub fn write_file<P: AsRef<Path>>(path: P, buffer: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&partial)?;

    let result = write_mapped(&file, buffer).and_then(|()| fs::rename(&partial, path));
    drop(file);
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

fn write_mapped(file: &File, buffer: &[u8]) -> io::Result<()> {
    file.set_len(buffer.len() as u64)?;
    if buffer.is_empty() {
        return Ok(());
    }

    let mut mmap = unsafe { MmapMut::map_mut(file)? };
    mmap.copy_from_slice(buffer);
    mmap.flush()
}

fn partial_path(path: &Path) -> PathBuf {
    let mut partial: OsString = path.as_os_str().to_owned();
    partial.push(format!(".{}.part", std::process::id()));
    partial.into()
}
