//! Log file handle
//!
//! The store reads and appends through one handle. [`LogFile`] is the seam
//! that lets callers hand in something other than a plain [`File`].

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;

/// A handle the log can be replayed from and appended to
pub trait LogFile: Read + Write + Seek + Send {
    /// Force written data to stable storage
    fn sync(&mut self) -> io::Result<()>;
}

impl LogFile for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

/// Open (creating if absent) a log file for reading and appending
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
}
