//!
//! Buffered file copy with append semantics
//!
use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

/// Size of the intermediate copy buffer
const COPY_BUFFER_SIZE: usize = 2048;

/// File copy error
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("unable to open \"{}\" for reading: {source}", .path.display())]
    /// Source cannot be opened
    SourceError { path: PathBuf, source: io::Error },

    #[error("unable to open \"{}\" for appending: {source}", .path.display())]
    /// Destination cannot be opened
    DestinationError { path: PathBuf, source: io::Error },

    #[error("unable to copy to \"{}\": {source}", .path.display())]
    /// Transfer failed before the end of the source was reached
    TransferError { path: PathBuf, source: io::Error },
}

/// Append the full content of `from` to `to`. The destination is created if
/// missing and extended otherwise, so repeated calls concatenate; callers
/// wanting a fresh file must remove it first.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), CopyError> {
    let mut src = File::open(from).map_err(|source| CopyError::SourceError {
        path: from.to_owned(),
        source,
    })?;
    let mut dst = OpenOptions::new()
        .create(true)
        .append(true)
        .open(to)
        .map_err(|source| CopyError::DestinationError {
            path: to.to_owned(),
            source,
        })?;

    copy_stream(&mut src, &mut dst).map_err(|source| CopyError::TransferError {
        path: to.to_owned(),
        source,
    })
}

/// Copy until end of source. A short write is a hard error rather than a
/// retry, and flush failures surface as the operation result.
fn copy_stream<R, W>(src: &mut R, dst: &mut W) -> io::Result<()>
where
    R: Read,
    W: Write,
{
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    loop {
        let read = src.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        let written = dst.write(&buffer[..read])?;
        if written < read {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "short write to destination"));
        }
    }
    dst.flush()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    struct ShortWriter;

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len().saturating_sub(1))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_copy_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("source.ppd");
        let dst = dir.path().join("printer.ppd");
        let content = b"*PPD-Adobe: \"4.3\"\n*ModelName: \"Test\"\n";
        fs::write(&src, content).unwrap();

        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), content);
    }

    #[test]
    fn test_copy_appends_to_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("source.ppd");
        let dst = dir.path().join("printer.ppd");
        fs::write(&src, b"appended").unwrap();
        fs::write(&dst, b"existing|").unwrap();

        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"existing|appended");
    }

    #[test]
    fn test_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("empty.ppd");
        let dst = dir.path().join("printer.ppd");
        fs::write(&src, b"").unwrap();

        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"");
    }

    #[test]
    fn test_missing_source_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("no-such-file.ppd");
        let dst = dir.path().join("printer.ppd");

        let err = copy_file(&src, &dst).unwrap_err();

        assert!(matches!(err, CopyError::SourceError { .. }));
        assert!(!dst.exists());
    }

    #[test]
    fn test_short_write_is_an_error() {
        let mut src = &b"partial write"[..];
        let err = copy_stream(&mut src, &mut ShortWriter).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }
}
