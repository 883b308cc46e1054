//! Byte sources that the reader can skip forward in.
//!
//! `std::io::Read` has no way to ask whether a source can seek, so `NbtReader` reads through the
//! `ByteSource` trait instead. Sources that can seek step over skipped data directly; all others
//! are drained through a scratch buffer.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// A readable source of bytes that may support skipping forward without reading.
pub trait ByteSource: Read {
    /// Returns `true` if `seek_forward` is supported.
    fn can_seek(&self) -> bool {
        false
    }

    /// Advances the read position by `n` bytes.
    ///
    /// Only called when `can_seek` returns `true`. Files and cursors allow seeking past the end
    /// of their data, so this is only detected by the next read. Slices fail with
    /// `UnexpectedEof` instead.
    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        let _ = n;
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "byte source does not support seeking",
        ))
    }
}

impl ByteSource for &[u8] {
    fn can_seek(&self) -> bool {
        true
    }

    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        match usize::try_from(n) {
            Ok(n) if n <= self.len() => {
                *self = &self[n..];
                Ok(())
            }
            _ => Err(io::ErrorKind::UnexpectedEof.into()),
        }
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn can_seek(&self) -> bool {
        true
    }

    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        let pos = self.position().saturating_add(n);
        self.set_position(pos);
        Ok(())
    }
}

impl ByteSource for File {
    fn can_seek(&self) -> bool {
        true
    }

    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        seek_relative(self, n)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }

    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        (**self).seek_forward(n)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }

    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        (**self).seek_forward(n)
    }
}

/// Adapts any `Read + Seek` type into a seekable `ByteSource`.
#[derive(Debug)]
pub struct Seekable<R>(pub R);

impl<R: Read> Read for Seekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Seek> ByteSource for Seekable<R> {
    fn can_seek(&self) -> bool {
        true
    }

    fn seek_forward(&mut self, n: u64) -> io::Result<()> {
        seek_relative(&mut self.0, n)
    }
}

/// Adapts any `Read` type into a `ByteSource` that cannot seek, such as a socket or a
/// decompression stream. Skipped data is read and discarded.
#[derive(Debug)]
pub struct Unseekable<R>(pub R);

impl<R: Read> Read for Unseekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read> ByteSource for Unseekable<R> {}

fn seek_relative<S: Seek + ?Sized>(s: &mut S, n: u64) -> io::Result<()> {
    let offset = i64::try_from(n)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "seek offset too large"))?;
    s.seek(SeekFrom::Current(offset))?;
    Ok(())
}
