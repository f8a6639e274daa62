//! Streaming of raw numeric values from binary files.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::marker::PhantomData;
use std::mem;
use std::path::Path;

use anyhow::{self, Context};
use byteorder::ByteOrder;

#[cfg(test)]
#[path = "numeric_tests.rs"]
mod numeric_tests;

/// Trait for numeric types that can be decoded from a raw byte stream.
pub(crate) trait BinaryNumeric: Sized {
    /// Decodes one value from exactly `size_of::<Self>()` bytes in byte order `B`.
    fn decode<B: ByteOrder>(buf: &[u8]) -> Self;
}

macro_rules! impl_binary_numeric {
    ($($t:ty => $method:ident),+) => {$(
        impl BinaryNumeric for $t {
            fn decode<B: ByteOrder>(buf: &[u8]) -> Self {
                B::$method(buf)
            }
        }
    )+}
}

impl_binary_numeric!(i32 => read_i32, i64 => read_i64, f32 => read_f32, f64 => read_f64);

/// Iterator over the values of type `T` stored back to back in byte order `B`.
///
/// Iteration stops cleanly only at a value boundary. A trailing incomplete value or a failed
/// read is yielded as an error.
pub(crate) struct NumericReader<R: Read, B: ByteOrder, T> {
    inner: R,
    layout: PhantomData<(B, T)>,
}

impl<R: Read, B: ByteOrder, T> NumericReader<R, B, T> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            layout: PhantomData,
        }
    }
}

impl<B: ByteOrder, T> NumericReader<BufReader<File>, B, T> {
    /// Opens `filename` for buffered reading.
    pub(crate) fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, anyhow::Error> {
        let file = File::open(filename.as_ref())
            .with_context(|| format!("Unable to open `{}`", filename.as_ref().display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read, B: ByteOrder, T: BinaryNumeric> Iterator for NumericReader<R, B, T> {
    type Item = io::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = [0u8; 8];
        let buf = &mut raw[..mem::size_of::<T>()];
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Some(Err(err)),
            }
        }
        match filled {
            0 => None,
            n if n == buf.len() => Some(Ok(T::decode::<B>(buf))),
            n => Some(Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{n} trailing byte(s) do not form a complete {}-byte value",
                    buf.len()
                ),
            ))),
        }
    }
}
