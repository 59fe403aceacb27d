#![deny(missing_docs)]

//! Write binary data

use std::iter;
use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::binary::read::ReadUnchecked;
use crate::binary::{Endian, U16, U32, U8};
use crate::error::WriteError;

/// An in-memory buffer that implements `WriteContext`.
///
/// Bytes are appended at the end of the buffer, which grows as needed.
pub struct WriteBuffer {
    data: Vec<u8>,
    endian: Endian,
}

struct WriteSlice<'a> {
    offset: usize,
    data: &'a mut [u8],
    endian: Endian,
}

/// A placeholder for a value that will be filled in later using WriteContext::write_placeholder
pub struct Placeholder<T, HostType>
where
    T: WriteBinary<HostType>,
{
    offset: usize,
    length: usize,
    marker: PhantomData<T>,
    host: PhantomData<HostType>,
}

/// Trait that describes a type that can be written to a `WriteContext` in binary form.
pub trait WriteBinary<HostType = Self> {
    /// The type of the value returned by `write`.
    type Output;

    /// Write the binary representation of Self to `ctxt`.
    fn write<C: WriteContext>(ctxt: &mut C, val: HostType) -> Result<Self::Output, WriteError>;
}

/// Trait for types that can have binary data written to them.
pub trait WriteContext {
    /// Write a slice of bytes to a `WriteContext`.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), WriteError>;

    /// Write the specified number of zero bytes to the `WriteContext`.
    fn write_zeros(&mut self, count: usize) -> Result<(), WriteError>;

    /// The total number of bytes written so far.
    fn bytes_written(&self) -> usize;

    /// The byte order used for multi-byte integers.
    fn endian(&self) -> Endian;

    /// Return a placeholder to `T` in the context for filling in later.
    fn placeholder<T, HostType>(&mut self) -> Result<Placeholder<T, HostType>, WriteError>
    where
        T: WriteBinary<HostType> + ReadUnchecked,
    {
        let offset = self.bytes_written();
        self.write_zeros(T::SIZE)?;

        Ok(Placeholder {
            offset,
            length: T::SIZE,
            marker: PhantomData,
            host: PhantomData,
        })
    }

    /// Consumes the placeholder and writes the supplied value into it
    fn write_placeholder<T, HostType>(
        &mut self,
        placeholder: Placeholder<T, HostType>,
        val: HostType,
    ) -> Result<T::Output, WriteError>
    where
        T: WriteBinary<HostType>;
}

/// Write `T` into a new `WriteBuffer` with byte order `endian` and return it
pub fn buffer<HostType, T: WriteBinary<HostType>>(
    writeable: HostType,
    endian: Endian,
) -> Result<(T::Output, WriteBuffer), WriteError> {
    let mut buffer = WriteBuffer::with_endian(endian);
    let output = T::write(&mut buffer, writeable)?;
    Ok((output, buffer))
}

fn write_u16<C: WriteContext>(ctxt: &mut C, val: u16) -> Result<(), WriteError> {
    let mut bytes = [0; 2];
    match ctxt.endian() {
        Endian::Big => BigEndian::write_u16(&mut bytes, val),
        Endian::Little => LittleEndian::write_u16(&mut bytes, val),
    }
    ctxt.write_bytes(&bytes)
}

fn write_u32<C: WriteContext>(ctxt: &mut C, val: u32) -> Result<(), WriteError> {
    let mut bytes = [0; 4];
    match ctxt.endian() {
        Endian::Big => BigEndian::write_u32(&mut bytes, val),
        Endian::Little => LittleEndian::write_u32(&mut bytes, val),
    }
    ctxt.write_bytes(&bytes)
}

impl<T> WriteBinary<T> for U8
where
    T: Into<u8>,
{
    type Output = ();

    fn write<C: WriteContext>(ctxt: &mut C, t: T) -> Result<(), WriteError> {
        let val: u8 = t.into();
        ctxt.write_bytes(&[val])
    }
}

impl<T> WriteBinary<T> for U16
where
    T: Into<u16>,
{
    type Output = ();

    fn write<C: WriteContext>(ctxt: &mut C, t: T) -> Result<(), WriteError> {
        write_u16(ctxt, t.into())
    }
}

impl<T> WriteBinary<T> for U32
where
    T: Into<u32>,
{
    type Output = ();

    fn write<C: WriteContext>(ctxt: &mut C, t: T) -> Result<(), WriteError> {
        write_u32(ctxt, t.into())
    }
}

impl WriteContext for WriteBuffer {
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), WriteError> {
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn write_zeros(&mut self, count: usize) -> Result<(), WriteError> {
        let zeros = iter::repeat(0).take(count);
        self.data.extend(zeros);
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.data.len()
    }

    fn endian(&self) -> Endian {
        self.endian
    }

    fn write_placeholder<T, HostType>(
        &mut self,
        placeholder: Placeholder<T, HostType>,
        val: HostType,
    ) -> Result<T::Output, WriteError>
    where
        T: WriteBinary<HostType>,
    {
        let data = &mut self.data[placeholder.offset..];
        let data = &mut data[0..placeholder.length];
        let mut slice = WriteSlice {
            offset: 0,
            data,
            endian: self.endian,
        };
        let output = T::write(&mut slice, val)?;
        if slice.offset != placeholder.length {
            return Err(WriteError::PlaceholderMismatch);
        }
        Ok(output)
    }
}

impl<'a> WriteContext for WriteSlice<'a> {
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), WriteError> {
        let end = self.offset + data.len();
        if end <= self.data.len() {
            self.data[self.offset..end].copy_from_slice(data);
            self.offset = end;
            Ok(())
        } else {
            Err(WriteError::PlaceholderMismatch)
        }
    }

    fn write_zeros(&mut self, count: usize) -> Result<(), WriteError> {
        let end = self.offset + count;
        if end <= self.data.len() {
            self.data[self.offset..end].fill(0);
            self.offset = end;
            Ok(())
        } else {
            Err(WriteError::PlaceholderMismatch)
        }
    }

    fn bytes_written(&self) -> usize {
        self.offset
    }

    fn endian(&self) -> Endian {
        self.endian
    }

    fn write_placeholder<T, HostType>(
        &mut self,
        _placeholder: Placeholder<T, HostType>,
        _val: HostType,
    ) -> Result<T::Output, WriteError>
    where
        T: WriteBinary<HostType>,
    {
        Err(WriteError::NotImplemented)
    }
}

impl WriteBuffer {
    /// Create a new, empty, big-endian `WriteBuffer`
    pub fn new() -> Self {
        WriteBuffer::with_endian(Endian::Big)
    }

    /// Create a new, empty, little-endian `WriteBuffer`
    pub fn new_le() -> Self {
        WriteBuffer::with_endian(Endian::Little)
    }

    /// Create a new, empty `WriteBuffer` that writes integers in `endian` byte order
    pub fn with_endian(endian: Endian) -> Self {
        WriteBuffer {
            data: Vec::new(),
            endian,
        }
    }

    /// Create a new, empty `WriteBuffer` with space reserved for `capacity` bytes
    pub fn with_capacity(endian: Endian, capacity: usize) -> Self {
        WriteBuffer {
            data: Vec::with_capacity(capacity),
            endian,
        }
    }

    /// Retrieve a slice of the data held by this buffer
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the current size of the data held by this buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written to this buffer
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume `self` and return the inner buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Default for WriteBuffer {
    fn default() -> Self {
        WriteBuffer::new()
    }
}
