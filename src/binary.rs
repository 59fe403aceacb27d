/// Read binary data
pub mod read;

/// Write binary data
pub mod write;

/// Byte order used when reading or writing multi-byte integers.
///
/// The byte order belongs to a `ReadScope` or `WriteBuffer` and is chosen when it is
/// constructed. OpenType data is big-endian, EOT headers are little-endian.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[derive(Copy, Clone)]
pub enum U8 {}

#[derive(Copy, Clone)]
pub enum U16 {}

#[derive(Copy, Clone)]
pub enum U32 {}
