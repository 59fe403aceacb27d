//! Reading and writing of the Embedded OpenType (EOT) font format.
//!
//! An EOT file wraps a TrueType or OpenType font with a little-endian header. After a fixed
//! 82 byte prefix the header holds a chain of length-prefixed fields whose number depends on
//! the header version, so the location of the embedded font can only be found by walking every
//! field in turn.
//!
//! <https://www.w3.org/submissions/EOT/>

use std::borrow::Cow;

use bitflags::bitflags;
use encoding_rs::UTF_16LE;
use log::{debug, warn};

use crate::binary::read::{ReadBinary, ReadBuf, ReadCtxt, ReadScope};
use crate::binary::write::{WriteBinary, WriteBuffer, WriteContext};
use crate::binary::{Endian, U16, U32, U8};
use crate::error::{ParseError, ReadWriteError, WriteError};
use crate::size;

/// The magic number identifying an EOT file, stored little-endian at offset 34.
pub const MAGIC: u16 = 0x504C;

/// Key the font data is XORed with when `EotFlags::XOR_ENCRYPT_DATA` is set.
pub const XOR_KEY: u8 = 0x50;

const FONT_DATA_SIZE_OFFSET: usize = 4;
const VERSION_OFFSET: usize = 8;
const MAGIC_OFFSET: usize = 34;
const NAMES_OFFSET: usize = 82;

bitflags! {
    /// Processing flags from the EOT header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EotFlags: u32 {
        /// The font data is a subset of the original font.
        const SUBSET = 0x0000_0001;
        /// The font data is compressed with MicroType Express.
        const TT_COMPRESSED = 0x0000_0004;
        /// The font data is XORed with `XOR_KEY`.
        const XOR_ENCRYPT_DATA = 0x1000_0000;
    }
}

/// EOT header version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EotVersion {
    /// Version 0x00010000
    V1,
    /// Version 0x00020001, adds the root string.
    V2_1,
    /// Version 0x00020002, adds the signature and EUDC font.
    V2_2,
}

/// A parsed EOT file.
///
/// All variable-length fields borrow from the input buffer.
#[derive(Debug, Clone)]
pub struct EotFont<'a> {
    pub header: EotHeader<'a>,
    /// The embedded font, as stored. See `decrypted_font_data`.
    pub font_data: &'a [u8],
}

#[derive(Debug, Clone, PartialEq)]
pub struct EotHeader<'a> {
    /// Total size of the file as declared by the header. Ignored when writing.
    pub eot_size: u32,
    /// Length of the embedded font. Ignored when writing.
    pub font_data_size: u32,
    pub version: EotVersion,
    pub flags: EotFlags,
    pub panose: [u8; 10],
    pub charset: u8,
    pub italic: u8,
    pub weight: u32,
    pub fs_type: u16,
    pub magic_number: u16,
    pub unicode_range: [u32; 4],
    pub code_page_range: [u32; 2],
    pub checksum_adjustment: u32,
    pub family_name: EotString<'a>,
    pub style_name: EotString<'a>,
    pub version_name: EotString<'a>,
    pub full_name: EotString<'a>,
    /// Version 2.1 and later.
    pub root_string: EotString<'a>,
    /// Version 2.2.
    pub root_string_checksum: u32,
    /// Version 2.2.
    pub eudc_code_page: u32,
    /// Version 2.2.
    pub signature: &'a [u8],
    /// Version 2.2.
    pub eudc_flags: u32,
    /// Version 2.2.
    pub eudc_font_data: &'a [u8],
    /// Offset of the embedded font from the start of the file. Computed when reading, ignored
    /// when writing.
    pub font_data_offset: usize,
}

/// A UTF-16LE string from an EOT header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EotString<'a> {
    data: &'a [u8],
}

impl<'a> EotFont<'a> {
    /// The embedded font with XOR obfuscation removed.
    ///
    /// Borrows the stored data when `EotFlags::XOR_ENCRYPT_DATA` is not set.
    pub fn decrypted_font_data(&self) -> ReadBuf<'a> {
        if self.header.flags.contains(EotFlags::XOR_ENCRYPT_DATA) {
            ReadBuf::from(xor_font_data(self.font_data))
        } else {
            ReadBuf::from(self.font_data)
        }
    }

    /// Serialise this font into a new EOT file.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut buffer = WriteBuffer::new_le();
        EotFont::write(&mut buffer, self)?;
        Ok(buffer.into_inner())
    }
}

impl EotHeader<'static> {
    /// A header with empty names and default metrics.
    pub fn new(version: EotVersion) -> Self {
        EotHeader {
            eot_size: 0,
            font_data_size: 0,
            version,
            flags: EotFlags::empty(),
            panose: [0; 10],
            charset: 1, // DEFAULT_CHARSET
            italic: 0,
            weight: 400,
            fs_type: 0,
            magic_number: MAGIC,
            unicode_range: [0; 4],
            code_page_range: [0; 2],
            checksum_adjustment: 0,
            family_name: EotString::default(),
            style_name: EotString::default(),
            version_name: EotString::default(),
            full_name: EotString::default(),
            root_string: EotString::default(),
            root_string_checksum: 0,
            eudc_code_page: 0,
            signature: &[],
            eudc_flags: 0,
            eudc_font_data: &[],
            font_data_offset: 0,
        }
    }
}

impl<'a> EotString<'a> {
    /// Wrap UTF-16LE encoded bytes.
    pub fn new(data: &'a [u8]) -> Self {
        EotString { data }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the string, replacing malformed sequences with U+FFFD.
    pub fn decode(&self) -> Cow<'a, str> {
        let (string, _had_errors) = UTF_16LE.decode_without_bom_handling(self.data);
        string
    }
}

impl EotVersion {
    pub fn value(self) -> u32 {
        match self {
            EotVersion::V1 => 0x0001_0000,
            EotVersion::V2_1 => 0x0002_0001,
            EotVersion::V2_2 => 0x0002_0002,
        }
    }

    fn has_root_string(self) -> bool {
        matches!(self, EotVersion::V2_1 | EotVersion::V2_2)
    }

    fn has_eudc(self) -> bool {
        self == EotVersion::V2_2
    }
}

impl TryFrom<u32> for EotVersion {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, ParseError> {
        match value {
            0x0001_0000 => Ok(EotVersion::V1),
            0x0002_0001 => Ok(EotVersion::V2_1),
            0x0002_0002 => Ok(EotVersion::V2_2),
            _ => Err(ParseError::InvalidFormat),
        }
    }
}

/// Encode `s` as UTF-16LE for use in an `EotString`.
pub fn encode_utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Apply (or remove) the EOT XOR obfuscation.
pub fn xor_font_data(data: &[u8]) -> Vec<u8> {
    data.iter().map(|byte| byte ^ XOR_KEY).collect()
}

/// Return the font embedded in the EOT file `data` without copying it.
///
/// ```
/// use fontedit::eot::{self, EotFont, EotHeader, EotVersion};
///
/// let font = EotFont {
///     header: EotHeader::new(EotVersion::V1),
///     font_data: b"\x00\x01\x00\x00",
/// };
/// let data = font.to_bytes().unwrap();
/// assert_eq!(eot::extract(&data).unwrap(), b"\x00\x01\x00\x00");
/// ```
pub fn extract(data: &[u8]) -> Result<&[u8], ParseError> {
    let eot = ReadScope::new_le(data).read::<EotFont<'_>>()?;
    Ok(eot.font_data)
}

/// Copy the font embedded in the EOT file `data` into a buffer of exactly its size.
pub fn extract_owned(data: &[u8]) -> Result<Vec<u8>, ReadWriteError> {
    let font_data = extract(data)?;
    let mut buffer = WriteBuffer::with_capacity(Endian::Little, font_data.len());
    buffer.write_bytes(font_data)?;
    Ok(buffer.into_inner())
}

/// A length-prefixed field located by the header walk. The payload is only read once the whole
/// header is known to fit.
#[derive(Clone, Copy, Default)]
struct Field {
    offset: usize,
    length: usize,
}

impl Field {
    fn read<'a>(self, scope: &ReadScope<'a>) -> Result<&'a [u8], ParseError> {
        scope.read_bytes_at(self.offset, self.length)
    }
}

/// Read the uint16 length of the field at `offset`, then move `offset` past the field and
/// `trailing` following bytes.
fn walk_sized(
    scope: &ReadScope<'_>,
    offset: &mut usize,
    trailing: usize,
) -> Result<Field, ParseError> {
    let length = usize::from(scope.read_u16_at(*offset)?);
    let field = Field {
        offset: *offset + size::U16,
        length,
    };
    *offset = field.offset + length + trailing;
    Ok(field)
}

fn read_array<const N: usize>(ctxt: &mut ReadCtxt<'_>) -> Result<[u32; N], ParseError> {
    let mut values = [0; N];
    for (value, item) in values.iter_mut().zip(ctxt.read_array::<U32>(N)?.iter()) {
        *value = item;
    }
    Ok(values)
}

impl<'b> ReadBinary for EotFont<'b> {
    type HostType<'a> = EotFont<'a>;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        // EOT is little-endian regardless of the caller's scope
        let scope = ReadScope::new_le(ctxt.scope().data());

        let mut fixed = scope.ctxt();
        let magic_number = scope.read_u16_at(MAGIC_OFFSET)?;
        fixed.check_format(magic_number == MAGIC)?;
        let version = EotVersion::try_from(scope.read_u32_at(VERSION_OFFSET)?)?;
        let font_data_size = scope.read_u32_at(FONT_DATA_SIZE_OFFSET)?;

        let eot_size = fixed.read_u32()?;
        fixed.skip(2 * size::U32)?; // FontDataSize, Version
        let flags = EotFlags::from_bits_retain(fixed.read_u32()?);
        let mut panose = [0; 10];
        panose.copy_from_slice(fixed.read_slice(10)?);
        let charset = fixed.read_u8()?;
        let italic = fixed.read_u8()?;
        let weight = fixed.read_u32()?;
        let fs_type = fixed.read_u16()?;
        fixed.skip(size::U16)?; // MagicNumber
        let unicode_range = read_array::<4>(&mut fixed)?;
        let code_page_range = read_array::<2>(&mut fixed)?;
        let checksum_adjustment = fixed.read_u32()?;
        fixed.skip(4 * size::U32 + size::U16)?; // Reserved1-4, Padding1
        debug_assert_eq!(fixed.position(), NAMES_OFFSET);

        // Only length fields are read while walking. Each of the first three names is followed
        // by the padding before the next one.
        let mut offset = NAMES_OFFSET;
        let family_name = walk_sized(&scope, &mut offset, size::U16)?;
        let style_name = walk_sized(&scope, &mut offset, size::U16)?;
        let version_name = walk_sized(&scope, &mut offset, size::U16)?;
        let full_name = walk_sized(&scope, &mut offset, 0)?;

        let mut root_string = Field::default();
        if version.has_root_string() {
            offset += size::U16; // Padding5
            root_string = walk_sized(&scope, &mut offset, 0)?;
        }

        let mut root_string_checksum = 0;
        let mut eudc_code_page = 0;
        let mut signature = Field::default();
        let mut eudc_flags = 0;
        let mut eudc_font = Field::default();
        if version.has_eudc() {
            root_string_checksum = scope.read_u32_at(offset)?;
            eudc_code_page = scope.read_u32_at(offset + size::U32)?;
            offset += 2 * size::U32 + size::U16; // Padding6
            signature = walk_sized(&scope, &mut offset, 0)?;
            eudc_flags = scope.read_u32_at(offset)?;
            let length = usize::try_from(scope.read_u32_at(offset + size::U32)?)?;
            eudc_font = Field {
                offset: offset + 2 * size::U32,
                length,
            };
            offset = eudc_font
                .offset
                .checked_add(length)
                .ok_or(ParseError::TruncatedData)?;
        }

        let font_data_offset = offset;
        let font_data_len = usize::try_from(font_data_size)?;
        let font_data_end = match font_data_offset.checked_add(font_data_len) {
            Some(end) if end <= scope.len() => end,
            _ => return Err(ParseError::TruncatedData),
        };
        let font_data = scope.read_bytes_at(font_data_offset, font_data_len)?;
        ctxt.skip(font_data_end)?;

        debug!(
            "EOT version {:#x}: {} bytes of font data at offset {}",
            version.value(),
            font_data_len,
            font_data_offset
        );
        if usize::try_from(eot_size).ok() != Some(scope.len()) {
            debug!(
                "EOT size {} does not match buffer length {}",
                eot_size,
                scope.len()
            );
        }
        if flags.contains(EotFlags::TT_COMPRESSED) {
            warn!("EOT font data is MicroType Express compressed, returning it as stored");
        }

        Ok(EotFont {
            header: EotHeader {
                eot_size,
                font_data_size,
                version,
                flags,
                panose,
                charset,
                italic,
                weight,
                fs_type,
                magic_number,
                unicode_range,
                code_page_range,
                checksum_adjustment,
                family_name: EotString::new(family_name.read(&scope)?),
                style_name: EotString::new(style_name.read(&scope)?),
                version_name: EotString::new(version_name.read(&scope)?),
                full_name: EotString::new(full_name.read(&scope)?),
                root_string: EotString::new(root_string.read(&scope)?),
                root_string_checksum,
                eudc_code_page,
                signature: signature.read(&scope)?,
                eudc_flags,
                eudc_font_data: eudc_font.read(&scope)?,
                font_data_offset,
            },
            font_data,
        })
    }
}

fn write_sized<C: WriteContext>(ctxt: &mut C, data: &[u8]) -> Result<(), WriteError> {
    U16::write(ctxt, u16::try_from(data.len())?)?;
    ctxt.write_bytes(data)
}

impl<'a> WriteBinary<&Self> for EotFont<'a> {
    type Output = ();

    /// Write the EOT file. `eot_size`, `font_data_size`, `magic_number` and `font_data_offset`
    /// are derived from the data rather than taken from the header.
    fn write<C: WriteContext>(ctxt: &mut C, eot: &EotFont<'a>) -> Result<(), WriteError> {
        if ctxt.endian() != Endian::Little {
            return Err(WriteError::BadValue);
        }
        let header = &eot.header;
        let start = ctxt.bytes_written();

        let eot_size = ctxt.placeholder::<U32, u32>()?;
        U32::write(ctxt, u32::try_from(eot.font_data.len())?)?;
        U32::write(ctxt, header.version.value())?;
        U32::write(ctxt, header.flags.bits())?;
        ctxt.write_bytes(&header.panose)?;
        U8::write(ctxt, header.charset)?;
        U8::write(ctxt, header.italic)?;
        U32::write(ctxt, header.weight)?;
        U16::write(ctxt, header.fs_type)?;
        U16::write(ctxt, MAGIC)?;
        for &range in header.unicode_range.iter().chain(&header.code_page_range) {
            U32::write(ctxt, range)?;
        }
        U32::write(ctxt, header.checksum_adjustment)?;
        ctxt.write_zeros(4 * size::U32 + size::U16)?; // Reserved1-4, Padding1

        write_sized(ctxt, header.family_name.data())?;
        U16::write(ctxt, 0u16)?; // Padding2
        write_sized(ctxt, header.style_name.data())?;
        U16::write(ctxt, 0u16)?; // Padding3
        write_sized(ctxt, header.version_name.data())?;
        U16::write(ctxt, 0u16)?; // Padding4
        write_sized(ctxt, header.full_name.data())?;

        if header.version.has_root_string() {
            U16::write(ctxt, 0u16)?; // Padding5
            write_sized(ctxt, header.root_string.data())?;
        }
        if header.version.has_eudc() {
            U32::write(ctxt, header.root_string_checksum)?;
            U32::write(ctxt, header.eudc_code_page)?;
            U16::write(ctxt, 0u16)?; // Padding6
            write_sized(ctxt, header.signature)?;
            U32::write(ctxt, header.eudc_flags)?;
            U32::write(ctxt, u32::try_from(header.eudc_font_data.len())?)?;
            ctxt.write_bytes(header.eudc_font_data)?;
        }

        ctxt.write_bytes(eot.font_data)?;
        let length = u32::try_from(ctxt.bytes_written() - start)?;
        ctxt.write_placeholder(eot_size, length)
    }
}
