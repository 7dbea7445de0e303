use core::fmt::{Debug, Display, Formatter, Result, Write};

use crate::error::InputError;
use crate::region::data::entry::{END_OF_DIRECTORY, ESCAPED_E5, FREE};

pub const BASE_SIZE: usize = 8;
pub const EXTENSION_SIZE: usize = 3;
pub const SHORT_NAME_SIZE: usize = BASE_SIZE + EXTENSION_SIZE;

const FORBIDDEN: &[u8] = b"\"*+,./:;<=>?[\\]|";

/// 8.3 name in on-disk `"NAME    EXT"` form
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShortName([u8; SHORT_NAME_SIZE]);

impl ShortName {
    /// Takes raw `"NAME    EXT"` bytes, compared byte by byte when searching.
    /// A leading 0x05 escape stands for 0xE5, same as on disk.
    pub fn new(bytes: &[u8]) -> core::result::Result<Self, InputError> {
        let array: [u8; SHORT_NAME_SIZE] = bytes.try_into().map_err(|_| InputError::InvalidName)?;
        if array[0] == END_OF_DIRECTORY {
            return Err(InputError::InvalidName);
        }
        Ok(Self::from_raw(array))
    }

    /// Takes display form like `hello.txt`, upper cased and padded with spaces
    pub fn parse(name: &str) -> core::result::Result<Self, InputError> {
        let (base, extension) = match name.rsplit_once('.') {
            Some((base, extension)) => (base, extension),
            None => (name, ""),
        };
        if base.is_empty() || base.len() > BASE_SIZE || extension.len() > EXTENSION_SIZE {
            return Err(InputError::InvalidName);
        }
        let mut array = [b' '; SHORT_NAME_SIZE];
        let (base_buf, extension_buf) = array.split_at_mut(BASE_SIZE);
        for (part, buf) in [(base, base_buf), (extension, extension_buf)] {
            for (i, &byte) in part.as_bytes().iter().enumerate() {
                if !byte.is_ascii_graphic() || FORBIDDEN.contains(&byte) {
                    return Err(InputError::InvalidName);
                }
                buf[i] = byte.to_ascii_uppercase();
            }
        }
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SHORT_NAME_SIZE] {
        &self.0
    }

    pub fn base(&self) -> &[u8] {
        trim_end(&self.0[..BASE_SIZE])
    }

    pub fn extension(&self) -> &[u8] {
        trim_end(&self.0[BASE_SIZE..])
    }

    pub(crate) fn from_raw(mut raw: [u8; SHORT_NAME_SIZE]) -> Self {
        if raw[0] == ESCAPED_E5 {
            raw[0] = FREE;
        }
        Self(raw)
    }

    pub(crate) fn to_raw(&self) -> [u8; SHORT_NAME_SIZE] {
        let mut raw = self.0;
        if raw[0] == FREE {
            raw[0] = ESCAPED_E5;
        }
        raw
    }
}

pub(crate) fn trim_end(bytes: &[u8]) -> &[u8] {
    let length = bytes.iter().rposition(|&b| b != b' ').map(|i| i + 1).unwrap_or(0);
    &bytes[..length]
}

fn write_bytes(f: &mut Formatter<'_>, bytes: &[u8]) -> Result {
    for &byte in bytes {
        f.write_char(byte as char)?;
    }
    Ok(())
}

impl Display for ShortName {
    /// `HELLO.TXT`
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_bytes(f, self.base())?;
        if !self.extension().is_empty() {
            f.write_char('.')?;
            write_bytes(f, self.extension())?;
        }
        Ok(())
    }
}

impl Debug for ShortName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_char('"')?;
        write_bytes(f, &self.0)?;
        f.write_char('"')
    }
}

impl TryFrom<&str> for ShortName {
    type Error = InputError;

    fn try_from(name: &str) -> core::result::Result<Self, InputError> {
        match name.len() == SHORT_NAME_SIZE && !name.contains('.') {
            true => Self::new(name.as_bytes()),
            false => Self::parse(name),
        }
    }
}
