#[cfg(feature = "std")]
pub mod std;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Error;
use crate::types::SectorID;

pub const DEFAULT_SECTOR_SIZE: u16 = 512;

/// Random access sector store backing a volume
pub trait IO {
    type Error: Debug;

    /// Default to 512
    fn set_sector_size(&mut self, size: u16) -> Result<(), Self::Error>;
    /// Fill whole buf with bytes starting from sector id, short read is an error
    fn read(&mut self, id: SectorID, buf: &mut [u8]) -> Result<(), Self::Error>;
    /// Write data starting at byte offset of sector id, may span following sectors
    fn write(&mut self, id: SectorID, offset: usize, data: &[u8]) -> Result<(), Self::Error>;
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub(crate) struct Wrapper<IO> {
    io: IO,
    sector_size: u16,
}

impl<E: Debug, IO: self::IO<Error = E>> Wrapper<IO> {
    pub fn new(io: IO) -> Self {
        Self { io, sector_size: DEFAULT_SECTOR_SIZE }
    }

    pub fn set_sector_size(&mut self, size: u16) -> Result<(), Error<E>> {
        self.io.set_sector_size(size).map_err(|e| Error::IO(e))?;
        self.sector_size = size;
        Ok(())
    }

    pub fn read(&mut self, id: SectorID, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.io.read(id, buf).map_err(|e| Error::IO(e))
    }

    /// Read `count` consecutive sectors
    pub fn read_sectors(&mut self, id: SectorID, count: u32) -> Result<Vec<u8>, Error<E>> {
        let mut buf = vec![0u8; count as usize * self.sector_size as usize];
        trace!("Read {} sectors from sector {}", count, id);
        self.read(id, &mut buf)?;
        Ok(buf)
    }

    pub fn write(&mut self, id: SectorID, offset: usize, data: &[u8]) -> Result<(), Error<E>> {
        let result = self.io.write(id, offset, data);
        result.map_err(|e| Error::IO(e))
    }

    /// Write whole sectors, data length expected to be multiple of sector size
    pub fn write_sectors(&mut self, id: SectorID, data: &[u8]) -> Result<(), Error<E>> {
        debug_assert_eq!(data.len() % self.sector_size as usize, 0);
        trace!("Write {} bytes to sector {}", data.len(), id);
        self.write(id, 0, data)
    }

    pub fn flush(&mut self) -> Result<(), Error<E>> {
        self.io.flush().map_err(|e| Error::IO(e))
    }

    pub fn into_inner(self) -> IO {
        self.io
    }
}
