use std::fs;
use std::io::prelude::*;
use std::io::SeekFrom;
use std::path::Path;

use crate::types::SectorID;

/// Sector store over a host file, or anything seekable such as `std::io::Cursor`
#[derive(Debug)]
pub struct FileIO<F = fs::File> {
    file: F,
    sector_size: u16,
}

impl FileIO {
    pub fn open<P: AsRef<Path>>(filepath: P) -> std::io::Result<Self> {
        let file = fs::File::options().read(true).write(true).open(filepath)?;
        Ok(Self::new(file))
    }

    /// Writing through it fails with an IO error
    pub fn open_read_only<P: AsRef<Path>>(filepath: P) -> std::io::Result<Self> {
        Ok(Self::new(fs::File::open(filepath)?))
    }
}

impl<F: Read + Write + Seek> FileIO<F> {
    pub fn new(file: F) -> Self {
        Self { file, sector_size: super::DEFAULT_SECTOR_SIZE }
    }

    pub fn into_inner(self) -> F {
        self.file
    }

    fn seek(&mut self, sector: SectorID, offset: usize) -> std::io::Result<()> {
        let position = u64::from(sector) * self.sector_size as u64 + offset as u64;
        self.file.seek(SeekFrom::Start(position)).map(|_| ())
    }
}

impl<F: Read + Write + Seek> super::IO for FileIO<F> {
    type Error = std::io::Error;

    fn set_sector_size(&mut self, size: u16) -> Result<(), Self::Error> {
        self.sector_size = size;
        Ok(())
    }

    fn read(&mut self, sector: SectorID, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.seek(sector, 0)?;
        self.file.read_exact(buf)
    }

    fn write(&mut self, sector: SectorID, offset: usize, buf: &[u8]) -> Result<(), Self::Error> {
        self.seek(sector, offset)?;
        self.file.write_all(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.file.flush()
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::FileIO;
    use crate::io::IO;
    use crate::types::SectorID;

    #[test]
    fn test_sector_addressing() {
        let mut io = FileIO::new(Cursor::new(vec![0u8; 2048]));
        io.set_sector_size(1024).unwrap();
        io.write(SectorID::from(1u64), 2, &[0xAA, 0xBB]).unwrap();
        let mut buf = [0u8; 4];
        io.read(SectorID::from(1u64), &mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0xAA, 0xBB]);
        assert_eq!(&io.into_inner().into_inner()[1026..1028], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_read_only() {
        let path = std::env::temp_dir().join(format!("fat12-read-only-{}.img", std::process::id()));
        std::fs::write(&path, [0x5Au8; 1024]).unwrap();
        let mut io = FileIO::open_read_only(&path).unwrap();
        let mut buf = [0u8; 4];
        io.read(SectorID::from(1u64), &mut buf).unwrap();
        assert_eq!(buf, [0x5A; 4]);
        assert!(io.write(SectorID::from(0u64), 0, &[0]).is_err());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_short_read() {
        let mut io = FileIO::new(Cursor::new(vec![0u8; 600]));
        let mut buf = [0u8; 512];
        assert!(io.read(SectorID::from(1u64), &mut buf).is_err());
    }
}
