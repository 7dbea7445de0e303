use alloc::vec::Vec;
use core::fmt::Debug;

use crate::endian::array;
use crate::error::Error;
use crate::file::ShortName;
use crate::io::{self, Wrapper};
use crate::region::boot::BootRecord;
use crate::region::data::entry::{DirectoryEntry, EntryState, RawEntry, ENTRY_SIZE};
use crate::types::SectorID;

/// Fixed size array of directory entries right after all FAT copies
pub(crate) struct RootDirectory {
    sector: u32,
    sector_size: u16,
    num_entries: u16,
    bytes: Vec<u8>,
}

impl RootDirectory {
    pub fn new(sector: u32, sector_size: u16, num_entries: u16, bytes: Vec<u8>) -> Self {
        Self { sector, sector_size, num_entries, bytes }
    }

    pub fn load<E: Debug, IO>(io: &mut Wrapper<IO>, boot_record: &BootRecord) -> Result<Self, Error<E>>
    where
        IO: io::IO<Error = E>,
    {
        let sector = boot_record.root_directory_sector();
        let num_sectors = boot_record.root_directory_sectors();
        let num_entries = boot_record.root_directory_entries;
        debug!("Root directory on sector {} spans {} sectors", sector, num_sectors);
        let bytes = io.read_sectors(SectorID::from(sector as u64), num_sectors)?;
        Ok(Self::new(sector, boot_record.bytes_per_sector, num_entries, bytes))
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries as usize
    }

    pub fn entry(&self, index: usize) -> DirectoryEntry {
        let raw: RawEntry = array(&self.bytes, index * ENTRY_SIZE);
        DirectoryEntry::unpack(&raw)
    }

    /// In use entries, stops at end of directory
    pub fn iter(&self) -> EntryIter<'_> {
        EntryIter { directory: self, index: 0 }
    }

    pub fn find(&self, name: &ShortName) -> Option<(usize, DirectoryEntry)> {
        let raw_name = name.to_raw();
        self.iter().find(|(_, entry)| entry.raw_name() == &raw_name)
    }

    /// First slot either free or marking end of directory
    pub fn lookup_free(&self) -> Option<(usize, EntryState)> {
        for index in 0..self.num_entries() {
            match self.entry(index).state() {
                EntryState::InUse => continue,
                state => return Some((index, state)),
            }
        }
        None
    }

    /// Rewrite only the 32 bytes of entry at index
    pub fn write<E: Debug, IO>(
        &mut self,
        io: &mut Wrapper<IO>,
        index: usize,
        entry: &DirectoryEntry,
    ) -> Result<(), Error<E>>
    where
        IO: io::IO<Error = E>,
    {
        let mut raw = [0u8; ENTRY_SIZE];
        entry.pack(&mut raw);
        self.write_raw(io, index, &raw)
    }

    /// Zero out entry at index, turning it into end of directory
    pub fn clear<E: Debug, IO>(&mut self, io: &mut Wrapper<IO>, index: usize) -> Result<(), Error<E>>
    where
        IO: io::IO<Error = E>,
    {
        self.write_raw(io, index, &[0u8; ENTRY_SIZE])
    }

    fn write_raw<E: Debug, IO>(&mut self, io: &mut Wrapper<IO>, index: usize, raw: &RawEntry) -> Result<(), Error<E>>
    where
        IO: io::IO<Error = E>,
    {
        let byte_offset = index * ENTRY_SIZE;
        self.bytes[byte_offset..byte_offset + ENTRY_SIZE].copy_from_slice(raw);
        let sector_size = self.sector_size as usize;
        let sector_id = SectorID::from(self.sector as u64) + (byte_offset / sector_size) as u64;
        trace!("Write entry {} at sector {} offset {}", index, sector_id, byte_offset % sector_size);
        io.write(sector_id, byte_offset % sector_size, raw)
    }
}

pub(crate) struct EntryIter<'a> {
    directory: &'a RootDirectory,
    index: usize,
}

impl Iterator for EntryIter<'_> {
    type Item = (usize, DirectoryEntry);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.directory.num_entries() {
            let index = self.index;
            let entry = self.directory.entry(index);
            match entry.state() {
                EntryState::EndOfDirectory => {
                    self.index = self.directory.num_entries();
                    return None;
                }
                EntryState::Free => self.index += 1,
                EntryState::InUse => {
                    self.index += 1;
                    return Some((index, entry));
                }
            }
        }
        None
    }
}
