#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate hex_literal;
#[macro_use]
extern crate log;

mod cluster_heap;
mod endian;
pub mod error;
mod fat;
pub mod file;
pub(crate) mod fs;
pub mod io;
mod region;
pub mod types;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use cluster_heap::chain::{self, Chain};
use cluster_heap::root::RootDirectory;
use error::{AllocationError, DataError, Error, InputError, OperationError};
pub use file::ShortName;
use io::Wrapper;
pub use region::boot::BootRecord;
use region::boot::{offset, BOOT_RECORD_SIZE, SIGNATURE_FULL};
use region::data::entry::EntryState;
pub use region::data::entry::{Attributes, Date, DateTime, DirectoryEntry, Time};
use types::SectorID;

const VOLUME_LABEL_SIZE: usize = 11;

/// A FAT12 volume session, sole owner of boot record, root directory and FAT buffers
pub struct Volume<IO> {
    io: Wrapper<IO>,
    boot_record: BootRecord,
    fs_info: fs::Info,
    root: RootDirectory,
    fat: fat::FAT,
}

#[cfg(feature = "std")]
impl Volume<io::std::FileIO> {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error<std::io::Error>> {
        let io = io::std::FileIO::open(path).map_err(|e| Error::IO(e))?;
        Self::new(io)
    }

    /// Listing and reading only, mutations fail with `Error::IO`
    pub fn open_read_only<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error<std::io::Error>> {
        let io = io::std::FileIO::open_read_only(path).map_err(|e| Error::IO(e))?;
        Self::new(io)
    }
}

impl<E: Debug, IO: io::IO<Error = E>> Volume<IO> {
    /// Loads boot record, root directory and FAT in that order
    pub fn new(io: IO) -> Result<Self, Error<E>> {
        let mut io = Wrapper::new(io);
        let mut bytes = [0u8; BOOT_RECORD_SIZE];
        io.read(SectorID::BOOT, &mut bytes)?;
        let boot_record = BootRecord::unpack(&bytes);
        boot_record.validate()?;
        if !boot_record.has_extended_boot_record() {
            warn!("Unexpected extended boot record signature {:X}", boot_record.signature);
        }
        io.set_sector_size(boot_record.bytes_per_sector)?;
        let fs_info = fs::Info::new(&boot_record);
        debug!("Filesystem info: {:?}", fs_info);

        let root = RootDirectory::load(&mut io, &boot_record)?;
        let fat = fat::FAT::load(&mut io, &boot_record)?;
        Ok(Self { io, boot_record, fs_info, root, fat })
    }

    pub fn boot_record(&self) -> &BootRecord {
        &self.boot_record
    }

    pub fn serial_number(&self) -> u32 {
        self.boot_record.serial_number
    }

    pub fn volume_label(&self) -> heapless::String<VOLUME_LABEL_SIZE> {
        let mut label = heapless::String::new();
        for &byte in file::trim_end(&self.boot_record.volume_label) {
            label.push(byte as char).ok();
        }
        label
    }

    /// In bytes
    pub fn cluster_size(&self) -> u32 {
        self.fs_info.cluster_size()
    }

    pub fn free_clusters(&self) -> u16 {
        self.fat.num_free()
    }

    /// In use root directory entries, ends at first end of directory entry
    pub fn entries(&self) -> impl Iterator<Item = DirectoryEntry> + '_ {
        self.root.iter().map(|(_, entry)| entry)
    }

    pub fn list(&self) -> impl Iterator<Item = ShortName> + '_ {
        self.entries().map(|entry| entry.name())
    }

    pub fn find(&self, name: &ShortName) -> Result<DirectoryEntry, Error<E>> {
        match self.root.find(name) {
            Some((_, entry)) => Ok(entry),
            None => Err(OperationError::NotFound.into()),
        }
    }

    /// Whole clusters are returned, valid length being size of the entry
    pub fn read(&mut self, name: &ShortName) -> Result<Vec<u8>, Error<E>> {
        let entry = self.find(name)?;
        let cluster_size = self.fs_info.cluster_size() as usize;
        let num_clusters = self.fs_info.num_clusters(entry.size()) as usize;
        trace!("Read {} size {} in {} clusters", name, entry.size(), num_clusters);
        let corrupted = DataError::CorruptChain(entry.first_cluster());
        if num_clusters > self.fat.capacity() as usize {
            warn!("Size {} of {} exceeds FAT capacity", entry.size(), name);
            return Err(corrupted.into());
        }
        let length = num_clusters.checked_mul(cluster_size).ok_or(corrupted)?;
        let mut buf = vec![0u8; length];
        if num_clusters == 0 {
            return Ok(buf);
        }
        let mut chunks = buf.chunks_mut(cluster_size);
        let mut last = entry.first_cluster();
        for cluster_id in Chain::new(&self.fat, entry.first_cluster()) {
            let cluster_id = cluster_id?;
            let chunk = match chunks.next() {
                Some(chunk) => chunk,
                None => {
                    warn!("Chain of {} longer than its size {}", name, entry.size());
                    return Err(DataError::CorruptChain(cluster_id).into());
                }
            };
            self.io.read(self.fs_info.cluster_sector(cluster_id), chunk)?;
            last = cluster_id;
        }
        if chunks.next().is_some() {
            warn!("Chain of {} shorter than its size {}", name, entry.size());
            return Err(DataError::CorruptChain(last).into());
        }
        Ok(buf)
    }

    pub fn create(&mut self, name: &ShortName, attributes: Attributes, data: &[u8]) -> Result<(), Error<E>> {
        self.create_at(name, attributes, data, DateTime::now())
    }

    /// Create a file in root directory stamped with specified time.
    /// Any failure after allocation may leave image inconsistent, a new session is expected then.
    pub fn create_at(
        &mut self,
        name: &ShortName,
        attributes: Attributes,
        data: &[u8],
        now: DateTime,
    ) -> Result<(), Error<E>> {
        trace!("Create file {} with {} bytes", name, data.len());
        if self.root.find(name).is_some() {
            return Err(OperationError::AlreadyExists.into());
        }
        let (index, state) = self.root.lookup_free().ok_or(AllocationError::DirectoryFull)?;
        let size = u32::try_from(data.len()).map_err(|_| AllocationError::NoMoreCluster)?;
        let mut entry = DirectoryEntry::new(name, attributes, now, size);

        let num_clusters = self.fs_info.num_clusters(size);
        if let Some(first) = chain::allocate(&mut self.fat, num_clusters)? {
            debug!("File {} takes {} clusters from cluster {}", name, num_clusters, first);
            entry.set_first_cluster(first);
            let cluster_size = self.fs_info.cluster_size() as usize;
            let mut padded = vec![0u8; cluster_size];
            for (cluster_id, chunk) in Chain::new(&self.fat, first).zip(data.chunks(cluster_size)) {
                let sector_id = self.fs_info.cluster_sector(cluster_id?);
                if chunk.len() == cluster_size {
                    self.io.write_sectors(sector_id, chunk)?;
                    continue;
                }
                padded[..chunk.len()].copy_from_slice(chunk);
                padded[chunk.len()..].fill(0);
                self.io.write_sectors(sector_id, &padded)?;
            }
        }

        debug!("Write entry {} at index {}", name, index);
        self.root.write(&mut self.io, index, &entry)?;
        let next = index + 1;
        if state == EntryState::EndOfDirectory && next < self.root.num_entries() {
            if self.root.entry(next).state() != EntryState::EndOfDirectory {
                self.root.clear(&mut self.io, next)?;
            }
        }
        self.fat.persist(&mut self.io)?;
        self.io.flush()
    }

    pub fn delete(&mut self, name: &ShortName) -> Result<(), Error<E>> {
        let (index, mut entry) = self.root.find(name).ok_or(OperationError::NotFound)?;
        if entry.has_clusters() {
            let num_clusters = chain::release(&mut self.fat, entry.first_cluster())?;
            debug!("Delete {} releases {} clusters", name, num_clusters);
        }
        entry.release();
        self.root.write(&mut self.io, index, &entry)?;
        self.fat.persist(&mut self.io)?;
        self.io.flush()
    }

    /// Rewrite volume label of extended boot record
    pub fn set_volume_label(&mut self, label: &str) -> Result<(), Error<E>> {
        if self.boot_record.signature != SIGNATURE_FULL {
            return Err(DataError::NoExtendedBootRecord.into());
        }
        let valid = label.bytes().all(|b| b.is_ascii_graphic() || b == b' ');
        if label.len() > VOLUME_LABEL_SIZE || !valid {
            return Err(InputError::InvalidLabel.into());
        }
        let mut volume_label = [b' '; VOLUME_LABEL_SIZE];
        for (i, byte) in label.bytes().enumerate() {
            volume_label[i] = byte.to_ascii_uppercase();
        }
        self.io.write(SectorID::BOOT, offset::VOLUME_LABEL, &volume_label)?;
        self.boot_record.volume_label = volume_label;
        self.io.flush()
    }

    /// Drop directory and FAT buffers, hand back underlying IO
    pub fn free(self) -> IO {
        self.io.into_inner()
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::vec::Vec;

    use super::{Attributes, BootRecord, DateTime, Volume};
    use crate::error::{AllocationError, DataError, Error, OperationError};
    use crate::file::ShortName;
    use crate::io::std::FileIO;
    use crate::region::boot::BOOT_RECORD_SIZE;
    use crate::types::ClusterID;

    type Image = FileIO<Cursor<Vec<u8>>>;

    const SECTOR_SIZE: usize = 512;
    const FAT1: usize = SECTOR_SIZE;
    const FAT2: usize = 10 * SECTOR_SIZE;
    const ROOT: usize = 19 * SECTOR_SIZE;
    const DATA: usize = 33 * SECTOR_SIZE;

    fn floppy_boot_record() -> BootRecord {
        BootRecord {
            jump_boot: hex!("EB 3C 90"),
            oem_id: *b"MSWIN4.1",
            bytes_per_sector: 512,
            sectors_per_cluster: 1,
            reserved_sectors: 1,
            number_of_fats: 2,
            root_directory_entries: 224,
            total_sectors: 2880,
            media_descriptor: 0xF0,
            sectors_per_fat: 9,
            sectors_per_track: 18,
            number_of_heads: 2,
            signature: 0x29,
            serial_number: 0xCAFEBABE,
            volume_label: *b"NO NAME    ",
            system_id: *b"FAT12   ",
            ..Default::default()
        }
    }

    /// Blank 1.44M floppy laid out by boot record
    fn format(boot_record: &BootRecord) -> Vec<u8> {
        let total = boot_record.total_sectors() as usize * boot_record.bytes_per_sector as usize;
        let mut image = vec![0u8; total];
        let mut bytes = [0u8; BOOT_RECORD_SIZE];
        boot_record.pack(&mut bytes);
        image[..BOOT_RECORD_SIZE].copy_from_slice(&bytes);
        image[510..512].copy_from_slice(&hex!("55 AA"));
        let sector_size = boot_record.bytes_per_sector as usize;
        for i in 0..boot_record.number_of_fats as usize {
            let sector = boot_record.fat_sector() as usize + i * boot_record.sectors_per_fat as usize;
            let offset = sector * sector_size;
            image[offset..offset + 3].copy_from_slice(&hex!("F0 FF FF"));
        }
        image
    }

    fn floppy() -> Volume<Image> {
        open(format(&floppy_boot_record()))
    }

    fn open(image: Vec<u8>) -> Volume<Image> {
        Volume::new(FileIO::new(Cursor::new(image))).unwrap()
    }

    fn image(volume: Volume<Image>) -> Vec<u8> {
        volume.free().into_inner().into_inner()
    }

    fn name(name: &str) -> ShortName {
        ShortName::parse(name).unwrap()
    }

    fn pattern(length: usize) -> Vec<u8> {
        (0..length).map(|i| (i % 251) as u8 + 1).collect()
    }

    fn clusters(volume: &Volume<Image>, n: &str) -> Vec<u16> {
        let entry = volume.find(&name(n)).unwrap();
        let chain = super::Chain::new(&volume.fat, entry.first_cluster());
        chain.map(|c| u16::from(c.unwrap())).collect()
    }

    #[test]
    fn test_initialise() {
        let volume = floppy();
        assert_eq!(volume.boot_record().root_directory_entries, 224);
        assert_eq!(volume.serial_number(), 0xCAFEBABE);
        assert_eq!(volume.volume_label().as_str(), "NO NAME");
        assert_eq!(volume.cluster_size(), 512);
        assert_eq!(volume.free_clusters(), 2847);
        assert_eq!(volume.list().count(), 0);
    }

    #[test]
    fn test_short_image() {
        let result = Volume::new(FileIO::new(Cursor::new(vec![0u8; 40])));
        assert!(matches!(result, Err(Error::IO(_))));

        let mut image = format(&floppy_boot_record());
        image.truncate(20 * SECTOR_SIZE);
        let result = Volume::new(FileIO::new(Cursor::new(image)));
        assert!(matches!(result, Err(Error::IO(_))));
    }

    #[test]
    fn test_invalid_boot_record() {
        let mut boot_record = floppy_boot_record();
        boot_record.bytes_per_sector = 0;
        let mut image = vec![0u8; 4096];
        let mut bytes = [0u8; BOOT_RECORD_SIZE];
        boot_record.pack(&mut bytes);
        image[..BOOT_RECORD_SIZE].copy_from_slice(&bytes);
        let result = Volume::new(FileIO::new(Cursor::new(image)));
        assert!(matches!(result, Err(Error::Data(DataError::BootRecord(_)))));

        let mut boot_record = floppy_boot_record();
        boot_record.reserved_sectors = 0;
        let mut bytes = [0u8; BOOT_RECORD_SIZE];
        boot_record.pack(&mut bytes);
        let mut image = format(&floppy_boot_record());
        image[..BOOT_RECORD_SIZE].copy_from_slice(&bytes);
        let result = Volume::new(FileIO::new(Cursor::new(image)));
        assert!(matches!(result, Err(Error::Data(DataError::BootRecord(_)))));
    }

    #[test]
    fn test_huge_total_sectors() {
        let mut boot_record = floppy_boot_record();
        let image = format(&boot_record);
        boot_record.total_sectors = 0;
        boot_record.large_sectors = u32::MAX;
        let mut bytes = [0u8; BOOT_RECORD_SIZE];
        boot_record.pack(&mut bytes);
        let mut image = image;
        image[..BOOT_RECORD_SIZE].copy_from_slice(&bytes);
        let volume = open(image);
        assert_eq!(volume.fat.capacity(), 3072);
        assert_eq!(volume.free_clusters(), 3070);
    }

    #[test]
    fn test_create_and_read() {
        let mut volume = floppy();
        let data = pattern(600);
        let hello = ShortName::new(b"HELLO   TXT").unwrap();
        volume.create(&hello, Attributes::archive_file(), &data).unwrap();

        let entry = volume.find(&hello).unwrap();
        assert_eq!(entry.size(), 600);
        assert_eq!(entry.first_cluster(), ClusterID::from(2u16));
        assert_eq!(volume.fat.get(ClusterID::from(2u16)), Ok(3));
        assert!(volume.fat.get(ClusterID::from(3u16)).unwrap() >= 0xFF8);
        assert_eq!(volume.free_clusters(), 2845);

        let bytes = volume.read(&hello).unwrap();
        assert_eq!(bytes.len(), 1024);
        assert_eq!(&bytes[..600], &data[..]);
        assert!(bytes[600..].iter().all(|&b| b == 0));
        assert_eq!(volume.list().collect::<Vec<_>>(), vec![hello]);
    }

    #[test]
    fn test_persisted() {
        let mut volume = floppy();
        let data = pattern(600);
        let hello = name("hello.txt");
        let now = DateTime::now();
        volume.create_at(&hello, Attributes::archive_file(), &data, now).unwrap();

        let image = image(volume);
        assert_eq!(&image[FAT1..FAT1 + 6], &hex!("F0 FF FF 03 F0 FF"));
        assert_eq!(&image[FAT2..FAT2 + 6], &hex!("F0 FF FF 00 00 00"));
        assert_eq!(&image[ROOT..ROOT + 11], b"HELLO   TXT");
        assert_eq!(&image[DATA..DATA + 600], &data[..]);
        assert!(image[DATA + 600..DATA + 1024].iter().all(|&b| b == 0));

        let mut volume = open(image);
        let entry = volume.find(&hello).unwrap();
        assert_eq!(entry.created(), now);
        assert_eq!(entry.modified().date, now.date);
        assert_eq!(&volume.read(&hello).unwrap()[..600], &data[..]);
    }

    #[test]
    fn test_exact_cluster_multiple() {
        let mut volume = floppy();
        let data = pattern(1024);
        volume.create(&name("exact.bin"), Attributes::archive_file(), &data).unwrap();
        assert_eq!(clusters(&volume, "exact.bin"), vec![2, 3]);
        assert_eq!(volume.read(&name("exact.bin")).unwrap(), data);
        assert_eq!(volume.free_clusters(), 2845);
    }

    #[test]
    fn test_zero_length() {
        let mut volume = floppy();
        volume.create(&name("empty"), Attributes::archive_file(), &[]).unwrap();
        let entry = volume.find(&name("empty")).unwrap();
        assert_eq!(entry.size(), 0);
        assert!(!entry.has_clusters());
        assert_eq!(volume.free_clusters(), 2847);
        assert!(volume.read(&name("empty")).unwrap().is_empty());
        volume.delete(&name("empty")).unwrap();
        assert!(volume.find(&name("empty")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate() {
        let mut volume = floppy();
        volume.create(&name("a.txt"), Attributes::archive_file(), b"a").unwrap();
        let result = volume.create(&name("a.txt"), Attributes::archive_file(), b"b");
        assert!(matches!(result, Err(Error::Operation(OperationError::AlreadyExists))));
        assert_eq!(volume.free_clusters(), 2846);
    }

    #[test]
    fn test_delete() {
        let mut volume = floppy();
        volume.create(&name("a.txt"), Attributes::archive_file(), &pattern(1500)).unwrap();
        volume.create(&name("b.txt"), Attributes::archive_file(), &pattern(10)).unwrap();
        let freed = clusters(&volume, "a.txt");
        assert_eq!(freed, vec![2, 3, 4]);

        volume.delete(&name("a.txt")).unwrap();
        for &cluster in freed.iter() {
            assert_eq!(volume.fat.get(ClusterID::from(cluster)), Ok(0));
        }
        assert!(volume.find(&name("a.txt")).unwrap_err().is_not_found());
        assert_eq!(volume.list().collect::<Vec<_>>(), vec![name("b.txt")]);
        assert_eq!(clusters(&volume, "b.txt"), vec![5]);

        let image = image(volume);
        assert_eq!(image[ROOT], 0xE5);
        assert_eq!(&image[ROOT + 26..ROOT + 28], &[0, 0]);
        assert_eq!(&image[FAT1..FAT1 + 9], &hex!("F0 FF FF 00 00 00 00 F0 FF"));

        let mut volume = open(image);
        volume.create(&name("c.txt"), Attributes::archive_file(), &pattern(600)).unwrap();
        assert_eq!(clusters(&volume, "c.txt"), vec![2, 3]);
        let names = volume.list().collect::<Vec<_>>();
        assert_eq!(names, vec![name("c.txt"), name("b.txt")]);
    }

    #[test]
    fn test_delete_not_found() {
        let mut volume = floppy();
        let result = volume.delete(&name("ghost"));
        assert!(matches!(result, Err(Error::Operation(OperationError::NotFound))));
    }

    #[test]
    fn test_delete_corrupt_chain() {
        let mut volume = floppy();
        volume.create(&name("a.txt"), Attributes::archive_file(), &pattern(1500)).unwrap();
        volume.fat.set(ClusterID::from(3u16), 0).unwrap();
        let result = volume.delete(&name("a.txt"));
        let expected = DataError::CorruptChain(ClusterID::from(0u16));
        assert!(matches!(result, Err(Error::Data(e)) if e == expected));
        assert_eq!(volume.fat.get(ClusterID::from(2u16)), Ok(3));
        assert!(volume.find(&name("a.txt")).is_ok());
    }

    #[test]
    fn test_read_corrupt_chain() {
        let mut volume = floppy();
        volume.create(&name("a.txt"), Attributes::archive_file(), &pattern(1500)).unwrap();
        volume.fat.set(ClusterID::from(3u16), 0xFF7).unwrap();
        let result = volume.read(&name("a.txt"));
        assert!(matches!(result, Err(Error::Data(DataError::CorruptChain(_)))));

        volume.fat.set(ClusterID::from(3u16), 0xFFF).unwrap();
        let result = volume.read(&name("a.txt"));
        assert!(matches!(result, Err(Error::Data(DataError::CorruptChain(_)))));
    }

    #[test]
    fn test_read_oversized_entry() {
        let mut volume = floppy();
        volume.create(&name("a.txt"), Attributes::archive_file(), &pattern(600)).unwrap();
        let mut raw = image(volume);
        raw[ROOT + 28..ROOT + 32].copy_from_slice(&hex!("FF FF FF FF"));
        let mut volume = open(raw);
        assert_eq!(volume.find(&name("a.txt")).unwrap().size(), u32::MAX);
        let result = volume.read(&name("a.txt"));
        let expected = DataError::CorruptChain(ClusterID::from(2u16));
        assert!(matches!(result, Err(Error::Data(e)) if e == expected));
    }

    #[test]
    fn test_directory_full() {
        let mut volume = floppy();
        for i in 0..224 {
            let name = name(&format!("f{}", i));
            volume.create(&name, Attributes::archive_file(), &[]).unwrap();
        }
        let result = volume.create(&name("last"), Attributes::archive_file(), &[]);
        assert!(matches!(result, Err(Error::Allocation(AllocationError::DirectoryFull))));

        volume.delete(&name("f100")).unwrap();
        volume.create(&name("last"), Attributes::archive_file(), &[]).unwrap();
        assert_eq!(volume.list().nth(100), Some(name("last")));
    }

    #[test]
    fn test_allocation_exhausted() {
        let mut volume = floppy();
        let data = vec![0x55u8; 2847 * 512 + 1];
        let result = volume.create(&name("huge"), Attributes::archive_file(), &data);
        assert!(matches!(result, Err(Error::Allocation(AllocationError::NoMoreCluster))));
        assert_eq!(volume.free_clusters(), 2847);
        assert!(volume.find(&name("huge")).is_err());

        volume.create(&name("huge"), Attributes::archive_file(), &data[1..]).unwrap();
        assert_eq!(volume.free_clusters(), 0);
        let result = volume.create(&name("more"), Attributes::archive_file(), b"x");
        assert!(matches!(result, Err(Error::Allocation(AllocationError::NoMoreCluster))));
        assert_eq!(&volume.read(&name("huge")).unwrap()[..], &data[1..]);
    }

    #[test]
    fn test_next_free_never_reachable() {
        let mut volume = floppy();
        for (i, length) in [700, 0, 5000, 512, 1].iter().enumerate() {
            let n = format!("f{}", i);
            volume.create(&name(&n), Attributes::archive_file(), &pattern(*length)).unwrap();
        }
        volume.delete(&name("f2")).unwrap();
        let reachable: Vec<u16> = ["f0", "f3", "f4"].iter().flat_map(|n| clusters(&volume, n)).collect();
        let next = u16::from(volume.fat.next_free().unwrap());
        assert!(!reachable.contains(&next));
        assert_eq!(next, 4);
    }

    #[test]
    fn test_list_stops_at_end_of_directory() {
        let mut raw = format(&floppy_boot_record());
        raw[ROOT + 32..ROOT + 43].copy_from_slice(b"GHOST   TXT");
        raw[ROOT + 64..ROOT + 75].copy_from_slice(b"SPOOK   TXT");
        let mut volume = open(raw);
        assert_eq!(volume.list().count(), 0);
        assert!(volume.find(&name("ghost.txt")).is_err());

        volume.create(&name("a.txt"), Attributes::archive_file(), b"a").unwrap();
        volume.create(&name("b.txt"), Attributes::archive_file(), b"b").unwrap();
        let names = volume.list().collect::<Vec<_>>();
        assert_eq!(names, vec![name("a.txt"), name("b.txt")]);

        let image = image(volume);
        assert!(image[ROOT + 64..ROOT + 96].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_escaped_first_character() {
        let mut volume = floppy();
        let escaped = ShortName::new(b"\xE5TUDE   TXT").unwrap();
        volume.create(&escaped, Attributes::archive_file(), b"etude").unwrap();
        assert_eq!(volume.list().collect::<Vec<_>>(), vec![escaped]);
        assert_eq!(&volume.read(&escaped).unwrap()[..5], b"etude");
        assert_eq!(image(volume)[ROOT], 0x05);
    }

    #[test]
    fn test_volume_label() {
        let mut volume = floppy();
        volume.set_volume_label("floppy").unwrap();
        assert_eq!(volume.volume_label().as_str(), "FLOPPY");
        assert!(volume.set_volume_label("much too long").is_err());
        let volume = open(image(volume));
        assert_eq!(volume.volume_label().as_str(), "FLOPPY");
        assert_eq!(&volume.boot_record().volume_label, b"FLOPPY     ");

        let mut boot_record = floppy_boot_record();
        boot_record.signature = 0x28;
        let mut volume = open(format(&boot_record));
        let result = volume.set_volume_label("floppy");
        assert!(matches!(result, Err(Error::Data(DataError::NoExtendedBootRecord))));
    }

    #[test]
    fn test_multi_sector_cluster() {
        let mut boot_record = floppy_boot_record();
        boot_record.sectors_per_cluster = 4;
        let mut volume = open(format(&boot_record));
        assert_eq!(volume.cluster_size(), 2048);
        let data = pattern(5000);
        volume.create(&name("big.bin"), Attributes::archive_file(), &data).unwrap();
        assert_eq!(clusters(&volume, "big.bin"), vec![2, 3, 4]);
        let bytes = volume.read(&name("big.bin")).unwrap();
        assert_eq!(bytes.len(), 6144);
        assert_eq!(&bytes[..5000], &data[..]);

        let image = image(volume);
        let cluster_4 = DATA + 2 * 2048;
        assert_eq!(&image[cluster_4..cluster_4 + 5000 - 4096], &data[4096..]);
    }
}
