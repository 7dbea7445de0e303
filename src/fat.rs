use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::{AllocationError, DataError, Error};
use crate::io::{self, Wrapper};
use crate::region::boot::BootRecord;
use crate::region::fat::{Entry, BAD_CLUSTER, ENTRY_MASK, FREE};
use crate::types::{ClusterID, SectorID};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Info {
    /// unit sector
    pub offset: u32,
    /// unit sector
    pub length: u16,
}

impl Info {
    pub fn new(boot_record: &BootRecord) -> Self {
        Self { offset: boot_record.fat_sector(), length: boot_record.sectors_per_fat }
    }
}

/// In memory copy of the first FAT, entries are 12 bits and two of them share three bytes
pub(crate) struct FAT {
    info: Info,
    bytes: Vec<u8>,
    capacity: u16,
}

impl FAT {
    /// num_clusters being data clusters backed by sectors, 0 if unknown
    pub fn new(info: Info, bytes: Vec<u8>, num_clusters: u32) -> Self {
        let mut capacity = core::cmp::min(bytes.len() * 2 / 3, BAD_CLUSTER as usize) as u16;
        if num_clusters > 0 && num_clusters.saturating_add(2) < capacity as u32 {
            capacity = num_clusters as u16 + 2;
        }
        Self { info, bytes, capacity }
    }

    pub fn load<E: Debug, IO>(io: &mut Wrapper<IO>, boot_record: &BootRecord) -> Result<Self, Error<E>>
    where
        IO: io::IO<Error = E>,
    {
        let info = Info::new(boot_record);
        debug!("FAT offset {} length {}", info.offset, info.length);
        let bytes = io.read_sectors(SectorID::from(info.offset as u64), info.length as u32)?;
        let fat = Self::new(info, bytes, boot_record.num_clusters());
        debug!("FAT capacity {} entries", fat.capacity);
        Ok(fat)
    }

    /// Number of addressable entries, including the two reserved
    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    fn index(&self, cluster_id: ClusterID) -> Result<usize, DataError> {
        let cluster = u16::from(cluster_id);
        if cluster >= self.capacity {
            warn!("Cluster {} out of FAT capacity {}", cluster, self.capacity);
            return Err(DataError::CorruptChain(cluster_id));
        }
        Ok(cluster as usize * 3 / 2)
    }

    pub fn get(&self, cluster_id: ClusterID) -> Result<u16, DataError> {
        let index = self.index(cluster_id)?;
        let word = u16::from_le_bytes([self.bytes[index], self.bytes[index + 1]]);
        Ok(match u16::from(cluster_id) & 1 {
            1 => word >> 4,
            _ => word & ENTRY_MASK,
        })
    }

    /// Only the 12 bits owned by cluster_id change, neighbor's half byte stays untouched
    pub fn set(&mut self, cluster_id: ClusterID, value: u16) -> Result<(), DataError> {
        let index = self.index(cluster_id)?;
        let value = value & ENTRY_MASK;
        match u16::from(cluster_id) & 1 {
            1 => {
                self.bytes[index] = (self.bytes[index] & 0x0F) | ((value & 0x0F) << 4) as u8;
                self.bytes[index + 1] = (value >> 4) as u8;
            }
            _ => {
                self.bytes[index] = value as u8;
                self.bytes[index + 1] = (self.bytes[index + 1] & 0xF0) | (value >> 8) as u8;
            }
        }
        Ok(())
    }

    pub fn entry(&self, cluster_id: ClusterID) -> Result<Entry, DataError> {
        self.get(cluster_id).map(Entry::from)
    }

    /// First fit from cluster 2 upwards
    pub fn next_free(&self) -> Result<ClusterID, AllocationError> {
        let mut cluster_id = ClusterID::FIRST;
        while u16::from(cluster_id) < self.capacity {
            if self.get(cluster_id) == Ok(FREE) {
                return Ok(cluster_id);
            }
            cluster_id += 1u16;
        }
        Err(AllocationError::NoMoreCluster)
    }

    pub fn num_free(&self) -> u16 {
        let clusters = u16::from(ClusterID::FIRST)..self.capacity;
        clusters.filter(|&cluster| self.get(cluster.into()) == Ok(FREE)).count() as u16
    }

    /// Writes back over first FAT only, other copies are left as is
    pub fn persist<E: Debug, IO: io::IO<Error = E>>(&self, io: &mut Wrapper<IO>) -> Result<(), Error<E>> {
        trace!("Persist FAT at sector {}", self.info.offset);
        io.write_sectors(SectorID::from(self.info.offset as u64), &self.bytes)
    }
}
