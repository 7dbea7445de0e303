use crate::region::boot::BootRecord;
use crate::types::{ClusterID, SectorID};

#[derive(Copy, Clone, Debug)]
pub struct Info {
    pub data_offset: u32,
    pub sectors_per_cluster: u8,
    pub sector_size: u16,
}

impl Info {
    pub fn new(boot_record: &BootRecord) -> Self {
        Self {
            data_offset: boot_record.data_sector(),
            sectors_per_cluster: boot_record.sectors_per_cluster,
            sector_size: boot_record.bytes_per_sector,
        }
    }

    pub fn cluster_size(&self) -> u32 {
        self.sector_size as u32 * self.sectors_per_cluster as u32
    }

    /// Number of clusters needed to hold length bytes
    pub fn num_clusters(&self, length: u32) -> u32 {
        length.div_ceil(self.cluster_size())
    }

    /// First sector of a data cluster, caller guarantees cluster id valid
    pub fn cluster_sector(&self, cluster_id: ClusterID) -> SectorID {
        let num_sectors = cluster_id.offset() as u64 * self.sectors_per_cluster as u64;
        SectorID::from(self.data_offset as u64 + num_sectors)
    }
}
