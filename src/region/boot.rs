// Boot record, BIOS parameter block followed by the extended one

use crate::endian::{array, read, write};
use crate::error::DataError;
use crate::region::data::entry::ENTRY_SIZE;

/// Byte offsets of every boot record field, the header has no padding
pub(crate) mod offset {
    pub const JUMP_BOOT: usize = 0;
    pub const OEM_ID: usize = 3;
    pub const BYTES_PER_SECTOR: usize = 11;
    pub const SECTORS_PER_CLUSTER: usize = 13;
    pub const RESERVED_SECTORS: usize = 14;
    pub const NUMBER_OF_FATS: usize = 16;
    pub const ROOT_DIRECTORY_ENTRIES: usize = 17;
    pub const TOTAL_SECTORS: usize = 19;
    pub const MEDIA_DESCRIPTOR: usize = 21;
    pub const SECTORS_PER_FAT: usize = 22;
    pub const SECTORS_PER_TRACK: usize = 24;
    pub const NUMBER_OF_HEADS: usize = 26;
    pub const HIDDEN_SECTORS: usize = 28;
    pub const LARGE_SECTORS: usize = 32;
    // EBPB
    pub const DRIVE_NUMBER: usize = 36;
    pub const NT_FLAGS: usize = 37;
    pub const SIGNATURE: usize = 38;
    pub const SERIAL_NUMBER: usize = 39;
    pub const VOLUME_LABEL: usize = 43;
    pub const SYSTEM_ID: usize = 54;
}

pub const BOOT_RECORD_SIZE: usize = 62;

/// EBPB signature when only serial number follows
pub const SIGNATURE_SERIAL: u8 = 0x28;
/// EBPB signature when serial number, volume label and system id follow
pub const SIGNATURE_FULL: u8 = 0x29;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BootRecord {
    pub jump_boot: [u8; 3],
    pub oem_id: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub root_directory_entries: u16,
    /// 0 means large_sectors is used instead
    pub total_sectors: u16,
    pub media_descriptor: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub large_sectors: u32,
    pub drive_number: u8,
    pub nt_flags: u8,
    pub signature: u8,
    pub serial_number: u32,
    pub volume_label: [u8; 11],
    pub system_id: [u8; 8],
}

impl BootRecord {
    pub fn unpack(bytes: &[u8; BOOT_RECORD_SIZE]) -> Self {
        Self {
            jump_boot: array(bytes, offset::JUMP_BOOT),
            oem_id: array(bytes, offset::OEM_ID),
            bytes_per_sector: read(bytes, offset::BYTES_PER_SECTOR),
            sectors_per_cluster: read(bytes, offset::SECTORS_PER_CLUSTER),
            reserved_sectors: read(bytes, offset::RESERVED_SECTORS),
            number_of_fats: read(bytes, offset::NUMBER_OF_FATS),
            root_directory_entries: read(bytes, offset::ROOT_DIRECTORY_ENTRIES),
            total_sectors: read(bytes, offset::TOTAL_SECTORS),
            media_descriptor: read(bytes, offset::MEDIA_DESCRIPTOR),
            sectors_per_fat: read(bytes, offset::SECTORS_PER_FAT),
            sectors_per_track: read(bytes, offset::SECTORS_PER_TRACK),
            number_of_heads: read(bytes, offset::NUMBER_OF_HEADS),
            hidden_sectors: read(bytes, offset::HIDDEN_SECTORS),
            large_sectors: read(bytes, offset::LARGE_SECTORS),
            drive_number: read(bytes, offset::DRIVE_NUMBER),
            nt_flags: read(bytes, offset::NT_FLAGS),
            signature: read(bytes, offset::SIGNATURE),
            serial_number: read(bytes, offset::SERIAL_NUMBER),
            volume_label: array(bytes, offset::VOLUME_LABEL),
            system_id: array(bytes, offset::SYSTEM_ID),
        }
    }

    pub fn pack(&self, bytes: &mut [u8; BOOT_RECORD_SIZE]) {
        bytes[offset::JUMP_BOOT..offset::OEM_ID].copy_from_slice(&self.jump_boot);
        bytes[offset::OEM_ID..offset::BYTES_PER_SECTOR].copy_from_slice(&self.oem_id);
        write(bytes, offset::BYTES_PER_SECTOR, self.bytes_per_sector);
        write(bytes, offset::SECTORS_PER_CLUSTER, self.sectors_per_cluster);
        write(bytes, offset::RESERVED_SECTORS, self.reserved_sectors);
        write(bytes, offset::NUMBER_OF_FATS, self.number_of_fats);
        write(bytes, offset::ROOT_DIRECTORY_ENTRIES, self.root_directory_entries);
        write(bytes, offset::TOTAL_SECTORS, self.total_sectors);
        write(bytes, offset::MEDIA_DESCRIPTOR, self.media_descriptor);
        write(bytes, offset::SECTORS_PER_FAT, self.sectors_per_fat);
        write(bytes, offset::SECTORS_PER_TRACK, self.sectors_per_track);
        write(bytes, offset::NUMBER_OF_HEADS, self.number_of_heads);
        write(bytes, offset::HIDDEN_SECTORS, self.hidden_sectors);
        write(bytes, offset::LARGE_SECTORS, self.large_sectors);
        write(bytes, offset::DRIVE_NUMBER, self.drive_number);
        write(bytes, offset::NT_FLAGS, self.nt_flags);
        write(bytes, offset::SIGNATURE, self.signature);
        write(bytes, offset::SERIAL_NUMBER, self.serial_number);
        bytes[offset::VOLUME_LABEL..offset::SYSTEM_ID].copy_from_slice(&self.volume_label);
        bytes[offset::SYSTEM_ID..].copy_from_slice(&self.system_id);
    }

    pub(crate) fn validate(&self) -> Result<(), DataError> {
        if self.bytes_per_sector == 0 {
            return Err(DataError::BootRecord("zero bytes per sector"));
        }
        if self.sectors_per_cluster == 0 {
            return Err(DataError::BootRecord("zero sectors per cluster"));
        }
        if self.reserved_sectors == 0 {
            return Err(DataError::BootRecord("boot record overlapped by FAT"));
        }
        if self.number_of_fats == 0 {
            return Err(DataError::BootRecord("no FAT"));
        }
        if (self.bytes_per_sector as usize) % ENTRY_SIZE != 0 {
            return Err(DataError::BootRecord("sector size not a multiple of entry size"));
        }
        Ok(())
    }

    pub fn has_extended_boot_record(&self) -> bool {
        matches!(self.signature, SIGNATURE_SERIAL | SIGNATURE_FULL)
    }

    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors {
            0 => self.large_sectors,
            sectors => sectors as u32,
        }
    }

    pub fn cluster_size(&self) -> u32 {
        self.bytes_per_sector as u32 * self.sectors_per_cluster as u32
    }

    /// LBA of the first FAT copy
    pub fn fat_sector(&self) -> u32 {
        self.reserved_sectors as u32
    }

    pub fn root_directory_sector(&self) -> u32 {
        self.fat_sector() + self.number_of_fats as u32 * self.sectors_per_fat as u32
    }

    /// Rounded up so that every entry fits
    pub fn root_directory_sectors(&self) -> u32 {
        let bytes = self.root_directory_entries as u32 * ENTRY_SIZE as u32;
        bytes.div_ceil(self.bytes_per_sector as u32)
    }

    pub fn data_sector(&self) -> u32 {
        self.root_directory_sector() + self.root_directory_sectors()
    }

    /// Number of data clusters backed by sectors, 0 when total sector count unknown
    pub fn num_clusters(&self) -> u32 {
        let total = self.total_sectors();
        match total > self.data_sector() {
            true => (total - self.data_sector()) / self.sectors_per_cluster as u32,
            false => 0,
        }
    }
}
