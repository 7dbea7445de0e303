use std::str::from_utf8;

use crate::error::Error;
use crate::Volume;

pub fn info(volume: &Volume) -> Result<(), Error> {
    let boot_record = volume.boot_record();
    println!("OEM ID:              {}", from_utf8(&boot_record.oem_id).unwrap_or("?"));
    println!("Bytes per sector:    {}", boot_record.bytes_per_sector);
    println!("Sectors per cluster: {}", boot_record.sectors_per_cluster);
    println!("Reserved sectors:    {}", boot_record.reserved_sectors);
    println!("FAT copies:          {}", boot_record.number_of_fats);
    println!("Sectors per FAT:     {}", boot_record.sectors_per_fat);
    println!("Root entries:        {}", boot_record.root_directory_entries);
    println!("Total sectors:       {}", boot_record.total_sectors());
    println!("Media descriptor:    {:#04X}", boot_record.media_descriptor);
    let serial = volume.serial_number();
    println!("Serial number:       {:04X}-{:04X}", serial >> 16, serial & 0xFFFF);
    println!("Volume label:        {}", volume.volume_label());
    println!("System ID:           {}", from_utf8(&boot_record.system_id).unwrap_or("?"));
    println!("Cluster size:        {}", volume.cluster_size());
    println!("Data clusters:       {}", boot_record.num_clusters());
    println!("Free clusters:       {}", volume.free_clusters());
    Ok(())
}
