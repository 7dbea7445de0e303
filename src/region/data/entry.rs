use bitfield::bitfield;
#[cfg(feature = "chrono")]
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use derive_more::{From, Into};

use crate::endian::{array, read, write};
use crate::file::ShortName;
use crate::region::fat::ENTRY_MASK;
use crate::types::ClusterID;

pub(crate) const ENTRY_SIZE: usize = 32;
pub(crate) type RawEntry = [u8; ENTRY_SIZE];

/// Name byte 0 sentinels
pub(crate) const END_OF_DIRECTORY: u8 = 0x00;
pub(crate) const FREE: u8 = 0xE5;
/// Stands for a literal 0xE5 as first name character
pub(crate) const ESCAPED_E5: u8 = 0x05;

mod offset {
    pub const NAME: usize = 0;
    pub const ATTRIBUTES: usize = 11;
    pub const NT_RESERVED: usize = 12;
    pub const CREATE_CENTISECOND: usize = 13;
    pub const CREATE_TIME: usize = 14;
    pub const CREATE_DATE: usize = 16;
    pub const ACCESS_DATE: usize = 18;
    pub const FIRST_CLUSTER_HIGH: usize = 20;
    pub const MODIFIED_TIME: usize = 22;
    pub const MODIFIED_DATE: usize = 24;
    pub const FIRST_CLUSTER_LOW: usize = 26;
    pub const SIZE: usize = 28;
}

bitfield! {
    #[derive(Copy, Clone, Debug, Default, From, Into, PartialEq, Eq)]
    pub struct Attributes(u8);
    pub read_only, set_read_only: 0, 0;
    pub hidden, set_hidden: 1, 1;
    pub system, set_system: 2, 2;
    pub volume_id, set_volume_id: 3, 3;
    pub directory, set_directory: 4, 4;
    pub archive, set_archive: 5, 5;
}

impl Attributes {
    pub fn archive_file() -> Self {
        let mut attributes = Self::default();
        attributes.set_archive(1);
        attributes
    }
}

bitfield! {
    #[derive(Copy, Clone, Debug, Default, From, Into, PartialEq, Eq)]
    pub struct Time(u16);
    pub hour, set_hour: 15, 11;
    pub minute, set_minute: 10, 5;
    double_second, set_double_second: 4, 0;
}

impl Time {
    pub fn second(&self) -> u16 {
        self.double_second() * 2
    }

    pub fn set_second(&mut self, second: u16) {
        self.set_double_second(second / 2)
    }
}

bitfield! {
    #[derive(Copy, Clone, Debug, From, Into, PartialEq, Eq)]
    pub struct Date(u16);
    year_offset, set_year_offset: 15, 9;
    pub month, set_month: 8, 5;
    pub day, set_day: 4, 0;
}

impl Date {
    pub fn year(&self) -> u16 {
        self.year_offset() + 1980
    }

    /// Clamped into 1980..=2107
    pub fn set_year(&mut self, year: u16) {
        self.set_year_offset(year.clamp(1980, 2107) - 1980)
    }
}

impl Default for Date {
    /// 1980-01-01
    fn default() -> Self {
        Self((1 << 5) | 1)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
    /// Hundredths of a second added to time, 0..=199
    pub centisecond: u8,
}

#[cfg(feature = "extern-datetime-now")]
unsafe extern "Rust" {
    pub(crate) fn fat12_datetime_now() -> DateTime;
}

impl DateTime {
    pub fn now() -> Self {
        match () {
            #[cfg(feature = "extern-datetime-now")]
            () => unsafe { fat12_datetime_now() },
            #[cfg(all(feature = "std", not(feature = "extern-datetime-now")))]
            () => chrono::Local::now().naive_local().into(),
            #[cfg(not(any(feature = "std", feature = "extern-datetime-now")))]
            () => Self::default(),
        }
    }
}

#[cfg(feature = "chrono")]
impl From<NaiveDateTime> for DateTime {
    fn from(datetime: NaiveDateTime) -> Self {
        let mut date = Date::default();
        date.set_year(datetime.year().clamp(0, u16::MAX as i32) as u16);
        date.set_month(datetime.month() as u16);
        date.set_day(datetime.day() as u16);
        let mut time = Time::default();
        time.set_hour(datetime.hour() as u16);
        time.set_minute(datetime.minute() as u16);
        time.set_second(datetime.second() as u16);
        let centisecond = (datetime.second() % 2) * 100 + datetime.nanosecond() / 10_000_000;
        Self { date, time, centisecond: core::cmp::min(centisecond, 199) as u8 }
    }
}

#[cfg(feature = "chrono")]
impl From<DateTime> for NaiveDateTime {
    fn from(datetime: DateTime) -> Self {
        let (date, time) = (datetime.date, datetime.time);
        let date = NaiveDate::from_ymd_opt(date.year() as i32, date.month() as u32, date.day() as u32);
        let second = time.second() as u32 + datetime.centisecond as u32 / 100;
        let millis = (datetime.centisecond as u32 % 100) * 10;
        let time = NaiveTime::from_hms_milli_opt(time.hour() as u32, time.minute() as u32, second, millis);
        NaiveDateTime::new(date.unwrap_or_default(), time.unwrap_or_default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EntryState {
    EndOfDirectory,
    Free,
    InUse,
}

/// Decoded copy of a 32 bytes root directory entry
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: [u8; 11],
    attributes: Attributes,
    nt_reserved: u8,
    create_centisecond: u8,
    create_time: Time,
    create_date: Date,
    access_date: Date,
    first_cluster_high: u16,
    modified_time: Time,
    modified_date: Date,
    first_cluster_low: u16,
    size: u32,
}

impl DirectoryEntry {
    pub(crate) fn new(name: &ShortName, attributes: Attributes, now: DateTime, size: u32) -> Self {
        Self {
            name: name.to_raw(),
            attributes,
            create_centisecond: now.centisecond,
            create_time: now.time,
            create_date: now.date,
            access_date: now.date,
            modified_time: now.time,
            modified_date: now.date,
            size,
            ..Default::default()
        }
    }

    pub(crate) fn unpack(bytes: &RawEntry) -> Self {
        Self {
            name: array(bytes, offset::NAME),
            attributes: read::<u8>(bytes, offset::ATTRIBUTES).into(),
            nt_reserved: read(bytes, offset::NT_RESERVED),
            create_centisecond: read(bytes, offset::CREATE_CENTISECOND),
            create_time: read::<u16>(bytes, offset::CREATE_TIME).into(),
            create_date: read::<u16>(bytes, offset::CREATE_DATE).into(),
            access_date: read::<u16>(bytes, offset::ACCESS_DATE).into(),
            first_cluster_high: read(bytes, offset::FIRST_CLUSTER_HIGH),
            modified_time: read::<u16>(bytes, offset::MODIFIED_TIME).into(),
            modified_date: read::<u16>(bytes, offset::MODIFIED_DATE).into(),
            first_cluster_low: read(bytes, offset::FIRST_CLUSTER_LOW),
            size: read(bytes, offset::SIZE),
        }
    }

    pub(crate) fn pack(&self, bytes: &mut RawEntry) {
        bytes[offset::NAME..offset::ATTRIBUTES].copy_from_slice(&self.name);
        write(bytes, offset::ATTRIBUTES, u8::from(self.attributes));
        write(bytes, offset::NT_RESERVED, self.nt_reserved);
        write(bytes, offset::CREATE_CENTISECOND, self.create_centisecond);
        write(bytes, offset::CREATE_TIME, u16::from(self.create_time));
        write(bytes, offset::CREATE_DATE, u16::from(self.create_date));
        write(bytes, offset::ACCESS_DATE, u16::from(self.access_date));
        write(bytes, offset::FIRST_CLUSTER_HIGH, self.first_cluster_high);
        write(bytes, offset::MODIFIED_TIME, u16::from(self.modified_time));
        write(bytes, offset::MODIFIED_DATE, u16::from(self.modified_date));
        write(bytes, offset::FIRST_CLUSTER_LOW, self.first_cluster_low);
        write(bytes, offset::SIZE, self.size);
    }

    pub(crate) fn state(&self) -> EntryState {
        match self.name[0] {
            END_OF_DIRECTORY => EntryState::EndOfDirectory,
            FREE => EntryState::Free,
            _ => EntryState::InUse,
        }
    }

    pub(crate) fn raw_name(&self) -> &[u8; 11] {
        &self.name
    }

    pub fn name(&self) -> ShortName {
        ShortName::from_raw(self.name)
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    /// FAT12 only takes low 12 bits, 0 when no cluster allocated
    pub fn first_cluster(&self) -> ClusterID {
        ClusterID::from(self.first_cluster_low & ENTRY_MASK)
    }

    /// Zero length files may carry no cluster at all
    pub fn has_clusters(&self) -> bool {
        self.first_cluster_low & ENTRY_MASK != 0
    }

    pub(crate) fn set_first_cluster(&mut self, cluster_id: ClusterID) {
        self.first_cluster_low = u16::from(cluster_id) & ENTRY_MASK;
    }

    /// In bytes
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn created(&self) -> DateTime {
        DateTime { date: self.create_date, time: self.create_time, centisecond: self.create_centisecond }
    }

    pub fn modified(&self) -> DateTime {
        DateTime { date: self.modified_date, time: self.modified_time, centisecond: 0 }
    }

    pub fn accessed(&self) -> Date {
        self.access_date
    }

    pub(crate) fn release(&mut self) {
        self.name[0] = FREE;
        self.first_cluster_low = 0;
    }
}
