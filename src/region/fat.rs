use crate::types::ClusterID;

pub const FREE: u16 = 0x000;
pub const BAD_CLUSTER: u16 = 0xFF7;
/// Any value from this one up to 0xFFF terminates a chain
pub const END_OF_CHAIN: u16 = 0xFF8;
/// Value written when terminating a chain
pub const LAST: u16 = 0xFFF;
pub const ENTRY_MASK: u16 = 0xFFF;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    Free,
    Reserved,
    Next(ClusterID),
    BadCluster,
    Last,
}

impl From<u16> for Entry {
    fn from(value: u16) -> Self {
        match value & ENTRY_MASK {
            FREE => Self::Free,
            1 => Self::Reserved,
            BAD_CLUSTER => Self::BadCluster,
            END_OF_CHAIN..=LAST => Self::Last,
            value => Self::Next(value.into()),
        }
    }
}

impl From<Entry> for u16 {
    fn from(entry: Entry) -> u16 {
        match entry {
            Entry::Free => FREE,
            Entry::Reserved => 1,
            Entry::Next(cluster_id) => cluster_id.into(),
            Entry::BadCluster => BAD_CLUSTER,
            Entry::Last => LAST,
        }
    }
}
