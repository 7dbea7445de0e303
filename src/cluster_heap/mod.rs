/// Cluster chain walking, allocation and release over the FAT
pub(crate) mod chain;
/// Root directory entries store
pub(crate) mod root;
