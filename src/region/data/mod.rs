/// Root directory entries, 32 bytes each
pub(crate) mod entry;
