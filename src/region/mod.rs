/// Boot region, volume geometry parameters
/// [`reserved-sectors`][link] sectors, boot record lives in the first one
///
/// [link]: boot::BootRecord
pub(crate) mod boot;

/// FAT region, packed 12 bits cluster links
/// [`number-of-fats`][link] * [`sectors-per-fat`][link] sectors, only the first copy is used
///
/// [link]: boot::BootRecord
pub(crate) mod fat;

/// Root directory followed by data region
pub(crate) mod data;
