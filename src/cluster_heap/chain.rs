use alloc::vec::Vec;

use crate::error::{AllocationError, DataError};
use crate::fat::FAT;
use crate::region::fat::{Entry, FREE, LAST};
use crate::types::ClusterID;

/// Data clusters of a file in chain order
pub(crate) struct Chain<'a> {
    fat: &'a FAT,
    next: Entry,
    remain: u16,
    done: bool,
}

impl<'a> Chain<'a> {
    pub fn new(fat: &'a FAT, first: ClusterID) -> Self {
        let remain = fat.capacity();
        Self { fat, next: Entry::from(u16::from(first)), remain, done: false }
    }

    fn fail(&mut self, error: DataError) -> Option<Result<ClusterID, DataError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl Iterator for Chain<'_> {
    type Item = Result<ClusterID, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let cluster_id = match self.next {
            Entry::Last => return None,
            Entry::Next(cluster_id) => cluster_id,
            entry => {
                warn!("Unexpected entry {:?} in chain", entry);
                return self.fail(DataError::CorruptChain(u16::from(entry).into()));
            }
        };
        if self.remain == 0 {
            warn!("Chain longer than FAT capacity, looped at cluster {}", cluster_id);
            return self.fail(DataError::CorruptChain(cluster_id));
        }
        self.remain -= 1;
        self.next = match self.fat.entry(cluster_id) {
            Ok(entry) => entry,
            Err(e) => return self.fail(e),
        };
        Some(Ok(cluster_id))
    }
}

/// Build a fresh chain of count clusters, returns first cluster or None when count is 0.
/// Claimed clusters are given back when running out of free clusters.
pub(crate) fn allocate(fat: &mut FAT, count: u32) -> Result<Option<ClusterID>, AllocationError> {
    let mut first: Option<ClusterID> = None;
    let mut last: Option<ClusterID> = None;
    for _ in 0..count {
        let cluster_id = match fat.next_free() {
            Ok(cluster_id) => cluster_id,
            Err(e) => {
                if let Some(first) = first {
                    debug!("Out of clusters, give back chain from cluster {}", first);
                    if let Err(e) = release(fat, first) {
                        warn!("Unable to give back chain from cluster {}: {}", first, e);
                    }
                }
                return Err(e);
            }
        };
        // Within capacity as returned by next_free
        fat.set(cluster_id, LAST).map_err(|_| AllocationError::NoMoreCluster)?;
        match last {
            Some(last) => fat.set(last, cluster_id.into()).map_err(|_| AllocationError::NoMoreCluster)?,
            None => first = Some(cluster_id),
        }
        trace!("Allocated cluster {}", cluster_id);
        last = Some(cluster_id);
    }
    Ok(first)
}

/// Free every cluster of the chain, the chain is validated as a whole before any entry changes
pub(crate) fn release(fat: &mut FAT, first: ClusterID) -> Result<usize, DataError> {
    let clusters = Chain::new(fat, first).collect::<Result<Vec<_>, _>>()?;
    for &cluster_id in clusters.iter() {
        trace!("Release cluster {}", cluster_id);
        fat.set(cluster_id, FREE)?;
    }
    Ok(clusters.len())
}
