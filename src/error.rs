use core::fmt::{Debug, Display, Formatter, Result};

use displaydoc::Display as DisplayDoc;
use thiserror::Error as ThisError;

use crate::types::ClusterID;

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum DataError {
    /// Invalid boot record: {0}
    BootRecord(&'static str),
    /// Corrupted cluster chain at cluster {0}
    CorruptChain(ClusterID),
    /// Extended boot record not present
    NoExtendedBootRecord,
}

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum OperationError {
    /// No such file
    NotFound,
    /// File already exists
    AlreadyExists,
}

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum AllocationError {
    /// No free cluster left
    NoMoreCluster,
    /// No free root directory entry left
    DirectoryFull,
}

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum InputError {
    /// Invalid short name
    InvalidName,
    /// Invalid volume label
    InvalidLabel,
}

#[derive(Debug, ThisError)]
pub enum Error<E: Debug> {
    IO(E),
    Data(#[from] DataError),
    Operation(#[from] OperationError),
    Allocation(#[from] AllocationError),
    Input(#[from] InputError),
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::IO(e) => write!(f, "IO({:?})", e),
            Self::Data(e) => write!(f, "{}", e),
            Self::Operation(e) => write!(f, "{}", e),
            Self::Allocation(e) => write!(f, "{}", e),
            Self::Input(e) => write!(f, "{}", e),
        }
    }
}

impl<E: Debug> Error<E> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Operation(OperationError::NotFound))
    }
}
