use std::io;

use fat12::error::{Error as VolumeError, InputError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Volume(#[from] VolumeError<io::Error>),
    #[error("{0}")]
    Name(#[from] InputError),
    #[error("{0}: {1}")]
    Source(String, io::Error),
    #[error("{0}")]
    Output(#[from] io::Error),
}
