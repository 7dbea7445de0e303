use fat12::ShortName;

use crate::error::Error;
use crate::Volume;

pub fn remove(volume: &mut Volume, name: &str) -> Result<(), Error> {
    volume.delete(&ShortName::parse(name)?)?;
    Ok(())
}
