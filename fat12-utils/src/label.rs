use crate::error::Error;
use crate::Volume;

pub fn label(volume: &mut Volume, label: Option<&str>) -> Result<(), Error> {
    match label {
        Some(label) => volume.set_volume_label(label)?,
        None => println!("{}", volume.volume_label()),
    }
    Ok(())
}
