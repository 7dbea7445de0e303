use fat12::{Attributes, ShortName};

use crate::error::Error;
use crate::{Put, Volume};

pub fn put(volume: &mut Volume, args: &Put) -> Result<(), Error> {
    let name = ShortName::parse(&args.name)?;
    let data = std::fs::read(&args.source).map_err(|e| Error::Source(args.source.clone(), e))?;
    log::debug!("Read {} bytes from {}", data.len(), args.source);
    let mut attributes = Attributes::archive_file();
    attributes.set_read_only(args.read_only as u8);
    attributes.set_hidden(args.hidden as u8);
    attributes.set_system(args.system as u8);
    volume.create(&name, attributes, &data)?;
    Ok(())
}
