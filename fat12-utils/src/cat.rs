use std::io::{self, Write};

use fat12::ShortName;
use pretty_hex::pretty_hex;

use crate::error::Error;
use crate::Volume;

pub fn cat(volume: &mut Volume, name: &str, hex: bool) -> Result<(), Error> {
    let name = ShortName::parse(name)?;
    let size = volume.find(&name)?.size() as usize;
    let bytes = volume.read(&name)?;
    let data = &bytes[..size];
    let mut stdout = io::stdout();
    match hex {
        true => writeln!(stdout, "{}", pretty_hex(&data))?,
        false => stdout.write_all(data)?,
    }
    Ok(())
}
