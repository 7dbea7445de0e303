use chrono::NaiveDateTime;

use crate::error::Error;
use crate::Volume;

pub fn list(volume: &Volume) -> Result<(), Error> {
    for entry in volume.entries() {
        let attrs = entry.attributes();
        print!("{}", if attrs.read_only() > 0 { "r" } else { "-" });
        print!("{}", if attrs.system() > 0 { "s" } else { "-" });
        print!("{}", if attrs.hidden() > 0 { "h" } else { "-" });
        print!("{}", if attrs.archive() > 0 { "a" } else { "-" });
        print!(" {:8}", entry.size());
        let modified_at = NaiveDateTime::from(entry.modified());
        print!(" {}", modified_at.format("%Y-%m-%d %H:%M:%S"));
        println!(" {}", entry.name());
    }
    Ok(())
}
