mod cat;
mod error;
mod info;
mod label;
mod list;
mod put;
mod remove;

use clap::Parser;
use fat12::io::std::FileIO;
use fat12::DateTime;

pub(crate) type Volume = fat12::Volume<FileIO>;

#[derive(Debug, clap::Args)]
struct Cat {
    /// Specify 8.3 name to concatenate
    name: String,
    /// Dump in hex instead of raw bytes
    #[clap(long)]
    hex: bool,
}

#[derive(Debug, clap::Args)]
struct Put {
    /// Specify 8.3 name to create
    name: String,
    /// Specify source file to copy from
    source: String,
    #[clap(long)]
    read_only: bool,
    #[clap(long)]
    hidden: bool,
    #[clap(long)]
    system: bool,
}

#[derive(Debug, clap::Args)]
struct Remove {
    /// Specify 8.3 name to delete
    name: String,
}

#[derive(Debug, clap::Args)]
struct Label {
    /// New volume label, print current one if absent
    label: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// List files in root directory
    #[clap(name = "ls")]
    List,
    /// Concatenate file and print on the standard output
    Cat(Cat),
    /// Put file into root directory
    Put(Put),
    /// Remove file
    #[clap(name = "rm")]
    Remove(Remove),
    /// Print or change volume label
    Label(Label),
    /// Print boot record and allocation summary
    Info,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Disk image or block device formatted with FAT12
    #[clap(short, long)]
    device: String,
    #[clap(subcommand)]
    action: Action,
}

#[no_mangle]
fn fat12_datetime_now() -> DateTime {
    chrono::Local::now().naive_local().into()
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stderr).init();

    let read_only = match &args.action {
        Action::List | Action::Cat(_) | Action::Info => true,
        Action::Label(label) => label.label.is_none(),
        Action::Put(_) | Action::Remove(_) => false,
    };
    let result = match read_only {
        true => Volume::open_read_only(&args.device),
        false => Volume::open(&args.device),
    };
    let mut volume = match result {
        Ok(volume) => volume,
        Err(error) => {
            eprintln!("{}: {}", args.device, error);
            std::process::exit(1);
        }
    };

    let result = match args.action {
        Action::List => list::list(&volume),
        Action::Cat(args) => cat::cat(&mut volume, &args.name, args.hex),
        Action::Put(args) => put::put(&mut volume, &args),
        Action::Remove(args) => remove::remove(&mut volume, &args.name),
        Action::Label(args) => label::label(&mut volume, args.label.as_deref()),
        Action::Info => info::info(&volume),
    };
    if let Some(error) = result.err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
