use clap::Parser;
use log::info;
use std::{fmt::Display, fmt::Formatter};

use super::arch::Architecture;
use crate::compression::scheme::EncodeType;

/// Zip, Unzip, Test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything the binary needs to know to run.
#[derive(Debug)]
pub struct RvOpts {
    /// Name of the file to read for input
    pub file: String,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Scheme used when compressing
    pub encode_type: EncodeType,
    /// Instruction set of the input
    pub arch: Architecture,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Print every dictionary after compressing
    pub show_dicts: bool,
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Dictionary and bitmask compression of RISC-V code sections",
    long_about = "
    Compresses the raw code section of a RISC-V program. Every instruction is coded as a
    dictionary index, a dictionary index plus a one-field patch (a mask), or a literal.
    The compressed code is written to <file>.rvz and each dictionary to <file>.rvz<dict name>."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Compress with every supported scheme, verify, and report sizes
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Compression scheme
    #[clap(short = 'e', long = "encoding", value_enum, default_value = "mask-duo")]
    encoding: EncodeType,

    /// Instruction set of the input
    #[clap(short = 'a', long = "arch", value_enum, default_value = "rv32")]
    arch: Architecture,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Print the dictionaries after compressing
    #[clap(long = "show-dicts")]
    show_dicts: bool,

    /// Sets verbosity. -v1 shows very little, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.test {
            Mode::Test
        } else if self.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        }
    }
}

/// Map the -v value to a log level. 0 is silent, 5 and up is trace.
pub fn level_filter(v: u8) -> log::LevelFilter {
    match v {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Put command line information from CLAP into our internal structure.
pub fn rvopts_init() -> RvOpts {
    rvopts_from(Args::parse())
}

fn rvopts_from(args: Args) -> RvOpts {
    // Set the log level
    log::set_max_level(level_filter(args.v));

    let opts = RvOpts {
        op_mode: args.mode(),
        file: args.filename,
        encode_type: args.encoding,
        arch: args.arch,
        force_overwrite: args.force,
        show_dicts: args.show_dicts,
    };

    // Below we report initialization status to the user
    info!("---- rvzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    info!("Architecture set to {}", opts.arch);
    if opts.op_mode == Mode::Zip {
        info!("Encoding set to {}", opts.encode_type)
    };
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- rvzip Initialization End ----\n");
    opts
}
