//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use rvzip::compression::compress::{compress, Compressed};
use rvzip::compression::decompress::decompress;
use rvzip::compression::scheme::supported;
use rvzip::tools::cli::{rvopts_init, Mode, RvOpts};
use rvzip::tools::sections::{
    compress_sections, decompress_sections, load_compressed, save_compressed, unzipped_name,
    SectionContainer, SectionSet, EXTENSION, TEXT,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<(), std::io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(ErrorKind::Other, e))?;

    let options = rvopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => zip(&options),
        Mode::Unzip => unzip(&options),
        Mode::Test => test(&options),
    };
    if let Err(e) = &result {
        error!("{}", e);
    }

    info!("Done.\n");
    result
}

/// Compress the input file into `<file>.rvz` plus its dictionary files.
fn zip(opts: &RvOpts) -> io::Result<()> {
    let code = fs::read(&opts.file)?;
    let mut set = SectionSet::with_text(opts.arch.machine(), code);
    let compressed = compress_sections(&mut set, opts.encode_type)?;

    if opts.show_dicts {
        show_dicts(&compressed);
    }
    save_compressed(&set, &format!("{}{}", opts.file, EXTENSION), opts.force_overwrite)?;
    println!("{}: {}", opts.encode_type, compressed.stats);
    Ok(())
}

/// Restore the input file written by `zip`.
fn unzip(opts: &RvOpts) -> io::Result<()> {
    let mut set = load_compressed(&opts.file, opts.arch)?;
    decompress_sections(&mut set)?;

    let out_name = unzipped_name(&opts.file);
    if !opts.force_overwrite && Path::new(&out_name).exists() {
        return Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{} already exists, use -f to overwrite", out_name),
        ));
    }
    let code = set.section(TEXT).unwrap_or_default();
    fs::write(&out_name, code)?;
    info!("Wrote {} bytes to {}", code.len(), out_name);
    Ok(())
}

/// Run every scheme the architecture supports, check each round trip, and print a size table.
fn test(opts: &RvOpts) -> io::Result<()> {
    let code = fs::read(&opts.file)?;
    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>10} {:>7}",
        "scheme", "initial", "code", "dicts", "total", "ratio"
    );

    let mut failures = 0;
    for encode_type in supported(opts.arch) {
        let compressed = compress(&code, opts.arch, encode_type)?;
        let restored = decompress(&compressed.section, opts.arch, &compressed.dictionaries)?;
        let verdict = if restored == code {
            "ok"
        } else {
            failures += 1;
            "MISMATCH"
        };

        let stats = compressed.stats;
        println!(
            "{:<20} {:>10} {:>10} {:>10} {:>10} {:>6.1}% {}",
            encode_type.to_string(),
            stats.initial_code_size,
            stats.final_code_size,
            stats.dict_size,
            stats.total(),
            stats.ratio() * 100.0,
            verdict
        );
        if opts.show_dicts {
            show_dicts(&compressed);
        }
    }

    if failures > 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("{} scheme(s) failed to round trip", failures),
        ));
    }
    Ok(())
}

fn show_dicts(compressed: &Compressed) {
    for (dict, table) in compressed.dictionaries.iter().zip(compressed.tables.iter()) {
        println!("{} ({} entries)", dict.name, table.len());
        print!("{}", table);
    }
    for c in compressed.coverage.iter() {
        println!(
            "{}: {} dictionary, {} mask, {} literal",
            c.name, c.dict, c.mask, c.literal
        );
    }
}
