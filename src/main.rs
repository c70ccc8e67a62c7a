//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::io;
use std::process::ExitCode;

use bwzip::tools::cli::{bwzopts_init, BwzOpts, Mode};
use bwzip::{compress_file, compress_stream, decompress_file, decompress_stream, test_file};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows this.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start logging: {}", e);
    }

    let options = bwzopts_init();

    //----- Figure how what we need to do and go do it
    match run(&options) {
        Ok(()) => {
            info!("Done.\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("bwzip: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &BwzOpts) -> bwzip::Result<()> {
    // With no files, act as a filter from stdin to stdout
    if options.files.is_empty() {
        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();
        return match options.op_mode {
            Mode::Zip => compress_stream(stdin, stdout, &options.codec).map(|_| ()),
            Mode::Unzip => decompress_stream(stdin, stdout, options.codec.method).map(|_| ()),
            Mode::Test => decompress_stream(stdin, io::sink(), options.codec.method).map(|_| ()),
        };
    }

    for fname in &options.files {
        match options.op_mode {
            Mode::Zip => compress_file(fname, options)?,
            Mode::Unzip => decompress_file(fname, options)?,
            Mode::Test => test_file(fname, options)?,
        }
    }
    Ok(())
}
