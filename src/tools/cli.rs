use super::options::{CodecOpts, Method, DEFAULT_BLOCK_SIZE};
use crate::bwt_algorithms::Algorithm;
use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map a -v count onto a verbosity level
    fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

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

/// Define the two output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Debug)]
pub struct BwzOpts {
    /// Block size, BWT algorithm and transform chain
    pub codec: CodecOpts,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl BwzOpts {
    pub fn new() -> Self {
        Self {
            codec: CodecOpts::new(),
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for BwzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "bwzip",
    version,
    about = "A block-sorting file compressor",
    long_about = "
    bwzip compresses each block of the input with a Burrows-Wheeler transform, a move-to-front
    recoding and a run-length coder, then Huffman codes the result as a whole. Simpler chains
    (BWT + RLE, RLE alone, Huffman alone) can be selected with --method."
)]
pub struct Args {
    /// Files to process. With no files, read standard input and write standard output.
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input files
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Be verbose. Repeat for more detail (-vvvv shows everything)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Block size in bytes
    #[clap(short = 'b', long = "block-size", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Rotation sort used by the BWT [default: doubling]
    #[clap(short = 'a', long = "algorithm", value_enum)]
    algorithm: Option<Algorithm>,

    /// Transform chain. When decompressing, taken from the file extension if not given [default: full]
    #[clap(short = 'm', long = "method", value_enum)]
    method: Option<Method>,
}

impl Args {
    /// Put command line information from CLAP into our internal structure.
    pub fn into_opts(self) -> BwzOpts {
        let mut opts = BwzOpts::new();

        opts.op_mode = if self.test {
            Mode::Test
        } else if self.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        if self.compress && opts.op_mode != Mode::Zip {
            warn!("Both compression and {} requested, using {}", opts.op_mode, opts.op_mode);
        }

        opts.files = self.files;
        opts.force_overwrite = self.force;
        opts.keep_input_files = self.keep;
        if self.stdout || opts.files.is_empty() {
            opts.output = Output::Stdout
        };
        opts.verbose = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        };

        opts.codec.block_size = self.block_size;
        opts.codec.algorithm = self.algorithm.unwrap_or_default();
        match self.method {
            Some(method) => opts.codec.method = method,
            None if opts.op_mode != Mode::Zip => {
                if let Some(method) = opts.files.first().and_then(|f| method_of(f)) {
                    opts.codec.method = method
                }
            }
            None => {}
        }
        opts
    }
}

/// Pick the method from the extension of a compressed file name
fn method_of(file: &str) -> Option<Method> {
    std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Method::from_extension)
}

/// Parse the command line, set the log level and report the settings.
pub fn bwzopts_init() -> BwzOpts {
    let opts = Args::parse().into_opts();

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- bwzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match opts.files.len() {
        0 => info!("Using standard input"),
        n => info!("Processing {} file(s)", n),
    }
    info!("Output set to {}", opts.output);
    info!("Block size set to {}", opts.codec.block_size);
    info!("Method set to {}", opts.codec.method);
    info!("Algorithm set to {:?}", opts.codec.algorithm);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- bwzip Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> BwzOpts {
        Args::try_parse_from(std::iter::once("bwzip").chain(args.iter().copied()))
            .unwrap()
            .into_opts()
    }

    #[test]
    fn defaults_test() {
        let opts = parse(&["a.txt"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.output, Output::File);
        assert_eq!(opts.codec, CodecOpts::new());
        assert_eq!(opts.verbose, Verbosity::Errors);
        assert_eq!(opts.files, vec!["a.txt".to_string()]);
    }

    #[test]
    fn flags_test() {
        let opts = parse(&["-dkf", "-vvv", "-b", "64", "--algorithm", "simple", "x.rle"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert!(opts.keep_input_files);
        assert!(opts.force_overwrite);
        assert_eq!(opts.verbose, Verbosity::Debug);
        assert_eq!(opts.codec.block_size, 64);
        assert_eq!(opts.codec.algorithm, Algorithm::Simple);
        // Method comes from the extension when decompressing
        assert_eq!(opts.codec.method, Method::Rle);
    }

    #[test]
    fn explicit_method_test() {
        let opts = parse(&["-t", "--method", "bwt-rle", "x.rle"]);
        assert_eq!(opts.op_mode, Mode::Test);
        assert_eq!(opts.codec.method, Method::BwtRle);
    }

    #[test]
    fn stdin_goes_to_stdout_test() {
        let opts = parse(&["-q"]);
        assert_eq!(opts.output, Output::Stdout);
        assert_eq!(opts.verbose, Verbosity::Quiet);
    }
}
