use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::Parser;
use thiserror::Error;

use crate::error::CodecError;

pub const EXTENSION: &str = "huff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Stdin,
    FileIO(PathBuf),
}

/// A validated invocation: where the bytes come from and where they go.
#[derive(Debug, PartialEq, Eq)]
pub struct Job {
    pub operation: Operation,
    pub mode: Mode,
    pub destination: PathBuf,
}

#[derive(Debug, Parser)]
#[command(version, about = "Huffman compression tool", long_about = None)]
pub struct Args {
    #[arg(short, long)]
    pub compress: bool,
    #[arg(short, long)]
    pub decompress: bool,
    #[arg(short, long, value_name = "INPUT", required = false)]
    pub input: Option<PathBuf>,
    /// Output path. Defaults to INPUT.huff when compressing and INPUT without
    /// its .huff extension when decompressing.
    #[arg(short, long)]
    pub out_file: Option<PathBuf>,
    /// Log a summary of each run.
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn validate_inputs(args: &Args, stdin_is_tty: bool) -> Result<Job, CliError> {
    let operation = match (args.compress, args.decompress) {
        (true, false) => Operation::Compress,
        (false, true) => Operation::Decompress,
        _ => return Err(CliError::CompressionFlag),
    };

    let mode = match &args.input {
        Some(path) if !path.exists() => return Err(CliError::FileDoesNotExist(path.clone())),
        Some(path) => Mode::FileIO(path.clone()),
        None if !stdin_is_tty => Mode::Stdin,
        None => return Err(CliError::NoFilePath),
    };

    let destination = match (&args.out_file, &mode) {
        (Some(out_file), _) => out_file.clone(),
        (None, Mode::Stdin) => return Err(CliError::NoOutfileProvided),
        (None, Mode::FileIO(input)) => default_destination(operation, input)?,
    };

    if let Mode::FileIO(source) = &mode {
        if same_path(source, &destination) {
            return Err(CliError::SameSourceAndDestination(destination));
        }
    }

    Ok(Job {
        operation,
        mode,
        destination,
    })
}

fn default_destination(operation: Operation, input: &Path) -> Result<PathBuf, CliError> {
    match operation {
        Operation::Compress => {
            let mut path = input.as_os_str().to_owned();
            path.push(".");
            path.push(EXTENSION);
            Ok(path.into())
        }
        Operation::Decompress if input.extension().is_some_and(|ext| ext == EXTENSION) => {
            Ok(input.with_extension(""))
        }
        Operation::Decompress => Err(CliError::WrongFileExtension(input.to_path_buf())),
    }
}

fn same_path(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => source == destination,
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No file path provided. Use --help for more information.")]
    NoFilePath,
    #[error("File {0:?} does not exist. Use --help for more information.")]
    FileDoesNotExist(PathBuf),
    #[error("File {0:?} does not have the file extension '.huff'. Pass --out-file or use --help.")]
    WrongFileExtension(PathBuf),
    #[error("No outfile path provided. Use --help for more information.")]
    NoOutfileProvided,
    #[error("You must specify either --compress or --decompress, but not both.")]
    CompressionFlag,
    #[error("Source and destination are the same file: {0:?}")]
    SameSourceAndDestination(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
}
