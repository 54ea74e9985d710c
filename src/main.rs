use huffpack::{
    cli::{validate_inputs, Args, CliError, Job, Mode, Operation},
    compress, decompress,
    fs::{read_file, write_file, Source},
};

use std::{io::Read, process::ExitCode};

use atty::Stream;
use clap::Parser;
use log::info;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    env_logger::Builder::from_env(env).init();

    match validate_inputs(&args, atty::is(Stream::Stdin)).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(job: Job) -> Result<(), CliError> {
    let buffer = match &job.mode {
        Mode::Stdin => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            Source::Buffered(buffer)
        }
        Mode::FileIO(path) => read_file(path)?,
    };

    let output = match job.operation {
        Operation::Compress => compress(&buffer)?.to_bytes(),
        Operation::Decompress => decompress(&buffer)?,
    };
    write_file(&job.destination, &output)?;

    info!(
        "{:?}: {} bytes -> {} bytes ({:.1}%) written to {}",
        job.operation,
        buffer.len(),
        output.len(),
        ratio(output.len(), buffer.len()),
        job.destination.display()
    );
    Ok(())
}

fn ratio(output: usize, input: usize) -> f64 {
    if input == 0 {
        return 100.0;
    }
    output as f64 / input as f64 * 100.0
}
