#![forbid(unsafe_code)]
use std::path::PathBuf;
use std::{env, ffi, fs, io, process};

use std::io::{Read, Write};

fn main() -> CodingResult {
    CodingResult::catch_panic(|| {
        let flags = Flags::from_args(env::args_os()).unwrap_or_else(|ParamError| explain());
        run_coding(flags)
    })
}

fn run_coding(flags: Flags) -> Result<(), io::Error> {
    let operation = flags.operation.unwrap_or_else(explain);

    let data = match flags.input {
        Input::File(path) => fs::read(path)?,
        Input::Stdin => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            data
        }
    };

    let result = match operation {
        Operation::Encode => giflzw::compress(&data),
        Operation::Decode => giflzw::decompress(&data),
    };
    let out = result.map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    stdout.write_all(&out)?;
    stdout.flush()
}

struct Flags {
    input: Input,
    operation: Option<Operation>,
}

struct ParamError;

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Stdin,
}

#[derive(Debug)]
enum Operation {
    Encode,
    Decode,
}

fn explain<T>() -> T {
    println!(
        "Usage: giflzw [-e|-d] <file>\n\
        Arguments:\n\
        -e\t operation encode (default)\n\
        -d\t operation decode\n\
        <file>\tfilepath or '-' for stdin"
    );
    process::exit(1);
}

fn command() -> clap::Command<'static> {
    clap::Command::new("giflzw")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Encode or decode a raw GIF-dialect LZW stream")
        .arg(
            clap::Arg::new("decode")
                .short('d')
                .long("--decode")
                .takes_value(false),
        )
        .arg(
            clap::Arg::new("encode")
                .short('e')
                .long("--encode")
                .takes_value(false),
        )
        .group(
            clap::ArgGroup::new("operation")
                .args(&["decode", "encode"])
                .multiple(false)
                .required(true),
        )
        .arg(
            clap::Arg::new("file")
                .default_value("-")
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
}

impl Flags {
    fn from_args(mut args: impl Iterator<Item = ffi::OsString>) -> Result<Self, ParamError> {
        let matches = command().get_matches_from(args.by_ref());

        let operation = if matches.contains_id("decode") {
            Some(Operation::Decode)
        } else if matches.contains_id("encode") {
            Some(Operation::Encode)
        } else {
            None
        };

        let input = match matches.get_one::<PathBuf>("file") {
            None => Input::Stdin,
            Some(p) if *p == PathBuf::from("-") => Input::Stdin,
            Some(p) => Input::File(p.clone()),
        };

        Ok(Flags { input, operation })
    }
}

enum CodingResult {
    Ok,
    Err(io::Error),
    Panic,
}

impl CodingResult {
    fn catch_panic(op: fn() -> Result<(), io::Error>) -> Self {
        std::panic::catch_unwind(|| match op() {
            Ok(()) => CodingResult::Ok,
            Err(err) => CodingResult::Err(err),
        })
        .unwrap_or(CodingResult::Panic)
    }
}

impl std::process::Termination for CodingResult {
    fn report(self) -> std::process::ExitCode {
        match self {
            CodingResult::Ok => std::process::ExitCode::SUCCESS,
            CodingResult::Err(err) => {
                eprintln!("{}", err);
                std::process::ExitCode::FAILURE
            }
            CodingResult::Panic => {
                eprintln!(
                    "The process failed irrecoverably! This should never happen and is a bug."
                );
                std::process::ExitCode::from(128)
            }
        }
    }
}
