extern crate ansi_term;
extern crate clap;
extern crate ctrlc;
extern crate linefeed;

mod input;
mod logger;

use ansi_term::Style;
use clap::{App, Arg, ArgMatches};
use gnalose::lang::Error;
use gnalose::mach::{Event, Program, Runtime};
use input::Input;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SLICE: usize = 5000;

const EXIT_OK: i32 = 0;
const EXIT_DIAGNOSTIC: i32 = 1;
const EXIT_BUDGET: i32 = 2;
const EXIT_INTERNAL: i32 = 101;
const EXIT_INTERRUPTED: i32 = 130;

fn args() -> ArgMatches {
    App::new("gnalose")
        .about("runs gnalose programs, bottom line first")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .index(1)
                .required(false)
                .help("gnalose source file; asked for when omitted"),
        )
        .arg(
            Arg::new("max-steps")
                .short('s')
                .long("max-steps")
                .takes_value(true)
                .required(false)
                .validator(|s| s.parse::<usize>())
                .help("abort after executing this many instructions"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .takes_value(false)
                .required(false)
                .help("print the compiled program instead of running it"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .takes_value(false)
                .help("log to stderr; repeat for more detail"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .takes_value(false)
                .help("plain diagnostics without terminal styling"),
        )
        .get_matches()
}

pub fn main() -> i32 {
    let args = args();
    let color = !args.is_present("no-color");
    logger::init(args.occurrences_of("verbose"), color);

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        log::warn!("cannot set Ctrl-C handler: {}", error);
    }

    let filename = match args.value_of("file") {
        Some(name) => name.to_string(),
        None => match input::ask("No file supplied, enter file name: ") {
            Ok(Some(name)) => name,
            Ok(None) => return EXIT_DIAGNOSTIC,
            Err(error) => {
                eprintln!("{}", error);
                return EXIT_DIAGNOSTIC;
            }
        },
    };
    let source = match std::fs::read_to_string(&filename) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error while opening file {}: {}", filename, error);
            return EXIT_DIAGNOSTIC;
        }
    };
    log::info!("loaded {} ({} bytes)", filename, source.len());

    let program = match Program::compile(&source) {
        Ok(program) => program,
        Err(error) => return report(&error, color),
    };
    if args.is_present("list") {
        print!("{}", program);
        return EXIT_OK;
    }

    let max_steps = args.value_of("max-steps").and_then(|s| s.parse().ok());
    match main_loop(program, max_steps, interrupted) {
        Ok(Ok(code)) => code,
        Ok(Err(error)) => report(&error, color),
        Err(error) => {
            eprintln!("{}", error);
            EXIT_DIAGNOSTIC
        }
    }
}

fn main_loop(
    program: Program,
    max_steps: Option<usize>,
    interrupted: Arc<AtomicBool>,
) -> std::io::Result<Result<i32, Error>> {
    let mut runtime = Runtime::new(program);
    let mut input = Input::new()?;
    let mut read = || input.read_number();
    loop {
        if interrupted.load(Ordering::SeqCst) {
            eprintln!("interrupted");
            return Ok(Ok(EXIT_INTERRUPTED));
        }
        let cycles = match max_steps {
            Some(max) if runtime.steps() >= max => {
                if let Event::Error(error) = runtime.execute(0, &mut read) {
                    return Ok(Err(error));
                }
                if runtime.is_finished() {
                    return Ok(Ok(EXIT_OK));
                }
                eprintln!("step limit of {} exceeded", max);
                return Ok(Ok(EXIT_BUDGET));
            }
            Some(max) => SLICE.min(max - runtime.steps()),
            None => SLICE,
        };
        match runtime.execute(cycles, &mut read) {
            Event::Print(s) => println!("{}", s),
            Event::Running => {}
            Event::Stopped => {
                log::info!("finished after {} steps", runtime.steps());
                return Ok(Ok(EXIT_OK));
            }
            Event::Error(error) => return Ok(Err(error)),
        }
    }
}

fn report(error: &Error, color: bool) -> i32 {
    let (text, code) = if error.is_internal() {
        (format!("fatal internal error: {}", error), EXIT_INTERNAL)
    } else {
        (error.to_string(), EXIT_DIAGNOSTIC)
    };
    if color {
        eprintln!("{}", Style::new().bold().paint(text));
    } else {
        eprintln!("{}", text);
    }
    code
}
