#![allow(dead_code)]

use gnalose::error;
use gnalose::lang::{Error, ErrorCode};
use gnalose::mach::{Event, Program, Runtime};

/// Compile and run `source` to the end, feeding `inputs` to `print`
/// statements in order.
pub fn run(source: &str, inputs: &[i32]) -> (Vec<String>, Result<(), Error>) {
    let mut outputs = vec![];
    let program = match Program::compile(source) {
        Ok(program) => program,
        Err(error) => return (outputs, Err(error)),
    };
    let mut inputs = inputs.iter().copied();
    let result = Runtime::new(program).run_all(
        |s| outputs.push(s),
        || inputs.next().ok_or_else(|| error!(InputFailure; "no more input")),
    );
    (outputs, result)
}

/// Outputs of a run that must succeed.
pub fn output(source: &str, inputs: &[i32]) -> Vec<String> {
    match run(source, inputs) {
        (outputs, Ok(())) => outputs,
        (_, Err(error)) => panic!("{}", error),
    }
}

/// Error of a run that must fail.
pub fn failure(source: &str, inputs: &[i32]) -> Error {
    match run(source, inputs) {
        (_, Err(error)) => error,
        (outputs, Ok(())) => panic!("expected an error, got {:?}", outputs),
    }
}

pub fn code(source: &str) -> ErrorCode {
    failure(source, &[]).code()
}

/// Drive a runtime in `cycles`-sized slices, the way the terminal does, and
/// collect everything it reports as text.
pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut input = || -> Result<i32, Error> { Err(error!(InputFailure; "no input")) };
    let mut slices = 0;
    loop {
        match runtime.execute(cycles, &mut input) {
            Event::Print(ps) => {
                s.push_str(&ps);
                s.push('\n');
            }
            Event::Running => {
                slices += 1;
                if slices > 1000 {
                    s.push_str("Execution cycles exceeded.\n");
                    break;
                }
            }
            Event::Stopped => break,
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
                break;
            }
        }
    }
    s
}
