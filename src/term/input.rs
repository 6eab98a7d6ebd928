use gnalose::error;
use gnalose::lang::Error;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::io::{BufRead, BufReader, IsTerminal, Stdin};

/// Where `print` statements get their numbers from.
pub enum Input {
    Terminal(Interface<DefaultTerminal>),
    Piped(BufReader<Stdin>),
}

impl Input {
    pub fn new() -> std::io::Result<Input> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            let interface = Interface::new("gnalose")?;
            interface.set_prompt("? ")?;
            interface.set_report_signal(Signal::Interrupt, true);
            Ok(Input::Terminal(interface))
        } else {
            Ok(Input::Piped(BufReader::new(stdin)))
        }
    }

    /// One integer per line. A terminal user is asked again after a typo,
    /// piped input is not.
    pub fn read_number(&mut self) -> Result<i32, Error> {
        match self {
            Input::Terminal(interface) => loop {
                match interface.read_line() {
                    Ok(ReadResult::Input(line)) => match parse_number(&line) {
                        Some(number) => {
                            interface.add_history_unique(line);
                            return Ok(number);
                        }
                        None => {
                            if let Err(e) = interface.write_fmt(format_args!("?Redo\n")) {
                                return Err(error!(InputFailure; e.to_string()));
                            }
                        }
                    },
                    Ok(ReadResult::Signal(_)) => return Err(error!(InputFailure; "interrupted")),
                    Ok(ReadResult::Eof) => return Err(error!(InputFailure; "end of input")),
                    Err(e) => return Err(error!(InputFailure; e.to_string())),
                }
            },
            Input::Piped(reader) => {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => Err(error!(InputFailure; "end of input")),
                    Ok(_) => parse_number(&line).ok_or_else(
                        || error!(InputFailure; format!("not a number: {:?}", line.trim())),
                    ),
                    Err(e) => Err(error!(InputFailure; e.to_string())),
                }
            }
        }
    }
}

/// Ask for a single line, `None` at end of input.
pub fn ask(prompt: &str) -> std::io::Result<Option<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        let interface = Interface::new("gnalose-file")?;
        interface.set_prompt(prompt)?;
        match interface.read_line()? {
            ReadResult::Input(line) => Ok(Some(line.trim().to_string())),
            ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
        }
    } else {
        eprintln!("{}", prompt.trim_end());
        let mut line = String::new();
        match stdin.lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line.trim().to_string())),
        }
    }
}

fn parse_number(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}
