use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::interface::arguments::{ArgumentParser, ParsedCommand};
use crate::util::errors::InputError;


pub enum ShellInput {
    Command(ParsedCommand),
    Empty,
    Exit,
}


pub struct InteractiveShell {
    prompt: String,
    parser: ArgumentParser,
    editor: Editor<()>,
}

impl InteractiveShell {
    pub fn new(prompt: Option<&str>, parser: ArgumentParser) -> InteractiveShell {
        let default_prompt = ">>> ";
        return InteractiveShell {
            prompt: String::from(prompt.unwrap_or(default_prompt)),
            parser: parser,
            editor: Editor::<()>::new(),
        }
    }

    pub fn empty_line(&self) {
        println!();
    }

    pub fn output(&self, output: &str) {
        println!("{}", output);
    }

    /// Reads one line, `None` once input is closed or interrupted.
    pub fn input(&mut self, prompt: &str) -> Option<String> {
        return match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    self.editor.add_history_entry(line);
                }
                Some(String::from(line))
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                log::error!("Could not read a line: {}", e);
                None
            },
        }
    }

    pub fn get_command(&mut self) -> Result<ShellInput, InputError> {
        let prompt = self.prompt.clone();
        let line = match self.input(&prompt) {
            Some(line) => line,
            None => return Ok(ShellInput::Exit),
        };
        return match self.parser.parse(&line)? {
            Some(command) => Ok(ShellInput::Command(command)),
            None => Ok(ShellInput::Empty),
        }
    }
}
