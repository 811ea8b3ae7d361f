use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;

use crate::util::errors::{InputError, ValueError};


#[derive(Clone)]
struct Argument {
    pub name: String,
    pub is_flag: bool,
}


#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    args: HashMap<String, String>,
    flags: HashSet<String>,
}

impl ParsedArgs {
    pub fn get_arg(&self, name: &str) -> Option<&str> {
        return self.args.get(name).map(|s| s.as_str());
    }

    pub fn get_flag(&self, name: &str) -> bool {
        return self.flags.contains(name)
    }

    /// Parses an optional argument, `None` when it was not given.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, ValueError> {
        return match self.args.get(name) {
            None => Ok(None),
            Some(value) => value.parse::<T>().map(Some).map_err(|_| ValueError::Number {
                name: String::from(name),
                value: value.clone(),
            }),
        }
    }
}


#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: ParsedArgs,
}


#[derive(Clone, Default)]
pub struct CommandSpec {
    required: HashSet<String>,
    positional: Vec<Argument>,
    named: HashMap<String, Argument>,
    keys: HashMap<String, String>,
    has_optional_positional: bool,
}

impl CommandSpec {
    pub fn add_positional_arg(&mut self, name: &str, required: bool) -> Result<&mut Self, InputError> {
        if self.has_optional_positional && required {
            return Err(InputError::Malformed(String::from("required positional arguments cannot follow optional ones")))
        }
        self.positional.push(Argument {
            name: String::from(name),
            is_flag: false,
        });
        if required {
            self.required.insert(String::from(name));
        } else {
            self.has_optional_positional = true;
        }
        return Ok(self);
    }

    pub fn add_named_arg(&mut self, name: &str, keys: &[&str], required: bool) -> Result<&mut Self, InputError> {
        self.add_keyed(name, keys, false)?;
        if required {
            self.required.insert(String::from(name));
        }
        return Ok(self);
    }

    pub fn add_flag_arg(&mut self, name: &str, keys: &[&str]) -> Result<&mut Self, InputError> {
        self.add_keyed(name, keys, true)?;
        return Ok(self);
    }

    fn add_keyed(&mut self, name: &str, keys: &[&str], flag: bool) -> Result<(), InputError> {
        if keys.is_empty() {
            return Err(InputError::Malformed(format!("argument '{}' needs at least one key", name)))
        }
        if let Some(key) = keys.iter().find(|k| self.keys.contains_key(**k)) {
            return Err(InputError::Malformed(format!("key '{}' already belongs to another argument", key)))
        }
        self.named.insert(String::from(name), Argument {
            name: String::from(name),
            is_flag: flag,
        });
        self.keys.extend(keys.iter().map(|k| (String::from(*k), String::from(name))));
        return Ok(());
    }

    fn parse(&self, mut args: VecDeque<String>) -> Result<ParsedArgs, InputError> {
        let mut required_fields: HashSet<&String> = self.required.iter().collect();
        let mut parsed = ParsedArgs::default();
        let mut positional_queue: VecDeque<&Argument> = self.positional.iter().collect();
        while let Some(arg) = args.pop_front() {
            match self.keys.get(&arg).and_then(|name| self.named.get(name)) {
                Some(named_arg) if named_arg.is_flag => {
                    parsed.flags.insert(named_arg.name.clone());
                },
                Some(named_arg) => {
                    let value = args.pop_front().ok_or_else(|| InputError::MissingValue(arg.clone()))?;
                    required_fields.remove(&named_arg.name);
                    parsed.args.insert(named_arg.name.clone(), value);
                },
                None => match positional_queue.pop_front() {
                    Some(positional_arg) => {
                        required_fields.remove(&positional_arg.name);
                        parsed.args.insert(positional_arg.name.clone(), arg);
                    },
                    None => return Err(InputError::UnexpectedArgument(arg)),
                }
            }
        }
        if let Some(missing) = required_fields.into_iter().min() {
            return Err(InputError::MissingArgument(missing.clone()));
        }
        return Ok(parsed);
    }
}


#[derive(Default)]
pub struct ArgumentParserBuilder {
    commands: HashMap<String, CommandSpec>,
    aliases: HashMap<String, String>,
}

impl ArgumentParserBuilder {
    pub fn add_subcommand(&mut self, name: &str) -> &mut CommandSpec {
        return self.commands.entry(String::from(name)).or_default();
    }

    pub fn add_alias(&mut self, alias: &str, name: &str) {
        self.aliases.insert(String::from(alias), String::from(name));
    }

    pub fn build(&self) -> ArgumentParser {
        return ArgumentParser {
            commands: self.commands.clone(),
            aliases: self.aliases.clone(),
        }
    }
}


pub struct ArgumentParser {
    commands: HashMap<String, CommandSpec>,
    aliases: HashMap<String, String>,
}

impl ArgumentParser {
    pub fn builder() -> ArgumentParserBuilder {
        return Default::default();
    }

    /// `Ok(None)` for a blank line.
    pub fn parse(&self, input: &str) -> Result<Option<ParsedCommand>, InputError> {
        let words = shell_words::split(input).map_err(|e| InputError::Malformed(e.to_string()))?;
        let mut args: VecDeque<String> = words.into_iter().collect();
        let command = match args.pop_front() {
            None => return Ok(None),
            Some(c) => c.to_lowercase(),
        };
        let name = self.aliases.get(&command).cloned().unwrap_or(command);
        let spec = self.commands.get(&name).ok_or_else(|| InputError::UnknownCommand(name.clone()))?;
        return Ok(Some(ParsedCommand {
            args: spec.parse(args)?,
            name: name,
        }));
    }
}
