use std::{io::BufRead, str::FromStr, sync::Arc};

use anyhow::Result;
use thiserror::Error;

use crate::{
    bridge::Bridge,
    model::{
        Page, UiEvent, AMOUNT_FIELD, MINE_BUTTON, RECIPIENT_FIELD, SENDER_FIELD, TRANSACTION_FORM,
        VIEW_CHAIN_BUTTON,
    },
    util::Context,
};

const HELP: &str = "\
Commands:
  mine                                click `mine-btn`
  chain                               click `view-chain-btn`
  click <id>                          click any element
  set <field> <value>                 fill a form field (sender, recipient, amount)
  submit [form]                       submit `transaction-form`
  send <sender> <recipient> <amount>  fill the transaction form and submit it
                                      (one word per value; use set + submit for
                                      empty values or values with spaces)
  show [id]                           print a result or field (every result if no id)
  wait                                wait for pending requests
  help                                print this message
  quit                                leave";

#[derive(Error, PartialEq, Debug)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(UiEvent),
    Set {
        field: String,
        value: String,
    },
    Send {
        sender: String,
        recipient: String,
        amount: String,
    },
    Show(Option<String>),
    Wait,
    Help,
    Quit,
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();

    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

fn single_argument(rest: &str) -> Option<String> {
    let (word, extra) = split_word(rest);

    if word.is_empty() || !extra.is_empty() {
        None
    } else {
        Some(word.to_string())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line.trim());
        let rest = rest.trim_end();

        let command = match name {
            "mine" if rest.is_empty() => Command::Dispatch(UiEvent::click(MINE_BUTTON)),
            "chain" if rest.is_empty() => Command::Dispatch(UiEvent::click(VIEW_CHAIN_BUTTON)),
            "click" => match single_argument(rest) {
                Some(id) => Command::Dispatch(UiEvent::Click(id)),
                None => return Err(CommandError::Usage("click <id>")),
            },
            "submit" if rest.is_empty() => Command::Dispatch(UiEvent::submit(TRANSACTION_FORM)),
            "submit" => match single_argument(rest) {
                Some(form) => Command::Dispatch(UiEvent::Submit(form)),
                None => return Err(CommandError::Usage("submit [form]")),
            },
            "set" => {
                let (field, value) = split_word(rest);

                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }

                Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "send" => {
                let args: Vec<&str> = rest.split_whitespace().collect();

                match args.as_slice() {
                    [sender, recipient, amount] => Command::Send {
                        sender: sender.to_string(),
                        recipient: recipient.to_string(),
                        amount: amount.to_string(),
                    },
                    _ => return Err(CommandError::Usage("send <sender> <recipient> <amount>")),
                }
            }
            "show" if rest.is_empty() => Command::Show(None),
            "show" => match single_argument(rest) {
                Some(id) => Command::Show(Some(id)),
                None => return Err(CommandError::Usage("show [id]")),
            },
            "wait" if rest.is_empty() => Command::Wait,
            "help" if rest.is_empty() => Command::Help,
            "quit" | "exit" if rest.is_empty() => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn print_render(id: &str, text: &str) {
    println!("[{}]\n{}", id, text);
}

/// Line-oriented driver for the page: every line is one user action.
pub struct Console {
    bridge: Bridge,
    wait_on_exit: bool,
}

impl Console {
    pub fn new(context: &Context) -> Console {
        context.page.on_render(Arc::new(print_render));

        Console {
            bridge: Bridge::new(context),
            wait_on_exit: context.config.wait_on_exit,
        }
    }

    fn page(&self) -> &Page {
        self.bridge.page()
    }

    fn set_field(&self, field: &str, value: &str) -> bool {
        let form = match self.page().form_of(field) {
            Some(form) => form,
            None => {
                warn!("Unknown field `{}`", field);
                return false;
            }
        };

        match self.page().set_field(&form, field, value) {
            Ok(()) => true,
            Err(err) => {
                warn!("{}", err);
                false
            }
        }
    }

    fn show(&self, id: &str) {
        let text = match self.page().form_of(id) {
            Some(form) => self.page().field(&form, id),
            None => self.page().text(id),
        };

        match text {
            Ok(text) => println!("[{}]\n{}", id, text),
            Err(err) => warn!("{}", err),
        }
    }

    fn execute(&self, command: Command) {
        match command {
            Command::Dispatch(event) => {
                self.bridge.dispatch(&event);
            }

            Command::Set { field, value } => {
                self.set_field(&field, &value);
            }

            Command::Send {
                sender,
                recipient,
                amount,
            } => {
                let filled = self.set_field(SENDER_FIELD, &sender)
                    && self.set_field(RECIPIENT_FIELD, &recipient)
                    && self.set_field(AMOUNT_FIELD, &amount);

                if filled {
                    self.bridge.dispatch(&UiEvent::submit(TRANSACTION_FORM));
                }
            }

            Command::Show(Some(id)) => self.show(&id),

            Command::Show(None) => {
                for id in self.page().sink_ids() {
                    self.show(&id);
                }
            }

            Command::Wait => self.bridge.wait_idle(),

            Command::Help => println!("{}", HELP),

            Command::Quit => {}
        }
    }

    fn read_commands<R: BufRead>(&self, input: R) -> Result<()> {
        for raw_line in input.split(b'\n') {
            let line = match String::from_utf8(raw_line?) {
                Ok(line) => line,
                Err(err) => {
                    warn!("Skipping line that is not valid UTF-8: {}", err);
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command),
                Err(err) => warn!("{}", err),
            }
        }

        Ok(())
    }

    pub fn run<R: BufRead>(&self, input: R) -> Result<()> {
        let result = self.read_commands(input);

        if self.wait_on_exit {
            self.bridge.wait_idle();
        }

        info!("Shutting down");

        result
    }
}
