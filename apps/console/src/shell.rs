//! Interactive mode. The calling thread owns the form; stdin is read on a
//! helper thread so the form keeps receiving updates while input is idle.

use std::{
    io::{self, BufRead, Write},
    thread,
};

use anyhow::Result;
use client_core::{Action, Dispatched, FormField, FormState, Orchestrator, UiUpdate};
use crossbeam_channel::{bounded, select, Receiver};
use shared::domain::SPACE_PLACEHOLDER;

use crate::render::{render_form, render_update};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Set { field: FormField, text: String },
    Run(Action),
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let (head, rest) = match line.trim_start().split_once(' ') {
        Some((head, rest)) => (head, rest),
        None => (line.trim(), ""),
    };

    match head {
        "" => ShellCommand::Empty,
        "state" => ShellCommand::Set {
            field: FormField::State,
            text: rest.to_string(),
        },
        "splitter" => ShellCommand::Set {
            field: FormField::Splitter,
            text: rest.to_string(),
        },
        "get-state" => ShellCommand::Run(Action::GetState),
        "submit-state" => ShellCommand::Run(Action::SubmitState),
        "get-splitter" => ShellCommand::Run(Action::GetSplitter),
        "submit-splitter" => ShellCommand::Run(Action::SubmitSplitter),
        "two-prop" => ShellCommand::Run(Action::GetTwoProp),
        "crash" => ShellCommand::Run(Action::Crash),
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    }
}

fn help_text() -> String {
    format!(
        "commands:\n  \
         state <text>         edit the state field\n  \
         splitter <char>      edit the splitter field ({SPACE_PLACEHOLDER} for a space)\n  \
         get-state | submit-state | get-splitter | submit-splitter\n  \
         two-prop | crash | show | help | quit"
    )
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn run(
    orchestrator: &Orchestrator,
    form: &mut FormState,
    ui_rx: &Receiver<UiUpdate>,
) -> Result<()> {
    let (line_tx, line_rx) = bounded::<String>(16);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{}", help_text());
    prompt();

    loop {
        select! {
            recv(line_rx) -> line => {
                let Ok(line) = line else {
                    tracing::debug!("stdin closed; leaving shell");
                    break;
                };
                match parse_command(&line) {
                    ShellCommand::Set { field, text } => form.set_text(field, text),
                    ShellCommand::Run(action) => {
                        if let Dispatched::Rejected(err) = orchestrator.trigger(action, form) {
                            println!("! {err}");
                        }
                    }
                    ShellCommand::Show => print!("{}", render_form(form)),
                    ShellCommand::Help => println!("{}", help_text()),
                    ShellCommand::Quit => break,
                    ShellCommand::Empty => {}
                    ShellCommand::Unknown(head) => println!("unknown command '{head}'; try 'help'"),
                }
                prompt();
            }
            recv(ui_rx) -> update => {
                let Ok(update) = update else { break };
                println!("\n{}", render_update(&update));
                form.apply(update);
                prompt();
            }
        }
    }

    Ok(())
}
