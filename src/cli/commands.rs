//! Command dispatch

use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::convert::category_name;
use crate::application::script::{parse_line, HELP};
use crate::application::services::{Reply, SchemaEditor, ScriptSession};
use crate::application::{render_pretty, IoResultExt};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::field_tree;
use crate::config::Settings;
use crate::domain::{count_fields, FieldKind};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Repl { quiet }) => _repl(&settings, *quiet),
        Some(Commands::Run { script, tree }) => _run(&settings, script, *tree),
        Some(Commands::Kinds) => _kinds(&settings),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn new_session(settings: &Settings) -> ScriptSession {
    let editor = SchemaEditor::new(settings.id_strategy.generator(), settings.editor_options());
    ScriptSession::new(editor)
}

#[instrument(skip(settings))]
fn _repl(settings: &Settings, quiet: bool) -> CliResult<()> {
    let echo = settings.echo_document && !quiet;
    let mut session = new_session(settings);
    output::header("rschema: type 'help' for commands, 'quit' to leave");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut line_no = 0;
    loop {
        output::prompt(">");
        let Some(line) = lines.next() else { break };
        let line = line.with_context("read stdin")?;
        line_no += 1;

        let command = match parse_line(line_no, &line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                output::error(&e);
                continue;
            }
        };
        match session.execute(&command) {
            Ok(Reply::Quit) => break,
            Ok(reply) => print_reply(&session, settings, &reply, echo)?,
            Err(e) => output::error(&e),
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _run(settings: &Settings, script: &Path, tree: bool) -> CliResult<()> {
    if !script.is_file() {
        return Err(CliError::InvalidArgs(format!(
            "script not found: {}",
            script.display()
        )));
    }
    let content = std::fs::read_to_string(script).with_path_context("read script", script)?;
    let mut session = new_session(settings);

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let Some(command) = parse_line(line_no, line)? else {
            continue;
        };
        if command.is_mutation() {
            session
                .execute(&command)
                .map_err(|e| e.at_line(line_no))?;
            continue;
        }
        match session.execute(&command).map_err(|e| e.at_line(line_no))? {
            Reply::Quit => break,
            reply => print_reply(&session, settings, &reply, false)?,
        }
    }

    debug!(
        "run: {} fields after {}",
        count_fields(session.fields()),
        script.display()
    );
    if tree {
        output::info(&field_tree(session.fields()));
    }
    output::info(&session.editor().export(settings.indent)?);
    Ok(())
}

fn print_reply(session: &ScriptSession, settings: &Settings, reply: &Reply, echo: bool) -> CliResult<()> {
    match reply {
        Reply::Changed(outcome) => {
            output::success(&format!("ok [{}]", outcome.id));
            if echo {
                output::info(&render_pretty(&outcome.document, settings.indent)?);
            }
        }
        Reply::Cleared => output::success("cleared"),
        Reply::Tree => output::info(&field_tree(session.fields())),
        Reply::Document(doc) => output::info(&render_pretty(doc, settings.indent)?),
        Reply::Dump(text) => output::info(text),
        Reply::Help => output::info(HELP),
        Reply::Quit => {}
    }
    Ok(())
}

fn _kinds(settings: &Settings) -> CliResult<()> {
    output::header("Field kinds");
    for kind in FieldKind::ALL {
        let shape = if kind.is_container() {
            "children"
        } else {
            "default value"
        };
        output::detail(&format!(
            "{:<8} -> {:<8} ({})",
            kind.as_str(),
            category_name(kind),
            shape
        ));
    }
    output::info(&format!(
        "\nnest creates {} fields under: {}",
        settings.nested_kind,
        FieldKind::ALL.iter().filter(|k| k.is_container()).join(", ")
    ));
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    match crate::config::global_config_path() {
        Some(path) if path.exists() => output::header(&format!("# global: {}", path.display())),
        Some(path) => output::warning(&format!("no global config at {}", path.display())),
        None => output::warning("no config directory available"),
    }
    output::info(&settings.to_toml()?);
    Ok(())
}
