//! Editing commands in text form
//!
//! One command per line. Blank lines and `#` comments are ignored.
//! Arguments are whitespace separated; double quotes group words and allow
//! an empty argument (`rename $1 ""`).
//!
//! ```text
//! add Object user
//! nest $1 email
//! kind $2 Email
//! default $2 "nobody@example.com"
//! schema
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{FieldId, FieldKind};

/// Reference to a field inside an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    /// Literal field id
    Id(FieldId),
    /// `$N`: the N-th field created in this session, 1-based
    Created(usize),
    /// `$_`: the most recently created field
    Latest,
}

impl FieldRef {
    pub fn parse(token: &str) -> ApplicationResult<Self> {
        match token.strip_prefix('$') {
            Some("_") => Ok(FieldRef::Latest),
            Some(n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Ok(FieldRef::Created(n)),
                _ => Err(ApplicationError::UnresolvedRef(token.to_string())),
            },
            None => Ok(FieldRef::Id(FieldId::from(token))),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Id(id) => write!(f, "{}", id),
            FieldRef::Created(n) => write!(f, "${}", n),
            FieldRef::Latest => write!(f, "$_"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Add { kind: FieldKind, name: Option<String> },
    Nest { parent: FieldRef, name: Option<String> },
    Rename { target: FieldRef, name: String },
    Kind { target: FieldRef, kind: FieldKind },
    Default { target: FieldRef, value: String },
    Remove { target: FieldRef },
    Show,
    Schema,
    JsonSchema,
    Dump,
    Clear,
    Help,
    Quit,
}

impl ScriptCommand {
    /// Whether executing the command changes the field tree.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ScriptCommand::Add { .. }
                | ScriptCommand::Nest { .. }
                | ScriptCommand::Rename { .. }
                | ScriptCommand::Kind { .. }
                | ScriptCommand::Default { .. }
                | ScriptCommand::Remove { .. }
                | ScriptCommand::Clear
        )
    }
}

pub const HELP: &str = "\
add <kind> [name]       append a root field
nest <field> [name]     append a child (nested_kind) to an Array/Object field
rename <field> <name>   set a field's name (\"\" clears it)
kind <field> <kind>     change a field's kind (resets default/children)
default <field> <value> set a scalar field's default value
rm <field>              delete a field and its subtree
show                    print the field tree
schema                  print the simple schema document
jsonschema              print the JSON-Schema shaped document
dump                    print the raw field tree as JSON
clear                   remove all fields
help                    this text
quit                    leave the session

<field> is a field id, $N for the N-th created field, or $_ for the latest.";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("token regex is valid"))
}

/// Split a line into arguments, honouring double quotes.
pub fn tokenize(line: &str) -> Vec<String> {
    token_regex()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse one line; `Ok(None)` for blank lines and comments.
pub fn parse_line(line_no: usize, line: &str) -> ApplicationResult<Option<ScriptCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let tokens = tokenize(trimmed);
    parse_tokens(&tokens)
        .map(Some)
        .map_err(|e| e.at_line(line_no))
}

fn parse_tokens(tokens: &[String]) -> ApplicationResult<ScriptCommand> {
    let (verb, args) = match tokens.split_first() {
        Some((verb, args)) => (verb.to_ascii_lowercase(), args),
        None => return Err(usage("empty command")),
    };

    let cmd = match verb.as_str() {
        "add" => ScriptCommand::Add {
            kind: arg(args, 0, "add <kind> [name]")?.parse()?,
            name: optional_rest(args, 1),
        },
        "nest" => ScriptCommand::Nest {
            parent: FieldRef::parse(arg(args, 0, "nest <field> [name]")?)?,
            name: optional_rest(args, 1),
        },
        "rename" => ScriptCommand::Rename {
            target: FieldRef::parse(arg(args, 0, "rename <field> <name>")?)?,
            name: required_rest(args, 1, "rename <field> <name>")?,
        },
        "kind" => ScriptCommand::Kind {
            target: FieldRef::parse(arg(args, 0, "kind <field> <kind>")?)?,
            kind: arg(args, 1, "kind <field> <kind>")?.parse()?,
        },
        "default" => ScriptCommand::Default {
            target: FieldRef::parse(arg(args, 0, "default <field> <value>")?)?,
            value: required_rest(args, 1, "default <field> <value>")?,
        },
        "rm" | "delete" => ScriptCommand::Remove {
            target: FieldRef::parse(arg(args, 0, "rm <field>")?)?,
        },
        "show" | "tree" => ScriptCommand::Show,
        "schema" => ScriptCommand::Schema,
        "jsonschema" => ScriptCommand::JsonSchema,
        "dump" => ScriptCommand::Dump,
        "clear" => ScriptCommand::Clear,
        "help" | "?" => ScriptCommand::Help,
        "quit" | "exit" => ScriptCommand::Quit,
        other => return Err(usage(&format!("unknown command '{}'", other))),
    };
    Ok(cmd)
}

fn usage(message: &str) -> ApplicationError {
    ApplicationError::Script {
        line: 0,
        message: message.to_string(),
    }
}

fn arg<'a>(args: &'a [String], idx: usize, synopsis: &str) -> ApplicationResult<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| usage(&format!("usage: {}", synopsis)))
}

fn optional_rest(args: &[String], from: usize) -> Option<String> {
    (args.len() > from).then(|| args[from..].join(" "))
}

fn required_rest(args: &[String], from: usize, synopsis: &str) -> ApplicationResult<String> {
    optional_rest(args, from).ok_or_else(|| usage(&format!("usage: {}", synopsis)))
}
