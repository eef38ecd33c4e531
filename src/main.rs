use clap::Parser;
use log::{debug, error, warn};
use shparse::config::{load_alias_definitions, load_alias_file, parse_alias_arg};
use shparse::{
    format_tree, get_all_commands_with_alias, get_command, AliasMap, Command, QueryError,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shparse")]
#[command(about = "Parse a shell command line and expand its aliases")]
#[command(version)]
struct Cli {
    /// Command line to parse
    #[arg(short = 'c')]
    buffer: Option<String>,

    /// Cursor offset into the buffer (negative means none)
    #[arg(long = "cursor", allow_negative_numbers = true)]
    cursor: Option<i64>,

    /// Define an alias (repeatable)
    #[arg(long = "alias", value_name = "NAME=VALUE", value_parser = parse_alias_arg)]
    alias_args: Vec<(String, String)>,

    /// TOML file with an [aliases] table
    #[arg(long = "aliases", value_name = "FILE")]
    alias_file: Option<PathBuf>,

    /// File with `alias name='value'` lines
    #[arg(long = "alias-defs", value_name = "FILE")]
    alias_defs: Option<PathBuf>,

    /// Print every command instead of the one under the cursor
    #[arg(long = "all")]
    all: bool,

    /// Output commands as JSON
    #[arg(long = "json")]
    json: bool,

    /// Print the parse tree of each command
    #[arg(long = "tree")]
    tree: bool,
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("SHPARSE_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

fn collect_aliases(cli: &Cli) -> Result<AliasMap, shparse::ConfigError> {
    let mut aliases = AliasMap::new();
    if let Some(path) = &cli.alias_file {
        aliases.extend(load_alias_file(path)?);
    }
    if let Some(path) = &cli.alias_defs {
        aliases.extend(load_alias_definitions(path)?);
    }
    aliases.extend(cli.alias_args.iter().cloned());
    Ok(aliases)
}

fn print_command(command: &Command, cli: &Cli) {
    let tokens: Vec<String> = command
        .tokens
        .iter()
        .map(|t| format!("{:?}", t.text))
        .collect();
    println!("{}", tokens.join(" "));
    if cli.tree {
        print!("{}", format_tree(&command.tree));
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    // Buffer source: -c or stdin
    let buffer = match &cli.buffer {
        Some(b) => b.clone(),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: Cannot read stdin: {}", e);
                std::process::exit(1);
            }
            // A piped line usually carries its newline
            buf.strip_suffix('\n').map(str::to_string).unwrap_or(buf)
        }
    };

    let aliases = match collect_aliases(&cli) {
        Ok(aliases) => aliases,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    debug!("cli event=start len={} aliases={}", buffer.len(), aliases.len());

    let cursor = cli.cursor.and_then(|c| usize::try_from(c).ok());
    let result = if cli.all {
        get_all_commands_with_alias(&buffer, &aliases)
    } else {
        get_command(&buffer, &aliases, cursor).map(|c| c.into_iter().collect())
    };
    let commands = match result {
        Ok(commands) => commands,
        Err(QueryError::Expand { command, source }) if !cli.all => {
            warn!("cli event=expand_failed error={}", source);
            vec![*command]
        }
        Err(e) => {
            error!("cli event=failed error={}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        let value = if cli.all {
            serde_json::to_value(&commands)
        } else {
            serde_json::to_value(commands.first())
        };
        match value {
            Ok(value) => println!("{}", value),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if commands.is_empty() {
        std::process::exit(1);
    }
    for command in &commands {
        print_command(command, &cli);
    }
}
