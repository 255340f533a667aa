use bindexpr::cli::{self, CliError, Command, CompileOptions};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "bindexpr")]
#[command(about = "bindexpr - Compile data-binding expressions to JavaScript")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an expression to JavaScript
    Compile {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Name bare identifiers resolve against
        #[arg(short, long, env = "BINDEXPR_CONTEXT")]
        context: Option<String>,

        /// Print a JSON object with the expression and generated code
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate expression syntax
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Print the parsed expression tree as JSON
    Ast {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let options = match cli.command {
        Commands::Compile {
            expression,
            context,
            json,
            pretty,
        } => CompileOptions {
            command: Command::Compile,
            expression,
            context,
            json,
            pretty,
        },
        Commands::Check { expression } => CompileOptions {
            command: Command::Check,
            expression,
            ..CompileOptions::default()
        },
        Commands::Ast { expression, pretty } => CompileOptions {
            command: Command::Ast,
            expression,
            pretty,
            ..CompileOptions::default()
        },
    };

    if let Err(e) = run(options) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(mut options: CompileOptions) -> Result<(), CliError> {
    if options.expression.is_none() && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.expression = Some(buffer.trim_end_matches(['\r', '\n']).to_string());
    }

    let output = cli::execute(&options)?;
    println!("{}", output.to_text(options.pretty)?);
    Ok(())
}
