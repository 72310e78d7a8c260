use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use optab::{Database, Format, OpcodeGroup, OpcodeTable};

#[derive(Parser)]
#[command(name = "optab", about = "Emulator instruction table generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the instruction table source from an opcode database
    Generate {
        #[command(flatten)]
        db: DbArgs,
        /// Generated table source
        #[arg(short, long, default_value = "op_table.cpp")]
        output: PathBuf,
        /// Also write the header declaring both tables
        #[arg(long)]
        header: Option<PathBuf>,
    },
    /// Fail if previously generated files differ from the database
    Check {
        #[command(flatten)]
        db: DbArgs,
        /// Generated table source
        #[arg(short, long, default_value = "op_table.cpp")]
        output: PathBuf,
        /// Generated header
        #[arg(long)]
        header: Option<PathBuf>,
    },
    /// Show a summary of the opcode database
    Info {
        #[command(flatten)]
        db: DbArgs,
    },
}

#[derive(Args)]
struct DbArgs {
    /// Opcode database
    #[arg(short, long, default_value = "ops.json")]
    input: PathBuf,
    /// Database format
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Pick from the file extension
    Auto,
    Json,
    Yaml,
}

impl DbArgs {
    fn load(&self) -> Database {
        let format = match self.format {
            FormatArg::Auto => Format::from_path(&self.input),
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
        };
        log::debug!("Loading {} as {format:?}", self.input.display());
        Database::load_with_format(&self.input, format).unwrap_or_else(|e| fail(e))
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { db, output, header } => cmd_generate(&db, &output, header.as_deref()),
        Commands::Check { db, output, header } => cmd_check(&db, &output, header.as_deref()),
        Commands::Info { db } => cmd_info(&db),
    }
}

fn fail(e: optab::Error) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn cmd_generate(args: &DbArgs, output: &Path, header: Option<&Path>) {
    let db = args.load();
    if let Err(e) = optab::generate(&db, output, header) {
        fail(e);
    }
}

fn cmd_check(args: &DbArgs, output: &Path, header: Option<&Path>) {
    let db = args.load();
    if let Err(e) = optab::check(&db, output, header) {
        fail(e);
    }
}

fn cmd_info(args: &DbArgs) {
    let db = args.load();

    println!("=== Opcode Database ===");
    println!("Source:           {}", args.input.display());
    for (name, group) in db.groups() {
        print_group(name, group);
    }
}

fn print_group(name: &str, group: &OpcodeGroup) {
    let table = match OpcodeTable::build(group) {
        Ok(t) => t,
        Err(e) => fail(e),
    };
    let branches = table.iter().filter(|(_, insn)| insn.has_branch_cycles()).count();

    println!("--- {name} ---");
    println!("Opcodes:          {}", table.len());
    match group.key_range() {
        Some((lo, hi)) => println!("Key range:        {lo}..={hi}"),
        None => println!("Key range:        (empty)"),
    }
    println!("Branching:        {branches}");
}
