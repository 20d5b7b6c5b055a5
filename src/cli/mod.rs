pub mod args;
pub mod commands;

pub use args::{ProcessArgs, ScanArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "flowdoc")]
#[command(version = crate::VERSION)]
#[command(about = "Sanitize and document automation workflow exports in bulk")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: scan a single export locally to review redactions, then run process against a folder to publish redacted copies with generated docs."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Run the batch pipeline over a source folder",
        long_about = "Process lists every workflow JSON in the source folder, then drives each file through fetch, parse, sanitize, document, and write. One failing file never aborts the run; the progress log records each outcome.",
        after_help = "Examples:\n    flowdoc process 1AbCdEfG 2HiJkLmN --api-key $GEMINI_API_KEY --access-token $DRIVE_ACCESS_TOKEN\n    flowdoc process ./exports ./published --local"
    )]
    Process(ProcessArgs),
    #[command(
        about = "Sanitize a single local workflow file",
        long_about = "Scan parses one workflow export, reports every detected secret, and optionally writes the redacted copy. No AI or storage service is contacted.",
        after_help = "Example:\n    flowdoc scan ./exports/invoice-sync.json --output ./invoice-sync.redacted.json"
    )]
    Scan(ScanArgs),
}

pub async fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Process(process_args) => commands::process(process_args).await,
        Command::Scan(scan_args) => commands::scan(scan_args).await,
    }
}
