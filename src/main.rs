use clap::Parser;
use miette::Result;
use dlo::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    dlo::logging::init(cli.global.verbose);

    match cli.command {
        Commands::New(args) => dlo::cli::commands::new::run(args, &cli.global),
        Commands::Check(args) => dlo::cli::commands::check::run(args, &cli.global),
        Commands::Summary(args) => dlo::cli::commands::summary::run(args),
        Commands::Submit(args) => dlo::cli::commands::submit::run(args, &cli.global),
        Commands::Schema(args) => dlo::cli::commands::schema::run(args),
        Commands::Completions(args) => dlo::cli::commands::completions::run(args),
    }
}
