use clap::{Parser, Subcommand};
use std::io::Write;

mod diagnostics;
mod render;
mod schema;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "ct-log-conf")]
#[command(about = "Turn a CT log list (JSON) into OpenSSL configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the log list as an OpenSSL CONF file (SSL_CTX_set_ctlog_list_file).
    Openssl {
        /// JSON log list, or `-` for stdin.
        #[arg(long)]
        log_list: String,

        /// Output file, or `-` for stdout. Existing files are overwritten.
        #[arg(short = 'o', long)]
        out: String,
    },
    /// Print the logs and their operators.
    Print {
        /// JSON log list, or `-` for stdin.
        #[arg(long)]
        log_list: String,
    },
}

fn main() -> Result<()> {
    diagnostics::init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Openssl { log_list, out } => {
            let list = schema::load_log_list(&log_list)?;

            for log in list.scheme_prefixed_urls()? {
                diagnostics::warn(format!(
                    "log {:?} has url {:?} with a scheme; output will read url = https://{}",
                    log.description, log.url, log.url
                ));
            }

            if out == "-" {
                let mut stdout = std::io::stdout().lock();
                render::write_openssl_conf(&list, &mut stdout)?;
                stdout.flush()?;
            } else {
                render::generate_openssl_conf(&list, &out)?;
                tracing::info!("wrote {} logs to {}", list.logs.len(), out);
            }
        }
        Commands::Print { log_list } => {
            let list = schema::load_log_list(&log_list)?;
            let summary = render::render_summary(&list)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(summary.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
