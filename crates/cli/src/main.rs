mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use receipt::{
    DirectorySink, Exporter, FileStore, FormField, GlyphRasterizer, KeyValueStore, ReceiptConfig,
    ReceiptSession,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(about = "Fill in and export numbered payment receipts as PDF")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "recibo.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the receipt to recibo_NNN.pdf and advance the counter
    Export {
        #[command(flatten)]
        fields: FieldArgs,

        /// Directory for the PDF (overrides the config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the receipt as text without exporting
    Preview {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Print an amount in words, e.g. `recibo words 150.5`
    Words {
        /// Amount with a dot decimal separator
        amount: String,
    },
    /// Print the next receipt number
    Counter,
}

#[derive(Args, Debug, Default)]
struct FieldArgs {
    /// Name of the person who paid
    #[arg(long)]
    receiver_name: Option<String>,

    /// Payer's CPF
    #[arg(long)]
    receiver_tax_id: Option<String>,

    /// Amount with a dot decimal separator, e.g. 150.50
    #[arg(long)]
    amount: Option<String>,

    /// Procedure performed
    #[arg(long)]
    procedure: Option<String>,

    /// Hospital or clinic
    #[arg(long)]
    location: Option<String>,

    /// Service date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
}

impl FieldArgs {
    fn values(&self) -> [(FormField, Option<&str>); 6] {
        [
            (FormField::ReceiverName, self.receiver_name.as_deref()),
            (FormField::ReceiverTaxId, self.receiver_tax_id.as_deref()),
            (FormField::AmountNumeric, self.amount.as_deref()),
            (FormField::Procedure, self.procedure.as_deref()),
            (FormField::Location, self.location.as_deref()),
            (FormField::Date, self.date.as_deref()),
        ]
    }

    fn apply<S: KeyValueStore>(&self, session: &mut ReceiptSession<S>) {
        for (field, value) in self.values() {
            if let Some(value) = value {
                session.update_field(field, value);
            }
        }
    }
}

fn open_session(config: &ReceiptConfig) -> Result<ReceiptSession<FileStore>> {
    let store = FileStore::new(&config.receipt.counter_store);
    ReceiptSession::open(store).with_context(|| {
        format!(
            "Failed to read receipt counter from {}",
            config.receipt.counter_store.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let mut config = ReceiptConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    tracing::debug!("config: {:?}", config);

    match cli.command {
        Command::Export { fields, output_dir } => {
            if let Some(dir) = output_dir {
                config.receipt.output_dir = dir;
            }

            let mut session = open_session(&config)?;
            fields.apply(&mut session);

            let rasterizer = GlyphRasterizer::from_settings(&config.raster)
                .context("Failed to load receipt fonts")?;
            let sink = DirectorySink::new(&config.receipt.output_dir);
            let mut exporter = Exporter::new(&config, rasterizer, sink);

            let outcome = exporter.export(&mut session).context("Export failed")?;
            println!("{}", outcome.path.display());
        }
        Command::Preview { fields } => {
            let mut session = open_session(&config)?;
            fields.apply(&mut session);
            println!("{}", session.render(&config).plain_text());
        }
        Command::Words { amount } => {
            let value = pt_text::parse_amount(&amount)
                .with_context(|| format!("Not a number: {amount:?}"))?;
            println!("{}", pt_text::format_reais(value));
        }
        Command::Counter => {
            let session = open_session(&config)?;
            println!("{}", session.counter());
        }
    }

    Ok(())
}
