//! Document commands.

use crate::app::App;
use clap::{Args, Subcommand};
use docstat_api::{DocumentStatusReport, ResultKind};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DocumentsCommand {
    /// List uploaded documents
    List,
    /// Upload a document for processing
    Upload {
        path: PathBuf,
        /// Keep polling until processing finishes
        #[arg(short, long)]
        watch: bool,
    },
    /// Show the processing status of a document
    Status { id: i64 },
    /// Poll a document until processing finishes
    Watch { id: i64 },
    /// Save a result file of a processed document
    Download {
        id: i64,
        #[command(flatten)]
        kind: ResultFlags,
        /// Destination file, named after the upload by default
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Which result to fetch; the CSV table when none is given.
#[derive(Args)]
#[group(multiple = false)]
pub struct ResultFlags {
    /// Measurements table
    #[arg(long)]
    csv: bool,
    /// Segmentation mask image
    #[arg(long)]
    mask: bool,
    /// Zip archive with every result
    #[arg(long)]
    all: bool,
}

impl ResultFlags {
    pub(crate) fn kind(&self) -> ResultKind {
        if self.mask {
            ResultKind::Mask
        } else if self.all {
            ResultKind::All
        } else {
            ResultKind::Csv
        }
    }
}

pub async fn run(app: &App, cmd: DocumentsCommand) -> Result<(), Box<dyn std::error::Error>> {
    app.require(false)?;

    match cmd {
        DocumentsCommand::List => {
            let documents = app.documents().list().await?;
            if documents.is_empty() {
                println!("No documents");
            }
            for doc in documents {
                println!(
                    "{:>6}  {:<12}  {}  {}",
                    doc.id, doc.status.name, doc.uploaded_at, doc.original_filename
                );
            }
        }
        DocumentsCommand::Upload { path, watch } => {
            let receipt = app.documents().upload_file(&path).await?;
            println!("{} (id {}): {}", receipt.filename, receipt.id, receipt.message);
            if watch {
                watch_document(app, receipt.id).await?;
            }
        }
        DocumentsCommand::Status { id } => {
            let report = app.documents().status(id).await?;
            print_report(&report);
        }
        DocumentsCommand::Watch { id } => watch_document(app, id).await?,
        DocumentsCommand::Download { id, kind, output } => {
            let kind = kind.kind();
            let output = match output {
                Some(output) => output,
                None => {
                    let report = app.documents().status(id).await?;
                    PathBuf::from(kind.file_name(&report.filename))
                }
            };
            let bytes = app.documents().download(id, kind).await?;
            tokio::fs::write(&output, &bytes).await?;
            println!("Saved {} ({} bytes)", output.display(), bytes.len());
        }
    }

    Ok(())
}

async fn watch_document(app: &App, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_status = String::new();
    let report = app
        .poller()
        .watch(id, |report| {
            if report.status.name != last_status {
                println!("{}: {}", report.filename, report.status.name);
                last_status = report.status.name.clone();
            }
        })
        .await?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &DocumentStatusReport) {
    println!("{} (id {})", report.filename, report.id);
    println!("  status: {}", report.status.name);
    if let Some(description) = &report.status.description {
        println!("          {}", description);
    }
    if let Some(url) = &report.result_csv_url {
        println!("  csv:    {}", url);
    }
    if let Some(url) = &report.result_mask_url {
        println!("  mask:   {}", url);
    }
    if let Some(message) = &report.error_message {
        println!("  error:  {}", message);
    }
}
