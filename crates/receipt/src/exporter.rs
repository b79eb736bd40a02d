//! Export of a receipt session to a numbered PDF file

use crate::config::ReceiptConfig;
use crate::counter::ReceiptCounter;
use crate::raster::{Raster, Rasterizer};
use crate::session::ReceiptSession;
use crate::store::KeyValueStore;
use crate::{ReceiptError, Result};
use pdf_core::{ImageScaleMode, Orientation, PageFormat, PdfDocument};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Destination for finished receipts
pub trait ReceiptSink {
    /// Store `pdf` under `filename`, returning where it went
    fn deliver(&mut self, filename: &str, pdf: &[u8]) -> Result<PathBuf>;
}

/// Writes receipts into a directory, creating it if needed
///
/// An existing file with the same name is never replaced.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReceiptSink for DirectorySink {
    fn deliver(&mut self, filename: &str, pdf: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ReceiptError::DeliveryError(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.dir.join(filename);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    warn!(path = %path.display(), "receipt file already exists");
                    ReceiptError::DeliveryError(format!(
                        "{} already exists; move it away before exporting again",
                        path.display()
                    ))
                }
                _ => ReceiptError::DeliveryError(format!(
                    "Failed to create {}: {}",
                    path.display(),
                    e
                )),
            })?;
        file.write_all(pdf).map_err(|e| {
            ReceiptError::DeliveryError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}

/// A receipt ready to deliver; nothing has been written yet
#[derive(Debug, Clone)]
pub struct PreparedReceipt {
    /// Number printed on the receipt
    pub number: ReceiptCounter,
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Number of the exported receipt
    pub number: ReceiptCounter,
    pub filename: String,
    pub path: PathBuf,
    /// Number the session will use next
    pub next: ReceiptCounter,
}

/// Turns a session into a delivered PDF
///
/// Exporting is split in two phases. `prepare` renders, captures and
/// assembles the PDF without side effects; `commit` delivers it and advances
/// the counter. A failure in either phase leaves the counter unchanged.
pub struct Exporter<'a, R: Rasterizer, K: ReceiptSink> {
    config: &'a ReceiptConfig,
    rasterizer: R,
    sink: K,
}

impl<'a, R: Rasterizer, K: ReceiptSink> Exporter<'a, R, K> {
    pub fn new(config: &'a ReceiptConfig, rasterizer: R, sink: K) -> Self {
        Self {
            config,
            rasterizer,
            sink,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Render, capture and assemble the PDF for the session's current number
    pub fn prepare<S: KeyValueStore>(
        &self,
        session: &ReceiptSession<S>,
    ) -> Result<PreparedReceipt> {
        session.form().validate()?;

        let number = session.counter();
        let layout = session.render(self.config);
        let raster = self.rasterizer.capture(&layout)?;
        debug!(
            receipt = %number,
            width = raster.width,
            height = raster.height,
            "receipt captured"
        );

        let pdf = build_pdf(&raster, number)?;
        Ok(PreparedReceipt {
            number,
            filename: number.filename(),
            pdf,
        })
    }

    /// Deliver a prepared receipt and advance the counter
    ///
    /// Fails with `StaleReceipt` if the session has moved past the number the
    /// receipt was prepared for.
    pub fn commit<S: KeyValueStore>(
        &mut self,
        session: &mut ReceiptSession<S>,
        prepared: PreparedReceipt,
    ) -> Result<ExportOutcome> {
        if prepared.number != session.counter() {
            return Err(ReceiptError::StaleReceipt {
                prepared: prepared.number.formatted(),
                current: session.counter().formatted(),
            });
        }

        let path = self.sink.deliver(&prepared.filename, &prepared.pdf)?;
        let next = session.advance_counter()?;
        info!(receipt = %prepared.number, path = %path.display(), "receipt exported");

        Ok(ExportOutcome {
            number: prepared.number,
            filename: prepared.filename,
            path,
            next,
        })
    }

    /// Prepare and commit in one step
    pub fn export<S: KeyValueStore>(
        &mut self,
        session: &mut ReceiptSession<S>,
    ) -> Result<ExportOutcome> {
        let result = self
            .prepare(session)
            .and_then(|prepared| self.commit(session, prepared));

        if let Err(e) = &result {
            warn!(receipt = %session.counter(), "export failed, counter unchanged: {e}");
        }
        result
    }
}

/// Place a raster on a landscape A4 page, scaled to the page width
pub fn build_pdf(raster: &Raster, number: ReceiptCounter) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::with_page(PageFormat::A4, Orientation::Landscape);
    doc.set_title(&format!("Recibo {}", number.formatted()));

    let page = doc.page_size(1)?;
    doc.insert_image_scaled(
        &raster.png,
        1,
        0.0,
        0.0,
        page.width,
        page.height,
        ImageScaleMode::FitWidth,
    )?;

    Ok(doc.to_bytes()?)
}
