//! Receipt layout: the fixed arrangement of text, signature and rule
//!
//! The layout is a plain description (blocks of styled spans). It carries no
//! pixel data; `crate::raster` turns it into an image.

use crate::config::{ProviderProfile, ReceiptSettings};
use crate::counter::ReceiptCounter;
use crate::form::ReceiptForm;
use chrono::Datelike;
use pt_text::format_pt_date_long;
use std::path::PathBuf;
use tracing::debug;

/// Shown in place of the date when it is empty or malformed
pub const INVALID_DATE: &str = "Data inválida";

/// Alternative text for the signature image
pub const SIGNATURE_ALT: &str = "Assinatura";

pub const BODY_SIZE: f32 = 16.0;
pub const HEADING_SIZE: f32 = 62.0;
pub const PADDING: f32 = 32.0;
pub const PARAGRAPH_GAP: f32 = 16.0;
pub const SIGNATURE_GAP: f32 = 32.0;
pub const SIGNATURE_WIDTH: f32 = 200.0;

/// Horizontal alignment of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// A run of text in one weight
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One vertically stacked element; sizes are in layout pixels
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Wrapped paragraph of spans
    Text {
        spans: Vec<Span>,
        size: f32,
        align: Align,
        margin_top: f32,
    },
    /// Centered image scaled to `width`
    Image {
        path: PathBuf,
        alt: String,
        width: f32,
        margin_top: f32,
    },
    /// Centered horizontal line, `width_ratio` of the content width
    Rule {
        width_ratio: f32,
        thickness: f32,
        margin_top: f32,
    },
}

impl Block {
    fn text(spans: Vec<Span>, margin_top: f32) -> Self {
        Block::Text {
            spans,
            size: BODY_SIZE,
            align: Align::Left,
            margin_top,
        }
    }

    fn centered(text: &str, size: f32) -> Self {
        Block::Text {
            spans: vec![Span::plain(text)],
            size,
            align: Align::Center,
            margin_top: 0.0,
        }
    }
}

/// A rendered receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLayout {
    /// Space around the content, in layout pixels
    pub padding: f32,
    pub blocks: Vec<Block>,
}

impl ReceiptLayout {
    /// The layout as text, one line per block
    ///
    /// Images show as `[alt]` and rules as dashes.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Text { spans, .. } => {
                    lines.push(spans.iter().map(|s| s.text.as_str()).collect::<String>())
                }
                Block::Image { alt, .. } => lines.push(format!("[{alt}]")),
                Block::Rule { width_ratio, .. } => {
                    let len = (40.0 * width_ratio).round().max(1.0) as usize;
                    lines.push("-".repeat(len));
                }
            }
        }
        lines.join("\n")
    }
}

/// Render the receipt for the current form and counter
pub fn render_receipt(
    profile: &ProviderProfile,
    settings: &ReceiptSettings,
    form: &ReceiptForm,
    counter: ReceiptCounter,
) -> ReceiptLayout {
    let date = match form.parsed_date() {
        Ok(date) => format_pt_date_long(date.year(), date.month(), date.day()),
        Err(_) => INVALID_DATE.to_string(),
    };

    let blocks = vec![
        Block::centered(&profile.name, HEADING_SIZE),
        Block::text(
            vec![Span::bold(format!("RECIBO Nº {}", counter.formatted()))],
            PARAGRAPH_GAP,
        ),
        Block::text(
            vec![Span::bold(format!(
                "CPF: {} - COREN: {} - CELULAR: {} - EMAIL: {}",
                profile.tax_id, profile.registration_id, profile.phone, profile.email
            ))],
            PARAGRAPH_GAP,
        ),
        Block::text(
            vec![
                Span::plain("Recebi de "),
                Span::bold(form.receiver_name()),
                Span::plain(", CPF "),
                Span::bold(form.receiver_tax_id()),
                Span::plain(" a importância de "),
                Span::bold(format!(
                    "{} (R${})",
                    form.amount_words(),
                    form.amount_numeric()
                )),
                Span::plain(format!(" referente à {}.", settings.service)),
            ],
            PARAGRAPH_GAP,
        ),
        Block::text(
            vec![
                Span::plain("Cirurgia realizada: "),
                Span::bold(form.procedure()),
            ],
            PARAGRAPH_GAP,
        ),
        Block::text(
            vec![
                Span::plain("Atendimento prestado no(a) "),
                Span::bold(format!("{}.", form.location())),
            ],
            0.0,
        ),
        Block::text(
            vec![Span::plain(format!("{}, {}", settings.city, date))],
            PARAGRAPH_GAP,
        ),
        Block::Image {
            path: settings.signature.clone(),
            alt: SIGNATURE_ALT.to_string(),
            width: SIGNATURE_WIDTH,
            margin_top: SIGNATURE_GAP,
        },
        Block::Rule {
            width_ratio: 0.6,
            thickness: 1.0,
            margin_top: 0.0,
        },
        Block::centered(&profile.name, BODY_SIZE),
    ];

    debug!(receipt = %counter, date = %date, "rendered receipt layout");

    ReceiptLayout {
        padding: PADDING,
        blocks,
    }
}
