//! PDF Document builder

use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::page::{Orientation, PageFormat, PageSize};
use crate::{PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// A page created by this builder
struct PageEntry {
    size: PageSize,
    /// Image resources used on this page (resource name -> XObject)
    images: Vec<(String, ObjectId)>,
    /// Content operators, written at save time
    content: Vec<u8>,
}

/// PDF document built from scratch, one page at a time
///
/// Content is buffered per page and written as a single content stream
/// when the document is serialized.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages node
    pages_id: ObjectId,
    /// Pages in order (page number = index + 1)
    pages: Vec<PageEntry>,
    /// Embedded images (data hash -> XObject id, width, height)
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    /// Next image resource number
    next_image_resource: u32,
    /// Document information entries
    info: Dictionary,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal("recibo pdf-core"));

        Self {
            inner,
            pages_id,
            pages: Vec::new(),
            embedded_images: HashMap::new(),
            next_image_resource: 1,
            info,
        }
    }

    /// Create a document with a single blank page
    ///
    /// # Example
    /// ```
    /// use pdf_core::{Orientation, PageFormat, PdfDocument};
    ///
    /// let doc = PdfDocument::with_page(PageFormat::A4, Orientation::Landscape);
    /// assert_eq!(doc.page_count(), 1);
    /// assert_eq!(doc.page_size(1).unwrap().width, 841.89);
    /// ```
    pub fn with_page(format: PageFormat, orientation: Orientation) -> Self {
        let mut doc = Self::new();
        doc.add_page(format.size(orientation));
        doc
    }

    /// Append a blank page and return its number (1-indexed)
    pub fn add_page(&mut self, size: PageSize) -> usize {
        self.pages.push(PageEntry {
            size,
            images: Vec::new(),
            content: Vec::new(),
        });
        self.pages.len()
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the size of a page in points
    pub fn page_size(&self, page: usize) -> Result<PageSize> {
        self.page(page).map(|p| p.size)
    }

    /// Set the document title shown by viewers
    pub fn set_title(&mut self, title: &str) {
        self.info.set("Title", Object::string_literal(title));
    }

    fn page(&self, page: usize) -> Result<&PageEntry> {
        let count = self.pages.len();
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .ok_or(PdfError::InvalidPage(page, count))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageEntry> {
        let count = self.pages.len();
        page.checked_sub(1)
            .and_then(|idx| self.pages.get_mut(idx))
            .ok_or(PdfError::InvalidPage(page, count))
    }

    /// Insert an image stretched to the given box
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Image width in points
    /// * `height` - Image height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(f64, f64)> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
    }

    /// Insert an image with scaling mode
    ///
    /// Returns the size actually drawn, in points.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<(f64, f64)> {
        let page_height = self.page(page)?.size.height;

        let (object_id, orig_width, orig_height) = self.embed_image(data)?;
        let resource_name = self.image_resource_name(page, object_id)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let pdf_y = page_height - y - actual_height;
        let operators =
            generate_image_operators(&resource_name, x, pdf_y, actual_width, actual_height);
        self.page_mut(page)?.content.extend_from_slice(&operators);

        Ok((actual_width, actual_height))
    }

    /// Embed image data once, deduplicated by content hash
    fn embed_image(&mut self, data: &[u8]) -> Result<(ObjectId, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(&entry) = self.embedded_images.get(&data_hash) {
            return Ok(entry);
        }

        let xobject = ImageXObject::decode(data)?;
        let object_id = self.inner.add_object(xobject.to_pdf_stream());
        let entry = (object_id, xobject.width, xobject.height);
        self.embedded_images.insert(data_hash, entry);

        Ok(entry)
    }

    /// Get or create the page-local resource name ("Im1", "Im2") for an image
    fn image_resource_name(&mut self, page: usize, object_id: ObjectId) -> Result<String> {
        let next = self.next_image_resource;
        let entry = self.page_mut(page)?;

        if let Some((name, _)) = entry.images.iter().find(|(_, id)| *id == object_id) {
            return Ok(name.clone());
        }

        let name = format!("Im{next}");
        entry.images.push((name.clone(), object_id));
        self.next_image_resource += 1;

        Ok(name)
    }

    /// Write the page tree and document info into the lopdf document
    fn finalize(&mut self) {
        let mut kids = Vec::with_capacity(self.pages.len());

        for entry in &self.pages {
            let contents_id = self
                .inner
                .add_object(Stream::new(Dictionary::new(), entry.content.clone()));

            let mut resources = Dictionary::new();
            if !entry.images.is_empty() {
                let mut xobjects = Dictionary::new();
                for (name, id) in &entry.images {
                    xobjects.set(name.as_bytes(), Object::Reference(*id));
                }
                resources.set("XObject", Object::Dictionary(xobjects));
            }

            let page_id = self.inner.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(entry.size.width as f32),
                    Object::Real(entry.size.height as f32),
                ],
                "Resources" => resources,
                "Contents" => contents_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let info_id = self.inner.add_object(self.info.clone());
        self.inner.trailer.set("Info", info_id);
    }

    /// Save the document to bytes
    ///
    /// The builder can keep being used afterwards; every call serializes
    /// a complete document.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("Document has no pages".to_string()));
        }

        let snapshot = self.inner.clone();
        self.finalize();

        let mut buffer = Vec::new();
        let saved = self.inner.save_to(&mut buffer);
        self.inner = snapshot;
        saved.map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_no_pages() {
        let doc = PdfDocument::new();
        assert_eq!(doc.page_count(), 0);
        assert!(matches!(doc.page_size(1), Err(PdfError::InvalidPage(1, 0))));
    }

    #[test]
    fn test_empty_document_cannot_be_saved() {
        let mut doc = PdfDocument::new();
        assert!(matches!(doc.to_bytes(), Err(PdfError::SaveError(_))));
    }

    #[test]
    fn test_add_page_numbers() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.add_page(PageFormat::A4.size(Orientation::Portrait)), 1);
        assert_eq!(doc.add_page(PageFormat::Letter.size(Orientation::Portrait)), 2);
        assert_eq!(doc.page_size(2).unwrap().width, 612.0);
        assert!(doc.page_size(0).is_err());
        assert!(doc.page_size(3).is_err());
    }

    #[test]
    fn test_blank_page_serializes() {
        let mut doc = PdfDocument::with_page(PageFormat::A4, Orientation::Landscape);
        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 1);
    }

    #[test]
    fn test_insert_image_invalid_page() {
        let mut doc = PdfDocument::with_page(PageFormat::A4, Orientation::Portrait);
        let result = doc.insert_image(&[0u8; 16], 2, 0.0, 0.0, 10.0, 10.0);
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));
    }
}
