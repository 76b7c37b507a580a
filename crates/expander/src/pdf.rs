//! PDF page rasterization via Pdfium.
//!
//! Each selected page is rendered to a bitmap and encoded as JPEG. Page
//! selection uses the engine's 1-based convention; conversion to Pdfium's
//! 0-based index happens here, at the boundary.

use std::io::Cursor;
use std::path::Path;

use docweave_core::{ExpandError, PageSet};
use image::ImageFormat;
use pdfium_render::prelude::*;

/// Target pixel width for rendered pages.
const RENDER_WIDTH: i32 = 1024;

/// The 1-based page numbers to render, in ascending order.
///
/// With a page set, only member pages are kept; selected numbers beyond the
/// last page are skipped. Without one, every page is included.
pub fn included_pages(page_count: u32, pages: Option<&PageSet>) -> Vec<u32> {
    (1..=page_count)
        .filter(|&number| pages.is_none_or(|selected| selected.contains(number)))
        .collect()
}

/// Rasterize the pages of a PDF to JPEG bytes, in page order.
///
/// Blocking and CPU-bound; callers on an async runtime should wrap this in
/// `spawn_blocking`.
pub fn rasterize(path: &Path, pages: Option<&PageSet>) -> Result<Vec<Vec<u8>>, ExpandError> {
    let render_error = |reason: String| ExpandError::PdfRender {
        path: path.to_path_buf(),
        reason,
    };

    let pdfium = Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| render_error(format!("failed to bind pdfium: {e}")))?;

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| render_error(format!("failed to load pdf: {e}")))?;

    let render_config = PdfRenderConfig::new().set_target_width(RENDER_WIDTH);
    let page_count = document.pages().len() as u32;

    let mut rendered = Vec::new();
    for page_number in included_pages(page_count, pages) {
        let page = document
            .pages()
            .get((page_number - 1) as u16)
            .map_err(|e| render_error(format!("failed to access page {page_number}: {e}")))?;

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| render_error(format!("failed to render page {page_number}: {e}")))?;

        let mut jpeg = Vec::new();
        bitmap
            .as_image()
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .map_err(|e| render_error(format!("failed to encode page {page_number}: {e}")))?;

        tracing::debug!(page = page_number, bytes = jpeg.len(), "rendered pdf page");
        rendered.push(jpeg);
    }

    Ok(rendered)
}
