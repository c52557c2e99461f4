//! PDF realization of a [`ReportLayout`] using the built-in Helvetica fonts.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt};

use crate::error::{ReportError, ReportResult};
use crate::layout::{ReportLayout, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};

fn page_size() -> (Mm, Mm) {
    (
        Mm::from(Pt(PAGE_WIDTH_PT.into())),
        Mm::from(Pt(PAGE_HEIGHT_PT.into())),
    )
}

/// Render the layout to PDF bytes, one document page per layout page.
pub fn render(layout: &ReportLayout) -> ReportResult<Vec<u8>> {
    let (width, height) = page_size();
    let (doc, first_page, first_layer) = PdfDocument::new(&layout.title, width, height, "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(e.to_string()))?;

    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..layout.pages {
        let (width, height) = page_size();
        let (page, layer) = doc.add_page(width, height, "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for op in &layout.ops {
        let layer = layers.get(op.page).ok_or_else(|| {
            ReportError::Render(format!("text op addresses missing page {}", op.page))
        })?;
        let font: &IndirectFontRef = if op.role.bold() { &bold } else { &regular };
        layer.use_text(
            op.text.clone(),
            op.role.size().into(),
            Mm::from(Pt(op.x.into())),
            Mm::from(Pt(op.y.into())),
            font,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{paginate, Section};

    #[test]
    fn renders_a_parseable_pdf_header() {
        let layout = paginate("Report", &[Section::new("Notes:", "patient stable")]);
        let bytes = render(&layout).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn more_layout_pages_render_to_more_output() {
        let short = paginate("Report", &[Section::new("Notes:", "one line")]);
        let body = (0..200).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let long = paginate("Report", &[Section::new("Notes:", body)]);
        assert!(long.pages >= 3);

        let short_bytes = render(&short).unwrap();
        let long_bytes = render(&long).unwrap();
        assert!(long_bytes.len() > short_bytes.len());
    }
}
