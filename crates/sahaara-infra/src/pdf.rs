//! Safety plan PDF rendering.
//!
//! Renders the plan as a paginated A4 document with the builtin Helvetica
//! fonts. Builtin fonts only cover WinAnsi, so the native-script heading
//! suffixes used in the chat transcript are dropped here; the romanized
//! section content is unaffected.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use sahaara_core::plan::{self, PlanRenderer, RenderError};
use sahaara_types::plan::SafetyPlan;

/// Renders safety plans with `printpdf`.
pub struct PdfPlanRenderer;

impl PlanRenderer for PdfPlanRenderer {
    fn render(&self, plan: &SafetyPlan) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            "Personalized Safety Plan",
            page_width(),
            page_height(),
            "content",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError(e.to_string()))?;

        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: page_height() - Mm(30.0),
        };

        writer.title(&bold, "Personalized Safety Plan");
        writer.body(
            &regular,
            &format!("Generated: {}", plan.created_at.format("%Y-%m-%d %H:%M:%S")),
        );
        writer.body(&bold, &format!("Risk Level: {}", plan.risk_level));
        writer.gap();

        for (key, items) in plan::ordered_sections(plan) {
            if items.is_empty() {
                continue;
            }
            writer.heading(&bold, heading_for(key));
            for item in items {
                writer.body(&regular, &format!("- {item}"));
            }
            writer.gap();
        }

        doc.save_to_bytes().map_err(|e| RenderError(e.to_string()))
    }
}

fn page_width() -> Mm {
    Mm(210.0)
}

fn page_height() -> Mm {
    Mm(297.0)
}

fn margin() -> Mm {
    Mm(20.0)
}

fn heading_for(key: &str) -> &'static str {
    match key {
        "immediate_safety" => "Immediate Safety Steps",
        "coping_strategies" => "Coping Strategies",
        "support_resources" => "Support Resources",
        _ => "Emergency Contacts",
    }
}

/// Cursor over the current page; adds pages as text runs past the bottom
/// margin.
struct PageWriter<'a> {
    doc: &'a printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
}

impl PageWriter<'_> {
    fn title(&mut self, font: &IndirectFontRef, line: &str) {
        self.write(line, font, 22.0);
        self.y = self.y - Mm(14.0);
    }

    fn heading(&mut self, font: &IndirectFontRef, line: &str) {
        self.write(line, font, 14.0);
        self.y = self.y - Mm(10.0);
    }

    fn body(&mut self, font: &IndirectFontRef, line: &str) {
        self.write(line, font, 11.0);
        self.y = self.y - Mm(6.5);
    }

    fn gap(&mut self) {
        self.y = self.y - Mm(5.0);
    }

    fn write(&mut self, line: &str, font: &IndirectFontRef, size: f32) {
        if self.y < margin() {
            let (page, layer) = self.doc.add_page(page_width(), page_height(), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = page_height() - margin();
        }
        self.layer.use_text(line, size, margin(), self.y, font);
    }
}
