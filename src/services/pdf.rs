//! Nativer PDF-Paginierer auf lopdf-Basis
//!
//! Setzt die Layout-Blöcke eines Dokuments auf A4-Seiten mit festen
//! Rändern. Die Seitenumbrüche entstehen aus einem laufenden
//! Y-Cursor mit Passt-es-noch-Prüfung vor jedem Block; ein Block wird
//! nie mitten in einer Zeile zerrissen, nur an seinen Zeilengrenzen.
//! Fehlgeschlagene Bilder degradieren zu einem Platzhaltertext, der
//! Render-Lauf bricht dafür nie ab.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use reqwest::Client;

use crate::services::document::Block;
use crate::services::image::{ImageLoader, ProcessedImage};
use crate::services::merge::MergedDocument;
use crate::services::render::PdfRenderBackend;
use crate::utils::errors::{AppError, AppResult};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const PAGE_MARGIN: f32 = 56.7; // 20 mm

const FONT_SIZE_HEADING: f32 = 16.0;
const FONT_SIZE_SUBHEADING: f32 = 12.0;
const FONT_SIZE_BODY: f32 = 10.0;
const LINE_HEIGHT_FACTOR: f32 = 1.4;

/// Geschätzte mittlere Zeichenbreite relativ zur Schriftgröße
const CHAR_WIDTH_FACTOR: f32 = 0.5;

/// Spaltenbreite der Beschriftungsspalte in Tabellen
const TABLE_LABEL_WIDTH: f32 = 220.0;

/// Maximale Darstellungsbreite eingebetteter Bilder in Punkt
const IMAGE_MAX_DISPLAY_WIDTH: f32 = 240.0;

const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * PAGE_MARGIN;

/// Platzhaltertext für Bilder, die nicht geladen werden konnten
pub const IMAGE_UNAVAILABLE: &str = "[Bild nicht verfügbar]";

/// Block nach der Bildauflösung: Bilder sind entweder fertige JPEGs
/// oder bereits zu Text degradiert
enum ResolvedBlock {
    Heading(String),
    Subheading(String),
    Paragraph(String),
    Table(Vec<(String, String)>),
    Image { image: ProcessedImage, caption: String },
    Spacer,
}

pub struct NativePdfRenderer {
    loader: ImageLoader,
}

impl NativePdfRenderer {
    pub fn new(client: Client) -> Self {
        Self {
            loader: ImageLoader::new(client),
        }
    }

    /// Bilder laden und aufbereiten; Fehler degradieren pro Bild
    async fn resolve_blocks(&self, blocks: &[Block]) -> Vec<ResolvedBlock> {
        let mut resolved = Vec::with_capacity(blocks.len());

        for block in blocks {
            match block {
                Block::Heading(text) => resolved.push(ResolvedBlock::Heading(text.clone())),
                Block::Subheading(text) => resolved.push(ResolvedBlock::Subheading(text.clone())),
                Block::Paragraph(text) => resolved.push(ResolvedBlock::Paragraph(text.clone())),
                Block::Table(rows) => resolved.push(ResolvedBlock::Table(rows.clone())),
                Block::Spacer => resolved.push(ResolvedBlock::Spacer),
                Block::Image { image, caption } => match self.loader.load(image).await {
                    Ok(processed) => resolved.push(ResolvedBlock::Image {
                        image: processed,
                        caption: caption.clone(),
                    }),
                    Err(e) => {
                        log::warn!("⚠️ Bild konnte nicht eingebettet werden: {}", e);
                        resolved.push(ResolvedBlock::Paragraph(format!(
                            "{} {}",
                            IMAGE_UNAVAILABLE, caption
                        )));
                    }
                },
            }
        }

        resolved
    }
}

#[async_trait]
impl PdfRenderBackend for NativePdfRenderer {
    async fn render(&self, document: &MergedDocument) -> AppResult<Vec<u8>> {
        log::info!("🖨️ Nativer PDF-Render: {}", document.title);

        let resolved = self.resolve_blocks(&document.blocks).await;
        let bytes = layout_document(&resolved)?;

        log::info!("✅ PDF erzeugt ({} Bytes)", bytes.len());
        Ok(bytes)
    }
}

/// Synchrone Layout-Stufe: Blöcke in lopdf-Seiten setzen
fn layout_document(blocks: &[ResolvedBlock]) -> AppResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // Alle Bild-XObjects vorab registrieren; jede Seite referenziert
    // denselben Ressourcensatz
    let mut xobjects: Vec<(String, lopdf::ObjectId)> = Vec::new();
    for block in blocks {
        if let ResolvedBlock::Image { image, .. } = block {
            let name = format!("Im{}", xobjects.len());
            let id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => image.width as i64,
                    "Height" => image.height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                image.jpeg_bytes.clone(),
            ));
            xobjects.push((name, id));
        }
    }

    let mut page_ids: Vec<Object> = Vec::new();
    let mut ops: Vec<Operation> = Vec::new();
    let mut y = PAGE_HEIGHT - PAGE_MARGIN;
    let mut image_index = 0usize;

    for block in blocks {
        match block {
            ResolvedBlock::Heading(text) => {
                emit_wrapped_text(
                    &mut doc,
                    pages_id,
                    &xobjects,
                    &mut page_ids,
                    &mut ops,
                    &mut y,
                    text,
                    FONT_SIZE_HEADING,
                    true,
                    true,
                );
                y -= FONT_SIZE_HEADING;
            }
            ResolvedBlock::Subheading(text) => {
                // Überschrift nie als Witwe am Seitenende
                ensure_space(
                    &mut doc,
                    pages_id,
                    &xobjects,
                    &mut page_ids,
                    &mut ops,
                    &mut y,
                    line_height(FONT_SIZE_SUBHEADING) + line_height(FONT_SIZE_BODY),
                );
                y -= FONT_SIZE_SUBHEADING * 0.6;
                emit_wrapped_text(
                    &mut doc,
                    pages_id,
                    &xobjects,
                    &mut page_ids,
                    &mut ops,
                    &mut y,
                    text,
                    FONT_SIZE_SUBHEADING,
                    true,
                    false,
                );
                y -= FONT_SIZE_SUBHEADING * 0.3;
            }
            ResolvedBlock::Paragraph(text) => {
                emit_wrapped_text(
                    &mut doc,
                    pages_id,
                    &xobjects,
                    &mut page_ids,
                    &mut ops,
                    &mut y,
                    text,
                    FONT_SIZE_BODY,
                    false,
                    false,
                );
                y -= FONT_SIZE_BODY * 0.4;
            }
            ResolvedBlock::Table(rows) => {
                for (label, value) in rows {
                    ensure_space(
                        &mut doc,
                        pages_id,
                        &xobjects,
                        &mut page_ids,
                        &mut ops,
                        &mut y,
                        line_height(FONT_SIZE_BODY),
                    );
                    y -= line_height(FONT_SIZE_BODY);
                    emit_text_at(&mut ops, PAGE_MARGIN, y, label, FONT_SIZE_BODY, true);
                    emit_text_at(
                        &mut ops,
                        PAGE_MARGIN + TABLE_LABEL_WIDTH,
                        y,
                        value,
                        FONT_SIZE_BODY,
                        false,
                    );
                }
                y -= FONT_SIZE_BODY * 0.6;
            }
            ResolvedBlock::Image { image, caption } => {
                let scale = (IMAGE_MAX_DISPLAY_WIDTH / image.width as f32).min(1.0);
                let display_width = image.width as f32 * scale;
                let display_height = image.height as f32 * scale;
                let needed = display_height + line_height(FONT_SIZE_BODY) + 6.0;

                ensure_space(
                    &mut doc,
                    pages_id,
                    &xobjects,
                    &mut page_ids,
                    &mut ops,
                    &mut y,
                    needed,
                );

                y -= display_height;
                let name = xobjects[image_index].0.clone();
                image_index += 1;

                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        display_width.into(),
                        0.into(),
                        0.into(),
                        display_height.into(),
                        PAGE_MARGIN.into(),
                        y.into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![name.as_str().into()]));
                ops.push(Operation::new("Q", vec![]));

                y -= line_height(FONT_SIZE_BODY);
                emit_text_at(&mut ops, PAGE_MARGIN, y, caption, FONT_SIZE_BODY, false);
                y -= FONT_SIZE_BODY * 0.6;
            }
            ResolvedBlock::Spacer => {
                y -= line_height(FONT_SIZE_BODY);
            }
        }
    }

    finalize_page(&mut doc, pages_id, &xobjects, &mut page_ids, &mut ops);

    if page_ids.is_empty() {
        return Err(AppError::Render("Dokument ohne Inhalt".to_string()));
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Render(format!("PDF konnte nicht serialisiert werden: {}", e)))?;

    Ok(bytes)
}

fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Seitenumbruch, falls der nächste Block nicht mehr passt
fn ensure_space(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    xobjects: &[(String, lopdf::ObjectId)],
    page_ids: &mut Vec<Object>,
    ops: &mut Vec<Operation>,
    y: &mut f32,
    needed: f32,
) {
    if *y - needed < PAGE_MARGIN && !ops.is_empty() {
        finalize_page(doc, pages_id, xobjects, page_ids, ops);
        *y = PAGE_HEIGHT - PAGE_MARGIN;
    }
}

/// Offene Operationen als fertige Seite in den Seitenbaum hängen
fn finalize_page(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    xobjects: &[(String, lopdf::ObjectId)],
    page_ids: &mut Vec<Object>,
    ops: &mut Vec<Operation>,
) {
    if ops.is_empty() {
        return;
    }

    let content = Content {
        operations: std::mem::take(ops),
    };
    let encoded = content.encode().unwrap_or_default();
    let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), encoded));

    let mut resources = dictionary! {
        "Font" => dictionary! {
            "F1" => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "Encoding" => "WinAnsiEncoding",
            },
            "F2" => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica-Bold",
                "Encoding" => "WinAnsiEncoding",
            },
        },
    };

    if !xobjects.is_empty() {
        let mut xobject_dict = lopdf::Dictionary::new();
        for (name, id) in xobjects {
            xobject_dict.set(name.as_bytes(), Object::Reference(*id));
        }
        resources.set("XObject", Object::Dictionary(xobject_dict));
    }

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Resources" => resources,
        "MediaBox" => vec![0.0.into(), 0.0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        "Contents" => content_id,
    });

    page_ids.push(Object::Reference(page_id));
}

/// Text umbrechen und zeilenweise setzen, mit Umbruchprüfung je Zeile
#[allow(clippy::too_many_arguments)]
fn emit_wrapped_text(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    xobjects: &[(String, lopdf::ObjectId)],
    page_ids: &mut Vec<Object>,
    ops: &mut Vec<Operation>,
    y: &mut f32,
    text: &str,
    font_size: f32,
    bold: bool,
    centered: bool,
) {
    for line in wrap_text(text, font_size, CONTENT_WIDTH) {
        ensure_space(doc, pages_id, xobjects, page_ids, ops, y, line_height(font_size));
        *y -= line_height(font_size);

        let x = if centered {
            let estimated_width = line.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR;
            ((PAGE_WIDTH - estimated_width) / 2.0).max(PAGE_MARGIN)
        } else {
            PAGE_MARGIN
        };

        emit_text_at(ops, x, *y, &line, font_size, bold);
    }
}

fn emit_text_at(ops: &mut Vec<Operation>, x: f32, y: f32, text: &str, font_size: f32, bold: bool) {
    let font = if bold { "F2" } else { "F1" };
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), font_size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Umlaute und Sonderzeichen für WinAnsiEncoding in Latin-1-Bytes
/// übersetzen; nicht darstellbare Zeichen werden zu '?'
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code < 256 {
                code as u8
            } else if c == '€' {
                0x80
            } else {
                b'?'
            }
        })
        .collect()
}

/// Wortweiser Umbruch an der geschätzten Zeilenbreite
fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let max_chars = ((max_width / (font_size * CHAR_WIDTH_FACTOR)) as usize).max(8);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::document::ImageRef;
    use std::collections::BTreeMap;

    fn merged(blocks: Vec<Block>) -> MergedDocument {
        MergedDocument {
            fields: BTreeMap::new(),
            html: String::new(),
            blocks,
            title: "Test".to_string(),
        }
    }

    fn renderer() -> NativePdfRenderer {
        NativePdfRenderer::new(reqwest::Client::new())
    }

    #[test]
    fn wrap_text_respects_estimated_line_width() {
        let text = "eins zwei drei vier fünf sechs sieben acht";
        let lines = wrap_text(text, 10.0, 100.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 20);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn win_ansi_keeps_umlauts_and_euro() {
        let encoded = encode_win_ansi("Gebühr 10 € für Rückgabe");
        assert!(encoded.contains(&0xFC)); // ü
        assert!(encoded.contains(&0x80)); // €
        assert!(!encoded.contains(&b'?'));
    }

    #[tokio::test]
    async fn renders_a_parseable_pdf() {
        let doc = merged(vec![
            Block::Heading("Mietvertrag".to_string()),
            Block::Paragraph("Ein kurzer Absatz.".to_string()),
            Block::Table(vec![("IBAN".to_string(), "-".to_string())]),
        ]);

        let bytes = renderer().render(&doc).await.unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn long_documents_break_onto_multiple_pages() {
        let mut blocks = vec![Block::Heading("Protokoll".to_string())];
        for i in 0..120 {
            blocks.push(Block::Paragraph(format!("Position {} der Checkliste.", i)));
        }

        let bytes = renderer().render(&merged(blocks)).await.unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();

        assert!(parsed.get_pages().len() > 1);
    }

    #[tokio::test]
    async fn broken_image_degrades_to_placeholder() {
        let doc = merged(vec![
            Block::Heading("Fotos".to_string()),
            Block::Image {
                image: ImageRef::DataUrl("data:image/png;base64,ists-kaputt".to_string()),
                caption: "Foto 1".to_string(),
            },
            Block::Paragraph("Danach geht es weiter.".to_string()),
        ]);

        let bytes = renderer().render(&doc).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
