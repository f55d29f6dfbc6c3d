//! Bildaufbereitung für die PDF-Erzeugung
//!
//! Fotos und Unterschriften kommen als HTTP-URL oder Data-URL herein.
//! Vor dem Einbetten wird jedes Bild auf eine Maximalbreite verkleinert,
//! auf weißen Grund abgeflacht und als JPEG neu kodiert. Das begrenzt
//! die Dateigröße unabhängig von der Quellauflösung und verhindert
//! schwarze bzw. unsichtbare Unterschriften aus Alpha-only-Strichen.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use reqwest::Client;

use crate::services::document::ImageRef;
use crate::utils::errors::{AppError, AppResult};

/// Maximale Pixelbreite eingebetteter Bilder
pub const MAX_IMAGE_WIDTH: u32 = 800;

const JPEG_QUALITY: u8 = 85;

/// Fertig aufbereitetes Bild, bereit zum Einbetten als DCTDecode-Stream
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub jpeg_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub struct ImageLoader {
    client: Client,
    max_width: u32,
}

impl ImageLoader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_width: MAX_IMAGE_WIDTH,
        }
    }

    /// Lädt und verarbeitet eine Bildreferenz. Fehler werden an den
    /// Aufrufer gemeldet, der sie in einen Platzhaltertext degradiert.
    pub async fn load(&self, reference: &ImageRef) -> AppResult<ProcessedImage> {
        let raw = match reference {
            ImageRef::DataUrl(data_url) => decode_data_url(data_url)?,
            ImageRef::Url(url) => self.fetch(url).await?,
        };

        process_image_bytes(&raw, self.max_width)
    }

    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Bild-Download fehlgeschlagen: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Bild-Download lieferte Status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Bild-Download abgebrochen: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

/// Base64-Teil einer Data-URL dekodieren
fn decode_data_url(data_url: &str) -> AppResult<Vec<u8>> {
    let encoded = data_url
        .split_once(";base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| AppError::Render("Ungültige Data-URL ohne Base64-Teil".to_string()))?;

    BASE64
        .decode(encoded.trim())
        .map_err(|e| AppError::Render(format!("Data-URL nicht dekodierbar: {}", e)))
}

/// Dekodieren, abflachen, verkleinern, als JPEG neu kodieren
pub fn process_image_bytes(raw: &[u8], max_width: u32) -> AppResult<ProcessedImage> {
    let decoded = image::load_from_memory(raw)
        .map_err(|e| AppError::Render(format!("Bild nicht dekodierbar: {}", e)))?;

    let flattened = flatten_onto_white(&decoded);

    let resized = if flattened.width() > max_width {
        let height = (u64::from(flattened.height()) * u64::from(max_width)
            / u64::from(flattened.width())) as u32;
        image::imageops::resize(&flattened, max_width, height.max(1), FilterType::Triangle)
    } else {
        flattened
    };

    let (width, height) = (resized.width(), resized.height());

    let mut jpeg_bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_bytes, JPEG_QUALITY)
        .encode(resized.as_raw(), width, height, image::ColorType::Rgb8)
        .map_err(|e| AppError::Render(format!("JPEG-Kodierung fehlgeschlagen: {}", e)))?;

    Ok(ProcessedImage {
        jpeg_bytes,
        width,
        height,
    })
}

/// Alphakanal gegen einen weißen Hintergrund auflösen.
///
/// Unterschriften-Pads liefern teils Striche, die nur im Alphakanal
/// liegen; ohne Abflachung wären sie im PDF unsichtbar oder vollschwarz.
fn flatten_onto_white(decoded: &DynamicImage) -> RgbImage {
    let rgba = decoded.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = f32::from(pixel[3]) / 255.0;
        let blend = |channel: u8| -> u8 {
            (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8
        };
        out.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image.clone())
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageOutputFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn transparent_pixels_flatten_to_white() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0])); // voll transparent
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255])); // deckend schwarz

        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(img));

        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn oversized_images_are_downscaled() {
        let img = RgbaImage::from_pixel(400, 200, Rgba([10, 20, 30, 255]));
        let processed = process_image_bytes(&png_bytes(&img), 100).unwrap();

        assert_eq!(processed.width, 100);
        assert_eq!(processed.height, 50);
        assert!(!processed.jpeg_bytes.is_empty());
    }

    #[test]
    fn small_images_keep_their_size() {
        let img = RgbaImage::from_pixel(50, 40, Rgba([10, 20, 30, 255]));
        let processed = process_image_bytes(&png_bytes(&img), 100).unwrap();

        assert_eq!(processed.width, 50);
        assert_eq!(processed.height, 40);
    }

    #[test]
    fn data_url_roundtrip_decodes() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let data_url = format!("data:image/png;base64,{}", BASE64.encode(png_bytes(&img)));

        let raw = decode_data_url(&data_url).unwrap();
        assert!(process_image_bytes(&raw, 100).is_ok());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(process_image_bytes(b"kein bild", 100).is_err());
        assert!(decode_data_url("data:image/png,ohne-base64").is_err());
    }
}
