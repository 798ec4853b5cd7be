// Visualization rendering — word cloud and co-occurrence graph as PNG, carried as base64.

pub mod canvas;
pub mod network;
pub mod wordcloud;

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbImage};

use crate::error::AnalysisError;

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, AnalysisError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// PNG-encode then base64 (standard alphabet, padded) for transport in JSON.
pub fn to_base64_png(img: &RgbImage) -> Result<String, AnalysisError> {
    Ok(STANDARD.encode(encode_png(img)?))
}

/// Recover the PNG bytes from a base64 string produced by `to_base64_png`.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, AnalysisError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| AnalysisError::RenderingFailure(format!("invalid base64 image: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_base64_round_trip_is_lossless() {
        let img = RgbImage::from_pixel(12, 7, Rgb([10, 200, 30]));
        let png = encode_png(&img).unwrap();
        let encoded = STANDARD.encode(&png);
        assert_eq!(decode_base64(&encoded).unwrap(), png);

        let back = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(back, img);
    }

    #[test]
    fn test_png_signature() {
        let b64 = to_base64_png(&RgbImage::new(3, 3)).unwrap();
        let png = decode_base64(&b64).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_bad_base64_is_rendering_failure() {
        assert!(matches!(
            decode_base64("not*base64"),
            Err(AnalysisError::RenderingFailure(_))
        ));
    }
}
