use std::collections::HashSet;

use rxing::common::HybridBinarizer;
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintType, DecodeHintValue, DecodingHintDictionary,
    Exceptions, Luma8LuminanceSource, MultiFormatReader, Reader,
};

use super::DecodeEngine;
use crate::config::ScanConfig;
use crate::error::DecodeError;
use crate::models::{Decoded, Frame, Symbology};
use crate::utils::grayscale::rgba_to_luma;

fn to_rxing(symbology: Symbology) -> BarcodeFormat {
    match symbology {
        Symbology::Ean13 => BarcodeFormat::EAN_13,
        Symbology::Ean8 => BarcodeFormat::EAN_8,
        Symbology::UpcA => BarcodeFormat::UPC_A,
        Symbology::UpcE => BarcodeFormat::UPC_E,
        Symbology::Code128 => BarcodeFormat::CODE_128,
        Symbology::Code39 => BarcodeFormat::CODE_39,
    }
}

fn from_rxing(format: &BarcodeFormat) -> Option<Symbology> {
    match format {
        BarcodeFormat::EAN_13 => Some(Symbology::Ean13),
        BarcodeFormat::EAN_8 => Some(Symbology::Ean8),
        BarcodeFormat::UPC_A => Some(Symbology::UpcA),
        BarcodeFormat::UPC_E => Some(Symbology::UpcE),
        BarcodeFormat::CODE_128 => Some(Symbology::Code128),
        BarcodeFormat::CODE_39 => Some(Symbology::Code39),
        _ => None,
    }
}

/// Multi-format reader restricted to the configured symbologies
#[derive(Debug, Clone)]
pub struct RxingEngine {
    formats: HashSet<BarcodeFormat>,
    try_harder: bool,
}

impl RxingEngine {
    /// Engine for the given formats
    pub fn new(formats: &[Symbology], try_harder: bool) -> Self {
        Self {
            formats: formats.iter().copied().map(to_rxing).collect(),
            try_harder,
        }
    }

    /// Engine using the formats and try-harder flag from `config`
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(&config.formats, config.try_harder)
    }

    // Hint values are not all thread-safe, so the dictionary is rebuilt per call
    fn hints(&self) -> DecodingHintDictionary {
        let mut hints = DecodingHintDictionary::new();
        hints.insert(
            DecodeHintType::POSSIBLE_FORMATS,
            DecodeHintValue::PossibleFormats(self.formats.clone()),
        );
        if self.try_harder {
            hints.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        }
        hints
    }
}

impl Default for RxingEngine {
    fn default() -> Self {
        Self::new(&Symbology::RETAIL, true)
    }
}

impl DecodeEngine for RxingEngine {
    fn decode(&self, frame: &Frame) -> Result<Decoded, DecodeError> {
        if frame.is_empty() {
            return Err(DecodeError::NotFound);
        }
        let (w, h) = (frame.width(), frame.height());
        let luma = rgba_to_luma(frame.data(), w, h);
        let source = Luma8LuminanceSource::new(luma, w as u32, h as u32);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));

        let mut reader = MultiFormatReader::default();
        match reader.decode_with_hints(&mut bitmap, &self.hints()) {
            Ok(result) => Ok(Decoded {
                text: result.getText().to_string(),
                symbology: from_rxing(result.getBarcodeFormat()),
            }),
            Err(Exceptions::NotFoundException(..)) => Err(DecodeError::NotFound),
            Err(other) => Err(DecodeError::Other(other.to_string())),
        }
    }
}
