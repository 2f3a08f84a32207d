use std::fmt;

use super::VariantKind;

/// Barcode symbologies the scanner asks the engine for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    /// EAN-13
    Ean13,
    /// EAN-8
    Ean8,
    /// UPC-A
    UpcA,
    /// UPC-E
    UpcE,
    /// Code 128
    Code128,
    /// Code 39
    Code39,
}

impl Symbology {
    /// Retail/inventory formats accepted by default
    pub const RETAIL: [Symbology; 6] = [
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Code128,
        Symbology::Code39,
    ];

    /// Conventional name, e.g. `EAN-13`
    pub fn name(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN-13",
            Symbology::Ean8 => "EAN-8",
            Symbology::UpcA => "UPC-A",
            Symbology::UpcE => "UPC-E",
            Symbology::Code128 => "CODE-128",
            Symbology::Code39 => "CODE-39",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Successful engine output for one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Decoded payload
    pub text: String,
    /// Symbology reported by the engine, when it is one of ours
    pub symbology: Option<Symbology>,
}

impl Decoded {
    /// Decoded text with no symbology information
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            symbology: None,
        }
    }
}

/// Accepted detection delivered on the result channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    /// Decoded payload
    pub text: String,
    /// Symbology, if the engine reported one
    pub symbology: Option<Symbology>,
    /// Variant that produced the hit
    pub variant: VariantKind,
}
