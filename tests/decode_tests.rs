//! Still-image decoding through the real multi-format engine

mod common;

use barscan::decoder::{DecodeEngine, RxingEngine};
use barscan::retry::EscalationLevel;
use barscan::{DeviceProfile, Frame, HostInfo, Symbology, scan_frame};
use common::{SAMPLE_EAN, ean13_frame, ean13_modules};

#[test]
fn test_ean13_module_count() {
    let modules = ean13_modules(SAMPLE_EAN);
    assert_eq!(modules.len(), 95);
    assert_eq!(&modules[..3], &[true, false, true]);
    assert_eq!(&modules[92..], &[true, false, true]);
}

#[test]
fn test_engine_reads_plain_symbol() {
    let frame = ean13_frame(SAMPLE_EAN, 400, 120, 3, 100);
    let decoded = RxingEngine::default().decode(&frame).unwrap();
    assert_eq!(decoded.text, SAMPLE_EAN);
    assert_eq!(decoded.symbology, Some(Symbology::Ean13));
}

#[test]
fn test_laptop_tick_decodes_centred_symbol() {
    let frame = ean13_frame(SAMPLE_EAN, 1280, 720, 6, 400);
    let scan = scan_frame(
        &frame,
        &DeviceProfile::laptop(),
        RxingEngine::default(),
        EscalationLevel::Nominal,
    );
    assert_eq!(scan.variants, 5);
    let hit = scan.hit.expect("symbol not decoded");
    assert_eq!(hit.decoded.text, SAMPLE_EAN);
    assert_eq!(hit.decoded.symbology, Some(Symbology::Ean13));
    assert!(scan.errors.is_empty());
}

#[test]
fn test_mobile_tick_decodes_centred_symbol() {
    let frame = ean13_frame(SAMPLE_EAN, 1280, 720, 6, 400);
    let profile = DeviceProfile::detect(&HostInfo::new(
        "Linux armv8l",
        "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
    ));
    assert!(!profile.is_laptop);
    let scan = scan_frame(&frame, &profile, RxingEngine::default(), EscalationLevel::Nominal);
    assert_eq!(scan.variants, 3);
    assert_eq!(scan.hit.expect("symbol not decoded").decoded.text, SAMPLE_EAN);
}

#[test]
fn test_restricted_formats_ignore_other_symbologies() {
    let frame = ean13_frame(SAMPLE_EAN, 400, 120, 3, 100);
    let engine = RxingEngine::new(&[Symbology::Code128], true);
    assert!(engine.decode(&frame).is_err());
}

#[test]
fn test_symbol_outside_roi_is_missed() {
    // Symbol hugging the left edge, outside the centred crop
    let symbol = ean13_frame(SAMPLE_EAN, 300, 120, 3, 100);
    let mut frame = Frame::filled(1280, 720, [255, 255, 255, 255]);
    for y in 0..120 {
        for x in 0..300 {
            frame.set_pixel(x, y, symbol.pixel(x, y));
        }
    }
    let scan = scan_frame(
        &frame,
        &DeviceProfile::mobile(),
        RxingEngine::default(),
        EscalationLevel::Nominal,
    );
    assert_eq!(scan.variants, 3);
    assert!(scan.hit.is_none());
}
