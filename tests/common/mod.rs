//! Shared fixtures: synthetic EAN-13 frames and scripted decode engines

#![allow(dead_code)]

use barscan::decoder::DecodeEngine;
use barscan::{DecodeError, Decoded, Frame, Symbology};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];
const G_CODES: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101", "0111001", "0000101", "0010001",
    "0001001", "0010111",
];
const R_CODES: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];
const PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG", "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL",
    "LGGLGL",
];

/// The 95 modules of an EAN-13 symbol, `true` = bar
pub fn ean13_modules(code: &str) -> Vec<bool> {
    let digits: Vec<usize> = code
        .chars()
        .map(|c| c.to_digit(10).expect("digit") as usize)
        .collect();
    assert_eq!(digits.len(), 13, "EAN-13 needs 13 digits");

    let mut pattern = String::from("101");
    let parity = PARITY[digits[0]].as_bytes();
    for (i, &d) in digits[1..7].iter().enumerate() {
        pattern.push_str(if parity[i] == b'L' { L_CODES[d] } else { G_CODES[d] });
    }
    pattern.push_str("01010");
    for &d in &digits[7..] {
        pattern.push_str(R_CODES[d]);
    }
    pattern.push_str("101");
    pattern.chars().map(|c| c == '1').collect()
}

/// White frame with an EAN-13 symbol centred in it
pub fn ean13_frame(code: &str, width: usize, height: usize, module: usize, bar_height: usize) -> Frame {
    let modules = ean13_modules(code);
    let symbol_w = modules.len() * module;
    let x0 = (width - symbol_w) / 2;
    let y0 = (height - bar_height) / 2;
    let mut frame = Frame::filled(width, height, [255, 255, 255, 255]);
    for (i, &bar) in modules.iter().enumerate() {
        if !bar {
            continue;
        }
        for y in y0..y0 + bar_height {
            for x in x0 + i * module..x0 + (i + 1) * module {
                frame.set_pixel(x, y, [0, 0, 0, 255]);
            }
        }
    }
    frame
}

pub const SAMPLE_EAN: &str = "4006381333931";

/// Scripted engine: hits on one call index, misses on every other call.
///
/// Records the width of every raster it sees.
pub struct Scripted {
    hit_on: Option<usize>,
    text: String,
    widths: Mutex<Vec<usize>>,
}

impl Scripted {
    pub fn hit_on(call: usize, text: &str) -> Self {
        Self {
            hit_on: Some(call),
            text: text.to_string(),
            widths: Mutex::new(Vec::new()),
        }
    }

    pub fn always_miss() -> Self {
        Self {
            hit_on: None,
            text: String::new(),
            widths: Mutex::new(Vec::new()),
        }
    }

    pub fn widths(&self) -> Vec<usize> {
        self.widths.lock().unwrap().clone()
    }
}

impl DecodeEngine for Scripted {
    fn decode(&self, frame: &Frame) -> Result<Decoded, DecodeError> {
        let mut widths = self.widths.lock().unwrap();
        let call = widths.len();
        widths.push(frame.width());
        if self.hit_on == Some(call) {
            Ok(Decoded {
                text: self.text.clone(),
                symbology: Some(Symbology::Ean13),
            })
        } else {
            Err(DecodeError::NotFound)
        }
    }
}

/// Decodes every raster, successfully
pub struct AlwaysHit(pub &'static str);

impl DecodeEngine for AlwaysHit {
    fn decode(&self, _frame: &Frame) -> Result<Decoded, DecodeError> {
        Ok(Decoded::from_text(self.0))
    }
}

/// Slow engine that hits; raises `started` once a decode is under way
pub struct Slow {
    delay: Duration,
    started: Arc<AtomicBool>,
}

impl Slow {
    pub fn new(delay: Duration) -> (Self, Arc<AtomicBool>) {
        let started = Arc::new(AtomicBool::new(false));
        (
            Self {
                delay,
                started: Arc::clone(&started),
            },
            started,
        )
    }
}

impl DecodeEngine for Slow {
    fn decode(&self, _frame: &Frame) -> Result<Decoded, DecodeError> {
        self.started.store(true, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Ok(Decoded::from_text("late"))
    }
}

/// Engine that always fails with a non-not-found error
pub struct Broken;

impl DecodeEngine for Broken {
    fn decode(&self, _frame: &Frame) -> Result<Decoded, DecodeError> {
        Err(DecodeError::Other("format error".into()))
    }
}
