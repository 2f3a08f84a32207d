use barscan::decoder::{DecodeEngine, RxingEngine};
use barscan::pipeline::sharpen::sharpen;
use barscan::pipeline::{FrameProcessor, TickPlan};
use barscan::retry::EscalationLevel;
use barscan::utils::grayscale::{rgba_to_luma, rgba_to_luma_parallel};
use barscan::{DeviceProfile, Frame};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Vertical stripes over a soft gradient, roughly like a shelf label
fn synthetic_frame(width: usize, height: usize) -> Frame {
    let mut frame = Frame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let base = ((x + y) % 200) as u8 + 40;
            let v = if (x / 7) % 3 == 0 { base / 4 } else { base };
            frame.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    frame
}

fn bench_process_laptop(c: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    let mut processor = FrameProcessor::new(DeviceProfile::laptop());
    c.bench_function("process_1920x1080_laptop", |b| {
        b.iter(|| processor.process(black_box(&frame), EscalationLevel::Nominal))
    });
}

fn bench_process_mobile(c: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    let mut processor = FrameProcessor::new(DeviceProfile::mobile());
    c.bench_function("process_1920x1080_mobile", |b| {
        b.iter(|| processor.process(black_box(&frame), EscalationLevel::Nominal))
    });
}

fn bench_process_widened(c: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    let mut processor = FrameProcessor::new(DeviceProfile::laptop());
    c.bench_function("process_1920x1080_laptop_widened", |b| {
        b.iter(|| processor.process(black_box(&frame), EscalationLevel::Widened))
    });
}

fn bench_sharpen(c: &mut Criterion) {
    let canvas = synthetic_frame(730, 259);
    c.bench_function("sharpen_730x259", |b| {
        b.iter(|| {
            let mut work = canvas.clone();
            sharpen(black_box(&mut work));
            work
        })
    });
}

fn bench_luma(c: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    c.bench_function("luma_1920x1080", |b| {
        b.iter(|| rgba_to_luma(black_box(frame.data()), 1920, 1080))
    });
    c.bench_function("luma_1920x1080_parallel", |b| {
        b.iter(|| rgba_to_luma_parallel(black_box(frame.data()), 1920, 1080))
    });
}

fn bench_decode_miss(c: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    let mut processor = FrameProcessor::new(DeviceProfile::mobile());
    let TickPlan::Variants(variants) = processor.process(&frame, EscalationLevel::Nominal) else {
        return;
    };
    let engine = RxingEngine::default();
    c.bench_function("decode_tick_mobile_miss", |b| {
        b.iter(|| {
            variants
                .iter()
                .filter(|v| engine.decode(black_box(&v.frame)).is_ok())
                .count()
        })
    });
}

criterion_group!(
    benches,
    bench_process_laptop,
    bench_process_mobile,
    bench_process_widened,
    bench_sharpen,
    bench_luma,
    bench_decode_miss
);
criterion_main!(benches);
