use anyhow::{Context, bail};
use barscan::camera::ReplayCamera;
use barscan::debounce::TerminalBell;
use barscan::decoder::RxingEngine;
use barscan::pipeline::{FrameProcessor, TickPlan};
use barscan::retry::EscalationLevel;
use barscan::tools::{image_files, load_frame, luma_stats, save_frame};
use barscan::utils::grayscale::rgba_to_luma;
use barscan::{
    DeviceProfile, HostInfo, ScanChannels, ScanConfig, ScanController, ScanSession, scan_frame,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "scantool", version, about = "barscan CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Override host detection (defaults to the machine running the tool)
#[derive(Args, Clone)]
struct HostArgs {
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    user_agent: Option<String>,
}

impl HostArgs {
    fn profile(&self) -> DeviceProfile {
        let current = HostInfo::current();
        let host = HostInfo::new(
            self.platform.clone().unwrap_or(current.platform),
            self.user_agent.clone().unwrap_or(current.user_agent),
        );
        DeviceProfile::detect(&host)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run one pipeline tick over a still image and decode it
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Use the widened region of interest
        #[arg(long)]
        widened: bool,
        #[command(flatten)]
        host: HostArgs,
    },
    /// Write every decode variant of an image as PNG
    Variants {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        widened: bool,
        #[command(flatten)]
        host: HostArgs,
    },
    /// Feed a directory of images through a live scan session
    Replay {
        #[arg(long)]
        frames: PathBuf,
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
        /// Frames reported as "not ready" before the real ones
        #[arg(long, default_value_t = 0)]
        warmup: usize,
        #[command(flatten)]
        host: HostArgs,
    },
    /// Print the device profile that would be used
    Profile {
        #[command(flatten)]
        host: HostArgs,
    },
}

fn level(widened: bool) -> EscalationLevel {
    if widened {
        EscalationLevel::Widened
    } else {
        EscalationLevel::Nominal
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Decode {
            image,
            widened,
            host,
        } => decode_cmd(&image, level(widened), &host.profile()),
        Command::Variants {
            image,
            out,
            widened,
            host,
        } => variants_cmd(&image, &out, level(widened), host.profile()),
        Command::Replay {
            frames,
            timeout_ms,
            warmup,
            host,
        } => replay_cmd(&frames, Duration::from_millis(timeout_ms), warmup, host.profile()).await,
        Command::Profile { host } => {
            println!("{:#?}", host.profile());
            Ok(())
        }
    }
}

fn decode_cmd(image: &Path, level: EscalationLevel, profile: &DeviceProfile) -> anyhow::Result<()> {
    let frame =
        load_frame(image).with_context(|| format!("failed to load {}", image.display()))?;
    let stats = luma_stats(&rgba_to_luma(frame.data(), frame.width(), frame.height()));
    println!(
        "Image: {} ({}x{}) luma {}-{} avg {}",
        image.display(),
        frame.width(),
        frame.height(),
        stats.min,
        stats.max,
        stats.avg
    );

    let config = ScanConfig::from_env();
    let start = Instant::now();
    let scan = scan_frame(&frame, profile, RxingEngine::from_config(&config), level);
    let elapsed = start.elapsed();

    println!("Variants: {} ({:?} ROI)", scan.variants, level);
    for err in &scan.errors {
        println!("  engine error: {err}");
    }
    match scan.hit {
        Some(hit) => {
            let symbology = hit
                .decoded
                .symbology
                .map_or("unknown", |s| s.name());
            println!(
                "Decoded {} [{}] from {} in {:.2}ms",
                hit.decoded.text,
                symbology,
                hit.variant,
                elapsed.as_secs_f64() * 1000.0
            );
        }
        None => println!("No barcode found ({:.2}ms)", elapsed.as_secs_f64() * 1000.0),
    }
    Ok(())
}

fn variants_cmd(
    image: &Path,
    out: &Path,
    level: EscalationLevel,
    profile: DeviceProfile,
) -> anyhow::Result<()> {
    let frame =
        load_frame(image).with_context(|| format!("failed to load {}", image.display()))?;
    let mut processor = FrameProcessor::new(profile);
    let roi = processor.roi_for(frame.width(), frame.height(), level);
    let TickPlan::Variants(variants) = processor.process(&frame, level) else {
        bail!("{} produced no variants (roi {:?})", image.display(), roi);
    };

    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;
    let stem = image
        .file_stem()
        .map_or_else(|| "frame".to_string(), |s| s.to_string_lossy().into_owned());
    for variant in &variants {
        let path = out.join(format!("{stem}_{}.png", variant.kind));
        save_frame(&path, &variant.frame)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{} {}x{} -> {}",
            variant.kind,
            variant.frame.width(),
            variant.frame.height(),
            path.display()
        );
    }
    Ok(())
}

async fn replay_cmd(
    dir: &Path,
    timeout: Duration,
    warmup: usize,
    profile: DeviceProfile,
) -> anyhow::Result<()> {
    let files =
        image_files(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    let mut frames = Vec::with_capacity(files.len());
    for path in &files {
        match load_frame(path) {
            Ok(frame) => frames.push(frame),
            Err(err) => log::warn!("skipping {}: {err}", path.display()),
        }
    }
    if frames.is_empty() {
        bail!("no readable images in {}", dir.display());
    }
    println!("Replaying {} frames from {}", frames.len(), dir.display());

    let config = ScanConfig::from_env();
    let (channels, mut receivers) = ScanChannels::new();
    let session = ScanSession::new(
        ReplayCamera::new(frames).with_warmup(warmup),
        RxingEngine::from_config(&config),
        profile,
        &config,
        channels,
    )
    .with_feedback(Arc::new(TerminalBell));
    let mut controller = ScanController::new(session);

    let start = Instant::now();
    controller.start().await?;
    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            Some(event) = receivers.results.recv() => {
                let symbology = event.symbology.map_or("unknown", |s| s.name());
                println!(
                    "Scanned {} [{}] from {} after {:.0}ms",
                    event.text,
                    symbology,
                    event.variant,
                    start.elapsed().as_secs_f64() * 1000.0
                );
                break;
            }
            Some(err) = receivers.errors.recv() => {
                eprintln!("scan error: {err}");
                if err.is_fatal() {
                    break;
                }
            }
            _ = &mut deadline => {
                println!("No barcode within {}ms", timeout.as_millis());
                break;
            }
        }
    }

    let outcome = controller.stop().await?;
    if let Some(session) = controller.session() {
        println!(
            "Outcome: {:?}, consecutive failures: {}",
            outcome,
            session.consecutive_failures()
        );
    }
    Ok(())
}
