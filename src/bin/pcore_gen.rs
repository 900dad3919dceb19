//! Generate synthetic pcore recordings.

use clap::Parser;
use pcore::{
    AbsoluteBlock, AbsoluteTimestampsContainer, AccMetaData, ChannelMetadata, Color, Coordinate, Data, DataForm,
    Header, Norm, PpgMetaData, Sensor, SensorType, Version,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pcore-gen")]
#[command(about = "Generate a synthetic PPG + accelerometer recording")]
#[command(after_help = "OUTPUT:\n  \
    Files ending in .json are written as structured documents (see --form),\n  \
    anything else as .pcore protobuf bytes.")]
struct Args {
    /// Output file path
    output: PathBuf,

    /// Recording length in seconds
    #[arg(short, long, default_value = "60")]
    seconds: u64,

    /// PPG sampling interval in milliseconds (default: 25 Hz)
    #[arg(long, default_value = "40")]
    ppg_interval_ms: u64,

    /// Accelerometer sampling interval in milliseconds (default: 50 Hz)
    #[arg(long, default_value = "20")]
    acc_interval_ms: u64,

    /// Include random sampling gaps (sensor dropouts)
    #[arg(long)]
    gaps: bool,

    /// First timestamp in Unix milliseconds
    #[arg(long, default_value = "1700000000000")]
    start_ms: u64,

    /// Time zone offset written to the header, in minutes
    #[arg(long, default_value = "0")]
    tz_offset_min: i32,

    /// Representation used for JSON output
    #[arg(long, default_value = "absolute", value_parser = ["absolute", "differential"])]
    form: String,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

/// Timestamps at a fixed interval, with occasional dropouts when `gaps` is set
fn generate_timestamps(rng: &mut StdRng, args: &Args, interval_ms: u64) -> Vec<u64> {
    let end = args.start_ms + args.seconds * 1000;
    let mut ts = Vec::new();
    let mut t = args.start_ms;
    while t < end {
        ts.push(t);
        t += interval_ms;
        // Roughly 0.5% chance of a dropout of 0.2 to 3 seconds
        if args.gaps && rng.random_range(0..1000) < 5 {
            t += rng.random_range(200..3000);
        }
    }
    ts
}

/// Pulse-like waveform around `baseline` at ~72 bpm
fn ppg_wave(rng: &mut StdRng, ts: &[u64], baseline: f64, amplitude: f64) -> Vec<i32> {
    ts.iter()
        .map(|&t| {
            let phase = (t as f64 / 1000.0) * 1.2 * 2.0 * PI;
            let pulse = phase.sin() + 0.3 * (2.0 * phase).sin();
            let noise: f64 = rng.random_range(-0.02..=0.02);
            (baseline + amplitude * (pulse + noise)).round() as i32
        })
        .collect()
}

/// Wrist motion in milli-g with gravity on `gravity_mg`
fn acc_wave(rng: &mut StdRng, ts: &[u64], gravity_mg: f64) -> Vec<i32> {
    ts.iter()
        .map(|&t| {
            let sway = 40.0 * ((t as f64 / 1000.0) * 0.5 * 2.0 * PI).sin();
            let jitter: f64 = rng.random_range(-8.0..=8.0);
            (gravity_mg + sway + jitter).round() as i32
        })
        .collect()
}

fn euclidean_norm(x: &[i32], y: &[i32], z: &[i32]) -> Vec<i32> {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&x, &y), &z)| {
            let (x, y, z) = (f64::from(x), f64::from(y), f64::from(z));
            (x * x + y * y + z * z).sqrt().round() as i32
        })
        .collect()
}

fn build(args: &Args, rng: &mut StdRng) -> Result<Data, pcore::Error> {
    let ppg_ts = generate_timestamps(rng, args, args.ppg_interval_ms);
    let ppg_channels = vec![
        (
            ChannelMetadata::Ppg(PpgMetaData::with_color(Color::Green)),
            AbsoluteBlock::new(ppg_wave(rng, &ppg_ts, 120_000.0, 1_500.0)),
        ),
        (
            ChannelMetadata::Ppg(PpgMetaData::with_color(Color::Red)),
            AbsoluteBlock::new(ppg_wave(rng, &ppg_ts, 90_000.0, 600.0)),
        ),
        (
            ChannelMetadata::Ppg(PpgMetaData::with_wavelength(940)),
            AbsoluteBlock::new(ppg_wave(rng, &ppg_ts, 150_000.0, 800.0)),
        ),
    ];
    let ppg = Sensor::from_absolute(SensorType::Ppg, ppg_channels, AbsoluteTimestampsContainer::new(ppg_ts))?;

    let acc_ts = generate_timestamps(rng, args, args.acc_interval_ms);
    let x = acc_wave(rng, &acc_ts, 0.0);
    let y = acc_wave(rng, &acc_ts, 0.0);
    let z = acc_wave(rng, &acc_ts, 1000.0);
    let norm = euclidean_norm(&x, &y, &z);
    let acc_channels = vec![
        (ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::X)), AbsoluteBlock::new(x)),
        (ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::Y)), AbsoluteBlock::new(y)),
        (ChannelMetadata::Acc(AccMetaData::with_coordinate(Coordinate::Z)), AbsoluteBlock::new(z)),
        (
            ChannelMetadata::Acc(AccMetaData::with_norm(Norm::EuclideanDifferencesNorm)),
            AbsoluteBlock::new(norm),
        ),
    ];
    let acc = Sensor::from_absolute(SensorType::Acc, acc_channels, AbsoluteTimestampsContainer::new(acc_ts))?;

    let header = Header {
        version: Version {
            major: 1,
            minor: 0,
            patch: 0,
        },
        time_zone_offset_min: args.tz_offset_min,
        data_form: DataForm::Absolute,
    };
    Ok(Data::new(header, vec![ppg, acc]))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let data = match build(&args, &mut rng) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let form = if args.form == "differential" {
        DataForm::Differential
    } else {
        DataForm::Absolute
    };
    if let Err(e) = data.write_file(&args.output, form) {
        eprintln!("Error: failed to write {}: {e}", args.output.display());
        std::process::exit(1);
    }

    for sensor in &data.sensors {
        println!(
            "{:?}: {} samples, {} channels, {} blocks, {:.1} s",
            sensor.sensor_type(),
            sensor.absolute_timestamps().len(),
            sensor.channels().len(),
            sensor.differential_timestamps().block_count(),
            sensor.duration() as f64 / 1000.0
        );
    }
    println!("Output: {}", args.output.display());
}
