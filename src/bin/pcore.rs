//! Convert and inspect pcore recordings.

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use pcore::{ChannelMetadata, Data, DataForm};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pcore")]
#[command(about = "Convert wearable sensor recordings between JSON and .pcore wire format")]
#[command(after_help = "FILE TYPES:\n  \
    Files ending in .json are structured documents, anything else is read and\n  \
    written as .pcore protobuf bytes (always differential form).\n\n\
LOGGING:\n  \
    Set RUST_LOG=debug to see block statistics per sensor.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a JSON recording to .pcore wire bytes
    Encode {
        /// Input JSON file
        input: PathBuf,
        /// Output .pcore file
        output: PathBuf,
    },
    /// Convert .pcore wire bytes to a JSON recording
    Decode {
        /// Input .pcore file
        input: PathBuf,
        /// Output JSON file
        output: PathBuf,
        /// Representation of the sensors in the output
        #[arg(long, value_enum, default_value = "absolute")]
        form: Form,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print a summary of a recording (.json or .pcore)
    Inspect {
        /// Recording to inspect
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Form {
    Absolute,
    Differential,
}

impl From<Form> for DataForm {
    fn from(form: Form) -> Self {
        match form {
            Form::Absolute => Self::Absolute,
            Form::Differential => Self::Differential,
        }
    }
}

fn encode(input: &Path, output: &Path) -> Result<(), String> {
    let json = fs::read_to_string(input).map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    let data = Data::from_json_str(&json).map_err(|e| format!("Failed to parse {}: {e}", input.display()))?;
    let bytes = data.to_wire_bytes().map_err(|e| format!("Failed to encode: {e}"))?;
    fs::write(output, &bytes).map_err(|e| format!("Failed to write {}: {e}", output.display()))?;

    println!("Encoded {} sensors", data.sensors.len());
    println!("Output: {} ({} bytes)", output.display(), bytes.len());
    println!("Compression: {:.1}x vs JSON", json.len() as f64 / bytes.len().max(1) as f64);
    Ok(())
}

fn decode(input: &Path, output: &Path, form: DataForm, pretty: bool) -> Result<(), String> {
    let bytes = fs::read(input).map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    let data = Data::from_wire_bytes(&bytes).map_err(|e| format!("Failed to decode {}: {e}", input.display()))?;
    let json = data
        .to_json_string(form, pretty)
        .map_err(|e| format!("Failed to write JSON: {e}"))?;
    fs::write(output, &json).map_err(|e| format!("Failed to write {}: {e}", output.display()))?;

    println!("Decoded {} sensors ({:?})", data.sensors.len(), form);
    println!("Output: {} ({} bytes)", output.display(), json.len());
    Ok(())
}

fn describe(metadata: &ChannelMetadata) -> String {
    match metadata {
        ChannelMetadata::Ppg(ppg) => match (ppg.color, ppg.wavelength_nm) {
            (Some(color), _) => format!("ppg {color:?}"),
            (None, Some(nm)) => format!("ppg {nm} nm"),
            (None, None) => "ppg (empty)".to_string(),
        },
        ChannelMetadata::Acc(acc) => match (acc.coordinate, acc.norm) {
            (Some(axis), _) => format!("acc {axis:?}"),
            (None, Some(norm)) => format!("acc {norm:?}"),
            (None, None) => "acc (empty)".to_string(),
        },
        ChannelMetadata::Unset => "unset".to_string(),
    }
}

fn inspect(input: &Path) -> Result<(), String> {
    let data = Data::read_file(input).map_err(|e| format!("Failed to load {}: {e}", input.display()))?;
    let v = data.header.version;

    println!("File: {}", input.display());
    println!("Version: {}.{}.{}", v.major, v.minor, v.patch);
    println!("Time zone offset: {} min", data.header.time_zone_offset_min);

    for (i, sensor) in data.sensors.iter().enumerate() {
        let ts = sensor.differential_timestamps();
        println!();
        println!("Sensor {i}: {:?}", sensor.sensor_type());
        println!("  Samples:  {}", sensor.absolute_timestamps().len());
        println!("  Blocks:   {}", ts.block_count());
        println!("  Start:    {} ms", sensor.first_timestamp());
        println!("  Duration: {:.3} s", sensor.duration() as f64 / 1000.0);
        for (j, channel) in sensor.channels().iter().enumerate() {
            let (min, max) = channel
                .absolute_block()
                .values()
                .iter()
                .fold((i32::MAX, i32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            if channel.is_empty() {
                println!("  Channel {j}: {} (no samples)", describe(channel.metadata()));
            } else {
                println!("  Channel {j}: {} range [{min}, {max}]", describe(channel.metadata()));
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Command::Encode { input, output } => encode(&input, &output),
        Command::Decode {
            input,
            output,
            form,
            pretty,
        } => decode(&input, &output, form.into(), pretty),
        Command::Inspect { input } => inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    info!("done");
}
