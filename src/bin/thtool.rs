use clap::{Parser, Subcommand};
use log::LevelFilter;
use outdoor_th::decoder::config;
use outdoor_th::device::DeviceDescriptor;
use outdoor_th::encoder::FrameBuilder;
use outdoor_th::output::OutputRecord;
use outdoor_th::tools::{frames_path_from_env, read_frames, sweep_single_bit_flips};
use outdoor_th::{
    DecodeStats, Decoder, FailureReason, LogDiagnostics, RawFrame, Reading, decode_batch,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "thtool", version, about = "Outdoor temperature/humidity frame tools")]
struct Cli {
    /// Increase verbosity (-vv logs every decode stage; TH_VERBOSE sets a floor)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Print readings as JSON objects
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode one or more hex frames
    Decode {
        #[arg(required = true)]
        frames: Vec<String>,
    },
    /// Decode every frame listed in a file
    File {
        path: Option<PathBuf>,
        /// Decode on the rayon thread pool
        #[arg(long)]
        parallel: bool,
    },
    /// Flip each bit of a frame and report what the checksum catches
    Sweep { frame: String },
    /// Build a checksum-valid frame from field values
    Encode {
        #[arg(long)]
        id: u8,
        #[arg(long, default_value_t = 1)]
        channel: u8,
        /// Degrees Celsius, one decimal place
        #[arg(long, allow_hyphen_values = true)]
        temperature: f32,
        #[arg(long)]
        humidity: u8,
        #[arg(long)]
        battery_low: bool,
    },
    /// Print the device descriptor
    Info,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = config::effective_verbosity(cli.verbose);
    init_logging(verbose);

    match cli.command {
        Command::Decode { frames } => decode_cmd(&frames, verbose, cli.json),
        Command::File { path, parallel } => file_cmd(path, parallel, verbose, cli.json),
        Command::Sweep { frame } => sweep_cmd(&frame),
        Command::Encode {
            id,
            channel,
            temperature,
            humidity,
            battery_low,
        } => encode_cmd(id, channel, temperature, humidity, battery_low),
        Command::Info => info_cmd(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_outcome(label: &str, result: &Result<Reading, FailureReason>, json: bool) {
    match result {
        Ok(reading) => {
            let record = OutputRecord::from(reading);
            if json {
                match record.to_json() {
                    Ok(text) => println!("{}", text),
                    Err(err) => eprintln!("{}: failed to serialize reading: {}", label, err),
                }
            } else {
                println!("{} -> {}", label, record);
            }
        }
        Err(reason) => println!("{} -> rejected: {}", label, reason),
    }
}

fn print_stats(stats: &DecodeStats) {
    println!(
        "Decoded {}/{} ({:.1}%): all_zero={} checksum_mismatch={} temperature={} humidity={}",
        stats.decoded,
        stats.total(),
        stats.success_rate() * 100.0,
        stats.all_zero,
        stats.checksum_mismatch,
        stats.temperature_out_of_range,
        stats.humidity_out_of_range
    );
}

fn decode_cmd(frames: &[String], verbose: u8, json: bool) -> ExitCode {
    let mut decoder = Decoder::with_diagnostics(Box::new(LogDiagnostics::new(verbose)));
    let mut bad_input = false;

    for text in frames {
        match RawFrame::from_hex(text) {
            Ok(frame) => {
                let result = decoder.decode(&frame);
                print_outcome(&frame.to_string(), &result, json);
            }
            Err(err) => {
                eprintln!("{}: {}", text, err);
                bad_input = true;
            }
        }
    }

    if frames.len() > 1 && !json {
        print_stats(decoder.stats());
    }
    if bad_input || decoder.stats().decoded == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn file_cmd(path: Option<PathBuf>, parallel: bool, verbose: u8, json: bool) -> ExitCode {
    let path = path.unwrap_or_else(frames_path_from_env);
    let lines = match read_frames(&path) {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("Failed to read {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut frames = Vec::with_capacity(lines.len());
    let mut line_numbers = Vec::with_capacity(lines.len());
    for line in &lines {
        match &line.frame {
            Ok(frame) => {
                frames.push(*frame);
                line_numbers.push(line.line_no);
            }
            Err(err) => eprintln!("{}:{}: {}", path.display(), line.line_no, err),
        }
    }
    if frames.is_empty() {
        println!("No frames found in {}", path.display());
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    let (results, stats) = if parallel {
        let results = decode_batch(&frames);
        let stats = DecodeStats::from_results(&results);
        (results, stats)
    } else {
        let mut decoder = Decoder::with_diagnostics(Box::new(LogDiagnostics::new(verbose)));
        let results = decoder.decode_batch(&frames);
        (results, *decoder.stats())
    };
    let elapsed = start.elapsed();

    for ((frame, line_no), result) in frames.iter().zip(&line_numbers).zip(&results) {
        print_outcome(&format!("[{}] {}", line_no, frame), result, json);
    }
    if !json {
        print_stats(&stats);
        println!("Elapsed: {:.2?}", elapsed);
    }
    ExitCode::SUCCESS
}

fn sweep_cmd(text: &str) -> ExitCode {
    let frame = match RawFrame::from_hex(text) {
        Ok(frame) => frame,
        Err(err) => {
            eprintln!("{}: {}", text, err);
            return ExitCode::FAILURE;
        }
    };

    let report = sweep_single_bit_flips(&frame);
    println!("Frame: {}", frame);
    match &report.baseline {
        Ok(reading) => println!("Baseline: {}", OutputRecord::from(reading)),
        Err(reason) => println!("Baseline: rejected: {}", reason),
    }
    println!(
        "Flips: {} checksum_mismatch={} all_zero={} passed={}",
        report.flips,
        report.checksum_mismatch,
        report.all_zero,
        report.exceptions.len()
    );
    for (bit, result) in &report.exceptions {
        match result {
            Ok(reading) => println!("  bit {:2}: accepted as {}", bit, OutputRecord::from(reading)),
            Err(reason) => println!("  bit {:2}: {}", bit, reason),
        }
    }
    println!("Detection rate: {:.2}%", report.detection_rate() * 100.0);
    ExitCode::SUCCESS
}

fn encode_cmd(id: u8, channel: u8, temperature: f32, humidity: u8, battery_low: bool) -> ExitCode {
    if !(1..=4).contains(&channel) {
        eprintln!("channel must be 1-4, got {}", channel);
        return ExitCode::FAILURE;
    }
    let tenths = (temperature * 10.0).round();
    if !(-2048.0..=2047.0).contains(&tenths) {
        eprintln!("temperature {} does not fit the 12-bit field", temperature);
        return ExitCode::FAILURE;
    }
    if humidity > 127 {
        eprintln!("humidity {} does not fit the 7-bit field", humidity);
        return ExitCode::FAILURE;
    }

    let frame = FrameBuilder::new(id)
        .channel(channel)
        .temperature_tenths(tenths as i16)
        .humidity(humidity)
        .battery_low(battery_low)
        .build();
    println!("{}", frame);
    println!("{{42}}{}", frame.to_hex());
    ExitCode::SUCCESS
}

fn info_cmd() -> ExitCode {
    let device = DeviceDescriptor::from_env();
    println!("Model: {}", device.name);
    println!("Modulation: {}", device.modulation);
    println!(
        "Timing: short={}us long={}us gap={}us reset={}us",
        device.timing.short_width,
        device.timing.long_width,
        device.timing.gap_limit,
        device.timing.reset_limit
    );
    println!("Row: {} bits, {} matching repeats", device.row_bits, device.min_repeats);
    println!("Transmit interval: {}s", device.transmit_interval_secs);
    println!("Fields: {}", device.fields.join(", "));
    ExitCode::SUCCESS
}
