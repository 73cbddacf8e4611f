//! tuneplayer CLI: inspect, render and play tunes.
//!
//! Usage:
//!   tp-cli tune.bin
//!   tp-cli tune.h --text --list
//!   tp-cli tune.bin --be --wav output.wav --seconds 60

use std::io::Write;
use std::{env, fs, process};

use tp_master::{Controller, Endian, PlayerConfig};

const USAGE: &str =
    "Usage: tp-cli <tune> [--text] [--be] [--list] [--wav out.wav] [--seconds N] [--manual-cutoff]";

struct Args {
    path: String,
    text: bool,
    endian: Endian,
    list: bool,
    wav: Option<String>,
    seconds: u32,
    manual_cutoff: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        path: String::new(),
        text: false,
        endian: Endian::Little,
        list: false,
        wav: None,
        seconds: 300,
        manual_cutoff: false,
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--text" => parsed.text = true,
            "--be" => parsed.endian = Endian::Big,
            "--list" => parsed.list = true,
            "--manual-cutoff" => parsed.manual_cutoff = true,
            "--wav" => {
                parsed.wav = Some(iter.next().ok_or("--wav needs a path")?.clone());
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                parsed.seconds = value
                    .parse()
                    .map_err(|_| format!("Invalid --seconds value: {}", value))?;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option {}", flag)),
            path if parsed.path.is_empty() => parsed.path = path.to_string(),
            extra => return Err(format!("Unexpected argument {}", extra)),
        }
    }
    if parsed.path.is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(parsed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw).unwrap_or_else(|msg| {
        eprintln!("{}", msg);
        process::exit(1);
    });

    let data = fs::read(&args.path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", args.path, e);
        process::exit(1);
    });

    let mut ctrl = Controller::with_config(PlayerConfig::default().with_manual_cutoff(args.manual_cutoff));
    let loaded = if args.text {
        ctrl.load_text(&String::from_utf8_lossy(&data))
    } else {
        ctrl.load_binary(&data, args.endian)
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load {}: {}", args.path, e);
        process::exit(1);
    });

    log::info!("Loaded {} words from {}", ctrl.words().len(), args.path);
    println!("{}", ctrl.summary());
    println!();

    if args.list {
        for line in ctrl.listing() {
            println!("{}", line);
        }
    } else if let Some(wav) = &args.wav {
        render_to_wav(&ctrl, wav, args.seconds);
    } else {
        play_audio(&mut ctrl);
    }
}

fn play_audio(ctrl: &mut Controller) {
    if let Err(e) = ctrl.play() {
        eprintln!("Failed to start playback: {}", e);
        process::exit(1);
    }
    println!("Playing...");

    while ctrl.is_playing() {
        if let Some(address) = ctrl.position() {
            print!("\rAddress: {:04x}", address);
            let _ = std::io::stdout().flush();
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    println!("\rDone.          ");
}

fn render_to_wav(ctrl: &Controller, path: &str, max_seconds: u32) {
    let sample_rate: u32 = 44100;
    println!("Rendering to {} at {} Hz...", path, sample_rate);

    let wav = ctrl.render_to_wav(sample_rate, max_seconds).unwrap_or_else(|e| {
        eprintln!("Render failed: {}", e);
        process::exit(1);
    });
    println!("Rendered {} bytes", wav.len());

    fs::write(path, &wav).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", path, e);
        process::exit(1);
    });

    println!("Done.");
}
