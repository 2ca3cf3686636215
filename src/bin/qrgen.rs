use clap::Parser;
use rust_qr_gen::{encode, ECLevel, EncodeOptions, QRCode, Version};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrgen", version, about = "Encode QR and Micro QR codes")]
struct Cli {
    /// Payload text
    content: String,
    /// Error correction level: L, M, Q or H
    #[arg(long, default_value = "L")]
    level: String,
    /// Force a version: 1-40 or M1-M4
    #[arg(long, value_name = "VERSION")]
    symbol_version: Option<String>,
    /// Allow micro symbols during version selection
    #[arg(long)]
    micro: bool,
    /// Force a mask index (0-7 normal, 0-3 micro)
    #[arg(long)]
    mask: Option<u8>,
    /// Emit a UTF-8 ECI header before the payload
    #[arg(long)]
    eci: bool,
    /// Keep the requested level instead of boosting it
    #[arg(long)]
    no_boost: bool,
    /// Write a PNG to this path instead of printing string art
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Pixels per module for PNG output
    #[arg(long, default_value_t = 8)]
    scale: u32,
    /// Quiet-zone width in modules
    #[arg(long, default_value_t = 4)]
    border: u32,
}

fn parse_level(s: &str) -> Option<ECLevel> {
    match s.to_ascii_uppercase().as_str() {
        "L" => Some(ECLevel::L),
        "M" => Some(ECLevel::M),
        "Q" => Some(ECLevel::Q),
        "H" => Some(ECLevel::H),
        _ => None,
    }
}

fn parse_version(s: &str) -> Option<Version> {
    if let Some(rest) = s.strip_prefix('M').or_else(|| s.strip_prefix('m')) {
        rest.parse().ok().map(Version::Micro)
    } else {
        s.parse().ok().map(Version::Normal)
    }
}

fn write_png(code: &QRCode, path: &PathBuf, scale: u32, border: u32) -> Result<(), String> {
    let size = code.size() as u32;
    let pixels = (size + 2 * border) * scale;
    let image = image::GrayImage::from_fn(pixels, pixels, |px, py| {
        let mx = px / scale;
        let my = py / scale;
        let dark = mx >= border
            && my >= border
            && mx < border + size
            && my < border + size
            && code.get((mx - border) as usize, (my - border) as usize);
        image::Luma([if dark { 0u8 } else { 255 }])
    });
    image.save(path).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let Some(error_level) = parse_level(&cli.level) else {
        eprintln!("unknown error correction level {:?}", cli.level);
        return ExitCode::FAILURE;
    };
    let version = match cli.symbol_version.as_deref() {
        Some(s) => match parse_version(s) {
            Some(v) => Some(v),
            None => {
                eprintln!("unknown version {:?}", s);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let options = EncodeOptions {
        error_level,
        version,
        mask: cli.mask,
        eci: cli.eci,
        micro: cli.micro.then_some(true),
        boost_error: !cli.no_boost,
        ..EncodeOptions::default()
    };

    let code = match encode(&cli.content, &options) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("encoding failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let family = if code.is_micro() { "M" } else { "" };
    eprintln!(
        "{}{} ({}x{}) level {:?} mask {}",
        family,
        code.version.number(),
        code.size(),
        code.size(),
        code.error_level,
        code.mask_index()
    );

    match cli.output {
        Some(path) => {
            if let Err(err) = write_png(&code, &path, cli.scale.max(1), cli.border) {
                eprintln!("writing {:?} failed: {}", path, err);
                return ExitCode::FAILURE;
            }
        }
        None => print!("{}", code.to_string_art()),
    }
    ExitCode::SUCCESS
}
