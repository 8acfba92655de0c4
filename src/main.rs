// main.rs      gifsplash command
//
// Copyright (c) 2019-2026  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gifsplash::block::{DisposalMethod, Frame};
use gifsplash::{Animation, Decoder, Lzw, Screen, Screens, State};
use std::error::Error;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &str = std::env!("CARGO_PKG_VERSION");

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Always);
    match create_app().get_matches().subcommand() {
        ("show", Some(matches)) => show(&mut out, matches)?,
        ("play", Some(matches)) => play(&mut out, matches)?,
        _ => unreachable!(),
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("gifsplash")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("GIF splash animation utility")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("show")
                .about("Show GIF frame table")
                .arg(
                    Arg::with_name("files")
                        .required(true)
                        .min_values(1)
                        .help("input file(s)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a GIF on an in-memory screen")
                .arg(Arg::with_name("file").required(true).help("input file"))
                .arg(
                    Arg::with_name("ticks")
                        .long("ticks")
                        .takes_value(true)
                        .default_value("1000")
                        .help("number of 1/100 s ticks"),
                )
                .arg(
                    Arg::with_name("screen")
                        .long("screen")
                        .takes_value(true)
                        .possible_values(&["top", "bottom"])
                        .default_value("top")
                        .help("target screen"),
                ),
        )
}

/// Handle show subcommand
fn show(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    if let Some(values) = matches.values_of_os("files") {
        for path in values {
            show_file(out, path)?;
        }
    }
    Ok(())
}

/// Show one GIF file
fn show_file(
    out: &mut StandardStream,
    path: &OsStr,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan)).set_intense(true);
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let f = BufReader::new(File::open(path)?);
    let gif = Decoder::new(f).decode()?;
    let frame_digits = digits(gif.frames.len()).max(3);
    let width = gif.logical_screen_desc.screen_width();
    let height = gif.logical_screen_desc.screen_height();
    let size_digits = 4.max(1 + digits(width) + digits(height));
    let version = String::from_utf8_lossy(&gif.header.version()).to_string();
    out.set_color(&magenta)?;
    writeln!(out, "{}", path.to_string_lossy())?;
    out.set_color(&bold)?;
    write!(
        out,
        "GIF{}, {}x{}, frames: {}",
        version,
        width,
        height,
        gif.frames.len()
    )?;
    match gif.loop_count {
        Some(0) => write!(out, ", repeat: ∞")?,
        Some(c) => write!(out, ", repeat: {}", c)?,
        None => (),
    }
    writeln!(out)?;
    out.set_color(&cyan)?;
    for cmt in &gif.comments {
        for l in String::from_utf8_lossy(cmt).split('\n') {
            let l = l.trim();
            if !l.is_empty() {
                writeln!(out, "  # {}", l)?;
            }
        }
    }
    out.set_color(&yellow)?;
    write!(out, " {:>w$}", "Fr#", w = frame_digits)?;
    write!(out, "  Delay Disp")?;
    write!(out, " {:>w$}", "Size", w = size_digits)?;
    write!(out, " {:>w$}", "X,Y", w = size_digits)?;
    writeln!(out, " Clrs Trn Inp")?;
    let global_clr = gif.global_color_table.as_ref().map_or(0, |t| t.len());
    for (n, f) in gif.frames.iter().enumerate() {
        write_frame(
            f,
            out,
            width,
            height,
            global_clr,
            n,
            frame_digits,
            size_digits,
        )?;
    }
    Ok(())
}

/// Write one row of the frame table
fn write_frame(
    frame: &Frame,
    out: &mut StandardStream,
    width: u16,
    height: u16,
    global_clr: usize,
    number: usize,
    frame_digits: usize,
    size_digits: usize,
) -> Result<(), Box<dyn Error>> {
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    out.set_color(&dflt)?;
    let interlaced = if frame.image_desc.interlaced() { 'i' } else { ' ' };
    write!(out, "{}", interlaced)?;
    out.set_color(&bold)?;
    write!(out, "{:>w$}", number, w = frame_digits)?;
    let gc = frame.graphic_control_ext.as_ref();
    let d = gc.map_or(0, |gc| gc.delay_time_cs());
    if d == 0 {
        out.set_color(&red)?;
    }
    write!(out, " {:6.2}", d as f32 / 100f32)?;
    let d = match gc.map(|gc| gc.disposal_method()) {
        Some(DisposalMethod::NoAction) => "none",
        Some(DisposalMethod::Keep) => "keep",
        Some(DisposalMethod::Background) => "bg",
        Some(DisposalMethod::Previous) => "prev",
        Some(DisposalMethod::Reserved(_)) => "res",
        None => "-",
    };
    out.set_color(match d {
        "none" | "-" => &dflt,
        "prev" | "res" => &red,
        _ => &bold,
    })?;
    write!(out, " {:>4}", d)?;
    let desc = &frame.image_desc;
    if width == desc.width() && height == desc.height() {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    let size = format!("{}x{}", desc.width(), desc.height());
    write!(out, " {:>w$}", size, w = size_digits)?;
    if desc.left() == 0 && desc.top() == 0 {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    let pos = format!("{},{}", desc.left(), desc.top());
    write!(out, " {:>w$}", pos, w = size_digits)?;
    if let Some(tbl) = &frame.local_color_table {
        out.set_color(&bold)?;
        write!(out, "  {:3}", tbl.len())?;
    } else {
        out.set_color(&dflt)?;
        write!(out, " {:3}g", global_clr)?;
    }
    let tc = match frame.transparent_color() {
        Some(tc) => format!("{}", tc),
        None => "-".to_string(),
    };
    if tc == "-" {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(out, " {:>3}", tc)?;
    let inp = gc.map_or(false, |gc| gc.user_input());
    out.set_color(if inp { &bold } else { &dflt })?;
    writeln!(out, " {:>3}", if inp { "yes" } else { "-" })?;
    Ok(())
}

/// Handle play subcommand
fn play(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    let path = matches.value_of_os("file").ok_or("file required")?;
    let ticks: usize = matches.value_of("ticks").unwrap_or("1000").parse()?;
    let screen = match matches.value_of("screen") {
        Some("bottom") => Screen::Bottom,
        _ => Screen::Top,
    };
    let f = BufReader::new(File::open(path)?);
    let mut anim = Animation::load(f, screen)?;
    let mut screens = Screens::new();
    let mut lzw = Lzw;
    for tick in 0..ticks {
        if anim.tick(&mut screens, &mut lzw) {
            out.set_color(&dflt)?;
            write!(out, "{:>6}", tick)?;
            out.set_color(&bold)?;
            let frame = anim.frame_idx() - 1;
            writeln!(out, "  frame {} loop {}", frame, anim.loop_idx())?;
        }
        if anim.state() != State::Playing {
            break;
        }
    }
    out.set_color(&bold)?;
    writeln!(out, "state: {:?}", anim.state())?;
    Ok(())
}

fn digits<T: Into<usize>>(v: T) -> usize {
    let v = v.into();
    match v {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        1000..=9999 => 4,
        _ => 5,
    }
}
