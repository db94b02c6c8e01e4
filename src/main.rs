use std::path::PathBuf;
use std::process;

use attitude::viewer::{load_font, show};
use attitude::{AttitudeGauge, Color, GaugeConfig, WindowConfig};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;
use log::{error, info};

fn cli() -> Command {
    let number = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
    };
    let color = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .value_parser(|s: &str| Color::from_hex(s).ok_or_else(|| format!("not a hex color: {s}")))
    };

    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Attitude/heading indicator")
        .arg(number("yaw", "Yaw angle in degrees").default_value("0"))
        .arg(number("pitch", "Pitch angle in degrees").default_value("0"))
        .arg(number("min-angle", "Lower yaw bound in degrees"))
        .arg(number("max-angle", "Upper yaw bound in degrees"))
        .arg(number("min-pitch", "Lower pitch bound in degrees"))
        .arg(number("max-pitch", "Upper pitch bound in degrees"))
        .arg(number("line-spacing", "Pixels between pitch ladder rungs"))
        .arg(
            Arg::new("pitch-lines")
                .long("pitch-lines")
                .help("Ladder rungs each side of center")
                .value_parser(value_parser!(u32)),
        )
        .arg(color("sky-color", "Fill above the horizon, e.g. #87CEEB"))
        .arg(color("ground-color", "Fill below the horizon, e.g. #8B4513"))
        .arg(color("scale-color", "Ticks, labels and outline, e.g. #fff"))
        .arg(
            Arg::new("width")
                .long("width")
                .help("Window width in logical pixels")
                .value_parser(value_parser!(u32))
                .default_value("300"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Window height in logical pixels")
                .value_parser(value_parser!(u32))
                .default_value("300"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Window title")
                .default_value("Attitude"),
        )
        .arg(
            Arg::new("font")
                .long("font")
                .help("TTF/OTF font used for labels")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn gauge_config(matches: &ArgMatches) -> GaugeConfig {
    let defaults = GaugeConfig::default();
    let number = |name: &str, default: f64| matches.get_one::<f64>(name).copied().unwrap_or(default);
    let color = |name: &str, default: Color| matches.get_one::<Color>(name).copied().unwrap_or(default);

    GaugeConfig::builder()
        .min_angle(number("min-angle", defaults.min_angle))
        .max_angle(number("max-angle", defaults.max_angle))
        .min_pitch(number("min-pitch", defaults.min_pitch))
        .max_pitch(number("max-pitch", defaults.max_pitch))
        .sky_color(color("sky-color", defaults.sky_color))
        .ground_color(color("ground-color", defaults.ground_color))
        .scale_color(color("scale-color", defaults.scale_color))
        .pitch_lines(
            matches
                .get_one::<u32>("pitch-lines")
                .copied()
                .unwrap_or(defaults.pitch_lines),
        )
        .line_spacing(number("line-spacing", defaults.line_spacing))
        .build()
}

fn main() {
    let matches = cli().get_matches();

    let debug_enabled = matches.get_flag("debug");
    env_logger::Builder::from_env(Env::default().default_filter_or(if debug_enabled {
        "debug"
    } else {
        "info"
    }))
    .format_timestamp_secs()
    .init();

    info!("{} v.{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut gauge = match AttitudeGauge::new(gauge_config(&matches)) {
        Ok(gauge) => gauge,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };
    gauge.set_yaw(matches.get_one::<f64>("yaw").copied().unwrap_or_default());
    gauge.set_pitch(matches.get_one::<f64>("pitch").copied().unwrap_or_default());
    info!("yaw {:.1} pitch {:.1}", gauge.yaw(), gauge.pitch());

    let window_config = WindowConfig {
        width: matches.get_one::<u32>("width").copied().unwrap_or(300),
        height: matches.get_one::<u32>("height").copied().unwrap_or(300),
        title: matches
            .get_one::<String>("title")
            .cloned()
            .unwrap_or_else(|| WindowConfig::default().title),
    };
    let font = load_font(matches.get_one::<PathBuf>("font").map(PathBuf::as_path));

    if let Err(err) = show(&gauge, &window_config, font.as_ref()) {
        error!("{}", err);
        process::exit(1);
    }
}
