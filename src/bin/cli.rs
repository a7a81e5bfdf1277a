use anyhow::{anyhow, bail, Context};
use std::env;
use std::time::Duration;

const USAGE: &str = "\
Usage: bcc950-cli [-d DEVICE] [--duration SECS] [--json] <action>

Actions:
  --pan-left | --pan-right        Pan for --duration (default 0.1s)
  --tilt-up | --tilt-down         Tilt for --duration
  --zoom-in | --zoom-out          Step zoom by the configured ZOOM_STEP
  --zoom-value VALUE              Set absolute zoom (100-500)
  --move PAN TILT DURATION        Combined move, PAN/TILT in -1..1
  --save-preset NAME              Save current estimate as a preset
  --recall-preset NAME            Recall a preset (zoom only)
  --delete-preset NAME            Delete a preset
  --list-presets                  List saved presets
  --position                      Show the estimated position
  --reset                         Return to the default position
  --stop                          Zero both speed controls
  --setup                         Detect the camera and store it in the config
  --info                          Show device and PTZ support
  -l, --list-devices              List V4L2 devices
  --get-ctrl NAME                 Read a named control
  --set-ctrl NAME=VALUE           Write a named control
  -h, --help                      Show this help";

#[derive(Debug, Clone, PartialEq)]
enum Action {
    PanLeft,
    PanRight,
    TiltUp,
    TiltDown,
    ZoomIn,
    ZoomOut,
    ZoomValue(i32),
    Move { pan: i32, tilt: i32, duration: Duration },
    SavePreset(String),
    RecallPreset(String),
    DeletePreset(String),
    ListPresets,
    Position,
    Reset,
    Stop,
    Setup,
    Info,
    ListDevices,
    GetCtrl(String),
    SetCtrl(String, i32),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
struct Args {
    device: Option<String>,
    duration: Duration,
    json: bool,
    action: Action,
}

fn main() {
    bcc950::init_logging();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn parse_args(argv: &[String]) -> anyhow::Result<Args> {
    let mut device = None;
    let mut duration = bcc950::constants::DEFAULT_MOVE_DURATION;
    let mut json = false;
    let mut action = None;

    let mut i = 0;
    while i < argv.len() {
        let flag = argv[i].as_str();
        let next = match flag {
            "-d" | "--device" => {
                device = Some(value(argv, &mut i, flag)?.to_string());
                None
            }
            "--duration" => {
                duration = parse_duration(value(argv, &mut i, flag)?)?;
                None
            }
            "--json" => {
                json = true;
                None
            }
            "--pan-left" => Some(Action::PanLeft),
            "--pan-right" => Some(Action::PanRight),
            "--tilt-up" => Some(Action::TiltUp),
            "--tilt-down" => Some(Action::TiltDown),
            "--zoom-in" => Some(Action::ZoomIn),
            "--zoom-out" => Some(Action::ZoomOut),
            "--zoom-value" => Some(Action::ZoomValue(parse_int(value(argv, &mut i, flag)?)?)),
            "--move" => {
                let pan = parse_int(value(argv, &mut i, flag)?)?;
                let tilt = parse_int(value(argv, &mut i, flag)?)?;
                let duration = parse_duration(value(argv, &mut i, flag)?)?;
                Some(Action::Move { pan, tilt, duration })
            }
            "--save-preset" => Some(Action::SavePreset(value(argv, &mut i, flag)?.to_string())),
            "--recall-preset" => Some(Action::RecallPreset(value(argv, &mut i, flag)?.to_string())),
            "--delete-preset" => Some(Action::DeletePreset(value(argv, &mut i, flag)?.to_string())),
            "--list-presets" => Some(Action::ListPresets),
            "--position" => Some(Action::Position),
            "--reset" => Some(Action::Reset),
            "--stop" => Some(Action::Stop),
            "--setup" => Some(Action::Setup),
            "--info" => Some(Action::Info),
            "-l" | "--list" | "--list-devices" => Some(Action::ListDevices),
            "--get-ctrl" => Some(Action::GetCtrl(value(argv, &mut i, flag)?.to_string())),
            "--set-ctrl" => {
                let pair = value(argv, &mut i, flag)?;
                let (name, raw) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow!("--set-ctrl expects NAME=VALUE, got {:?}", pair))?;
                Some(Action::SetCtrl(name.to_string(), parse_int(raw)?))
            }
            "-h" | "--help" => Some(Action::Help),
            other => bail!("Unknown argument: {}", other),
        };

        if let Some(next) = next {
            if action.is_some() {
                bail!("Only one action may be given per invocation");
            }
            action = Some(next);
        }
        i += 1;
    }

    Ok(Args {
        device,
        duration,
        json,
        action: action.unwrap_or(Action::Help),
    })
}

fn value<'a>(argv: &'a [String], i: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *i += 1;
    argv.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_int(raw: &str) -> anyhow::Result<i32> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid integer: {:?}", raw))
}

fn parse_duration(raw: &str) -> anyhow::Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration: {:?}", raw))?;
    Duration::try_from_secs_f64(secs).map_err(|_| anyhow!("Duration must be >= 0, got {}", secs))
}

#[cfg(target_os = "linux")]
fn run(args: &Args) -> anyhow::Result<bool> {
    use bcc950::device::v4l2::utils;
    use bcc950::{Controller, ControllerOptions, V4l2Device};

    let open = || -> anyhow::Result<Controller<V4l2Device>> {
        let mut options = ControllerOptions::default();
        if let Some(device) = &args.device {
            options = options.with_device_path(device);
        }
        Ok(Controller::with_options(V4l2Device::new(), options)?)
    };

    match &args.action {
        Action::Help => println!("{}", USAGE),
        Action::ListDevices => {
            let devices = utils::list_named_devices();
            if args.json {
                let entries: Vec<serde_json::Value> = devices
                    .iter()
                    .map(|(path, name)| serde_json::json!({ "path": path, "name": name }))
                    .collect();
                println!("{}", serde_json::to_string(&entries)?);
            } else if devices.is_empty() {
                println!("No video devices found.");
            } else {
                for (path, name) in devices {
                    println!("{}: {}", path.display(), name);
                }
            }
        }
        Action::Setup => {
            let mut ctrl = open()?;
            let Some(path) = ctrl.find_camera()? else {
                println!("No PTZ camera found.");
                return Ok(false);
            };
            println!("Found camera at: {}", path.display());
            println!("PTZ support: {}", ctrl.has_ptz_support());
        }
        Action::PanLeft => open()?.pan_left(args.duration)?,
        Action::PanRight => open()?.pan_right(args.duration)?,
        Action::TiltUp => open()?.tilt_up(args.duration)?,
        Action::TiltDown => open()?.tilt_down(args.duration)?,
        Action::ZoomIn => open()?.zoom_in()?,
        Action::ZoomOut => open()?.zoom_out()?,
        Action::ZoomValue(value) => {
            let ctrl = open()?;
            ctrl.zoom_to(*value)?;
            println!("Zoom set to {}", ctrl.position().zoom);
        }
        Action::Move {
            pan,
            tilt,
            duration,
        } => {
            open()?.move_pan_tilt(*pan, *tilt, *duration)?;
            println!(
                "Moved pan={} tilt={} for {}s",
                pan,
                tilt,
                duration.as_secs_f64()
            );
        }
        Action::SavePreset(name) => {
            open()?.save_preset(name)?;
            println!("Saved preset: {}", name);
        }
        Action::RecallPreset(name) => {
            if !open()?.recall_preset(name)? {
                println!("Preset not found: {}", name);
                return Ok(false);
            }
            println!("Recalled preset: {}", name);
        }
        Action::DeletePreset(name) => {
            if !open()?.delete_preset(name)? {
                println!("Preset not found: {}", name);
                return Ok(false);
            }
            println!("Deleted preset: {}", name);
        }
        Action::ListPresets => {
            let ctrl = open()?;
            if args.json {
                println!("{}", serde_json::to_string(ctrl.presets().get_all())?);
            } else if ctrl.list_presets().is_empty() {
                println!("No presets saved.");
            } else {
                for name in ctrl.list_presets() {
                    println!("  {}", name);
                }
            }
        }
        Action::Position => {
            let position = open()?.position();
            if args.json {
                println!("{}", serde_json::to_string(&position.snapshot())?);
            } else {
                println!("{}", position);
            }
        }
        Action::Reset => {
            open()?.reset_position()?;
            println!("Camera reset to default position.");
        }
        Action::Stop => open()?.stop()?,
        Action::Info => {
            let ctrl = open()?;
            let ptz = ctrl.has_ptz_support();
            if args.json {
                let info = serde_json::json!({
                    "device": ctrl.device_path(),
                    "ptz_support": ptz,
                    "controls": ctrl.list_controls()?,
                });
                println!("{}", serde_json::to_string(&info)?);
            } else {
                println!("Device: {}", ctrl.device_path().display());
                println!("PTZ support: {}", ptz);
            }
        }
        Action::GetCtrl(name) => {
            let value = open()?.get_named_control(name)?;
            if args.json {
                println!("{}", serde_json::json!({ "name": name, "value": value }));
            } else {
                println!("{}: {}", name, value);
            }
        }
        Action::SetCtrl(name, value) => {
            open()?.set_named_control(name, *value)?;
            println!("{} set to {}", name, value);
        }
    }

    Ok(true)
}

#[cfg(not(target_os = "linux"))]
fn run(args: &Args) -> anyhow::Result<bool> {
    if args.action == Action::Help {
        println!("{}", USAGE);
        return Ok(true);
    }
    bail!("bcc950-cli needs a V4L2 host (Linux)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> anyhow::Result<Args> {
        let argv: Vec<String> = line.split_whitespace().map(String::from).collect();
        parse_args(&argv)
    }

    #[test]
    fn test_no_args_is_help() {
        assert_eq!(parse("").unwrap().action, Action::Help);
    }

    #[test]
    fn test_device_and_duration() {
        let args = parse("-d /dev/video2 --duration 0.5 --pan-left").unwrap();
        assert_eq!(args.device.as_deref(), Some("/dev/video2"));
        assert_eq!(args.duration, Duration::from_millis(500));
        assert_eq!(args.action, Action::PanLeft);
    }

    #[test]
    fn test_default_duration() {
        let args = parse("--tilt-up").unwrap();
        assert_eq!(args.duration, Duration::from_millis(100));
    }

    #[test]
    fn test_move_takes_three_values() {
        let args = parse("--move -1 1 0.25").unwrap();
        assert_eq!(
            args.action,
            Action::Move {
                pan: -1,
                tilt: 1,
                duration: Duration::from_millis(250)
            }
        );
        assert!(parse("--move 1 0").is_err());
    }

    #[test]
    fn test_set_ctrl_pair() {
        let args = parse("--set-ctrl brightness=128 --json").unwrap();
        assert_eq!(args.action, Action::SetCtrl("brightness".to_string(), 128));
        assert!(args.json);
        assert!(parse("--set-ctrl brightness").is_err());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse("--warp").is_err());
        assert!(parse("--duration -1 --pan-left").is_err());
        assert!(parse("--zoom-value big").is_err());
        assert!(parse("--pan-left --pan-right").is_err());
    }
}
