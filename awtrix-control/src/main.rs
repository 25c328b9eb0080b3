use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use awtrix_control_lib::control_interface::{
    ControlInterface, DrawOptions, NotificationOptions, TimerOptions, API_ENV_VAR,
    DEFAULT_BRIGHTNESS, DEFAULT_YEELIGHT_DURATION,
};
use awtrix_control_lib::draw::{Color, Effect};
use awtrix_control_lib::util::observer::StdoutObserver;
use awtrix_control_lib::util::transport::Transport;
use awtrix_control_lib::Reply;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    handle_cli(cli).await
}

/// This struct defines the command line interface of the application
#[derive(Parser)]
#[clap(
    name = "awtrix",
    about = "Controls an Awtrix LED matrix display",
    version
)]
pub struct Cli {
    /// Base API URL of the device, e.g. http://192.168.1.50/api
    #[clap(long, env = API_ENV_VAR)]
    pub api: String,

    /// Output format (plaintext, json, yaml)
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Plaintext)]
    pub output: OutputFormat,

    /// Print every request URL and body before it is sent
    #[clap(long)]
    pub trace: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Supported output formats for device replies.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// Plain text format.
    Plaintext,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}

/// Subcommands available for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Prints the device settings.
    #[clap(name = "get_settings", alias = "get-settings")]
    GetSettings,
    /// Reads any value the device exposes (settings, installedApps, version, uptime, powerState, log, matrixInfo).
    #[clap(name = "get")]
    Get { key: String },
    /// Prints the firmware version.
    #[clap(name = "version", alias = "get_version")]
    Version,
    /// Prints the device uptime.
    #[clap(name = "uptime")]
    Uptime,
    /// Updates a single setting. The value is read as JSON when possible, as a string otherwise.
    #[clap(name = "set")]
    Set { key: String, value: String },
    /// Sets the display brightness.
    #[clap(name = "brightness")]
    Brightness {
        #[clap(default_value_t = DEFAULT_BRIGHTNESS)]
        value: u8,
    },
    /// Turns the matrix on or off.
    #[clap(name = "power")]
    Power {
        #[clap(value_enum)]
        state: PowerState,
    },
    /// Switches to an app.
    #[clap(name = "switch-to")]
    SwitchTo { app: String },
    /// Enables an app.
    #[clap(name = "enable")]
    Enable { app: String },
    /// Disables an app.
    #[clap(name = "disable")]
    Disable { app: String },
    /// Moves on to the next app.
    #[clap(name = "next")]
    Next { app: String },
    /// Plays an animation.
    #[clap(name = "show-animation")]
    ShowAnimation { animation: String },
    /// Plays a sound file.
    #[clap(name = "sound")]
    Sound { id: u32 },
    /// Shows a notification.
    #[clap(name = "notify")]
    Notify {
        text: String,

        /// Notification name
        #[clap(long)]
        name: Option<String>,

        /// Icon id
        #[clap(long)]
        icon: Option<u32>,

        /// Text color, either r,g,b or a color name
        #[clap(long)]
        color: Option<Color>,

        /// Interrupt whatever is currently shown
        #[clap(long)]
        force: bool,

        /// How often the notification scrolls by
        #[clap(long)]
        repeat: Option<u32>,

        /// Whether the icon moves with the text
        #[clap(long)]
        move_icon: Option<bool>,

        /// Sound file id
        #[clap(long)]
        soundfile: Option<u32>,
    },
    /// Sends a draw sequence given as a JSON array of effects.
    #[clap(name = "draw")]
    Draw {
        /// e.g. '[{"type":"fill","color":[50,50,50]},{"type":"show"}]'
        effects: String,

        /// How many times the device plays the sequence
        #[clap(long, default_value_t = 1)]
        repeat: u32,
    },
    /// Starts a timer.
    #[clap(name = "timer")]
    Timer {
        timer: String,

        #[clap(long)]
        soundfile: Option<u32>,

        /// Timer color, either r,g,b or a color name
        #[clap(long)]
        color: Option<Color>,

        #[clap(long)]
        count: Option<u32>,

        #[clap(long)]
        text: Option<String>,
    },
    /// Starts the stopwatch with the given icon, or stops it when no icon is given.
    #[clap(name = "stopwatch")]
    Stopwatch { icon: Option<String> },
    /// Stops the stopwatch.
    #[clap(name = "stopwatch-stop")]
    StopwatchStop,
    /// Runs a Yeelight effect.
    #[clap(name = "yeelight")]
    Yeelight {
        effect: String,

        /// Effect duration
        #[clap(long, default_value_t = DEFAULT_YEELIGHT_DURATION)]
        duration: u32,
    },
}

async fn handle_cli(cli: Cli) -> Result<()> {
    let mut transport = Transport::new();
    if cli.trace {
        transport = transport.with_observer(Arc::new(StdoutObserver));
    }
    let awtrix = ControlInterface::with_transport(&cli.api, transport);

    let reply = match cli.command {
        Commands::GetSettings => awtrix.get_settings().await,
        Commands::Get { key } => awtrix.get(&key).await,
        Commands::Version => awtrix.get_version().await,
        Commands::Uptime => awtrix.get_uptime().await,
        Commands::Set { key, value } => awtrix.set(&key, parse_setting_value(&value)).await,
        Commands::Brightness { value } => awtrix.brightness(value).await,
        Commands::Power { state } => awtrix.power(state == PowerState::On).await,
        Commands::SwitchTo { app } => awtrix.switch_to(&app).await,
        Commands::Enable { app } => awtrix.enable(&app).await,
        Commands::Disable { app } => awtrix.disable(&app).await,
        Commands::Next { app } => awtrix.next(&app).await,
        Commands::ShowAnimation { animation } => awtrix.show_animation(&animation).await,
        Commands::Sound { id } => awtrix.soundfile(id).await,
        Commands::Notify {
            text,
            name,
            icon,
            color,
            force,
            repeat,
            move_icon,
            soundfile,
        } => {
            let defaults = NotificationOptions::default();
            let options = NotificationOptions {
                name: name.unwrap_or(defaults.name),
                icon: icon.unwrap_or(defaults.icon),
                color: color.unwrap_or(defaults.color),
                force,
                repeat: repeat.unwrap_or(defaults.repeat),
                move_icon: move_icon.unwrap_or(defaults.move_icon),
                soundfile: soundfile.unwrap_or(defaults.soundfile),
            };
            awtrix.notify(&text, &options).await
        }
        Commands::Draw { effects, repeat } => {
            let effects: Vec<Effect> =
                serde_json::from_str(&effects).context("Failed to parse draw effects")?;
            awtrix.draw(&effects, &DrawOptions { repeat }).await
        }
        Commands::Timer {
            timer,
            soundfile,
            color,
            count,
            text,
        } => {
            let options = TimerOptions {
                soundfile,
                color,
                count,
                text,
            };
            awtrix.timer(&timer, &options).await
        }
        Commands::Stopwatch { icon } => awtrix.stopwatch(icon.as_deref()).await,
        Commands::StopwatchStop => awtrix.stopwatch_stop().await,
        Commands::Yeelight { effect, duration } => awtrix.yeelight(&effect, duration).await,
    }
    .with_context(|| format!("Request to {} failed", awtrix.api()))?;

    print_reply(&reply, cli.output)
}

/// Reads `value` as JSON so numbers and booleans keep their type; anything
/// that isn't valid JSON is sent as a plain string.
fn parse_setting_value(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn print_reply(reply: &Reply, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Plaintext => match reply {
            None => println!("(empty response)"),
            Some(Value::String(text)) => println!("{}", text),
            Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
        },
        OutputFormat::Json => {
            let json = serde_json::to_string(reply)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(reply)?;
            println!("{}", yaml);
        }
    }
    Ok(())
}
