use std::env;
use std::fmt;

use derivative::Derivative;
use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::draw::{Color, Effect};
use crate::error::{AwtrixError, Result};
use crate::util::json_exchange::Reply;
use crate::util::transport::Transport;

/// Environment variable holding the base API URL, e.g. `http://192.168.1.50/api`.
pub const API_ENV_VAR: &str = "AWTRIX_API";

pub const DEFAULT_BRIGHTNESS: u8 = 75;
pub const DEFAULT_YEELIGHT_DURATION: u32 = 10;

const BASICS_PATH: &str = "/basics";
const SETTINGS_PATH: &str = "/settings";
const NOTIFY_PATH: &str = "/notify";
const DRAW_PATH: &str = "/draw";

/// Client for one Awtrix device.
///
/// Every operation is a single JSON POST against the base API URL. Reads go
/// through `/basics` as `{"get": <key>}` bodies rather than HTTP GET, which is
/// what the firmware expects.
#[derive(Debug, Clone)]
pub struct ControlInterface {
    api: String,
    transport: Transport,
}

/// Two interfaces are equal when they talk to the same API URL; the
/// transport is a utility, not part of the device's identity.
impl PartialEq for ControlInterface {
    fn eq(&self, other: &ControlInterface) -> bool {
        self.api == other.api
    }
}

/// Keys understood by the device's generic getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKey {
    Settings,
    InstalledApps,
    Version,
    Uptime,
    PowerState,
    Log,
    MatrixInfo,
}

impl InfoKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoKey::Settings => "settings",
            InfoKey::InstalledApps => "installedApps",
            InfoKey::Version => "version",
            InfoKey::Uptime => "uptime",
            InfoKey::PowerState => "powerState",
            InfoKey::Log => "log",
            InfoKey::MatrixInfo => "matrixInfo",
        }
    }
}

impl fmt::Display for InfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for InfoKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A body with exactly one key, e.g. `{"Brightness": 50}` or `{"power": true}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyValue<'a, V> {
    pub key: &'a str,
    pub value: V,
}

/// A single setting update sent to `/settings`.
pub type SettingsPatch<'a, V> = KeyValue<'a, V>;

impl<'a, V> KeyValue<'a, V> {
    pub fn new(key: &'a str, value: V) -> Self {
        KeyValue { key, value }
    }
}

impl<V: Serialize> Serialize for KeyValue<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// Options for [`ControlInterface::notify`].
#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationOptions {
    #[derivative(Default(value = "\"TestNotification\".to_string()"))]
    pub name: String,
    #[derivative(Default(value = "6"))]
    pub icon: u32,
    #[derivative(Default(value = "Color::new(0, 255, 0)"))]
    pub color: Color,
    pub force: bool,
    #[derivative(Default(value = "1"))]
    pub repeat: u32,
    #[derivative(Default(value = "true"))]
    pub move_icon: bool,
    #[derivative(Default(value = "1"))]
    pub soundfile: u32,
}

/// Body of a `/notify` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub icon: u32,
    pub color: Color,
    pub force: bool,
    pub repeat: u32,
    pub move_icon: bool,
    pub soundfile: u32,
}

impl<'a> NotificationRequest<'a> {
    pub fn new(text: &'a str, options: &'a NotificationOptions) -> Self {
        NotificationRequest {
            name: &options.name,
            text,
            icon: options.icon,
            color: options.color,
            force: options.force,
            repeat: options.repeat,
            move_icon: options.move_icon,
            soundfile: options.soundfile,
        }
    }
}

/// Options for [`ControlInterface::draw`].
#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// How many times the device plays the sequence.
    #[derivative(Default(value = "1"))]
    pub repeat: u32,
}

#[derive(Debug, Serialize)]
struct DrawRequest<'a> {
    draw: &'a [Effect],
    repeat: u32,
}

/// Options for [`ControlInterface::timer`]. Unset fields are left out of the
/// request so the firmware falls back to its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soundfile: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
struct TimerRequest<'a, T> {
    timer: T,
    #[serde(flatten)]
    options: &'a TimerOptions,
}

#[derive(Debug, Serialize)]
struct StopwatchRequest<'a> {
    stopwatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
}

impl ControlInterface {
    pub fn new(api: &str) -> Self {
        Self::with_transport(api, Transport::new())
    }

    pub fn with_transport(api: &str, transport: Transport) -> Self {
        ControlInterface {
            api: api.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Reads the base API URL from [`API_ENV_VAR`].
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(env::var(API_ENV_VAR).ok())
    }

    fn from_env_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(api) if !api.trim().is_empty() => Ok(Self::new(api.trim())),
            _ => Err(AwtrixError::MissingConfig(format!(
                "{} is not set",
                API_ENV_VAR
            ))),
        }
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    /// POSTs `body` as JSON to `<api><path>`.
    pub async fn call<T>(&self, path: &str, body: &T) -> Result<Reply>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.api, path);
        let reply = self.transport.post_json(&url, body).await?;
        debug!("{} replied: {:?}", path, reply);
        Ok(reply)
    }

    pub async fn call_basics<T>(&self, payload: &T) -> Result<Reply>
    where
        T: Serialize + ?Sized,
    {
        self.call(BASICS_PATH, payload).await
    }

    /// Generic getter. Any key is forwarded as-is; see [`InfoKey`] for the
    /// ones the firmware is known to answer.
    pub async fn get(&self, key: impl AsRef<str>) -> Result<Reply> {
        self.call_basics(&KeyValue::new("get", key.as_ref())).await
    }

    pub async fn get_settings(&self) -> Result<Reply> {
        self.get(InfoKey::Settings).await
    }

    pub async fn get_installed_apps(&self) -> Result<Reply> {
        self.get(InfoKey::InstalledApps).await
    }

    pub async fn get_version(&self) -> Result<Reply> {
        self.get(InfoKey::Version).await
    }

    pub async fn get_uptime(&self) -> Result<Reply> {
        self.get(InfoKey::Uptime).await
    }

    pub async fn get_power_state(&self) -> Result<Reply> {
        self.get(InfoKey::PowerState).await
    }

    pub async fn get_log(&self) -> Result<Reply> {
        self.get(InfoKey::Log).await
    }

    pub async fn get_matrix_info(&self) -> Result<Reply> {
        self.get(InfoKey::MatrixInfo).await
    }

    /// Updates a single device setting. Setting names are not checked.
    pub async fn set<V: Serialize>(&self, key: &str, value: V) -> Result<Reply> {
        self.call(SETTINGS_PATH, &SettingsPatch::new(key, value))
            .await
    }

    pub async fn brightness(&self, value: u8) -> Result<Reply> {
        self.set("Brightness", value).await
    }

    pub async fn power(&self, state: bool) -> Result<Reply> {
        self.call_basics(&KeyValue::new("power", state)).await
    }

    pub async fn power_on(&self) -> Result<Reply> {
        self.power(true).await
    }

    pub async fn power_off(&self) -> Result<Reply> {
        self.power(false).await
    }

    pub async fn switch_to(&self, app: &str) -> Result<Reply> {
        self.call_basics(&KeyValue::new("switchTo", app)).await
    }

    pub async fn enable(&self, app: &str) -> Result<Reply> {
        self.call_basics(&KeyValue::new("enable", app)).await
    }

    pub async fn disable(&self, app: &str) -> Result<Reply> {
        self.call_basics(&KeyValue::new("disable", app)).await
    }

    pub async fn next(&self, app: &str) -> Result<Reply> {
        self.call_basics(&KeyValue::new("next", app)).await
    }

    pub async fn show_animation<A: Serialize>(&self, animation: A) -> Result<Reply> {
        self.call_basics(&KeyValue::new("showAnimation", animation))
            .await
    }

    pub async fn soundfile(&self, id: u32) -> Result<Reply> {
        self.call_basics(&KeyValue::new("soundfile", id)).await
    }

    pub async fn timer<T: Serialize>(&self, timer: T, options: &TimerOptions) -> Result<Reply> {
        self.call_basics(&TimerRequest { timer, options }).await
    }

    /// Starts the stopwatch when `icon` is a non-empty name, stops it otherwise.
    pub async fn stopwatch(&self, icon: Option<&str>) -> Result<Reply> {
        let request = StopwatchRequest {
            stopwatch: icon.is_some_and(|icon| !icon.is_empty()),
            icon,
        };
        self.call_basics(&request).await
    }

    pub async fn stopwatch_stop(&self) -> Result<Reply> {
        self.stopwatch(None).await
    }

    pub async fn yeelight(&self, effect: &str, duration: u32) -> Result<Reply> {
        self.call_basics(&KeyValue::new("yeelight", (effect, duration)))
            .await
    }

    pub async fn notify(&self, text: &str, options: &NotificationOptions) -> Result<Reply> {
        self.call(NOTIFY_PATH, &NotificationRequest::new(text, options))
            .await
    }

    /// Sends a draw sequence. The device plays `effects` in the given order.
    pub async fn draw(&self, effects: &[Effect], options: &DrawOptions) -> Result<Reply> {
        let request = DrawRequest {
            draw: effects,
            repeat: options.repeat,
        };
        self.call(DRAW_PATH, &request).await
    }
}
