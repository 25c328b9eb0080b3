//! # Awtrix Control Library
//!
//! `awtrix-control-lib` is a Rust library for controlling Awtrix LED matrix displays
//! over their local HTTP/JSON API. It covers device settings, power, app navigation,
//! notifications, timers and the pixel-level drawing endpoint.
//!
//! Each operation composes a JSON body and POSTs it to one of the device's fixed
//! endpoints (`/basics`, `/settings`, `/notify`, `/draw`). A reply is either empty
//! or JSON; any status other than 200 is an error.
//!
//! ## Example
//!
//! ```no_run
//! use awtrix_control_lib::control_interface::{ControlInterface, DrawOptions, NotificationOptions};
//! use awtrix_control_lib::draw::{Effect, Fill, Text};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let awtrix = ControlInterface::new("http://192.168.1.50/api");
//!
//!     let version = awtrix.get_version().await?;
//!     println!("Firmware: {:?}", version);
//!
//!     awtrix.notify("Hello World", &NotificationOptions::default()).await?;
//!
//!     let effects = vec![
//!         Fill::new(50, 50, 50).into(),
//!         Text::new("Hi").with_color((255, 0, 0)).with_position((4, 1)).into(),
//!         Effect::Show,
//!         Effect::wait(1000),
//!         Effect::Exit,
//!     ];
//!     awtrix.draw(&effects, &DrawOptions::default()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Disclaimer
//!
//! This project is not affiliated with, authorized by, endorsed by, or in any way officially connected
//! with the Awtrix project or its authors.
//!
//! ## License
//!
//! This project is dual-licensed under the MIT License and the Apache License, Version 2.0.
//! You may choose to use either license, depending on your project needs.

// The `control_interface` module holds the device client. One async method per
// API operation, plus the option structs for notifications, timers and drawing.
//
// Example usage:
//
// ```
// use awtrix_control_lib::control_interface::ControlInterface;
//
// #[tokio::main]
// async fn main() {
//     let control = ControlInterface::from_env().unwrap();
//     control.brightness(50).await.unwrap();
// }
// ```
pub mod control_interface;

// The `draw` module contains the drawing primitives for the `/draw` endpoint:
// colors, positions and the `Effect` steps of a draw sequence.
pub mod draw;

pub mod error;

// The `util` module provides the HTTP plumbing underneath the client: the
// transport, the request observer hook and the JSON exchange.
pub mod util;

pub use control_interface::ControlInterface;
pub use error::{AwtrixError, Result};
pub use util::json_exchange::Reply;
