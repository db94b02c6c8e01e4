//! Aircraft-style attitude/heading indicator.
//!
//! [`AttitudeGauge`] holds a yaw/pitch pair and repaints the whole instrument
//! onto any [`Surface`]: a rotating sky/ground disc, a fixed heading ring, a
//! pitch ladder and the aircraft marker. [`PixelCanvas`] rasterizes into an
//! RGBA frame, [`Scene`] records the calls, and [`viewer::show`] puts the gauge
//! in a window.
//!
//! ```
//! use attitude::{AttitudeGauge, GaugeConfig, Scene};
//!
//! let mut gauge = AttitudeGauge::new(GaugeConfig::builder().pitch_lines(4).build())?;
//! gauge.set_yaw(45.0);
//! gauge.set_pitch(30.0);
//!
//! let mut scene = Scene::new(200.0, 200.0);
//! gauge.draw(&mut scene)?;
//! assert!(scene.texts().any(|(label, _, _)| label == "N"));
//! # Ok::<(), attitude::GaugeError>(())
//! ```

pub mod config;
pub mod error;
pub mod gauge;
pub mod raster;
pub mod scene;
pub mod surface;
pub mod viewer;

pub use config::{Color, GaugeConfig, WindowConfig};
pub use error::{GaugeError, SurfaceError, ViewerError};
pub use gauge::{normalize_yaw, pitch_offset, AttitudeGauge, Dial, GaugeState};
pub use raster::PixelCanvas;
pub use scene::{DrawCommand, Scene};
pub use surface::{ColorStop, FontSpec, LinearGradient, Paint, Surface, SurfaceResult, TextAlign};
