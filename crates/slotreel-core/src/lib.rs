pub mod animation;
pub mod config;
pub mod error;
pub mod game;
pub mod reel;
pub mod surface;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use game::{Paytable, SlotMachine};
pub use reel::{Reel, ReelSettings, ReelStyle, Symbol};
pub use surface::{DrawingSurface, RecordingSurface};
