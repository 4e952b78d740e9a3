//! Windowed DRMS demonstrator.
//!
//! ```rust,ignore
//! fn main() -> anyhow::Result<()> {
//!     drms_app::App::new().with_title("DRMS").run()
//! }
//! ```
//!
//! | Key    | Action                                   |
//! |--------|------------------------------------------|
//! | M      | cycle NONE → MSAA4 → DRMS4               |
//! | D      | toggle between NONE and DRMS4            |
//! | R      | cycle FULL → HALF → QUARTER resolution   |
//! | Escape | quit                                     |

pub mod builder;
mod graphics;
pub mod input;
pub mod logging;
mod runner;

pub use builder::{App, AppConfig};
