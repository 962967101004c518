//! # Voxel Sandbox Application Entry Point
//!
//! This is the main entry point for the sandbox. It simply calls into the
//! library's `run()` function to initialize and start the game.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! ```

fn main() -> anyhow::Result<()> {
    voxel_sandbox::run()
}
