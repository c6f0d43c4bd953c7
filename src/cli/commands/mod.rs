//! One module per subcommand. Each exposes an `execute` entry point called
//! from `main`.

pub mod cloud;
pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod status;

mod transform;
