//! simpleform validation core
//!
//! Pure field checks shared by the form controller and the CLI.
//! None of these functions allocate on the happy path.

pub mod email;
pub mod numeric;
pub mod presence;

// Re-export all checks
pub use email::*;
pub use numeric::*;
pub use presence::*;
