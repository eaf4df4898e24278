// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod model;
pub mod notifications;
pub mod present;
pub mod runtime;
pub mod session;
pub mod state;
pub mod status;

#[cfg(test)]
mod fake;

pub use error::*;
pub use filter::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use notifications::*;
pub use runtime::*;
pub use session::*;
pub use state::*;
pub use status::*;
