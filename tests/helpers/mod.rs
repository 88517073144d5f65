// Shared test helpers
//
// Included by each test target with `mod helpers;` via a path attribute:
//
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

pub mod rate_sandbox;

#[allow(unused_imports)]
pub use rate_sandbox::*;
pub use test_data::*;
