// Copyright 2024 pbcloud contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client library behind the ProfitBricks command-line tools.
//!
//! Provides a thin synchronous [`Session`] around the Cloud API, login file
//! handling, flattening of server resources into
//! [`ServerInfo`](servers::ServerInfo) summaries and a small
//! projection/filtering layer over them.
//!
//! # Example
//!
//! ```rust,no_run
//! fn server_names() -> pbcloud::Result<Vec<String>> {
//!     let creds = pbcloud::login::resolve(None, Some("user1"), Some("pa$$word"))?;
//!     let session = pbcloud::Session::new(creds)?;
//!     let info = pbcloud::servers::server_info(&session, "some-dc-id")?;
//!     Ok(info.into_iter().map(|s| s.name).collect())
//! }
//! ```

// NOTE: we do not use generic deny(warnings) to avoid breakages with new
// versions of the compiler. Add more warnings here as you discover them.
#![deny(
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod error;
pub mod filter;
pub mod login;
pub mod protocol;
pub mod servers;
mod session;

pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
pub use login::Credentials;
pub use session::Session;
