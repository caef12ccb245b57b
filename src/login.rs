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

//! Login file handling.
//!
//! A login file stores one credential pair so that other tools can reuse it
//! without putting the password on the command line. The whole file content
//! is the base64 encoding (standard alphabet, with padding) of the UTF-8
//! bytes of `"<user>:<password>"`. The encoding is reversible by design and
//! offers no confidentiality; protect the file with OS permissions.
//!
//! Decoding splits on the first `:` only, so a user name containing a colon
//! does not round-trip. This matches the file format consumed by the other
//! tools and is a documented limitation.

use std::fmt;
use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::{debug, info};

use super::{Error, ErrorKind, Result};

/// A resolved credential pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The login name.
    pub user: String,
    /// The login password.
    pub password: String,
}

impl Credentials {
    /// Create credentials from a user name and a password.
    pub fn new<U: Into<String>, P: Into<String>>(user: U, password: P) -> Credentials {
        Credentials {
            user: user.into(),
            password: password.into(),
        }
    }
}

// The password must not end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Encode credentials into the login file representation.
pub fn encode(creds: &Credentials) -> String {
    BASE64.encode(format!("{}:{}", creds.user, creds.password))
}

/// Decode the login file representation back into credentials.
///
/// Surrounding whitespace (e.g. a trailing newline added by an editor) is
/// ignored.
pub fn decode(content: &str) -> Result<Credentials> {
    let raw = BASE64.decode(content.trim()).map_err(|e| {
        Error::new(
            ErrorKind::InvalidLoginFile,
            format!("content is not valid base64: {}", e),
        )
    })?;
    let text = String::from_utf8(raw).map_err(|e| {
        Error::new(
            ErrorKind::InvalidLoginFile,
            format!("decoded content is not valid UTF-8: {}", e),
        )
    })?;
    match text.split_once(':') {
        Some((user, password)) => Ok(Credentials::new(user, password)),
        None => Err(Error::new(
            ErrorKind::InvalidLoginFile,
            "missing ':' separator between user and password",
        )),
    }
}

/// Resolve credentials from arguments and/or a login file.
///
/// Without a file path, both `user` and `password` are required and returned
/// unchanged. With a path to an existing file, the file content wins and the
/// arguments are ignored. With a path to a missing file, both arguments are
/// required and are written to the file for later runs.
///
/// Writing the file is the only persisted state change any of the tools
/// perform.
pub fn resolve(
    path: Option<&Path>,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials> {
    let path = match path {
        Some(path) => path,
        None => return from_args(user, password),
    };

    if path.exists() {
        info!("Using login file {} for credentials", path.display());
        let content = fs::read_to_string(path)?;
        decode(&content)
    } else {
        let creds = from_args(user, password)?;
        info!("Writing login file {}", path.display());
        fs::write(path, encode(&creds))?;
        Ok(creds)
    }
}

fn from_args(user: Option<&str>, password: Option<&str>) -> Result<Credentials> {
    match (user, password) {
        (Some(user), Some(password)) => {
            debug!("Using credentials for user {} from arguments", user);
            Ok(Credentials::new(user, password))
        }
        _ => Err(Error::new(
            ErrorKind::InvalidInput,
            "user and password must not be None",
        )),
    }
}
