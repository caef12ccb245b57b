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

//! Save login data to a file for reuse by the other tools.
//!
//! The file keeps the credentials in a reversible encoding, not encrypted.
//! MAKE SURE THAT THE FILE IS PROTECTED BY OS PERMISSIONS!

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::warn;

use pbcloud::{login, Result, Session};

const PROGRAM: &str = "pb-save-login";

/// Save login data to a file and verify it against the Cloud API.
#[derive(Parser, Debug)]
#[command(name = "pb-save-login", version)]
struct Args {
    /// The login name.
    #[arg(short, long)]
    user: String,

    /// The login password.
    #[arg(short, long)]
    password: String,

    /// The login file to use.
    #[arg(short = 'L', long = "Login", value_name = "FILE")]
    loginfile: PathBuf,

    /// Set verbosity level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<()> {
    let creds = login::resolve(
        Some(&args.loginfile),
        Some(&args.user),
        Some(&args.password),
    )?;

    println!("testing access..");
    let session = Session::new(creds)?;
    // Cheapest authenticated call; the result itself is of no interest.
    let _ = session.list_locations()?;
    Ok(())
}

fn main() {
    env_logger::init();
    // An interrupt is a clean exit, unlike every other abort.
    if let Err(err) = ctrlc::set_handler(|| process::exit(0)) {
        warn!("Cannot install interrupt handler: {}", err);
    }

    let args = Args::parse();
    if args.verbose > 0 {
        println!("Verbose mode on");
    }

    if let Err(err) = run(&args) {
        eprintln!("{}", err);
        eprintln!("\n{}:  for help use --help", PROGRAM);
        process::exit(2);
    }
}
