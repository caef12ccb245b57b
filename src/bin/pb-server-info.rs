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

//! Get basic specs of the servers in a data center.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::warn;

use pbcloud::filter::{format_records, select_where, Field, Value};
use pbcloud::{login, servers, Result, Session};

const PROGRAM: &str = "pb-server-info";

/// Collect basic specs (CPU, RAM, disks, NICs, state) of all servers in a
/// data center and print selected fields to stdout.
#[derive(Parser, Debug)]
#[command(name = "pb-server-info", version)]
struct Args {
    /// The login name.
    #[arg(short, long)]
    user: Option<String>,

    /// The login password.
    #[arg(short, long)]
    password: Option<String>,

    /// The login file to use.
    #[arg(short = 'L', long = "Login", value_name = "FILE")]
    loginfile: Option<PathBuf>,

    /// Data center of the servers.
    #[arg(short, long = "datacenterid", value_name = "ID")]
    datacenterid: String,

    /// ID of the server (reserved).
    #[arg(short, long = "serverid", value_name = "ID")]
    serverid: Option<String>,

    /// Only show servers with this exact name.
    #[arg(short, long)]
    name: Option<String>,

    /// Set verbosity level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<()> {
    if args.serverid.is_some() {
        warn!("--serverid is accepted but not used yet");
    }

    let creds = login::resolve(
        args.loginfile.as_deref(),
        args.user.as_deref(),
        args.password.as_deref(),
    )?;
    let session = Session::new(creds)?;

    let info = servers::server_info(&session, &args.datacenterid)?;
    if args.verbose > 1 {
        println!("Server info: {:?}", info);
    }

    let select = [
        Field::Id,
        Field::Name,
        Field::State,
        Field::VmState,
        Field::Macs,
    ];
    let mut constraints = Vec::new();
    if let Some(ref name) = args.name {
        constraints.push((Field::Name, Value::from(name.as_str())));
    }

    let records = select_where(&info, Some(&select), &constraints);
    println!("{}", format_records(&records));
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
