// SPDX-License-Identifier: GPL-3.0-or-later
mod cli;

fn main() {
    if let Err(err) = cli::run_from_args() {
        eprintln!("tubetag error: {:#}", err);
        std::process::exit(1);
    }
}
