//! Prints the Argon2 hash to put in `ADMIN_TOKEN_HASH`.
//!
//! Usage: `hash-admin-token <token>`, or pipe the token on stdin.

use std::io::{self, BufRead};

use bookwell_api::middleware::auth::hash_password;
use color_eyre::eyre::{Result, eyre};

fn main() -> Result<()> {
    color_eyre::install()?;

    let token = match std::env::args().nth(1) {
        Some(token) => token,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if token.trim().is_empty() {
        return Err(eyre!("usage: hash-admin-token <token>"));
    }

    println!("{}", hash_password(&token)?);
    Ok(())
}
