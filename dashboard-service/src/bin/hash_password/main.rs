use auth::PasswordHasher;
use clap::Parser;

/// Print the hash of a password for the `[users]` table of the configuration.
#[derive(Parser, Debug)]
#[command(name = "hash-password")]
#[command(version)]
struct Args {
    /// Plaintext password to hash
    password: String,

    /// Produce a salted Argon2 PHC string instead of a SHA-256 hex digest
    #[arg(long)]
    argon2: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let hasher = PasswordHasher::new();

    let hash = if args.argon2 {
        hasher.hash(&args.password)?
    } else {
        hasher.digest(&args.password)
    };

    println!("{}", hash);

    Ok(())
}
