//! CLI module
//!
//! Command-line interface for sharefile.

mod args;

pub use args::{Args, Commands};

use anyhow::{Context, Result};
use clap::CommandFactory;
use sharefile::Config;
use sharefile::core::file::SharedFile;
use sharefile::core::server::{self, AppState};
use sharefile::util::download;
use sharefile::util::hash::{parse_checksum_line, verify_sha256};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exit status for usage and startup failures
pub const EXIT_STARTUP: u8 = 2;

/// Exit status when a checksum does not match
pub const EXIT_MISMATCH: u8 = 1;

/// Run whatever the arguments ask for and return the process exit status
pub async fn run(args: Args, config: &Config) -> u8 {
    let port = resolve_port(&args, config);

    let result = if let Some(command) = args.command {
        handle_command(command).await
    } else if let Some(path) = &args.file {
        share(path, port).await.map(|_| true)
    } else {
        let _ = Args::command().print_help();
        return EXIT_STARTUP;
    };

    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_MISMATCH,
        Err(e) => {
            tracing::error!("{:#}", e);
            EXIT_STARTUP
        }
    }
}

/// `-p` wins over `server.port` from the config file
pub fn resolve_port(args: &Args, config: &Config) -> u16 {
    args.port.unwrap_or(config.server.port)
}

/// Hash the file, then serve it until interrupted
pub async fn share(path: &Path, port: u16) -> Result<()> {
    print!("hashing file...");
    std::io::stdout().flush()?;

    let file = match inspect(path).await {
        Ok(file) => file,
        Err(e) => {
            println!("failed");
            return Err(e);
        }
    };
    println!("done");
    println!("   {} ({})", file.name, file.human_size().trim());
    println!("   sha256 {}", file.hash);

    let listener = server::bind(port).await?;
    let port = listener.local_addr()?.port();
    println!("serving @ http://127.0.0.1:{}/", port);
    tracing::info!("Sharing {:?} on port {}", file.path, port);

    server::serve(listener, AppState::new(file)).await
}

/// Handle subcommands. `Ok(false)` means a checksum did not match.
pub async fn handle_command(command: Commands) -> Result<bool> {
    match command {
        Commands::Hash { path } => hash(&path).await,
        Commands::Verify { path, expected } => verify(&path, &expected).await,
        Commands::Fetch {
            url,
            output,
            force,
        } => fetch(&url, &output, force).await,
    }
}

/// Stat and hash off the async runtime
async fn inspect(path: &Path) -> Result<SharedFile> {
    let owned = path.to_path_buf();
    let file = tokio::task::spawn_blocking(move || SharedFile::inspect(owned))
        .await
        .context("Hashing task failed")??;
    Ok(file)
}

/// Print a sha256sum-style line for a file
async fn hash(path: &Path) -> Result<bool> {
    let file = inspect(path).await?;
    print!("{}", file.checksum_line());
    Ok(true)
}

/// Compare a local file against an expected digest
async fn verify(path: &Path, expected: &str) -> Result<bool> {
    let owned = path.to_path_buf();
    let wanted = expected.to_string();
    let ok = tokio::task::spawn_blocking(move || verify_sha256(&owned, &wanted))
        .await
        .context("Hashing task failed")??;

    if ok {
        println!("✅ {}: OK", path.display());
    } else {
        println!("❌ {}: MISMATCH", path.display());
        println!("   expected {}", expected.trim());
    }
    Ok(ok)
}

/// Download from a running sharefile server and check the result
async fn fetch(url: &str, output: &Path, force: bool) -> Result<bool> {
    let base = url.trim_end_matches('/');

    let line = download::fetch_text(&format!("{}/hash", base)).await?;
    let (expected, name) =
        parse_checksum_line(&line).context("Server sent a malformed checksum line")?;
    let name = safe_file_name(&name)
        .with_context(|| format!("Refusing to save under name {:?}", name))?;
    let dest: PathBuf = output.join(&name);

    if !force && tokio::fs::try_exists(&dest).await.unwrap_or(true) {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            dest.display()
        );
    }

    println!("⬇️  Downloading {} to {}", name, dest.display());
    let result = download::download_file(&format!("{}/file", base), &dest, force).await?;

    let ok = result.sha256.eq_ignore_ascii_case(expected);
    if ok {
        println!("✅ {} bytes, sha256 {} OK", result.bytes, result.sha256);
    } else {
        println!("❌ Checksum mismatch for {}", dest.display());
        println!("   expected {}", expected);
        println!("   actual   {}", result.sha256);
    }
    Ok(ok)
}

/// Reduce a server-supplied name to a single path component
fn safe_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    match last {
        "" | "." | ".." => None,
        _ => Some(last.to_string()),
    }
}
