#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Thin entrypoint for the `responsive` binary.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = responsive_cli::run().await;
    std::process::exit(code);
}
