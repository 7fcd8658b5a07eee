//! CLI command implementations.

pub mod convert;
pub mod init;

pub use convert::{convert_site, parse_rename, ConvertOverrides};
pub use init::init_project;

/// Install the stdout `fmt` subscriber: DEBUG with `debug`, otherwise warnings only
pub fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if debug {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
