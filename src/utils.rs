use std::error::Error;
use std::fmt::Formatter;

/// Write `e` followed by every error in its `source` chain. Used for the
/// `Debug` impls of our error enums, so that logging `?e` shows the root
/// cause and not just the outermost message.
pub fn error_chain_fmt(
    e: &impl Error,
    f: &mut Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
