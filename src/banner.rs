//! Startup banner and session summary display.

use crate::binder::ClickTally;
use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// What the banner shows below the version block.
pub struct BannerInfo<'a> {
    /// `console`, `click` or `serve`.
    pub mode: &'a str,
    /// Base URL the client talks to, or the address the server listens on.
    pub address: &'a str,
    /// Mode-specific line, e.g. the wait timeout or the static directory.
    pub detail: &'a str,
}

pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             B E A C O N               ║
   ║      two buttons and a slow server    ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   mode      {}
   address   {}
   detail    {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.mode,
        info.address,
        info.detail,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

/// Print the click counts (if any) and a farewell.
pub fn print_session_summary(tally: ClickTally) {
    if tally.total() > 0 {
        println!(
            "session: {} issued, {} suppressed, {} unbound",
            tally.issued, tally.suppressed, tally.unbound
        );
    }
    println!("goodbye.");
}
